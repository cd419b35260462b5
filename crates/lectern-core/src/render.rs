// ── Rich text to HTML ──
//
// Walks a rich-text tree and writes semantic HTML. Every text value and
// attribute is escaped. Embedded entries and assets become placeholders
// carrying the target id; unknown node types render their children.

use std::fmt::Write;

use lectern_api::{Document, Node, NodeKind};

/// Render a whole document.
pub fn document_to_html(doc: &Document) -> String {
    let mut out = String::new();
    for block in doc.blocks() {
        write_node(&mut out, block);
    }
    out
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn write_children(out: &mut String, node: &Node) {
    for child in &node.content {
        write_node(out, child);
    }
}

fn wrap(out: &mut String, tag: &str, node: &Node) {
    let _ = write!(out, "<{tag}>");
    write_children(out, node);
    let _ = write!(out, "</{tag}>");
}

fn write_node(out: &mut String, node: &Node) {
    match node.kind() {
        NodeKind::Text => write_text(out, node),
        NodeKind::Paragraph => wrap(out, "p", node),
        NodeKind::Heading(level) => wrap(out, &format!("h{level}"), node),
        NodeKind::OrderedList => wrap(out, "ol", node),
        NodeKind::UnorderedList => wrap(out, "ul", node),
        NodeKind::ListItem => wrap(out, "li", node),
        NodeKind::Blockquote => wrap(out, "blockquote", node),
        NodeKind::Hr => out.push_str("<hr/>"),
        NodeKind::Table => wrap(out, "table", node),
        NodeKind::TableRow => wrap(out, "tr", node),
        NodeKind::TableCell => wrap(out, "td", node),
        NodeKind::TableHeaderCell => wrap(out, "th", node),
        NodeKind::Hyperlink => {
            let href = node.uri().unwrap_or("#");
            let _ = write!(out, "<a href=\"{}\">", escape_html(href));
            write_children(out, node);
            out.push_str("</a>");
        }
        NodeKind::EntryHyperlink | NodeKind::AssetHyperlink => {
            let target = node.target_id().unwrap_or_default();
            let _ = write!(out, "<a data-target=\"{}\">", escape_html(target));
            write_children(out, node);
            out.push_str("</a>");
        }
        NodeKind::EmbeddedEntryBlock => {
            embedded(out, "div", "embedded-entry", node.target_id());
        }
        NodeKind::EmbeddedEntryInline => {
            embedded(out, "span", "embedded-entry", node.target_id());
        }
        NodeKind::EmbeddedAssetBlock => {
            embedded(out, "figure", "embedded-asset", node.target_id());
        }
        NodeKind::Document | NodeKind::Unknown => write_children(out, node),
    }
}

fn embedded(out: &mut String, tag: &str, class: &str, target: Option<&str>) {
    let target = escape_html(target.unwrap_or_default());
    let _ = write!(out, "<{tag} class=\"{class}\" data-target=\"{target}\"></{tag}>");
}

fn write_text(out: &mut String, node: &Node) {
    let text = escape_html(node.value.as_deref().unwrap_or_default());
    let tags: Vec<&str> = node
        .marks
        .iter()
        .filter_map(|m| match m.mark_type.as_str() {
            "bold" => Some("strong"),
            "italic" => Some("em"),
            "underline" => Some("u"),
            "code" => Some("code"),
            "superscript" => Some("sup"),
            "subscript" => Some("sub"),
            "strikethrough" => Some("s"),
            _ => None,
        })
        .collect();

    for tag in &tags {
        let _ = write!(out, "<{tag}>");
    }
    out.push_str(&text);
    for tag in tags.iter().rev() {
        let _ = write!(out, "</{tag}>");
    }
}
