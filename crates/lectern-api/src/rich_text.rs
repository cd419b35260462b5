// Rich-text document model.
//
// Documents are trees of nodes keyed by `nodeType`. The raw node type string
// is kept so documents round-trip unchanged; `Node::kind()` classifies it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single node of a rich-text tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub node_type: String,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
    /// Text payload (text nodes only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Formatting marks (text nodes only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub mark_type: String,
}

/// Classified node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Paragraph,
    Heading(u8),
    OrderedList,
    UnorderedList,
    ListItem,
    Blockquote,
    Hr,
    Hyperlink,
    EntryHyperlink,
    AssetHyperlink,
    EmbeddedEntryBlock,
    EmbeddedEntryInline,
    EmbeddedAssetBlock,
    Table,
    TableRow,
    TableCell,
    TableHeaderCell,
    Text,
    Unknown,
}

impl NodeKind {
    pub fn parse(node_type: &str) -> Self {
        match node_type {
            "document" => Self::Document,
            "paragraph" => Self::Paragraph,
            "heading-1" => Self::Heading(1),
            "heading-2" => Self::Heading(2),
            "heading-3" => Self::Heading(3),
            "heading-4" => Self::Heading(4),
            "heading-5" => Self::Heading(5),
            "heading-6" => Self::Heading(6),
            "ordered-list" => Self::OrderedList,
            "unordered-list" => Self::UnorderedList,
            "list-item" => Self::ListItem,
            "blockquote" => Self::Blockquote,
            "hr" => Self::Hr,
            "hyperlink" => Self::Hyperlink,
            "entry-hyperlink" => Self::EntryHyperlink,
            "asset-hyperlink" => Self::AssetHyperlink,
            "embedded-entry-block" => Self::EmbeddedEntryBlock,
            "embedded-entry-inline" => Self::EmbeddedEntryInline,
            "embedded-asset-block" => Self::EmbeddedAssetBlock,
            "table" => Self::Table,
            "table-row" => Self::TableRow,
            "table-cell" => Self::TableCell,
            "table-header-cell" => Self::TableHeaderCell,
            "text" => Self::Text,
            _ => Self::Unknown,
        }
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        NodeKind::parse(&self.node_type)
    }

    /// `data.uri` for hyperlinks.
    pub fn uri(&self) -> Option<&str> {
        self.data.get("uri").and_then(Value::as_str)
    }

    /// `data.target.sys.id` for embedded and linked nodes.
    pub fn target_id(&self) -> Option<&str> {
        self.data
            .get("target")
            .and_then(|t| t.get("sys"))
            .and_then(|s| s.get("id"))
            .and_then(Value::as_str)
    }

    pub fn has_mark(&self, mark: &str) -> bool {
        self.marks.iter().any(|m| m.mark_type == mark)
    }
}

/// A validated rich-text document (root `nodeType` is `"document"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(pub Node);

impl Document {
    /// Parse a field value into a document, rejecting non-document roots.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let node: Node = serde_json::from_value(value.clone()).map_err(|e| e.to_string())?;
        if node.kind() == NodeKind::Document {
            Ok(Self(node))
        } else {
            Err(format!(
                "expected nodeType 'document', got '{}'",
                node.node_type
            ))
        }
    }

    pub fn blocks(&self) -> &[Node] {
        &self.0.content
    }
}
