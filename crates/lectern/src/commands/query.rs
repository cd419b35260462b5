//! `lectern query`: raw entries of one content type.

use serde_json::Value;
use tabled::Tabled;

use lectern_core::{ContentService, EntryQuery, RawEntry};

use crate::cli::{GlobalOpts, QueryArgs};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    content_type: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

fn text_field(entry: &RawEntry, name: &str) -> Option<String> {
    entry.field(name).and_then(Value::as_str).map(str::to_owned)
}

fn entry_row(entry: &RawEntry) -> EntryRow {
    EntryRow {
        id: entry.id().to_owned(),
        content_type: output::or_dash(entry.content_type()),
        title: output::or_dash(
            text_field(entry, "title")
                .or_else(|| text_field(entry, "name"))
                .as_deref(),
        ),
        slug: output::or_dash(text_field(entry, "slug").as_deref()),
        updated: entry
            .sys
            .updated_at
            .map_or_else(|| "-".into(), |t| t.format("%Y-%m-%d %H:%M").to_string()),
    }
}

pub(crate) fn build_query(args: &QueryArgs) -> EntryQuery {
    let mut query = EntryQuery::new();
    for (name, value) in &args.fields {
        query = query.field_eq(name, value);
    }
    if let Some(limit) = args.limit {
        query = query.limit(limit);
    }
    if let Some(skip) = args.skip {
        query = query.skip(skip);
    }
    if let Some(ref order) = args.order {
        query = query.order(order);
    }
    if let Some(depth) = args.include {
        query = query.include(depth);
    }
    if let Some(ref locale) = args.locale {
        query = query.locale(locale);
    }
    query
}

pub async fn handle(
    service: &ContentService,
    args: QueryArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let query = build_query(&args);
    let page = service.entries(&args.content_type, &query).await?;

    let out = output::render_list(&global.output, &page.items, entry_row, |e| {
        e.id().to_owned()
    });
    output::print_output(&out, global.quiet);
    if !global.quiet && matches!(global.output, crate::cli::OutputFormat::Table) {
        eprintln!("{} of {} entries", page.items.len(), page.total);
    }
    Ok(())
}
