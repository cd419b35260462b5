// Wire types for the content delivery API.
//
// Entries keep their `fields` as an untyped JSON map; typed records are
// produced downstream in `lectern-core` after validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Sys metadata ────────────────────────────────────────────────────

/// The `sys` block carried by every entry, asset, and collection item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    pub id: String,
    #[serde(rename = "type")]
    pub sys_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

// ── Links ───────────────────────────────────────────────────────────

/// A reference to another entry, asset, or content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub sys: LinkSys,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSys {
    #[serde(rename = "type")]
    pub sys_type: String,
    pub link_type: String,
    pub id: String,
}

impl Link {
    /// Interpret a field value as a link, if it has the link shape.
    pub fn from_value(value: &Value) -> Option<Self> {
        let link: Self = serde_json::from_value(value.clone()).ok()?;
        (link.sys.sys_type == "Link").then_some(link)
    }

    pub fn id(&self) -> &str {
        &self.sys.id
    }

    pub fn is_asset(&self) -> bool {
        self.sys.link_type == "Asset"
    }
}

// ── Entries ─────────────────────────────────────────────────────────

/// A single CMS record: metadata plus a field-name → value map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    pub sys: Sys,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl RawEntry {
    pub fn id(&self) -> &str {
        &self.sys.id
    }

    /// The content type id (e.g. `"lesson"`), when the CMS reported one.
    pub fn content_type(&self) -> Option<&str> {
        self.sys.content_type.as_ref().map(Link::id)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }
}

/// Linked entries and assets returned alongside a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Includes {
    #[serde(rename = "Entry", default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<RawEntry>,
    #[serde(rename = "Asset", default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<RawEntry>,
}

/// A page of entries: `GET /entries` response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryCollection {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub items: Vec<RawEntry>,
    #[serde(default)]
    pub includes: Includes,
}

impl EntryCollection {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolve a link against the page items and the `includes` block.
    pub fn resolve(&self, link: &Link) -> Option<&RawEntry> {
        let mut pool: Box<dyn Iterator<Item = &RawEntry> + '_> = if link.is_asset() {
            Box::new(self.includes.assets.iter())
        } else {
            Box::new(self.items.iter().chain(self.includes.entries.iter()))
        };
        pool.find(|e| e.id() == link.id())
    }
}

// ── Error envelope ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub sys: Option<ErrorSys>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorSys {
    pub id: Option<String>,
}
