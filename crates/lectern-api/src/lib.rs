// lectern-api: Async Rust client for a Contentful-style content delivery API

pub mod client;
pub mod error;
pub mod query;
pub mod rich_text;
pub mod transport;
pub mod types;

pub use client::{DELIVERY_HOST, DeliveryClient, PREVIEW_HOST};
pub use error::Error;
pub use query::EntryQuery;
pub use rich_text::{Document, Mark, Node, NodeKind};
pub use transport::{TlsMode, TransportConfig};
pub use types::{EntryCollection, Includes, Link, RawEntry, Sys};
