//! HTTP surface of the lectern course site.
//!
//! [`server::build_router`] wires the JSON API (`/api/*`), the health
//! probe, and the server-rendered chapter and lesson pages over a shared
//! [`server::AppState`]. The `lectern` binary adds the CLI on top.

pub mod server;
