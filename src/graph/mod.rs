//! Incremental expansion of a following/followers network.
//!
//! An [`EdgeStore`] is built once from the tab-separated source and never
//! changes afterwards. Every viewer session owns an [`ExpansionEngine`] that
//! tracks which part of the network is visible and grows it one tap at a time.

mod engine;
mod loader;
mod store;
mod types;

pub use engine::ExpansionEngine;
pub use loader::{EdgeRow, HEADER, ParseError, load_edges, parse_rows};
pub use store::EdgeStore;
pub use types::{Edge, Element, ElementClass, Node, ROOT_ID, ROOT_LABEL, VisibleGraph};
