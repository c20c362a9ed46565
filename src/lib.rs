//! IIIF Text Server Library
//!
//! IIIF search and annotation services over OCR'd page texts. The server
//! binary is in main.rs; the modules are exposed for integration tests and
//! benchmarks.
//!
//! # Modules
//!
//! - `text`: word streams, ALTO parsing and the context-anchored word locator
//! - `navigation`: first/last/previous/next across sparse sibling pages
//! - `search`: FTS5 index and phrase match extraction
//! - `iiif`: IIIF document assembly
//! - `routes`: HTTP surface

pub mod config;
pub mod db;
pub mod error;
pub mod iiif;
pub mod image;
pub mod navigation;
pub mod routes;
pub mod search;
pub mod state;
pub mod text;
