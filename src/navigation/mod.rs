//! Sequence navigation across sibling pages
//!
//! Resolves first/last/previous/next links for resources (transcriptions,
//! translations) that are attached to only some pages of a document.

mod navigator;

pub use navigator::{navigate, Navigation, SiblingItem};

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("Item not found among siblings: {0}")]
    UnknownItem(String),
}
