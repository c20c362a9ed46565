//! Text Module
//!
//! Word streams of OCR'd pages and the locator that maps search hits onto them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use iiif_text_server::text::{locate, AltoFileProvider, PhraseMatch, WordStreamProvider};
//!
//! let provider = AltoFileProvider::new("./data");
//! let words = provider.read_words("letters/0001.xml").await?;
//!
//! let hit = PhraseMatch::new("text-1", "dear sir", "letter to my", "I write");
//! let located = locate(&words, &hit);
//! ```

mod alto;
mod cache;
mod locator;
mod provider;
mod types;

pub use alto::{parse_alto, words_to_text};
pub use cache::WordStreamCache;
pub use locator::{locate, UniqueWords, CONTEXT_SLACK};
pub use provider::{AltoFileProvider, WordStreamProvider};
pub use types::{PhraseMatch, Text, TextSource, TextType, Word, WordBox};

#[cfg(test)]
pub(crate) use provider::MockProvider;

/// Text error types
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("Text resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid ALTO: {0}")]
    InvalidAlto(String),

    #[error("Text has no source file: {0}")]
    MissingFile(String),
}
