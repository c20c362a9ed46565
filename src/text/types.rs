//! Text Types
//!
//! Word streams, phrase matches and the indexed text records they belong to.

use serde::{Deserialize, Serialize};

/// Bounding box of a word in page pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl WordBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Media fragment for a canvas target (`xywh=x,y,w,h`)
    pub fn to_xywh(&self) -> String {
        format!("xywh={},{},{},{}", self.x, self.y, self.width, self.height)
    }
}

/// A single OCR-recognized token on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Recognized text
    pub text: String,
    /// 0-based position in the page's word stream
    pub index: usize,
    /// Position on the page
    pub bounds: WordBox,
}

impl Word {
    pub fn new(text: impl Into<String>, index: usize, bounds: WordBox) -> Self {
        Self {
            text: text.into(),
            index,
            bounds,
        }
    }
}

/// A single search hit inside a text resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseMatch {
    /// Text resource the hit was found in
    pub text_id: String,
    /// Exact matched substring, possibly several words
    pub matched: String,
    /// Context captured before the match
    pub before: String,
    /// Context captured after the match
    pub after: String,
}

impl PhraseMatch {
    pub fn new(
        text_id: impl Into<String>,
        matched: impl Into<String>,
        before: impl Into<String>,
        after: impl Into<String>,
    ) -> Self {
        Self {
            text_id: text_id.into(),
            matched: matched.into(),
            before: before.into(),
            after: after.into(),
        }
    }
}

/// Kind of text attached to a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TextType {
    Transcription,
    Translation,
}

impl TextType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transcription => "transcription",
            Self::Translation => "translation",
        }
    }

    /// Human readable label, e.g. `Translation en`
    pub fn label(&self, language: Option<&str>) -> String {
        match (self, language) {
            (Self::Transcription, _) => "Transcription".to_string(),
            (Self::Translation, Some(language)) => format!("Translation {}", language),
            (Self::Translation, None) => "Translation".to_string(),
        }
    }
}

impl std::str::FromStr for TextType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transcription" => Ok(Self::Transcription),
            "translation" => Ok(Self::Translation),
            other => Err(format!("Unknown text type: {}", other)),
        }
    }
}

/// Source format of a text
///
/// Only ALTO carries word positions; plain text is running text without geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TextSource {
    Plain,
    Alto,
}

impl TextSource {
    pub fn is_positional(&self) -> bool {
        matches!(self, Self::Alto)
    }
}

/// Indexed text record (a transcription or translation of one page)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Text {
    pub id: String,
    /// Page (item) the text belongs to
    pub item_id: String,
    /// Parent document of the page
    pub collection_id: String,
    pub text_type: TextType,
    pub language: Option<String>,
    pub source: TextSource,
    /// Path relative to the data directory
    pub file_path: Option<String>,
    /// Full running text (ALTO words joined with spaces)
    pub text: String,
}
