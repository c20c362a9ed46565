//! IIIF identifier construction
//!
//! Every id handed out by the server is built here, below the public base URL.

use crate::text::TextType;

/// Builds IIIF ids below a base URL
#[derive(Debug, Clone)]
pub struct IiifUris {
    base_url: String,
}

impl IiifUris {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn manifest(&self, id: &str) -> String {
        format!("{}/iiif/presentation/{}/manifest", self.base_url, id)
    }

    pub fn canvas(&self, id: &str, order: u32) -> String {
        format!("{}/iiif/presentation/{}/canvas/{}", self.base_url, id, order)
    }

    pub fn search(&self, id: &str, text_type: Option<TextType>, language: Option<&str>) -> String {
        format!(
            "{}/iiif/search/{}{}",
            self.base_url,
            id,
            type_language_suffix(text_type, language)
        )
    }

    pub fn autocomplete(
        &self,
        id: &str,
        text_type: Option<TextType>,
        language: Option<&str>,
    ) -> String {
        format!(
            "{}/iiif/autocomplete/{}{}",
            self.base_url,
            id,
            type_language_suffix(text_type, language)
        )
    }

    pub fn search_annotation(
        &self,
        id: &str,
        text_type: Option<TextType>,
        language: Option<&str>,
        annotation_id: &str,
    ) -> String {
        format!(
            "{}/iiif/search-annotation/{}{}/{}",
            self.base_url,
            id,
            type_language_suffix(text_type, language),
            annotation_id
        )
    }

    pub fn annotation_collection(
        &self,
        id: &str,
        text_type: TextType,
        language: Option<&str>,
    ) -> String {
        format!(
            "{}/iiif/annocoll/{}{}",
            self.base_url,
            id,
            type_language_suffix(Some(text_type), language)
        )
    }

    pub fn annotation_page(&self, id: &str, text_id: &str) -> String {
        format!("{}/iiif/annopage/{}/{}", self.base_url, id, text_id)
    }

    /// Annotation on a page; word annotations carry a 1-based word number
    pub fn annotation(&self, id: &str, item_id: &str, word: Option<usize>) -> String {
        match word {
            Some(word) => format!("{}/iiif/annotation/{}/{}/{}", self.base_url, id, item_id, word),
            None => format!("{}/iiif/annotation/{}/{}", self.base_url, id, item_id),
        }
    }

    pub fn image(&self, id: &str) -> String {
        format!("{}/iiif/image/{}", self.base_url, id)
    }

    /// Source file of a text (ALTO XML or plain text)
    pub fn text_file(&self, text_id: &str) -> String {
        format!("{}/text/{}", self.base_url, text_id)
    }

    /// Running text of a text
    pub fn text_plain(&self, text_id: &str) -> String {
        format!("{}/text/{}/plain", self.base_url, text_id)
    }
}

/// `?q=` query suffix for search and autocomplete ids
pub fn query_suffix(query: &str) -> String {
    format!("?q={}", urlencoding::encode(query))
}

fn type_language_suffix(text_type: Option<TextType>, language: Option<&str>) -> String {
    match (text_type, language) {
        (Some(text_type), Some(language)) => format!("/{}/{}", text_type.as_str(), language),
        (Some(text_type), None) => format!("/{}", text_type.as_str()),
        (None, _) => String::new(),
    }
}
