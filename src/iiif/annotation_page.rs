//! IIIF Presentation 3 annotation pages
//!
//! One annotation page per text. The page is part of an annotation collection
//! spanning all texts of the same kind and language in the document; prev and
//! next skip pages that have no such text.

use serde::Serialize;

use crate::db::Item;
use crate::navigation::{navigate, NavigationError, SiblingItem};
use crate::text::{Text, Word};

use super::uri::IiifUris;

pub const PRESENTATION_3_CONTEXT: &str = "http://iiif.io/api/presentation/3/context.json";

#[derive(Debug, Serialize)]
pub struct AnnotationPage {
    #[serde(rename = "@context")]
    pub context: &'static str,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(rename = "partOf")]
    pub part_of: AnnotationCollection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Reference>,
    pub items: Vec<Annotation>,
}

#[derive(Debug, Serialize)]
pub struct AnnotationCollection {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub label: Label,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<Reference>,
}

/// Language map with a single value
#[derive(Debug, Serialize)]
pub struct Label {
    pub none: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reference {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Annotation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub motivation: &'static str,
    pub body: TextualBody,
    pub target: String,
}

#[derive(Debug, Serialize)]
pub struct TextualBody {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub value: String,
    pub format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

fn supplementing(id: String, value: &str, language: Option<&str>, target: String) -> Annotation {
    Annotation {
        id,
        kind: "Annotation",
        motivation: "supplementing",
        body: TextualBody {
            kind: "TextualBody",
            value: value.to_string(),
            format: "text/plain",
            language: language.map(str::to_string),
        },
        target,
    }
}

/// Assemble the annotation page of `text`
///
/// `items` are the pages of the document in order; `texts` are all texts of
/// the document with the same type and language as `text`. `words` is the
/// word stream for ALTO texts and `None` for plain texts.
pub fn annotation_page(
    uris: &IiifUris,
    text: &Text,
    items: &[Item],
    texts: &[Text],
    words: Option<&[Word]>,
) -> Result<AnnotationPage, NavigationError> {
    let collection_id = text.collection_id.as_str();

    let siblings: Vec<SiblingItem<'_, Text>> = items
        .iter()
        .map(|item| {
            SiblingItem::new(
                &item.id,
                item.order(),
                texts.iter().find(|t| t.item_id == item.id),
            )
        })
        .collect();

    let navigation = navigate(&siblings, &text.item_id)?;
    let page_ref = |t: &Text| Reference {
        id: uris.annotation_page(collection_id, &t.id),
        kind: "AnnotationPage",
    };

    // Located above, so the item exists
    let order = items
        .iter()
        .find(|item| item.id == text.item_id)
        .and_then(Item::order)
        .unwrap_or(0);
    let canvas = uris.canvas(collection_id, order);

    let annotations = match words {
        Some(words) => words
            .iter()
            .map(|word| {
                supplementing(
                    uris.annotation(collection_id, &text.item_id, Some(word.index + 1)),
                    &word.text,
                    text.language.as_deref(),
                    format!("{}#{}", canvas, word.bounds.to_xywh()),
                )
            })
            .collect(),
        None => vec![supplementing(
            uris.annotation(collection_id, &text.item_id, None),
            &text.text,
            text.language.as_deref(),
            canvas,
        )],
    };

    Ok(AnnotationPage {
        context: PRESENTATION_3_CONTEXT,
        id: uris.annotation_page(collection_id, &text.id),
        kind: "AnnotationPage",
        part_of: AnnotationCollection {
            id: uris.annotation_collection(collection_id, text.text_type, text.language.as_deref()),
            kind: "AnnotationCollection",
            label: Label {
                none: vec![text.text_type.label(text.language.as_deref())],
            },
            first: navigation.first.map(page_ref),
            last: navigation.last.map(page_ref),
        },
        prev: navigation.previous.map(page_ref),
        next: navigation.next.map(page_ref),
        items: annotations,
    })
}
