//! IIIF Presentation 3 manifest of a document
//!
//! One canvas per ordered page. Each canvas links the annotation pages of the
//! texts on that page and their source files.

use serde::Serialize;

use crate::db::Item;
use crate::text::{Text, TextSource};

use super::annotation_page::{Label, Reference, PRESENTATION_3_CONTEXT};
use super::uri::IiifUris;

const ALTO_PROFILE: &str = "http://www.loc.gov/standards/alto/";
const SEARCH_1_PROFILE: &str = "http://iiif.io/api/search/1/search";
const AUTOCOMPLETE_1_PROFILE: &str = "http://iiif.io/api/search/1/autocomplete";

#[derive(Debug, Serialize)]
pub struct Manifest {
    #[serde(rename = "@context")]
    pub context: &'static str,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub label: Label,
    #[serde(rename = "viewingDirection")]
    pub viewing_direction: &'static str,
    pub behavior: Vec<&'static str>,
    pub items: Vec<Canvas>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub service: Vec<SearchService>,
}

#[derive(Debug, Serialize)]
pub struct Canvas {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub label: Label,
    pub width: i64,
    pub height: i64,
    pub items: Vec<PaintingPage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Reference>,
    #[serde(rename = "seeAlso", skip_serializing_if = "Vec::is_empty")]
    pub see_also: Vec<ExternalText>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rendering: Vec<ExternalText>,
}

#[derive(Debug, Serialize)]
pub struct PaintingPage {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub items: Vec<PaintingAnnotation>,
}

#[derive(Debug, Serialize)]
pub struct PaintingAnnotation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub motivation: &'static str,
    pub body: ImageBody,
    pub target: String,
}

#[derive(Debug, Serialize)]
pub struct ImageBody {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub format: &'static str,
    pub width: i64,
    pub height: i64,
    pub service: Vec<ImageService>,
}

/// Image API 2 service, in its version 2 notation
#[derive(Debug, Serialize)]
pub struct ImageService {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub profile: String,
}

#[derive(Debug, Serialize)]
pub struct ExternalText {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub label: Label,
    pub format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SearchService {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub profile: &'static str,
    pub service: Vec<AutoCompleteService>,
}

#[derive(Debug, Serialize)]
pub struct AutoCompleteService {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub profile: &'static str,
}

fn label(value: String) -> Label {
    Label { none: vec![value] }
}

fn painting_page(uris: &IiifUris, canvas_id: &str, item: &Item, image_profile: &str) -> PaintingPage {
    let image = uris.image(&item.id);

    PaintingPage {
        id: format!("{}/page", canvas_id),
        kind: "AnnotationPage",
        items: vec![PaintingAnnotation {
            id: format!("{}/image", canvas_id),
            kind: "Annotation",
            motivation: "painting",
            body: ImageBody {
                id: format!("{}/full/max/0/default.jpg", image),
                kind: "Image",
                format: "image/jpeg",
                width: item.width,
                height: item.height,
                service: vec![ImageService {
                    id: image,
                    kind: "ImageService2",
                    profile: image_profile.to_string(),
                }],
            },
            target: canvas_id.to_string(),
        }],
    }
}

fn source_file(uris: &IiifUris, text: &Text) -> ExternalText {
    match text.source {
        TextSource::Alto => ExternalText {
            id: uris.text_file(&text.id),
            kind: "Text",
            label: label("ALTO XML".to_string()),
            format: "application/xml",
            profile: Some(ALTO_PROFILE),
        },
        TextSource::Plain => ExternalText {
            id: uris.text_file(&text.id),
            kind: "Text",
            label: label(text.text_type.label(text.language.as_deref())),
            format: "text/plain",
            profile: None,
        },
    }
}

fn canvas(uris: &IiifUris, item: &Item, order: u32, texts: &[&Text], image_profile: &str) -> Canvas {
    let collection_id = item.parent_id.as_str();
    let id = uris.canvas(collection_id, order);

    let items = match item.image_path {
        Some(_) => vec![painting_page(uris, &id, item, image_profile)],
        None => Vec::new(),
    };

    Canvas {
        label: label(item.label.clone().unwrap_or_else(|| order.to_string())),
        width: item.width,
        height: item.height,
        items,
        annotations: texts
            .iter()
            .map(|t| Reference {
                id: uris.annotation_page(collection_id, &t.id),
                kind: "AnnotationPage",
            })
            .collect(),
        see_also: texts.iter().map(|t| source_file(uris, t)).collect(),
        rendering: texts
            .iter()
            .map(|t| ExternalText {
                id: uris.text_plain(&t.id),
                kind: "Text",
                label: label(t.text_type.label(t.language.as_deref())),
                format: "text/plain",
                profile: None,
            })
            .collect(),
        id,
        kind: "Canvas",
    }
}

/// Assemble the manifest of document `id`
///
/// `items` are the pages of the document and `texts` all of its texts. Pages
/// without an order get no canvas.
pub fn manifest(
    uris: &IiifUris,
    id: &str,
    title: Option<&str>,
    items: &[Item],
    texts: &[Text],
    image_profile: &str,
) -> Manifest {
    let mut pages: Vec<(u32, &Item)> = items
        .iter()
        .filter_map(|item| Some((item.order()?, item)))
        .collect();
    pages.sort_by_key(|(order, _)| *order);

    let canvases: Vec<Canvas> = pages
        .iter()
        .map(|(order, item)| {
            let on_page: Vec<&Text> = texts.iter().filter(|t| t.item_id == item.id).collect();
            canvas(uris, item, *order, &on_page, image_profile)
        })
        .collect();

    let service = if texts.is_empty() {
        Vec::new()
    } else {
        vec![SearchService {
            id: uris.search(id, None, None),
            kind: "SearchService1",
            profile: SEARCH_1_PROFILE,
            service: vec![AutoCompleteService {
                id: uris.autocomplete(id, None, None),
                kind: "AutoCompleteService1",
                profile: AUTOCOMPLETE_1_PROFILE,
            }],
        }]
    };

    Manifest {
        context: PRESENTATION_3_CONTEXT,
        id: uris.manifest(id),
        kind: "Manifest",
        label: label(title.unwrap_or(id).to_string()),
        viewing_direction: "left-to-right",
        behavior: vec![if canvases.len() > 1 { "paged" } else { "individuals" }],
        items: canvases,
        service,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TextType;

    fn item(id: &str, order: Option<i64>, image_path: Option<&str>) -> Item {
        Item {
            id: id.to_string(),
            parent_id: "doc".to_string(),
            label: None,
            item_order: order,
            width: 1200,
            height: 1800,
            image_path: image_path.map(str::to_string),
        }
    }

    fn text(id: &str, item_id: &str, source: TextSource, language: Option<&str>) -> Text {
        Text {
            id: id.to_string(),
            item_id: item_id.to_string(),
            collection_id: "doc".to_string(),
            text_type: TextType::Transcription,
            language: language.map(str::to_string),
            source,
            file_path: None,
            text: String::new(),
        }
    }

    const LEVEL2: &str = "http://iiif.io/api/image/2/level2.json";

    #[test]
    fn test_canvases_follow_page_order() {
        let uris = IiifUris::new("http://x");
        let items = vec![
            item("p2", Some(2), None),
            item("p1", Some(1), Some("doc/p1.tif")),
            item("loose", None, None),
        ];
        let texts = vec![
            text("t1", "p1", TextSource::Alto, None),
            text("t1-en", "p1", TextSource::Plain, Some("en")),
        ];

        let manifest = manifest(&uris, "doc", Some("Letters"), &items, &texts, LEVEL2);

        assert_eq!(manifest.id, "http://x/iiif/presentation/doc/manifest");
        assert_eq!(manifest.label.none, vec!["Letters"]);
        assert_eq!(manifest.behavior, vec!["paged"]);
        assert_eq!(manifest.items.len(), 2);

        let first = &manifest.items[0];
        assert_eq!(first.id, "http://x/iiif/presentation/doc/canvas/1");
        assert_eq!((first.width, first.height), (1200, 1800));
        assert_eq!(first.items[0].items[0].body.service[0].id, "http://x/iiif/image/p1");
        assert_eq!(first.items[0].items[0].target, first.id);
        assert_eq!(
            first.annotations,
            vec![
                Reference { id: "http://x/iiif/annopage/doc/t1".to_string(), kind: "AnnotationPage" },
                Reference { id: "http://x/iiif/annopage/doc/t1-en".to_string(), kind: "AnnotationPage" },
            ]
        );
        assert_eq!(first.see_also[0].profile, Some(ALTO_PROFILE));
        assert_eq!(first.see_also[1].format, "text/plain");
        assert_eq!(first.rendering[1].id, "http://x/text/t1-en/plain");

        // No image and no texts on p2
        let second = &manifest.items[1];
        assert!(second.items.is_empty());
        assert!(second.annotations.is_empty());

        assert_eq!(manifest.service[0].id, "http://x/iiif/search/doc");
        assert_eq!(manifest.service[0].service[0].id, "http://x/iiif/autocomplete/doc");
    }

    #[test]
    fn test_single_page_without_texts() {
        let uris = IiifUris::new("http://x");
        let manifest = manifest(&uris, "doc", None, &[item("p1", Some(1), None)], &[], LEVEL2);

        assert_eq!(manifest.label.none, vec!["doc"]);
        assert_eq!(manifest.behavior, vec!["individuals"]);

        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["type"], "Manifest");
        assert_eq!(json["viewingDirection"], "left-to-right");
        assert_eq!(json["items"][0]["type"], "Canvas");
        assert!(json.get("service").is_none());
        assert!(json["items"][0].get("seeAlso").is_none());
    }
}
