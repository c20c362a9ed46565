//! IIIF Content Search 1.0 responses
//!
//! Turns search results into an `sc:AnnotationList` with hits. Plain texts
//! have no geometry and produce one hit covering the whole canvas; ALTO texts
//! are run through the word locator and produce one annotation per located
//! word, shared between all hits that reference it.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::try_join_all;
use serde::Serialize;

use crate::db::Item;
use crate::search::SearchResult;
use crate::text::{locate, TextError, TextType, UniqueWords, Word, WordBox, WordStreamCache};

use super::uri::{query_suffix, IiifUris};

const PRESENTATION_2_CONTEXT: &str = "http://iiif.io/api/presentation/2/context.json";
pub const SEARCH_1_CONTEXT: &str = "http://iiif.io/api/search/1/context.json";

/// Scope and parameters of a search request
#[derive(Debug, Clone)]
pub struct SearchScope<'q> {
    pub collection_id: &'q str,
    pub query: &'q str,
    pub text_type: Option<TextType>,
    pub language: Option<&'q str>,
    /// Request parameters the service does not support
    pub ignored: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AnnotationList {
    #[serde(rename = "@context")]
    pub context: Vec<&'static str>,
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub within: Layer,
    pub resources: Vec<SearchAnnotation>,
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Serialize)]
pub struct Layer {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchAnnotation {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub motivation: &'static str,
    pub resource: ContentAsText,
    pub on: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentAsText {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub chars: String,
}

#[derive(Debug, Serialize)]
pub struct SearchHit {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub annotations: Vec<String>,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub selectors: Vec<TextQuoteSelector>,
}

impl SearchHit {
    fn new() -> Self {
        Self {
            kind: "search:Hit",
            annotations: Vec::new(),
            matched: None,
            before: None,
            after: None,
            selectors: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TextQuoteSelector {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub exact: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub prefix: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub suffix: String,
}

#[derive(Debug, Serialize)]
pub struct TermList {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored: Option<Vec<String>>,
    pub terms: Vec<Term>,
}

#[derive(Debug, Serialize)]
pub struct Term {
    #[serde(rename = "match")]
    pub matched: String,
    pub url: String,
}

fn text_annotation(id: String, chars: &str, on: String) -> SearchAnnotation {
    SearchAnnotation {
        id,
        kind: "oa:Annotation",
        motivation: "sc:painting",
        resource: ContentAsText {
            kind: "cnt:ContentAsText",
            chars: chars.to_string(),
        },
        on,
    }
}

fn target(canvas: &str, bounds: &WordBox) -> String {
    format!("{}#{}", canvas, bounds.to_xywh())
}

/// Build the annotation list for a search
///
/// Word streams of ALTO results are loaded up front; a failing stream fails
/// the whole response.
pub async fn annotation_list(
    uris: &IiifUris,
    scope: &SearchScope<'_>,
    results: &[SearchResult],
    items: &[Item],
    word_streams: &WordStreamCache,
) -> Result<AnnotationList, TextError> {
    let streams: Vec<Option<Arc<Vec<Word>>>> = try_join_all(results.iter().map(|result| async move {
        if result.text.source.is_positional() {
            word_streams.words(&result.text).await.map(Some)
        } else {
            Ok(None)
        }
    }))
    .await?;

    let suffix = query_suffix(scope.query);
    let mut resources = Vec::new();
    let mut hits = Vec::new();

    for (result, words) in results.iter().zip(streams) {
        let Some(item) = items.iter().find(|item| item.id == result.text.item_id) else {
            tracing::warn!(
                "Text {} references unknown item {}",
                result.text.id,
                result.text.item_id
            );
            continue;
        };
        let canvas = uris.canvas(scope.collection_id, item.order().unwrap_or(0));

        match words {
            None => {
                let annotation_id = format!(
                    "{}{}",
                    uris.search_annotation(
                        scope.collection_id,
                        scope.text_type,
                        scope.language,
                        &result.text.id
                    ),
                    suffix
                );
                let page = WordBox::new(0, 0, item.width.max(0) as u32, item.height.max(0) as u32);
                resources.push(text_annotation(
                    annotation_id.clone(),
                    &result.text.text,
                    target(&canvas, &page),
                ));

                let mut hit = SearchHit::new();
                hit.annotations.push(annotation_id);
                hit.selectors = result
                    .matches
                    .iter()
                    .map(|m| TextQuoteSelector {
                        kind: "oa:TextQuoteSelector",
                        exact: m.matched.clone(),
                        prefix: m.before.clone(),
                        suffix: m.after.clone(),
                    })
                    .collect();
                hits.push(hit);
            }
            Some(words) => {
                let mut unique = UniqueWords::new();

                for phrase in &result.matches {
                    let mut hit = SearchHit::new();
                    let mut in_hit = HashSet::new();

                    for word in locate(&words, phrase) {
                        let annotation_id = format!(
                            "{}{}",
                            uris.search_annotation(
                                scope.collection_id,
                                scope.text_type,
                                scope.language,
                                &format!("{}_{}", result.text.id, word.index)
                            ),
                            suffix
                        );

                        if unique.insert(word) {
                            resources.push(text_annotation(
                                annotation_id.clone(),
                                &word.text,
                                target(&canvas, &word.bounds),
                            ));
                        }
                        if in_hit.insert(word.index) {
                            hit.annotations.push(annotation_id);
                        }
                    }

                    hit.matched = Some(phrase.matched.clone());
                    hit.before = Some(phrase.before.clone());
                    hit.after = Some(phrase.after.clone());
                    hits.push(hit);
                }
            }
        }
    }

    Ok(AnnotationList {
        context: vec![PRESENTATION_2_CONTEXT, SEARCH_1_CONTEXT],
        id: format!(
            "{}{}",
            uris.search(scope.collection_id, scope.text_type, scope.language),
            suffix
        ),
        kind: "sc:AnnotationList",
        within: Layer {
            kind: "sc:Layer",
            total: resources.len(),
            ignored: (!scope.ignored.is_empty()).then(|| scope.ignored.clone()),
        },
        resources,
        hits,
    })
}

/// Build the autocomplete term list, one term per case-insensitive suggestion
pub fn term_list(uris: &IiifUris, scope: &SearchScope<'_>, suggestions: &[Vec<String>]) -> TermList {
    let mut seen = HashSet::new();
    let search = uris.search(scope.collection_id, scope.text_type, scope.language);

    let terms = suggestions
        .iter()
        .map(|words| words.join(" "))
        .filter(|term| seen.insert(term.to_lowercase()))
        .map(|term| Term {
            url: format!("{}{}", search, query_suffix(&term)),
            matched: term,
        })
        .collect();

    TermList {
        context: SEARCH_1_CONTEXT,
        id: format!(
            "{}{}",
            uris.autocomplete(scope.collection_id, scope.text_type, scope.language),
            query_suffix(scope.query)
        ),
        kind: "search:TermList",
        ignored: (!scope.ignored.is_empty()).then(|| scope.ignored.clone()),
        terms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{MockProvider, PhraseMatch, Text, TextSource};

    fn item(id: &str, order: i64) -> Item {
        Item {
            id: id.to_string(),
            parent_id: "doc".to_string(),
            label: None,
            item_order: Some(order),
            width: 1200,
            height: 1800,
            image_path: None,
        }
    }

    fn text(id: &str, item_id: &str, source: TextSource, body: &str) -> Text {
        Text {
            id: id.to_string(),
            item_id: item_id.to_string(),
            collection_id: "doc".to_string(),
            text_type: TextType::Transcription,
            language: None,
            source,
            file_path: Some(format!("{}.xml", id)),
            text: body.to_string(),
        }
    }

    fn scope(query: &str) -> SearchScope<'_> {
        SearchScope {
            collection_id: "doc",
            query,
            text_type: None,
            language: None,
            ignored: Vec::new(),
        }
    }

    fn cache_with(body: &str) -> WordStreamCache {
        let words = body
            .split_whitespace()
            .enumerate()
            .map(|(idx, w)| Word::new(w, idx, WordBox::new(idx as u32 * 50, 100, 40, 20)))
            .collect();
        WordStreamCache::new(Arc::new(MockProvider::new(words)), 8)
    }

    #[tokio::test]
    async fn test_plain_text_hit_covers_canvas() {
        let uris = IiifUris::new("http://x");
        let body = "a plain page about the sea and the sea";
        let results = vec![SearchResult {
            text: text("t1", "p1", TextSource::Plain, body),
            matches: vec![
                PhraseMatch::new("t1", "sea", "about the", "and the"),
                PhraseMatch::new("t1", "sea", "and the", ""),
            ],
        }];

        let list = annotation_list(&uris, &scope("sea"), &results, &[item("p1", 2)], &cache_with(""))
            .await
            .unwrap();

        assert_eq!(list.resources.len(), 1);
        assert_eq!(list.within.total, 1);
        assert_eq!(list.resources[0].on, "http://x/iiif/presentation/doc/canvas/2#xywh=0,0,1200,1800");
        assert_eq!(list.resources[0].resource.chars, body);
        assert_eq!(list.hits.len(), 1);
        assert_eq!(list.hits[0].selectors.len(), 2);
        assert_eq!(list.hits[0].annotations, vec!["http://x/iiif/search-annotation/doc/t1?q=sea"]);
        assert_eq!(list.id, "http://x/iiif/search/doc?q=sea");
    }

    #[tokio::test]
    async fn test_alto_hits_share_word_annotations() {
        let uris = IiifUris::new("http://x");
        let body = "so so good";
        let results = vec![SearchResult {
            text: text("t1", "p1", TextSource::Alto, body),
            matches: vec![
                PhraseMatch::new("t1", "so so", "", "good"),
                PhraseMatch::new("t1", "so", "", "good"),
            ],
        }];

        let list = annotation_list(&uris, &scope("so"), &results, &[item("p1", 1)], &cache_with(body))
            .await
            .unwrap();

        // Words 0 and 1 emitted once each, although located several times
        assert_eq!(list.resources.len(), 2);
        assert_eq!(list.within.total, 2);
        assert_eq!(list.resources[1].on, "http://x/iiif/presentation/doc/canvas/1#xywh=50,100,40,20");
        assert_eq!(list.resources[1].resource.chars, "so");

        assert_eq!(list.hits.len(), 2);
        assert_eq!(list.hits[0].annotations.len(), 2);
        assert_eq!(list.hits[0].annotations[0], "http://x/iiif/search-annotation/doc/t1_0?q=so");
        assert_eq!(list.hits[0].after.as_deref(), Some("good"));
        assert_eq!(list.hits[1].annotations.len(), 2);
    }

    #[tokio::test]
    async fn test_ignored_parameters_and_unknown_items() {
        let uris = IiifUris::new("http://x");
        let results = vec![SearchResult {
            text: text("t1", "gone", TextSource::Plain, "sea"),
            matches: vec![PhraseMatch::new("t1", "sea", "", "")],
        }];
        let mut scope = scope("sea");
        scope.ignored = vec!["motivation".to_string()];

        let list = annotation_list(&uris, &scope, &results, &[], &cache_with(""))
            .await
            .unwrap();

        assert!(list.resources.is_empty());
        assert!(list.hits.is_empty());

        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["within"]["ignored"][0], "motivation");
        assert_eq!(json["@type"], "sc:AnnotationList");
    }

    #[test]
    fn test_term_list_deduplicates_case_insensitively() {
        let uris = IiifUris::new("http://x");
        let suggestions = vec![
            vec!["Amsterdam".to_string()],
            vec!["amsterdam".to_string()],
            vec!["amstel".to_string(), "river".to_string()],
        ];

        let list = term_list(&uris, &scope("ams"), &suggestions);

        assert_eq!(list.terms.len(), 2);
        assert_eq!(list.terms[0].matched, "Amsterdam");
        assert_eq!(list.terms[1].matched, "amstel river");
        assert_eq!(list.terms[1].url, "http://x/iiif/search/doc?q=amstel%20river");
        assert_eq!(list.id, "http://x/iiif/autocomplete/doc?q=ams");
        assert!(list.ignored.is_none());
    }
}
