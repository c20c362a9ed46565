//! IIIF Module
//!
//! Assembles IIIF documents from search results, word streams and page
//! records:
//! - Content Search 1.0 annotation lists and term lists
//! - Presentation 3 manifests and annotation pages with sequence navigation
//! - Image API 2 `info.json`

mod annotation_page;
mod content;
mod image_info;
mod manifest;
mod search;
mod uri;

pub use annotation_page::{annotation_page, AnnotationPage, PRESENTATION_3_CONTEXT};
pub use content::JsonLd;
pub use image_info::{image_info, ImageInfo, IMAGE_2_CONTEXT};
pub use manifest::{manifest, Manifest};
pub use search::{annotation_list, term_list, AnnotationList, SearchScope, TermList, SEARCH_1_CONTEXT};
pub use uri::{query_suffix, IiifUris};
