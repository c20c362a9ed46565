//! IIIF Image API 2 `info.json`

use serde::Serialize;

use crate::db::Item;
use crate::image::{ImageProfile, ImageServerKind};

use super::uri::IiifUris;

pub const IMAGE_2_CONTEXT: &str = "http://iiif.io/api/image/2/context.json";

#[derive(Debug, Serialize)]
pub struct ImageInfo {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub protocol: &'static str,
    pub width: i64,
    pub height: i64,
    /// Compliance level URI followed by the profile description
    pub profile: (String, ImageProfile),
}

pub fn image_info(
    uris: &IiifUris,
    item: &Item,
    kind: ImageServerKind,
    max_size: Option<u32>,
) -> ImageInfo {
    let mut profile = kind.profile();
    profile.max_width = max_size;

    ImageInfo {
        context: IMAGE_2_CONTEXT,
        id: uris.image(&item.id),
        protocol: "http://iiif.io/api/image",
        width: item.width,
        height: item.height,
        profile: (profile.profile.clone(), profile),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_json_layout() {
        let item = Item {
            id: "p1".to_string(),
            parent_id: "doc".to_string(),
            label: None,
            item_order: Some(1),
            width: 2400,
            height: 3600,
            image_path: Some("doc/p1.tif".to_string()),
        };

        let info = image_info(&IiifUris::new("http://x"), &item, ImageServerKind::Loris, Some(1000));
        let json = serde_json::to_value(&info).unwrap();

        assert_eq!(json["@id"], "http://x/iiif/image/p1");
        assert_eq!(json["width"], 2400);
        assert_eq!(json["profile"][0], "http://iiif.io/api/image/2/level2.json");
        assert_eq!(json["profile"][1]["maxWidth"], 1000);
        assert_eq!(json["profile"][1]["formats"][2], "gif");
    }
}
