//! Image Types
//!
//! Request and response types for the proxied IIIF image server.

use serde::{Deserialize, Serialize};

use super::ImageServerError;

/// Image server implementation behind the proxy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageServerKind {
    /// sharp-based image server (libvips)
    #[default]
    Sharp,
    /// Loris IIIF image server
    Loris,
}

impl ImageServerKind {
    /// IIIF Image API 2 profile advertised in `info.json`
    pub fn profile(&self) -> ImageProfile {
        let (formats, qualities): (&[&str], &[&str]) = match self {
            Self::Sharp => (&["jpg", "png", "webp", "tif"], &["default", "color", "gray", "bitonal"]),
            Self::Loris => (&["jpg", "png", "gif", "webp"], &["default", "color", "gray", "bitonal"]),
        };

        ImageProfile {
            profile: "http://iiif.io/api/image/2/level2.json".to_string(),
            formats: formats.iter().map(|f| f.to_string()).collect(),
            qualities: qualities.iter().map(|q| q.to_string()).collect(),
            supports: [
                "regionByPct",
                "regionSquare",
                "sizeByForcedWh",
                "sizeByWh",
                "sizeAboveFull",
                "rotationBy90s",
                "mirroring",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            max_width: None,
        }
    }
}

/// IIIF Image API 2 profile description
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProfile {
    #[serde(skip)]
    pub profile: String,
    pub formats: Vec<String>,
    pub qualities: Vec<String>,
    pub supports: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
}

/// Parameters of an image request (`{region}/{size}/{rotation}/{quality}.{format}`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOptions {
    pub region: String,
    pub size: String,
    pub rotation: String,
    pub quality: String,
    pub format: String,
}

impl ImageOptions {
    /// Build options from URL path segments, splitting `quality.format`
    pub fn from_segments(
        region: &str,
        size: &str,
        rotation: &str,
        quality_format: &str,
    ) -> Result<Self, ImageServerError> {
        let (quality, format) = quality_format
            .rsplit_once('.')
            .filter(|(q, f)| !q.is_empty() && !f.is_empty())
            .ok_or_else(|| {
                ImageServerError::InvalidRequest(format!(
                    "Expected {{quality}}.{{format}}, got {:?}",
                    quality_format
                ))
            })?;

        if [region, size, rotation].iter().any(|s| s.is_empty()) {
            return Err(ImageServerError::InvalidRequest(
                "Region, size and rotation are required".to_string(),
            ));
        }

        Ok(Self {
            region: region.to_string(),
            size: size.to_string(),
            rotation: rotation.to_string(),
            quality: quality.to_string(),
            format: format.to_string(),
        })
    }
}

/// Response of the upstream image server
#[derive(Debug, Clone)]
pub struct ImageResult {
    /// Image bytes, only on a 200 response
    pub image: Option<Vec<u8>>,
    pub status: u16,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
}
