//! Image server client
//!
//! Forwards IIIF image requests to the configured image server.

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};

use crate::config::ImageServerConfig;

use super::types::{ImageOptions, ImageResult, ImageServerKind};
use super::ImageServerError;

/// HTTP client for the upstream image server
#[derive(Clone)]
pub struct ImageServerClient {
    client: reqwest::Client,
    base_url: Option<String>,
    kind: ImageServerKind,
    max_size: Option<u32>,
}

impl ImageServerClient {
    pub fn new(config: &ImageServerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config
                .url
                .as_deref()
                .map(|url| url.trim_end_matches('/').to_string()),
            kind: config.name,
            max_size: config.max_size,
        }
    }

    pub fn kind(&self) -> ImageServerKind {
        self.kind
    }

    pub fn max_size(&self) -> Option<u32> {
        self.max_size
    }

    /// Upstream URL for an image below the image server root
    pub fn request_url(
        &self,
        relative_path: &str,
        options: &ImageOptions,
    ) -> Result<String, ImageServerError> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or(ImageServerError::NotConfigured)?;

        // The image server has no `max` size keyword
        let size = if options.size == "max" {
            "full"
        } else {
            options.size.as_str()
        };

        Ok(format!(
            "{}/{}/{}/{}/{}/{}.{}",
            base_url,
            urlencoding::encode(relative_path),
            options.region,
            size,
            options.rotation,
            options.quality,
            options.format
        ))
    }

    /// Fetch an image; non-200 statuses are returned, not raised
    pub async fn fetch(
        &self,
        relative_path: &str,
        options: &ImageOptions,
    ) -> Result<ImageResult, ImageServerError> {
        let url = self.request_url(relative_path, options)?;

        let mut request = self.client.get(&url);
        if let Some(max) = self.max_size {
            request = request.query(&[("max", max)]);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();

        if status != 200 {
            tracing::debug!("Image server returned {} for {}", status, url);
            return Ok(ImageResult {
                image: None,
                status,
                content_type: None,
                content_length: None,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let content_length = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let image = response.bytes().await?.to_vec();

        Ok(ImageResult {
            image: Some(image),
            status,
            content_type,
            content_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: Option<&str>) -> ImageServerClient {
        ImageServerClient::new(&ImageServerConfig {
            url: url.map(str::to_string),
            name: ImageServerKind::Loris,
            max_size: Some(2000),
        })
    }

    fn options(size: &str) -> ImageOptions {
        ImageOptions::from_segments("full", size, "0", "default.jpg").unwrap()
    }

    #[test]
    fn test_request_url_encodes_path() {
        let url = client(Some("http://images:8080/iiif/"))
            .request_url("letters/0001 front.tif", &options("!400,400"))
            .unwrap();

        assert_eq!(
            url,
            "http://images:8080/iiif/letters%2F0001%20front.tif/full/!400,400/0/default.jpg"
        );
    }

    #[test]
    fn test_max_size_rewritten_to_full() {
        let url = client(Some("http://images"))
            .request_url("a.jpg", &options("max"))
            .unwrap();
        assert_eq!(url, "http://images/a.jpg/full/full/0/default.jpg");
    }

    #[test]
    fn test_unconfigured_server() {
        let result = client(None).request_url("a.jpg", &options("full"));
        assert!(matches!(result, Err(ImageServerError::NotConfigured)));
    }

    #[test]
    fn test_invalid_quality_format() {
        assert!(ImageOptions::from_segments("full", "full", "0", "default").is_err());
        assert!(ImageOptions::from_segments("full", "full", "0", ".jpg").is_err());

        let opts = ImageOptions::from_segments("0,0,10,10", "full", "90", "gray.png").unwrap();
        assert_eq!(opts.quality, "gray");
        assert_eq!(opts.format, "png");
    }

    #[test]
    fn test_kind_defaults_to_sharp() {
        assert_eq!(ImageServerKind::default(), ImageServerKind::Sharp);
        assert_eq!(serde_json::to_value(ImageServerKind::Loris).unwrap(), "loris");
    }
}
