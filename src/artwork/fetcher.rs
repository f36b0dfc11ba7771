//! HTTP download with optional JPEG re-encoding.

use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

use avmeta_common::paths::ARTWORK_EXTENSION;
use image::ImageFormat;
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::config::ArtworkConfig;

/// Why a single artwork download failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    Status { url: String, status: StatusCode },

    #[error("could not convert {url} to JPEG: {source}")]
    Image {
        url: String,
        #[source]
        source: image::ImageError,
    },

    #[error("could not write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Downloads artwork with one shared HTTP client.
#[derive(Debug, Clone)]
pub struct ArtworkFetcher {
    client: Client,
}

impl ArtworkFetcher {
    /// Build a fetcher from the artwork settings.
    ///
    /// The client carries the configured timeout and user agent, plus a
    /// `Referer` header when one is set.
    pub fn new(config: &ArtworkConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(referer) = config.referer.as_deref().filter(|r| !r.is_empty()) {
            headers.insert(REFERER, HeaderValue::from_str(referer)?);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    /// Download `url` to `dest`.
    ///
    /// With `convert` set the body is decoded and written back out as JPEG,
    /// dropping any alpha channel. Otherwise the bytes are saved verbatim.
    pub async fn fetch(&self, url: &str, dest: &Path, convert: bool) -> Result<(), FetchError> {
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        let body = response.bytes().await.map_err(transport)?;

        let data = if convert {
            to_jpeg(&body).map_err(|source| FetchError::Image {
                url: url.to_string(),
                source,
            })?
        } else {
            body.to_vec()
        };

        tokio::fs::write(dest, &data)
            .await
            .map_err(|source| FetchError::Io {
                path: dest.display().to_string(),
                source,
            })?;

        tracing::debug!(url, dest = %dest.display(), bytes = data.len(), convert, "Fetched artwork");
        Ok(())
    }
}

fn to_jpeg(data: &[u8]) -> Result<Vec<u8>, image::ImageError> {
    let img = image::load_from_memory(data)?;
    let rgb = image::DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buf = Cursor::new(Vec::new());
    rgb.write_to(&mut buf, ImageFormat::Jpeg)?;
    Ok(buf.into_inner())
}

/// Whether the image behind `url` has to be re-encoded to become a `.jpg`.
///
/// Only the path extension counts; query string and fragment are ignored.
pub fn needs_conversion(url: &str) -> bool {
    let path = url
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');
    let file_name = path.rsplit('/').next().unwrap_or_default();

    match file_name.rsplit_once('.') {
        Some((_, ext)) => !ext.eq_ignore_ascii_case(ARTWORK_EXTENSION),
        None => true,
    }
}
