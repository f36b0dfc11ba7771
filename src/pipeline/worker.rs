//! Converting one matched NFO/video pair into a sidecar.

use std::path::{Path, PathBuf};

use avmeta_common::paths::sidecar_file_name;
use avmeta_common::FileTriple;
use avmeta_vsmeta::Image;
use thiserror::Error;
use tracing::{debug, warn};

use super::PipelineContext;
use crate::artwork::{needs_conversion, FetchError};
use crate::convert::{to_vsmeta, Artwork};
use crate::metadata::{MediaRecord, NfoError};

/// Why a single item produced no sidecar.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: NfoError,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("worker stopped unexpectedly: {0}")]
    Panicked(String),
}

/// Run every step for one triple and return the sidecar path.
pub async fn process_triple(ctx: &PipelineContext, triple: &FileTriple) -> Result<PathBuf, ItemError> {
    let bytes = tokio::fs::read(&triple.nfo)
        .await
        .map_err(|source| ItemError::Read {
            path: triple.nfo.clone(),
            source,
        })?;

    let mut record = MediaRecord::from_nfo(&bytes).map_err(|source| ItemError::Parse {
        path: triple.nfo.clone(),
        source,
    })?;

    let fanart_path = triple.dir.join(&ctx.artwork.fanart_file);
    let poster_path = triple.dir.join(&ctx.artwork.poster_file);

    for (url, dest) in [(&record.fanart, &fanart_path), (&record.poster, &poster_path)] {
        if let Err(e) = fetch_missing(ctx, url, dest).await {
            warn!(url = %url, dest = %dest.display(), "Artwork download failed: {}", e);
        }
    }

    record.fanart = fanart_path.display().to_string();
    record.poster = poster_path.display().to_string();

    let artwork = if ctx.artwork.embed {
        Artwork {
            poster: load_local(&poster_path).await,
            backdrop: load_local(&fanart_path).await,
        }
    } else {
        Artwork::default()
    };

    let encoded = avmeta_vsmeta::encode(&to_vsmeta(&record, &artwork));

    let sidecar = triple
        .dir
        .join(sidecar_file_name(&record.number, &triple.video));
    tokio::fs::write(&sidecar, &encoded)
        .await
        .map_err(|source| ItemError::Write {
            path: sidecar.clone(),
            source,
        })?;

    tracing::info!(
        source = %triple.nfo_name(),
        number = %record.number,
        dir = %triple.dir.display(),
        "Converted"
    );

    Ok(sidecar)
}

/// Download `url` to `dest` unless `dest` already exists.
///
/// Returns whether a download happened. The caller only warns on error; the
/// sidecar is written either way.
async fn fetch_missing(ctx: &PipelineContext, url: &str, dest: &Path) -> Result<bool, FetchError> {
    let Some(fetcher) = ctx.fetcher.as_ref() else {
        return Ok(false);
    };
    if url.is_empty() || tokio::fs::try_exists(dest).await.unwrap_or(false) {
        return Ok(false);
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        debug!(url, "Artwork reference is not a URL, not fetching");
        return Ok(false);
    }

    fetcher.fetch(url, dest, needs_conversion(url)).await?;
    Ok(true)
}

async fn load_local(path: &Path) -> Option<Image> {
    match tokio::fs::read(path).await {
        Ok(data) => Some(Image::new(data)),
        Err(e) => {
            warn!(path = %path.display(), "Artwork missing locally: {}", e);
            None
        }
    }
}
