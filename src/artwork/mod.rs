//! Poster and fan-art retrieval.
//!
//! Images referenced by URL in an NFO are downloaded once next to the video
//! and reused on every later run. Anything that is not already a JPEG is
//! re-encoded so the sidecar and Video Station always see `.jpg` files.

mod fetcher;

pub use fetcher::{needs_conversion, ArtworkFetcher, FetchError};
