//! Avmeta-VSMeta: the `.vsmeta` sidecar container used by Video Station.
//!
//! A `.vsmeta` file sits next to a video and carries its title, credits,
//! synopsis and embedded artwork. The container is a flat sequence of
//! protobuf-style fields: every field starts with a varint key
//! `(field_number << 3) | wire_type`, followed by either a varint value or a
//! varint length and that many bytes.
//!
//! # Modules
//!
//! - `document` - The in-memory [`VsMeta`] document
//! - `wire` - Varint/key/length-delimited primitives
//! - `encode` - Deterministic serialization of a document
//! - `decode` - Parsing a sidecar back into a document
//!
//! # Layout
//!
//! | Key | Field |
//! |---|---|
//! | `08` | kind (1 = movie) |
//! | `12` / `1A` / `22` | title / sort title / tagline |
//! | `28` | year |
//! | `32` | release date (`YYYY-MM-DD`) |
//! | `38` | locked |
//! | `42` | summary |
//! | `4A` | metadata JSON |
//! | `52` | credits group (cast, director, genre, writer) |
//! | `5A` | classification |
//! | `60` | rating × 10, `-1` when unknown |
//! | `8A 01` / `92 01` | poster (base64) / poster MD5 |
//! | `AA 01` | backdrop group (base64, MD5) |
//!
//! Encoding never embeds timestamps, so identical documents always produce
//! identical bytes.

pub mod decode;
pub mod document;
pub mod encode;
pub mod error;
mod wire;

pub use decode::decode;
pub use document::{Credits, Image, MediaKind, VsMeta};
pub use encode::encode;
pub use error::{Error, Result};
