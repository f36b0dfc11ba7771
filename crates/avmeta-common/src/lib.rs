//! Avmeta-Common: Shared types, constants, and utilities.
//!
//! This crate provides common functionality used across avmeta:
//!
//! - **Core Types**: [`FileTriple`], the unit of work matched by the scanner
//! - **Path Utilities**: Functions to classify files by extension and derive
//!   sidecar file names
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use avmeta_common::paths::{has_extension_in, sidecar_file_name, video_extensions};
//! use std::path::Path;
//!
//! assert!(has_extension_in(Path::new("ABC-123.MKV"), video_extensions()));
//! assert_eq!(sidecar_file_name("ABC-123", Path::new("abc.mkv")), "ABC-123.mkv.vsmeta");
//! ```

pub mod error;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
