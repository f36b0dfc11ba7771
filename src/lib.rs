//! avmeta - NFO to Video Station sidecar converter
//!
//! This library crate exposes the core functionality for integration testing.

pub mod artwork;
pub mod config;
pub mod convert;
pub mod metadata;
pub mod pipeline;
pub mod scanner;
