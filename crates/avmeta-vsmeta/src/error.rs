//! Error types for avmeta-vsmeta.

use thiserror::Error;

/// Result type for avmeta-vsmeta operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for decoding `.vsmeta` data.
#[derive(Debug, Error)]
pub enum Error {
    /// Input ended in the middle of a field.
    #[error("Buffer underflow: need {need} bytes, have {have}")]
    BufferUnderflow { need: usize, have: usize },

    /// A varint ran past ten bytes.
    #[error("Varint overflow at offset {0}")]
    VarintOverflow(usize),

    /// The file does not start with a media kind field.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// A wire type this container never uses.
    #[error("Unsupported wire type {wire_type} for field {field}")]
    UnsupportedWireType { field: u32, wire_type: u8 },

    /// A text field is not valid UTF-8.
    #[error("Field {0} is not valid UTF-8")]
    InvalidUtf8(u32),

    /// Embedded artwork is not valid base64.
    #[error("Invalid artwork encoding: {0}")]
    InvalidArtwork(#[from] base64::DecodeError),
}

impl Error {
    /// Create an invalid header error.
    pub fn invalid_header(msg: impl Into<String>) -> Self {
        Self::InvalidHeader(msg.into())
    }
}
