//! Error types for message decoding

use thiserror::Error;

/// Errors that can occur while decoding a message
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The MIME engine rejected the message structure
    #[error("Failed to parse message structure: {0}")]
    Structure(String),

    /// Failed to decode the content of a single part
    #[error("Failed to decode content: {0}")]
    Decode(String),

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// The file store could not persist an attachment
    #[error("Failed to store attachment: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON projection failed
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// `MessagePack` projection failed
    #[error("Failed to encode MessagePack: {0}")]
    MsgPack(#[from] rmp_serde::encode::Error),
}

/// Result type for decoding operations
pub type Result<T> = std::result::Result<T, DecodeError>;
