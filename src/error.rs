//! Error types for lockfocus operations.
//!
//! The text transformer itself never fails; errors come from the edges:
//! reading files, decoding settings and messages, parsing selectors and colours.

use thiserror::Error;

/// Errors that can occur while loading input or applying a message.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Invalid colour: {0}")]
    InvalidColor(String),

    #[error("Unknown reading mode: {0} (expected `bionic` or `syllable`)")]
    UnknownMode(String),

    #[error("Invalid message: {0}")]
    Message(String),

    #[error("Missing required element: {0}")]
    MissingElement(String),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;
