//! Error types for huffpress

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("empty input")]
    EmptyInput,

    #[error("symbol {0} has no entry in the code table")]
    UnsupportedSymbol(String),

    #[error("corrupt artifact: {0}")]
    CorruptArtifact(String),

    #[error("input too large: {size} symbols exceeds limit of {limit}")]
    InputTooLarge { size: usize, limit: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("background task failed: {0}")]
    Background(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl CodecError {
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::warn!(%reason, "rejecting corrupt artifact");
        CodecError::CorruptArtifact(reason)
    }
}
