/// Convenience result type used across the codec.
pub type PagResult<T> = Result<T, PagError>;

/// Top-level error taxonomy used by codec APIs.
#[derive(thiserror::Error, Debug)]
pub enum PagError {
    /// The byte stream ended early or carried a value that cannot be decoded.
    #[error("corrupt data: {0}")]
    CorruptData(String),

    /// The file container header is missing, malformed or from an unsupported version.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// Decoded or user-provided data failed structural checks.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing JSON models and configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PagError {
    /// Build a [`PagError::CorruptData`] value.
    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::CorruptData(msg.into())
    }

    /// Build a [`PagError::InvalidHeader`] value.
    pub fn header(msg: impl Into<String>) -> Self {
        Self::InvalidHeader(msg.into())
    }

    /// Build a [`PagError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PagError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True for stream-level corruption, the only error class the tag loop absorbs.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::CorruptData(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
