//! Error types for metalign.

use thiserror::Error;

/// Result type for metalign operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for metalign operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A named tokenizer or tagger could not be constructed.
    #[error("Resource load failed: {0}")]
    ResourceLoad(String),

    /// Caller-supplied subwords do not match the sentence's expansion.
    #[error("Alignment contract violated: {0}")]
    AlignmentContract(String),

    /// Zero rows given where a schema must be inferred.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Wrong rank, batch size or value range for a tensor helper.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Tokenization failed inside a loaded tokenizer.
    #[error("Tokenization failed: {0}")]
    Tokenization(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Candle tensor error.
    #[error("Tensor error: {0}")]
    Tensor(#[from] candle_core::Error),

    /// Error from the core types.
    #[error(transparent)]
    Core(#[from] metalign_core::Error),
}

impl Error {
    /// Create a resource load error.
    pub fn resource_load(msg: impl Into<String>) -> Self {
        Error::ResourceLoad(msg.into())
    }

    /// Create an alignment contract error.
    pub fn alignment_contract(msg: impl Into<String>) -> Self {
        Error::AlignmentContract(msg.into())
    }

    /// Create an empty input error.
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Error::EmptyInput(msg.into())
    }

    /// Create a precondition error.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Error::Precondition(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a tokenization error.
    pub fn tokenization(msg: impl Into<String>) -> Self {
        Error::Tokenization(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(format!("{}", err))
    }
}

/// Convert HuggingFace API errors to our Error type.
impl From<hf_hub::api::sync::ApiError> for Error {
    fn from(err: hf_hub::api::sync::ApiError) -> Self {
        Error::ResourceLoad(format!("{}", err))
    }
}
