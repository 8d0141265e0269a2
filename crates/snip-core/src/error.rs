use thiserror::Error;

/// Errors reported by a [`KeyValueStore`](crate::KeyValueStore) backend.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type for the shortener and analytics services.
pub type Result<T> = std::result::Result<T, ShortenerError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
    #[error("store operation timed out: {0}")]
    Timeout(String),
    #[error("store serialization failed: {0}")]
    Serialization(String),
    #[error("stored value is invalid: {0}")]
    InvalidData(String),
    #[error("store operation failed: {0}")]
    Operation(String),
}

impl StoreError {
    /// Whether retrying the same operation later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_) | StoreError::Timeout(_))
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("randomness source unavailable: {0}")]
    Entropy(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShortenerError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("code generation failed: {0}")]
    Generator(#[from] GeneratorError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("no free short code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },
}

impl ShortenerError {
    /// Whether the caller may retry the failed operation.
    ///
    /// Transient store failures and an exhausted code space qualify;
    /// generator failures are fatal.
    pub fn is_retryable(&self) -> bool {
        match self {
            ShortenerError::Store(e) => e.is_retryable(),
            ShortenerError::CodeSpaceExhausted { .. } => true,
            ShortenerError::InvalidShortCode(_) | ShortenerError::Generator(_) => false,
        }
    }
}
