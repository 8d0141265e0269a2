use crate::error::ShortenerError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The 62 symbols generated codes are drawn from.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of a system-generated short code.
pub const GENERATED_LENGTH: usize = 7;

/// A short code identifier for a shortened URL.
///
/// Codes produced by the generator are always [`GENERATED_LENGTH`] characters
/// of [`ALPHABET`]. Codes arriving from callers only have to be non-empty:
/// the key prefix namespaces them, and an unknown code simply resolves to
/// nothing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortCode(String);

impl ShortCode {
    /// Creates a new `ShortCode` after validating the input.
    pub fn new(code: impl Into<String>) -> Result<Self, ShortenerError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (e.g. generators that are guaranteed to produce valid output).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the code has the exact shape the generator produces.
    pub fn is_generated_shape(&self) -> bool {
        self.0.len() == GENERATED_LENGTH && self.0.bytes().all(|b| ALPHABET.contains(&b))
    }

    fn validate(code: &str) -> Result<(), ShortenerError> {
        if code.is_empty() {
            return Err(ShortenerError::InvalidShortCode(
                "short code cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ShortCode {
    type Error = ShortenerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShortCode> for String {
    fn from(code: ShortCode) -> Self {
        code.0
    }
}
