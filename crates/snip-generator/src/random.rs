use crate::Generator;
use rand::rngs::OsRng;
use rand::TryRngCore;
use snip_core::shortcode::{ALPHABET, GENERATED_LENGTH};
use snip_core::{GeneratorError, ShortCode};

/// Largest multiple of 62 that fits in a byte; bytes at or above it are
/// rejected so every symbol is equally likely.
const ACCEPT_BELOW: u8 = 62 * 4;

const BATCH: usize = 32;

/// Draws each symbol independently and uniformly from [`ALPHABET`] using the
/// operating system's CSPRNG.
///
/// Holds no mutable state, so one instance can serve any number of
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator for codes of [`GENERATED_LENGTH`] symbols.
    pub fn new() -> Self {
        Self::with_length(GENERATED_LENGTH)
    }

    pub fn with_length(length: usize) -> Self {
        Self { length }
    }

    fn generate_with<R: TryRngCore>(&self, rng: &mut R) -> Result<ShortCode, GeneratorError> {
        let mut code = String::with_capacity(self.length);
        let mut buf = [0u8; BATCH];

        while code.len() < self.length {
            rng.try_fill_bytes(&mut buf)
                .map_err(|e| GeneratorError::Entropy(e.to_string()))?;

            for byte in buf.iter().copied().filter(|b| *b < ACCEPT_BELOW) {
                code.push(ALPHABET[usize::from(byte % 62)] as char);
                if code.len() == self.length {
                    break;
                }
            }
        }

        Ok(ShortCode::new_unchecked(code))
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> Result<ShortCode, GeneratorError> {
        self.generate_with(&mut OsRng)
    }
}
