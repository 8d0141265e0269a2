pub mod random;

pub use random::RandomGenerator;

use snip_core::{GeneratorError, ShortCode};

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// Whether a produced code is free is decided by the caller's collision
/// policy, not by the generator.
pub trait Generator: Send + Sync + 'static {
    /// Produces the next code.
    ///
    /// An error means the generator cannot produce codes at all; callers
    /// must not fall back to a weaker code.
    fn generate(&self) -> Result<ShortCode, GeneratorError>;
}
