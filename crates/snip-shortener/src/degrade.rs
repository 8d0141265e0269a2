use snip_core::error::{Result, StoreResult};
use snip_core::{FailureMode, ShortCode};
use tracing::error;

/// Applies `mode` to the outcome of a store call.
///
/// Under [`FailureMode::Degrade`] a failure is logged and replaced by
/// `fallback`; under [`FailureMode::Surface`] it is returned as is.
pub(crate) fn absorb<T>(
    mode: FailureMode,
    operation: &'static str,
    code: &ShortCode,
    result: StoreResult<T>,
    fallback: impl FnOnce() -> T,
) -> Result<T> {
    match (result, mode) {
        (Ok(value), _) => Ok(value),
        (Err(e), FailureMode::Degrade) => {
            error!(
                code = %code,
                operation,
                error = %e,
                retryable = e.is_retryable(),
                "store failure, returning empty result"
            );
            Ok(fallback())
        }
        (Err(e), FailureMode::Surface) => Err(e.into()),
    }
}
