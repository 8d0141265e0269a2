mod health;
mod url;

pub use health::HealthResponse;
pub use self::url::{validate_url, ErrorResponse, ResolveResponse, ShortenRequest, ShortenResponse};
