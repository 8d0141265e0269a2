mod health;
mod url;

pub use health::health_handler;
pub use self::url::{analytics_handler, click_handler, resolve_handler, shorten_handler};
