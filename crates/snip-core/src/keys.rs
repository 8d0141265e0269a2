//! Key layout of the backing store.

use crate::shortcode::ShortCode;

pub const URL_PREFIX: &str = "url:";
pub const ANALYTICS_PREFIX: &str = "analytics:";

/// Key holding the original URL for a code.
pub fn url_key(code: &ShortCode) -> String {
    format!("{}{}", URL_PREFIX, code.as_str())
}

/// Key holding the newest-first click list for a code.
pub fn analytics_key(code: &ShortCode) -> String {
    format!("{}{}", ANALYTICS_PREFIX, code.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_format() {
        let code = ShortCode::new_unchecked("A1B2C3D");
        assert_eq!(url_key(&code), "url:A1B2C3D");
        assert_eq!(analytics_key(&code), "analytics:A1B2C3D");
    }
}
