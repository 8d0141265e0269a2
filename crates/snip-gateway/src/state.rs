use snip_core::{ClickAnalytics, Shortener};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<dyn Shortener>,
    pub analytics: Arc<dyn ClickAnalytics>,
}

impl AppState {
    pub fn new(shortener: impl Shortener, analytics: impl ClickAnalytics) -> Self {
        Self {
            shortener: Arc::new(shortener),
            analytics: Arc::new(analytics),
        }
    }
}
