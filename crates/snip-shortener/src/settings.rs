use snip_core::{CollisionPolicy, FailureMode, Retention};
use std::time::Duration;
use typed_builder::TypedBuilder;

/// Mappings live for 30 days.
pub const DEFAULT_MAPPING_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

#[derive(Debug, Clone, TypedBuilder)]
pub struct ShortenerSettings {
    /// How long a mapping stays resolvable after it is written.
    #[builder(default = DEFAULT_MAPPING_TTL)]
    pub mapping_ttl: Duration,
    #[builder(default)]
    pub collision_policy: CollisionPolicy,
    #[builder(default)]
    pub failure_mode: FailureMode,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct AnalyticsSettings {
    #[builder(default)]
    pub retention: Retention,
    #[builder(default)]
    pub failure_mode: FailureMode,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
