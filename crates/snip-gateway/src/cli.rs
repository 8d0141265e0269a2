use clap::{Parser, ValueEnum};
use snip_core::{CollisionPolicy, FailureMode, Retention};
use snip_shortener::{AnalyticsSettings, ShortenerSettings, DEFAULT_MAPPING_TTL};
use snip_storage::RedisConfig;
use snip_telemetry::LogFormat;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::time::Duration;

pub const LISTEN_ADDR_ENV: &str = "SNIP_LISTEN_ADDR";
pub const STORE_BACKEND_ENV: &str = "SNIP_STORE_BACKEND";
pub const REDIS_HOST_ENV: &str = "SNIP_REDIS_HOST";
pub const REDIS_PORT_ENV: &str = "SNIP_REDIS_PORT";
pub const REDIS_USERNAME_ENV: &str = "SNIP_REDIS_USERNAME";
pub const REDIS_PASSWORD_ENV: &str = "SNIP_REDIS_PASSWORD";
pub const REDIS_DATABASE_ENV: &str = "SNIP_REDIS_DATABASE";
pub const LOG_FORMAT_ENV: &str = "SNIP_LOG_FORMAT";
pub const MAPPING_TTL_ENV: &str = "SNIP_MAPPING_TTL_SECS";
pub const COLLISION_RETRIES_ENV: &str = "SNIP_COLLISION_RETRIES";
pub const FAILURE_MODE_ENV: &str = "SNIP_FAILURE_MODE";
pub const ANALYTICS_MAX_EVENTS_ENV: &str = "SNIP_ANALYTICS_MAX_EVENTS";
pub const ANALYTICS_TTL_ENV: &str = "SNIP_ANALYTICS_TTL_SECS";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_REDIS_HOST: &str = "127.0.0.1";
pub const DEFAULT_REDIS_PORT: u16 = 6379;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackendArg {
    #[value(name = "memory")]
    Memory,
    #[value(name = "redis")]
    Redis,
}

impl Display for StoreBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackendArg::Memory => write!(f, "memory"),
            StoreBackendArg::Redis => write!(f, "redis"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailureModeArg {
    /// Log store failures and answer with an empty result.
    Degrade,
    /// Report store failures to the client as 503.
    Surface,
}

impl From<FailureModeArg> for FailureMode {
    fn from(arg: FailureModeArg) -> Self {
        match arg {
            FailureModeArg::Degrade => FailureMode::Degrade,
            FailureModeArg::Surface => FailureMode::Surface,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "snip-gateway", about = "HTTP gateway for the snip URL shortener")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORE_BACKEND_ENV,
        value_enum,
        default_value_t = StoreBackendArg::Memory
    )]
    pub store: StoreBackendArg,

    #[arg(long, env = REDIS_HOST_ENV, default_value = DEFAULT_REDIS_HOST)]
    pub redis_host: String,

    #[arg(long, env = REDIS_PORT_ENV, default_value_t = DEFAULT_REDIS_PORT)]
    pub redis_port: u16,

    #[arg(long, env = REDIS_USERNAME_ENV)]
    pub redis_username: Option<String>,

    #[arg(long, env = REDIS_PASSWORD_ENV, hide_env_values = true)]
    pub redis_password: Option<String>,

    #[arg(long, env = REDIS_DATABASE_ENV, default_value_t = 0)]
    pub redis_database: u32,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,

    /// Seconds a mapping stays resolvable.
    #[arg(long, env = MAPPING_TTL_ENV, default_value_t = DEFAULT_MAPPING_TTL.as_secs())]
    pub mapping_ttl_secs: u64,

    /// Try up to this many codes per shorten instead of overwriting on collision.
    #[arg(long, env = COLLISION_RETRIES_ENV)]
    pub collision_retries: Option<u32>,

    #[arg(long, env = FAILURE_MODE_ENV, value_enum, default_value_t = FailureModeArg::Degrade)]
    pub failure_mode: FailureModeArg,

    /// Keep at most this many click events per code.
    #[arg(long, env = ANALYTICS_MAX_EVENTS_ENV)]
    pub analytics_max_events: Option<NonZeroUsize>,

    /// Expire a code's click history this many seconds after its last click.
    #[arg(long, env = ANALYTICS_TTL_ENV)]
    pub analytics_ttl_secs: Option<u64>,
}

impl CLI {
    pub fn redis_config(&self) -> RedisConfig {
        RedisConfig::builder()
            .host(self.redis_host.clone())
            .port(self.redis_port)
            .username(self.redis_username.clone())
            .password(self.redis_password.clone())
            .database(self.redis_database)
            .build()
    }

    pub fn shortener_settings(&self) -> ShortenerSettings {
        let collision_policy = match self.collision_retries {
            Some(max_attempts) => CollisionPolicy::RetryOnConflict { max_attempts },
            None => CollisionPolicy::Overwrite,
        };

        ShortenerSettings::builder()
            .mapping_ttl(Duration::from_secs(self.mapping_ttl_secs))
            .collision_policy(collision_policy)
            .failure_mode(self.failure_mode.into())
            .build()
    }

    pub fn analytics_settings(&self) -> AnalyticsSettings {
        AnalyticsSettings::builder()
            .retention(Retention {
                max_events: self.analytics_max_events,
                ttl: self.analytics_ttl_secs.map(Duration::from_secs),
            })
            .failure_mode(self.failure_mode.into())
            .build()
    }
}
