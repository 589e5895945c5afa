//! Log subscriber setup for the post store service.
//!
//! `RUST_LOG` wins when set. Otherwise the filter is built from
//! `LOG_LEVEL` (the service) and `STORE_LOG_LEVEL` (the post service and
//! storage adapters), so store reads, writes and id collisions can be turned
//! up without drowning in actix noise.

use std::env;

use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events describe what happens to the post store.
const STORE_TARGETS: [&str; 2] = ["blogmini_core", "blogmini_infra"];

/// Telemetry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// One JSON object per event instead of pretty output.
    pub json_logs: bool,
    /// Service name reported at startup.
    pub service_name: String,
    /// Level for this binary and everything not listed below.
    pub log_level: Level,
    /// Level for the post service and storage adapters.
    pub store_log_level: Level,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            json_logs: false,
            service_name: "blogmini-api".to_string(),
            log_level: Level::INFO,
            store_log_level: Level::DEBUG,
        }
    }
}

impl TelemetryConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Unknown levels keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let level = |key: &str, fallback: Level| {
            lookup(key)
                .and_then(|v| v.parse::<Level>().ok())
                .unwrap_or(fallback)
        };

        Self {
            json_logs: lookup("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
            service_name: lookup("OTEL_SERVICE_NAME").unwrap_or(defaults.service_name),
            log_level: level("LOG_LEVEL", defaults.log_level),
            store_log_level: level("STORE_LOG_LEVEL", defaults.store_log_level),
        }
    }

    /// Filter directives used when `RUST_LOG` is not set,
    /// e.g. `info,blog_server=info,blogmini_core=debug,blogmini_infra=debug`.
    pub fn filter_directives(&self) -> String {
        let level = self.log_level.as_str().to_lowercase();
        let store = self.store_log_level.as_str().to_lowercase();

        let mut directives = vec![level.clone(), format!("blog_server={level}")];
        directives.extend(STORE_TARGETS.iter().map(|target| format!("{target}={store}")));
        directives.join(",")
    }
}

/// Initialize the global tracing subscriber.
pub fn init_telemetry(config: &TelemetryConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directives()));

    if config.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        store_log_level = %config.store_log_level,
        "Telemetry initialized"
    );
}
