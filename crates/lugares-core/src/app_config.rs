use std::path::PathBuf;
use std::time::Duration;

use crate::{Coordinate, PositionOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which geolocation capability the session gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationBackend {
    /// Approximate position from an IP geolocation endpoint.
    Ip,
    /// A fixed coordinate from `LUGARES_STATIC_LOCATION`.
    Static,
    /// No capability at all; every request fails as unsupported.
    None,
}

impl std::fmt::Display for GeolocationBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeolocationBackend::Ip => write!(f, "ip"),
            GeolocationBackend::Static => write!(f, "static"),
            GeolocationBackend::None => write!(f, "none"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub catalog_path: Option<PathBuf>,
    pub search_latency_ms: u64,
    pub discard_stale_searches: bool,
    pub geo_backend: GeolocationBackend,
    pub geo_url: String,
    pub static_location: Option<Coordinate>,
    pub geo_high_accuracy: bool,
    pub geo_timeout_ms: u64,
    pub geo_max_age_ms: u64,
    pub user_agent: String,
}

impl AppConfig {
    #[must_use]
    pub fn position_options(&self) -> PositionOptions {
        PositionOptions {
            enable_high_accuracy: self.geo_high_accuracy,
            timeout: Duration::from_millis(self.geo_timeout_ms),
            maximum_age: Duration::from_millis(self.geo_max_age_ms),
        }
    }

    #[must_use]
    pub fn search_latency(&self) -> Duration {
        Duration::from_millis(self.search_latency_ms)
    }
}
