//! Geolocation capability.
//!
//! A provider answers one "current position" query per call. Outcomes follow
//! the browser model: a coordinate, or a [`PositionError`] carrying the
//! numeric code the controller maps to a `LocationError`.

mod ip;

use std::future::Future;
use std::time::Duration;

use lugares_core::{Coordinate, PositionError, PositionOptions};

pub use ip::IpGeolocation;

pub trait GeolocationProvider: Send + Sync + 'static {
    fn current_position(
        &self,
        options: PositionOptions,
    ) -> impl Future<Output = Result<Coordinate, PositionError>> + Send;
}

/// A provider that always reports the same outcome after an optional delay.
///
/// The delay counts against `options.timeout` like a real fix would.
#[derive(Debug, Clone)]
pub struct StaticGeolocation {
    outcome: Result<Coordinate, PositionError>,
    latency: Duration,
}

impl StaticGeolocation {
    #[must_use]
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            outcome: Ok(coordinate),
            latency: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn failing(error: PositionError) -> Self {
        Self {
            outcome: Err(error),
            latency: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl GeolocationProvider for StaticGeolocation {
    async fn current_position(&self, options: PositionOptions) -> Result<Coordinate, PositionError> {
        let fix = async {
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            self.outcome.clone()
        };

        if let Ok(outcome) = tokio::time::timeout(options.timeout, fix).await {
            outcome
        } else {
            tracing::debug!(timeout_ms = options.timeout.as_millis(), "static fix timed out");
            Err(PositionError::timeout("position request timed out"))
        }
    }
}

/// The provider selected by configuration.
#[derive(Debug)]
pub enum Geolocator {
    Ip(IpGeolocation),
    Static(StaticGeolocation),
}

impl GeolocationProvider for Geolocator {
    async fn current_position(&self, options: PositionOptions) -> Result<Coordinate, PositionError> {
        match self {
            Geolocator::Ip(provider) => provider.current_position(options).await,
            Geolocator::Static(provider) => provider.current_position(options).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(timeout_ms: u64) -> PositionOptions {
        PositionOptions {
            timeout: Duration::from_millis(timeout_ms),
            ..PositionOptions::default()
        }
    }

    #[tokio::test]
    async fn static_provider_reports_its_coordinate() {
        let provider = StaticGeolocation::new(Coordinate::new(1.0, 2.0));
        let fix = provider.current_position(options(1_000)).await;
        assert_eq!(fix, Ok(Coordinate::new(1.0, 2.0)));
    }

    #[tokio::test]
    async fn static_provider_reports_its_error() {
        let provider = StaticGeolocation::failing(PositionError::permission_denied("denied"));
        let err = provider.current_position(options(1_000)).await.unwrap_err();
        assert_eq!(err.code, PositionError::PERMISSION_DENIED);
    }

    #[tokio::test]
    async fn slow_static_provider_times_out() {
        let provider = StaticGeolocation::new(Coordinate::new(1.0, 2.0))
            .with_latency(Duration::from_millis(500));
        let err = provider.current_position(options(20)).await.unwrap_err();
        assert_eq!(err.code, PositionError::TIMEOUT);
    }

    #[tokio::test]
    async fn geolocator_dispatches_to_static() {
        let geolocator = Geolocator::Static(StaticGeolocation::new(Coordinate::new(3.0, 4.0)));
        let fix = geolocator.current_position(options(1_000)).await;
        assert_eq!(fix, Ok(Coordinate::new(3.0, 4.0)));
    }
}
