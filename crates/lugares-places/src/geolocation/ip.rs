//! Approximate positioning from an IP geolocation endpoint.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use lugares_core::{Coordinate, PositionError, PositionOptions};
use serde::Deserialize;

use super::GeolocationProvider;

/// Response shape shared by ipapi-style endpoints.
///
/// Some of them answer 200 with `{"error": true, "reason": ...}` when they
/// refuse a lookup, so every field is optional.
#[derive(Debug, Deserialize)]
struct IpLocationResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

#[derive(Debug, Clone, Copy)]
struct CachedFix {
    coordinate: Coordinate,
    obtained_at: Instant,
}

/// Geolocation via an HTTP endpoint returning `latitude`/`longitude`.
///
/// Fixes are cached and reused while younger than `options.maximum_age`.
/// `enable_high_accuracy` has no effect: IP lookups have one accuracy.
#[derive(Debug)]
pub struct IpGeolocation {
    client: reqwest::Client,
    endpoint: String,
    last_fix: Mutex<Option<CachedFix>>,
}

impl IpGeolocation {
    /// # Errors
    ///
    /// Returns the underlying `reqwest::Error` if the HTTP client cannot be
    /// constructed.
    pub fn new(endpoint: impl Into<String>, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            last_fix: Mutex::new(None),
        })
    }

    fn cached(&self, maximum_age: Duration) -> Option<Coordinate> {
        let guard = self.last_fix.lock().unwrap_or_else(PoisonError::into_inner);
        guard
            .filter(|fix| fix.obtained_at.elapsed() < maximum_age)
            .map(|fix| fix.coordinate)
    }

    fn remember(&self, coordinate: Coordinate) {
        let mut guard = self.last_fix.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(CachedFix {
            coordinate,
            obtained_at: Instant::now(),
        });
    }

    async fn fetch(&self, timeout: Duration) -> Result<Coordinate, PositionError> {
        let response = self
            .client
            .get(&self.endpoint)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(PositionError::permission_denied(format!(
                "geolocation endpoint refused the lookup ({status})"
            )));
        }
        if !status.is_success() {
            return Err(PositionError::position_unavailable(format!(
                "geolocation endpoint returned {status}"
            )));
        }

        let body: IpLocationResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                PositionError::timeout(e.to_string())
            } else {
                PositionError::position_unavailable(format!("unreadable response: {e}"))
            }
        })?;

        if body.error {
            return Err(PositionError::position_unavailable(
                body.reason
                    .unwrap_or_else(|| "lookup refused by endpoint".to_string()),
            ));
        }

        match (body.latitude, body.longitude) {
            (Some(lat), Some(lng)) => Ok(Coordinate::new(lat, lng)),
            _ => Err(PositionError::position_unavailable(
                "response carried no coordinates",
            )),
        }
    }
}

fn classify_transport_error(err: &reqwest::Error) -> PositionError {
    if err.is_timeout() {
        PositionError::timeout(err.to_string())
    } else {
        PositionError::position_unavailable(err.to_string())
    }
}

impl GeolocationProvider for IpGeolocation {
    async fn current_position(&self, options: PositionOptions) -> Result<Coordinate, PositionError> {
        if let Some(coordinate) = self.cached(options.maximum_age) {
            tracing::debug!(endpoint = %self.endpoint, "reusing cached fix");
            return Ok(coordinate);
        }

        tracing::debug!(
            endpoint = %self.endpoint,
            timeout_ms = options.timeout.as_millis(),
            high_accuracy = options.enable_high_accuracy,
            "requesting ip fix"
        );
        let coordinate = self.fetch(options.timeout).await?;
        self.remember(coordinate);
        Ok(coordinate)
    }
}
