//! Location primitives shared by the geolocation providers and the controller.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A latitude/longitude pair as reported by a geolocation provider.
///
/// No range validation happens here; providers are trusted to report valid
/// coordinates. Values are replaced wholesale, never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected \"lat,lng\", got \"{0}\"")]
pub struct ParseCoordinateError(pub String);

impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    /// Parses `"lat,lng"` (whitespace around either number is ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCoordinateError(s.to_string());
        let (lat, lng) = s.split_once(',').ok_or_else(err)?;
        let lat = lat.trim().parse::<f64>().map_err(|_| err())?;
        let lng = lng.trim().parse::<f64>().map_err(|_| err())?;
        Ok(Self { lat, lng })
    }
}

/// Options handed to a geolocation provider on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    /// Upper bound on how long the provider may take to produce a fix.
    pub timeout: Duration,
    /// Cached fixes younger than this may be returned instead of a fresh one.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(300),
        }
    }
}

/// A failed position query as reported by a provider.
///
/// `code` follows the browser geolocation numbering: 1 = permission denied,
/// 2 = position unavailable, 3 = timeout. Providers may report other codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("position error {code}: {message}")]
pub struct PositionError {
    pub code: u16,
    pub message: String,
}

impl PositionError {
    pub const PERMISSION_DENIED: u16 = 1;
    pub const POSITION_UNAVAILABLE: u16 = 2;
    pub const TIMEOUT: u16 = 3;

    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(Self::PERMISSION_DENIED, message)
    }

    pub fn position_unavailable(message: impl Into<String>) -> Self {
        Self::new(Self::POSITION_UNAVAILABLE, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(Self::TIMEOUT, message)
    }
}

/// User-facing classification of a failed location request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Geolocation is not supported on this device")]
    Unsupported,
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location unavailable")]
    PositionUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Error getting location")]
    Unknown,
}

impl LocationError {
    /// Map a provider error code onto the user-facing taxonomy.
    ///
    /// Unrecognised codes map to [`LocationError::Unknown`].
    #[must_use]
    pub fn from_code(code: u16) -> Self {
        match code {
            PositionError::PERMISSION_DENIED => Self::PermissionDenied,
            PositionError::POSITION_UNAVAILABLE => Self::PositionUnavailable,
            PositionError::TIMEOUT => Self::Timeout,
            _ => Self::Unknown,
        }
    }
}

impl From<&PositionError> for LocationError {
    fn from(err: &PositionError) -> Self {
        Self::from_code(err.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code_maps_known_codes() {
        assert_eq!(LocationError::from_code(1), LocationError::PermissionDenied);
        assert_eq!(
            LocationError::from_code(2),
            LocationError::PositionUnavailable
        );
        assert_eq!(LocationError::from_code(3), LocationError::Timeout);
    }

    #[test]
    fn from_code_maps_anything_else_to_unknown() {
        for code in [0, 4, 99, u16::MAX] {
            assert_eq!(LocationError::from_code(code), LocationError::Unknown);
        }
    }

    #[test]
    fn position_error_converts_through_its_code() {
        let err = PositionError::timeout("took too long");
        assert_eq!(LocationError::from(&err), LocationError::Timeout);
    }

    #[test]
    fn default_options_match_browser_request() {
        let opts = PositionOptions::default();
        assert!(opts.enable_high_accuracy);
        assert_eq!(opts.timeout, Duration::from_secs(10));
        assert_eq!(opts.maximum_age, Duration::from_secs(300));
    }

    #[test]
    fn coordinate_parses_lat_lng_pair() {
        let c: Coordinate = " 40.4168 , -3.7038 ".parse().unwrap();
        assert_eq!(c, Coordinate::new(40.4168, -3.7038));
    }

    #[test]
    fn coordinate_rejects_malformed_input() {
        assert!("40.4168".parse::<Coordinate>().is_err());
        assert!("north,south".parse::<Coordinate>().is_err());
        assert!("".parse::<Coordinate>().is_err());
    }
}
