//! Device geolocation request options and outcomes.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options for a single-shot position request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocateOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// How old a cached fix may be. Zero forces a fresh fix.
    pub maximum_age: Duration,
}

impl Default for LocateOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::ZERO,
        }
    }
}

impl LocateOptions {
    /// The `PositionOptions` dictionary expected by the browser API.
    pub fn to_position_options(&self) -> serde_json::Value {
        serde_json::json!({
            "enableHighAccuracy": self.high_accuracy,
            "timeout": self.timeout.as_millis() as u64,
            "maximumAge": self.maximum_age.as_millis() as u64,
        })
    }
}

/// A successful position fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Accuracy radius in meters as reported by the device.
    pub accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocateError {
    #[error("geolocation is not available in this browser")]
    Unsupported,

    #[error("permission denied; allow location access in the browser")]
    PermissionDenied,

    #[error("position unavailable; check the device GPS")]
    Unavailable,

    #[error("timed out waiting for a position; try again")]
    Timeout,

    #[error("could not get location: {0}")]
    Other(String),
}

impl LocateError {
    /// Map a `GeolocationPositionError.code`.
    pub fn from_code(code: u16, message: &str) -> Self {
        match code {
            1 => LocateError::PermissionDenied,
            2 => LocateError::Unavailable,
            3 => LocateError::Timeout,
            _ => LocateError::Other(message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_requests_a_fresh_high_accuracy_fix() {
        let options = LocateOptions::default().to_position_options();
        assert_eq!(
            options,
            serde_json::json!({"enableHighAccuracy": true, "timeout": 10000, "maximumAge": 0})
        );
    }

    #[test]
    fn error_codes_map_to_variants() {
        assert_eq!(LocateError::from_code(1, ""), LocateError::PermissionDenied);
        assert_eq!(LocateError::from_code(2, ""), LocateError::Unavailable);
        assert_eq!(LocateError::from_code(3, ""), LocateError::Timeout);
        assert_eq!(
            LocateError::from_code(9, "weird"),
            LocateError::Other("weird".to_string())
        );
    }
}
