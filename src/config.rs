// In: src/config.rs

//! The single source of truth for all CPS configuration.
//!
//! `CpsConfig` is created once at the application boundary (a JSON file, a
//! Python keyword argument) and shared read-only as an `Arc<CpsConfig>` with the
//! frame pipeline. The codec itself only ever sees the validated `BitWidth`.

use serde::{Deserialize, Serialize};

use crate::codec::Codec;
use crate::error::CpsError;
use crate::types::BitWidth;

//==================================================================================
// I. The Unified CpsConfig
//==================================================================================

/// The unified configuration for encoding, decoding and the frame pipeline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct CpsConfig {
    /// Low bits of each channel dedicated to the label (`n`).
    ///
    /// Kept signed so that a non-positive width in a config file is reported as a
    /// configuration error by `codec()` instead of a generic parse failure.
    #[serde(default = "default_bit_width")]
    pub bit_width: i64,

    /// If true, every frame pushed through the `FrameEncoder` is decoded again
    /// from a simulated point cloud and compared with its labels.
    #[serde(default = "default_true")]
    pub verify_round_trip: bool,

    /// Seed for the random label source. `None` draws from OS entropy.
    #[serde(default)]
    pub label_seed: Option<u64>,
}

impl Default for CpsConfig {
    fn default() -> Self {
        Self {
            bit_width: default_bit_width(),
            verify_round_trip: true,
            label_seed: None,
        }
    }
}

impl CpsConfig {
    /// Parses a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, CpsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, CpsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The validated bit width.
    pub fn validated_bit_width(&self) -> Result<BitWidth, CpsError> {
        BitWidth::new(self.bit_width)
    }

    /// Builds the codec described by this configuration.
    pub fn codec(&self) -> Result<Codec, CpsError> {
        Ok(Codec::with_bit_width(self.validated_bit_width()?))
    }
}

/// Two bits per channel: 64 classes with barely visible color shifts.
fn default_bit_width() -> i64 {
    2
}

/// Helper for `serde` to default a boolean field to true.
fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = CpsConfig::from_json_str("{}").unwrap();
        assert_eq!(config, CpsConfig::default());
        assert_eq!(config.codec().unwrap().class_bits(), 6);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = CpsConfig {
            bit_width: 1,
            verify_round_trip: false,
            label_seed: Some(42),
        };
        let json = config.to_json_string().unwrap();
        assert!(json.contains("\"bit_width\": 1"));
        assert_eq!(CpsConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_non_positive_width_is_configuration_error() {
        let config = CpsConfig::from_json_str(r#"{ "bit_width": -2 }"#).unwrap();
        assert!(matches!(config.codec(), Err(CpsError::Configuration(_))));
    }

    #[test]
    fn test_malformed_json_is_serde_error() {
        let result = CpsConfig::from_json_str(r#"{ "bit_width": "two" }"#);
        assert!(matches!(result, Err(CpsError::SerdeJson(_))));
    }
}
