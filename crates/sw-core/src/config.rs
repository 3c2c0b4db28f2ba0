//! Carousel configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CarouselError, Result};

/// Options recognised at construction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CarouselConfig {
    /// Index shown first; wrapped into range when the carousel is built
    pub start_slide: isize,

    /// Wrap-around navigation between the last and first slide
    pub continuous: bool,

    /// Default transition duration in milliseconds
    pub speed_ms: u32,

    /// Swipe commit thresholds
    pub gesture: GestureThresholds,

    /// Deferred work windows
    pub timing: TimingConfig,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            start_slide: 0,
            continuous: true,
            speed_ms: 300,
            gesture: GestureThresholds::default(),
            timing: TimingConfig::default(),
        }
    }
}

/// Criteria deciding whether a finished drag changes the slide
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GestureThresholds {
    /// A flick shorter than this may commit on a small distance
    pub swipe_duration_ms: u64,

    /// Minimum horizontal travel for a short flick
    pub swipe_min_distance_px: f32,

    /// Fraction of the viewport width that commits regardless of duration
    pub commit_fraction: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            swipe_duration_ms: 250,
            swipe_min_distance_px: 20.0,
            commit_fraction: 0.5,
        }
    }
}

/// Delays used by the carousel timer slots
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    /// Settle window before a resize triggers a relayout
    pub resize_settle_ms: u64,

    /// Delay before a navigation call blocked by a pending reset is re-issued
    pub retry_delay_ms: u64,

    /// Delay between a committed change and the "slide changed" notification
    pub notify_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            resize_settle_ms: 100,
            retry_delay_ms: 10,
            notify_delay_ms: 10,
        }
    }
}

impl CarouselConfig {
    /// Parse a configuration from JSON, filling in defaults for missing keys
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Reject thresholds that would make every or no gesture commit
    pub fn validate(&self) -> Result<()> {
        let gesture = &self.gesture;
        if !(gesture.commit_fraction > 0.0 && gesture.commit_fraction <= 1.0) {
            return Err(CarouselError::InvalidConfig(format!(
                "commit_fraction must be in (0, 1], got {}",
                gesture.commit_fraction
            )));
        }
        if !(gesture.swipe_min_distance_px >= 0.0) {
            return Err(CarouselError::InvalidConfig(format!(
                "swipe_min_distance_px must be non-negative, got {}",
                gesture.swipe_min_distance_px
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CarouselConfig::default();
        assert_eq!(config.start_slide, 0);
        assert!(config.continuous);
        assert_eq!(config.speed_ms, 300);
        assert_eq!(config.gesture.swipe_duration_ms, 250);
        assert_eq!(config.timing.resize_settle_ms, 100);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            CarouselConfig::from_json_str(r#"{ "continuous": false, "speed_ms": 500 }"#).unwrap();
        assert!(!config.continuous);
        assert_eq!(config.speed_ms, 500);
        assert_eq!(config.start_slide, 0);
        assert_eq!(config.gesture, GestureThresholds::default());
    }

    #[test]
    fn test_invalid_commit_fraction_rejected() {
        let result = CarouselConfig::from_json_str(r#"{ "gesture": { "commit_fraction": 0.0 } }"#);
        assert!(matches!(result, Err(CarouselError::InvalidConfig(_))));
    }

    #[test]
    fn test_negative_min_distance_rejected() {
        let result = CarouselConfig::from_json_str(
            r#"{ "gesture": { "swipe_min_distance_px": -1.0 } }"#,
        );
        assert!(matches!(result, Err(CarouselError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_json() {
        let result = CarouselConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(CarouselError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = CarouselConfig::from_path("/definitely/not/here/carousel.json");
        assert!(matches!(result, Err(CarouselError::Io(_))));
    }
}
