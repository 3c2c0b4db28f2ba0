//! Demo mode for the carousel
//! Builds a few coloured slides and the config wrapper the app loads

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sw_core::CarouselConfig;
use sw_ui::SlideContent;

/// Everything the demo reads from its optional JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub carousel: CarouselConfig,

    #[serde(default = "demo_slides")]
    pub slides: Vec<SlideContent>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            carousel: CarouselConfig::default(),
            slides: demo_slides(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or fall back to the built-in demo
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        Self::from_json_str(&contents).with_context(|| format!("Invalid config {:?}", path))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.carousel.validate()?;
        anyhow::ensure!(!config.slides.is_empty(), "config lists no slides");
        Ok(config)
    }
}

/// The built-in slide set
pub fn demo_slides() -> Vec<SlideContent> {
    [
        ("Welcome", "Swipe left or right", [92, 140, 97]),
        ("Continuous", "The last slide wraps to the first", [100, 150, 250]),
        ("Resistance", "Linear mode damps drags past the ends", [194, 120, 80]),
        ("Flick", "Short quick swipes commit too", [160, 90, 170]),
    ]
    .into_iter()
    .map(|(title, body, color)| SlideContent {
        title: title.to_string(),
        body: body.to_string(),
        color,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_demo_slides() {
        let config = AppConfig::default();
        assert_eq!(config.slides.len(), 4);
        assert!(config.carousel.continuous);
    }

    #[test]
    fn test_partial_config() {
        let config = AppConfig::from_json_str(
            r#"{
                "carousel": { "continuous": false, "start_slide": 1 },
                "slides": [ { "title": "Only", "color": [1, 2, 3] } ]
            }"#,
        )
        .unwrap();
        assert!(!config.carousel.continuous);
        assert_eq!(config.carousel.start_slide, 1);
        assert_eq!(config.slides.len(), 1);
        assert_eq!(config.slides[0].body, "");
    }

    #[test]
    fn test_empty_slide_list_rejected() {
        assert!(AppConfig::from_json_str(r#"{ "slides": [] }"#).is_err());
    }

    #[test]
    fn test_missing_keys_use_demo() {
        let config = AppConfig::from_json_str("{}").unwrap();
        assert_eq!(config.slides, demo_slides());
    }
}
