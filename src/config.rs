use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::canvas::{CanvasDimensions, MIN_CANVAS_HEIGHT, MIN_CANVAS_WIDTH};
use crate::error::ConfigError;

pub const DEFAULT_RESIZE_REPLAY_DELAY_MS: u64 = 50;
pub const DEFAULT_STORAGE_KEY: &str = "canvas";

/// Editor session settings. Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Time a resize undo waits for the canvas layout to settle before replaying
    pub resize_replay_delay_ms: u64,
    pub min_canvas: CanvasDimensions,
    pub initial_canvas: CanvasDimensions,
    /// How far corner handles sit outside the canvas
    pub anchor_offset: f32,
    /// Key the canvas raster is persisted under
    pub storage_key: String,
    pub line_width: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            resize_replay_delay_ms: DEFAULT_RESIZE_REPLAY_DELAY_MS,
            min_canvas: CanvasDimensions::new(MIN_CANVAS_WIDTH, MIN_CANVAS_HEIGHT),
            initial_canvas: CanvasDimensions::new(800, 600),
            anchor_offset: 0.0,
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            line_width: 1.0,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_canvas.is_empty() {
            return Err(ConfigError::ZeroMinimum {
                width: self.min_canvas.width,
                height: self.min_canvas.height,
            });
        }
        if !self.anchor_offset.is_finite() || self.anchor_offset < 0.0 {
            return Err(ConfigError::InvalidAnchorOffset(self.anchor_offset));
        }
        if self.storage_key.is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(())
    }

    pub fn resize_replay_delay(&self) -> Duration {
        Duration::from_millis(self.resize_replay_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json(r#"{ "resize_replay_delay_ms": 120 }"#).unwrap();
        assert_eq!(config.resize_replay_delay(), Duration::from_millis(120));
        assert_eq!(config.min_canvas, CanvasDimensions::new(250, 250));
        assert_eq!(config.storage_key, "canvas");
    }

    #[test]
    fn test_rejects_zero_minimum() {
        let err = EditorConfig::from_json(r#"{ "min_canvas": { "width": 0, "height": 10 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroMinimum { width: 0, height: 10 }));
    }

    #[test]
    fn test_rejects_negative_offset_and_bad_json() {
        assert!(matches!(
            EditorConfig::from_json(r#"{ "anchor_offset": -2.0 }"#),
            Err(ConfigError::InvalidAnchorOffset(_))
        ));
        assert!(matches!(EditorConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }
}
