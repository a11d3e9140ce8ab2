//! Device timing constants and session configuration.
//!
//! Everything device-dependent is carried explicitly so tests can inject
//! deterministic values. Both structs load from TOML:
//!
//! ```toml
//! anchor = "Center"
//!
//! [viewport]
//! width = 720
//! height = 1280
//!
//! [timing]
//! tap_settle_ms = 40
//! long_press_hold_ms = 1200
//! ```

use crate::error::ConfigError;
use crate::geometry::Viewport;
use crate::resolver::Anchor;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Timing and step-size constants used to expand gestures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay between the Down and Up of a tap (in milliseconds).
    pub tap_settle_ms: u64,
    /// Gap between the two taps of a double tap (in milliseconds).
    pub double_tap_gap_ms: u64,
    /// Hold time after which the device reports a long press.
    pub long_press_threshold_ms: u64,
    /// How long a long press holds the pointer down.
    pub long_press_hold_ms: u64,
    /// Largest per-axis movement of one scroll step (in pixels).
    pub max_step_px: u32,
    /// Delay between consecutive scroll steps.
    pub scroll_step_ms: u64,
    /// Duration budget of a velocity flick.
    pub flick_duration_ms: u64,
    /// Share of a flick's displacement carried by its final two steps.
    pub flick_release_fraction: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tap_settle_ms: 40,
            double_tap_gap_ms: 100,
            long_press_threshold_ms: 500,
            long_press_hold_ms: 1000,
            max_step_px: 10,
            scroll_step_ms: 10,
            flick_duration_ms: 300,
            flick_release_fraction: 0.7,
        }
    }
}

impl TimingConfig {
    /// Settle delay as a duration.
    #[must_use]
    pub const fn settle(&self) -> Duration {
        Duration::from_millis(self.tap_settle_ms)
    }

    /// Inter-tap gap as a duration.
    #[must_use]
    pub const fn double_tap_gap(&self) -> Duration {
        Duration::from_millis(self.double_tap_gap_ms)
    }

    /// Long-press threshold as a duration.
    #[must_use]
    pub const fn long_press_threshold(&self) -> Duration {
        Duration::from_millis(self.long_press_threshold_ms)
    }

    /// Long-press hold as a duration.
    #[must_use]
    pub const fn long_press_hold(&self) -> Duration {
        Duration::from_millis(self.long_press_hold_ms)
    }

    /// Scroll step delay as a duration.
    #[must_use]
    pub const fn scroll_step(&self) -> Duration {
        Duration::from_millis(self.scroll_step_ms)
    }

    /// Flick budget as a duration.
    #[must_use]
    pub const fn flick_duration(&self) -> Duration {
        Duration::from_millis(self.flick_duration_ms)
    }

    /// Check that taps stay below the long-press threshold and that the
    /// interpolation parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tap_settle_ms >= self.long_press_threshold_ms {
            return Err(ConfigError::Invalid(format!(
                "tap_settle_ms ({}) must be below long_press_threshold_ms ({})",
                self.tap_settle_ms, self.long_press_threshold_ms
            )));
        }
        if self.double_tap_gap_ms >= self.long_press_threshold_ms {
            return Err(ConfigError::Invalid(format!(
                "double_tap_gap_ms ({}) must be below long_press_threshold_ms ({})",
                self.double_tap_gap_ms, self.long_press_threshold_ms
            )));
        }
        if self.long_press_hold_ms <= self.long_press_threshold_ms {
            return Err(ConfigError::Invalid(format!(
                "long_press_hold_ms ({}) must exceed long_press_threshold_ms ({})",
                self.long_press_hold_ms, self.long_press_threshold_ms
            )));
        }
        if self.max_step_px == 0 {
            return Err(ConfigError::Invalid(
                "max_step_px must be positive".to_string(),
            ));
        }
        if !(self.flick_release_fraction > 0.0 && self.flick_release_fraction < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "flick_release_fraction ({}) must be within (0, 1)",
                self.flick_release_fraction
            )));
        }
        Ok(())
    }
}

/// Per-session configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchConfig {
    /// Device surface extents.
    pub viewport: Viewport,
    /// How element bounds map to a touch point.
    pub anchor: Anchor,
    /// Gesture timing constants.
    pub timing: TimingConfig,
}

impl TouchConfig {
    /// Default config file name.
    pub const CONFIG_FILE: &'static str = "tactus.toml";

    /// Create a config for a viewport with default timing.
    #[must_use]
    pub fn for_viewport(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Replace the timing constants.
    #[must_use]
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Replace the anchor policy.
    #[must_use]
    pub const fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Validate the viewport and the timing constants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an empty viewport or bad timing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "viewport {} has no area",
                self.viewport
            )));
        }
        self.timing.validate()
    }

    /// Parse and validate a config from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if TOML is invalid or values are out of range.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to a TOML string.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Load a config from a file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Load [`Self::CONFIG_FILE`] from `dir`, or the defaults when the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(Self::CONFIG_FILE);
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_defaults() {
        let t = TimingConfig::default();
        assert_eq!(t.tap_settle_ms, 40);
        assert_eq!(t.double_tap_gap_ms, 100);
        assert_eq!(t.long_press_threshold_ms, 500);
        assert_eq!(t.long_press_hold_ms, 1000);
        assert_eq!(t.max_step_px, 10);
        assert_eq!(t.flick_duration_ms, 300);
        assert!((t.flick_release_fraction - 0.7).abs() < 0.001);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_timing_durations() {
        let t = TimingConfig::default();
        assert_eq!(t.settle(), Duration::from_millis(40));
        assert_eq!(t.double_tap_gap(), Duration::from_millis(100));
        assert_eq!(t.long_press_hold(), Duration::from_millis(1000));
        assert_eq!(t.scroll_step(), Duration::from_millis(10));
        assert_eq!(t.flick_duration(), Duration::from_millis(300));
    }

    #[test]
    fn test_validate_settle_below_threshold() {
        let t = TimingConfig {
            tap_settle_ms: 600,
            ..TimingConfig::default()
        };
        let err = t.validate().unwrap_err();
        assert!(err.to_string().contains("tap_settle_ms"));
    }

    #[test]
    fn test_validate_gap_below_threshold() {
        let t = TimingConfig {
            double_tap_gap_ms: 500,
            ..TimingConfig::default()
        };
        assert!(t.validate().unwrap_err().to_string().contains("double_tap_gap_ms"));
    }

    #[test]
    fn test_validate_hold_exceeds_threshold() {
        let t = TimingConfig {
            long_press_hold_ms: 500,
            ..TimingConfig::default()
        };
        assert!(t.validate().unwrap_err().to_string().contains("long_press_hold_ms"));
    }

    #[test]
    fn test_validate_step_and_fraction() {
        let t = TimingConfig {
            max_step_px: 0,
            ..TimingConfig::default()
        };
        assert!(t.validate().is_err());

        let t = TimingConfig {
            flick_release_fraction: 1.0,
            ..TimingConfig::default()
        };
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_touch_config_validate_viewport() {
        let config = TouchConfig::for_viewport(Viewport::new(0, 100));
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert!(TouchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = TouchConfig::from_toml(
            r#"
anchor = "TopLeft"

[viewport]
width = 720
height = 1280

[timing]
long_press_hold_ms = 1500
"#,
        )
        .unwrap();
        assert_eq!(config.viewport, Viewport::new(720, 1280));
        assert_eq!(config.anchor, Anchor::TopLeft);
        assert_eq!(config.timing.long_press_hold_ms, 1500);
        assert_eq!(config.timing.tap_settle_ms, 40);
    }

    #[test]
    fn test_from_toml_rejects_invalid_timing() {
        let result = TouchConfig::from_toml("[timing]\nmax_step_px = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_from_toml_parse_error() {
        let result = TouchConfig::from_toml("viewport = 3");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = TouchConfig::for_viewport(Viewport::new(800, 600)).with_anchor(Anchor::TopLeft);
        let parsed = TouchConfig::from_toml(&config.to_toml()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_missing_file() {
        let result = TouchConfig::load_from_file(Path::new("/nonexistent/tactus.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_from_dir() {
        let missing = TouchConfig::load_from_dir(Path::new("/nonexistent")).unwrap();
        assert_eq!(missing, TouchConfig::default());

        let dir = std::env::temp_dir().join(format!("tactus-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let config = TouchConfig::for_viewport(Viewport::new(720, 1280));
        std::fs::write(dir.join(TouchConfig::CONFIG_FILE), config.to_toml()).unwrap();
        let loaded = TouchConfig::load_from_dir(&dir).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();
        assert_eq!(loaded, config);
    }
}
