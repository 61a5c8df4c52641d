use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::zoom::ZoomDensity;

/// Keyboard modifier that turns the wheel over the waveform into zoom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomModifier {
    #[default]
    Ctrl,
    Alt,
    Shift,
    Meta,
}

/// User-tunable player settings. Every field has a default so partial JSON
/// documents are accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub wave_color: String,
    pub progress_color: String,
    pub cursor_color: String,
    /// Waveform height in CSS pixels.
    pub height: u32,
    pub initial_zoom: ZoomDensity,
    /// Multiplicative zoom step for one wheel notch or one +/- click.
    pub zoom_step: f64,
    pub seek_step_secs: f64,
    /// Seek step used while Shift is held.
    pub seek_step_large_secs: f64,
    pub wheel_modifier: ZoomModifier,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            wave_color: "#4f9d69".into(),
            progress_color: "#2a5d3b".into(),
            cursor_color: "#e05050".into(),
            height: 128,
            initial_zoom: ZoomDensity::default(),
            zoom_step: 1.05,
            seek_step_secs: 1.0,
            seek_step_large_secs: 5.0,
            wheel_modifier: ZoomModifier::Ctrl,
            log_level: "info".into(),
        }
    }
}

impl PlayerConfig {
    /// Parse a JSON document and sanitize out-of-range values.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: PlayerConfig = serde_json::from_str(text)?;
        Ok(cfg.sanitized())
    }

    /// Replace values that would break the transport with defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = PlayerConfig::default();
        if self.height == 0 {
            log::warn!("config: height must be positive, using {}", defaults.height);
            self.height = defaults.height;
        }
        if !self.zoom_step.is_finite() || self.zoom_step <= 1.0 {
            log::warn!("config: zoom_step must be > 1, using {}", defaults.zoom_step);
            self.zoom_step = defaults.zoom_step;
        }
        if !self.seek_step_secs.is_finite() || self.seek_step_secs <= 0.0 {
            log::warn!("config: seek_step_secs must be > 0, using {}", defaults.seek_step_secs);
            self.seek_step_secs = defaults.seek_step_secs;
        }
        if !self.seek_step_large_secs.is_finite() || self.seek_step_large_secs <= 0.0 {
            log::warn!(
                "config: seek_step_large_secs must be > 0, using {}",
                defaults.seek_step_large_secs
            );
            self.seek_step_large_secs = defaults.seek_step_large_secs;
        }
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            log::warn!("config: unknown log_level {:?}, using info", self.log_level);
            self.log_level = defaults.log_level;
        }
        self
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    /// Engine construction options for a new instance at `zoom`.
    pub fn engine_options(&self, zoom: ZoomDensity) -> EngineOptions {
        EngineOptions {
            wave_color: self.wave_color.clone(),
            progress_color: self.progress_color.clone(),
            cursor_color: self.cursor_color.clone(),
            height: self.height,
            min_px_per_sec: zoom.px_per_sec(),
            fill_parent: true,
            auto_center: true,
        }
    }
}

/// Options passed to the rendering engine constructor. Field names match
/// the engine's JS option object once serialized.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOptions {
    pub wave_color: String,
    pub progress_color: String,
    pub cursor_color: String,
    pub height: u32,
    pub min_px_per_sec: f64,
    pub fill_parent: bool,
    pub auto_center: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = PlayerConfig::from_json(r#"{ "height": 200, "wheel_modifier": "meta" }"#).unwrap();
        assert_eq!(cfg.height, 200);
        assert_eq!(cfg.wheel_modifier, ZoomModifier::Meta);
        assert_eq!(cfg.zoom_step, 1.05);
        assert_eq!(cfg.seek_step_large_secs, 5.0);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(PlayerConfig::from_json("{ height: }").is_err());
        assert!(PlayerConfig::from_json(r#"{ "wheel_modifier": "hyper" }"#).is_err());
    }

    #[test]
    fn test_sanitize_bad_values() {
        let cfg = PlayerConfig::from_json(
            r#"{ "height": 0, "zoom_step": 0.5, "seek_step_secs": -1, "initial_zoom": 2, "log_level": "loud" }"#,
        )
        .unwrap();
        let d = PlayerConfig::default();
        assert_eq!(cfg.height, d.height);
        assert_eq!(cfg.zoom_step, d.zoom_step);
        assert_eq!(cfg.seek_step_secs, d.seek_step_secs);
        assert_eq!(cfg.initial_zoom.px_per_sec(), 10.0);
        assert_eq!(cfg.log_level(), log::LevelFilter::Info);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn test_log_level_off_and_case() {
        let cfg = PlayerConfig::from_json(r#"{ "log_level": "off" }"#).unwrap();
        assert_eq!(cfg.log_level(), log::LevelFilter::Off);
        let cfg = PlayerConfig::from_json(r#"{ "log_level": "DEBUG" }"#).unwrap();
        assert_eq!(cfg.log_level(), log::LevelFilter::Debug);
        assert_eq!(PlayerConfig::default().log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn test_engine_options_json_names() {
        let opts = PlayerConfig::default().engine_options(ZoomDensity::new(120.0));
        let v = serde_json::to_value(&opts).unwrap();
        assert_eq!(v["minPxPerSec"], 120.0);
        assert_eq!(v["fillParent"], true);
        assert_eq!(v["waveColor"], "#4f9d69");
        assert_eq!(v["height"], 128);
    }
}
