//! dotpath configuration file handling

use anyhow::{Context, Result};
use dotpath_animation::{Easing, LegConfig, TourConfig, DEFAULT_CHECKPOINTS};
use dotpath_core::Point;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// File looked up in the working directory when no `--config` is given
pub const CONFIG_FILE: &str = "dotpath.toml";

/// Top-level configuration (dotpath.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DotpathConfig {
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub stage: StageConfig,
    #[serde(default)]
    pub tour: TourSettings,
}

/// Per-session animation settings
#[derive(Debug, Deserialize, Serialize)]
pub struct AnimationConfig {
    /// Length of one leg in milliseconds
    #[serde(default = "default_duration")]
    pub duration_ms: f64,
    /// Base easing curve name
    #[serde(default)]
    pub easing: Easing,
    /// Milliseconds between frames
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: f64,
}

fn default_duration() -> f64 {
    2000.0
}

fn default_frame_interval() -> f64 {
    16.0
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration(),
            easing: Easing::default(),
            frame_interval_ms: default_frame_interval(),
        }
    }
}

/// Waypoint layout
#[derive(Debug, Deserialize, Serialize)]
pub struct StageConfig {
    /// Offset subtracted from the marker position on both axes
    #[serde(default = "default_inset")]
    pub marker_inset: f64,
    /// Waypoint positions; also the autoplay path
    #[serde(default = "default_checkpoints")]
    pub checkpoints: Vec<Point>,
}

fn default_inset() -> f64 {
    5.0
}

fn default_checkpoints() -> Vec<Point> {
    DEFAULT_CHECKPOINTS.to_vec()
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            marker_inset: default_inset(),
            checkpoints: default_checkpoints(),
        }
    }
}

/// Autoplay timings
#[derive(Debug, Deserialize, Serialize)]
pub struct TourSettings {
    #[serde(default = "default_start_delay")]
    pub start_delay_ms: u64,
    #[serde(default = "default_leg_pause")]
    pub leg_pause_ms: u64,
}

fn default_start_delay() -> u64 {
    1500
}

fn default_leg_pause() -> u64 {
    500
}

impl Default for TourSettings {
    fn default() -> Self {
        Self {
            start_delay_ms: default_start_delay(),
            leg_pause_ms: default_leg_pause(),
        }
    }
}

impl DotpathConfig {
    /// Load from an explicit file, or from `dotpath.toml` in `dir` if present,
    /// falling back to defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load_file(path)?,
            None => {
                let path = dir.join(CONFIG_FILE);
                if path.exists() {
                    Self::load_file(&path)?
                } else {
                    debug!("no {} in {}, using defaults", CONFIG_FILE, dir.display());
                    Self::default()
                }
            }
        };
        if config.stage.checkpoints.is_empty() {
            warn!("stage.checkpoints is empty, using the default path");
            config.stage.checkpoints = default_checkpoints();
        }
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: DotpathConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.leg().validate()?;
        if !(self.animation.frame_interval_ms.is_finite() && self.animation.frame_interval_ms > 0.0)
        {
            anyhow::bail!(
                "frame_interval_ms must be positive, got {}",
                self.animation.frame_interval_ms
            );
        }
        if !self.stage.marker_inset.is_finite() {
            anyhow::bail!(
                "stage.marker_inset must be finite, got {}",
                self.stage.marker_inset
            );
        }
        if let Some((i, point)) = self
            .stage
            .checkpoints
            .iter()
            .enumerate()
            .find(|(_, p)| !(p.x.is_finite() && p.y.is_finite()))
        {
            anyhow::bail!("stage.checkpoints[{i}] must be finite, got {point}");
        }
        Ok(())
    }

    pub fn leg(&self) -> LegConfig {
        LegConfig {
            duration_ms: self.animation.duration_ms,
            easing: self.animation.easing,
            marker_inset: self.stage.marker_inset,
        }
    }

    pub fn tour(&self) -> TourConfig {
        TourConfig {
            leg: self.leg(),
            start_delay_ms: self.tour.start_delay_ms,
            leg_pause_ms: self.tour.leg_pause_ms,
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Write a default config into `dir`, refusing to overwrite
    pub fn init(dir: &Path) -> Result<std::path::PathBuf> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            anyhow::bail!("{} already exists", path.display());
        }
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        fs::write(&path, Self::default().to_toml()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config: DotpathConfig = toml::from_str("").unwrap();
        assert_eq!(config.animation.duration_ms, 2000.0);
        assert_eq!(config.animation.easing, Easing::Bounce);
        assert_eq!(config.stage.marker_inset, 5.0);
        assert_eq!(config.stage.checkpoints.len(), 7);
        assert_eq!(config.tour.start_delay_ms, 1500);
    }

    #[test]
    fn test_partial_file() {
        let config: DotpathConfig = toml::from_str(
            r#"
            [animation]
            duration_ms = 500
            easing = "cubic-bezier(0.25, 0.1, 0.25, 1)"

            [stage]
            checkpoints = [[10, 10], [40, 65], { x = 180, y = 135 }]
            "#,
        )
        .unwrap();

        assert_eq!(config.animation.duration_ms, 500.0);
        assert_eq!(
            config.animation.easing,
            Easing::CubicBezier(0.25, 0.1, 0.25, 1.0)
        );
        assert_eq!(config.animation.frame_interval_ms, 16.0);
        assert_eq!(config.stage.checkpoints[2], Point::new(180.0, 135.0));
    }

    #[test]
    fn test_unknown_easing_fails() {
        let result: std::result::Result<DotpathConfig, _> =
            toml::from_str("[animation]\neasing = \"wobble\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation() {
        let mut config = DotpathConfig::default();
        assert!(config.validate().is_ok());

        config.animation.duration_ms = 0.0;
        assert!(config.validate().is_err());

        config.animation.duration_ms = 100.0;
        config.animation.frame_interval_ms = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_init_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = DotpathConfig::init(dir.path()).unwrap();
        assert!(path.exists());
        assert!(DotpathConfig::init(dir.path()).is_err());

        let config = DotpathConfig::load(None, dir.path()).unwrap();
        assert_eq!(config.stage.checkpoints, DEFAULT_CHECKPOINTS.to_vec());
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(DotpathConfig::load(Some(&missing), dir.path()).is_err());
        // Implicit lookup falls back to defaults
        assert!(DotpathConfig::load(None, dir.path()).is_ok());
    }

    #[test]
    fn test_empty_checkpoints_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[stage]\ncheckpoints = []\n").unwrap();

        let config = DotpathConfig::load(None, dir.path()).unwrap();
        assert_eq!(config.stage.checkpoints, DEFAULT_CHECKPOINTS.to_vec());
    }

    #[test]
    fn test_non_finite_stage_values_rejected() {
        let config: DotpathConfig = toml::from_str("[stage]\nmarker_inset = nan\n").unwrap();
        assert!(config.validate().is_err());

        let config: DotpathConfig =
            toml::from_str("[stage]\ncheckpoints = [[10, 10], [inf, 65]]\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("checkpoints[1]"), "{err}");

        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[stage]\ncheckpoints = [[10, 10], [-inf, 65]]\n",
        )
        .unwrap();
        assert!(DotpathConfig::load(None, dir.path()).is_err());
    }
}
