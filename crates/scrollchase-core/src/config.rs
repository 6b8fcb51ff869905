use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Easing curve applied to each retarget segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// No easing, constant speed
    Linear,
    /// Cosine ease-in-out: (cos(t·π − π) + 1) / 2
    #[default]
    CosineInOut,
    /// Cubic ease-out
    Cubic,
    /// Quintic ease-out
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

/// Scroll controller tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Nominal cycle length; bounds how long a new segment takes to ease in
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Shortest ease-in any segment may have, even past the nominal cycle end
    #[serde(default = "default_min_segment_duration")]
    pub min_segment_duration_ms: u64,
    /// Easing curve
    #[serde(default)]
    pub easing: EasingType,
    /// Hardware pixels per point
    #[serde(default = "default_display_scale")]
    pub display_scale: f64,
    /// Fraction of a hardware pixel under which two offsets are considered equal
    #[serde(default = "default_pixel_fraction")]
    pub pixel_fraction: f64,
    /// Cap on provider re-queries in the non-animated path
    #[serde(default = "default_max_settle_iterations")]
    pub max_settle_iterations: u32,
    /// Report `Superseded` to the previous cycle's completion when restarting
    #[serde(default = "default_true")]
    pub notify_superseded: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            animation_duration_ms: default_animation_duration(),
            min_segment_duration_ms: default_min_segment_duration(),
            easing: EasingType::default(),
            display_scale: default_display_scale(),
            pixel_fraction: default_pixel_fraction(),
            max_settle_iterations: default_max_settle_iterations(),
            notify_superseded: default_true(),
        }
    }
}

impl ScrollConfig {
    #[inline]
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    pub fn min_segment_duration(&self) -> Duration {
        Duration::from_millis(self.min_segment_duration_ms)
    }

    /// Offset equality tolerance in points
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.pixel_fraction / self.display_scale
    }

    /// Check that every value keeps the controller convergent
    pub fn validate(&self) -> crate::Result<()> {
        if !(self.display_scale.is_finite() && self.display_scale > 0.0) {
            return Err(crate::Error::Config(format!(
                "scroll.display_scale must be positive, got {}",
                self.display_scale
            )));
        }
        if !(self.pixel_fraction.is_finite() && self.pixel_fraction > 0.0) {
            return Err(crate::Error::Config(format!(
                "scroll.pixel_fraction must be positive, got {}",
                self.pixel_fraction
            )));
        }
        if self.min_segment_duration_ms == 0 {
            return Err(crate::Error::Config(
                "scroll.min_segment_duration_ms must be greater than zero".to_string(),
            ));
        }
        if self.max_settle_iterations == 0 {
            return Err(crate::Error::Config(
                "scroll.max_settle_iterations must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Simulated display refresh rate
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Frames after which a simulation gives up
    #[serde(default = "default_max_frames")]
    pub max_frames: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            max_frames: default_max_frames(),
        }
    }
}

impl SimulationConfig {
    #[inline]
    pub fn frame_duration(&self) -> Duration {
        if self.fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_secs_f64(1.0 / self.fps as f64)
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_animation_duration() -> u64 {
    300
}

fn default_min_segment_duration() -> u64 {
    125 // one eighth of a second
}

fn default_display_scale() -> f64 {
    1.0
}

fn default_pixel_fraction() -> f64 {
    0.1
}

fn default_max_settle_iterations() -> u32 {
    64
}

fn default_fps() -> u32 {
    60
}

fn default_max_frames() -> u32 {
    600
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from an explicit path
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.scroll.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/scrollchase/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("scrollchase")
            .join("config.toml")
    }
}
