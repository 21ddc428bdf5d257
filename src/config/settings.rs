//! Tracker/application settings loaded from YAML.
//!
//! Unlike color-profile resolution, this loader is permissive: an unknown
//! profile name falls back to the `default` entry and a missing file falls
//! back to built-in defaults, each with a warning. Color profiles are resolved
//! strictly elsewhere; the lenience stops here.

use std::collections::BTreeMap;
use std::path::Path;

use image::Rgb;
use serde::Deserialize;
use tracing::warn;

use crate::config::profile::ConfigError;
use crate::detect::DetectorConfig;
use crate::render::RenderStyle;
use crate::tracker::TrackerConfig;

/// Resolved per-run application settings.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Name of the color profile to resolve against a [`crate::ProfileLibrary`].
    pub profile_name: String,
    pub detector: DetectorConfig,
    pub tracker: TrackerConfig,
    pub style: RenderStyle,
}

impl AppConfig {
    /// Load settings for `profile` from a YAML file.
    ///
    /// A missing file yields built-in defaults with a warning; a present but
    /// malformed file is an error.
    pub fn load(path: impl AsRef<Path>, profile: &str) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(path = %path.display(), "settings file not found, using built-in defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text, profile)
    }

    /// Parse settings for `profile` from YAML text.
    pub fn from_yaml_str(yaml: &str, profile: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_yaml::from_str(yaml)?;
        let entry = raw.profiles.get(profile).or_else(|| {
            warn!(profile, "settings profile not found, falling back to 'default'");
            raw.profiles.get("default")
        });
        match entry {
            Some(run) => Ok(run.resolve()),
            None => {
                warn!("no 'default' settings profile either, using built-in defaults");
                Ok(Self::default())
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    profiles: BTreeMap<String, RawRunProfile>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRunProfile {
    #[serde(default)]
    detector: RawDetector,
    #[serde(default)]
    tracking: RawTracking,
}

impl RawRunProfile {
    fn resolve(&self) -> AppConfig {
        let t = &self.tracking;
        AppConfig {
            profile_name: self.detector.profile.clone(),
            detector: DetectorConfig {
                min_radius: self.detector.radius,
            },
            tracker: TrackerConfig {
                buffer_size: t.buffer_size,
                max_distance: t.max_distance,
                min_area: t.min_area,
                ..TrackerConfig::default()
            },
            style: RenderStyle {
                circle_color: Rgb(t.circle_outline_color),
                circle_thickness: t.circle_thickness,
                radius_line_color: Rgb(t.radius_line_color),
                radius_line_thickness: t.radius_line_thickness,
                center_color: Rgb(t.center_point_color),
                center_radius: t.center_point_radius,
                label_color: Rgb(t.font_color),
                font_scale: t.font_scale,
                trail_color: Rgb(t.tracking_line_color),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawDetector {
    profile: String,
    radius: f32,
}

impl Default for RawDetector {
    fn default() -> Self {
        let d = DetectorConfig::default();
        Self {
            profile: "default".to_string(),
            radius: d.min_radius,
        }
    }
}

/// Raw `tracking:` section. Colors are RGB triples; the section accepts and
/// ignores keys it does not know.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawTracking {
    buffer_size: usize,
    max_distance: f32,
    min_area: f32,
    circle_outline_color: [u8; 3],
    circle_thickness: u32,
    radius_line_color: [u8; 3],
    radius_line_thickness: u32,
    center_point_color: [u8; 3],
    center_point_radius: i32,
    font_color: [u8; 3],
    font_scale: f32,
    tracking_line_color: [u8; 3],
}

impl Default for RawTracking {
    fn default() -> Self {
        let t = TrackerConfig::default();
        let s = RenderStyle::default();
        Self {
            buffer_size: t.buffer_size,
            max_distance: t.max_distance,
            min_area: t.min_area,
            circle_outline_color: s.circle_color.0,
            circle_thickness: s.circle_thickness,
            radius_line_color: s.radius_line_color.0,
            radius_line_thickness: s.radius_line_thickness,
            center_point_color: s.center_color.0,
            center_point_radius: s.center_radius,
            font_color: s.label_color.0,
            font_scale: s.font_scale,
            tracking_line_color: s.trail_color.0,
        }
    }
}
