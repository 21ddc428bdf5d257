//! Color profiles: named sets of per-label HSV ranges.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors raised by the configuration layer.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file")]
    Io(#[from] std::io::Error),
    #[error("malformed configuration")]
    Yaml(#[from] serde_yaml::Error),
    /// Unknown profile names are fatal here. The tracker-settings loader is
    /// deliberately more lenient; that lenience must not leak into color
    /// resolution.
    #[error("profile '{0}' not found")]
    ProfileNotFound(String),
    #[error("profile '{0}' has no color ranges")]
    EmptyProfile(String),
    #[error("invalid range for color '{label}' in profile '{profile}': {reason}")]
    InvalidRange {
        profile: String,
        label: String,
        reason: String,
    },
}

/// Inclusive HSV bounds for one color label.
///
/// Hue uses the half-degree byte convention (0-179); saturation and value span
/// the full byte range. Bounds are inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ColorRange {
    #[serde(rename = "H_lower")]
    pub h_lower: u8,
    #[serde(rename = "H_upper")]
    pub h_upper: u8,
    #[serde(rename = "S_lower")]
    pub s_lower: u8,
    #[serde(rename = "S_upper")]
    pub s_upper: u8,
    #[serde(rename = "V_lower")]
    pub v_lower: u8,
    #[serde(rename = "V_upper")]
    pub v_upper: u8,
}

impl ColorRange {
    /// Whether an HSV triple falls inside this range, bounds included.
    #[inline]
    pub fn contains(&self, h: u8, s: u8, v: u8) -> bool {
        h >= self.h_lower
            && h <= self.h_upper
            && s >= self.s_lower
            && s <= self.s_upper
            && v >= self.v_lower
            && v <= self.v_upper
    }

    fn validate(&self, profile: &str, label: &str) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidRange {
            profile: profile.to_string(),
            label: label.to_string(),
            reason,
        };
        if self.h_lower > 179 || self.h_upper > 179 {
            return Err(invalid(format!(
                "hue bounds must be in 0-179, got {}-{}",
                self.h_lower, self.h_upper
            )));
        }
        for (name, lower, upper) in [
            ("H", self.h_lower, self.h_upper),
            ("S", self.s_lower, self.s_upper),
            ("V", self.v_lower, self.v_upper),
        ] {
            if lower > upper {
                return Err(invalid(format!("{name}_lower {lower} > {name}_upper {upper}")));
            }
        }
        Ok(())
    }
}

/// A named set of color-label to HSV-range mappings.
///
/// Labels iterate in sorted order, which fixes the order detections are
/// produced in and keeps track association reproducible.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Profile {
    ranges: BTreeMap<String, ColorRange>,
}

impl Profile {
    pub fn insert(&mut self, label: impl Into<String>, range: ColorRange) {
        self.ranges.insert(label.into(), range);
    }

    pub fn get(&self, label: &str) -> Option<&ColorRange> {
        self.ranges.get(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColorRange)> {
        self.ranges.iter().map(|(label, range)| (label.as_str(), range))
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.ranges.is_empty() {
            return Err(ConfigError::EmptyProfile(name.to_string()));
        }
        for (label, range) in &self.ranges {
            range.validate(name, label)?;
        }
        Ok(())
    }
}

/// All color profiles known to a run, keyed by profile name.
///
/// The expected document shape is
///
/// ```yaml
/// profiles:
///   default:
///     red:
///       H_lower: 0
///       H_upper: 10
///       S_lower: 100
///       S_upper: 255
///       V_lower: 100
///       V_upper: 255
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileLibrary {
    #[serde(default)]
    profiles: BTreeMap<String, Profile>,
}

impl ProfileLibrary {
    /// Load and validate a profile library from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Parse and validate a profile library from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let library: Self = serde_yaml::from_str(yaml)?;
        for (name, profile) in &library.profiles {
            profile.validate(name)?;
        }
        Ok(library)
    }

    /// Resolve a profile by name. Unknown names are an error, never a
    /// fallback.
    pub fn resolve(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))
    }

    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}
