//! Challenge rendering configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest accepted rotation magnitude in degrees.
pub const MAX_ROTATION_DEGREES: u32 = 45;
/// Largest accepted scale factor.
pub const MAX_SCALE: f64 = 16.0;
/// Largest accepted gap between glyphs, in source pixels.
pub const MAX_SPACING: u32 = 64;
/// Longest accepted challenge.
pub const MAX_CHALLENGE_LENGTH: usize = 32;

/// Validation failures for [`CaptchaConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("scale must be a positive finite number, got {0}")]
    InvalidScale(f64),

    #[error("scale {0} exceeds the limit of 16")]
    ScaleTooLarge(f64),

    #[error("noise_percent must be within 0-100, got {0}")]
    NoiseOutOfRange(u8),

    #[error("challenge_length must be at least 1")]
    ZeroLength,

    #[error("challenge_length {0} exceeds the limit of 32")]
    LengthTooLarge(usize),

    #[error("spacing {0} exceeds the limit of 64")]
    SpacingTooLarge(u32),

    #[error("rotation range is empty: min {min} > max {max}")]
    EmptyRotationRange { min: u32, max: u32 },

    #[error("rotation of {0} degrees exceeds the 45 degree limit")]
    RotationTooLarge(u32),
}

/// Rendering parameters. Every field has a default, and unknown fields are
/// rejected when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaptchaConfig {
    /// Add salt noise after scaling.
    #[serde(default = "default_distort")]
    pub distort: bool,

    /// Uniform scale factor applied on both axes.
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Share of pixels forced to ink when distorting (0-100).
    #[serde(default = "default_noise_percent")]
    pub noise_percent: u8,

    /// Number of characters in a generated challenge.
    #[serde(default = "default_challenge_length")]
    pub challenge_length: usize,

    /// Smallest rotation magnitude in whole degrees.
    #[serde(default = "default_rotation_min")]
    pub rotation_min_degrees: u32,

    /// Largest rotation magnitude in whole degrees.
    #[serde(default = "default_rotation_max")]
    pub rotation_max_degrees: u32,

    /// Background columns after each glyph.
    #[serde(default = "default_spacing")]
    pub spacing: u32,
}

fn default_distort() -> bool {
    true
}

fn default_scale() -> f64 {
    2.3
}

fn default_noise_percent() -> u8 {
    crate::noise::DEFAULT_NOISE_PERCENT
}

fn default_challenge_length() -> usize {
    4
}

fn default_rotation_min() -> u32 {
    2
}

fn default_rotation_max() -> u32 {
    4
}

fn default_spacing() -> u32 {
    crate::raster::DEFAULT_SPACING
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            distort: default_distort(),
            scale: default_scale(),
            noise_percent: default_noise_percent(),
            challenge_length: default_challenge_length(),
            rotation_min_degrees: default_rotation_min(),
            rotation_max_degrees: default_rotation_max(),
            spacing: default_spacing(),
        }
    }
}

impl CaptchaConfig {
    /// Sets whether noise is applied.
    pub fn with_distort(mut self, distort: bool) -> Self {
        self.distort = distort;
        self
    }

    /// Sets the scale factor.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the noise percentage.
    pub fn with_noise_percent(mut self, noise_percent: u8) -> Self {
        self.noise_percent = noise_percent;
        self
    }

    /// Sets the challenge length.
    pub fn with_challenge_length(mut self, length: usize) -> Self {
        self.challenge_length = length;
        self
    }

    /// Sets the gap after each glyph.
    pub fn with_spacing(mut self, spacing: u32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the rotation magnitude range.
    pub fn with_rotation_range(mut self, min: u32, max: u32) -> Self {
        self.rotation_min_degrees = min;
        self.rotation_max_degrees = max;
        self
    }

    /// Check every field against its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        if self.scale > MAX_SCALE {
            return Err(ConfigError::ScaleTooLarge(self.scale));
        }
        if self.noise_percent > 100 {
            return Err(ConfigError::NoiseOutOfRange(self.noise_percent));
        }
        if self.challenge_length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        if self.challenge_length > MAX_CHALLENGE_LENGTH {
            return Err(ConfigError::LengthTooLarge(self.challenge_length));
        }
        if self.spacing > MAX_SPACING {
            return Err(ConfigError::SpacingTooLarge(self.spacing));
        }
        if self.rotation_min_degrees > self.rotation_max_degrees {
            return Err(ConfigError::EmptyRotationRange {
                min: self.rotation_min_degrees,
                max: self.rotation_max_degrees,
            });
        }
        if self.rotation_max_degrees > MAX_ROTATION_DEGREES {
            return Err(ConfigError::RotationTooLarge(self.rotation_max_degrees));
        }
        Ok(())
    }
}
