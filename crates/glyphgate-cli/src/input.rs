//! Config loading and command-line overrides.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use glyphgate::CaptchaConfig;

/// Rendering overrides shared by `generate` and `render`.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// Path to a JSON config file (fields not given keep their defaults)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Disable salt noise
    #[arg(long)]
    pub no_distort: bool,

    /// Scale factor applied to both axes
    #[arg(long)]
    pub scale: Option<f64>,

    /// Percentage of pixels turned to ink by the noise step (0-100)
    #[arg(long)]
    pub noise: Option<u8>,

    /// Number of characters in a generated challenge
    #[arg(long)]
    pub length: Option<usize>,

    /// Background columns between glyphs
    #[arg(long)]
    pub spacing: Option<u32>,
}

impl ConfigOverrides {
    /// Load the config file (if any), then apply command-line overrides.
    pub fn resolve(&self) -> Result<CaptchaConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(Path::new(path))?,
            None => CaptchaConfig::default(),
        };

        if self.no_distort {
            config.distort = false;
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if let Some(noise) = self.noise {
            config.noise_percent = noise;
        }
        if let Some(length) = self.length {
            config.challenge_length = length;
        }
        if let Some(spacing) = self.spacing {
            config.spacing = spacing;
        }

        config.validate().context("invalid rendering config")?;
        Ok(config)
    }
}

/// Read a JSON config file.
pub fn load_config(path: &Path) -> Result<CaptchaConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: CaptchaConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = ConfigOverrides::default().resolve().unwrap();
        assert_eq!(config, CaptchaConfig::default());
    }

    #[test]
    fn test_file_then_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"scale": 4.0, "noise_percent": 20}}"#).unwrap();

        let overrides = ConfigOverrides {
            config: Some(file.path().to_string_lossy().into_owned()),
            noise: Some(10),
            no_distort: true,
            ..Default::default()
        };
        let config = overrides.resolve().unwrap();
        assert_eq!(config.scale, 4.0);
        assert_eq!(config.noise_percent, 10);
        assert!(!config.distort);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let overrides = ConfigOverrides {
            length: Some(0),
            ..Default::default()
        };
        assert!(overrides.resolve().is_err());
    }

    #[test]
    fn test_oversized_overrides_rejected() {
        let spacing = ConfigOverrides {
            spacing: Some(u32::MAX),
            ..Default::default()
        };
        let err = spacing.resolve().unwrap_err();
        assert!(format!("{err:#}").contains("spacing 4294967295 exceeds the limit of 64"));

        let scale = ConfigOverrides {
            scale: Some(1e9),
            ..Default::default()
        };
        assert!(scale.resolve().is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/glyphgate.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/glyphgate.json"));
    }
}
