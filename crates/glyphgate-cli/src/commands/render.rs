//! Render command implementation
//!
//! Renders caller-supplied text at a fixed angle. Useful for previewing the
//! font and for pinning regression images.

use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use glyphgate::{CaptchaService, DeterministicRng, EncodedImage, FontAtlas};

use super::output::{write_image, ImageOutput};
use crate::input::ConfigOverrides;

/// Run the render command
///
/// # Arguments
/// * `text` - Text to render; every character must be in the font
/// * `angle` - Rotation in degrees
/// * `output` - Destination path, `-` for stdout
/// * `seed` - Seed for the noise step
/// * `overrides` - Config file and command-line overrides
/// * `json_output` - Print a JSON summary instead of human-readable text
pub fn run(
    text: &str,
    angle: f64,
    output: &str,
    seed: u32,
    overrides: &ConfigOverrides,
    json_output: bool,
) -> Result<ExitCode> {
    let image = render(text, angle, seed, overrides)?;
    write_image(&image, output)?;

    let summary = ImageOutput::new(&image, None, angle, output);
    if json_output {
        eprintln!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        eprintln!(
            "{} {:?} at {} degrees -> {}x{} ({})",
            "Rendered".green().bold(),
            text,
            angle,
            summary.width,
            summary.height,
            summary.hash.dimmed()
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// Render `text` with the resolved config.
pub fn render(
    text: &str,
    angle: f64,
    seed: u32,
    overrides: &ConfigOverrides,
) -> Result<EncodedImage> {
    let config = overrides.resolve()?;
    let atlas = FontAtlas::embedded().context("failed to decode embedded font")?;
    let service = CaptchaService::new(&atlas, config)?;
    let image = service
        .render(text, angle, &mut DeterministicRng::new(seed))
        .with_context(|| format!("failed to render {text:?}"))?;
    Ok(image)
}
