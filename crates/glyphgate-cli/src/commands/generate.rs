//! Generate command implementation
//!
//! Draws a random challenge, writes the BMP, and reports the answer.

use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use glyphgate::{CaptchaService, Challenge, DeterministicRng, FontAtlas};

use super::output::{write_image, ImageOutput};
use crate::input::ConfigOverrides;

/// Run the generate command
///
/// # Arguments
/// * `output` - Destination path, `-` for stdout
/// * `seed` - Fixed seed for reproducible output; OS-seeded generator when absent
/// * `overrides` - Config file and command-line overrides
/// * `json_output` - Print a JSON summary instead of human-readable text
pub fn run(
    output: &str,
    seed: Option<u32>,
    overrides: &ConfigOverrides,
    json_output: bool,
) -> Result<ExitCode> {
    let challenge = generate(seed, overrides)?;
    write_image(&challenge.image, output)?;

    let summary = ImageOutput::new(
        &challenge.image,
        Some(challenge.answer.clone()),
        f64::from(challenge.angle),
        output,
    );
    if json_output {
        let json = serde_json::to_string_pretty(&summary)?;
        if output == "-" {
            eprintln!("{json}");
        } else {
            println!("{json}");
        }
    } else {
        // Keep stdout clean when the image itself goes there.
        let report = |line: String| {
            if output == "-" {
                eprintln!("{line}");
            } else {
                println!("{line}");
            }
        };
        report(format!("{} {}", "Answer:".cyan().bold(), summary.answer.as_deref().unwrap_or("")));
        report(format!("{} {} degrees", "Angle:".dimmed(), summary.angle));
        report(format!(
            "{} {}x{} ({} bytes)",
            "Image:".dimmed(),
            summary.width,
            summary.height,
            summary.size
        ));
        report(format!("{} {}", "Hash:".dimmed(), summary.hash));
        report(format!("{} {}", "Wrote".green().bold(), output));
    }

    Ok(ExitCode::SUCCESS)
}

/// Build the service and draw one challenge.
pub fn generate(seed: Option<u32>, overrides: &ConfigOverrides) -> Result<Challenge> {
    let config = overrides.resolve()?;
    let atlas = FontAtlas::embedded().context("failed to decode embedded font")?;
    let service = CaptchaService::new(&atlas, config)?;

    let challenge = match seed {
        Some(seed) => {
            log::debug!("using deterministic generator with seed {seed}");
            service.generate(&mut DeterministicRng::new(seed))?
        }
        None => service.generate_random()?,
    };
    Ok(challenge)
}
