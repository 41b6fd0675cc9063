//! Shared output helpers for commands that produce an image.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use glyphgate::EncodedImage;
use serde::Serialize;

/// Machine-readable summary of a rendered image.
#[derive(Debug, Serialize)]
pub struct ImageOutput {
    /// The plaintext answer, when the command generated one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Rotation in degrees.
    pub angle: f64,
    pub width: u32,
    pub height: u32,
    /// File size in bytes.
    pub size: usize,
    /// BLAKE3 hash of the BMP file.
    pub hash: String,
    pub content_type: &'static str,
    /// Where the image was written, `-` for stdout.
    pub output: String,
}

impl ImageOutput {
    pub fn new(image: &EncodedImage, answer: Option<String>, angle: f64, output: &str) -> Self {
        Self {
            answer,
            angle,
            width: image.width(),
            height: image.height(),
            size: image.len(),
            hash: image.hash(),
            content_type: EncodedImage::CONTENT_TYPE,
            output: output.to_string(),
        }
    }
}

/// Write the image to `output`, or to stdout when it is `-`.
pub fn write_image(image: &EncodedImage, output: &str) -> Result<()> {
    if output == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(image.bytes())
            .context("failed to write image to stdout")?;
        stdout.flush()?;
    } else {
        let path = Path::new(output);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(path, image.bytes())
            .with_context(|| format!("failed to write image: {}", path.display()))?;
    }
    log::info!("wrote {} bytes to {output}", image.len());
    Ok(())
}
