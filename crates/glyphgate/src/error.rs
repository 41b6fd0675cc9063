//! Crate-level error type.

use thiserror::Error;

use crate::bmp::BmpError;
use crate::config::ConfigError;
use crate::font::FontError;

/// Any failure of the challenge pipeline. A failed request yields no image
/// and no answer.
#[derive(Debug, Error)]
pub enum CaptchaError {
    #[error("font asset error: {0}")]
    Font(#[from] FontError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("BMP encoding error: {0}")]
    Encode(#[from] BmpError),

    /// A character with no glyph reached the renderer.
    #[error("no glyph for character {0:?}")]
    UnknownCharacter(char),

    #[error("challenge text is empty")]
    EmptyText,

    /// A stage's output would exceed [`MAX_CELLS`](crate::grid::MAX_CELLS)
    /// or overflow its dimensions.
    #[error("{stage} output exceeds the grid size limit")]
    GridTooLarge { stage: &'static str },
}

impl CaptchaError {
    /// Stable error code for logs and machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            CaptchaError::Font(_) => "CAPTCHA_001",
            CaptchaError::Config(_) => "CAPTCHA_002",
            CaptchaError::Encode(_) => "CAPTCHA_003",
            CaptchaError::UnknownCharacter(_) => "CAPTCHA_004",
            CaptchaError::EmptyText => "CAPTCHA_005",
            CaptchaError::GridTooLarge { .. } => "CAPTCHA_006",
        }
    }

    /// Error category.
    pub fn category(&self) -> &'static str {
        match self {
            CaptchaError::Font(_) => "font",
            CaptchaError::Config(_) => "config",
            CaptchaError::Encode(_) => "encode",
            CaptchaError::UnknownCharacter(_) => "invariant",
            CaptchaError::EmptyText => "input",
            CaptchaError::GridTooLarge { .. } => "input",
        }
    }
}
