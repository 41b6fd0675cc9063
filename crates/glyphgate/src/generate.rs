//! Main entry point for challenge generation.
//!
//! [`CaptchaService`] draws a random answer and runs the rendering pipeline:
//! compose, rotate, scale, optionally distort, encode. The answer is handed
//! back to the caller, who is responsible for storing and checking it.

use rand::Rng;

use crate::bmp::{self, BmpError};
use crate::config::CaptchaConfig;
use crate::error::CaptchaError;
use crate::font::{FontAtlas, FontError};
use crate::grid::PixelGrid;
use crate::noise::distort;
use crate::raster::compose;
use crate::transform::{random_angle, rotate, scale};

/// A finished BMP image. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl EncodedImage {
    /// MIME type to serve the bytes with.
    pub const CONTENT_TYPE: &'static str = "image/bmp";

    fn from_grid(grid: &PixelGrid) -> Result<Self, BmpError> {
        Ok(Self {
            bytes: bmp::encode(grid)?,
            width: grid.width(),
            height: grid.height(),
        })
    }

    /// The complete BMP file.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// File size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; encoding never produces an empty file.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// BLAKE3 hash of the file, hex encoded.
    pub fn hash(&self) -> String {
        bmp::hash_bmp(&self.bytes)
    }
}

/// A generated challenge: the expected answer and the image depicting it.
#[derive(Debug, Clone)]
pub struct Challenge {
    /// Plaintext the user is expected to type back.
    pub answer: String,
    /// Rotation applied, in degrees.
    pub angle: i32,
    /// The rendered image.
    pub image: EncodedImage,
}

/// Renders challenges from a shared font atlas.
///
/// The service holds no per-request state; one instance can serve any
/// number of threads as long as each brings its own RNG.
#[derive(Debug, Clone)]
pub struct CaptchaService<'a> {
    atlas: &'a FontAtlas,
    config: CaptchaConfig,
}

impl<'a> CaptchaService<'a> {
    /// Create a service after validating `config`.
    pub fn new(atlas: &'a FontAtlas, config: CaptchaConfig) -> Result<Self, CaptchaError> {
        config.validate()?;
        if atlas.is_empty() {
            return Err(FontError::Shape("font atlas has no glyphs".into()).into());
        }
        Ok(Self { atlas, config })
    }

    /// The active configuration.
    pub fn config(&self) -> &CaptchaConfig {
        &self.config
    }

    /// Draw `challenge_length` characters uniformly from the atlas charset.
    pub fn random_text<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let charset = self.atlas.charset();
        (0..self.config.challenge_length)
            .map(|_| charset[rng.gen_range(0..charset.len())])
            .collect()
    }

    /// Generate a challenge using `rng` for every random decision.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Challenge, CaptchaError> {
        let answer = self.random_text(rng);
        let angle = random_angle(
            rng,
            self.config.rotation_min_degrees,
            self.config.rotation_max_degrees,
        );
        let image = self.render(&answer, f64::from(angle), rng)?;
        Ok(Challenge {
            answer,
            angle,
            image,
        })
    }

    /// Generate a challenge with the thread-local generator, which is
    /// OS-seeded and cryptographically strong.
    pub fn generate_random(&self) -> Result<Challenge, CaptchaError> {
        self.generate(&mut rand::thread_rng())
    }

    /// Render `text` at a fixed rotation. `rng` is only used for noise.
    ///
    /// Every character must be in the atlas; [`compose`] resolves all glyphs
    /// before drawing anything.
    pub fn render<R: Rng + ?Sized>(
        &self,
        text: &str,
        degrees: f64,
        rng: &mut R,
    ) -> Result<EncodedImage, CaptchaError> {
        let grid = self.render_grid(text, degrees, rng)?;
        Ok(EncodedImage::from_grid(&grid)?)
    }

    /// Run the pipeline up to, but not including, BMP encoding.
    pub fn render_grid<R: Rng + ?Sized>(
        &self,
        text: &str,
        degrees: f64,
        rng: &mut R,
    ) -> Result<PixelGrid, CaptchaError> {
        if text.is_empty() {
            return Err(CaptchaError::EmptyText);
        }

        let composed = compose(self.atlas, text, self.config.spacing)?;
        let rotated = rotate(&composed, degrees)?;
        let scaled = scale(&rotated, self.config.scale, self.config.scale)?;
        let grid = if self.config.distort {
            distort(&scaled, self.config.noise_percent, rng)
        } else {
            scaled
        };
        log::debug!(
            "rendered {} characters at {degrees} degrees into {}x{}",
            text.chars().count(),
            grid.width(),
            grid.height()
        );
        Ok(grid)
    }
}
