//! Glyphgate challenge-image renderer
//!
//! This crate renders short, human-legible challenge strings into monochrome
//! BMP images using an embedded 13x6 pixel font. No imaging library is
//! involved: rasterization, rotation, scaling, noise and BMP encoding are all
//! implemented here on a plain bit grid.
//!
//! # Pipeline
//!
//! ```text
//! FontAtlas -> compose -> rotate -> scale -> distort (optional) -> encode
//! ```
//!
//! # Example
//!
//! ```no_run
//! use glyphgate::{CaptchaConfig, CaptchaService, FontAtlas};
//!
//! let atlas = FontAtlas::embedded().unwrap();
//! let service = CaptchaService::new(&atlas, CaptchaConfig::default()).unwrap();
//!
//! let challenge = service.generate_random().unwrap();
//! // Keep `challenge.answer` in the session, serve `challenge.image.bytes()`.
//! assert_eq!(challenge.answer.len(), 4);
//! ```
//!
//! # Determinism
//!
//! Every random decision goes through an injected [`rand::Rng`]. Supplying a
//! [`DeterministicRng`] with a fixed seed yields byte-identical images, which
//! is what the regression tests rely on. Production callers should use a
//! cryptographically strong source; [`CaptchaService::generate_random`] uses
//! the OS-seeded thread generator.

pub mod bmp;
pub mod config;
pub mod error;
pub mod font;
pub mod generate;
pub mod grid;
pub mod noise;
pub mod raster;
pub mod rng;
pub mod transform;

// Re-export main types for convenience
pub use bmp::{encode, BmpError};
pub use config::{CaptchaConfig, ConfigError};
pub use error::CaptchaError;
pub use font::{FontAtlas, FontError, Glyph, CHARSET, GLYPH_HEIGHT, GLYPH_WIDTH};
pub use generate::{CaptchaService, Challenge, EncodedImage};
pub use grid::PixelGrid;
pub use noise::distort;
pub use raster::compose;
pub use rng::DeterministicRng;
pub use transform::{random_angle, rotate, scale};
