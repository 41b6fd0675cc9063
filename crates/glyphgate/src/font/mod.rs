//! Embedded pixel font.
//!
//! The bundled asset is base64 text wrapping a zlib stream, which in turn
//! holds a nested integer array: one 13x6 bit matrix per symbol of
//! [`CHARSET`], in charset order. Stored bits use `1` for background, so a
//! glyph's ink is the inverse of what is stored.

mod blob;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::error::CaptchaError;

/// Glyph height in pixels.
pub const GLYPH_HEIGHT: usize = 13;

/// Glyph width in pixels.
pub const GLYPH_WIDTH: usize = 6;

/// Symbols covered by the embedded font, in asset order. Visually ambiguous
/// characters (0/O, 1/I, 5/S, ...) are left out.
pub const CHARSET: &str = "2346789ABDHKLMNPRTWXYZ";

const EMBEDDED_FONT: &str = include_str!("../../assets/glyphs.b64");

/// Errors from decoding a font asset.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("base64 decoding failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("zlib inflate failed: {0}")]
    Inflate(String),

    #[error("malformed glyph data at byte {offset}: {message}")]
    Syntax { offset: usize, message: &'static str },

    #[error("unexpected glyph data layout: {0}")]
    Shape(String),

    #[error("character {0:?} defined more than once")]
    DuplicateCharacter(char),
}

/// One fixed-size glyph, stored exactly as the asset encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    bits: [[u8; GLYPH_WIDTH]; GLYPH_HEIGHT],
}

impl Glyph {
    /// Build from stored bits (`1` = background, `0` = ink).
    pub fn from_bits(bits: [[u8; GLYPH_WIDTH]; GLYPH_HEIGHT]) -> Self {
        Self { bits }
    }

    /// Build from `#` (ink) / `.` art, one line per row. Missing rows or
    /// columns are background.
    pub fn from_art(art: &str) -> Self {
        let mut bits = [[1u8; GLYPH_WIDTH]; GLYPH_HEIGHT];
        for (row, line) in bits.iter_mut().zip(art.lines()) {
            for (cell, c) in row.iter_mut().zip(line.trim().chars()) {
                if c == '#' {
                    *cell = 0;
                }
            }
        }
        Self { bits }
    }

    /// The stored bit at `(x, y)`.
    #[inline]
    pub fn stored_bit(&self, x: usize, y: usize) -> u8 {
        self.bits[y][x]
    }

    /// True when `(x, y)` is ink.
    #[inline]
    pub fn is_ink(&self, x: usize, y: usize) -> bool {
        self.bits[y][x] == 0
    }
}

/// Decoded font: an ordered character set and one glyph per character.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct FontAtlas {
    charset: Vec<char>,
    glyphs: Vec<Glyph>,
}

impl FontAtlas {
    /// Decode the font bundled with the crate.
    pub fn embedded() -> Result<Self, FontError> {
        Self::decode(EMBEDDED_FONT)
    }

    /// Decode a base64/zlib glyph asset whose entries follow [`CHARSET`] order.
    pub fn decode(raw: &str) -> Result<Self, FontError> {
        let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        let compressed = STANDARD.decode(cleaned)?;
        let serialized = miniz_oxide::inflate::decompress_to_vec_zlib(&compressed)
            .map_err(|e| FontError::Inflate(format!("{:?}", e.status)))?;

        let root = blob::parse(&serialized)?;
        let entries = root.as_list()?;
        let charset: Vec<char> = CHARSET.chars().collect();
        if entries.len() != charset.len() {
            return Err(FontError::Shape(format!(
                "expected {} glyphs, found {}",
                charset.len(),
                entries.len()
            )));
        }

        let glyphs = entries
            .into_iter()
            .map(glyph_from_node)
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "decoded font atlas: {} glyphs of {}x{}",
            glyphs.len(),
            GLYPH_WIDTH,
            GLYPH_HEIGHT
        );
        Ok(Self { charset, glyphs })
    }

    /// Build an atlas from explicit glyphs, e.g. a reduced test font.
    pub fn from_glyphs<I>(glyphs: I) -> Result<Self, FontError>
    where
        I: IntoIterator<Item = (char, Glyph)>,
    {
        let mut atlas = Self {
            charset: Vec::new(),
            glyphs: Vec::new(),
        };
        for (c, glyph) in glyphs {
            if atlas.charset.contains(&c) {
                return Err(FontError::DuplicateCharacter(c));
            }
            atlas.charset.push(c);
            atlas.glyphs.push(glyph);
        }
        Ok(atlas)
    }

    /// Characters this atlas can render, in asset order.
    pub fn charset(&self) -> &[char] {
        &self.charset
    }

    /// Number of glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// True when the atlas holds no glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Look up the glyph for `c`.
    ///
    /// Asking for a character outside the atlas is an invariant violation and
    /// is reported rather than replaced with a fallback glyph.
    pub fn lookup(&self, c: char) -> Result<&Glyph, CaptchaError> {
        self.charset
            .iter()
            .position(|&known| known == c)
            .map(|idx| &self.glyphs[idx])
            .ok_or(CaptchaError::UnknownCharacter(c))
    }
}

fn glyph_from_node(node: &blob::Node) -> Result<Glyph, FontError> {
    let rows = node.as_list()?;
    if rows.len() != GLYPH_HEIGHT {
        return Err(FontError::Shape(format!(
            "glyph has {} rows, expected {GLYPH_HEIGHT}",
            rows.len()
        )));
    }

    let mut bits = [[0u8; GLYPH_WIDTH]; GLYPH_HEIGHT];
    for (dst, row) in bits.iter_mut().zip(rows) {
        let cells = row.as_list()?;
        if cells.len() != GLYPH_WIDTH {
            return Err(FontError::Shape(format!(
                "glyph row has {} cells, expected {GLYPH_WIDTH}",
                cells.len()
            )));
        }
        for (slot, cell) in dst.iter_mut().zip(cells) {
            *slot = match cell.as_int()? {
                0 => 0,
                1 => 1,
                other => {
                    return Err(FontError::Shape(format!("glyph bit must be 0 or 1, found {other}")))
                }
            };
        }
    }
    Ok(Glyph::from_bits(bits))
}
