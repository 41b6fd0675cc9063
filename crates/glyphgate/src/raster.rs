//! Text rasterization: lays glyphs out left to right in a single grid.

use crate::error::CaptchaError;
use crate::font::{FontAtlas, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::grid::PixelGrid;

/// Default number of background columns after each glyph.
pub const DEFAULT_SPACING: u32 = 2;

/// Compose `text` into a grid of height [`GLYPH_HEIGHT`].
///
/// Each character occupies `GLYPH_WIDTH` columns followed by `spacing`
/// background columns; the spacing is emitted after the last character too,
/// so the width is always `len * (GLYPH_WIDTH + spacing)`. A width that
/// overflows or exceeds [`MAX_CELLS`](crate::grid::MAX_CELLS) is an error.
pub fn compose(atlas: &FontAtlas, text: &str, spacing: u32) -> Result<PixelGrid, CaptchaError> {
    let glyphs = text
        .chars()
        .map(|c| atlas.lookup(c))
        .collect::<Result<Vec<_>, _>>()?;

    let too_large = || CaptchaError::GridTooLarge { stage: "compose" };
    let advance = u64::from(spacing)
        .checked_add(GLYPH_WIDTH as u64)
        .ok_or_else(too_large)?;
    let width = (glyphs.len() as u64)
        .checked_mul(advance)
        .ok_or_else(too_large)?;
    let mut grid = PixelGrid::try_new(width, GLYPH_HEIGHT as u64).ok_or_else(too_large)?;

    for (index, glyph) in glyphs.iter().enumerate() {
        // In range: index * advance < width, which fits in u32.
        let base_x = (index as u64 * advance) as u32;
        for y in 0..GLYPH_HEIGHT {
            for x in 0..GLYPH_WIDTH {
                if glyph.is_ink(x, y) {
                    grid.set(base_x + x as u32, y as u32, true);
                }
            }
        }
    }

    log::debug!(
        "composed {} glyphs into {}x{} grid",
        glyphs.len(),
        grid.width(),
        grid.height()
    );
    Ok(grid)
}
