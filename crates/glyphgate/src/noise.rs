//! Additive salt noise.

use rand::Rng;

use crate::grid::PixelGrid;

/// Default share of pixels turned to ink, in percent.
pub const DEFAULT_NOISE_PERCENT: u8 = 5;

/// Force each pixel to ink with probability `noise_percent / 100`.
///
/// Noise only ever adds ink; existing ink is never cleared. Values above
/// 100 behave like 100.
pub fn distort<R: Rng + ?Sized>(grid: &PixelGrid, noise_percent: u8, rng: &mut R) -> PixelGrid {
    let mut result = grid.clone();
    let mut added = 0usize;
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if rng.gen_range(0..100u8) < noise_percent && result.get(x, y) == Some(false) {
                result.set(x, y, true);
                added += 1;
            }
        }
    }
    log::trace!("noise added {added} ink pixels at {noise_percent}%");
    result
}
