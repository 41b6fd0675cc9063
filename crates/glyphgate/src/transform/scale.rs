//! Nearest-neighbor upscaling.

use crate::error::CaptchaError;
use crate::grid::PixelGrid;

/// Scale `grid` by independent horizontal and vertical factors.
///
/// The result is `ceil(height * scale_y)` rows by `ceil(width * scale_x)`
/// columns, and destination `(i, j)` copies source
/// `(floor(i / scale_x), floor(j / scale_y))`. For whole-number factors every
/// source pixel becomes a solid `scale_x` by `scale_y` block.
///
/// Fails with [`CaptchaError::GridTooLarge`] when the result would exceed
/// [`MAX_CELLS`](crate::grid::MAX_CELLS); nothing is allocated in that case.
pub fn scale(grid: &PixelGrid, scale_x: f64, scale_y: f64) -> Result<PixelGrid, CaptchaError> {
    debug_assert!(scale_x > 0.0 && scale_y > 0.0, "scale factors must be positive");

    // `as u64` saturates, so oversized products fail the cell check below.
    let new_w = (f64::from(grid.width()) * scale_x).ceil() as u64;
    let new_h = (f64::from(grid.height()) * scale_y).ceil() as u64;

    let mut result = PixelGrid::try_new(new_w, new_h)
        .ok_or(CaptchaError::GridTooLarge { stage: "scale" })?;
    for j in 0..result.height() {
        let src_y = (f64::from(j) / scale_y) as i64;
        for i in 0..result.width() {
            let src_x = (f64::from(i) / scale_x) as i64;
            if grid.ink_at(src_x, src_y) {
                result.set(i, j, true);
            }
        }
    }

    log::debug!(
        "scaled {}x{} grid by ({scale_x}, {scale_y}) into {new_w}x{new_h}",
        grid.width(),
        grid.height()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> PixelGrid {
        PixelGrid::from_ascii(
            "#.#
             .#.",
        )
        .unwrap()
    }

    #[test]
    fn test_integer_scale_replicates_blocks() {
        let grid = sample();
        for k in 1..=4u32 {
            let scaled = scale(&grid, f64::from(k), f64::from(k)).unwrap();
            assert_eq!(scaled.width(), grid.width() * k);
            assert_eq!(scaled.height(), grid.height() * k);
            for y in 0..scaled.height() {
                for x in 0..scaled.width() {
                    assert_eq!(scaled.get(x, y), grid.get(x / k, y / k), "k={k} ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_independent_axes() {
        let scaled = scale(&sample(), 2.0, 1.0).unwrap();
        assert_eq!(
            scaled.to_ascii(),
            "##..##\n\
             ..##..\n"
        );
    }

    #[test]
    fn test_fractional_scale_rounds_dimensions_up() {
        let scaled = scale(&sample(), 1.5, 1.5).unwrap();
        assert_eq!(scaled.width(), 5);
        assert_eq!(scaled.height(), 3);
        // Column i samples source column floor(i / 1.5): 0,0,1,2,2.
        assert_eq!(
            scaled.to_ascii(),
            "##.##\n\
             ##.##\n\
             ..#..\n"
        );
    }

    #[test]
    fn test_identity_scale() {
        let grid = sample();
        assert_eq!(scale(&grid, 1.0, 1.0).unwrap(), grid);
    }

    #[test]
    fn test_huge_factor_is_error() {
        for factor in [1e9, f64::MAX] {
            assert!(matches!(
                scale(&sample(), factor, factor),
                Err(CaptchaError::GridTooLarge { stage: "scale" })
            ));
        }
    }
}
