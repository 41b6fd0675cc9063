//! Inverse-mapped rotation with truncating nearest-neighbor sampling.

use rand::Rng;

use crate::error::CaptchaError;
use crate::grid::PixelGrid;

/// Rotate `grid` by `degrees` (positive is clockwise on screen).
///
/// The result is sized to hold the rotated content: height
/// `round(|w sin| + |h cos|)` and width `round(|w cos| + |h sin|) + 1`.
/// Each destination pixel is mapped back into the source and sampled after
/// truncating toward zero; samples landing outside the source stay
/// background. Column 0 of the result is never written and is always
/// background.
///
/// Fails with [`CaptchaError::GridTooLarge`] when the bounding box exceeds
/// [`MAX_CELLS`](crate::grid::MAX_CELLS).
pub fn rotate(grid: &PixelGrid, degrees: f64) -> Result<PixelGrid, CaptchaError> {
    let (s, c) = degrees.to_radians().sin_cos();
    let w = f64::from(grid.width());
    let h = f64::from(grid.height());

    let new_h = ((w * s).abs() + (h * c).abs()).round();
    let new_w = ((w * c).abs() + (h * s).abs()).round() + 1.0;

    // Offsets that keep the centre of the new box on the centre of the source.
    let x0 = w / 2.0 - c * new_w / 2.0 - s * new_h / 2.0;
    let y0 = h / 2.0 - c * new_h / 2.0 + s * new_w / 2.0;

    let mut result = PixelGrid::try_new(new_w as u64, new_h as u64)
        .ok_or(CaptchaError::GridTooLarge { stage: "rotate" })?;
    for j in 0..result.height() {
        let fj = f64::from(j);
        for i in 1..result.width() {
            let fi = f64::from(i);
            let src_y = (-s * fi + c * fj + y0) as i64;
            let src_x = (c * fi + s * fj + x0) as i64;
            if grid.ink_at(src_x, src_y) {
                result.set(i, j, true);
            }
        }
    }

    log::debug!(
        "rotated {}x{} grid by {degrees} degrees into {}x{}",
        grid.width(),
        grid.height(),
        result.width(),
        result.height()
    );
    Ok(result)
}

/// Draw a whole-degree angle with magnitude uniform in `[min, max]` and a
/// uniformly random sign.
pub fn random_angle<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> i32 {
    let magnitude = rng.gen_range(min..=max) as i32;
    if rng.gen_range(0..100) < 50 {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::DeterministicRng;
    use pretty_assertions::assert_eq;

    fn sample() -> PixelGrid {
        PixelGrid::from_ascii(
            "#..#.
             .##..
             #...#
             ..#.#",
        )
        .unwrap()
    }

    #[test]
    fn test_zero_rotation_shifts_by_one_column() {
        let grid = sample();
        let rotated = rotate(&grid, 0.0).unwrap();
        assert_eq!(rotated.width(), grid.width() + 1);
        assert_eq!(rotated.height(), grid.height());
        for y in 0..grid.height() {
            assert_eq!(rotated.get(0, y), Some(false));
            for x in 0..grid.width() {
                assert_eq!(rotated.get(x + 1, y), grid.get(x, y), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_left_column_always_background() {
        let mut full = PixelGrid::new(40, 13);
        for y in 0..13 {
            for x in 0..40 {
                full.set(x, y, true);
            }
        }
        for degrees in [-4.0, -3.0, -2.0, 2.0, 3.0, 4.0, 30.0] {
            let rotated = rotate(&full, degrees).unwrap();
            assert!(
                (0..rotated.height()).all(|y| rotated.get(0, y) == Some(false)),
                "column 0 inked at {degrees} degrees"
            );
            assert!(rotated.ink_count() > 0);
        }
    }

    #[test]
    fn test_bounding_box_grows_with_angle() {
        let grid = PixelGrid::new(64, 13);
        let small = rotate(&grid, 2.0).unwrap();
        let large = rotate(&grid, 4.0).unwrap();
        assert!(large.height() > small.height());
        assert!(small.height() > grid.height());

        let (s, c) = 4.0_f64.to_radians().sin_cos();
        assert_eq!(large.height(), (64.0 * s + 13.0 * c).round() as u32);
        assert_eq!(large.width(), (64.0 * c + 13.0 * s).round() as u32 + 1);
    }

    #[test]
    fn test_sign_only_mirrors_box() {
        let grid = PixelGrid::new(32, 13);
        let pos = rotate(&grid, 3.0).unwrap();
        let neg = rotate(&grid, -3.0).unwrap();
        assert_eq!((pos.width(), pos.height()), (neg.width(), neg.height()));
    }

    #[test]
    fn test_ink_is_roughly_preserved() {
        let mut grid = PixelGrid::new(48, 13);
        for y in 3..10 {
            for x in 4..44 {
                grid.set(x, y, true);
            }
        }
        let rotated = rotate(&grid, 3.0).unwrap();
        let before = grid.ink_count() as f64;
        let after = rotated.ink_count() as f64;
        assert!((after - before).abs() / before < 0.15, "{before} -> {after}");
    }

    #[test]
    fn test_oversized_box_is_error() {
        let long = PixelGrid::new(1 << 20, 13);
        assert!(matches!(
            rotate(&long, 45.0),
            Err(CaptchaError::GridTooLarge { stage: "rotate" })
        ));
    }

    #[test]
    fn test_random_angle_range_and_sign() {
        let mut rng = DeterministicRng::new(7);
        let mut seen_neg = false;
        let mut seen_pos = false;
        for _ in 0..200 {
            let angle = random_angle(&mut rng, 2, 4);
            assert!((2..=4).contains(&angle.abs()), "angle {angle}");
            seen_neg |= angle < 0;
            seen_pos |= angle > 0;
        }
        assert!(seen_neg && seen_pos);
    }

    #[test]
    fn test_random_angle_fixed_magnitude() {
        let mut rng = DeterministicRng::new(1);
        for _ in 0..20 {
            assert_eq!(random_angle(&mut rng, 3, 3).abs(), 3);
        }
    }
}
