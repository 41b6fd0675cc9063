//! Round-trips encoded images through an independent BMP decoder.

use glyphgate::{encode, CaptchaConfig, CaptchaService, DeterministicRng, FontAtlas, PixelGrid};
use image::{ImageFormat, Luma};

fn decode(bytes: &[u8]) -> image::GrayImage {
    image::load_from_memory_with_format(bytes, ImageFormat::Bmp)
        .expect("decode bmp")
        .to_luma8()
}

fn assert_same_pattern(grid: &PixelGrid, decoded: &image::GrayImage) {
    assert_eq!(decoded.width(), grid.width());
    assert_eq!(decoded.height(), grid.height());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let expected = if grid.get(x, y) == Some(true) {
                Luma([0u8])
            } else {
                Luma([255u8])
            };
            assert_eq!(*decoded.get_pixel(x, y), expected, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn test_small_patterns_round_trip() {
    // Widths around byte and row-padding boundaries.
    for width in [1u32, 7, 8, 9, 31, 32, 33, 65] {
        let mut grid = PixelGrid::new(width, 5);
        for y in 0..5 {
            for x in 0..width {
                grid.set(x, y, (x * 7 + y * 3) % 5 == 0);
            }
        }
        let bytes = encode(&grid).unwrap();
        assert_same_pattern(&grid, &decode(&bytes));
    }
}

#[test]
fn test_rendered_challenge_round_trips() {
    let atlas = FontAtlas::embedded().unwrap();
    let config = CaptchaConfig::default().with_distort(false);
    let service = CaptchaService::new(&atlas, config).unwrap();
    let mut rng = DeterministicRng::new(314);

    let text = service.random_text(&mut rng);
    let grid = service.render_grid(&text, 3.0, &mut rng).unwrap();
    let bytes = encode(&grid).unwrap();

    let decoded = decode(&bytes);
    assert_same_pattern(&grid, &decoded);
    // Column 0 is blank from the rotation step.
    assert!((0..decoded.height()).all(|y| decoded.get_pixel(0, y).0[0] == 255));
}

#[test]
fn test_generated_image_decodes() {
    let atlas = FontAtlas::embedded().unwrap();
    let service = CaptchaService::new(&atlas, CaptchaConfig::default()).unwrap();
    let challenge = service.generate(&mut DeterministicRng::new(1)).unwrap();

    let decoded = decode(challenge.image.bytes());
    assert_eq!(decoded.width(), challenge.image.width());
    assert_eq!(decoded.height(), challenge.image.height());
    assert!(decoded.pixels().any(|p| p.0[0] == 0));
    assert!(decoded.pixels().any(|p| p.0[0] == 255));
}
