//! Glyphs command implementation
//!
//! Prints the embedded font as ASCII art.

use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use glyphgate::{FontAtlas, Glyph, PixelGrid, GLYPH_HEIGHT, GLYPH_WIDTH};

/// Run the glyphs command
///
/// # Arguments
/// * `only` - Restrict output to these characters (all when empty)
pub fn run(only: Option<&str>) -> Result<ExitCode> {
    let atlas = FontAtlas::embedded().context("failed to decode embedded font")?;

    let selected: Vec<char> = match only {
        Some(chars) => chars.chars().collect(),
        None => atlas.charset().to_vec(),
    };

    for c in selected {
        let glyph = match atlas.lookup(c) {
            Ok(glyph) => glyph,
            Err(_) => bail!(
                "character {c:?} is not in the font (available: {})",
                atlas.charset().iter().collect::<String>()
            ),
        };
        println!("{}", format!("'{c}'").cyan().bold());
        print!("{}", glyph_grid(glyph).to_ascii());
    }
    Ok(ExitCode::SUCCESS)
}

/// Copy a glyph's ink into a grid for display.
pub fn glyph_grid(glyph: &Glyph) -> PixelGrid {
    let mut grid = PixelGrid::new(GLYPH_WIDTH as u32, GLYPH_HEIGHT as u32);
    for y in 0..GLYPH_HEIGHT {
        for x in 0..GLYPH_WIDTH {
            grid.set(x as u32, y as u32, glyph.is_ink(x, y));
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_grid_matches_glyph() {
        let atlas = FontAtlas::embedded().unwrap();
        let grid = glyph_grid(atlas.lookup('2').unwrap());
        let art = grid.to_ascii();
        let lines: Vec<&str> = art.lines().collect();
        assert_eq!(lines.len(), GLYPH_HEIGHT);
        assert_eq!(lines[2], ".###..");
        assert_eq!(lines[10], "#####.");
    }

    #[test]
    fn test_unknown_character_is_error() {
        assert!(run(Some("0")).is_err());
    }
}
