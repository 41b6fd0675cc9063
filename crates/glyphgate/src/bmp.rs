//! Monochrome BMP writer.
//!
//! Produces an uncompressed 1-bit-per-pixel Windows bitmap with a two-entry
//! palette: index 0 white (background) and index 1 black (ink). The whole
//! file is assembled in memory, so callers either get a complete image or
//! an error and no bytes.

use thiserror::Error;

use crate::grid::PixelGrid;

/// File header size in bytes.
pub const FILE_HEADER_SIZE: u32 = 14;
/// BITMAPINFOHEADER size in bytes.
pub const INFO_HEADER_SIZE: u32 = 40;
/// Two 4-byte palette entries.
pub const PALETTE_SIZE: u32 = 8;
/// Offset of the first pixel byte.
pub const PIXEL_DATA_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE + PALETTE_SIZE;

const SIGNATURE: &[u8; 2] = b"BM";
const RESERVED: &[u8; 4] = b"RRRR";
const RESOLUTION: i32 = 11808;
const WHITE: u32 = 0x00FF_FFFF;
const BLACK: u32 = 0;

/// Errors from BMP encoding.
#[derive(Debug, Error)]
pub enum BmpError {
    #[error("cannot encode an empty {width}x{height} image")]
    EmptyImage { width: u32, height: u32 },

    #[error("image of {width}x{height} exceeds BMP size limits")]
    TooLarge { width: u32, height: u32 },
}

/// Bytes per stored row, including padding to a 4-byte boundary.
#[inline]
pub fn row_size(width: u32) -> u32 {
    width.div_ceil(32) * 4
}

/// Encode `grid` as a complete BMP file.
pub fn encode(grid: &PixelGrid) -> Result<Vec<u8>, BmpError> {
    let (width, height) = (grid.width(), grid.height());
    if grid.is_empty() {
        return Err(BmpError::EmptyImage { width, height });
    }

    let too_large = || BmpError::TooLarge { width, height };
    let signed_width = i32::try_from(width).map_err(|_| too_large())?;
    let signed_height = i32::try_from(height).map_err(|_| too_large())?;
    let stride = row_size(width);
    let file_size = stride
        .checked_mul(height)
        .and_then(|data| data.checked_add(PIXEL_DATA_OFFSET))
        .ok_or_else(too_large)?;

    let mut out = Vec::with_capacity(file_size as usize);

    // File header
    out.extend_from_slice(SIGNATURE);
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(RESERVED);
    out.extend_from_slice(&PIXEL_DATA_OFFSET.to_le_bytes());

    // Info header
    out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
    out.extend_from_slice(&signed_width.to_le_bytes());
    out.extend_from_slice(&signed_height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&1u16.to_le_bytes()); // bits per pixel
    out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
    out.extend_from_slice(&0u32.to_le_bytes()); // raw size, may be 0 for BI_RGB
    out.extend_from_slice(&RESOLUTION.to_le_bytes());
    out.extend_from_slice(&RESOLUTION.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // palette colors, 0 = all
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors, 0 = all

    // Palette (BGR0)
    out.extend_from_slice(&WHITE.to_le_bytes());
    out.extend_from_slice(&BLACK.to_le_bytes());

    // Rows are stored bottom-up.
    for row in grid.rows().rev() {
        pack_row(row, stride as usize, &mut out);
    }

    debug_assert_eq!(out.len(), file_size as usize);
    log::debug!("encoded {width}x{height} BMP ({file_size} bytes)");
    Ok(out)
}

/// Pack one row MSB-first, zero-padded to `stride` bytes.
fn pack_row(row: &[bool], stride: usize, out: &mut Vec<u8>) {
    let start = out.len();
    for chunk in row.chunks(8) {
        let byte = chunk
            .iter()
            .enumerate()
            .fold(0u8, |acc, (bit, &ink)| acc | (u8::from(ink) << (7 - bit)));
        out.push(byte);
    }
    out.resize(start + stride, 0);
}

/// Compute the BLAKE3 hash of BMP data.
pub fn hash_bmp(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}
