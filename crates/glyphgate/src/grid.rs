//! Rectangular bit grid shared by every pipeline stage.

/// Largest number of cells a pipeline stage will allocate.
pub const MAX_CELLS: u64 = 1 << 26;

/// A row-major monochrome pixel grid. `true` is foreground ink, `false` is
/// background.
///
/// Every row has the same length by construction. Reads outside the grid
/// are background (see [`PixelGrid::ink_at`]); use [`PixelGrid::get`] when
/// the caller needs to tell "outside" apart from "background".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl PixelGrid {
    /// Create a grid filled with background.
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            data: vec![false; size],
        }
    }

    /// Create a background grid, or `None` when a side does not fit in `u32`
    /// or the cell count exceeds [`MAX_CELLS`]. Nothing is allocated on
    /// failure.
    pub fn try_new(width: u64, height: u64) -> Option<Self> {
        if width.checked_mul(height)? > MAX_CELLS {
            return None;
        }
        Some(Self::new(
            u32::try_from(width).ok()?,
            u32::try_from(height).ok()?,
        ))
    }

    /// Build a grid from rows of equal length. Returns `None` for ragged input.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Option<Self> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if rows.iter().any(|r| r.as_ref().len() != width) {
            return None;
        }
        let data = rows
            .iter()
            .flat_map(|r| r.as_ref().iter().copied())
            .collect();
        Some(Self {
            width: u32::try_from(width).ok()?,
            height: u32::try_from(rows.len()).ok()?,
            data,
        })
    }

    /// Parse `#` (ink) / `.` (background) lines, as produced by [`Self::to_ascii`].
    pub fn from_ascii(text: &str) -> Option<Self> {
        let rows: Vec<Vec<bool>> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(|c| c == '#').collect())
            .collect();
        Self::from_rows(&rows)
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Bounds-checked read.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if x < self.width && y < self.height {
            Some(self.data[self.index(x, y)])
        } else {
            None
        }
    }

    /// Read with signed coordinates; anything outside the grid is background.
    #[inline]
    pub fn ink_at(&self, x: i64, y: i64) -> bool {
        match (u32::try_from(x), u32::try_from(y)) {
            (Ok(x), Ok(y)) => self.get(x, y).unwrap_or(false),
            _ => false,
        }
    }

    /// Write a pixel. Coordinates must be inside the grid.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, ink: bool) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        let idx = self.index(x, y);
        self.data[idx] = ink;
    }

    /// One row of pixels, left to right.
    pub fn row(&self, y: u32) -> &[bool] {
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[bool]> + '_ {
        (0..self.height).map(move |y| self.row(y))
    }

    /// Number of foreground pixels.
    pub fn ink_count(&self) -> usize {
        self.data.iter().filter(|&&ink| ink).count()
    }

    /// Render as `#`/`.` lines for debugging and the CLI.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for row in self.rows() {
            out.extend(row.iter().map(|&ink| if ink { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}
