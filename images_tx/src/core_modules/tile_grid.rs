// THEORY:
// The `TileGrid` turns "pixelate with N×N blocks" into a concrete list of tiles before
// a single pixel is read. It is the only place that does tiling arithmetic.
//
// Key architectural principles:
// 1.  **Anchored at the origin**: tile (column, row) starts at (column·N, row·N).
// 2.  **Clipped edges**: when the image width or height is not a multiple of N, the
//     last column/row of tiles is narrower/shorter. The grid size is a ceiling
//     division, so no pixel is left outside a tile and no tile reaches past the image.
// 3.  **Deterministic ahead of dispatch**: because tiles are plain values computed up
//     front, the parallel pipeline can hand whole tile rows to workers knowing every
//     tile's exact extent.

use crate::error::FilterError;
use std::ops::Range;

/// One axis-aligned tile of the grid, already clipped to the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    /// Column of the top-left pixel.
    pub x: usize,
    /// Row of the top-left pixel.
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Tile {
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The same tile expressed relative to a band that starts at image row `origin_y`.
    pub fn shifted_up(&self, origin_y: usize) -> Tile {
        Tile {
            y: self.y - origin_y,
            ..*self
        }
    }
}

/// Partition of a `width × height` image into `block_size` tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    /// The width of the full image in pixels.
    image_width: usize,
    /// The height of the full image in pixels.
    image_height: usize,
    /// The nominal edge length of a tile in pixels.
    block_size: usize,
    /// The width of the grid in tiles (ceil(image_width / block_size)).
    grid_width: usize,
    /// The height of the grid in tiles (ceil(image_height / block_size)).
    grid_height: usize,
}

impl TileGrid {
    pub fn new(
        image_width: usize,
        image_height: usize,
        block_size: usize,
    ) -> Result<Self, FilterError> {
        if block_size == 0 {
            return Err(FilterError::InvalidBlockSize(block_size));
        }
        Ok(Self {
            image_width,
            image_height,
            block_size,
            grid_width: image_width.div_ceil(block_size),
            grid_height: image_height.div_ceil(block_size),
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    pub fn grid_height(&self) -> usize {
        self.grid_height
    }

    /// Number of tiles in the grid.
    pub fn len(&self) -> usize {
        self.grid_width * self.grid_height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The tile at grid position (column, row), clipped to the image boundary.
    pub fn tile(&self, column: usize, row: usize) -> Tile {
        let x = column * self.block_size;
        let y = row * self.block_size;
        Tile {
            x,
            y,
            width: self.block_size.min(self.image_width.saturating_sub(x)),
            height: self.block_size.min(self.image_height.saturating_sub(y)),
        }
    }

    /// Tiles of one grid row, left to right.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Tile> + '_ {
        (0..self.grid_width).map(move |column| self.tile(column, row))
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        (0..self.grid_height).flat_map(move |row| self.row(row))
    }

    /// Image rows covered by a contiguous range of grid rows.
    pub fn pixel_rows(&self, rows: Range<usize>) -> Range<usize> {
        let start = (rows.start * self.block_size).min(self.image_height);
        let end = (rows.end * self.block_size).min(self.image_height);
        start..end
    }

    /// Splits the grid rows into at most `bands` contiguous, non-empty ranges of
    /// nearly equal size. Band boundaries always fall on tile boundaries.
    pub fn row_bands(&self, bands: usize) -> Vec<Range<usize>> {
        split_evenly(self.grid_height, bands)
    }
}

/// Splits `0..total` into at most `parts` contiguous non-empty ranges whose lengths
/// differ by at most one.
pub fn split_evenly(total: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.clamp(1, total.max(1));
    if total == 0 {
        return Vec::new();
    }
    let base = total / parts;
    let remainder = total % parts;
    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for part in 0..parts {
        let len = base + usize::from(part < remainder);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}
