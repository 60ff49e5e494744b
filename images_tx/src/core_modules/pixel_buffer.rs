// THEORY:
// `PixelBuffer` is the one in-memory image representation every transformation reads
// and writes. Decoded images are converted into it once; from then on the rest of the
// filter can assume a rectangular grid of 4-channel pixels and never re-validate.
//
// Layout is row-major (`index = y * width + x`), which matches the RGBA8 byte layout
// the codec hands us, so ingest and export are a straight walk over the data.
//
// Buffers are never shared between pipeline stages. Each stage borrows its input and
// returns a freshly built buffer, which is what lets the parallel pipeline slice a
// buffer into bands without any aliasing.

use crate::core_modules::chunk::chunk::Chunk;
use crate::core_modules::pixel::pixel::{Byte, CHANNELS, Pixel};
use crate::core_modules::tile_grid::Tile;
use crate::error::FilterError;

/// A dense, rectangular, row-major grid of RGBA pixels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// A buffer with no pixels.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wraps a row-major pixel vector, checking it fills `width × height` exactly.
    pub fn new(width: usize, height: usize, pixels: Vec<Pixel>) -> Result<Self, FilterError> {
        if width.checked_mul(height) != Some(pixels.len()) {
            return Err(FilterError::DimensionMismatch {
                width,
                height,
                found: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A `width × height` buffer where every pixel is `pixel`.
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width * height],
        }
    }

    /// Builds a buffer from a list of rows (`rows[y][x]`). All rows must have the
    /// same length.
    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> Result<Self, FilterError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut pixels = Vec::with_capacity(width * height);
        for (row, line) in rows.into_iter().enumerate() {
            if line.len() != width {
                return Err(FilterError::RaggedBuffer {
                    row,
                    expected: width,
                    found: line.len(),
                });
            }
            pixels.extend(line);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Ingests tightly packed RGBA8 bytes. This is the only place channel count is
    /// checked.
    pub fn from_rgba_bytes(
        width: usize,
        height: usize,
        bytes: &[Byte],
    ) -> Result<Self, FilterError> {
        let remainder = bytes.len() % CHANNELS;
        if remainder != 0 {
            return Err(FilterError::MalformedPixel {
                offset: bytes.len() / CHANNELS,
                channels: remainder,
            });
        }
        let pixels = bytes
            .chunks_exact(CHANNELS)
            .map(|channels| Pixel::new(channels[0], channels[1], channels[2], channels[3]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Exports the buffer as tightly packed RGBA8 bytes.
    pub fn to_rgba_bytes(&self) -> Vec<Byte> {
        self.pixels
            .iter()
            .flat_map(|pixel| <[Byte; CHANNELS]>::from(*pixel))
            .collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// True when the buffer holds no pixels (zero width or zero height).
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// The pixel at (x, y), or `None` outside the buffer.
    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        (x < self.width && y < self.height).then(|| self.pixels[self.idx(x, y)])
    }

    /// Iterates rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        // An empty buffer has no pixels, so the chunk length only needs to be non-zero.
        self.pixels.chunks(self.width.max(1))
    }

    /// Copies the rows back out as nested vectors (`rows[y][x]`).
    pub fn to_rows(&self) -> Vec<Vec<Pixel>> {
        self.rows().map(<[Pixel]>::to_vec).collect()
    }

    /// Builds a new buffer of the same size by mapping every pixel.
    pub fn map<F>(&self, transform: F) -> PixelBuffer
    where
        F: Fn(Pixel) -> Pixel,
    {
        PixelBuffer {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().copied().map(transform).collect(),
        }
    }

    fn check_origin(&self, tile: &Tile) -> Result<(), FilterError> {
        if tile.x >= self.width || tile.y >= self.height {
            log::error!(
                "block origin ({}, {}) outside {}x{} buffer (tile {}x{})",
                tile.x,
                tile.y,
                self.width,
                self.height,
                tile.width,
                tile.height
            );
            return Err(FilterError::IndexOutOfRange {
                x: tile.x,
                y: tile.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Copies the pixels covered by `tile` into a `Chunk`, clipping at the buffer edge.
    ///
    /// Fails with `IndexOutOfRange` if the tile starts outside the buffer.
    pub fn chunk(&self, tile: &Tile) -> Result<Chunk, FilterError> {
        self.check_origin(tile)?;
        let x_end = (tile.x + tile.width).min(self.width);
        let y_end = (tile.y + tile.height).min(self.height);
        let mut pixels = Vec::with_capacity((x_end - tile.x) * (y_end - tile.y));
        for y in tile.y..y_end {
            let start = self.idx(tile.x, y);
            pixels.extend_from_slice(&self.pixels[start..start + (x_end - tile.x)]);
        }
        Ok(Chunk::new(pixels))
    }

    /// Overwrites every pixel covered by `tile` with `pixel`, clipping at the buffer
    /// edge.
    ///
    /// Fails with `IndexOutOfRange` if the tile starts outside the buffer.
    pub fn fill_tile(&mut self, tile: &Tile, pixel: Pixel) -> Result<(), FilterError> {
        self.check_origin(tile)?;
        let x_end = (tile.x + tile.width).min(self.width);
        let y_end = (tile.y + tile.height).min(self.height);
        for y in tile.y..y_end {
            let start = self.idx(tile.x, y);
            let end = self.idx(x_end, y);
            self.pixels[start..end].fill(pixel);
        }
        Ok(())
    }

    /// Copies image rows `rows` into a standalone buffer of the same width.
    pub fn band(&self, rows: std::ops::Range<usize>) -> PixelBuffer {
        let start = rows.start.min(self.height);
        let end = rows.end.clamp(start, self.height);
        PixelBuffer {
            width: self.width,
            height: end - start,
            pixels: self.pixels[start * self.width..end * self.width].to_vec(),
        }
    }

    /// Stacks bands of equal width back into one buffer, top to bottom.
    pub fn stack(bands: Vec<PixelBuffer>) -> Result<PixelBuffer, FilterError> {
        let width = bands.first().map_or(0, PixelBuffer::width);
        let height = bands.iter().map(PixelBuffer::height).sum();
        let mut pixels = Vec::with_capacity(width * height);
        let mut row = 0;
        for band in bands {
            if band.width != width {
                return Err(FilterError::RaggedBuffer {
                    row,
                    expected: width,
                    found: band.width,
                });
            }
            row += band.height;
            pixels.extend(band.pixels);
        }
        PixelBuffer::new(width, height, pixels)
    }
}
