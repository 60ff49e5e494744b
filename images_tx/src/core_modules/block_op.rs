// THEORY:
// Pixelation: split the buffer into N×N tiles anchored at the origin, average every
// tile and paint the average back over it. Tiles at the right and bottom edges are
// clipped to whatever pixels exist, and their average is taken over exactly those
// pixels.
//
// Reads always come from the untouched source buffer and writes always go to a copy,
// so a tile's average can never be polluted by a neighbour that was already painted.

use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::core_modules::tile_grid::{Tile, TileGrid};
use crate::error::FilterError;

/// Pixelates `buffer` with `block_size × block_size` tiles.
///
/// An empty buffer is returned unchanged. A zero block size is rejected.
pub fn pixelate(buffer: &PixelBuffer, block_size: usize) -> Result<PixelBuffer, FilterError> {
    let grid = TileGrid::new(buffer.width(), buffer.height(), block_size)?;
    if grid.is_empty() {
        return Ok(buffer.clone());
    }
    log::debug!(
        "pixelating {}x{} buffer as {}x{} tiles of {}px",
        buffer.width(),
        buffer.height(),
        grid.grid_width(),
        grid.grid_height(),
        grid.block_size()
    );
    let tiles: Vec<Tile> = grid.tiles().collect();
    pixelate_tiles(buffer, &tiles)
}

/// Averages and repaints each of `tiles` over a copy of `source`.
///
/// The tiles must be expressed in `source`'s coordinates. Used directly by the
/// parallel pipeline, which hands each worker a band plus the tiles inside it.
pub fn pixelate_tiles(source: &PixelBuffer, tiles: &[Tile]) -> Result<PixelBuffer, FilterError> {
    let mut output = source.clone();
    for tile in tiles {
        let average = source.chunk(tile)?.average_pixel()?;
        output.fill_tile(tile, average)?;
    }
    Ok(output)
}
