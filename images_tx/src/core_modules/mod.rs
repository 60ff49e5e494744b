// THEORY:
// The pixel-level core, bottom-up: a `Pixel`, the `PixelBuffer` grid that holds them,
// the per-pixel `ChannelOp`s, the `Chunk` averager, the `TileGrid` that cuts a buffer
// into pixelation tiles, and the two appliers that run an op over a whole buffer.
// Nothing in here knows about files, flags, or threads.

pub mod block_op;
pub mod channel_ops;
pub mod chunk;
pub mod pixel;
pub mod pixel_buffer;
pub mod single_op;
pub mod tile_grid;
