// THEORY:
// The single-op applier runs one `ChannelOp` over every pixel of a buffer. Pixels are
// independent of each other, so traversal order does not matter and the output is a
// brand new buffer of the same dimensions.
//
// Channel validity was settled when the buffer was built, which is why this step has
// no failure path of its own.

use crate::core_modules::channel_ops::ChannelOp;
use crate::core_modules::pixel_buffer::PixelBuffer;

/// Applies `op` independently to every pixel of `buffer`.
pub fn apply_channel_op(buffer: &PixelBuffer, op: ChannelOp) -> PixelBuffer {
    buffer.map(|pixel| op.apply(pixel))
}
