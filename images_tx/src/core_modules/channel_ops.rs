// THEORY:
// Channel operations are the per-pixel half of the filter vocabulary. Each one is a
// pure `Pixel -> Pixel` remap of the red, green and blue channels:
//
// - grayscale family: replace channels with the pixel's grayscale value, optionally
//   keeping one channel untouched so its color survives the desaturation;
// - shifts: rotate the three color channels one step left or right;
// - swaps: exchange two named channels.
//
// None of them can fail and none of them touch alpha. `single_op::apply_channel_op`
// runs one of them over a whole buffer.

use crate::core_modules::pixel::pixel::Pixel;

/// A pure remap of one pixel's color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelOp {
    /// R, G and B all become the grayscale value.
    Grayscale,
    /// R and G become the grayscale value, B is kept.
    GrayscaleKeepBlue,
    /// R and B become the grayscale value, G is kept.
    GrayscaleKeepGreen,
    /// G and B become the grayscale value, R is kept.
    GrayscaleKeepRed,
    /// (R, G, B) -> (G, B, R)
    ShiftLeft,
    /// (R, G, B) -> (B, R, G)
    ShiftRight,
    SwapGreenBlue,
    SwapRedBlue,
    SwapRedGreen,
}

impl ChannelOp {
    pub const ALL: [ChannelOp; 9] = [
        ChannelOp::Grayscale,
        ChannelOp::GrayscaleKeepBlue,
        ChannelOp::GrayscaleKeepGreen,
        ChannelOp::GrayscaleKeepRed,
        ChannelOp::ShiftLeft,
        ChannelOp::ShiftRight,
        ChannelOp::SwapGreenBlue,
        ChannelOp::SwapRedBlue,
        ChannelOp::SwapRedGreen,
    ];

    /// Applies the operation to a single pixel. Alpha is always carried over.
    #[inline]
    pub fn apply(self, pixel: Pixel) -> Pixel {
        let Pixel {
            red, green, blue, ..
        } = pixel;
        match self {
            ChannelOp::Grayscale => {
                let gray = pixel.grayscale_value();
                pixel.with_rgb(gray, gray, gray)
            }
            ChannelOp::GrayscaleKeepBlue => {
                let gray = pixel.grayscale_value();
                pixel.with_rgb(gray, gray, blue)
            }
            ChannelOp::GrayscaleKeepGreen => {
                let gray = pixel.grayscale_value();
                pixel.with_rgb(gray, green, gray)
            }
            ChannelOp::GrayscaleKeepRed => {
                let gray = pixel.grayscale_value();
                pixel.with_rgb(red, gray, gray)
            }
            ChannelOp::ShiftLeft => pixel.with_rgb(green, blue, red),
            ChannelOp::ShiftRight => pixel.with_rgb(blue, red, green),
            ChannelOp::SwapGreenBlue => pixel.with_rgb(red, blue, green),
            ChannelOp::SwapRedBlue => pixel.with_rgb(blue, green, red),
            ChannelOp::SwapRedGreen => pixel.with_rgb(green, red, blue),
        }
    }
}
