// THEORY (Pixel):
// The `Pixel` module is the most fundamental unit of the filter. It is a "dumb" data
// container for a single 8-bit RGBA color plus the one heuristic every grayscale
// transformation needs: the HSL-style lightness computed in integer space.
//
// Key principles:
// 1) Single-pixel scope: nothing here reads neighbors. Anything that needs more than
//    one pixel (block averages, whole-buffer maps) lives in `chunk`, `single_op` and
//    `block_op`.
// 2) Value semantics: `Pixel` is `Copy`. Transformations return a fresh pixel instead
//    of mutating channels of a shared one.
// 3) Validated at the edge: a `Pixel` can only be built from exactly four channels,
//    so downstream code never re-checks the channel count.

pub mod pixel {
    pub type Byte = u8;
    pub type Channel = Byte;

    /// Number of channels in an RGBA pixel.
    pub const CHANNELS: usize = 4;

    /// A "dumb" data container representing a single RGBA pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
        /// The alpha (transparency) channel value (0-255).
        pub alpha: Channel,
    }

    impl Pixel {
        pub const WHITE: Pixel = Pixel::new(255, 255, 255, 255);
        pub const BLACK: Pixel = Pixel::new(0, 0, 0, 255);

        pub const fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Pixel {
                red,
                green,
                blue,
                alpha,
            }
        }

        /// Fully opaque pixel.
        pub const fn opaque(red: Channel, green: Channel, blue: Channel) -> Self {
            Pixel::new(red, green, blue, Channel::MAX)
        }

        /// Returns a pixel with new color channels and this pixel's alpha.
        #[inline]
        pub fn with_rgb(self, red: Channel, green: Channel, blue: Channel) -> Self {
            Pixel {
                red,
                green,
                blue,
                alpha: self.alpha,
            }
        }

        /// Grayscale intensity: midpoint of the largest and smallest color channel.
        ///
        /// - Sum is taken in `u16` so `255 + 255` cannot overflow.
        /// - Division truncates; (0, 100, 200) gives 100 and (0, 0, 255) gives 127.
        /// - Alpha does not participate.
        #[inline]
        pub fn grayscale_value(&self) -> Channel {
            let minimum_channel = self.red.min(self.green).min(self.blue);
            let maximum_channel = self.red.max(self.green).max(self.blue);
            ((minimum_channel as u16 + maximum_channel as u16) / 2) as Channel
        }

        /// True when red, green and blue carry the same value.
        pub fn is_gray(&self) -> bool {
            self.red == self.green && self.green == self.blue
        }

        /// Converts straight alpha to premultiplied alpha.
        ///
        /// Each channel is widened to 16 bits (`c · 0x101`), scaled by the widened alpha
        /// and truncated back to 8 bits, so a fully transparent pixel always becomes
        /// (0, 0, 0, 0) and an opaque one is unchanged.
        pub fn premultiplied(self) -> Self {
            let alpha = widen(self.alpha);
            let scale = |channel: Channel| ((widen(channel) * alpha / WIDE_MAX) >> 8) as Channel;
            self.with_rgb(scale(self.red), scale(self.green), scale(self.blue))
        }

        /// Converts premultiplied alpha back to straight alpha. Fully transparent pixels
        /// come out as (0, 0, 0, 0).
        pub fn unpremultiplied(self) -> Self {
            if self.alpha == 0 {
                return Pixel::default();
            }
            let alpha = widen(self.alpha);
            let scale = |channel: Channel| {
                ((widen(channel) * WIDE_MAX / alpha) >> 8).min(Channel::MAX as u32) as Channel
            };
            self.with_rgb(scale(self.red), scale(self.green), scale(self.blue))
        }
    }

    const WIDE_MAX: u32 = 0xffff;

    #[inline]
    fn widen(channel: Channel) -> u32 {
        channel as u32 * 0x101
    }

    impl From<[Byte; CHANNELS]> for Pixel {
        fn from(bytes: [Byte; CHANNELS]) -> Self {
            Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3])
        }
    }

    impl From<Pixel> for [Byte; CHANNELS] {
        fn from(pixel: Pixel) -> Self {
            [pixel.red, pixel.green, pixel.blue, pixel.alpha]
        }
    }

    impl From<image::Rgba<Byte>> for Pixel {
        fn from(rgba: image::Rgba<Byte>) -> Self {
            Pixel::from(rgba.0)
        }
    }

    impl From<Pixel> for image::Rgba<Byte> {
        fn from(pixel: Pixel) -> Self {
            image::Rgba(pixel.into())
        }
    }
}


// -----------------------------------------------------------------------------
// Glossary
//
// - Channel: one 8-bit component of a pixel (red, green, blue or alpha).
//
// - Grayscale value: (min(R,G,B) + max(R,G,B)) / 2 with integer truncation. This is
//   HSL lightness on the 0..255 scale, not Rec. 601 luma.
//
// - Opaque: alpha = 255. Block averages are always opaque.
//
// - Premultiplied alpha: color channels already scaled by alpha, so a transparent
//   pixel carries no color. Decoded images are held this way; straight alpha only
//   exists at the file boundary.
