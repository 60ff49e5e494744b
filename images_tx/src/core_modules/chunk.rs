// THEORY:
// The `Chunk` module represents a spatial grouping of pixels: one tile of a pixelated
// image. It is the bridge between the per-pixel world and the block operations.
//
// Key architectural principles:
// 1.  **Spatial Pooling**: A chunk collapses every pixel of its tile into one average
//     color. Pixelation is nothing more than writing that average back over the tile.
// 2.  **Exact Membership**: A chunk holds only the pixels that actually exist. A tile
//     clipped at the image border produces a smaller chunk, and its average is taken
//     over those pixels alone.
// 3.  **Data Container**: Like `Pixel`, `Chunk` is a "dumb" data container. It holds a
//     `Vec<Pixel>` and knows how to summarise itself. It does not know where it sits
//     in the image.
//
// The average is computed with truncating integer division per channel and is always
// fully opaque, regardless of the alpha values that went into it.

pub mod chunk {
    use crate::core_modules::pixel::pixel::{Channel, Pixel};
    use crate::error::FilterError;

    /// A "dumb" data container holding the pixels of one tile.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Chunk {
        /// A flattened, row-major vector containing all the `Pixel` data within this chunk.
        pub pixels: Vec<Pixel>,
    }

    impl Chunk {
        pub fn new(pixels: Vec<Pixel>) -> Self {
            Self { pixels }
        }

        pub fn len(&self) -> usize {
            self.pixels.len()
        }

        pub fn is_empty(&self) -> bool {
            self.pixels.is_empty()
        }

        /// Calculates the average pixel value for the entire chunk.
        ///
        /// Red, green and blue are averaged independently with truncation; alpha is
        /// forced to 255. An empty chunk has no average and yields `DivideByZero`.
        pub fn average_pixel(&self) -> Result<Pixel, FilterError> {
            average_pixels(&self.pixels)
        }
    }

    /// Averages any run of pixels the same way `Chunk::average_pixel` does.
    pub fn average_pixels(pixels: &[Pixel]) -> Result<Pixel, FilterError> {
        let num_pixels = pixels.len() as u64;
        if num_pixels == 0 {
            return Err(FilterError::DivideByZero);
        }

        let (sum_r, sum_g, sum_b) = pixels.iter().fold((0u64, 0u64, 0u64), |sum, pixel| {
            (
                sum.0 + pixel.red as u64,
                sum.1 + pixel.green as u64,
                sum.2 + pixel.blue as u64,
            )
        });

        Ok(Pixel::opaque(
            (sum_r / num_pixels) as Channel,
            (sum_g / num_pixels) as Channel,
            (sum_b / num_pixels) as Channel,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::chunk::*;
    use crate::core_modules::pixel::pixel::Pixel;
    use crate::error::FilterError;

    #[test]
    fn empty_chunk_cannot_be_averaged() {
        let chunk = Chunk::new(Vec::new());
        assert!(chunk.is_empty());
        assert_eq!(chunk.average_pixel(), Err(FilterError::DivideByZero));
    }

    #[test]
    fn single_pixel_average_forces_opaque_alpha() {
        let chunk = Chunk::new(vec![Pixel::new(12, 34, 56, 0)]);
        assert_eq!(chunk.average_pixel(), Ok(Pixel::new(12, 34, 56, 255)));
    }

    #[test]
    fn white_and_black_average_to_truncated_gray() {
        let chunk = Chunk::new(vec![Pixel::WHITE, Pixel::BLACK]);
        assert_eq!(chunk.average_pixel(), Ok(Pixel::opaque(127, 127, 127)));
    }

    #[test]
    fn channels_are_averaged_independently() {
        let pixels = vec![
            Pixel::new(255, 0, 0, 10),
            Pixel::new(0, 255, 0, 20),
            Pixel::new(0, 0, 255, 30),
        ];
        assert_eq!(average_pixels(&pixels), Ok(Pixel::opaque(85, 85, 85)));
    }

    #[test]
    fn large_chunk_does_not_overflow() {
        let pixels = vec![Pixel::WHITE; 50 * 50];
        let chunk = Chunk::new(pixels);
        assert_eq!(chunk.len(), 2500);
        assert_eq!(chunk.average_pixel(), Ok(Pixel::WHITE));
    }
}
