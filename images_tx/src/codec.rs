// THEORY:
// The codec module is the thin bridge between encoded image files and `PixelBuffer`.
// Decoding converts whatever the `image` crate produced into RGBA8 once, so the core
// never sees another color model. Encoding goes the other way and picks the container
// from the output path's extension.
//
// Files carry straight alpha; the filter works on premultiplied alpha. Pixels are
// premultiplied on the way in, so a transparent pixel contributes black to a block
// average, and unpremultiplied on the way out to PNG. JPEG has no alpha channel and
// takes the premultiplied color as is, which is the image composited over black.

use crate::core_modules::pixel::pixel::Pixel;
use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::error::CodecError;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Container written by `encode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Picks the format from the file extension. Anything that is not `.png` is
    /// written as JPEG.
    pub fn from_path(path: &Path) -> Self {
        match ImageFormat::from_path(path) {
            Ok(ImageFormat::Png) => OutputFormat::Png,
            _ => OutputFormat::Jpeg,
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Decodes any format the `image` crate can guess into a `PixelBuffer`.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, CodecError> {
    let decoded = image::load_from_memory(bytes).map_err(CodecError::Decode)?;
    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();
    let buffer = PixelBuffer::from_rgba_bytes(width as usize, height as usize, rgba.as_raw())?;
    log::debug!("decoded {}x{} image", width, height);
    Ok(buffer.map(Pixel::premultiplied))
}

/// Encodes a non-empty, premultiplied `PixelBuffer`.
///
/// PNG is written with straight alpha. JPEG has no alpha channel, so alpha is dropped
/// and the premultiplied color is written directly.
pub fn encode(buffer: &PixelBuffer, format: OutputFormat) -> Result<Vec<u8>, CodecError> {
    if buffer.is_empty() {
        return Err(CodecError::EmptyBuffer);
    }
    let bytes = match format {
        OutputFormat::Png => buffer.map(Pixel::unpremultiplied).to_rgba_bytes(),
        OutputFormat::Jpeg => buffer.to_rgba_bytes(),
    };
    let rgba = RgbaImage::from_raw(buffer.width() as u32, buffer.height() as u32, bytes)
        .ok_or(CodecError::EmptyBuffer)?;

    let image = match format {
        OutputFormat::Png => DynamicImage::ImageRgba8(rgba),
        OutputFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).into_rgb8()),
    };

    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, format.image_format())
        .map_err(CodecError::Encode)?;
    Ok(bytes.into_inner())
}

/// Reads and decodes the file at `path`.
pub fn open(path: &Path) -> Result<PixelBuffer, CodecError> {
    let bytes = fs::read(path)?;
    decode(&bytes)
}

/// Encodes `buffer` using the format implied by `path` and writes it there.
pub fn save(buffer: &PixelBuffer, path: &Path) -> Result<(), CodecError> {
    let bytes = encode(buffer, OutputFormat::from_path(path))?;
    fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformation::TransformationKind;

    fn gradient(width: usize, height: usize) -> PixelBuffer {
        let pixels = (0..width * height)
            .map(|i| Pixel::opaque((i % 256) as u8, (i * 3 % 256) as u8, 200))
            .collect();
        PixelBuffer::new(width, height, pixels).unwrap()
    }

    /// PNG bytes written straight from `pixels`, bypassing `encode`.
    fn straight_png(width: u32, height: u32, pixels: &[[u8; 4]]) -> Vec<u8> {
        let raw = pixels.iter().flatten().copied().collect();
        let image = RgbaImage::from_raw(width, height, raw).unwrap();
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn decode_premultiplies_alpha() {
        let bytes = straight_png(
            3,
            1,
            &[[255, 255, 255, 0], [255, 0, 0, 128], [200, 100, 50, 255]],
        );
        let decoded = decode(&bytes).unwrap();
        assert_eq!(
            decoded.pixels(),
            &[Pixel::default(), Pixel::new(128, 0, 0, 128), Pixel::opaque(200, 100, 50)]
        );
    }

    #[test]
    fn transparent_pixels_average_as_black() {
        let bytes = straight_png(2, 1, &[[255, 255, 255, 0], [0, 0, 0, 255]]);
        let decoded = decode(&bytes).unwrap();
        let pixelated = TransformationKind::Pixelate3.operator().apply(&decoded).unwrap();
        assert_eq!(pixelated, PixelBuffer::filled(2, 1, Pixel::BLACK));
    }

    #[test]
    fn png_is_written_with_straight_alpha() {
        let buffer =
            PixelBuffer::new(2, 1, vec![Pixel::new(128, 0, 0, 128), Pixel::default()]).unwrap();
        let bytes = encode(&buffer, OutputFormat::Png).unwrap();
        let written = image::load_from_memory(&bytes).unwrap().into_rgba8();
        assert_eq!(written.as_raw(), &vec![255, 0, 0, 128, 0, 0, 0, 0]);
    }

    #[test]
    fn jpeg_drops_alpha_without_unpremultiplying() {
        // Straight alpha would turn this faint gray into white.
        let buffer = PixelBuffer::filled(8, 8, Pixel::new(20, 20, 20, 20));
        let bytes = encode(&buffer, OutputFormat::Jpeg).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert!(decoded.pixels().iter().all(|p| p.red < 40 && p.alpha == 255));
    }

    #[test]
    fn opaque_png_round_trip_is_lossless() {
        let buffer = gradient(17, 9);
        let bytes = encode(&buffer, OutputFormat::Png).unwrap();
        assert_eq!(decode(&bytes).unwrap(), buffer);
    }

    #[test]
    fn jpeg_keeps_dimensions_and_is_opaque() {
        let buffer = gradient(16, 8);
        let bytes = encode(&buffer, OutputFormat::Jpeg).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (16, 8));
        assert!(decoded.pixels().iter().all(|p| p.alpha == 255));
    }

    #[test]
    fn empty_buffer_cannot_be_encoded() {
        let err = encode(&PixelBuffer::empty(), OutputFormat::Png).unwrap_err();
        assert!(matches!(err, CodecError::EmptyBuffer));
        assert_eq!(err.to_string(), "pixel conversion on empty array is invalid");
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }

    #[test]
    fn output_format_follows_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("out.png")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("out.PNG")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("out.jpg")), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("out.jpeg")), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("out")), OutputFormat::Jpeg);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = open(Path::new("this/file/does/not/exist.png")).unwrap_err();
        assert!(matches!(err, CodecError::Io(_)));
    }
}
