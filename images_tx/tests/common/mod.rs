#![allow(dead_code)]

use images_tx::codec::{self, OutputFormat};
use images_tx::{Pixel, PixelBuffer};
use std::path::PathBuf;

/// A small image with a different colour in every pixel.
pub fn gradient(width: usize, height: usize) -> PixelBuffer {
    let pixels = (0..width * height)
        .map(|i| {
            let x = i % width;
            let y = i / width;
            Pixel::new((x * 13 % 256) as u8, (y * 29 % 256) as u8, ((x + y) * 7 % 256) as u8, 255)
        })
        .collect();
    PixelBuffer::new(width, height, pixels).unwrap()
}

pub fn png_bytes(buffer: &PixelBuffer) -> Vec<u8> {
    codec::encode(buffer, OutputFormat::Png).unwrap()
}

/// A fresh path under the system temp directory, unique per test.
pub fn scratch_path(test: &str, file: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("images_tx-{}-{}", test, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(file)
}
