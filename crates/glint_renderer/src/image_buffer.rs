//! Render output storage and encoding.
//!
//! Pixels are kept as linear colors; quantization to 8-bit RGB happens
//! only when encoding.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::renderer::color_to_rgb;
use crate::{BucketResult, Color};

/// Errors that can occur when writing an image.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Pixel buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },
}

/// PPM flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PpmFormat {
    /// `P6`: packed bytes after the header
    #[default]
    Binary,
    /// `P3`: one `r g b` line per pixel
    Ascii,
}

/// Image buffer for storing render output, row-major with row 0 at the top.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, *color);
        }
    }

    /// Gamma-corrected 8-bit RGB bytes, three per pixel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }

    /// Encode as PPM into `writer`.
    pub fn write_ppm<W: Write>(&self, mut writer: W, format: PpmFormat) -> io::Result<()> {
        let magic = match format {
            PpmFormat::Binary => "P6",
            PpmFormat::Ascii => "P3",
        };
        write!(writer, "{}\n{} {}\n255\n", magic, self.width, self.height)?;

        let bytes = self.to_rgb8();
        match format {
            PpmFormat::Binary => writer.write_all(&bytes)?,
            PpmFormat::Ascii => {
                for rgb in bytes.chunks_exact(3) {
                    writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
                }
            }
        }

        writer.flush()
    }

    /// Write a PPM file.
    pub fn save_ppm(&self, path: impl AsRef<Path>, format: PpmFormat) -> Result<(), ImageError> {
        let file = File::create(path.as_ref())?;
        self.write_ppm(BufWriter::new(file), format)?;
        Ok(())
    }

    /// Write an ASCII (`P3`) PPM file.
    pub fn save_ascii_ppm(&self, path: impl AsRef<Path>) -> Result<(), ImageError> {
        self.save_ppm(path, PpmFormat::Ascii)
    }

    /// Save to `path`: PNG for a `.png` extension, binary PPM otherwise.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ImageError> {
        let path = path.as_ref();
        let is_png = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

        if is_png {
            self.save_png(path)
        } else {
            self.save_ppm(path, PpmFormat::Binary)
        }
    }

    fn save_png(&self, path: &Path) -> Result<(), ImageError> {
        let img = image::RgbImage::from_raw(self.width, self.height, self.to_rgb8()).ok_or(
            ImageError::BufferSize {
                width: self.width,
                height: self.height,
            },
        )?;
        img.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}
