//! JPEG format support.
//!
//! Decoding handles RGB, grayscale (8 and 16 bit) and CMYK sources and
//! always yields 8-bit RGB. Encoding writes baseline RGB or grayscale at a
//! configurable quality.

use crate::{ImageData, IoError, IoResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Default encoder quality.
pub const DEFAULT_QUALITY: u8 = 95;

/// Options for writing JPEG files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegWriterOptions {
    /// Quality level 1-100. Higher is better quality and larger files.
    pub quality: u8,
}

impl Default for JpegWriterOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
        }
    }
}

/// Reads a JPEG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let file = File::open(path.as_ref())?;
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(file));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let data = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => pixels,
        jpeg_decoder::PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
        jpeg_decoder::PixelFormat::L16 => pixels
            .chunks_exact(2)
            .flat_map(|l16| [l16[0], l16[0], l16[0]])
            .collect(),
        jpeg_decoder::PixelFormat::CMYK32 => pixels.chunks_exact(4).flat_map(cmyk_to_rgb).collect(),
    };

    Ok(ImageData::from_u8(info.width as u32, info.height as u32, 3, data))
}

/// Approximate CMYK to RGB conversion.
fn cmyk_to_rgb(cmyk: &[u8]) -> [u8; 3] {
    let k = 1.0 - cmyk[3] as f32 / 255.0;
    let channel = |v: u8| ((1.0 - v as f32 / 255.0) * k * 255.0) as u8;
    [channel(cmyk[0]), channel(cmyk[1]), channel(cmyk[2])]
}

/// Writes an image to a JPEG file with default options.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    write_with(path, image, JpegWriterOptions::default())
}

/// Writes an image to a JPEG file.
///
/// Gray images are written as luma; alpha is dropped.
pub fn write_with<P: AsRef<Path>>(path: P, image: &ImageData, options: JpegWriterOptions) -> IoResult<()> {
    let bytes = encode(image, options)?;
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}

/// Encodes an image into an in-memory JPEG stream.
pub fn encode(image: &ImageData, options: JpegWriterOptions) -> IoResult<Vec<u8>> {
    use jpeg_encoder::{ColorType, Encoder};

    let width = u16::try_from(image.width)
        .map_err(|_| IoError::EncodeError(format!("width {} exceeds JPEG limit", image.width)))?;
    let height = u16::try_from(image.height)
        .map_err(|_| IoError::EncodeError(format!("height {} exceeds JPEG limit", image.height)))?;

    let (color_type, pixel_data) = match image.channels {
        1 => (ColorType::Luma, image.to_u8()),
        2..=4 => (ColorType::Rgb, image.to_rgb8()),
        n => return Err(IoError::EncodeError(format!("unsupported channel count: {}", n))),
    };

    let mut buffer = Vec::new();
    let encoder = Encoder::new(&mut buffer, options.quality.clamp(1, 100));
    encoder
        .encode(&pixel_data, width, height, color_type)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

    Ok(buffer)
}
