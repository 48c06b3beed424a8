//! # cubelut-io
//!
//! Image file I/O for the cubelut tools.
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Notes |
//! |--------|------|-------|-------|
//! | PNG | Yes | Yes | 8/16-bit gray, gray+alpha, RGB, RGBA |
//! | JPEG | Yes | Yes | RGB, gray and CMYK sources; quality setting |
//! | TIFF | Yes | Yes | 8/16-bit; LZW on write |
//!
//! Reading detects the format from magic bytes, falling back to the
//! extension. Writing picks the format from the output extension.
//!
//! # Example
//!
//! ```rust,ignore
//! use cubelut_io::{read, write};
//!
//! let image = read("input.tif")?;
//! let rgb = image.to_rgb8();
//! write("output.png", &cubelut_io::ImageData::from_rgb8(image.width, image.height, rgb))?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;
pub mod jpeg;
pub mod png;
pub mod resize;
pub mod tiff;

pub use detect::Format;
pub use error::{IoError, IoResult};

use std::path::Path;

/// Options applied when encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// JPEG quality, 1-100. Ignored by lossless formats.
    pub quality: u8,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            quality: jpeg::DEFAULT_QUALITY,
        }
    }
}

/// Reads an image from a file, auto-detecting the format.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The format is not supported
/// - The file is corrupted
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let path = path.as_ref();
    let format = Format::detect(path)?;

    let image = match format {
        Format::Png => png::read(path)?,
        Format::Jpeg => jpeg::read(path)?,
        Format::Tiff => tiff::read(path)?,
        Format::Unknown => return Err(unsupported(path)),
    };

    tracing::debug!(
        path = %path.display(),
        ?format,
        width = image.width,
        height = image.height,
        channels = image.channels,
        "image decoded"
    );
    Ok(image)
}

/// Writes an image to a file, detecting format from extension.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    write_with(path, image, WriteOptions::default())
}

/// Writes an image to a file with explicit encoder options.
pub fn write_with<P: AsRef<Path>>(path: P, image: &ImageData, options: WriteOptions) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);

    match format {
        Format::Png => png::write(path, image)?,
        Format::Jpeg => jpeg::write_with(path, image, jpeg::JpegWriterOptions { quality: options.quality })?,
        Format::Tiff => tiff::write(path, image)?,
        Format::Unknown => return Err(unsupported(path)),
    }

    tracing::debug!(path = %path.display(), ?format, "image encoded");
    Ok(())
}

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}

/// Image data container for I/O operations.
///
/// Samples are interleaved, `channels` per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Samples per pixel: 1 gray, 2 gray+alpha, 3 RGB, 4 RGBA.
    pub channels: u32,
    /// Raw pixel data.
    pub data: PixelData,
}

/// Raw pixel data storage.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    /// 8-bit unsigned data.
    U8(Vec<u8>),
    /// 16-bit unsigned data.
    U16(Vec<u16>),
}

impl ImageData {
    /// Creates ImageData from decoded samples.
    pub fn new(width: u32, height: u32, channels: u32, data: PixelData) -> Self {
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Creates ImageData from u8 pixel data.
    pub fn from_u8(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Self {
        Self::new(width, height, channels, PixelData::U8(data))
    }

    /// Creates an 8-bit RGB image.
    pub fn from_rgb8(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self::from_u8(width, height, 3, data)
    }

    /// Returns the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Converts samples to u8, keeping the high byte of 16-bit data.
    pub fn to_u8(&self) -> Vec<u8> {
        match &self.data {
            PixelData::U8(data) => data.clone(),
            PixelData::U16(data) => data.iter().map(|&v| (v >> 8) as u8).collect(),
        }
    }

    /// Converts to interleaved 8-bit RGB.
    ///
    /// Gray is replicated to all three channels and alpha is dropped.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let samples = self.to_u8();
        match self.channels {
            3 => samples,
            0 => Vec::new(),
            1 | 2 => samples
                .chunks_exact(self.channels as usize)
                .flat_map(|px| [px[0], px[0], px[0]])
                .collect(),
            n => samples
                .chunks_exact(n as usize)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb8_conversion() {
        let gray_alpha = ImageData::from_u8(2, 1, 2, vec![10, 255, 20, 0]);
        assert_eq!(gray_alpha.to_rgb8(), vec![10, 10, 10, 20, 20, 20]);

        let rgba = ImageData::from_u8(1, 1, 4, vec![1, 2, 3, 4]);
        assert_eq!(rgba.to_rgb8(), vec![1, 2, 3]);

        let rgb16 = ImageData::new(1, 1, 3, PixelData::U16(vec![0xFFFF, 0x0100, 0x00FF]));
        assert_eq!(rgb16.to_rgb8(), vec![255, 1, 0]);
    }

    #[test]
    fn dispatch_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let image = ImageData::from_rgb8(4, 2, (0..24).collect());

        for name in ["a.png", "b.tif"] {
            let path = dir.path().join(name);
            write(&path, &image).unwrap();
            assert_eq!(read(&path).unwrap().to_rgb8(), image.to_rgb8());
        }

        let err = write(dir.path().join("c.bmp"), &image).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(ref ext) if ext == "bmp"));
    }

    #[test]
    fn read_rejects_unknown_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "not an image").unwrap();
        assert!(matches!(read(&path), Err(IoError::UnsupportedFormat(_))));
    }

    #[test]
    fn read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(read(dir.path().join("gone.png")), Err(IoError::Io(_))));
    }
}
