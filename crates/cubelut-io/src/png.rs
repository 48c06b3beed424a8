//! PNG format support.
//!
//! Reads gray, gray+alpha, RGB, RGBA and palette images. Palettes and
//! 1/2/4-bit samples are expanded to 8-bit on decode. Writes 8-bit or
//! 16-bit depending on the source samples.

use crate::{ImageData, IoError, IoResult, PixelData};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let file = File::open(path.as_ref())?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    // palette -> RGB(A), tRNS -> alpha, sub-byte gray -> 8-bit
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let bytes = &buf[..info.buffer_size()];

    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => {
            return Err(IoError::DecodeError("palette was not expanded".into()));
        }
    };

    let data = match info.bit_depth {
        png::BitDepth::Eight => PixelData::U8(bytes.to_vec()),
        png::BitDepth::Sixteen => PixelData::U16(bytes_to_u16(bytes)),
        depth => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{:?} {:?}",
                info.color_type, depth
            )));
        }
    };

    Ok(ImageData::new(info.width, info.height, channels, data))
}

/// Writes an image to a PNG file.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    let color_type = match image.channels {
        1 => png::ColorType::Grayscale,
        2 => png::ColorType::GrayscaleAlpha,
        3 => png::ColorType::Rgb,
        4 => png::ColorType::Rgba,
        n => return Err(IoError::EncodeError(format!("unsupported channel count: {}", n))),
    };

    let file = File::create(path.as_ref())?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width, image.height);
    encoder.set_color(color_type);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let bytes = match &image.data {
        PixelData::U8(data) => {
            encoder.set_depth(png::BitDepth::Eight);
            data.clone()
        }
        PixelData::U16(data) => {
            encoder.set_depth(png::BitDepth::Sixteen);
            data.iter().flat_map(|v| v.to_be_bytes()).collect()
        }
    };

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    writer
        .write_image_data(&bytes)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    writer.finish().map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}

/// Converts big-endian byte slice to u16 vector.
fn bytes_to_u16(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Vec<u8> {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 8) as u8, (y * 8) as u8, 128]);
            }
        }
        data
    }

    #[test]
    fn roundtrip_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        let data = gradient(32, 16);
        let image = ImageData::from_u8(32, 16, 3, data.clone());

        write(&path, &image).unwrap();
        let loaded = read(&path).unwrap();

        assert_eq!(loaded.width, 32);
        assert_eq!(loaded.height, 16);
        assert_eq!(loaded.channels, 3);
        assert_eq!(loaded.to_u8(), data);
    }

    #[test]
    fn roundtrip_gray16() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray16.png");
        let data: Vec<u16> = (0..16).map(|i| i * 4096).collect();
        let image = ImageData::new(4, 4, 1, PixelData::U16(data.clone()));

        write(&path, &image).unwrap();
        let loaded = read(&path).unwrap();

        assert_eq!(loaded.channels, 1);
        assert!(matches!(&loaded.data, PixelData::U16(v) if *v == data));
        // gray expands to RGB using the high byte
        assert_eq!(&loaded.to_rgb8()[3..6], &[16, 16, 16]);
    }

    fn encode_raw(
        path: &Path,
        width: u32,
        color: png::ColorType,
        depth: png::BitDepth,
        palette: Option<Vec<u8>>,
        row: &[u8],
    ) {
        let file = File::create(path).unwrap();
        let mut encoder = png::Encoder::new(BufWriter::new(file), width, 1);
        encoder.set_color(color);
        encoder.set_depth(depth);
        if let Some(palette) = palette {
            encoder.set_palette(palette);
        }
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(row).unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn palette_expands_to_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("palette.png");
        let palette = vec![255, 0, 0, 0, 0, 255];
        encode_raw(&path, 2, png::ColorType::Indexed, png::BitDepth::Eight, Some(palette), &[1, 0]);

        let loaded = read(&path).unwrap();
        assert_eq!((loaded.width, loaded.height, loaded.channels), (2, 1, 3));
        assert_eq!(loaded.to_rgb8(), vec![0, 0, 255, 255, 0, 0]);
    }

    #[test]
    fn one_bit_gray_expands_to_8bit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.png");
        encode_raw(&path, 8, png::ColorType::Grayscale, png::BitDepth::One, None, &[0b1010_0000]);

        let loaded = read(&path).unwrap();
        assert_eq!(loaded.channels, 1);
        assert_eq!(loaded.to_u8(), vec![255, 0, 255, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn rejects_bad_channel_count() {
        let dir = tempfile::tempdir().unwrap();
        let image = ImageData::from_u8(1, 1, 5, vec![0; 5]);
        let err = write(dir.path().join("bad.png"), &image).unwrap_err();
        assert!(matches!(err, IoError::EncodeError(_)));
    }
}
