//! TIFF format support.
//!
//! Reads 8-bit and 16-bit gray, RGB and RGBA. Writes with LZW compression
//! at the bit depth of the source samples.

use crate::{ImageData, IoError, IoResult, PixelData};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

fn decode_err(e: tiff::TiffError) -> IoError {
    IoError::DecodeError(e.to_string())
}

fn encode_err(e: tiff::TiffError) -> IoError {
    IoError::EncodeError(e.to_string())
}

/// Reads a TIFF file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    use tiff::ColorType;
    use tiff::decoder::{Decoder, DecodingResult};

    let file = File::open(path.as_ref())?;
    let mut decoder = Decoder::new(BufReader::new(file)).map_err(decode_err)?;

    let (width, height) = decoder.dimensions().map_err(decode_err)?;
    let color_type = decoder.colortype().map_err(decode_err)?;
    let result = decoder.read_image().map_err(decode_err)?;

    let channels = match color_type {
        ColorType::Gray(_) => 1,
        ColorType::GrayA(_) => 2,
        ColorType::RGB(_) => 3,
        ColorType::RGBA(_) => 4,
        ct => {
            return Err(IoError::UnsupportedBitDepth(format!("TIFF color type {:?}", ct)));
        }
    };

    let data = match result {
        DecodingResult::U8(buf) => PixelData::U8(buf),
        DecodingResult::U16(buf) => PixelData::U16(buf),
        _ => {
            return Err(IoError::UnsupportedBitDepth(format!("TIFF samples of {:?}", color_type)));
        }
    };

    Ok(ImageData::new(width, height, channels, data))
}

/// Writes an image to a TIFF file with LZW compression.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    use tiff::encoder::{TiffEncoder, colortype, compression::Lzw};

    let file = File::create(path.as_ref())?;
    let mut encoder = TiffEncoder::new(BufWriter::new(file)).map_err(encode_err)?;
    let (w, h) = (image.width, image.height);

    let written = match (&image.data, image.channels) {
        (PixelData::U8(data), 1) => encoder.write_image_with_compression::<colortype::Gray8, _>(w, h, Lzw, data),
        (PixelData::U8(data), 3) => encoder.write_image_with_compression::<colortype::RGB8, _>(w, h, Lzw, data),
        (PixelData::U8(data), 4) => encoder.write_image_with_compression::<colortype::RGBA8, _>(w, h, Lzw, data),
        (PixelData::U16(data), 1) => encoder.write_image_with_compression::<colortype::Gray16, _>(w, h, Lzw, data),
        (PixelData::U16(data), 3) => encoder.write_image_with_compression::<colortype::RGB16, _>(w, h, Lzw, data),
        (PixelData::U16(data), 4) => encoder.write_image_with_compression::<colortype::RGBA16, _>(w, h, Lzw, data),
        (_, n) => {
            return Err(IoError::EncodeError(format!("unsupported channel count: {}", n)));
        }
    };
    written.map_err(encode_err)?;

    Ok(())
}
