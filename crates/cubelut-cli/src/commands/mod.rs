//! CLI command implementations

pub mod apply;
pub mod identity;
pub mod info;

use anyhow::{Context, Result};
use cubelut_color::RgbImage;
use cubelut_io::{ImageData, WriteOptions};
use std::path::Path;

/// Load image from path as 8-bit RGB.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let image = cubelut_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))?;
    let rgb = image.to_rgb8();
    RgbImage::from_raw(image.width, image.height, rgb)
        .with_context(|| format!("Unexpected pixel layout in {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &RgbImage, quality: u8) -> Result<()> {
    let data = ImageData::from_rgb8(image.width(), image.height(), image.as_raw().to_vec());
    cubelut_io::write_with(path, &data, WriteOptions { quality })
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Name a LUT contributes to output files: its file stem, spaces replaced.
pub fn lut_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().replace(' ', "_"))
        .unwrap_or_else(|| "lut".to_string())
}
