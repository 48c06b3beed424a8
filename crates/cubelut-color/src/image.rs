//! 8-bit RGB image buffer handed to the pipeline.

use crate::{TransformError, TransformResult};

/// Interleaved 8-bit RGB image.
///
/// Spatial layout is irrelevant to the pipeline; pixels are processed as an
/// independent sequence of triples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbImage {
    /// Creates an image filled with one color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            data: rgb.repeat(count),
        }
    }

    /// Wraps interleaved RGB samples.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> TransformResult<Self> {
        Self::from_interleaved(width, height, 3, data)
    }

    /// Wraps interleaved samples with an explicit channel count.
    ///
    /// Anything other than 3 channels is rejected rather than guessed at.
    pub fn from_interleaved(width: u32, height: u32, channels: u32, data: Vec<u8>) -> TransformResult<Self> {
        if channels != 3 {
            return Err(TransformError::ChannelCount(channels));
        }
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(TransformError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Interleaved samples.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the image, returning its samples.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    /// Converts to unit-range floats: `v / 255`.
    pub fn to_unit(&self) -> Vec<[f32; 3]> {
        self.data
            .chunks_exact(3)
            .map(|px| [px[0] as f32 / 255.0, px[1] as f32 / 255.0, px[2] as f32 / 255.0])
            .collect()
    }

    /// Converts unit-range floats back to 8-bit: `v * 255`, clamped to
    /// `[0, 255]` and truncated.
    ///
    /// # Panics
    ///
    /// Panics if `pixels.len() != width * height`.
    pub fn from_unit(width: u32, height: u32, pixels: &[[f32; 3]]) -> Self {
        assert_eq!(pixels.len(), width as usize * height as usize, "pixel count mismatch");
        let data = pixels
            .iter()
            .flat_map(|rgb| rgb.map(to_display))
            .collect();
        Self { width, height, data }
    }
}

#[inline]
fn to_display(v: f32) -> u8 {
    // `as` saturates and maps NaN to 0
    (v * 255.0).clamp(0.0, 255.0) as u8
}
