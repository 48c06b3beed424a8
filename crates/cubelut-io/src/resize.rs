//! Image resize for thumbnails.
//!
//! Separable two-pass resampling (horizontal then vertical) over 8-bit RGB.
//! When shrinking, the kernel is widened by the scale factor so every source
//! pixel contributes.
//!
//! # Filters
//!
//! - [`Filter::Nearest`] - Fastest, no interpolation (blocky)
//! - [`Filter::Bilinear`] - Linear interpolation (smooth but blurry)
//! - [`Filter::Bicubic`] - Mitchell-Netravali cubic (default)
//! - [`Filter::Lanczos3`] - Sinc-based, sharpest when downscaling
//!
//! # Example
//!
//! ```rust
//! use cubelut_io::resize::{resize_rgb8, thumbnail_dims, Filter};
//!
//! let src = vec![128u8; 64 * 32 * 3];
//! let (w, h) = thumbnail_dims(64, 32, 16);
//! let dst = resize_rgb8(&src, 64, 32, w, h, Filter::Bicubic).unwrap();
//! assert_eq!((w, h), (16, 8));
//! assert_eq!(dst.len(), 16 * 8 * 3);
//! ```

use crate::{IoError, IoResult};

/// Resampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Nearest-neighbor (fastest, no interpolation).
    Nearest,
    /// Bilinear interpolation (smooth, fast).
    Bilinear,
    /// Bicubic interpolation (sharper than bilinear).
    #[default]
    Bicubic,
    /// Lanczos-3 (high quality, best for downscaling).
    Lanczos3,
}

impl Filter {
    /// Parses a filter name as accepted on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "nearest" | "box" => Some(Filter::Nearest),
            "bilinear" | "linear" => Some(Filter::Bilinear),
            "bicubic" | "cubic" | "mitchell" => Some(Filter::Bicubic),
            "lanczos" | "lanczos3" => Some(Filter::Lanczos3),
            _ => None,
        }
    }

    /// Returns the support radius for this filter.
    #[inline]
    pub fn support(&self) -> f32 {
        match self {
            Filter::Nearest => 0.5,
            Filter::Bilinear => 1.0,
            Filter::Bicubic => 2.0,
            Filter::Lanczos3 => 3.0,
        }
    }

    /// Evaluates the filter kernel at position x.
    #[inline]
    pub fn weight(&self, x: f32) -> f32 {
        match self {
            Filter::Nearest => {
                if x.abs() < 0.5 { 1.0 } else { 0.0 }
            }
            Filter::Bilinear => (1.0 - x.abs()).max(0.0),
            Filter::Bicubic => mitchell_weight(x),
            Filter::Lanczos3 => lanczos_weight(x, 3.0),
        }
    }
}

/// Mitchell-Netravali with B = C = 1/3.
#[inline]
fn mitchell_weight(x: f32) -> f32 {
    const B: f32 = 1.0 / 3.0;
    const C: f32 = 1.0 / 3.0;

    let ax = x.abs();
    if ax < 1.0 {
        ((12.0 - 9.0 * B - 6.0 * C) * ax * ax * ax + (-18.0 + 12.0 * B + 6.0 * C) * ax * ax + (6.0 - 2.0 * B))
            / 6.0
    } else if ax < 2.0 {
        ((-B - 6.0 * C) * ax * ax * ax
            + (6.0 * B + 30.0 * C) * ax * ax
            + (-12.0 * B - 48.0 * C) * ax
            + (8.0 * B + 24.0 * C))
            / 6.0
    } else {
        0.0
    }
}

#[inline]
fn lanczos_weight(x: f32, a: f32) -> f32 {
    let ax = x.abs();
    if ax < 1e-8 {
        1.0
    } else if ax < a {
        let pi_x = std::f32::consts::PI * ax;
        let pi_x_a = pi_x / a;
        (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
    } else {
        0.0
    }
}

/// Dimensions whose longest side is `max_side`, keeping aspect ratio.
///
/// Images already within the bound keep their size; thumbnails never
/// upscale. A `max_side` of 0 means no resize. Each side is at least 1.
pub fn thumbnail_dims(width: u32, height: u32, max_side: u32) -> (u32, u32) {
    let longest = width.max(height);
    if max_side == 0 || longest <= max_side {
        return (width, height);
    }
    let scale = max_side as f64 / longest as f64;
    let w = ((width as f64 * scale).round() as u32).max(1);
    let h = ((height as f64 * scale).round() as u32).max(1);
    (w, h)
}

/// Resizes interleaved 8-bit RGB data.
pub fn resize_rgb8(
    src: &[u8],
    src_w: u32,
    src_h: u32,
    dst_w: u32,
    dst_h: u32,
    filter: Filter,
) -> IoResult<Vec<u8>> {
    let (src_w, src_h, dst_w, dst_h) = (src_w as usize, src_h as usize, dst_w as usize, dst_h as usize);

    let expected = src_w * src_h * 3;
    if src.len() != expected {
        return Err(IoError::InvalidDimensions(format!(
            "expected {} samples, got {}",
            expected,
            src.len()
        )));
    }
    if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
        return Err(IoError::InvalidDimensions("image sides must be > 0".into()));
    }
    if (src_w, src_h) == (dst_w, dst_h) {
        return Ok(src.to_vec());
    }

    let pixels: Vec<[f32; 3]> = src
        .chunks_exact(3)
        .map(|px| [px[0] as f32, px[1] as f32, px[2] as f32])
        .collect();

    // Horizontal pass: src_w x src_h -> dst_w x src_h
    let mut temp = vec![[0.0f32; 3]; dst_w * src_h];
    let taps = Taps::new(src_w, dst_w, filter);
    for y in 0..src_h {
        let row = &pixels[y * src_w..(y + 1) * src_w];
        for (x, out) in temp[y * dst_w..(y + 1) * dst_w].iter_mut().enumerate() {
            *out = taps.sample(x, |sx| row[sx]);
        }
    }

    // Vertical pass: dst_w x src_h -> dst_w x dst_h
    let taps = Taps::new(src_h, dst_h, filter);
    let mut dst = Vec::with_capacity(dst_w * dst_h * 3);
    for y in 0..dst_h {
        for x in 0..dst_w {
            let rgb = taps.sample(y, |sy| temp[sy * dst_w + x]);
            dst.extend(rgb.map(|v| (v + 0.5).clamp(0.0, 255.0) as u8));
        }
    }

    Ok(dst)
}

/// One-dimensional resampling geometry for a single pass.
struct Taps {
    filter: Filter,
    src_len: usize,
    scale: f32,
    support: f32,
}

impl Taps {
    fn new(src_len: usize, dst_len: usize, filter: Filter) -> Self {
        let scale = src_len as f32 / dst_len as f32;
        Self {
            filter,
            src_len,
            scale,
            support: filter.support() * scale.max(1.0),
        }
    }

    /// Weighted sum of source samples around destination index `i`.
    fn sample(&self, i: usize, src: impl Fn(usize) -> [f32; 3]) -> [f32; 3] {
        let center = (i as f32 + 0.5) * self.scale - 0.5;
        let first = ((center - self.support).floor().max(0.0)) as usize;
        let last = ((center + self.support).ceil().max(0.0) as usize).min(self.src_len - 1);

        let mut sum = [0.0f32; 3];
        let mut weight_sum = 0.0f32;
        for s in first..=last {
            let w = self.filter.weight((s as f32 - center) / self.scale.max(1.0));
            if w == 0.0 {
                continue;
            }
            let px = src(s);
            for c in 0..3 {
                sum[c] += px[c] * w;
            }
            weight_sum += w;
        }

        if weight_sum > 0.0 {
            sum.map(|v| v / weight_sum)
        } else {
            // kernel fell between samples; take the nearest one
            src((center.round().max(0.0) as usize).min(self.src_len - 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_weights() {
        assert!((Filter::Nearest.weight(0.0) - 1.0).abs() < 0.01);
        assert!((Filter::Nearest.weight(0.6) - 0.0).abs() < 0.01);
        assert!((Filter::Bilinear.weight(0.5) - 0.5).abs() < 0.01);
        assert!((Filter::Lanczos3.weight(0.0) - 1.0).abs() < 0.01);
        assert_eq!(Filter::Bicubic.weight(2.5), 0.0);
    }

    #[test]
    fn filter_names() {
        assert_eq!(Filter::from_name("BICUBIC"), Some(Filter::Bicubic));
        assert_eq!(Filter::from_name("lanczos"), Some(Filter::Lanczos3));
        assert_eq!(Filter::from_name("box"), Some(Filter::Nearest));
        assert_eq!(Filter::from_name("gaussian"), None);
    }

    #[test]
    fn thumbnail_geometry() {
        assert_eq!(thumbnail_dims(2000, 1000, 500), (500, 250));
        assert_eq!(thumbnail_dims(1000, 3000, 500), (167, 500));
        assert_eq!(thumbnail_dims(300, 200, 500), (300, 200));
        assert_eq!(thumbnail_dims(5000, 2, 500), (500, 1));
        assert_eq!(thumbnail_dims(4000, 3000, 0), (4000, 3000));
    }

    #[test]
    fn constant_image_stays_constant() {
        let src = vec![77u8; 40 * 30 * 3];
        for filter in [Filter::Nearest, Filter::Bilinear, Filter::Bicubic, Filter::Lanczos3] {
            let dst = resize_rgb8(&src, 40, 30, 13, 7, filter).unwrap();
            assert_eq!(dst.len(), 13 * 7 * 3);
            assert!(dst.iter().all(|&v| v == 77), "{:?}", filter);
        }
    }

    #[test]
    fn upscale_keeps_channels_apart() {
        let src = [255, 0, 0, 255, 0, 0];
        let dst = resize_rgb8(&src, 2, 1, 4, 2, Filter::Bilinear).unwrap();
        for px in dst.chunks_exact(3) {
            assert_eq!(px, [255, 0, 0]);
        }
    }

    #[test]
    fn rejects_bad_input() {
        assert!(resize_rgb8(&[0; 5], 1, 2, 1, 1, Filter::Bicubic).is_err());
        assert!(resize_rgb8(&[0; 3], 1, 1, 0, 1, Filter::Bicubic).is_err());
    }
}
