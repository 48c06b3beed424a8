//! LUT input domain handling.
//!
//! A cube file may declare `DOMAIN_MIN` / `DOMAIN_MAX` to describe the input
//! range its lattice covers. Interpolation always works on the unit cube, so
//! inputs are rescaled into `[0, 1]` before lookup and, optionally, back out
//! afterwards.
//!
//! # Example
//!
//! ```rust
//! use cubelut_lut::Domain;
//!
//! let domain = Domain::new([-0.5; 3], [1.5; 3]);
//! assert_eq!(domain.normalize([0.5, 0.5, 0.5]), [0.5, 0.5, 0.5]);
//! assert_eq!(domain.normalize([-0.5, 1.5, 0.0]), [0.0, 1.0, 0.25]);
//! ```

use crate::{LutError, LutResult};

/// Per-channel input range of a LUT.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    /// Lower bound per channel.
    pub min: [f32; 3],
    /// Upper bound per channel.
    pub max: [f32; 3],
}

impl Default for Domain {
    fn default() -> Self {
        Self::UNIT
    }
}

impl Domain {
    /// The unit cube `[0, 1]^3`.
    pub const UNIT: Self = Self {
        min: [0.0, 0.0, 0.0],
        max: [1.0, 1.0, 1.0],
    };

    /// Creates a domain from per-channel bounds. Call [`validate`](Self::validate)
    /// before using untrusted bounds.
    pub const fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    /// Returns true for the unit cube.
    #[inline]
    pub fn is_default(&self) -> bool {
        *self == Self::UNIT
    }

    /// Checks that every channel has `min < max`.
    pub fn validate(&self) -> LutResult<()> {
        for channel in 0..3 {
            let (min, max) = (self.min[channel], self.max[channel]);
            // NaN fails the comparison as well
            if !(min < max) {
                return Err(LutError::InvertedDomain { channel, min, max });
            }
        }
        Ok(())
    }

    /// Maps a value from this domain into `[0, 1]`:
    /// `(x - min) / (max - min)`.
    #[inline]
    pub fn normalize(&self, rgb: [f32; 3]) -> [f32; 3] {
        [
            (rgb[0] - self.min[0]) / (self.max[0] - self.min[0]),
            (rgb[1] - self.min[1]) / (self.max[1] - self.min[1]),
            (rgb[2] - self.min[2]) / (self.max[2] - self.min[2]),
        ]
    }

    /// Inverse of [`normalize`](Self::normalize): `y * (max - min) + min`.
    #[inline]
    pub fn denormalize(&self, rgb: [f32; 3]) -> [f32; 3] {
        [
            rgb[0] * (self.max[0] - self.min[0]) + self.min[0],
            rgb[1] * (self.max[1] - self.min[1]) + self.min[1],
            rgb[2] * (self.max[2] - self.min[2]) + self.min[2],
        ]
    }

    /// Clamps a triple into the domain, per channel.
    #[inline]
    pub fn clamp(&self, rgb: [f32; 3]) -> [f32; 3] {
        [
            rgb[0].clamp(self.min[0], self.max[0]),
            rgb[1].clamp(self.min[1], self.max[1]),
            rgb[2].clamp(self.min[2], self.max[2]),
        ]
    }
}

/// Clamps stored table values into `domain`, once.
///
/// Used as a correction for exports that contain values outside their own
/// declared domain. Returns the number of components that were changed.
pub fn clip_table(data: &mut [[f32; 3]], domain: &Domain) -> usize {
    let mut changed = 0;
    for rgb in data.iter_mut() {
        let clipped = domain.clamp(*rgb);
        changed += (0..3).filter(|&i| clipped[i] != rgb[i]).count();
        *rgb = clipped;
    }
    changed
}
