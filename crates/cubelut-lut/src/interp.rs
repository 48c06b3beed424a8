//! Interpolation methods for 3D LUT evaluation.
//!
//! Both methods take a triple already normalized to the unit cube, locate the
//! lattice cell containing it and blend the cell's vertices:
//!
//! - [`trilinear`] blends all 8 vertices with separable linear weights.
//! - [`tetrahedral`] splits the cell into 6 tetrahedra and blends the 4
//!   vertices of the one containing the sample.
//!
//! Results agree exactly at lattice vertices and differ inside cells.
//! Output is never clamped.

use crate::LutTable;

/// Interpolation method for LUT evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Multilinear blend of the 8 surrounding vertices.
    ///
    /// Default method: cheap and smooth.
    #[default]
    Trilinear,

    /// Piecewise-linear blend of 4 vertices.
    ///
    /// Preserves hue better near saturated colors, slightly more expensive.
    Tetrahedral,
}

impl Interpolation {
    /// Evaluates `lut` at a unit-cube input.
    #[inline]
    pub fn apply(self, lut: &LutTable, rgb: [f32; 3]) -> [f32; 3] {
        match self {
            Self::Trilinear => trilinear(lut, rgb),
            Self::Tetrahedral => tetrahedral(lut, rgb),
        }
    }

    /// Evaluates `lut` at every triple of `pixels`, in place.
    pub fn apply_slice(self, lut: &LutTable, pixels: &mut [[f32; 3]]) {
        match self {
            Self::Trilinear => pixels.iter_mut().for_each(|p| *p = trilinear(lut, *p)),
            Self::Tetrahedral => pixels.iter_mut().for_each(|p| *p = tetrahedral(lut, *p)),
        }
    }

    /// Short lowercase name, as used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Trilinear => "trilinear",
            Self::Tetrahedral => "tetrahedral",
        }
    }
}

/// Lattice cell containing a sample: lower corner plus fractional offsets.
struct Cell {
    base: [usize; 3],
    frac: [f32; 3],
}

/// Finds the cell for a unit-cube input.
///
/// Inputs are clamped to `[0, 1]`; the lower corner is clamped to `size - 2`
/// so the upper lattice face lands in the last cell with fraction 1.
#[inline]
fn locate(size: usize, rgb: [f32; 3]) -> Cell {
    let n = (size - 1) as f32;
    let mut base = [0usize; 3];
    let mut frac = [0.0f32; 3];
    for i in 0..3 {
        // max() first so NaN becomes 0
        let x = rgb[i].max(0.0).min(1.0) * n;
        let x0 = (x.floor() as usize).min(size - 2);
        base[i] = x0;
        frac[i] = x - x0 as f32;
    }
    Cell { base, frac }
}

/// Trilinear interpolation of a unit-cube input.
pub fn trilinear(lut: &LutTable, rgb: [f32; 3]) -> [f32; 3] {
    let Cell { base: [ri, gi, bi], frac: [rf, gf, bf] } = locate(lut.size(), rgb);

    let c000 = lut.get(ri, gi, bi);
    let c100 = lut.get(ri + 1, gi, bi);
    let c010 = lut.get(ri, gi + 1, bi);
    let c110 = lut.get(ri + 1, gi + 1, bi);
    let c001 = lut.get(ri, gi, bi + 1);
    let c101 = lut.get(ri + 1, gi, bi + 1);
    let c011 = lut.get(ri, gi + 1, bi + 1);
    let c111 = lut.get(ri + 1, gi + 1, bi + 1);

    let mut result = [0.0f32; 3];
    for i in 0..3 {
        let c00 = c000[i] * (1.0 - rf) + c100[i] * rf;
        let c01 = c001[i] * (1.0 - rf) + c101[i] * rf;
        let c10 = c010[i] * (1.0 - rf) + c110[i] * rf;
        let c11 = c011[i] * (1.0 - rf) + c111[i] * rf;

        let c0 = c00 * (1.0 - gf) + c10 * gf;
        let c1 = c01 * (1.0 - gf) + c11 * gf;

        result[i] = c0 * (1.0 - bf) + c1 * bf;
    }
    result
}

/// Tetrahedral interpolation of a unit-cube input.
///
/// The axes are ordered by descending fraction `s1 >= s2 >= s3`; the sample
/// lies in the tetrahedron whose vertex path walks from `000` along the
/// first axis, then the second, to `111`. Weights along that path are
/// `(1 - s1, s1 - s2, s2 - s3, s3)`.
pub fn tetrahedral(lut: &LutTable, rgb: [f32; 3]) -> [f32; 3] {
    let Cell { base, frac } = locate(lut.size(), rgb);
    let [fx, fy, fz] = frac;

    // Ties go to the earlier axis (x, then y, then z).
    let [a0, a1, a2] = if fx >= fy {
        if fy >= fz {
            [0, 1, 2]
        } else if fx >= fz {
            [0, 2, 1]
        } else {
            [2, 0, 1]
        }
    } else if fx >= fz {
        [1, 0, 2]
    } else if fy >= fz {
        [1, 2, 0]
    } else {
        [2, 1, 0]
    };

    let mut v1 = base;
    v1[a0] += 1;
    let mut v2 = v1;
    v2[a1] += 1;

    let c0 = lut.get(base[0], base[1], base[2]);
    let c1 = lut.get(v1[0], v1[1], v1[2]);
    let c2 = lut.get(v2[0], v2[1], v2[2]);
    let c3 = lut.get(base[0] + 1, base[1] + 1, base[2] + 1);

    let (s1, s2, s3) = (frac[a0], frac[a1], frac[a2]);
    let (w0, w1, w2, w3) = (1.0 - s1, s1 - s2, s2 - s3, s3);

    let mut result = [0.0f32; 3];
    for i in 0..3 {
        result[i] = w0 * c0[i] + w1 * c1[i] + w2 * c2[i] + w3 * c3[i];
    }
    result
}
