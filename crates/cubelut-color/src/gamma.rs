//! Pure power-law transfer functions.
//!
//! The "log" option of the pipeline is a plain 2.2 power curve applied
//! around the LUT lookup: encode before, decode after.

/// Exponent used by the pipeline's log option.
pub const LOG_GAMMA: f32 = 2.2;

/// EOTF for arbitrary gamma: `v^gamma`
///
/// Non-positive input maps to 0.
///
/// # Example
///
/// ```rust
/// use cubelut_color::gamma::gamma_eotf;
///
/// let linear = gamma_eotf(0.5, 2.2);
/// assert!((linear - 0.2176).abs() < 1e-3);
/// ```
#[inline]
pub fn gamma_eotf(v: f32, gamma: f32) -> f32 {
    if v <= 0.0 {
        0.0
    } else {
        v.powf(gamma)
    }
}

/// OETF for arbitrary gamma: `l^(1/gamma)`
///
/// Non-positive input maps to 0.
///
/// # Example
///
/// ```rust
/// use cubelut_color::gamma::gamma_oetf;
///
/// let encoded = gamma_oetf(0.218, 2.2);
/// assert!((encoded - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn gamma_oetf(l: f32, gamma: f32) -> f32 {
    if l <= 0.0 {
        0.0
    } else {
        l.powf(1.0 / gamma)
    }
}
