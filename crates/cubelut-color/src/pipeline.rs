//! Per-image LUT pipeline.
//!
//! A pipeline is a fixed sequence of stages built from the LUT and the
//! caller's options. For 8-bit images the full order is:
//!
//! 1. Display range to unit range (`v / 255`)
//! 2. Domain normalization (non-default domains only)
//! 3. Gamma encode `v^(1/2.2)` (log option)
//! 4. LUT lookup
//! 5. Gamma decode `v^2.2` (log option)
//! 6. Domain denormalization (if step 2 ran and output preserves the domain)
//! 7. Unit range to display range (`v * 255`, truncated)
//!
//! Steps 2-6 are the [`Stage`]s; 1 and 7 belong to [`RgbImage`].
//!
//! # Example
//!
//! ```rust
//! use cubelut_color::{ColorPipeline, RgbImage, TransformOptions};
//! use cubelut_lut::LutTable;
//!
//! let lut = LutTable::identity(33).unwrap();
//! let pipeline = ColorPipeline::new(&lut, TransformOptions::default());
//!
//! let image = RgbImage::filled(4, 4, [200, 100, 50]);
//! let graded = pipeline.transform(&image);
//! assert_eq!(graded.width(), 4);
//! ```

use crate::gamma::{LOG_GAMMA, gamma_eotf, gamma_oetf};
use crate::RgbImage;
use cubelut_lut::{Domain, Interpolation, LutTable};

/// Options controlling one pipeline invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    /// Lookup method. Trilinear by default.
    pub interpolation: Interpolation,
    /// Wrap the lookup in a 2.2 gamma encode/decode.
    pub log_gamma: bool,
    /// Map output back out of the LUT domain when the input was normalized.
    pub preserve_domain: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::Trilinear,
            log_gamma: false,
            preserve_domain: true,
        }
    }
}

impl TransformOptions {
    /// Sets the lookup method.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Enables or disables the gamma wrap.
    pub fn with_log_gamma(mut self, log_gamma: bool) -> Self {
        self.log_gamma = log_gamma;
        self
    }

    /// Enables or disables output denormalization.
    pub fn with_preserve_domain(mut self, preserve_domain: bool) -> Self {
        self.preserve_domain = preserve_domain;
        self
    }
}

/// A single float-domain step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stage {
    /// `(x - min) / (max - min)`.
    DomainIn(Domain),
    /// `v^(1/gamma)`.
    GammaEncode(f32),
    /// LUT lookup.
    Lookup(Interpolation),
    /// `v^gamma`.
    GammaDecode(f32),
    /// `y * (max - min) + min`.
    DomainOut(Domain),
}

/// LUT pipeline bound to one table.
///
/// Holds only a shared reference to the table, so any number of pipelines
/// may run concurrently against the same LUT.
#[derive(Debug, Clone)]
pub struct ColorPipeline<'a> {
    lut: &'a LutTable,
    stages: Vec<Stage>,
}

impl<'a> ColorPipeline<'a> {
    /// Builds the stage list for `lut` and `options`.
    pub fn new(lut: &'a LutTable, options: TransformOptions) -> Self {
        let domain = *lut.domain();
        let scaled = !domain.is_default();

        let mut stages = Vec::with_capacity(5);
        if scaled {
            stages.push(Stage::DomainIn(domain));
        }
        if options.log_gamma {
            stages.push(Stage::GammaEncode(LOG_GAMMA));
        }
        stages.push(Stage::Lookup(options.interpolation));
        if options.log_gamma {
            stages.push(Stage::GammaDecode(LOG_GAMMA));
        }
        if scaled && options.preserve_domain {
            stages.push(Stage::DomainOut(domain));
        }

        Self { lut, stages }
    }

    /// Stages in application order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Runs all stages on one unit-range triple.
    pub fn process_rgb(&self, mut rgb: [f32; 3]) -> [f32; 3] {
        for stage in &self.stages {
            rgb = match *stage {
                Stage::DomainIn(domain) => domain.normalize(rgb),
                Stage::GammaEncode(g) => rgb.map(|v| gamma_oetf(v, g)),
                Stage::Lookup(interp) => interp.apply(self.lut, rgb),
                Stage::GammaDecode(g) => rgb.map(|v| gamma_eotf(v, g)),
                Stage::DomainOut(domain) => domain.denormalize(rgb),
            };
        }
        rgb
    }

    /// Runs all stages over unit-range pixels, in place.
    pub fn apply_unit(&self, pixels: &mut [[f32; 3]]) {
        for px in pixels.iter_mut() {
            *px = self.process_rgb(*px);
        }
    }

    /// Applies the pipeline to an 8-bit image, returning a new image.
    pub fn transform(&self, image: &RgbImage) -> RgbImage {
        tracing::trace!(
            width = image.width(),
            height = image.height(),
            stages = self.stages.len(),
            "ColorPipeline::transform"
        );
        let mut pixels = image.to_unit();
        self.apply_unit(&mut pixels);
        RgbImage::from_unit(image.width(), image.height(), &pixels)
    }
}

/// Applies `lut` to `image` with the default trilinear lookup.
///
/// `log` wraps the lookup in the 2.2 gamma encode/decode.
pub fn transform(image: &RgbImage, lut: &LutTable, log: bool) -> RgbImage {
    let options = TransformOptions::default().with_log_gamma(log);
    ColorPipeline::new(lut, options).transform(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn wide_identity() -> LutTable {
        // identity over [-0.5, 1.5]: vertex i holds min + i / (n - 1) * (max - min)
        let domain = Domain::new([-0.5; 3], [1.5; 3]);
        let base = LutTable::identity(9).unwrap();
        let data = base.data().iter().map(|&rgb| domain.denormalize(rgb)).collect();
        LutTable::new(9, data, domain).unwrap()
    }

    #[test]
    fn default_stages() {
        let lut = LutTable::identity(2).unwrap();
        let pipeline = ColorPipeline::new(&lut, TransformOptions::default());
        assert_eq!(pipeline.stages(), &[Stage::Lookup(Interpolation::Trilinear)]);
    }

    #[test]
    fn full_stage_order() {
        let lut = wide_identity();
        let options = TransformOptions::default()
            .with_log_gamma(true)
            .with_interpolation(Interpolation::Tetrahedral);
        let pipeline = ColorPipeline::new(&lut, options);
        let domain = *lut.domain();
        assert_eq!(
            pipeline.stages(),
            &[
                Stage::DomainIn(domain),
                Stage::GammaEncode(LOG_GAMMA),
                Stage::Lookup(Interpolation::Tetrahedral),
                Stage::GammaDecode(LOG_GAMMA),
                Stage::DomainOut(domain),
            ]
        );

        let pipeline = ColorPipeline::new(&lut, TransformOptions::default().with_preserve_domain(false));
        assert_eq!(pipeline.stages().len(), 2);
    }

    #[test]
    fn identity_preserves_gray() {
        let lut = LutTable::identity(33).unwrap();
        let image = RgbImage::filled(2, 2, [128, 128, 128]);
        let out = transform(&image, &lut, false);
        for px in out.as_raw() {
            assert!((*px as i32 - 128).abs() <= 1, "got {}", px);
        }
    }

    #[test]
    fn identity_with_log_is_near_identity() {
        let lut = LutTable::identity(33).unwrap();
        let pipeline = ColorPipeline::new(&lut, TransformOptions::default().with_log_gamma(true));
        for v in [0.1f32, 0.35, 0.5, 0.8] {
            let out = pipeline.process_rgb([v; 3]);
            assert_abs_diff_eq!(out[0], v, epsilon = 1e-4);
        }
    }

    #[test]
    fn log_changes_where_lut_is_nonlinear() {
        // LUT that squares its input: the gamma wrap moves where samples land
        let base = LutTable::identity(5).unwrap();
        let data = base.data().iter().map(|rgb| rgb.map(|v| v * v)).collect();
        let lut = LutTable::new(5, data, Domain::UNIT).unwrap();

        let plain = ColorPipeline::new(&lut, TransformOptions::default()).process_rgb([0.3; 3]);
        let logged = ColorPipeline::new(&lut, TransformOptions::default().with_log_gamma(true))
            .process_rgb([0.3; 3]);
        assert!((plain[0] - logged[0]).abs() > 1e-3);
    }

    #[test]
    fn domain_roundtrip_through_identity() {
        let lut = wide_identity();
        let pipeline = ColorPipeline::new(&lut, TransformOptions::default().with_preserve_domain(false));
        // 0.0 normalizes to 0.25, the identity-in-domain table returns 0.0
        let out = pipeline.process_rgb([0.0, 0.5, 1.0]);
        assert_abs_diff_eq!(out[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(out[1], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(out[2], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn preserve_domain_rescales_output() {
        let lut = wide_identity();
        let pipeline = ColorPipeline::new(&lut, TransformOptions::default());
        // lookup yields 0.0, which is then mapped out: 0.0 * 2.0 - 0.5
        let out = pipeline.process_rgb([0.0; 3]);
        assert_abs_diff_eq!(out[0], -0.5, epsilon = 1e-6);
    }

    #[test]
    fn output_is_a_new_buffer() {
        let lut = LutTable::identity(2).unwrap();
        let inverted = lut.data().iter().map(|rgb| rgb.map(|v| 1.0 - v)).collect();
        let lut = LutTable::new(2, inverted, Domain::UNIT).unwrap();

        let image = RgbImage::filled(1, 1, [0, 255, 0]);
        let out = transform(&image, &lut, false);
        assert_eq!(image.pixel(0, 0), Some([0, 255, 0]));
        assert_eq!(out.pixel(0, 0), Some([255, 0, 255]));
    }
}
