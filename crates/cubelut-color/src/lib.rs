//! # cubelut-color
//!
//! Applies a loaded [`LutTable`](cubelut_lut::LutTable) to 8-bit RGB images.
//!
//! - [`RgbImage`] - interleaved 8-bit RGB buffer
//! - [`ColorPipeline`] - domain mapping, optional gamma wrap, and lookup
//! - [`gamma`] - pure power-law transfer used by the log option
//!
//! # Quick Start
//!
//! ```rust
//! use cubelut_color::{transform, RgbImage};
//! use cubelut_lut::LutTable;
//!
//! let lut = LutTable::identity(17).unwrap();
//! let image = RgbImage::filled(8, 8, [64, 128, 192]);
//! let out = transform(&image, &lut, true);
//! assert_eq!(out.pixel_count(), 64);
//! ```

#![warn(missing_docs)]

mod error;
mod image;
mod pipeline;
pub mod gamma;

pub use error::{TransformError, TransformResult};
pub use image::RgbImage;
pub use pipeline::{ColorPipeline, Stage, TransformOptions, transform};

pub use cubelut_lut::Interpolation;
