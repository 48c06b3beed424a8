//! # cubelut-lut
//!
//! 3D color lookup tables loaded from the Adobe/Resolve `.cube` format.
//!
//! # Overview
//!
//! - [`LutTable`] - immutable `N x N x N` cube of RGB outputs
//! - [`cube`] - parser and writer for `.cube` text
//! - [`Interpolation`] - trilinear and tetrahedral evaluation
//! - [`Domain`] - declared input range and load-time clipping
//! - [`events`] - structured load events, routed to `tracing` by default
//!
//! # Usage
//!
//! ```rust
//! use cubelut_lut::{parse_cube, Interpolation};
//!
//! let text = "LUT_3D_SIZE 2\n\
//!     0 0 0\n1 0 0\n0 1 0\n1 1 0\n\
//!     0 0 1\n1 0 1\n0 1 1\n1 1 1\n";
//! let lut = parse_cube(text).unwrap();
//! let rgb = lut.apply([0.25, 0.5, 0.75], Interpolation::Tetrahedral);
//! assert!((rgb[2] - 0.75).abs() < 1e-6);
//! ```
//!
//! Tables hold no interior mutability, so one loaded LUT can be shared by
//! reference across worker threads.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod domain;
mod error;
mod interp;
mod table;
pub mod cube;
pub mod events;

pub use cube::{load_lut, load_lut_with, parse_cube, parse_cube_with, read_cube, write_cube, write_cube_to};
pub use domain::{Domain, clip_table};
pub use error::{ErrorKind, LutError, LutResult};
pub use events::{LutEvent, LutEventSink, NullSink, TracingSink};
pub use interp::{Interpolation, tetrahedral, trilinear};
pub use table::{LutTable, MAX_SIZE, MIN_SIZE};
