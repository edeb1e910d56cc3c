//! Convert CyHair strand files into cubic Bezier curves
//!
//! Hair vertices are interpreted as Catmull-Rom spline points and converted
//! to piecewise cubic Bezier curves, optionally merged into fewer averaged
//! curves for distant (LOD) rendering, and written as pbrt curve shapes.
//!
//! # Modules
//! - `cyhair` - Binary CyHair loading
//! - `curves` - Spline conversion and LOD merging
//! - `emit` - Scene bounds and pbrt output
//! - `config` - Conversion settings
//! - `pipeline` - Load, convert and write in one call
//!
//! # Example
//! ```ignore
//! let hair = CyHairFile::load("strands.hair")?;
//! let buffers = to_cubic_bezier_curves(&hair, &ConvertOptions::default())?;
//! println!("{} curves", buffers.num_curves());
//! ```

pub mod config;
pub mod curves;
pub mod cyhair;
pub mod emit;
pub mod pipeline;

pub use config::ConversionConfig;
pub use curves::{to_cubic_bezier_curves, ConvertOptions, CurveBuffers, LodOptions, SortMetric};
pub use cyhair::{CyHairFile, HairError, HairResult, Strand};
pub use emit::{render_pbrt, write_pbrt, EmitHeader, SceneBounds};
pub use pipeline::{convert_file, ConversionSummary, OutputTarget};
