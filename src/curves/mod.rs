//! Curve conversion for hair strands
//!
//! This module turns strands of Catmull-Rom control points into cubic Bezier
//! curve buffers, optionally reducing them with LOD merging.
//!
//! # Submodules
//! - `types` - Geometry primitives (bounds, Bezier curves, hairs)
//! - `spline` - Catmull-Rom to Bezier basis conversion
//! - `convert` - Per-strand conversion driver
//! - `lod` - LOD clustering and averaging

mod types;
mod spline;
mod convert;
pub mod lod;

pub use types::{
    distance,
    manhattan_distance,
    Bounds3,
    BezierCurve,
    Hair,
    CombinedHair,
    CurveBuffers,
};

pub use spline::{
    SegmentKind,
    segment_kind,
    catmull_rom_to_bezier,
};

pub use convert::{
    ConvertOptions,
    strand_curve_count,
    convert_strand,
    convert_strands,
    to_cubic_bezier_curves,
};

pub use lod::{LodOptions, SortMetric, merge_hairs};
