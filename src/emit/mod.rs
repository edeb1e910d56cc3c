//! Output of converted curves
//!
//! # Submodules
//! - `bounds` - Scene bounds over the curve buffers
//! - `pbrt` - pbrt curve shape records

mod bounds;
mod pbrt;

pub use bounds::SceneBounds;

pub use pbrt::{
    EmitHeader,
    write_curve_record,
    write_pbrt,
    render_pbrt,
};
