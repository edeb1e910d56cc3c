//! CyHair binary format support
//!
//! # Submodules
//! - `header` - The fixed 128-byte header and its flag bits
//! - `loader` - Array reading, strand offsets and per-strand extraction
//! - `error` - Load and conversion errors

mod header;
mod loader;
mod error;

pub use header::{
    CyHairHeader,
    HEADER_SIZE,
    INFO_SIZE,
    MAGIC,
    FLAG_SEGMENTS,
    FLAG_POINTS,
    FLAG_THICKNESS,
    FLAG_TRANSPARENCY,
    FLAG_COLOR,
};

pub use loader::{CyHairFile, Strand};

pub use error::{HairError, HairResult};
