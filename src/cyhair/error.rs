//! Errors raised while loading and converting CyHair data

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the loader and the conversion entry points.
///
/// A strand too short to yield curves is not an error; it simply contributes
/// no curves.
#[derive(Debug, Error)]
pub enum HairError {
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a CyHair file: magic is {found:?}, expected \"HAIR\"")]
    BadMagic { found: [u8; 4] },

    #[error("truncated CyHair header: {0}")]
    TruncatedHeader(#[source] std::io::Error),

    #[error("failed to read CyHair {array} data: {source}")]
    ShortRead {
        array: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("strand {strand} needs points {start}..{end} but the file has {total_points}")]
    StrandOutOfRange {
        strand: usize,
        start: usize,
        end: usize,
        total_points: usize,
    },

    #[error("no point data in CyHair")]
    MissingPoints,

    #[error("no valid segment information in CyHair")]
    MissingSegments,

    #[error("CyHair data has no strands or no points to convert")]
    EmptyInput,
}

impl HairError {
    /// True for errors caused by malformed file contents
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            HairError::BadMagic { .. }
                | HairError::TruncatedHeader(_)
                | HairError::ShortRead { .. }
                | HairError::StrandOutOfRange { .. }
        )
    }
}

pub type HairResult<T> = Result<T, HairError>;
