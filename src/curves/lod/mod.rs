//! Level-of-detail hair merging
//!
//! # Submodules
//! - `sampling` - Similarity metrics and seeded sample selection
//! - `merge` - Greedy clustering and per-index averaging

mod sampling;
mod merge;

pub use sampling::{
    SortMetric,
    PivotKey,
    SortKey,
    draw_sample_indices,
};

pub use merge::{
    DEFAULT_MAX_HAIR_RADIUS,
    DEFAULT_SAMPLE_COUNT,
    LodOptions,
    combine_group,
    merge_hairs,
};
