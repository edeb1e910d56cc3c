//! Similarity keys used to order hairs around a cluster pivot

use glam::Vec3;
use std::cmp::Ordering;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::curves::types::{distance, Hair};

/// Distance metric between a candidate hair and the cluster pivot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMetric {
    /// Root control points only
    RootPoint,
    /// Root plus tip control points
    StartAndEnd,
    /// Control points at a few seeded random indices shared by all hairs
    #[default]
    SamplePoints,
}

/// Draw the sample indices for one cluster.
///
/// `shared` is the shortest control-point count among the pivot and the
/// candidates, so every index is valid for every hair. At least one index is
/// drawn; at most `max_samples` or one per shared curve.
pub fn draw_sample_indices(rng: &mut StdRng, shared: usize, max_samples: usize) -> Vec<usize> {
    if shared == 0 {
        return Vec::new();
    }
    let count = max_samples.min(shared / 4).max(1);
    (0..count).map(|_| rng.gen_range(0..shared)).collect()
}

/// Totally ordered similarity key, so candidates can be sorted with each key
/// computed once
#[derive(Debug, Clone, Copy)]
pub struct SortKey(pub f32);

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Precomputed pivot data for one clustering round
pub struct PivotKey<'a> {
    metric: SortMetric,
    root: Vec3,
    tip: Vec3,
    cps: &'a [Vec3],
    samples: Vec<usize>,
}

impl<'a> PivotKey<'a> {
    pub fn new(metric: SortMetric, pivot: &'a Hair, samples: Vec<usize>) -> Self {
        Self {
            metric,
            root: pivot.root(),
            tip: pivot.tip(),
            cps: &pivot.cps,
            samples,
        }
    }

    pub fn sort_key(&self, hair: &Hair) -> SortKey {
        SortKey(self.key(hair))
    }

    /// Smaller is closer to the pivot
    pub fn key(&self, hair: &Hair) -> f32 {
        match self.metric {
            SortMetric::RootPoint => distance(self.root, hair.root()),
            SortMetric::StartAndEnd => {
                distance(self.root, hair.root()) + distance(self.tip, hair.tip())
            }
            SortMetric::SamplePoints => self
                .samples
                .iter()
                .map(|&i| distance(self.cps[i], hair.cps[i]))
                .sum(),
        }
    }
}
