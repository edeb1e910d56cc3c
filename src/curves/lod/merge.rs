//! Greedy LOD clustering of hairs into averaged representative hairs
//!
//! Each round picks a pivot among the hairs not yet grouped, orders the rest
//! by similarity to it, and admits the nearby hairs that are at least as long
//! as the pivot. The admitted hairs are averaged index by index; the spread at
//! each index becomes the radius of the merged hair.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::sampling::{draw_sample_indices, PivotKey, SortMetric};
use crate::curves::types::{distance, Bounds3, CombinedHair, Hair};

/// Default ceiling for merged hair radius
pub const DEFAULT_MAX_HAIR_RADIUS: f32 = 2.0;

/// Default number of sampled control points per clustering round
pub const DEFAULT_SAMPLE_COUNT: usize = 2;

/// LOD merge parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LodOptions {
    /// Radius cap of a merged hair, also half the admission distance
    pub max_radius: f32,
    pub sort_metric: SortMetric,
    /// Seed for sample index selection
    pub seed: u64,
    pub samples: usize,
}

impl Default for LodOptions {
    fn default() -> Self {
        Self {
            max_radius: DEFAULT_MAX_HAIR_RADIUS,
            sort_metric: SortMetric::default(),
            seed: 0,
            samples: DEFAULT_SAMPLE_COUNT,
        }
    }
}

impl LodOptions {
    /// Root distance at which a hair stops being a merge candidate
    pub fn max_distance(&self) -> f32 {
        2.0 * self.max_radius
    }
}

/// Running total for one control-point index
#[derive(Debug, Clone, Copy)]
struct CpAccumulator {
    sum: Vec3,
    additions: u32,
    radius: f32,
}

/// Per-index accumulation of one group, sized to the pivot
struct HairAccumulator {
    cps: Vec<CpAccumulator>,
    max_radius: f32,
}

impl HairAccumulator {
    fn new(len: usize, base_radius: f32, max_radius: f32) -> Self {
        let slot = CpAccumulator {
            sum: Vec3::ZERO,
            additions: 0,
            radius: base_radius.min(max_radius),
        };
        Self {
            cps: vec![slot; len],
            max_radius,
        }
    }

    /// Add `hair`, measuring spread against `reference` (the pivot)
    fn add(&mut self, hair: &Hair, reference: &Hair) {
        for ((slot, &p), &r) in self.cps.iter_mut().zip(&hair.cps).zip(&reference.cps) {
            slot.sum += p;
            slot.additions += 1;
            slot.radius = slot.radius.max(distance(p, r)).min(self.max_radius);
        }
    }

    fn finish(self, members: Vec<usize>) -> CombinedHair {
        let (cps, radii): (Vec<Vec3>, Vec<f32>) = self
            .cps
            .into_iter()
            .map(|slot| {
                let mean = if slot.additions > 0 {
                    slot.sum / slot.additions as f32
                } else {
                    slot.sum
                };
                (mean, slot.radius)
            })
            .unzip();
        let bounds = Bounds3::from_points(cps.iter().copied());
        CombinedHair {
            cps,
            radii,
            members,
            bounds,
        }
    }
}

/// Merge a group whose first hair is the pivot
pub fn combine_group(group: &[Hair], base_radius: f32, max_radius: f32) -> Option<CombinedHair> {
    let reference = group.first()?;
    let mut accum = HairAccumulator::new(reference.len(), base_radius, max_radius);
    for hair in group {
        accum.add(hair, reference);
    }
    Some(accum.finish(group.iter().map(|h| h.strand).collect()))
}

/// Reorder `rest` so its first `n` hairs form the next group; returns `n`.
///
/// The pivot (smallest root coordinate along the widest root axis) moves to
/// the front, the remaining hairs are sorted by similarity, and the admitted
/// hairs follow the pivot in ascending control-point count.
fn gather_group(rest: &mut [Hair], rng: &mut StdRng, options: &LodOptions) -> usize {
    if rest.is_empty() {
        return 0;
    }

    let axis = Bounds3::from_points(rest.iter().map(Hair::root)).maximum_extent();
    let mut pivot_idx = 0;
    for (i, hair) in rest.iter().enumerate() {
        if hair.root()[axis] < rest[pivot_idx].root()[axis] {
            pivot_idx = i;
        }
    }
    rest[..=pivot_idx].rotate_right(1);

    let Some((pivot, candidates)) = rest.split_first_mut() else {
        return 0;
    };
    let pivot: &Hair = pivot;

    let samples = match options.sort_metric {
        SortMetric::SamplePoints => {
            let shared = candidates.iter().map(Hair::len).fold(pivot.len(), usize::min);
            draw_sample_indices(rng, shared, options.samples)
        }
        _ => Vec::new(),
    };
    let key = PivotKey::new(options.sort_metric, pivot, samples);
    candidates.sort_by_cached_key(|h| key.sort_key(h));

    let max_distance = options.max_distance();
    let walked = candidates
        .iter()
        .take_while(|h| distance(pivot.root(), h.root()) < max_distance)
        .count();

    // Hairs shorter than the pivot stay behind for a later group
    let pivot_len = pivot.len();
    let walked = &mut candidates[..walked];
    walked.sort_by_key(|h| h.len() < pivot_len);
    let admitted = walked.iter().take_while(|h| h.len() >= pivot_len).count();
    walked[..admitted].sort_by_key(Hair::len);

    1 + admitted
}

/// Cluster `hairs` into averaged representative hairs.
///
/// Every non-empty input hair ends up in exactly one output hair. Radii start
/// at `base_radius` and never exceed `options.max_radius`. Output is
/// deterministic for a given input order and seed.
pub fn merge_hairs(hairs: Vec<Hair>, base_radius: f32, options: &LodOptions) -> Vec<CombinedHair> {
    let mut hairs: Vec<Hair> = hairs.into_iter().filter(|h| !h.is_empty()).collect();
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut combined = Vec::new();

    log::info!("begin LOD with {} hairs", hairs.len());
    let start = std::time::Instant::now();

    let mut cursor = 0;
    while cursor < hairs.len() {
        let n = gather_group(&mut hairs[cursor..], &mut rng, options).max(1);
        let group = &hairs[cursor..cursor + n];
        if let Some(hair) = combine_group(group, base_radius, options.max_radius) {
            log::trace!("LOD group {}: {} hairs, {} cps", combined.len(), n, hair.len());
            combined.push(hair);
        }
        cursor += n;
    }

    log::info!(
        "end LOD, combined {} hairs to {} in {:.2}ms",
        hairs.len(),
        combined.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    combined
}
