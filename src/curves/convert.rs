//! Strand to Bezier curve conversion driver
//!
//! Converts every strand independently (in parallel), applies the vertex
//! transform and radius policy, then either flattens the curves directly or
//! routes them through LOD merging.

use glam::Vec3;
use rayon::prelude::*;

use super::lod::{merge_hairs, LodOptions};
use super::spline::catmull_rom_to_bezier;
use super::types::{BezierCurve, CurveBuffers, Hair};
use crate::cyhair::{CyHairFile, HairError, HairResult, Strand};

/// Options for converting a loaded file into curve buffers
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Applied per axis before `translate`
    pub scale: Vec3,
    pub translate: Vec3,
    /// Convert only the first N strands
    pub max_strands: Option<usize>,
    /// Overrides strand thickness when positive
    pub user_thickness: Option<f32>,
    /// Merge strands when set
    pub lod: Option<LodOptions>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            translate: Vec3::ZERO,
            max_strands: None,
            user_thickness: None,
            lod: None,
        }
    }
}

impl ConvertOptions {
    /// Radius for curves of a strand with the given thickness
    pub fn radius_for(&self, strand_thickness: f32) -> f32 {
        match self.user_thickness {
            Some(t) if t > 0.0 => t,
            _ => strand_thickness,
        }
    }
}

/// Number of curves a strand of `num_points` points yields.
///
/// Both endpoints are skipped, so `n >= 4` gives `n - 3`; a two-point strand
/// is a single straight curve; anything else yields nothing.
pub fn strand_curve_count(num_points: usize) -> usize {
    match num_points {
        2 => 1,
        n if n >= 4 => n - 3,
        _ => 0,
    }
}

/// Convert one strand's Y-up control points into transformed Bezier curves
pub fn convert_strand(points: &[Vec3], radius: f32, options: &ConvertOptions) -> Vec<BezierCurve> {
    let n = points.len();
    // The tip vertex is never the start of an emitted segment
    let polygon = match n {
        2 => points,
        n if n >= 4 => &points[..n - 1],
        _ => return Vec::new(),
    };

    (0..strand_curve_count(n))
        .filter_map(|s| catmull_rom_to_bezier(polygon, s))
        .map(|q| BezierCurve::new(q, radius).transformed(options.scale, options.translate))
        .collect()
}

/// Convert all strands, preserving strand order
pub fn convert_strands(strands: &[Strand], options: &ConvertOptions) -> Vec<Vec<BezierCurve>> {
    let start = std::time::Instant::now();

    let curves: Vec<Vec<BezierCurve>> = strands
        .par_iter()
        .map(|strand| convert_strand(&strand.points, options.radius_for(strand.thickness), options))
        .collect();

    let skipped = curves.iter().filter(|c| c.is_empty()).count();
    log::debug!(
        "[Hair] Spline conversion: {:.2}ms ({} strands, {} without curves)",
        start.elapsed().as_secs_f64() * 1000.0,
        strands.len(),
        skipped
    );
    curves
}

/// Convert a loaded file into flat curve buffers.
///
/// Fails with `EmptyInput` when the file carries no strands or no points.
pub fn to_cubic_bezier_curves(hair: &CyHairFile, options: &ConvertOptions) -> HairResult<CurveBuffers> {
    if hair.total_points() == 0 || hair.num_strands() == 0 {
        return Err(HairError::EmptyInput);
    }

    let strands = hair.strands(options.max_strands)?;
    log::info!(
        "[Hair] Convert first {} strands from {} strands in the original hair data.",
        strands.len(),
        hair.num_strands()
    );

    let curves = convert_strands(&strands, options);
    let mut buffers = CurveBuffers::default();

    match &options.lod {
        None => {
            for curve in curves.iter().flatten() {
                buffers.push_curve(curve);
            }
        }
        Some(lod) => {
            let hairs: Vec<Hair> = strands
                .iter()
                .zip(&curves)
                .filter(|(_, c)| !c.is_empty())
                .map(|(s, c)| Hair::from_curves(s.index, c))
                .collect();
            let base_radius = options.radius_for(hair.default_thickness());
            for combined in merge_hairs(hairs, base_radius, lod) {
                for (p, r) in combined.cps.iter().zip(&combined.radii) {
                    buffers.push_point(*p, *r);
                }
            }
        }
    }

    log::info!("[Hair] Produced {} curves", buffers.num_curves());
    Ok(buffers)
}
