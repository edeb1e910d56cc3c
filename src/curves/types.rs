//! Core geometry types for hair curve conversion
//!
//! This module contains the primitives shared by the spline converter and the
//! LOD merger: axis-aligned bounds, cubic Bezier curves, per-strand hairs and
//! the averaged hairs produced by LOD merging.

use glam::Vec3;
use serde::Serialize;

/// Euclidean distance between two points
pub fn distance(p0: Vec3, p1: Vec3) -> f32 {
    p0.distance(p1)
}

/// Sum of absolute per-axis differences
pub fn manhattan_distance(p0: Vec3, p1: Vec3) -> f32 {
    let d = (p1 - p0).abs();
    d.x + d.y + d.z
}

/// Axis-aligned bounding box in 3D
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds3 {
    pub pmin: Vec3,
    pub pmax: Vec3,
}

impl Default for Bounds3 {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds3 {
    /// Inverted box that any union replaces
    pub fn empty() -> Self {
        Self {
            pmin: Vec3::splat(f32::MAX),
            pmax: Vec3::splat(f32::MIN),
        }
    }

    pub fn from_point(p: Vec3) -> Self {
        Self { pmin: p, pmax: p }
    }

    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        points
            .into_iter()
            .fold(Self::empty(), |bounds, p| bounds.union_point(p))
    }

    pub fn is_empty(&self) -> bool {
        self.pmin.x > self.pmax.x || self.pmin.y > self.pmax.y || self.pmin.z > self.pmax.z
    }

    pub fn union_point(&self, p: Vec3) -> Self {
        Self {
            pmin: self.pmin.min(p),
            pmax: self.pmax.max(p),
        }
    }

    pub fn union(&self, other: &Bounds3) -> Self {
        Self {
            pmin: self.pmin.min(other.pmin),
            pmax: self.pmax.max(other.pmax),
        }
    }

    pub fn diagonal(&self) -> Vec3 {
        self.pmax - self.pmin
    }

    /// Index of the longest axis (0 = x, 1 = y, 2 = z).
    /// Ties resolve toward the later axis.
    pub fn maximum_extent(&self) -> usize {
        let d = self.diagonal();
        if d.x > d.y && d.x > d.z {
            0
        } else if d.y > d.z {
            1
        } else {
            2
        }
    }
}

/// Cubic Bezier segment: 4 control points with one radius each.
/// Only the first and last radius reach the output records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierCurve {
    pub cps: [Vec3; 4],
    pub radii: [f32; 4],
}

impl BezierCurve {
    pub fn new(cps: [Vec3; 4], radius: f32) -> Self {
        Self {
            cps,
            radii: [radius; 4],
        }
    }

    /// Apply `scale * p + translate` to every control point
    pub fn transformed(&self, scale: Vec3, translate: Vec3) -> Self {
        Self {
            cps: self.cps.map(|p| scale * p + translate),
            radii: self.radii,
        }
    }
}

/// All Bezier control points of one strand, flattened in curve order
#[derive(Debug, Clone, PartialEq)]
pub struct Hair {
    /// Source strand index
    pub strand: usize,
    pub cps: Vec<Vec3>,
    pub radii: Vec<f32>,
    pub bounds: Bounds3,
}

impl Hair {
    pub fn from_curves(strand: usize, curves: &[BezierCurve]) -> Self {
        let cps: Vec<Vec3> = curves.iter().flat_map(|c| c.cps).collect();
        let radii: Vec<f32> = curves.iter().flat_map(|c| c.radii).collect();
        let bounds = Bounds3::from_points(cps.iter().copied());
        Self {
            strand,
            cps,
            radii,
            bounds,
        }
    }

    pub fn len(&self) -> usize {
        self.cps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cps.is_empty()
    }

    pub fn num_curves(&self) -> usize {
        self.cps.len() / 4
    }

    /// Root control point, the spatial key for clustering
    pub fn root(&self) -> Vec3 {
        self.cps[0]
    }

    pub fn tip(&self) -> Vec3 {
        self.cps[self.cps.len() - 1]
    }
}

/// Representative hair produced by averaging a group of hairs
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedHair {
    pub cps: Vec<Vec3>,
    pub radii: Vec<f32>,
    /// Strand indices of the merged hairs, pivot first
    pub members: Vec<usize>,
    pub bounds: Bounds3,
}

impl CombinedHair {
    pub fn len(&self) -> usize {
        self.cps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cps.is_empty()
    }
}

/// Flat output buffers: 12 floats and 4 radii per curve
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveBuffers {
    pub vertices: Vec<f32>,
    pub radii: Vec<f32>,
}

impl CurveBuffers {
    pub fn num_curves(&self) -> usize {
        self.radii.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    pub fn push_point(&mut self, p: Vec3, radius: f32) {
        self.vertices.extend_from_slice(&[p.x, p.y, p.z]);
        self.radii.push(radius);
    }

    pub fn push_curve(&mut self, curve: &BezierCurve) {
        for (p, r) in curve.cps.iter().zip(curve.radii) {
            self.push_point(*p, r);
        }
    }

    /// Control points of curve `i` as 12 floats
    pub fn curve_points(&self, i: usize) -> &[f32] {
        &self.vertices[12 * i..12 * i + 12]
    }

    /// First and last radius of curve `i`
    pub fn curve_widths(&self, i: usize) -> (f32, f32) {
        (self.radii[4 * i], self.radii[4 * i + 3])
    }
}
