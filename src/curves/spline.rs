//! Catmull-Rom to cubic Bezier conversion
//!
//! Each spline segment `p(s) -> p(s+1)` maps to 4 Bezier control points via a
//! fixed 4x4 basis-change matrix. The first and last segment of a control
//! polygon use one-sided variants whose missing neighbour is a zero phantom
//! point with zero weight.

use glam::Vec3;

type Basis = [[f32; 4]; 4];

/// Interior segments: neighbours on both sides
const CATMULL_ROM_TO_BEZIER: Basis = [
    [0.0, 1.0, 0.0, 0.0],
    [-1.0 / 6.0, 1.0, 1.0 / 6.0, 0.0],
    [0.0, 1.0 / 6.0, 1.0, -1.0 / 6.0],
    [0.0, 0.0, 1.0, 0.0],
];

/// Root segment: column 0 is the phantom before the first point
const CATMULL_ROM_TO_BEZIER_ROOT: Basis = [
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 3.0 / 6.0, 4.0 / 6.0, -1.0 / 6.0],
    [0.0, 1.0 / 6.0, 1.0, -1.0 / 6.0],
    [0.0, 0.0, 1.0, 0.0],
];

/// Tip segment: column 3 is the phantom after the last point
const CATMULL_ROM_TO_BEZIER_TIP: Basis = [
    [0.0, 1.0, 0.0, 0.0],
    [-1.0 / 6.0, 1.0, 1.0 / 6.0, 0.0],
    [-1.0 / 6.0, 4.0 / 6.0, 3.0 / 6.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
];

/// Which basis matrix a segment was converted with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Two-point polygon, no matrix
    Straight,
    Root,
    Interior,
    Tip,
}

fn mul_basis(basis: &Basis, p: [Vec3; 4]) -> [Vec3; 4] {
    basis.map(|row| row[0] * p[0] + row[1] * p[1] + row[2] * p[2] + row[3] * p[3])
}

/// Classify segment `seg_idx` of a control polygon with `num_points` points.
///
/// Returns `None` when the segment does not exist.
pub fn segment_kind(num_points: usize, seg_idx: usize) -> Option<SegmentKind> {
    match num_points {
        0 | 1 => None,
        2 => (seg_idx == 0).then_some(SegmentKind::Straight),
        n if seg_idx >= n - 2 => None,
        _ if seg_idx == 0 => Some(SegmentKind::Root),
        n if seg_idx == n - 3 => Some(SegmentKind::Tip),
        _ => Some(SegmentKind::Interior),
    }
}

/// Convert one Catmull-Rom segment into 4 cubic Bezier control points.
///
/// `cps` is the control polygon, `seg_idx` runs over `0..cps.len() - 2`
/// (or is `0` for a two-point polygon). Out-of-range requests yield `None`.
pub fn catmull_rom_to_bezier(cps: &[Vec3], seg_idx: usize) -> Option<[Vec3; 4]> {
    let s = seg_idx;
    let q = match segment_kind(cps.len(), s)? {
        SegmentKind::Straight => {
            let (p0, p1) = (cps[0], cps[1]);
            [
                p0,
                p0 * (2.0 / 3.0) + p1 * (1.0 / 3.0),
                p0 * (1.0 / 3.0) + p1 * (2.0 / 3.0),
                p1,
            ]
        }
        SegmentKind::Root => mul_basis(
            &CATMULL_ROM_TO_BEZIER_ROOT,
            [Vec3::ZERO, cps[s], cps[s + 1], cps[s + 2]],
        ),
        SegmentKind::Tip => mul_basis(
            &CATMULL_ROM_TO_BEZIER_TIP,
            [cps[s - 1], cps[s], cps[s + 1], Vec3::ZERO],
        ),
        SegmentKind::Interior => mul_basis(
            &CATMULL_ROM_TO_BEZIER,
            [cps[s - 1], cps[s], cps[s + 1], cps[s + 2]],
        ),
    };
    Some(q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-4);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-4);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-4);
    }

    #[test]
    fn test_rows_sum_to_one() {
        for basis in [
            &CATMULL_ROM_TO_BEZIER,
            &CATMULL_ROM_TO_BEZIER_ROOT,
            &CATMULL_ROM_TO_BEZIER_TIP,
        ] {
            for row in basis {
                assert_relative_eq!(row.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_straight_segment_thirds() {
        let p0 = Vec3::new(0.0, 0.0, 0.0);
        let p1 = Vec3::new(3.0, 6.0, -9.0);
        let q = catmull_rom_to_bezier(&[p0, p1], 0).unwrap();
        assert_vec_eq(q[0], p0);
        assert_vec_eq(q[1], p0 + (p1 - p0) / 3.0);
        assert_vec_eq(q[2], p0 + 2.0 * (p1 - p0) / 3.0);
        assert_vec_eq(q[3], p1);
        assert!(catmull_rom_to_bezier(&[p0, p1], 1).is_none());
    }

    #[test]
    fn test_segment_kinds() {
        assert_eq!(segment_kind(1, 0), None);
        assert_eq!(segment_kind(3, 0), Some(SegmentKind::Root));
        assert_eq!(segment_kind(3, 1), None);
        assert_eq!(segment_kind(5, 0), Some(SegmentKind::Root));
        assert_eq!(segment_kind(5, 1), Some(SegmentKind::Interior));
        assert_eq!(segment_kind(5, 2), Some(SegmentKind::Tip));
        assert_eq!(segment_kind(5, 3), None);
    }

    #[test]
    fn test_empty_polygon_produces_nothing() {
        assert!(catmull_rom_to_bezier(&[], 0).is_none());
        assert!(catmull_rom_to_bezier(&[Vec3::ONE], 0).is_none());
    }

    #[test]
    fn test_interior_segment_interpolates_endpoints() {
        let cps: Vec<Vec3> = (0..6).map(|i| Vec3::new(i as f32, (i * i) as f32, 0.0)).collect();
        let q = catmull_rom_to_bezier(&cps, 2).unwrap();
        assert_vec_eq(q[0], cps[2]);
        assert_vec_eq(q[3], cps[3]);
        assert_vec_eq(q[1], cps[2] + (cps[3] - cps[1]) / 6.0);
        assert_vec_eq(q[2], cps[3] - (cps[4] - cps[2]) / 6.0);
    }

    #[test]
    fn test_adjacent_segments_are_c1() {
        let cps: Vec<Vec3> = (0..7)
            .map(|i| Vec3::new(i as f32, (i as f32).sin(), (i as f32 * 0.5).cos()))
            .collect();
        for s in 0..cps.len() - 3 {
            let a = catmull_rom_to_bezier(&cps, s).unwrap();
            let b = catmull_rom_to_bezier(&cps, s + 1).unwrap();
            assert_vec_eq(a[3], b[0]);
            // Outgoing and incoming tangents match across the joint
            assert_vec_eq(a[3] - a[2], b[1] - b[0]);
        }
    }

    #[test]
    fn test_boundary_phantoms_have_no_weight() {
        let cps = [
            Vec3::new(10.0, 10.0, 10.0),
            Vec3::new(11.0, 12.0, 10.0),
            Vec3::new(13.0, 12.0, 11.0),
            Vec3::new(14.0, 15.0, 9.0),
        ];
        let root = catmull_rom_to_bezier(&cps, 0).unwrap();
        assert_vec_eq(root[0], cps[0]);
        assert_vec_eq(root[1], 0.5 * cps[0] + (4.0 / 6.0) * cps[1] - cps[2] / 6.0);
        assert_vec_eq(root[3], cps[1]);

        let tip = catmull_rom_to_bezier(&cps, 1).unwrap();
        assert_vec_eq(tip[0], cps[1]);
        assert_vec_eq(tip[2], -cps[0] / 6.0 + (4.0 / 6.0) * cps[1] + 0.5 * cps[2]);
        assert_vec_eq(tip[3], cps[2]);
    }
}
