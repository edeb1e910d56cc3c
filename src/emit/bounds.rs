//! Scene bounds over emitted curve buffers

use serde::Serialize;

use crate::curves::CurveBuffers;

/// Axis-aligned scene bounds in double precision, padded by curve radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneBounds {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Default for SceneBounds {
    fn default() -> Self {
        Self {
            min: [1e30; 3],
            max: [-1e30; 3],
        }
    }
}

impl SceneBounds {
    /// Union of every control point grown by its own radius
    pub fn from_buffers(buffers: &CurveBuffers) -> Self {
        let mut bounds = Self::default();
        for (p, &r) in buffers.vertices.chunks_exact(3).zip(&buffers.radii) {
            let r = r as f64;
            for c in 0..3 {
                let v = p[c] as f64;
                bounds.min[c] = bounds.min[c].min(v - r);
                bounds.max[c] = bounds.max[c].max(v + r);
            }
        }
        bounds
    }

    pub fn is_empty(&self) -> bool {
        (0..3).any(|c| self.min[c] > self.max[c])
    }
}
