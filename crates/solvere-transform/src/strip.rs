//! Ribbons of triangles swept between two paths.

use glam::DVec3;
use solvere_core::TransformError;

/// Vertices per strip frame: two triangles.
pub const VERTICES_PER_FRAME: usize = 6;

/// A ribbon connecting two paths, one quad per pair of consecutive samples.
///
/// Frame `i` covers the quad between samples `i - 1` and `i` as the
/// triangles `(prev1, prev2, curr2)` and `(prev1, curr2, curr1)`, so every
/// triangle in the strip shares one winding. Frame 0 repeats frame 1, which
/// keeps the frame count equal to the sample count.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriangleStrip {
    frames: Vec<[DVec3; VERTICES_PER_FRAME]>,
}

impl TriangleStrip {
    /// Build a strip between two paths of equal length.
    pub fn from_axes(axis1: &[DVec3], axis2: &[DVec3]) -> Result<Self, TransformError> {
        if axis1.len() != axis2.len() {
            return Err(TransformError::LengthMismatch {
                expected: axis1.len(),
                found: axis2.len(),
            });
        }

        let n = axis1.len();
        let mut frames = Vec::with_capacity(n);
        match n {
            0 => {}
            1 => frames.push(quad(axis1[0], axis2[0], axis1[0], axis2[0])),
            _ => {
                let first = quad(axis1[0], axis2[0], axis1[1], axis2[1]);
                frames.push(first);
                frames.push(first);
                for i in 2..n {
                    frames.push(quad(axis1[i - 1], axis2[i - 1], axis1[i], axis2[i]));
                }
            }
        }

        Ok(Self { frames })
    }

    /// Build a strip between a path and the same path pulled back along a
    /// vector.
    ///
    /// The second path is `position - direction * magnitude / |direction|`.
    /// A zero direction leaves the point in place.
    pub fn from_vectors(
        positions: &[DVec3],
        directions: &[DVec3],
        magnitudes: &[f64],
    ) -> Result<Self, TransformError> {
        for len in [directions.len(), magnitudes.len()] {
            if len != positions.len() {
                return Err(TransformError::LengthMismatch {
                    expected: positions.len(),
                    found: len,
                });
            }
        }

        let tips: Vec<DVec3> = positions
            .iter()
            .zip(directions)
            .zip(magnitudes)
            .map(|((p, d), m)| *p - *d / (d.length() + f64::MIN_POSITIVE) * *m)
            .collect();

        Self::from_axes(positions, &tips)
    }

    pub fn frames(&self) -> &[[DVec3; VERTICES_PER_FRAME]] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// All vertices in emission order.
    pub fn vertices(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.frames.iter().flatten().copied()
    }

    pub fn vertex_count(&self) -> usize {
        self.frames.len() * VERTICES_PER_FRAME
    }

    /// Each triangle as its own vertex triple.
    pub fn triangles(&self) -> impl Iterator<Item = [DVec3; 3]> + '_ {
        self.frames
            .iter()
            .flat_map(|f| [[f[0], f[1], f[2]], [f[3], f[4], f[5]]])
    }

    /// First vertex of the strip, if any.
    pub fn anchor(&self) -> Option<DVec3> {
        self.frames.first().map(|f| f[0])
    }
}

fn quad(prev1: DVec3, prev2: DVec3, curr1: DVec3, curr2: DVec3) -> [DVec3; VERTICES_PER_FRAME] {
    [prev1, prev2, curr2, prev1, curr2, curr1]
}
