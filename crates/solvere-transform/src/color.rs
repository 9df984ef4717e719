//! Map vector directions to colors.
//!
//! Each signed axis direction owns a base color. A vector is split into six
//! non-negative components, one per signed axis, and the base colors are
//! blended by those weights.

use glam::DVec3;
use solvere_core::{ColorRgb, NEGLIGIBLE};

/// Base colors for +X, +Y, +Z, -X, -Y, -Z.
pub const DIRECTION_BASIS: [ColorRgb; 6] = [
    ColorRgb::RED,
    ColorRgb::YELLOW,
    ColorRgb::BLUE,
    ColorRgb::GREEN,
    ColorRgb::MAGENTA,
    ColorRgb::CYAN,
];

/// Weights of `v` along the six signed axes, normalized to unit length.
fn basis_weights(v: DVec3) -> [f64; 6] {
    let pos = v.max(DVec3::ZERO);
    let neg = (-v).max(DVec3::ZERO);
    // |(pos, neg)| == |v| since each axis contributes to only one side
    let len = v.length();
    [pos.x, pos.y, pos.z, neg.x, neg.y, neg.z].map(|w| w / len)
}

/// Color for a single direction.
///
/// The blend is rescaled so its brightest channel is exactly 1. Vectors
/// with a negligible length map to black.
pub fn map_direction(v: DVec3) -> ColorRgb {
    let len_sq = v.length_squared();
    if len_sq.is_nan() || len_sq <= NEGLIGIBLE {
        return ColorRgb::BLACK;
    }

    let blend = basis_weights(v)
        .iter()
        .zip(DIRECTION_BASIS)
        .fold(ColorRgb::BLACK, |acc, (w, base)| acc + base.scaled(*w));

    let max = blend.max_channel();
    if max > 0.0 {
        blend.scaled(1.0 / max)
    } else {
        ColorRgb::BLACK
    }
}

pub fn map_directions(vectors: &[DVec3]) -> Vec<ColorRgb> {
    vectors.iter().copied().map(map_direction).collect()
}
