//! Numeric primitives of the Solvere pipeline.
//!
//! - [`rotation`]: rotation matrices to quaternions to axis-angle
//! - [`color`]: vector directions to RGB
//! - [`strip`]: triangle ribbons between two paths
//! - [`resample`]: downsampling with shared keys
//! - [`channel`]: typed channels aligned on those keys
//!
//! Nothing in this crate logs; degenerate input yields defined fallback
//! values and contract violations return [`solvere_core::TransformError`].

pub mod channel;
pub mod color;
pub mod resample;
pub mod rotation;
pub mod strip;

pub use channel::{ChannelKind, ChannelSet, ChannelValues};
pub use color::{map_direction, map_directions};
pub use resample::Resampler;
pub use rotation::{
    matrix_to_quaternion, quaternion_to_axis_angle, to_axis_angles, to_orientations,
    to_quaternions, vector_to_axis_angle,
};
pub use strip::TriangleStrip;
