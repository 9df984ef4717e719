//! Pipeline configuration passed explicitly into every assembler.

use glam::DVec3;

use crate::errors::InputError;
use crate::types::ColorRgb;

/// How the rotation axis is scaled after the matrix-to-quaternion step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisNormalization {
    /// Divide by the true vector length, yielding a unit axis.
    #[default]
    Unit,
    /// Divide by the squared length plus `1e-12`. Only this axis scaling is
    /// carried over from earlier releases; the matrix to quaternion step is
    /// the same as for `Unit`. The axis is not unit length.
    Legacy,
}

/// Settings for the whole animation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PipelineConfig {
    /// Keep every n-th frame.
    pub downsample: usize,
    pub axis_normalization: AxisNormalization,
    /// Direction force and torque arrows point in their rest pose.
    pub reference_direction: DVec3,
    pub scene: SceneSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            downsample: 1,
            axis_normalization: AxisNormalization::default(),
            reference_direction: DVec3::Y,
            scene: SceneSettings::default(),
        }
    }
}

impl PipelineConfig {
    /// Default configuration with a different downsample stride.
    pub fn with_downsample(downsample: usize) -> Self {
        Self {
            downsample,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.downsample == 0 {
            return Err(InputError::invalid("downsample", "must be at least 1"));
        }
        if !self.reference_direction.is_finite()
            || self.reference_direction.length_squared() <= crate::types::NEGLIGIBLE
        {
            return Err(InputError::invalid(
                "reference direction",
                format!("{} is not a usable direction", self.reference_direction),
            ));
        }
        self.scene.validate()
    }
}

/// Global look of the scene and playback speed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneSettings {
    pub background: ColorRgb,
    /// Directional light, off when `None`.
    pub light_direction: Option<DVec3>,
    pub headlight: bool,
    /// Playback time per second of recorded data.
    pub time_scaling: f64,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            background: ColorRgb::BLACK,
            light_direction: None,
            headlight: true,
            time_scaling: 1.0,
        }
    }
}

impl SceneSettings {
    pub fn validate(&self) -> Result<(), InputError> {
        if !(self.time_scaling.is_finite() && self.time_scaling > 0.0) {
            return Err(InputError::invalid(
                "time scaling",
                format!("{} must be finite and positive", self.time_scaling),
            ));
        }
        Ok(())
    }
}

/// Per-entity scale factors for force/torque arrows.
///
/// Arrow length is `|F| * distance / force` (resp. `torque`).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Normalization {
    pub force: f64,
    pub torque: f64,
    pub distance: f64,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            force: 1.0,
            torque: 1.0,
            distance: 1.0,
        }
    }
}

impl Normalization {
    pub fn new(force: f64, torque: f64, distance: f64) -> Self {
        Self {
            force,
            torque,
            distance,
        }
    }

    pub fn validate(&self) -> Result<(), InputError> {
        for (name, value) in [
            ("force normalization", self.force),
            ("torque normalization", self.torque),
            ("distance normalization", self.distance),
        ] {
            if !value.is_finite() || value == 0.0 {
                return Err(InputError::invalid(
                    name,
                    format!("{value} must be finite and non-zero"),
                ));
            }
        }
        Ok(())
    }

    /// Scale factor applied to force magnitudes.
    pub fn force_factor(&self) -> f64 {
        self.distance / self.force
    }

    /// Scale factor applied to torque magnitudes.
    pub fn torque_factor(&self) -> f64 {
        self.distance / self.torque
    }
}
