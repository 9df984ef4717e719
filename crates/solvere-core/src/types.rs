//! Value types shared by the transform primitives and the assemblers.

use glam::DVec3;

use crate::errors::InputError;

/// Squared magnitudes at or below this are treated as zero.
pub const NEGLIGIBLE: f64 = f64::MIN_POSITIVE * 100.0;

/// A rotation as a rotation axis plus an angle in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisAngle {
    pub axis: DVec3,
    pub angle: f64,
}

impl AxisAngle {
    /// The fallback orientation: no rotation about +Z.
    pub const IDENTITY: Self = Self {
        axis: DVec3::Z,
        angle: 0.0,
    };

    pub const fn new(axis: DVec3, angle: f64) -> Self {
        Self { axis, angle }
    }

    /// Components as `[x, y, z, angle]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.axis.x, self.axis.y, self.axis.z, self.angle]
    }
}

impl Default for AxisAngle {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// An RGB color with components nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl ColorRgb {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0);
    pub const MAGENTA: Self = Self::new(1.0, 0.0, 1.0);
    pub const CYAN: Self = Self::new(0.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn from_array([r, g, b]: [f64; 3]) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// The largest of the three channels.
    pub fn max_channel(&self) -> f64 {
        self.r.max(self.g).max(self.b)
    }

    /// Scale every channel by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }
}

impl std::ops::Add for ColorRgb {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

/// Shape of a static marker, with its size parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkerShape {
    Sphere { radius: f64 },
    Cylinder { radius: f64, height: f64 },
    Box { size: DVec3 },
    Cone { radius: f64, height: f64 },
}

impl MarkerShape {
    /// Build a shape from a legacy integer code and a 3-element size array.
    ///
    /// Codes: 0 = sphere (radius), 1 = cylinder (radius, height),
    /// 2 = box (x, y, z extents), 3 = cone (radius, height).
    pub fn from_code(code: i32, size: [f64; 3]) -> Result<Self, InputError> {
        let shape = match code {
            0 => MarkerShape::Sphere { radius: size[0] },
            1 => MarkerShape::Cylinder {
                radius: size[0],
                height: size[1],
            },
            2 => MarkerShape::Box {
                size: DVec3::from_array(size),
            },
            3 => MarkerShape::Cone {
                radius: size[0],
                height: size[1],
            },
            other => {
                return Err(InputError::invalid(
                    "marker shape",
                    format!("unknown shape code {other}"),
                ))
            }
        };
        shape.validate()?;
        Ok(shape)
    }

    /// Check that every size parameter is finite and non-negative.
    pub fn validate(&self) -> Result<(), InputError> {
        let params = self.size_array();
        if params.iter().all(|p| p.is_finite() && *p >= 0.0) {
            Ok(())
        } else {
            Err(InputError::invalid(
                "marker size",
                format!("{params:?} must be finite and non-negative"),
            ))
        }
    }

    /// Size parameters in legacy order, unused slots zero.
    pub fn size_array(&self) -> [f64; 3] {
        match *self {
            MarkerShape::Sphere { radius } => [radius, 0.0, 0.0],
            MarkerShape::Cylinder { radius, height } | MarkerShape::Cone { radius, height } => {
                [radius, height, 0.0]
            }
            MarkerShape::Box { size } => size.to_array(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MarkerShape::Sphere { .. } => "sphere",
            MarkerShape::Cylinder { .. } => "cylinder",
            MarkerShape::Box { .. } => "box",
            MarkerShape::Cone { .. } => "cone",
        }
    }
}
