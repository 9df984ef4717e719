//! Entity bundles: what an assembler hands to the templater.

use glam::DVec3;
use solvere_core::{ColorRgb, InputError, MarkerShape};
use solvere_transform::{ChannelSet, TriangleStrip};

/// Solid faces or edges only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rendering {
    #[default]
    Solid,
    Wireframe,
}

/// Transparency must lie in `[0, 1]`.
pub(crate) fn validate_transparency(value: f64) -> Result<(), InputError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(InputError::invalid(
            "transparency",
            format!("{value} is outside [0, 1]"),
        ))
    }
}

/// How a triangle strip is colored.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StripColoring {
    /// One color per strip vertex.
    PerVertex(Vec<ColorRgb>),
    Uniform { color: ColorRgb, transparency: f64 },
}

/// Geometry that does not change over time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StaticGeometry {
    /// Lines of a rewritten geometry template, ready to splice.
    Template(Vec<String>),
    Strip {
        strip: TriangleStrip,
        coloring: StripColoring,
        rendering: Rendering,
    },
    /// One open polyline per entry.
    Polylines {
        lines: Vec<Vec<DVec3>>,
        color: ColorRgb,
    },
    /// Identical shape instances at fixed positions.
    Shapes {
        shape: MarkerShape,
        positions: Vec<DVec3>,
        color: ColorRgb,
        transparency: f64,
    },
    /// Billboard text.
    Text {
        text: String,
        anchor: DVec3,
        scale: f64,
        color: ColorRgb,
    },
    Viewpoint { description: String },
}

impl StaticGeometry {
    pub fn kind(&self) -> &'static str {
        match self {
            StaticGeometry::Template(_) => "template",
            StaticGeometry::Strip { .. } => "strip",
            StaticGeometry::Polylines { .. } => "polylines",
            StaticGeometry::Shapes { .. } => "shapes",
            StaticGeometry::Text { .. } => "text",
            StaticGeometry::Viewpoint { .. } => "viewpoint",
        }
    }
}

/// Channels plus static geometry for one scene element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityBundle {
    pub tag: String,
    pub channels: ChannelSet,
    pub geometry: Vec<StaticGeometry>,
}

impl EntityBundle {
    pub fn new(tag: impl Into<String>, channels: ChannelSet) -> Self {
        Self {
            tag: tag.into(),
            channels,
            geometry: Vec::new(),
        }
    }

    /// A bundle with geometry only.
    pub fn fixed(tag: impl Into<String>, geometry: StaticGeometry) -> Self {
        Self {
            tag: tag.into(),
            channels: ChannelSet::default(),
            geometry: vec![geometry],
        }
    }

    pub fn with_geometry(mut self, geometry: StaticGeometry) -> Self {
        self.geometry.push(geometry);
        self
    }

    /// True when the bundle has animated channels.
    pub fn is_animated(&self) -> bool {
        !self.channels.is_empty()
    }
}

/// Output of a force/torque assembler.
///
/// A side whose maximum magnitude is zero is omitted entirely, trail
/// included.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForceTorqueBundle {
    pub max_force: f64,
    pub max_torque: f64,
    pub force: Option<EntityBundle>,
    pub torque: Option<EntityBundle>,
    pub force_trail: Option<EntityBundle>,
    pub torque_trail: Option<EntityBundle>,
}

impl ForceTorqueBundle {
    /// Every populated bundle, force side first.
    pub fn bundles(&self) -> impl Iterator<Item = &EntityBundle> {
        [
            &self.force,
            &self.force_trail,
            &self.torque,
            &self.torque_trail,
        ]
        .into_iter()
        .flatten()
    }
}

/// Output of a plot assembler: the ribbon plus its optional marker.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlotBundle {
    pub plot: EntityBundle,
    pub marker: Option<EntityBundle>,
}

impl PlotBundle {
    pub fn bundles(&self) -> impl Iterator<Item = &EntityBundle> {
        std::iter::once(&self.plot).chain(self.marker.as_ref())
    }
}
