//! Static marker sets.

use glam::DVec3;
use solvere_core::{
    marker_positions, ColorRgb, EntityContext, MarkerShape, Operation, PipelineConfig, Result,
    Table,
};
use tracing::debug;

use crate::bundle::{validate_transparency, EntityBundle, StaticGeometry};
use crate::Assemble;

/// A set of identical shapes placed at fixed positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Markers {
    tag: String,
    shape: MarkerShape,
    positions: Vec<DVec3>,
    color: ColorRgb,
    transparency: f64,
}

impl Markers {
    pub fn new(tag: impl Into<String>, shape: MarkerShape, positions: Vec<DVec3>) -> Self {
        Self {
            tag: tag.into(),
            shape,
            positions,
            color: ColorRgb::WHITE,
            transparency: 0.0,
        }
    }

    /// Read marker positions from a 3-column table.
    pub fn from_table(tag: impl Into<String>, shape: MarkerShape, table: &Table) -> Result<Self> {
        let tag = tag.into();
        let positions = marker_positions(table).entity(&tag, Operation::ReadFrames)?;
        Ok(Self::new(tag, shape, positions))
    }

    pub fn with_color(mut self, color: ColorRgb) -> Self {
        self.color = color;
        self
    }

    pub fn with_transparency(mut self, transparency: f64) -> Self {
        self.transparency = transparency;
        self
    }
}

impl Assemble for Markers {
    type Bundle = EntityBundle;

    fn tag(&self) -> &str {
        &self.tag
    }

    fn assemble(&self, _config: &PipelineConfig) -> Result<EntityBundle> {
        self.shape.validate().entity(&self.tag, Operation::Validate)?;
        validate_transparency(self.transparency).entity(&self.tag, Operation::Validate)?;

        debug!(
            tag = %self.tag,
            shape = self.shape.name(),
            count = self.positions.len(),
            "assembled markers"
        );
        Ok(EntityBundle::fixed(
            self.tag.clone(),
            StaticGeometry::Shapes {
                shape: self.shape,
                positions: self.positions.clone(),
                color: self.color,
                transparency: self.transparency,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_are_static() {
        let table = Table::from_rows([[0.0, 0.0, 0.0], [1.0, 0.5, 0.0]]).unwrap();
        let shape = MarkerShape::from_code(1, [0.02, 0.1, 0.0]).unwrap();
        let bundle = Markers::from_table("floor", shape, &table)
            .unwrap()
            .with_color(ColorRgb::BLUE)
            .assemble(&PipelineConfig::with_downsample(5))
            .unwrap();

        assert!(!bundle.is_animated());
        let StaticGeometry::Shapes {
            shape,
            positions,
            color,
            ..
        } = &bundle.geometry[0]
        else {
            panic!("expected shapes");
        };
        assert_eq!(shape.name(), "cylinder");
        assert_eq!(positions.len(), 2);
        assert_eq!(*color, ColorRgb::BLUE);
    }

    #[test]
    fn test_negative_size_rejected() {
        let markers = Markers::new("m", MarkerShape::Sphere { radius: -0.1 }, vec![DVec3::ZERO]);
        assert!(markers.assemble(&PipelineConfig::default()).is_err());
    }

    #[test]
    fn test_transparency_range() {
        let markers = Markers::new("m", MarkerShape::Sphere { radius: 0.1 }, vec![DVec3::ZERO])
            .with_transparency(-0.2);
        assert!(markers.assemble(&PipelineConfig::default()).is_err());
    }
}
