//! Stick figures drawn as one polyline per recorded pose.

use solvere_core::{ColorRgb, EntityContext, Operation, PipelineConfig, Result, StickFrame, Table};
use tracing::debug;

use crate::bundle::{EntityBundle, StaticGeometry};
use crate::Assemble;

/// Every pose of a figure rendered at once, like a long exposure.
///
/// Poses are not downsampled.
#[derive(Debug, Clone, PartialEq)]
pub struct StickFigure {
    tag: String,
    frames: Vec<StickFrame>,
    color: ColorRgb,
}

impl StickFigure {
    pub fn new(tag: impl Into<String>, frames: Vec<StickFrame>, color: ColorRgb) -> Self {
        Self {
            tag: tag.into(),
            frames,
            color,
        }
    }

    pub fn from_table(tag: impl Into<String>, table: &Table, color: ColorRgb) -> Result<Self> {
        let tag = tag.into();
        let frames = StickFrame::from_table(table).entity(&tag, Operation::ReadFrames)?;
        Ok(Self::new(tag, frames, color))
    }
}

impl Assemble for StickFigure {
    type Bundle = EntityBundle;

    fn tag(&self) -> &str {
        &self.tag
    }

    fn last_time(&self) -> Option<f64> {
        self.frames.last().map(|f| f.time)
    }

    fn assemble(&self, _config: &PipelineConfig) -> Result<EntityBundle> {
        let lines = self
            .frames
            .iter()
            .map(|f| f.vertices.to_vec())
            .collect();

        debug!(tag = %self.tag, poses = self.frames.len(), "assembled stick figure");
        Ok(EntityBundle::fixed(
            self.tag.clone(),
            StaticGeometry::Polylines {
                lines,
                color: self.color,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_one_polyline_per_pose() {
        let table = Table::from_rows([
            [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            [0.1, 0.1, 0.0, 0.0, 0.1, 1.0, 0.0],
            [0.2, 0.2, 0.0, 0.0, 0.2, 1.0, 0.0],
        ])
        .unwrap();
        let bundle = StickFigure::from_table("leg", &table, ColorRgb::WHITE)
            .unwrap()
            .assemble(&PipelineConfig::with_downsample(3))
            .unwrap();

        let StaticGeometry::Polylines { lines, color } = &bundle.geometry[0] else {
            panic!("expected polylines");
        };
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.len() == 2));
        assert_eq!(lines[2][1], DVec3::new(0.2, 1.0, 0.0));
        assert_eq!(*color, ColorRgb::WHITE);
        assert!(!bundle.is_animated());
    }
}
