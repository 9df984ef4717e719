//! Floating text that follows a path.

use glam::DVec3;
use solvere_core::{
    ColorRgb, EntityContext, LabelFrame, Operation, PipelineConfig, Result, Table,
};
use solvere_transform::{ChannelSet, ChannelValues, Resampler};
use tracing::debug;

use crate::bundle::{EntityBundle, StaticGeometry};
use crate::Assemble;

/// Billboard text moving along a path. Keys are `t / t_last`.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    tag: String,
    text: String,
    scale: f64,
    color: ColorRgb,
    frames: Vec<LabelFrame>,
}

impl Label {
    pub fn new(tag: impl Into<String>, text: impl Into<String>, frames: Vec<LabelFrame>) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
            scale: 1.0,
            color: ColorRgb::WHITE,
            frames,
        }
    }

    pub fn from_table(
        tag: impl Into<String>,
        text: impl Into<String>,
        table: &Table,
    ) -> Result<Self> {
        let tag = tag.into();
        let frames = LabelFrame::from_table(table).entity(&tag, Operation::ReadFrames)?;
        Ok(Self::new(tag, text, frames))
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_color(mut self, color: ColorRgb) -> Self {
        self.color = color;
        self
    }
}

impl Assemble for Label {
    type Bundle = EntityBundle;

    fn tag(&self) -> &str {
        &self.tag
    }

    fn last_time(&self) -> Option<f64> {
        self.frames.last().map(|f| f.time)
    }

    fn assemble(&self, config: &PipelineConfig) -> Result<EntityBundle> {
        let tag = self.tag.as_str();
        config.validate().entity(tag, Operation::Validate)?;

        let resampler =
            Resampler::new(self.frames.len(), config.downsample).entity(tag, Operation::Resample)?;
        let times: Vec<f64> = self.frames.iter().map(|f| f.time).collect();
        let keys = resampler
            .time_keys(&times)
            .map_err(|e| e.in_entity(tag, Operation::NormalizeTime))?;
        let path: Vec<DVec3> = self.frames.iter().map(|f| f.position).collect();
        let path = resampler.pick(&path).entity(tag, Operation::Resample)?;

        let channels = ChannelSet::new(keys)
            .with(ChannelValues::Translation(path))
            .entity(tag, Operation::CollectChannels)?;

        debug!(tag, keys = channels.key_count(), "assembled label");
        Ok(EntityBundle::new(tag, channels).with_geometry(StaticGeometry::Text {
            text: self.text.clone(),
            anchor: DVec3::ZERO,
            scale: self.scale,
            color: self.color,
        }))
    }
}
