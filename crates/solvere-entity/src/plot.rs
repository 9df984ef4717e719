//! Ribbon plots between two paths.

use glam::DVec3;
use solvere_core::{
    ColorRgb, EntityContext, MarkerShape, Operation, PipelineConfig, PlotFrame, Result, Table,
};
use solvere_transform::{ChannelSet, ChannelValues, Resampler, TriangleStrip};
use tracing::debug;

use crate::bundle::{
    validate_transparency, EntityBundle, PlotBundle, Rendering, StaticGeometry, StripColoring,
};
use crate::Assemble;

/// Transparency of the marker that runs along the second path.
pub const MARKER_TRANSPARENCY: f64 = 0.75;

/// Text shown at the start of the ribbon.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotLabel {
    pub text: String,
    pub color: ColorRgb,
}

/// A ribbon swept between two 3D paths over time.
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    tag: String,
    frames: Vec<PlotFrame>,
    color: ColorRgb,
    transparency: f64,
    rendering: Rendering,
    scale: f64,
    label: Option<PlotLabel>,
    marker: Option<ColorRgb>,
}

impl Plot {
    pub fn new(tag: impl Into<String>, frames: Vec<PlotFrame>) -> Self {
        Self {
            tag: tag.into(),
            frames,
            color: ColorRgb::WHITE,
            transparency: 0.0,
            rendering: Rendering::Solid,
            scale: 1.0,
            label: None,
            marker: None,
        }
    }

    /// Read a 7-column plot table.
    pub fn from_table(tag: impl Into<String>, table: &Table) -> Result<Self> {
        let tag = tag.into();
        let frames = PlotFrame::from_table(table).entity(&tag, Operation::ReadFrames)?;
        Ok(Self::new(tag, frames))
    }

    pub fn with_color(mut self, color: ColorRgb, transparency: f64) -> Self {
        self.color = color;
        self.transparency = transparency;
        self
    }

    pub fn with_rendering(mut self, rendering: Rendering) -> Self {
        self.rendering = rendering;
        self
    }

    /// Size of the label text; the marker radius is a quarter of it.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_label(mut self, text: impl Into<String>, color: ColorRgb) -> Self {
        self.label = Some(PlotLabel {
            text: text.into(),
            color,
        });
        self
    }

    /// Add a sphere that follows the second path.
    pub fn with_marker(mut self, color: ColorRgb) -> Self {
        self.marker = Some(color);
        self
    }

    pub fn marker_tag(&self) -> String {
        format!("{}_MKR", self.tag)
    }

    fn assemble_marker(&self, color: ColorRgb, config: &PipelineConfig) -> Result<EntityBundle> {
        let tag = self.marker_tag();
        let resampler =
            Resampler::new(self.frames.len(), config.downsample).entity(&tag, Operation::Resample)?;
        let times: Vec<f64> = self.frames.iter().map(|f| f.time).collect();
        let keys = resampler
            .time_keys(&times)
            .map_err(|e| e.in_entity(tag.as_str(), Operation::NormalizeTime))?;

        let path: Vec<DVec3> = self.frames.iter().map(|f| f.axis2).collect();
        let path = resampler.pick(&path).entity(&tag, Operation::Resample)?;
        let channels = ChannelSet::new(keys)
            .with(ChannelValues::Translation(path))
            .entity(&tag, Operation::CollectChannels)?;

        Ok(EntityBundle::new(tag, channels).with_geometry(StaticGeometry::Shapes {
            shape: MarkerShape::Sphere {
                radius: self.scale / 4.0,
            },
            positions: vec![DVec3::ZERO],
            color,
            transparency: MARKER_TRANSPARENCY,
        }))
    }
}

impl Assemble for Plot {
    type Bundle = PlotBundle;

    fn tag(&self) -> &str {
        &self.tag
    }

    fn last_time(&self) -> Option<f64> {
        self.frames.last().map(|f| f.time)
    }

    fn assemble(&self, config: &PipelineConfig) -> Result<PlotBundle> {
        config.validate().entity(&self.tag, Operation::Validate)?;
        validate_transparency(self.transparency).entity(&self.tag, Operation::Validate)?;

        let axis1: Vec<DVec3> = self.frames.iter().map(|f| f.axis1).collect();
        let axis2: Vec<DVec3> = self.frames.iter().map(|f| f.axis2).collect();
        let strip =
            TriangleStrip::from_axes(&axis1, &axis2).entity(&self.tag, Operation::BuildStrip)?;
        let anchor = strip.anchor();

        let mut plot = EntityBundle::fixed(
            self.tag.clone(),
            StaticGeometry::Strip {
                strip,
                coloring: StripColoring::Uniform {
                    color: self.color,
                    transparency: self.transparency,
                },
                rendering: self.rendering,
            },
        );
        if let (Some(label), Some(anchor)) = (&self.label, anchor) {
            plot = plot.with_geometry(StaticGeometry::Text {
                text: label.text.clone(),
                anchor,
                scale: self.scale,
                color: label.color,
            });
        }

        let marker = match self.marker {
            Some(color) => Some(self.assemble_marker(color, config)?),
            None => None,
        };

        debug!(
            tag = %self.tag,
            frames = self.frames.len(),
            marker = marker.is_some(),
            "assembled plot"
        );
        Ok(PlotBundle { plot, marker })
    }
}
