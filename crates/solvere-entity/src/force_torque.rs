//! Force and torque arrows with optional history trails.
//!
//! One input table drives two arrows that share positions and keys. Each
//! arrow is oriented from the configured reference direction to its vector,
//! scaled by its normalized magnitude and colored by its direction. A side
//! whose magnitude never exceeds zero produces nothing.

use glam::DVec3;
use solvere_core::{
    ColorRgb, EntityContext, ForceTorqueFrame, InputError, Normalization, Operation,
    PipelineConfig, Result, Table,
};
use solvere_transform::{
    map_directions, to_axis_angles, ChannelSet, ChannelValues, Resampler, TriangleStrip,
    strip::VERTICES_PER_FRAME,
};
use tracing::debug;

use crate::bundle::{
    validate_transparency, EntityBundle, ForceTorqueBundle, Rendering, StaticGeometry,
    StripColoring,
};
use crate::template;
use crate::Assemble;

/// Keyword replaced by the entity tag in force arrow templates.
pub const FORCE_KEYWORD: &str = "force";
/// Keyword replaced by the entity tag in torque arrow templates.
pub const TORQUE_KEYWORD: &str = "torque";

/// Coloring of a history trail.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TrailColoring {
    /// Each frame takes the color of its vector direction.
    #[default]
    Directional,
    Uniform { color: ColorRgb, transparency: f64 },
}

/// How to draw the history of one vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrailStyle {
    pub rendering: Rendering,
    pub coloring: TrailColoring,
}

impl TrailStyle {
    pub fn validate(&self) -> std::result::Result<(), InputError> {
        if let TrailColoring::Uniform { transparency, .. } = self.coloring {
            validate_transparency(transparency)?;
        }
        Ok(())
    }
}

/// Force and torque applied at a moving point.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceTorque {
    tag: String,
    frames: Vec<ForceTorqueFrame>,
    normalization: Normalization,
    force_trail: Option<TrailStyle>,
    torque_trail: Option<TrailStyle>,
    force_template: Option<Vec<String>>,
    torque_template: Option<Vec<String>>,
}

impl ForceTorque {
    pub fn new(tag: impl Into<String>, frames: Vec<ForceTorqueFrame>) -> Self {
        Self {
            tag: tag.into(),
            frames,
            normalization: Normalization::default(),
            force_trail: None,
            torque_trail: None,
            force_template: None,
            torque_template: None,
        }
    }

    /// Read a 10-column force/torque table.
    pub fn from_table(tag: impl Into<String>, table: &Table) -> Result<Self> {
        let tag = tag.into();
        let frames = ForceTorqueFrame::from_table(table).entity(&tag, Operation::ReadFrames)?;
        Ok(Self::new(tag, frames))
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn with_force_trail(mut self, style: TrailStyle) -> Self {
        self.force_trail = Some(style);
        self
    }

    pub fn with_torque_trail(mut self, style: TrailStyle) -> Self {
        self.torque_trail = Some(style);
        self
    }

    /// Arrow templates; their `force` / `torque` keywords are retagged.
    pub fn with_templates(mut self, force: Vec<String>, torque: Vec<String>) -> Self {
        self.force_template = Some(force);
        self.torque_template = Some(torque);
        self
    }

    pub fn force_tag(&self) -> String {
        format!("{}_F", self.tag)
    }

    pub fn torque_tag(&self) -> String {
        format!("{}_T", self.tag)
    }

    fn validate(&self, config: &PipelineConfig) -> std::result::Result<(), InputError> {
        config.validate()?;
        self.normalization.validate()?;
        for style in [&self.force_trail, &self.torque_trail].into_iter().flatten() {
            style.validate()?;
        }
        Ok(())
    }
}

/// Per-vector inputs shared by the force and torque sides.
struct Side<'a> {
    tag: String,
    keyword: &'static str,
    factor: f64,
    trail: Option<&'a TrailStyle>,
    template: Option<&'a [String]>,
}

/// Result of assembling one side.
struct SideBundles {
    max: f64,
    arrow: Option<EntityBundle>,
    trail: Option<EntityBundle>,
}

impl ForceTorque {
    fn assemble_side(
        &self,
        side: Side<'_>,
        keys: &[f64],
        positions: &[DVec3],
        vectors: &[DVec3],
        config: &PipelineConfig,
    ) -> Result<SideBundles> {
        let magnitudes: Vec<f64> = vectors
            .iter()
            .map(|v| {
                let m = v.length();
                if m.is_nan() {
                    0.0
                } else {
                    m
                }
            })
            .collect();
        let max = magnitudes.iter().copied().fold(0.0, f64::max);
        if max <= 0.0 {
            debug!(tag = %side.tag, "zero magnitude, omitting channels");
            return Ok(SideBundles {
                max,
                arrow: None,
                trail: None,
            });
        }

        let scaled: Vec<f64> = magnitudes.iter().map(|m| m * side.factor).collect();
        let colors = map_directions(vectors);

        let mut channels = ChannelSet::new(keys.to_vec());
        for values in [
            ChannelValues::Translation(positions.to_vec()),
            ChannelValues::Orientation(to_axis_angles(vectors, config.reference_direction)),
            ChannelValues::Scale(scaled.iter().map(|m| DVec3::splat(*m)).collect()),
            ChannelValues::Color(colors.clone()),
        ] {
            channels
                .insert(values)
                .entity(&side.tag, Operation::CollectChannels)?;
        }

        let mut arrow = EntityBundle::new(side.tag.clone(), channels);
        if let Some(lines) = side.template {
            let lines = template::retag_arrow(lines, side.keyword, &side.tag)
                .entity(&side.tag, Operation::RewriteTemplate)?;
            arrow = arrow.with_geometry(StaticGeometry::Template(lines));
        }

        let trail = match side.trail {
            Some(style) => {
                let trail_tag = format!("{}_P", side.tag);
                let strip = TriangleStrip::from_vectors(positions, vectors, &scaled)
                    .entity(&trail_tag, Operation::BuildStrip)?;
                let coloring = match style.coloring {
                    TrailColoring::Directional => StripColoring::PerVertex(
                        colors
                            .iter()
                            .flat_map(|c| std::iter::repeat(*c).take(VERTICES_PER_FRAME))
                            .collect(),
                    ),
                    TrailColoring::Uniform {
                        color,
                        transparency,
                    } => StripColoring::Uniform {
                        color,
                        transparency,
                    },
                };
                Some(EntityBundle::fixed(
                    trail_tag,
                    StaticGeometry::Strip {
                        strip,
                        coloring,
                        rendering: style.rendering,
                    },
                ))
            }
            None => None,
        };

        debug!(
            tag = %side.tag,
            keys = keys.len(),
            max,
            trail = trail.is_some(),
            "assembled vector arrow"
        );
        Ok(SideBundles {
            max,
            arrow: Some(arrow),
            trail,
        })
    }
}

impl Assemble for ForceTorque {
    type Bundle = ForceTorqueBundle;

    fn tag(&self) -> &str {
        &self.tag
    }

    fn last_time(&self) -> Option<f64> {
        self.frames.last().map(|f| f.time)
    }

    fn assemble(&self, config: &PipelineConfig) -> Result<ForceTorqueBundle> {
        let tag = self.tag.as_str();
        self.validate(config).entity(tag, Operation::Validate)?;

        let resampler =
            Resampler::new(self.frames.len(), config.downsample).entity(tag, Operation::Resample)?;
        let frames = resampler
            .pick(&self.frames)
            .entity(tag, Operation::Resample)?;
        let keys = resampler.keys();

        let positions: Vec<DVec3> = frames.iter().map(|f| f.position).collect();
        let forces: Vec<DVec3> = frames.iter().map(|f| f.force).collect();
        let torques: Vec<DVec3> = frames.iter().map(|f| f.torque).collect();

        let force = self.assemble_side(
            Side {
                tag: self.force_tag(),
                keyword: FORCE_KEYWORD,
                factor: self.normalization.force_factor(),
                trail: self.force_trail.as_ref(),
                template: self.force_template.as_deref(),
            },
            &keys,
            &positions,
            &forces,
            config,
        )?;
        let torque = self.assemble_side(
            Side {
                tag: self.torque_tag(),
                keyword: TORQUE_KEYWORD,
                factor: self.normalization.torque_factor(),
                trail: self.torque_trail.as_ref(),
                template: self.torque_template.as_deref(),
            },
            &keys,
            &positions,
            &torques,
            config,
        )?;

        Ok(ForceTorqueBundle {
            max_force: force.max,
            max_torque: torque.max,
            force: force.arrow,
            torque: torque.arrow,
            force_trail: force.trail,
            torque_trail: torque.trail,
        })
    }
}
