//! Rigid bodies and the camera path.

use glam::{DMat3, DVec3};
use solvere_core::{BodyFrame, EntityContext, Operation, PipelineConfig, Result, Table};
use solvere_transform::{to_orientations, ChannelSet, ChannelValues, Resampler};
use tracing::debug;

use crate::bundle::{EntityBundle, StaticGeometry};
use crate::template;
use crate::Assemble;

/// A geometry template plus the lines its `$N$` tags refer to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BodyTemplate {
    pub lines: Vec<String>,
    pub substitutions: Vec<String>,
}

impl BodyTemplate {
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            substitutions: Vec::new(),
        }
    }

    pub fn with_substitutions(mut self, substitutions: Vec<String>) -> Self {
        self.substitutions = substitutions;
        self
    }
}

/// A rigid body moving through space.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    tag: String,
    frames: Vec<BodyFrame>,
    template: Option<BodyTemplate>,
}

impl Body {
    pub fn new(tag: impl Into<String>, frames: Vec<BodyFrame>) -> Self {
        Self {
            tag: tag.into(),
            frames,
            template: None,
        }
    }

    /// Read a 13-column body table.
    pub fn from_table(tag: impl Into<String>, table: &Table) -> Result<Self> {
        let tag = tag.into();
        let frames = BodyFrame::from_table(table).entity(&tag, Operation::ReadFrames)?;
        Ok(Self::new(tag, frames))
    }

    pub fn with_template(mut self, template: BodyTemplate) -> Self {
        self.template = Some(template);
        self
    }

    pub fn frames(&self) -> &[BodyFrame] {
        &self.frames
    }
}

impl Assemble for Body {
    type Bundle = EntityBundle;

    fn tag(&self) -> &str {
        &self.tag
    }

    fn last_time(&self) -> Option<f64> {
        self.frames.last().map(|f| f.time)
    }

    fn assemble(&self, config: &PipelineConfig) -> Result<EntityBundle> {
        let channels = pose_channels(&self.tag, &self.frames, config)?;
        let mut bundle = EntityBundle::new(self.tag.clone(), channels);

        if let Some(t) = &self.template {
            let lines = template::rewrite_body(&t.lines, &self.tag, &t.substitutions)
                .entity(&self.tag, Operation::RewriteTemplate)?;
            bundle = bundle.with_geometry(StaticGeometry::Template(lines));
        }

        debug!(
            tag = %self.tag,
            keys = bundle.channels.key_count(),
            "assembled body"
        );
        Ok(bundle)
    }
}

/// The viewer's path through the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    tag: String,
    description: String,
    frames: Vec<BodyFrame>,
}

impl Camera {
    pub fn new(tag: impl Into<String>, frames: Vec<BodyFrame>) -> Self {
        let tag = tag.into();
        Self {
            description: tag.clone(),
            tag,
            frames,
        }
    }

    pub fn from_table(tag: impl Into<String>, table: &Table) -> Result<Self> {
        let tag = tag.into();
        let frames = BodyFrame::from_table(table).entity(&tag, Operation::ReadFrames)?;
        Ok(Self::new(tag, frames))
    }

    /// Name shown in the viewer's viewpoint list.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Assemble for Camera {
    type Bundle = EntityBundle;

    fn tag(&self) -> &str {
        &self.tag
    }

    fn last_time(&self) -> Option<f64> {
        self.frames.last().map(|f| f.time)
    }

    fn assemble(&self, config: &PipelineConfig) -> Result<EntityBundle> {
        let channels = pose_channels(&self.tag, &self.frames, config)?;
        debug!(tag = %self.tag, keys = channels.key_count(), "assembled camera");

        Ok(EntityBundle::new(self.tag.clone(), channels).with_geometry(
            StaticGeometry::Viewpoint {
                description: self.description.clone(),
            },
        ))
    }
}

/// Downsampled translation and orientation channels of a pose path.
fn pose_channels(tag: &str, frames: &[BodyFrame], config: &PipelineConfig) -> Result<ChannelSet> {
    config.validate().entity(tag, Operation::Validate)?;
    let resampler =
        Resampler::new(frames.len(), config.downsample).entity(tag, Operation::Resample)?;
    let mut channels = ChannelSet::from_resampler(&resampler);
    if resampler.is_empty() {
        return Ok(channels);
    }

    let positions: Vec<DVec3> = frames.iter().map(|f| f.position).collect();
    let rotations: Vec<DMat3> = frames.iter().map(|f| f.rotation).collect();
    let positions = resampler.pick(&positions).entity(tag, Operation::Resample)?;
    let rotations = resampler.pick(&rotations).entity(tag, Operation::Resample)?;
    let orientations = to_orientations(&rotations, config.axis_normalization);

    channels
        .insert(ChannelValues::Translation(positions))
        .entity(tag, Operation::CollectChannels)?;
    channels
        .insert(ChannelValues::Orientation(orientations))
        .entity(tag, Operation::CollectChannels)?;
    Ok(channels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvere_core::{AxisNormalization, SolvereError, TransformError};
    use std::f64::consts::FRAC_PI_2;

    fn walk(n: usize) -> Vec<BodyFrame> {
        (0..n)
            .map(|i| {
                BodyFrame::new(
                    i as f64 * 0.1,
                    DVec3::new(i as f64, 0.0, 0.0),
                    DMat3::IDENTITY,
                )
            })
            .collect()
    }

    #[test]
    fn test_body_channels_share_keys() {
        let bundle = Body::new("pelvis", walk(9))
            .assemble(&PipelineConfig::with_downsample(3))
            .unwrap();

        assert_eq!(bundle.tag, "pelvis");
        assert_eq!(bundle.channels.key_count(), 3);
        assert_eq!(bundle.channels.translation().unwrap().len(), 3);
        assert_eq!(bundle.channels.orientation().unwrap().len(), 3);
        assert_eq!(bundle.channels.translation().unwrap()[2], DVec3::new(6.0, 0.0, 0.0));
        assert!(bundle.geometry.is_empty());
    }

    #[test]
    fn test_body_orientation_converted() {
        let frames = vec![BodyFrame::new(0.0, DVec3::ZERO, DMat3::from_rotation_z(FRAC_PI_2))];
        let config = PipelineConfig {
            axis_normalization: AxisNormalization::Unit,
            ..Default::default()
        };
        let bundle = Body::new("arm", frames).assemble(&config).unwrap();
        let aa = bundle.channels.orientation().unwrap()[0];

        assert!((aa.axis - DVec3::Z).length() < 1e-9);
        assert!((aa.angle - FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn test_body_template() {
        let template = BodyTemplate::new(vec![
            "#VRML V2.0 utf8".into(),
            "Transform {".into(),
            "  children Inline { url \"$1$\" }".into(),
            "}".into(),
        ])
        .with_substitutions(vec!["shank.wrl".into()]);
        let bundle = Body::new("shank_l", walk(2))
            .with_template(template)
            .assemble(&PipelineConfig::default())
            .unwrap();

        let StaticGeometry::Template(lines) = &bundle.geometry[0] else {
            panic!("expected template geometry");
        };
        assert_eq!(lines[0], "DEF shank_l Transform {");
        assert_eq!(lines[1], "  children Inline { url \"shank.wrl\" }");
    }

    #[test]
    fn test_stride_too_large_names_entity() {
        let err = Body::new("foot", walk(3))
            .assemble(&PipelineConfig::with_downsample(4))
            .unwrap_err();

        assert!(err.to_string().contains("'foot'"));
        assert!(matches!(
            err,
            SolvereError::Entity {
                operation: Operation::Resample,
                ..
            }
        ));
        assert!(matches!(
            err.root_cause(),
            SolvereError::Transform(TransformError::StrideTooLarge { .. })
        ));
    }

    #[test]
    fn test_from_table_wrong_width() {
        let table = Table::from_rows([[0.0; 7]]).unwrap();
        let err = Body::from_table("hip", &table).unwrap_err();

        assert!(matches!(
            err,
            SolvereError::Entity {
                operation: Operation::ReadFrames,
                ..
            }
        ));
    }

    #[test]
    fn test_camera_viewpoint() {
        let bundle = Camera::new("cam", walk(4))
            .with_description("Side view")
            .assemble(&PipelineConfig::default())
            .unwrap();

        assert_eq!(bundle.channels.key_count(), 4);
        assert_eq!(
            bundle.geometry,
            vec![StaticGeometry::Viewpoint {
                description: "Side view".into()
            }]
        );
    }

    #[test]
    fn test_empty_body_has_no_channels() {
        let bundle = Body::new("ghost", Vec::new())
            .assemble(&PipelineConfig::default())
            .unwrap();

        assert!(!bundle.is_animated());
        assert_eq!(bundle.channels.key_count(), 0);
    }
}
