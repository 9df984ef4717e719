//! Collect assembled entities into one animation.

use solvere_core::{EntityContext, Operation, PipelineConfig, Result, SceneSettings};
use tracing::debug;

use crate::body::{Body, Camera};
use crate::bundle::{EntityBundle, ForceTorqueBundle, PlotBundle};
use crate::force_torque::ForceTorque;
use crate::label::Label;
use crate::marker::Markers;
use crate::plot::Plot;
use crate::stick_figure::StickFigure;
use crate::Assemble;

/// Everything the templater needs to write one animation file.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Animation {
    pub settings: SceneSettings,
    /// Playback length in seconds.
    pub cycle_interval: f64,
    pub camera: Option<EntityBundle>,
    pub bodies: Vec<EntityBundle>,
    pub force_torques: Vec<ForceTorqueBundle>,
    pub markers: Vec<EntityBundle>,
    pub plots: Vec<PlotBundle>,
    pub stick_figures: Vec<EntityBundle>,
    pub labels: Vec<EntityBundle>,
}

impl Animation {
    /// Every populated bundle, camera first.
    pub fn bundles(&self) -> impl Iterator<Item = &EntityBundle> {
        self.camera
            .iter()
            .chain(&self.bodies)
            .chain(self.force_torques.iter().flat_map(|ft| ft.bundles()))
            .chain(&self.markers)
            .chain(self.plots.iter().flat_map(|p| p.bundles()))
            .chain(&self.stick_figures)
            .chain(&self.labels)
    }

    /// Look up a bundle by tag.
    pub fn find(&self, tag: &str) -> Option<&EntityBundle> {
        self.bundles().find(|b| b.tag == tag)
    }
}

/// Assembles entities against one configuration.
#[derive(Debug)]
pub struct SceneBuilder {
    config: PipelineConfig,
    last_time: Option<f64>,
    animation: Animation,
}

impl SceneBuilder {
    /// Fails if the configuration is invalid.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config
            .validate()
            .entity("scene", Operation::Validate)?;
        Ok(Self {
            animation: Animation {
                settings: config.scene.clone(),
                ..Default::default()
            },
            config,
            last_time: None,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn assemble<A: Assemble>(&mut self, entity: &A) -> Result<A::Bundle> {
        let bundle = entity.assemble(&self.config)?;
        if let Some(t) = entity.last_time() {
            self.last_time = Some(self.last_time.map_or(t, |prev| prev.max(t)));
        }
        debug!(tag = entity.tag(), "added entity to scene");
        Ok(bundle)
    }

    /// Set the camera path, replacing any earlier one.
    pub fn camera(&mut self, camera: &Camera) -> Result<&mut Self> {
        let bundle = self.assemble(camera)?;
        self.animation.camera = Some(bundle);
        Ok(self)
    }

    pub fn body(&mut self, body: &Body) -> Result<&mut Self> {
        let bundle = self.assemble(body)?;
        self.animation.bodies.push(bundle);
        Ok(self)
    }

    pub fn force_torque(&mut self, force_torque: &ForceTorque) -> Result<&mut Self> {
        let bundle = self.assemble(force_torque)?;
        self.animation.force_torques.push(bundle);
        Ok(self)
    }

    pub fn markers(&mut self, markers: &Markers) -> Result<&mut Self> {
        let bundle = self.assemble(markers)?;
        self.animation.markers.push(bundle);
        Ok(self)
    }

    pub fn plot(&mut self, plot: &Plot) -> Result<&mut Self> {
        let bundle = self.assemble(plot)?;
        self.animation.plots.push(bundle);
        Ok(self)
    }

    pub fn stick_figure(&mut self, figure: &StickFigure) -> Result<&mut Self> {
        let bundle = self.assemble(figure)?;
        self.animation.stick_figures.push(bundle);
        Ok(self)
    }

    pub fn label(&mut self, label: &Label) -> Result<&mut Self> {
        let bundle = self.assemble(label)?;
        self.animation.labels.push(bundle);
        Ok(self)
    }

    /// Finish the scene. The cycle interval is the latest time sample of
    /// any timed entity times the time scaling, or zero without one.
    pub fn build(self) -> Animation {
        let mut animation = self.animation;
        animation.cycle_interval = self.last_time.unwrap_or(0.0) * self.config.scene.time_scaling;
        debug!(
            entities = animation.bundles().count(),
            cycle_interval = animation.cycle_interval,
            "built animation"
        );
        animation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DMat3, DVec3};
    use solvere_core::{BodyFrame, ForceTorqueFrame, MarkerShape, SolvereError};

    fn path(n: usize, dt: f64) -> Vec<BodyFrame> {
        (0..n)
            .map(|i| BodyFrame::new(i as f64 * dt, DVec3::ZERO, DMat3::IDENTITY))
            .collect()
    }

    #[test]
    fn test_cycle_interval_uses_latest_time() {
        let config = PipelineConfig {
            scene: SceneSettings {
                time_scaling: 2.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut builder = SceneBuilder::new(config).unwrap();
        builder
            .body(&Body::new("a", path(5, 0.5)))
            .unwrap()
            .body(&Body::new("b", path(3, 0.5)))
            .unwrap()
            .markers(&Markers::new(
                "m",
                MarkerShape::Sphere { radius: 0.1 },
                vec![DVec3::ZERO],
            ))
            .unwrap();
        let animation = builder.build();

        assert_eq!(animation.cycle_interval, 4.0);
        assert_eq!(animation.bodies.len(), 2);
        assert_eq!(animation.bundles().count(), 3);
        assert!(animation.find("m").is_some());
    }

    #[test]
    fn test_camera_listed_first() {
        let mut builder = SceneBuilder::new(PipelineConfig::default()).unwrap();
        builder
            .body(&Body::new("pelvis", path(2, 1.0)))
            .unwrap()
            .camera(&Camera::new("view", path(2, 1.0)))
            .unwrap();
        let animation = builder.build();
        let tags: Vec<&str> = animation.bundles().map(|b| b.tag.as_str()).collect();

        assert_eq!(tags, vec!["view", "pelvis"]);
    }

    #[test]
    fn test_force_torque_sides_flattened() {
        let frames = vec![ForceTorqueFrame::new(0.0, DVec3::ZERO, DVec3::X, DVec3::Y)];
        let mut builder = SceneBuilder::new(PipelineConfig::default()).unwrap();
        builder.force_torque(&ForceTorque::new("grf", frames)).unwrap();
        let animation = builder.build();

        assert!(animation.find("grf_F").is_some());
        assert!(animation.find("grf_T").is_some());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = SceneBuilder::new(PipelineConfig::with_downsample(0)).unwrap_err();
        assert!(matches!(err, SolvereError::Entity { .. }));
    }

    #[test]
    fn test_empty_scene() {
        let animation = SceneBuilder::new(PipelineConfig::default()).unwrap().build();

        assert_eq!(animation.cycle_interval, 0.0);
        assert_eq!(animation.bundles().count(), 0);
    }
}
