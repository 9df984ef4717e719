//! Entity assemblers for Solvere animations.
//!
//! Each assembler owns the frames of one scene element and turns them into
//! an [`EntityBundle`]: channels that share one set of keys plus any static
//! geometry. Assemblers never mutate their input, so the same entity can be
//! assembled against several configurations.
//!
//! - [`Body`] and [`Camera`]: translation and orientation paths
//! - [`ForceTorque`]: scaled, oriented, colored arrows with history trails
//! - [`Markers`]: static shapes
//! - [`Plot`]: a ribbon between two paths with an optional moving marker
//! - [`StickFigure`]: every recorded pose as a polyline
//! - [`Label`]: moving billboard text
//!
//! [`SceneBuilder`] runs all of them against one [`PipelineConfig`].

pub mod body;
pub mod bundle;
pub mod force_torque;
pub mod label;
pub mod marker;
pub mod plot;
pub mod scene;
pub mod stick_figure;
pub mod template;

use solvere_core::{PipelineConfig, Result};

pub use body::{Body, BodyTemplate, Camera};
pub use bundle::{
    EntityBundle, ForceTorqueBundle, PlotBundle, Rendering, StaticGeometry, StripColoring,
};
pub use force_torque::{ForceTorque, TrailColoring, TrailStyle};
pub use label::Label;
pub use marker::Markers;
pub use plot::{Plot, PlotLabel};
pub use scene::{Animation, SceneBuilder};
pub use stick_figure::StickFigure;

/// Turns one input entity into its bundle.
pub trait Assemble {
    type Bundle;

    /// Unique name of the entity in the scene.
    fn tag(&self) -> &str;

    /// Final time sample, for entities that play over time.
    fn last_time(&self) -> Option<f64> {
        None
    }

    fn assemble(&self, config: &PipelineConfig) -> Result<Self::Bundle>;
}
