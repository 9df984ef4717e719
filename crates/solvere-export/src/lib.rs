//! Text output for Solvere animations.
//!
//! Channels stay numeric until they reach this crate. Here every bundle is
//! turned into the strings an external templater splices into VRML97
//! templates:
//! - interpolator `key` / `key_value` fields per channel
//! - named fields per piece of static geometry
//! - scene-wide fields (background, lights, cycle interval)
//!
//! [`to_json`] dumps a whole animation instead.

pub mod error;
pub mod fields;
pub mod geometry;
pub mod json;

use solvere_entity::{Animation, EntityBundle};
use solvere_transform::ChannelValues;

pub use error::{ExportError, Result};
pub use fields::{format_keys, format_values, interpolators, Interpolator};
pub use geometry::{field, geometry_fields, text_extent, Field};
pub use json::{from_json, to_json};

/// All text fields of one bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleFields {
    pub tag: String,
    pub interpolators: Vec<Interpolator>,
    /// One field list per piece of static geometry.
    pub geometry: Vec<Vec<Field>>,
}

fn check_finite(
    tag: &str,
    field: &'static str,
    values: impl IntoIterator<Item = f64>,
) -> Result<()> {
    if values.into_iter().all(f64::is_finite) {
        Ok(())
    } else {
        Err(ExportError::NonFinite {
            tag: tag.to_string(),
            field,
        })
    }
}

fn channel_numbers(values: &ChannelValues) -> Vec<f64> {
    match values {
        ChannelValues::Translation(v) | ChannelValues::Scale(v) => {
            v.iter().flat_map(|p| p.to_array()).collect()
        }
        ChannelValues::Orientation(v) => v.iter().flat_map(|o| o.to_array()).collect(),
        ChannelValues::Color(v) => v.iter().flat_map(|c| c.to_array()).collect(),
    }
}

/// Format one bundle, rejecting NaN and infinite values.
pub fn export_bundle(bundle: &EntityBundle) -> Result<BundleFields> {
    let tag = bundle.tag.as_str();
    check_finite(tag, "key", bundle.channels.keys().iter().copied())?;
    for values in bundle.channels.iter() {
        check_finite(tag, values.kind().name(), channel_numbers(values))?;
    }
    for item in &bundle.geometry {
        check_finite(tag, item.kind(), geometry::numbers(item))?;
    }

    Ok(BundleFields {
        tag: bundle.tag.clone(),
        interpolators: interpolators(&bundle.channels),
        geometry: bundle.geometry.iter().map(geometry_fields).collect(),
    })
}

/// Format every bundle of an animation, camera first.
pub fn export_animation(animation: &Animation) -> Result<Vec<BundleFields>> {
    animation.bundles().map(export_bundle).collect()
}

/// Scene-wide fields: background, headlight, directional light and
/// cycle interval.
pub fn scene_fields(animation: &Animation) -> Vec<Field> {
    let settings = &animation.settings;
    let mut out = vec![
        Field::new("background", fields::format_color(&settings.background)),
        Field::new(
            "headlight",
            if settings.headlight { "TRUE" } else { "FALSE" },
        ),
        Field::new("cycle_interval", animation.cycle_interval.to_string()),
    ];
    if let Some(direction) = settings.light_direction {
        out.push(Field::new("light_direction", fields::format_vec3(direction)));
    }
    out
}
