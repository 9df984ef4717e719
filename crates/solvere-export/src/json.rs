//! JSON dump of a whole animation.

use solvere_entity::Animation;

use crate::error::Result;

/// Serialize an animation, channels and geometry included, as pretty JSON.
pub fn to_json(animation: &Animation) -> Result<String> {
    Ok(serde_json::to_string_pretty(animation)?)
}

/// Read an animation back from [`to_json`] output.
pub fn from_json(json: &str) -> Result<Animation> {
    Ok(serde_json::from_str(json)?)
}
