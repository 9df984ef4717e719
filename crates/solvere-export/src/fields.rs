//! Interpolator fields: keys and key values as VRML97 text.

use glam::DVec3;
use solvere_core::{AxisAngle, ColorRgb};
use solvere_transform::{ChannelKind, ChannelSet, ChannelValues};

/// Separator between multi-component values in a field.
pub const VALUE_SEPARATOR: &str = ", ";

pub fn format_vec3(v: DVec3) -> String {
    format!("{} {} {}", v.x, v.y, v.z)
}

pub fn format_axis_angle(o: &AxisAngle) -> String {
    format!("{} {} {} {}", o.axis.x, o.axis.y, o.axis.z, o.angle)
}

pub fn format_color(c: &ColorRgb) -> String {
    format!("{} {} {}", c.r, c.g, c.b)
}

/// Join formatted items with [`VALUE_SEPARATOR`].
pub fn join<I, F, T>(items: I, format: F) -> String
where
    I: IntoIterator<Item = T>,
    F: Fn(T) -> String,
{
    items
        .into_iter()
        .map(format)
        .collect::<Vec<_>>()
        .join(VALUE_SEPARATOR)
}

/// Keys as a space separated list.
pub fn format_keys(keys: &[f64]) -> String {
    keys.iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Channel values as a comma separated list.
pub fn format_values(values: &ChannelValues) -> String {
    match values {
        ChannelValues::Translation(v) | ChannelValues::Scale(v) => join(v, |p| format_vec3(*p)),
        ChannelValues::Orientation(v) => join(v, format_axis_angle),
        ChannelValues::Color(v) => join(v, format_color),
    }
}

/// One interpolator node's worth of fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolator {
    pub kind: ChannelKind,
    pub key: String,
    pub key_value: String,
}

/// Fields for every channel, in channel order.
pub fn interpolators(channels: &ChannelSet) -> Vec<Interpolator> {
    let key = format_keys(channels.keys());
    channels
        .iter()
        .map(|values| Interpolator {
            kind: values.kind(),
            key: key.clone(),
            key_value: format_values(values),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_keys() {
        insta::assert_snapshot!(format_keys(&[0.25, 0.5, 0.75, 1.0]), @"0.25 0.5 0.75 1");
    }

    #[test]
    fn test_orientation_values() {
        let values = ChannelValues::Orientation(vec![
            AxisAngle::IDENTITY,
            AxisAngle::new(DVec3::X, 1.5),
        ]);
        insta::assert_snapshot!(format_values(&values), @"0 0 1 0, 1 0 0 1.5");
    }

    #[test]
    fn test_interpolators_share_keys() {
        let set = ChannelSet::new(vec![0.5, 1.0])
            .with(ChannelValues::Translation(vec![DVec3::ZERO, DVec3::new(1.0, -2.0, 0.5)]))
            .and_then(|s| s.with(ChannelValues::Color(vec![ColorRgb::RED, ColorRgb::CYAN])))
            .unwrap();
        let fields = interpolators(&set);

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].kind, ChannelKind::Translation);
        assert_eq!(fields[0].key, "0.5 1");
        assert_eq!(fields[1].key, fields[0].key);
        insta::assert_snapshot!(&fields[0].key_value, @"0 0 0, 1 -2 0.5");
        insta::assert_snapshot!(&fields[1].key_value, @"1 0 0, 0 1 1");
    }
}
