//! Static geometry as named text fields.
//!
//! Field names match the placeholders of the geometry templates that the
//! templater fills in.

use glam::DVec3;
use solvere_core::MarkerShape;
use solvere_entity::{Rendering, StaticGeometry, StripColoring};
use solvere_transform::TriangleStrip;

use crate::fields::{format_color, format_vec3, join};

/// One placeholder and its replacement text.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub value: String,
}

impl Field {
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// Look up a field by name.
pub fn field<'a>(fields: &'a [Field], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|f| f.name == name)
        .map(|f| f.value.as_str())
}

/// Text extent used for labels: half the character count.
pub fn text_extent(text: &str) -> usize {
    text.chars().count() / 2
}

fn vertex_counts(counts: impl IntoIterator<Item = usize>) -> String {
    counts
        .into_iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_fields(
    strip: &TriangleStrip,
    coloring: &StripColoring,
    rendering: Rendering,
) -> Vec<Field> {
    let mut fields = vec![Field::new(
        "coordinate",
        join(strip.vertices(), format_vec3),
    )];

    match rendering {
        Rendering::Wireframe => fields.push(Field::new(
            "vertex_count",
            vertex_counts(strip.triangles().map(|_| 3)),
        )),
        Rendering::Solid => {
            fields.push(Field::new("ccw", "TRUE"));
            fields.push(Field::new("solid", "FALSE"));
        }
    }

    match coloring {
        StripColoring::PerVertex(colors) => {
            fields.push(Field::new("color", join(colors, format_color)));
        }
        StripColoring::Uniform {
            color,
            transparency,
        } => {
            fields.push(Field::new("rgb", format_color(color)));
            fields.push(Field::new("transparency", transparency.to_string()));
        }
    }
    fields
}

fn shape_fields(shape: &MarkerShape) -> Vec<Field> {
    let mut fields = vec![Field::new("shape", shape.name())];
    match *shape {
        MarkerShape::Sphere { radius } => fields.push(Field::new("radius", radius.to_string())),
        MarkerShape::Cylinder { radius, height } | MarkerShape::Cone { radius, height } => {
            fields.push(Field::new("radius", radius.to_string()));
            fields.push(Field::new("height", height.to_string()));
        }
        MarkerShape::Box { size } => fields.push(Field::new("size", format_vec3(size))),
    }
    fields
}

/// Fields for one piece of static geometry.
pub fn geometry_fields(geometry: &StaticGeometry) -> Vec<Field> {
    match geometry {
        StaticGeometry::Template(lines) => vec![Field::new("lines", lines.join("\n"))],
        StaticGeometry::Strip {
            strip,
            coloring,
            rendering,
        } => strip_fields(strip, coloring, *rendering),
        StaticGeometry::Polylines { lines, color } => vec![
            Field::new("coordinate", join(lines.iter().flatten(), |v| format_vec3(*v))),
            Field::new("vertex_count", vertex_counts(lines.iter().map(Vec::len))),
            Field::new("rgb", format_color(color)),
        ],
        StaticGeometry::Shapes {
            shape,
            positions,
            color,
            transparency,
        } => {
            let mut fields = shape_fields(shape);
            fields.push(Field::new("translation", join(positions, |v| format_vec3(*v))));
            fields.push(Field::new("rgb", format_color(color)));
            fields.push(Field::new("transparency", transparency.to_string()));
            fields
        }
        StaticGeometry::Text {
            text,
            anchor,
            scale,
            color,
        } => {
            let extent = text_extent(text).to_string();
            vec![
                Field::new("text", text.clone()),
                Field::new("translation", format_vec3(*anchor)),
                Field::new("scale", format_vec3(DVec3::splat(*scale))),
                Field::new("rgb", format_color(color)),
                Field::new("text_length", extent.clone()),
                Field::new("max_extent", extent),
            ]
        }
        StaticGeometry::Viewpoint { description } => {
            vec![Field::new("description", description.clone())]
        }
    }
}

/// Every numeric value carried by a piece of geometry.
pub(crate) fn numbers(geometry: &StaticGeometry) -> Vec<f64> {
    fn push3(out: &mut Vec<f64>, v: DVec3) {
        out.extend_from_slice(&v.to_array());
    }

    let mut out = Vec::new();
    match geometry {
        StaticGeometry::Template(_) | StaticGeometry::Viewpoint { .. } => {}
        StaticGeometry::Strip {
            strip, coloring, ..
        } => {
            strip.vertices().for_each(|v| push3(&mut out, v));
            match coloring {
                StripColoring::PerVertex(colors) => {
                    colors.iter().for_each(|c| out.extend(c.to_array()));
                }
                StripColoring::Uniform {
                    color,
                    transparency,
                } => {
                    out.extend(color.to_array());
                    out.push(*transparency);
                }
            }
        }
        StaticGeometry::Polylines { lines, color } => {
            lines.iter().flatten().for_each(|v| push3(&mut out, *v));
            out.extend(color.to_array());
        }
        StaticGeometry::Shapes {
            shape,
            positions,
            color,
            transparency,
        } => {
            out.extend(shape.size_array());
            positions.iter().for_each(|v| push3(&mut out, *v));
            out.extend(color.to_array());
            out.push(*transparency);
        }
        StaticGeometry::Text {
            anchor,
            scale,
            color,
            ..
        } => {
            push3(&mut out, *anchor);
            out.push(*scale);
            out.extend(color.to_array());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvere_core::ColorRgb;

    fn two_step_strip() -> TriangleStrip {
        TriangleStrip::from_axes(&[DVec3::ZERO, DVec3::X], &[DVec3::Y, DVec3::new(1.0, 1.0, 0.0)])
            .unwrap()
    }

    #[test]
    fn test_wireframe_strip() {
        let geometry = StaticGeometry::Strip {
            strip: two_step_strip(),
            coloring: StripColoring::Uniform {
                color: ColorRgb::GREEN,
                transparency: 0.25,
            },
            rendering: Rendering::Wireframe,
        };
        let fields = geometry_fields(&geometry);

        insta::assert_snapshot!(field(&fields, "vertex_count").unwrap(), @"3 3 3 3");
        assert_eq!(field(&fields, "rgb"), Some("0 1 0"));
        assert_eq!(field(&fields, "transparency"), Some("0.25"));
        assert!(field(&fields, "ccw").is_none());
    }

    #[test]
    fn test_solid_strip_coordinates() {
        let geometry = StaticGeometry::Strip {
            strip: two_step_strip(),
            coloring: StripColoring::PerVertex(vec![ColorRgb::RED; 12]),
            rendering: Rendering::Solid,
        };
        let fields = geometry_fields(&geometry);

        insta::assert_snapshot!(
            field(&fields, "coordinate").unwrap(),
            @"0 0 0, 0 1 0, 1 1 0, 0 0 0, 1 1 0, 1 0 0, 0 0 0, 0 1 0, 1 1 0, 0 0 0, 1 1 0, 1 0 0"
        );
        assert_eq!(field(&fields, "ccw"), Some("TRUE"));
        assert_eq!(field(&fields, "solid"), Some("FALSE"));
        assert_eq!(field(&fields, "color").unwrap().matches(", ").count(), 11);
    }

    #[test]
    fn test_polyline_vertex_counts() {
        let geometry = StaticGeometry::Polylines {
            lines: vec![vec![DVec3::ZERO, DVec3::X, DVec3::Y], vec![DVec3::Z, DVec3::ONE]],
            color: ColorRgb::WHITE,
        };
        let fields = geometry_fields(&geometry);

        assert_eq!(field(&fields, "vertex_count"), Some("3 2"));
        insta::assert_snapshot!(
            field(&fields, "coordinate").unwrap(),
            @"0 0 0, 1 0 0, 0 1 0, 0 0 1, 1 1 1"
        );
    }

    #[test]
    fn test_box_marker_fields() {
        let geometry = StaticGeometry::Shapes {
            shape: MarkerShape::Box {
                size: DVec3::new(0.1, 0.2, 0.3),
            },
            positions: vec![DVec3::ZERO, DVec3::X],
            color: ColorRgb::BLUE,
            transparency: 0.0,
        };
        let fields = geometry_fields(&geometry);

        assert_eq!(field(&fields, "shape"), Some("box"));
        assert_eq!(field(&fields, "size"), Some("0.1 0.2 0.3"));
        assert_eq!(field(&fields, "translation"), Some("0 0 0, 1 0 0"));
    }

    #[test]
    fn test_text_extent() {
        let geometry = StaticGeometry::Text {
            text: "Knee".into(),
            anchor: DVec3::new(1.0, 2.0, 3.0),
            scale: 0.5,
            color: ColorRgb::WHITE,
        };
        let fields = geometry_fields(&geometry);

        assert_eq!(field(&fields, "text_length"), Some("2"));
        assert_eq!(field(&fields, "scale"), Some("0.5 0.5 0.5"));
        assert_eq!(text_extent("hip"), 1);
        assert_eq!(text_extent(""), 0);
    }
}
