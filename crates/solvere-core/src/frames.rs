//! Typed per-frame records read from input tables.
//!
//! Each record type corresponds to one table layout. Conversion checks the
//! column count once; after that every frame is known to be complete.

use glam::{DMat3, DVec3};
use smallvec::SmallVec;

use crate::errors::InputError;
use crate::table::{vec3_at, Table};

/// Time + translation + row-major rotation matrix.
pub const BODY_COLUMNS: usize = 13;
/// Time + position + force + torque.
pub const FORCE_TORQUE_COLUMNS: usize = 10;
/// Time + axis 1 + axis 2.
pub const PLOT_COLUMNS: usize = 7;
/// Time + position.
pub const LABEL_COLUMNS: usize = 4;

/// Build a rotation matrix from nine row-major entries.
pub fn rotation_from_row_major(entries: &[f64]) -> DMat3 {
    DMat3::from_cols_array(&[
        entries[0], entries[3], entries[6], //
        entries[1], entries[4], entries[7], //
        entries[2], entries[5], entries[8],
    ])
}

/// One sample of a rigid body (or camera) path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyFrame {
    pub time: f64,
    pub position: DVec3,
    pub rotation: DMat3,
}

impl BodyFrame {
    pub fn new(time: f64, position: DVec3, rotation: DMat3) -> Self {
        Self {
            time,
            position,
            rotation,
        }
    }

    /// Read every row of a 13-column table.
    pub fn from_table(table: &Table) -> Result<Vec<Self>, InputError> {
        table.expect_columns(BODY_COLUMNS)?;
        Ok(table
            .rows()
            .map(|row| Self {
                time: row[0],
                position: vec3_at(row, 1),
                rotation: rotation_from_row_major(&row[4..13]),
            })
            .collect())
    }
}

/// One sample of a force/torque pair applied at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForceTorqueFrame {
    pub time: f64,
    pub position: DVec3,
    pub force: DVec3,
    pub torque: DVec3,
}

impl ForceTorqueFrame {
    pub fn new(time: f64, position: DVec3, force: DVec3, torque: DVec3) -> Self {
        Self {
            time,
            position,
            force,
            torque,
        }
    }

    /// Read every row of a 10-column table.
    pub fn from_table(table: &Table) -> Result<Vec<Self>, InputError> {
        table.expect_columns(FORCE_TORQUE_COLUMNS)?;
        Ok(table
            .rows()
            .map(|row| Self {
                time: row[0],
                position: vec3_at(row, 1),
                force: vec3_at(row, 4),
                torque: vec3_at(row, 7),
            })
            .collect())
    }
}

/// One sample of a two-axis 3D plot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlotFrame {
    pub time: f64,
    pub axis1: DVec3,
    pub axis2: DVec3,
}

impl PlotFrame {
    pub fn new(time: f64, axis1: DVec3, axis2: DVec3) -> Self {
        Self { time, axis1, axis2 }
    }

    pub fn from_table(table: &Table) -> Result<Vec<Self>, InputError> {
        table.expect_columns(PLOT_COLUMNS)?;
        Ok(table
            .rows()
            .map(|row| Self {
                time: row[0],
                axis1: vec3_at(row, 1),
                axis2: vec3_at(row, 4),
            })
            .collect())
    }
}

/// One pose of a stick figure: an ordered list of vertices.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StickFrame {
    pub time: f64,
    pub vertices: SmallVec<[DVec3; 8]>,
}

impl StickFrame {
    pub fn new(time: f64, vertices: impl IntoIterator<Item = DVec3>) -> Self {
        Self {
            time,
            vertices: vertices.into_iter().collect(),
        }
    }

    /// Read a `1 + 3n` column table, `n >= 1`.
    pub fn from_table(table: &Table) -> Result<Vec<Self>, InputError> {
        table.expect_min_columns(4)?;
        let columns = table.column_count();
        if (columns - 1) % 3 != 0 {
            return Err(InputError::ColumnCount {
                expected: "1 + 3n".to_string(),
                found: columns,
            });
        }
        let points = (columns - 1) / 3;
        Ok(table
            .rows()
            .map(|row| Self {
                time: row[0],
                vertices: (0..points).map(|p| vec3_at(row, 1 + p * 3)).collect(),
            })
            .collect())
    }
}

/// One sample of a moving label path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelFrame {
    pub time: f64,
    pub position: DVec3,
}

impl LabelFrame {
    pub fn new(time: f64, position: DVec3) -> Self {
        Self { time, position }
    }

    /// Read time and position; extra columns are ignored.
    pub fn from_table(table: &Table) -> Result<Vec<Self>, InputError> {
        table.expect_min_columns(LABEL_COLUMNS)?;
        Ok(table
            .rows()
            .map(|row| Self {
                time: row[0],
                position: vec3_at(row, 1),
            })
            .collect())
    }
}

/// Read marker positions from a 3-column table.
pub fn marker_positions(table: &Table) -> Result<Vec<DVec3>, InputError> {
    table.expect_columns(3)?;
    Ok(table.rows().map(|row| vec3_at(row, 0)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_rotation() {
        // 90 degrees about Z: x -> y
        let m = rotation_from_row_major(&[0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        let v = m * DVec3::X;

        assert!((v - DVec3::Y).length() < 1e-12);
        assert_eq!(m.col(1).x, -1.0);
    }

    #[test]
    fn test_body_from_table() {
        let table = Table::from_rows([
            [0.0, 1.0, 2.0, 3.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            [0.5, 4.0, 5.0, 6.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        ])
        .unwrap();
        let frames = BodyFrame::from_table(&table).unwrap();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].time, 0.5);
        assert_eq!(frames[1].position, DVec3::new(4.0, 5.0, 6.0));
        assert_eq!(frames[0].rotation, DMat3::IDENTITY);
    }

    #[test]
    fn test_body_wrong_columns() {
        let table = Table::from_rows([[0.0; 10]]).unwrap();
        assert!(BodyFrame::from_table(&table).is_err());
    }

    #[test]
    fn test_force_torque_from_table() {
        let table =
            Table::from_rows([[0.1, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]]).unwrap();
        let frames = ForceTorqueFrame::from_table(&table).unwrap();

        assert_eq!(frames[0].force, DVec3::new(4.0, 5.0, 6.0));
        assert_eq!(frames[0].torque, DVec3::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn test_stick_from_table() {
        let table = Table::from_rows([[0.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0]]).unwrap();
        let frames = StickFrame::from_table(&table).unwrap();

        assert_eq!(frames[0].vertices.len(), 3);
        assert_eq!(frames[0].vertices[2], DVec3::splat(3.0));
    }

    #[test]
    fn test_stick_partial_vertex_rejected() {
        let table = Table::from_rows([[0.0, 1.0, 1.0, 1.0, 2.0]]).unwrap();

        assert_eq!(
            StickFrame::from_table(&table),
            Err(InputError::ColumnCount {
                expected: "1 + 3n".into(),
                found: 5
            })
        );
    }
}
