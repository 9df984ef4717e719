//! Rectangular numeric tables handed over by the configuration parser.

use glam::DVec3;

use crate::errors::InputError;

/// A validated, rectangular, row-major table of `f64` samples.
///
/// Every row has the same number of columns and there is at least one row.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: usize,
    data: Vec<f64>,
}

impl Table {
    /// Build a table from rows, rejecting empty or ragged input.
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Result<Self, InputError>
    where
        R: AsRef<[f64]>,
    {
        let mut rows = rows.into_iter();
        let first = rows.next().ok_or(InputError::EmptyTable)?;
        let columns = first.as_ref().len();
        if columns == 0 {
            return Err(InputError::EmptyTable);
        }

        let mut data = first.as_ref().to_vec();
        for (idx, row) in rows.enumerate() {
            let row = row.as_ref();
            if row.len() != columns {
                return Err(InputError::RaggedRow {
                    row: idx + 1,
                    expected: columns,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Self { columns, data })
    }

    pub fn row_count(&self) -> usize {
        self.data.len() / self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Get one row.
    pub fn row(&self, idx: usize) -> &[f64] {
        &self.data[idx * self.columns..(idx + 1) * self.columns]
    }

    /// Iterate over all rows in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.columns)
    }

    /// Copy one column out.
    pub fn column(&self, col: usize) -> Vec<f64> {
        self.rows().map(|row| row[col]).collect()
    }

    /// Require an exact column count.
    pub fn expect_columns(&self, expected: usize) -> Result<(), InputError> {
        if self.columns == expected {
            Ok(())
        } else {
            Err(InputError::ColumnCount {
                expected: expected.to_string(),
                found: self.columns,
            })
        }
    }

    /// Require at least `min` columns.
    pub fn expect_min_columns(&self, min: usize) -> Result<(), InputError> {
        if self.columns >= min {
            Ok(())
        } else {
            Err(InputError::ColumnCount {
                expected: format!("at least {min}"),
                found: self.columns,
            })
        }
    }
}

/// Read three consecutive columns starting at `start` as a vector.
pub fn vec3_at(row: &[f64], start: usize) -> DVec3 {
    DVec3::new(row[start], row[start + 1], row[start + 2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let table = Table::from_rows([[0.0, 1.0, 2.0], [1.0, 4.0, 5.0]]).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row(1), &[1.0, 4.0, 5.0]);
        assert_eq!(table.column(0), vec![0.0, 1.0]);
    }

    #[test]
    fn test_empty_table() {
        let rows: Vec<Vec<f64>> = vec![];
        assert_eq!(Table::from_rows(rows), Err(InputError::EmptyTable));
    }

    #[test]
    fn test_ragged_table() {
        let rows = vec![vec![0.0, 1.0], vec![1.0], vec![2.0, 3.0]];
        assert_eq!(
            Table::from_rows(rows),
            Err(InputError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_expect_columns() {
        let table = Table::from_rows([[0.0; 4]]).unwrap();

        assert!(table.expect_columns(4).is_ok());
        assert!(table.expect_columns(13).is_err());
        assert!(table.expect_min_columns(3).is_ok());
    }
}
