//! Shape contracts between the input arrays and the axes they are drawn on.
//!
//! Violations are reported before anything is drawn. Rows are never
//! truncated or padded to fit.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("{name}: expected at least one {what}")]
    Empty { name: &'static str, what: &'static str },

    #[error("{name}: row {row} has {len} samples but the time vector has {expected}")]
    RowLength {
        name: &'static str,
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("{name}: expected a square matrix, row {row} has {len} columns for {rows} rows")]
    NotSquare {
        name: &'static str,
        row: usize,
        len: usize,
        rows: usize,
    },

    #[error("layout has {positions} positions for {nodes} nodes")]
    LayoutLength { nodes: usize, positions: usize },

    #[error("edge references node {index} but the graph has {nodes} nodes")]
    MissingNode { index: usize, nodes: usize },
}

/// Every row must carry exactly one sample per time point.
pub fn check_series(name: &'static str, rows: &[Vec<f32>], t: &[f32]) -> Result<(), ShapeError> {
    if t.is_empty() {
        return Err(ShapeError::Empty {
            name,
            what: "time sample",
        });
    }
    for (row, values) in rows.iter().enumerate() {
        if values.len() != t.len() {
            return Err(ShapeError::RowLength {
                name,
                row,
                len: values.len(),
                expected: t.len(),
            });
        }
    }
    Ok(())
}

/// Non-empty N×N matrix.
pub fn check_square(name: &'static str, rows: &[Vec<f32>]) -> Result<usize, ShapeError> {
    let n = rows.len();
    if n == 0 {
        return Err(ShapeError::Empty { name, what: "row" });
    }
    for (row, values) in rows.iter().enumerate() {
        if values.len() != n {
            return Err(ShapeError::NotSquare {
                name,
                row,
                len: values.len(),
                rows: n,
            });
        }
    }
    Ok(n)
}
