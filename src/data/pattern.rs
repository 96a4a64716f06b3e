use std::fmt;

use serde::{Serialize, Deserialize};

use crate::error::{PerceptronError, Result};
use crate::math::matrix::Matrix;

/// A fixed-size binary pixel grid: the unit of input to the network.
///
/// Every cell is exactly `0.0` or `1.0`; all constructors enforce this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Matrix")]
pub struct Pattern(Matrix);

impl Pattern {
    /// Builds a pattern from rows of bits. Rows must be equal length and
    /// every value must be 0 or 1.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Pattern> {
        for (i, row) in rows.iter().enumerate() {
            if let Some(v) = row.iter().find(|&&v| v > 1) {
                return Err(PerceptronError::Format {
                    line: i + 1,
                    message: format!("value {} is not binary", v),
                });
            }
        }
        let data = rows.into_iter()
            .map(|row| row.into_iter().map(f64::from).collect())
            .collect();
        Matrix::from_data(data).map(Pattern)
    }

    /// Parses whitespace-separated tokens, one row per line, exactly `rows`
    /// lines of `cols` tokens. Trailing blank lines are ignored.
    pub fn parse(text: &str, rows: usize, cols: usize) -> Result<Pattern> {
        let lines: Vec<&str> = text.trim_end().lines().collect();
        if lines.len() != rows {
            return Err(PerceptronError::Format {
                line: lines.len().min(rows) + 1,
                message: format!("expected {} rows, found {}", rows, lines.len()),
            });
        }

        let mut data = Vec::with_capacity(rows);
        for (i, line) in lines.iter().enumerate() {
            data.push(parse_row(line, i + 1, cols)?);
        }
        Ok(Pattern(Matrix { rows, cols, data }))
    }

    pub fn shape(&self) -> (usize, usize) {
        self.0.shape()
    }

    pub fn as_matrix(&self) -> &Matrix {
        &self.0
    }

    /// Number of set pixels.
    pub fn ink(&self) -> usize {
        self.0.data.iter().flatten().filter(|&&v| v == 1.0).count()
    }

    /// Wraps a matrix the caller has already binarized.
    pub(crate) fn from_binary_matrix(matrix: Matrix) -> Pattern {
        debug_assert!(matrix.data.iter().flatten().all(|&v| v == 0.0 || v == 1.0));
        Pattern(matrix)
    }
}

impl TryFrom<Matrix> for Pattern {
    type Error = PerceptronError;

    /// Accepts a matrix only if its declared shape matches its data and every
    /// cell is 0 or 1.
    fn try_from(matrix: Matrix) -> Result<Pattern> {
        let checked = Matrix::from_data(matrix.data)?;
        if checked.data.is_empty() || checked.shape() != (matrix.rows, matrix.cols) {
            return Err(PerceptronError::ShapeMismatch {
                expected: (matrix.rows, matrix.cols),
                actual: checked.shape(),
            });
        }
        for (i, row) in checked.data.iter().enumerate() {
            if let Some(v) = row.iter().find(|&&v| v != 0.0 && v != 1.0) {
                return Err(PerceptronError::Format {
                    line: i + 1,
                    message: format!("value {} is not binary", v),
                });
            }
        }
        Ok(Pattern(checked))
    }
}

fn parse_row(line: &str, line_no: usize, cols: usize) -> Result<Vec<f64>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != cols {
        return Err(PerceptronError::Format {
            line: line_no,
            message: format!("expected {} values, found {}", cols, tokens.len()),
        });
    }
    tokens.iter()
        .map(|token| {
            let value = token.parse::<f64>().map_err(|_| PerceptronError::Format {
                line: line_no,
                message: format!("'{}' is not a number", token),
            })?;
            if value != 0.0 && value != 1.0 {
                return Err(PerceptronError::Format {
                    line: line_no,
                    message: format!("value {} is not binary", token),
                });
            }
            Ok(value)
        })
        .collect()
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.0.data {
            let line: Vec<&str> = row.iter()
                .map(|&v| if v == 1.0 { "1" } else { "0" })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
