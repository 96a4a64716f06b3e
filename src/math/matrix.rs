use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::{PerceptronError, Result};

/// Dense row-major matrix of `f64`.
///
/// Used both for perceptron weights and, wrapped in `Pattern`, for binary
/// pixel grids. Shape-sensitive operations return `ShapeMismatch` rather than
/// panicking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Fills a `rows × cols` matrix with samples drawn i.i.d. from `U[low, high]`.
    ///
    /// Cells are drawn in row-major order, so the same `rng` state always
    /// yields the same matrix.
    pub fn random_uniform<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        low: f64,
        high: f64,
        rng: &mut R,
    ) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen_range(low..=high);
            }
        }
        res
    }

    /// Builds a matrix from row vectors. Fails if the rows are ragged.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let rows = data.len();
        let cols = data.first().map_or(0, |row| row.len());
        if let Some(bad) = data.iter().find(|row| row.len() != cols) {
            return Err(PerceptronError::ShapeMismatch {
                expected: (rows, cols),
                actual: (rows, bad.len()),
            });
        }
        Ok(Matrix { rows, cols, data })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Sum of the element-wise (Hadamard) product of two same-shape matrices.
    pub fn dot(&self, other: &Matrix) -> Result<f64> {
        self.check_shape(other)?;
        Ok(self.data.iter().zip(other.data.iter())
            .flat_map(|(a, b)| a.iter().zip(b.iter()).map(|(x, y)| x * y))
            .sum())
    }

    /// In-place `self += factor * other`.
    pub fn add_scaled(&mut self, other: &Matrix, factor: f64) -> Result<()> {
        self.check_shape(other)?;
        for (row, other_row) in self.data.iter_mut().zip(other.data.iter()) {
            for (x, y) in row.iter_mut().zip(other_row.iter()) {
                *x += factor * y;
            }
        }
        Ok(())
    }

    fn check_shape(&self, other: &Matrix) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(PerceptronError::ShapeMismatch {
                expected: self.shape(),
                actual: other.shape(),
            });
        }
        Ok(())
    }
}
