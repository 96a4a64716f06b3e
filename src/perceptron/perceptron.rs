use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::sigmoid::sigmoid;
use crate::data::pattern::Pattern;
use crate::error::{PerceptronError, Result};
use crate::math::matrix::Matrix;
use crate::network::config::{BiasInit, NetworkConfig};

/// A single sigmoid unit: one weight per pixel plus a bias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perceptron {
    weights: Matrix,
    bias: f64,
    learning_rate: f64,
}

impl Perceptron {
    /// Draws weights i.i.d. from `U[config.weight_range]`, then the bias
    /// (if `BiasInit::Uniform`), all from `rng`.
    pub fn new<R: Rng + ?Sized>(config: &NetworkConfig, rng: &mut R) -> Perceptron {
        let (low, high) = (config.weight_range.low, config.weight_range.high);
        let weights = Matrix::random_uniform(config.rows, config.cols, low, high, rng);
        let bias = match config.bias_init {
            BiasInit::Constant(value) => value,
            BiasInit::Uniform => rng.gen_range(low..=high),
        };
        Perceptron { weights, bias, learning_rate: config.learning_rate }
    }

    pub fn from_parts(weights: Matrix, bias: f64, learning_rate: f64) -> Perceptron {
        Perceptron { weights, bias, learning_rate }
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Weighted sum `Σ w·x + b`.
    pub fn forward(&self, pattern: &Pattern) -> Result<f64> {
        let sum = self.weights.dot(pattern.as_matrix()).map_err(|_| self.mismatch(pattern))?;
        Ok(sum + self.bias)
    }

    /// `sigmoid(forward(pattern))`.
    pub fn activate(&self, pattern: &Pattern) -> Result<f64> {
        Ok(sigmoid(self.forward(pattern)?))
    }

    /// Delta Rule: `w += η·(expected − output)·x` and `b += η·(expected − output)`.
    ///
    /// `output` is whatever the training regime uses as the correction term
    /// (continuous activation or its rounded bit). The caller decides whether
    /// an update is warranted.
    pub fn update(&mut self, pattern: &Pattern, expected: u8, output: f64) -> Result<()> {
        let delta = self.learning_rate * (f64::from(expected) - output);
        self.weights
            .add_scaled(pattern.as_matrix(), delta)
            .map_err(|_| self.mismatch(pattern))?;
        self.bias += delta;
        Ok(())
    }

    fn mismatch(&self, pattern: &Pattern) -> PerceptronError {
        PerceptronError::ShapeMismatch {
            expected: self.weights.shape(),
            actual: pattern.shape(),
        }
    }
}
