use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::data::label::ClassLabel;
use crate::error::{PerceptronError, Result};

/// Selects how `Network::train` walks the training set and which value it
/// feeds to the Delta Rule as the unit's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingRegime {
    /// Every iteration visits every perceptron against every sample. A
    /// correction is triggered by a rounded mismatch but sized by the
    /// continuous activation.
    EpochBatchDelta,
    /// Every iteration draws one sample uniformly at random. A correction is
    /// triggered by a rounded mismatch and sized by the rounded output, so
    /// each step moves the unit by exactly `±η` per active input.
    StochasticSampling,
}

/// How each perceptron's bias is initialised.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasInit {
    Constant(f64),
    /// Drawn from the same distribution as the weights.
    Uniform,
}

/// Closed interval the initial weights are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub low: f64,
    pub high: f64,
}

/// All tunables of a `Network`.
///
/// Serialized as JSON alongside a knowledge base so a later run can rebuild
/// a network with the same shape and decision threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Pattern height.
    pub rows: usize,
    /// Pattern width.
    pub cols: usize,
    /// Number of perceptrons, one per class.
    pub classes: usize,
    pub learning_rate: f64,
    /// Training budget: epochs for `EpochBatchDelta`, draws for `StochasticSampling`.
    pub iterations: usize,
    /// Minimum activation a winner must strictly exceed.
    pub threshold: f64,
    pub regime: TrainingRegime,
    pub bias_init: BiasInit,
    pub weight_range: WeightRange,
    pub seed: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            rows: 16,
            cols: 10,
            classes: ClassLabel::COUNT,
            learning_rate: 0.05,
            iterations: 2000,
            threshold: 0.15,
            regime: TrainingRegime::StochasticSampling,
            bias_init: BiasInit::Uniform,
            weight_range: WeightRange { low: -1.0, high: 1.0 },
            seed: 42,
        }
    }
}

impl NetworkConfig {
    /// Full-pass training with a fixed negative starting bias.
    pub fn epoch_batch() -> Self {
        NetworkConfig {
            iterations: 500,
            threshold: 0.5,
            regime: TrainingRegime::EpochBatchDelta,
            bias_init: BiasInit::Constant(-1.8),
            ..NetworkConfig::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(PerceptronError::InvalidConfig(format!(
                "pattern shape {}x{} must be non-empty", self.rows, self.cols
            )));
        }
        if self.classes == 0 {
            return Err(PerceptronError::InvalidConfig("classes must be at least 1".into()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(PerceptronError::InvalidConfig(format!(
                "learning_rate {} must be positive", self.learning_rate
            )));
        }
        if !self.threshold.is_finite() {
            return Err(PerceptronError::InvalidConfig("threshold must be finite".into()));
        }
        let WeightRange { low, high } = self.weight_range;
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(PerceptronError::InvalidConfig(format!(
                "weight range [{}, {}] is empty", low, high
            )));
        }
        if let BiasInit::Constant(b) = self.bias_init {
            if !b.is_finite() {
                return Err(PerceptronError::InvalidConfig("constant bias must be finite".into()));
            }
        }
        Ok(())
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Loads and validates a config written by `save_json`.
    pub fn load_json(path: &Path) -> Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: NetworkConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}
