use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;

use crate::data::pattern::Pattern;
use crate::error::{PerceptronError, Result};
use crate::knowledge::knowledge_base::{KnowledgeBase, PerceptronSnapshot};
use crate::network::competition::{compete, Decision};
use crate::network::config::NetworkConfig;
use crate::perceptron::perceptron::Perceptron;
use crate::train::epoch_stats::TrainReport;
use crate::train::loop_fn::train_loop;
use crate::train::sample::Sample;

/// Lifecycle of a `Network`. Inference is allowed in either state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkState {
    /// Freshly built with random weights.
    Initialized,
    /// At least one `train` call succeeded, or weights were imported.
    Trained,
}

/// One perceptron per class; perceptron `i` always stands for class `i`.
#[derive(Debug, Clone)]
pub struct Network {
    config: NetworkConfig,
    perceptrons: Vec<Perceptron>,
    state: NetworkState,
}

impl Network {
    /// Builds `config.classes` perceptrons, initialising them in class order
    /// from the same `rng`.
    pub fn new<R: Rng + ?Sized>(config: NetworkConfig, rng: &mut R) -> Result<Network> {
        config.validate()?;
        let perceptrons = (0..config.classes)
            .map(|_| Perceptron::new(&config, rng))
            .collect();
        Ok(Network { config, perceptrons, state: NetworkState::Initialized })
    }

    /// Builds a network whose weights are determined by `config.seed`.
    pub fn seeded(config: NetworkConfig) -> Result<Network> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        Network::new(config, &mut rng)
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn perceptrons(&self) -> &[Perceptron] {
        &self.perceptrons
    }

    pub(crate) fn perceptrons_mut(&mut self) -> &mut [Perceptron] {
        &mut self.perceptrons
    }

    pub fn state(&self) -> NetworkState {
        self.state
    }

    /// Raw sigmoid output of every perceptron, in class order.
    pub fn activations(&self, pattern: &Pattern) -> Result<Vec<f64>> {
        self.perceptrons.iter().map(|p| p.activate(pattern)).collect()
    }

    /// Winner-take-all classification of `pattern`.
    pub fn infer(&self, pattern: &Pattern) -> Result<Decision> {
        let activations = self.activations(pattern)?;
        Ok(compete(&activations, self.config.threshold))
    }

    /// Runs the configured training regime over `samples`.
    pub fn train<R: Rng + ?Sized>(&mut self, samples: &[Sample], rng: &mut R) -> Result<TrainReport> {
        let report = train_loop(self, samples, rng)?;
        self.state = NetworkState::Trained;
        Ok(report)
    }

    /// Fraction of `samples` whose decision equals their expected one-hot vector.
    pub fn accuracy(&self, samples: &[Sample]) -> Result<f64> {
        if samples.is_empty() {
            return Ok(0.0);
        }
        let mut correct = 0;
        for sample in samples {
            if self.infer(&sample.pattern)?.as_slice() == sample.expected.bits() {
                correct += 1;
            }
        }
        Ok(correct as f64 / samples.len() as f64)
    }

    /// Snapshot of every perceptron's weights and bias, in class order.
    pub fn export_weights(&self) -> KnowledgeBase {
        let entries = self.perceptrons.iter()
            .map(|p| PerceptronSnapshot { weights: p.weights().clone(), bias: p.bias() })
            .collect();
        info!(perceptrons = self.perceptrons.len(), "exported knowledge base");
        KnowledgeBase { entries }
    }

    /// Replaces every perceptron with the snapshot at the same index.
    ///
    /// All-or-nothing: the knowledge base is validated in full before any
    /// perceptron is replaced.
    pub fn import_weights(&mut self, kb: &KnowledgeBase) -> Result<()> {
        let (rows, cols) = self.config.shape();
        kb.validate(rows, cols, self.config.classes)?;

        self.perceptrons = kb.entries.iter()
            .map(|e| Perceptron::from_parts(e.weights.clone(), e.bias, self.config.learning_rate))
            .collect();
        self.state = NetworkState::Trained;
        info!(perceptrons = self.perceptrons.len(), "imported knowledge base");
        Ok(())
    }

    /// Parses the text knowledge base and imports it.
    pub fn import_text(&mut self, text: &str) -> Result<()> {
        let (rows, cols) = self.config.shape();
        let kb = KnowledgeBase::parse_text(text, rows, cols, self.config.classes)?;
        self.import_weights(&kb)
    }

    /// Checks `pattern` against the configured shape without running inference.
    pub fn check_pattern(&self, pattern: &Pattern) -> Result<()> {
        if pattern.shape() != self.config.shape() {
            return Err(PerceptronError::ShapeMismatch {
                expected: self.config.shape(),
                actual: pattern.shape(),
            });
        }
        Ok(())
    }
}
