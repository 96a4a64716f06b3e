use serde::{Serialize, Deserialize};

use crate::network::config::TrainingRegime;

/// Statistics for one epoch of training.
///
/// For `EpochBatchDelta` an epoch is a full pass over every perceptron and
/// sample; for `StochasticSampling` it aggregates `samples.len()` random draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Number of Delta Rule updates applied during this iteration.
    pub corrections: usize,
    pub elapsed_ms: u64,
}

/// Summary returned by `Network::train`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainReport {
    pub regime: TrainingRegime,
    pub iterations: usize,
    /// Total Delta Rule updates across all perceptrons.
    pub corrections: usize,
    pub epochs: Vec<EpochStats>,
}

impl TrainReport {
    /// First epoch after which no further corrections were made.
    ///
    /// Exact for `EpochBatchDelta`, where a correction-free pass means every
    /// perceptron agrees with every sample. For `StochasticSampling` a quiet
    /// window only means the drawn samples were already classified correctly.
    pub fn converged_at(&self) -> Option<usize> {
        let last_busy = self.epochs.iter().rposition(|e| e.corrections > 0);
        match last_busy {
            None => self.epochs.first().map(|e| e.epoch),
            Some(i) => self.epochs.get(i + 1).map(|e| e.epoch),
        }
    }
}
