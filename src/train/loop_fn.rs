use std::time::Instant;

use rand::Rng;
use tracing::{debug, info};

use crate::activation::sigmoid::binarize;
use crate::error::{PerceptronError, Result};
use crate::network::config::{NetworkConfig, TrainingRegime};
use crate::network::network::Network;
use crate::perceptron::perceptron::Perceptron;
use crate::train::epoch_stats::{EpochStats, TrainReport};
use crate::train::sample::Sample;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` for `config.iterations` iterations using its configured
/// regime and returns per-epoch statistics.
///
/// An epoch is one full pass for `EpochBatchDelta` and a window of
/// `samples.len()` draws for `StochasticSampling`; the last window may be short.
///
/// The whole sample set is validated before any weight is touched, so a
/// rejected call leaves the network exactly as it was.
///
/// `rng` is only consulted by `StochasticSampling`.
pub(crate) fn train_loop<R: Rng + ?Sized>(
    network: &mut Network,
    samples: &[Sample],
    rng: &mut R,
) -> Result<TrainReport> {
    let config = network.config().clone();
    validate_samples(&config, samples)?;

    info!(
        regime = ?config.regime,
        iterations = config.iterations,
        samples = samples.len(),
        "training started"
    );

    let perceptrons = network.perceptrons_mut();
    let window = match config.regime {
        TrainingRegime::EpochBatchDelta => 1,
        TrainingRegime::StochasticSampling => samples.len(),
    };
    let total_epochs = (config.iterations + window - 1) / window;
    let mut epochs = Vec::with_capacity(total_epochs);
    let mut corrections = 0;

    let mut t_start = Instant::now();
    let mut epoch_corrections = 0;
    for iteration in 1..=config.iterations {
        epoch_corrections += match config.regime {
            TrainingRegime::EpochBatchDelta => run_full_pass(perceptrons, samples)?,
            TrainingRegime::StochasticSampling => {
                let sample = &samples[rng.gen_range(0..samples.len())];
                run_single_draw(perceptrons, sample)?
            }
        };

        if iteration % window == 0 || iteration == config.iterations {
            let epoch = epochs.len() + 1;
            debug!(epoch, corrections = epoch_corrections, "epoch finished");
            epochs.push(EpochStats {
                epoch,
                total_epochs,
                corrections: epoch_corrections,
                elapsed_ms: t_start.elapsed().as_millis() as u64,
            });
            corrections += epoch_corrections;
            epoch_corrections = 0;
            t_start = Instant::now();
        }
    }

    let report = TrainReport {
        regime: config.regime,
        iterations: config.iterations,
        corrections,
        epochs,
    };
    info!(corrections, converged_at = ?report.converged_at(), "training finished");
    Ok(report)
}

// ---------------------------------------------------------------------------
// Regimes
// ---------------------------------------------------------------------------

/// Every perceptron against every sample. Gated on the rounded output,
/// corrected with the continuous activation.
fn run_full_pass(perceptrons: &mut [Perceptron], samples: &[Sample]) -> Result<usize> {
    let mut corrections = 0;
    for (i, perceptron) in perceptrons.iter_mut().enumerate() {
        for sample in samples {
            let expected = sample.expected.bit(i);
            let activation = perceptron.activate(&sample.pattern)?;
            if binarize(activation) != expected {
                perceptron.update(&sample.pattern, expected, activation)?;
                corrections += 1;
            }
        }
    }
    Ok(corrections)
}

/// One sample against every perceptron. Gated on and corrected with the
/// rounded output.
fn run_single_draw(perceptrons: &mut [Perceptron], sample: &Sample) -> Result<usize> {
    let outputs = perceptrons.iter()
        .map(|p| p.activate(&sample.pattern).map(binarize))
        .collect::<Result<Vec<u8>>>()?;

    let mut corrections = 0;
    for (i, (perceptron, output)) in perceptrons.iter_mut().zip(outputs).enumerate() {
        let expected = sample.expected.bit(i);
        if output != expected {
            perceptron.update(&sample.pattern, expected, f64::from(output))?;
            corrections += 1;
        }
    }
    Ok(corrections)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn validate_samples(config: &NetworkConfig, samples: &[Sample]) -> Result<()> {
    if samples.is_empty() {
        return Err(PerceptronError::InvalidConfig("training set is empty".into()));
    }
    for sample in samples {
        if sample.pattern.shape() != config.shape() {
            return Err(PerceptronError::ShapeMismatch {
                expected: config.shape(),
                actual: sample.pattern.shape(),
            });
        }
        if sample.expected.len() != config.classes {
            return Err(PerceptronError::InvalidLabel(format!(
                "label has {} classes, network has {}",
                sample.expected.len(),
                config.classes
            )));
        }
    }
    Ok(())
}
