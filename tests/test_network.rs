//! Behavioural tests for the perceptron ensemble.
//!
//! Tests cover:
//! - Sigmoid output range
//! - Inference idempotence
//! - Convergence on a single separable pattern under both regimes
//! - Gating: agreeing perceptrons are never touched
//! - Competition decisions
//! - Exact correction term of each regime

use approx::assert_relative_eq;
use ferrite_vowels::{
    compete, ClassLabel, KnowledgeBase, Matrix, Network, NetworkConfig, NetworkState, Pattern,
    Perceptron, PerceptronSnapshot, Sample, TrainingRegime,
};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn small_config(regime: TrainingRegime) -> NetworkConfig {
    NetworkConfig {
        rows: 3,
        cols: 3,
        iterations: 400,
        threshold: 0.5,
        regime,
        ..NetworkConfig::default()
    }
}

fn cross() -> Pattern {
    Pattern::from_rows(vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]]).unwrap()
}

#[test]
fn test_infer_is_idempotent() {
    let net = Network::seeded(small_config(TrainingRegime::StochasticSampling)).unwrap();
    let first = net.infer(&cross()).unwrap();
    let second = net.infer(&cross()).unwrap();
    assert_eq!(first, second);
    assert_eq!(net.activations(&cross()).unwrap(), net.activations(&cross()).unwrap());
}

#[test]
fn test_single_pattern_convergence_epoch_regime() {
    let mut net = Network::seeded(NetworkConfig {
        bias_init: ferrite_vowels::BiasInit::Constant(-1.8),
        ..small_config(TrainingRegime::EpochBatchDelta)
    })
    .unwrap();
    let samples = vec![Sample::new(cross(), ClassLabel::A.one_hot())];
    let report = net.train(&samples, &mut StdRng::seed_from_u64(3)).unwrap();

    let acts = net.activations(&cross()).unwrap();
    assert!(acts[0] > 0.5, "{:?}", acts);
    assert!(acts[1..].iter().all(|&a| a < 0.5), "{:?}", acts);
    assert!(report.converged_at().is_some());
    assert_eq!(report.epochs.len(), 400);
}

#[test]
fn test_single_pattern_convergence_stochastic_regime() {
    let mut net = Network::seeded(small_config(TrainingRegime::StochasticSampling)).unwrap();
    let samples = vec![Sample::new(cross(), ClassLabel::U.one_hot())];
    net.train(&samples, &mut StdRng::seed_from_u64(3)).unwrap();

    let acts = net.activations(&cross()).unwrap();
    assert!(acts[4] > 0.5, "{:?}", acts);
    assert!(acts[..4].iter().all(|&a| a < 0.5), "{:?}", acts);
    assert_eq!(net.infer(&cross()).unwrap().label(), Some(ClassLabel::U));
}

#[test]
fn test_agreeing_perceptrons_are_left_untouched() {
    for regime in [TrainingRegime::EpochBatchDelta, TrainingRegime::StochasticSampling] {
        let mut net = Network::seeded(small_config(regime)).unwrap();
        let samples = vec![Sample::new(cross(), ClassLabel::E.one_hot())];
        net.train(&samples, &mut StdRng::seed_from_u64(5)).unwrap();
        let trained = net.perceptrons().to_vec();

        // Everything already agrees, so another round must be a no-op.
        let report = net.train(&samples, &mut StdRng::seed_from_u64(6)).unwrap();
        assert_eq!(report.corrections, 0);
        assert_eq!(net.perceptrons(), trained.as_slice());
    }
}

#[test]
fn test_same_seed_same_network() {
    let config = small_config(TrainingRegime::StochasticSampling);
    let a = Network::seeded(config.clone()).unwrap();
    let b = Network::seeded(config.clone()).unwrap();
    assert_eq!(a.perceptrons(), b.perceptrons());

    let c = Network::seeded(NetworkConfig { seed: 7, ..config }).unwrap();
    assert_ne!(a.perceptrons(), c.perceptrons());
}

#[test]
fn test_competition_examples() {
    assert_eq!(compete(&[0.9, 0.2, 0.95, 0.1, 0.0], 0.5).as_slice(), &[0, 0, 1, 0, 0]);
    assert_eq!(compete(&[0.1, 0.2, 0.1, 0.05, 0.0], 0.5).as_slice(), &[0, 0, 0, 0, 0]);
}

#[test]
fn test_perceptron_update_matches_delta_rule() {
    let mut p = Perceptron::from_parts(Matrix::zeros(3, 3), 0.0, 0.05);
    let activation = p.activate(&cross()).unwrap();
    assert_relative_eq!(activation, 0.5);
    p.update(&cross(), 1, activation).unwrap();
    // 0.05 * (1 - 0.5) on every inked pixel and on the bias.
    assert_relative_eq!(p.weights().data[1][1], 0.025);
    assert_relative_eq!(p.weights().data[0][0], 0.0);
    assert_relative_eq!(p.bias(), 0.025);
}

/// Five zero-weight perceptrons over a 1x2 grid, trained for one iteration on
/// a single `[1 0]` sample labelled `a`. Every unit starts at exactly 0.5,
/// which rounds to 1, so units 1..5 disagree and unit 0 agrees.
fn one_step_from_zero(regime: TrainingRegime) -> (Network, usize) {
    let config = NetworkConfig {
        rows: 1,
        cols: 2,
        iterations: 1,
        learning_rate: 0.05,
        regime,
        ..NetworkConfig::default()
    };
    let mut net = Network::seeded(config).unwrap();
    let zero = PerceptronSnapshot { weights: Matrix::zeros(1, 2), bias: 0.0 };
    net.import_weights(&KnowledgeBase { entries: vec![zero; 5] }).unwrap();

    let sample = Sample::new(Pattern::from_rows(vec![vec![1, 0]]).unwrap(), ClassLabel::A.one_hot());
    let report = net.train(&[sample], &mut StdRng::seed_from_u64(0)).unwrap();
    (net, report.corrections)
}

#[test]
fn test_epoch_regime_corrects_with_continuous_activation() {
    let (net, corrections) = one_step_from_zero(TrainingRegime::EpochBatchDelta);
    assert_eq!(corrections, 4);
    assert_eq!(net.state(), NetworkState::Trained);

    let agreeing = &net.perceptrons()[0];
    assert_eq!(agreeing.weights().data, vec![vec![0.0, 0.0]]);
    assert_eq!(agreeing.bias(), 0.0);
    for p in &net.perceptrons()[1..] {
        // 0.05 * (0 - 0.5)
        assert_relative_eq!(p.weights().data[0][0], -0.025);
        assert_relative_eq!(p.weights().data[0][1], 0.0);
        assert_relative_eq!(p.bias(), -0.025);
    }
}

#[test]
fn test_stochastic_regime_corrects_with_rounded_output() {
    let (net, corrections) = one_step_from_zero(TrainingRegime::StochasticSampling);
    assert_eq!(corrections, 4);

    let agreeing = &net.perceptrons()[0];
    assert_eq!(agreeing.weights().data, vec![vec![0.0, 0.0]]);
    assert_eq!(agreeing.bias(), 0.0);
    for p in &net.perceptrons()[1..] {
        // 0.05 * (0 - 1)
        assert_relative_eq!(p.weights().data[0][0], -0.05);
        assert_relative_eq!(p.weights().data[0][1], 0.0);
        assert_relative_eq!(p.bias(), -0.05);
    }
}

#[test]
fn test_stochastic_report_groups_draws_by_sample_count() {
    let mut net = Network::seeded(NetworkConfig {
        iterations: 10,
        ..small_config(TrainingRegime::StochasticSampling)
    })
    .unwrap();
    let samples = vec![
        Sample::new(cross(), ClassLabel::A.one_hot()),
        Sample::new(Pattern::from_rows(vec![vec![1, 0, 1], vec![0, 1, 0], vec![1, 0, 1]]).unwrap(), ClassLabel::E.one_hot()),
        Sample::new(Pattern::from_rows(vec![vec![1, 1, 1], vec![1, 0, 1], vec![1, 1, 1]]).unwrap(), ClassLabel::O.one_hot()),
    ];
    let report = net.train(&samples, &mut StdRng::seed_from_u64(11)).unwrap();

    // 10 draws over 3 samples: windows of 3, 3, 3 and a final 1.
    assert_eq!(report.iterations, 10);
    assert_eq!(report.epochs.len(), 4);
    assert!(report.epochs.iter().all(|e| e.total_epochs == 4));
    assert_eq!(report.epochs.iter().map(|e| e.corrections).sum::<usize>(), report.corrections);
    assert!(report.corrections <= 10 * 5);
}

proptest! {
    #[test]
    fn prop_activation_strictly_inside_unit_interval(
        seed in any::<u64>(),
        bits in prop::collection::vec(0u8..=1, 12),
    ) {
        let config = NetworkConfig { rows: 3, cols: 4, ..NetworkConfig::default() };
        let p = Perceptron::new(&config, &mut StdRng::seed_from_u64(seed));
        let pattern = Pattern::from_rows(bits.chunks(4).map(|c| c.to_vec()).collect()).unwrap();
        let a = p.activate(&pattern).unwrap();
        prop_assert!(a > 0.0 && a < 1.0);
    }
}
