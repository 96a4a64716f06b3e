//! End-to-end recognition of the reference vowel glyphs.

use ferrite_vowels::data::{builtin_vowels, class_file_name, glyph, load_training_set};
use ferrite_vowels::{ClassLabel, Network, NetworkConfig, TrainingRegime};
use rand::{rngs::StdRng, SeedableRng};

fn train_and_check(config: NetworkConfig) {
    let samples = builtin_vowels();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut net = Network::new(config, &mut rng).unwrap();
    net.train(&samples, &mut rng).unwrap();

    for label in ClassLabel::ALL {
        let decision = net.infer(&glyph(label)).unwrap();
        assert_eq!(decision.label(), Some(label), "decision {} for {}", decision, label);
    }
    assert_eq!(net.accuracy(&samples).unwrap(), 1.0);
}

#[test]
fn test_stochastic_regime_recognizes_every_vowel() {
    train_and_check(NetworkConfig::default());
}

#[test]
fn test_epoch_regime_recognizes_every_vowel() {
    train_and_check(NetworkConfig::epoch_batch());
}

#[test]
fn test_recognition_holds_across_seeds() {
    for seed in [1, 2, 3, 4] {
        train_and_check(NetworkConfig { seed, ..NetworkConfig::default() });
        train_and_check(NetworkConfig {
            seed,
            regime: TrainingRegime::EpochBatchDelta,
            iterations: 200,
            ..NetworkConfig::default()
        });
    }
}

#[test]
fn test_untrained_network_on_blank_page_with_high_threshold() {
    let net = Network::seeded(NetworkConfig { threshold: 1.0, ..NetworkConfig::default() }).unwrap();
    let blank = ferrite_vowels::Pattern::parse(&"0 0 0 0 0 0 0 0 0 0\n".repeat(16), 16, 10).unwrap();
    assert_eq!(net.infer(&blank).unwrap().winner(), None);
}

#[test]
fn test_load_training_set_from_directory() {
    let dir = std::env::temp_dir().join(format!("ferrite_vowels_patterns_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    for label in ClassLabel::ALL {
        // Two copies of the glyph plus one malformed block that must be skipped.
        let g = glyph(label).to_string();
        let text = format!("{}\n{}\n0 1 x\n", g, g);
        std::fs::write(dir.join(class_file_name(label)), text).unwrap();
    }

    let samples = load_training_set(&dir, 16, 10).unwrap();
    assert_eq!(samples.len(), 10);
    assert_eq!(samples[0].expected, ClassLabel::A.one_hot());
    assert_eq!(samples[9].expected, ClassLabel::U.one_hot());

    std::fs::remove_dir_all(&dir).ok();
}
