// Command-line front end for the vowel recognizer.
//
// `patterns_dir` holds one file per vowel (a.txt ... u.txt) of blank-line
// separated glyphs. Set RUST_LOG=debug to see per-epoch progress.
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueHint};
use rand::{rngs::StdRng, SeedableRng};

use ferrite_vowels::data::{builtin_vowels, load_image_pattern, load_training_set, DEFAULT_INK_CUTOFF};
use ferrite_vowels::telemetry::init_tracing;
use ferrite_vowels::{KnowledgeBase, Network, NetworkConfig, Pattern};

#[derive(Parser, Debug)]
#[command(author, version, about = "Recognize handwritten vowels with five Delta Rule perceptrons")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train on a directory of pattern files and write the knowledge base
    Train {
        /// Directory holding a.txt, e.txt, i.txt, o.txt and u.txt
        #[arg(value_hint = ValueHint::DirPath)]
        patterns_dir: PathBuf,

        /// Destination for the trained knowledge base
        #[arg(value_hint = ValueHint::FilePath)]
        knowledge_base: PathBuf,

        /// Network configuration (JSON); defaults are used when omitted
        #[arg(long, value_hint = ValueHint::FilePath)]
        config: Option<PathBuf>,
    },

    /// Classify a pixel-matrix text file or a photographed glyph
    Resolve {
        /// Knowledge base written by `train`
        #[arg(value_hint = ValueHint::FilePath)]
        knowledge_base: PathBuf,

        /// `.txt` pixel matrix, or any image the decoder understands
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,

        /// Network configuration (JSON); must match the one used for training
        #[arg(long, value_hint = ValueHint::FilePath)]
        config: Option<PathBuf>,
    },

    /// Write the default configuration as JSON
    Config {
        #[arg(value_hint = ValueHint::FilePath)]
        output: PathBuf,
    },

    /// Train on the built-in reference glyphs and classify each of them
    Demo {
        #[arg(long, value_hint = ValueHint::FilePath)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    match Cli::parse().command {
        Command::Train { patterns_dir, knowledge_base, config } => {
            train(&patterns_dir, &knowledge_base, load_config(config.as_deref())?)
        }
        Command::Resolve { knowledge_base, input, config } => {
            resolve(&knowledge_base, &input, load_config(config.as_deref())?)
        }
        Command::Config { output } => {
            NetworkConfig::default()
                .save_json(&output)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("Default configuration written to {}", output.display());
            Ok(())
        }
        Command::Demo { config } => demo(load_config(config.as_deref())?),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<NetworkConfig> {
    match path {
        Some(p) => NetworkConfig::load_json(p)
            .with_context(|| format!("loading config {}", p.display())),
        None => Ok(NetworkConfig::default()),
    }
}

fn train(patterns_dir: &Path, kb_path: &Path, config: NetworkConfig) -> anyhow::Result<()> {
    let samples = load_training_set(patterns_dir, config.rows, config.cols)
        .with_context(|| format!("loading patterns from {}", patterns_dir.display()))?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut network = Network::new(config, &mut rng)?;
    let report = network.train(&samples, &mut rng)?;
    let accuracy = network.accuracy(&samples)?;

    network.export_weights()
        .save_text(kb_path)
        .with_context(|| format!("writing knowledge base {}", kb_path.display()))?;

    println!("Trained on {} patterns ({} corrections).", samples.len(), report.corrections);
    println!("Training-set accuracy: {:.1}%", accuracy * 100.0);
    println!("Knowledge base written to {}", kb_path.display());
    Ok(())
}

fn resolve(kb_path: &Path, input: &Path, config: NetworkConfig) -> anyhow::Result<()> {
    let kb = KnowledgeBase::load_text(kb_path, config.rows, config.cols, config.classes)
        .with_context(|| format!("reading knowledge base {}", kb_path.display()))?;
    let mut network = Network::seeded(config)?;
    network.import_weights(&kb)?;

    let pattern = read_input(input, &network)?;
    let decision = network.infer(&pattern)?;

    println!("===============================");
    println!("{}", decision);
    println!("{}", decision.describe());
    println!("===============================");
    Ok(())
}

/// Trains on the built-in reference glyphs and classifies each of them.
fn demo(config: NetworkConfig) -> anyhow::Result<()> {
    let samples = builtin_vowels();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut network = Network::new(config, &mut rng)?;
    network.train(&samples, &mut rng)?;

    for sample in &samples {
        let decision = network.infer(&sample.pattern)?;
        println!("{}\n{}  ->  {}\n", sample.pattern, decision, decision.describe());
    }
    Ok(())
}

/// Text files are parsed as a pixel matrix; anything else is treated as an image.
fn read_input(input: &Path, network: &Network) -> anyhow::Result<Pattern> {
    let (rows, cols) = network.config().shape();
    let is_text = input.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("txt"));
    let pattern = if is_text {
        let text = std::fs::read_to_string(input)
            .with_context(|| format!("reading {}", input.display()))?;
        Pattern::parse(&text, rows, cols)?
    } else {
        load_image_pattern(input, rows, cols, DEFAULT_INK_CUTOFF)
            .with_context(|| format!("decoding image {}", input.display()))?
    };
    Ok(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_train_arguments() {
        let cli = Cli::try_parse_from(["ferrite-vowels", "train", "patterns", "kb.txt", "--config", "c.json"]).unwrap();
        match cli.command {
            Command::Train { patterns_dir, knowledge_base, config } => {
                assert_eq!(patterns_dir, PathBuf::from("patterns"));
                assert_eq!(knowledge_base, PathBuf::from("kb.txt"));
                assert_eq!(config, Some(PathBuf::from("c.json")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_without_config_and_demo() {
        let cli = Cli::try_parse_from(["ferrite-vowels", "resolve", "kb.txt", "glyph.png"]).unwrap();
        assert!(matches!(cli.command, Command::Resolve { config: None, .. }));
        let cli = Cli::try_parse_from(["ferrite-vowels", "demo"]).unwrap();
        assert!(matches!(cli.command, Command::Demo { config: None }));
    }

    #[test]
    fn test_missing_or_unknown_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["ferrite-vowels", "train", "patterns"]).is_err());
        assert!(Cli::try_parse_from(["ferrite-vowels", "classify", "x"]).is_err());
        assert!(Cli::try_parse_from(["ferrite-vowels"]).is_err());
    }
}
