pub mod error;
pub mod math;
pub mod activation;
pub mod data;
pub mod perceptron;
pub mod network;
pub mod train;
pub mod knowledge;
pub mod telemetry;

// Convenience re-exports
pub use error::{PerceptronError, Result};
pub use math::matrix::Matrix;
pub use data::{Pattern, ClassLabel, ExpectedLabel};
pub use perceptron::perceptron::Perceptron;
pub use network::{Network, NetworkConfig, NetworkState, TrainingRegime, BiasInit, Decision, compete};
pub use train::{Sample, TrainReport, EpochStats};
pub use knowledge::{KnowledgeBase, PerceptronSnapshot};
