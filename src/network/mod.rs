pub mod config;
pub mod competition;
pub mod network;

pub use config::{NetworkConfig, TrainingRegime, BiasInit, WeightRange};
pub use competition::{compete, Decision};
pub use network::{Network, NetworkState};
