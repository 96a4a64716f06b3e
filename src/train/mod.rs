pub mod sample;
pub mod epoch_stats;
pub mod loop_fn;

pub use sample::Sample;
pub use epoch_stats::{EpochStats, TrainReport};
