pub mod delta;
pub mod trainer;
pub mod epoch;
pub mod epoch_stats;
pub mod train_config;
pub mod loop_fn;

pub use delta::{merge_deltas, Delta, Deltas};
pub use trainer::{calculate_delta, train_sample};
pub use epoch::{train_batch, train_epoch, MAX_CONCURRENCY};
pub use epoch_stats::{EpochStats, StopReason, TrainOutcome};
pub use train_config::{TrainConfig, TrainProps};
pub use loop_fn::train_loop;
