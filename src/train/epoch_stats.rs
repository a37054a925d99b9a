use serde::{Serialize, Deserialize};

/// Per-epoch training statistics emitted by the training loop.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the loop
/// sends one `EpochStats` value at the end of every completed epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Epoch cap for this run.
    pub max_epoch: usize,
    /// Loss computed from this epoch's per-sample errors.
    pub loss: f64,
    /// Lowest loss seen so far, including this epoch.
    pub best_loss: f64,
    pub epochs_without_improvement: usize,
    /// Per-sample errors that made it into the update (failed batches excluded).
    pub samples: usize,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}

/// Why a training run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    ErrorBelowLimit,
    NoImprovementWithinPatience,
    MaxEpochReached,
}

/// Summary returned by `Network::train`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainOutcome {
    pub reason: StopReason,
    /// Epochs actually run.
    pub epochs: usize,
    /// `None` when no epoch ran.
    pub best_loss: Option<f64>,
    pub last_loss: Option<f64>,
}
