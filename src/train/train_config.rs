use std::sync::mpsc;

use crate::loss::{Loss, RmseLoss};
use crate::optim::{Optimizer, Sgd};
use crate::train::epoch_stats::EpochStats;

pub const DEFAULT_ERR_LIMIT: f64 = 0.001;
pub const DEFAULT_MAX_EPOCH: usize = 1000;
pub const DEFAULT_PATIENCE: usize = 100;

/// Training configuration owned by a `Network`.
///
/// # Fields
/// - `loss`        — reduces an epoch's per-sample errors to one scalar
/// - `optimizer`   — scales raw gradient components into weight deltas
/// - `err_limit`   — training stops once the epoch loss is at or below this
/// - `max_epoch`   — hard cap on the number of epochs
/// - `patience`    — consecutive epochs without a new best loss before stopping
/// - `progress_tx` — optional channel sender; one `EpochStats` is sent per
///                   completed epoch. A dropped receiver is ignored.
#[derive(Debug)]
pub struct TrainConfig {
    pub loss: Box<dyn Loss>,
    pub optimizer: Box<dyn Optimizer>,
    pub err_limit: f64,
    pub max_epoch: usize,
    pub patience: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            loss: Box::new(RmseLoss),
            optimizer: Box::new(Sgd::default()),
            err_limit: DEFAULT_ERR_LIMIT,
            max_epoch: DEFAULT_MAX_EPOCH,
            patience: DEFAULT_PATIENCE,
            progress_tx: None,
        }
    }
}

/// Partial update for a [`TrainConfig`]; only `Some` fields override.
#[derive(Debug, Default)]
pub struct TrainProps {
    pub loss: Option<Box<dyn Loss>>,
    pub optimizer: Option<Box<dyn Optimizer>>,
    pub err_limit: Option<f64>,
    pub max_epoch: Option<usize>,
    pub patience: Option<usize>,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    pub fn apply(&mut self, props: TrainProps) {
        if let Some(loss) = props.loss {
            self.loss = loss;
        }
        if let Some(optimizer) = props.optimizer {
            self.optimizer = optimizer;
        }
        if let Some(err_limit) = props.err_limit {
            self.err_limit = err_limit;
        }
        if let Some(max_epoch) = props.max_epoch {
            self.max_epoch = max_epoch;
        }
        if let Some(patience) = props.patience {
            self.patience = patience;
        }
        if props.progress_tx.is_some() {
            self.progress_tx = props.progress_tx;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loss::MaeLoss;

    #[test]
    fn apply_overrides_only_given_fields() {
        let mut config = TrainConfig::default();
        config.apply(TrainProps {
            loss: Some(Box::new(MaeLoss)),
            max_epoch: Some(42),
            ..Default::default()
        });
        assert_eq!(config.loss.name(), "mae");
        assert_eq!(config.optimizer.name(), "sgd");
        assert_eq!(config.max_epoch, 42);
        assert_eq!(config.err_limit, DEFAULT_ERR_LIMIT);
        assert_eq!(config.patience, DEFAULT_PATIENCE);
    }
}
