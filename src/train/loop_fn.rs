use std::time::Instant;

use crate::error::{NnError, Result};
use crate::math::Samples;
use crate::network::network::Network;
use crate::train::epoch::train_epoch;
use crate::train::epoch_stats::{EpochStats, StopReason, TrainOutcome};

/// Number of progress lines logged over a full run.
const LOG_CHECKPOINTS: usize = 20;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` on `samples` until one of the stop conditions holds:
/// - the epoch loss is at or below `err_limit`,
/// - `patience` consecutive epochs brought no new best loss,
/// - `max_epoch` epochs have run.
///
/// Every sample is checked against the network shape before the first
/// epoch, so a malformed set fails without touching the weights. A failure
/// raised inside an epoch aborts the run; updates from earlier epochs stay.
pub fn train_loop(network: &mut Network, samples: &Samples) -> Result<TrainOutcome> {
    validate_samples(network, samples)?;

    let max_epoch = network.config().max_epoch;
    let err_limit = network.config().err_limit;
    let patience = network.config().patience;

    let mut best_loss = f64::MAX;
    let mut epochs_without_improvement = 0;
    let mut last_loss = None;

    for epoch in 0..max_epoch {
        let t_start = Instant::now();

        let errors = train_epoch(network, samples)?;
        let loss = network.config().loss.calculate(&errors);
        network.record_loss(loss);
        last_loss = Some(loss);

        if loss < best_loss {
            best_loss = loss;
            epochs_without_improvement = 0;
        } else {
            epochs_without_improvement += 1;
        }

        if is_checkpoint(epoch, max_epoch) {
            log::info!("training in epoch {epoch} with loss: {loss:.6}");
        } else {
            log::debug!("epoch {epoch} loss: {loss:.6}");
        }

        if let Some(ref tx) = network.config().progress_tx {
            let stats = EpochStats {
                epoch: epoch + 1,
                max_epoch,
                loss,
                best_loss,
                epochs_without_improvement,
                samples: errors.len(),
                elapsed_ms: t_start.elapsed().as_millis() as u64,
            };
            // A dropped receiver only means nobody is watching.
            let _ = tx.send(stats);
        }

        let stop = if loss <= err_limit {
            log::info!("stopping early: loss ({loss:.6}) is below threshold {err_limit}");
            Some(StopReason::ErrorBelowLimit)
        } else if epochs_without_improvement >= patience {
            log::info!("stopping early: no improvement in last {patience} epochs");
            Some(StopReason::NoImprovementWithinPatience)
        } else {
            None
        };

        if let Some(reason) = stop {
            return Ok(TrainOutcome {
                reason,
                epochs: epoch + 1,
                best_loss: Some(best_loss),
                last_loss,
            });
        }
    }

    log::info!("training completed after {max_epoch} epochs with best loss: {best_loss:.6}");
    Ok(TrainOutcome {
        reason: StopReason::MaxEpochReached,
        epochs: max_epoch,
        best_loss: last_loss.map(|_| best_loss),
        last_loss,
    })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Short runs (at most `LOG_CHECKPOINTS` epochs) log every epoch at
/// `debug` only; longer runs report about `LOG_CHECKPOINTS` lines at `info`.
fn is_checkpoint(epoch: usize, max_epoch: usize) -> bool {
    max_epoch > LOG_CHECKPOINTS && epoch % (max_epoch / LOG_CHECKPOINTS) == 0
}

fn validate_samples(network: &Network, samples: &Samples) -> Result<()> {
    if samples.is_empty() {
        return Err(NnError::DivisionByZero("training samples"));
    }
    for sample in samples {
        if sample.feature.len() != network.input_size() {
            return Err(NnError::dimension("sample feature", network.input_size(), sample.feature.len()));
        }
        if sample.target.len() != network.output_size() {
            return Err(NnError::dimension("sample target", network.output_size(), sample.target.len()));
        }
    }
    Ok(())
}
