use std::sync::{Mutex, PoisonError};
use std::thread;

use crate::error::{NnError, Result};
use crate::math::{Sample, Samples, Vector};
use crate::network::network::Network;
use crate::train::delta::{merge_deltas, Deltas};
use crate::train::trainer::train_sample;

/// Upper bound on batch tasks running at the same time.
pub const MAX_CONCURRENCY: usize = 10;

#[derive(Default)]
struct Accumulator {
    errors: Vector,
    deltas: Vec<Deltas>,
    first_failure: Option<NnError>,
}

/// Runs one epoch: every batch is trained on its own thread, the batch
/// deltas are averaged and applied to the network once.
///
/// Returns every per-sample error from the batches that succeeded. A failed
/// batch is logged and left out of the update; if no batch succeeds the
/// first failure is returned and the network is untouched.
pub fn train_epoch(network: &mut Network, samples: &Samples) -> Result<Vector> {
    let batch_size = (samples.len() / MAX_CONCURRENCY).max(1);
    let batches = samples.split(batch_size);
    let acc = Mutex::new(Accumulator::default());

    {
        let network: &Network = network;
        for (wave_index, wave) in batches.chunks(MAX_CONCURRENCY).enumerate() {
            log::debug!("training {} batches of up to {batch_size} samples", wave.len());
            thread::scope(|scope| {
                for (i, batch) in wave.iter().enumerate() {
                    let acc = &acc;
                    scope.spawn(move || {
                        let result = train_batch(network, batch);
                        let mut acc = acc.lock().unwrap_or_else(PoisonError::into_inner);
                        match result {
                            Ok((errors, delta)) => {
                                acc.errors.extend(errors);
                                acc.deltas.push(delta);
                            }
                            Err(err) => {
                                log::warn!("batch {} failed: {err}", wave_index * MAX_CONCURRENCY + i);
                                acc.first_failure.get_or_insert(err);
                            }
                        }
                    });
                }
            });
        }
    }

    let acc = acc.into_inner().unwrap_or_else(PoisonError::into_inner);
    if acc.deltas.is_empty() {
        if let Some(err) = acc.first_failure {
            return Err(err);
        }
    }

    let merged = merge_deltas(&acc.deltas);
    network.update_weights(&merged)?;
    Ok(acc.errors)
}

/// Trains a batch sequentially and averages its per-sample deltas.
pub fn train_batch(network: &Network, batch: &[Sample]) -> Result<(Vector, Deltas)> {
    let mut errors = Vec::with_capacity(batch.len());
    let mut deltas = Vec::with_capacity(batch.len());

    for sample in batch {
        let (error, delta) = train_sample(network, sample)?;
        errors.push(error);
        deltas.push(delta);
    }

    Ok((errors, merge_deltas(&deltas)))
}
