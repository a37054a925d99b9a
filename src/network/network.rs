use std::path::Path;

use rand::Rng;
use rayon::prelude::*;

use crate::activation::activation::ActivationFunction;
use crate::error::{NnError, Result};
use crate::layers::dense::{Layer, PARALLEL_THRESHOLD};
use crate::math::{Samples, Vector};
use crate::network::profile::NetworkProfile;
use crate::train::delta::Deltas;
use crate::train::epoch_stats::TrainOutcome;
use crate::train::loop_fn::train_loop;
use crate::train::train_config::{TrainConfig, TrainProps};

/// A feedforward stack of fully-connected layers plus its training setup.
///
/// Layer `i`'s target size always equals layer `i + 1`'s source size; the
/// first layer reads `input_size` values and the last writes `output_size`.
#[derive(Debug)]
pub struct Network {
    input_size: usize,
    output_size: usize,
    layers: Vec<Layer>,
    config: TrainConfig,
    loss_history: Vec<f64>,
}

impl Network {
    /// Single-layer network with random weights and the default config.
    pub fn new(input_size: usize, output_size: usize, activation: ActivationFunction) -> Result<Network> {
        Network::with_rng(input_size, output_size, activation, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        input_size: usize,
        output_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Result<Network> {
        if input_size == 0 || output_size == 0 {
            return Err(NnError::InvalidShape(format!(
                "network sizes must be positive, got {input_size} -> {output_size}"
            )));
        }

        Ok(Network {
            input_size,
            output_size,
            layers: vec![Layer::new(input_size, output_size, activation, rng)],
            config: TrainConfig::default(),
            loss_history: Vec::new(),
        })
    }

    /// Assembles a network from ready-made layers, checking the chain.
    pub fn from_layers(layers: Vec<Layer>) -> Result<Network> {
        let (Some(first), Some(last)) = (layers.first(), layers.last()) else {
            return Err(NnError::EmptyNetwork);
        };
        let (input_size, output_size) = (first.source_size(), last.target_size());
        check_chain(input_size, output_size, &layers)?;

        Ok(Network {
            input_size,
            output_size,
            layers,
            config: TrainConfig::default(),
            loss_history: Vec::new(),
        })
    }

    /// Inserts a hidden layer of `size` neurons in front of the output.
    ///
    /// The current last layer is regenerated to emit `size` values (keeping
    /// its source size and activation), then a fresh `size -> output` layer
    /// with `activation` is appended.
    pub fn add_layer(&mut self, size: usize, activation: ActivationFunction) -> Result<()> {
        self.add_layer_with_rng(size, activation, &mut rand::thread_rng())
    }

    pub fn add_layer_with_rng<R: Rng + ?Sized>(
        &mut self,
        size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Result<()> {
        if size == 0 {
            return Err(NnError::InvalidShape("hidden layer size must be positive".to_string()));
        }

        if let Some(last) = self.layers.last_mut() {
            *last = Layer::new(last.source_size(), size, last.activation, rng);
        }
        self.layers.push(Layer::new(size, self.output_size, activation, rng));
        Ok(())
    }

    pub fn set_props(&mut self, props: TrainProps) {
        self.config.apply(props);
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Loss of every epoch trained so far, oldest first.
    pub fn loss_history(&self) -> &[f64] {
        &self.loss_history
    }

    pub(crate) fn record_loss(&mut self, loss: f64) {
        self.loss_history.push(loss);
    }

    /// Forward pass; returns every layer's activated output in order, the
    /// last entry being the network output.
    pub fn forward(&self, input: &[f64]) -> Result<Vec<Vector>> {
        if input.len() != self.input_size {
            return Err(NnError::dimension("network input", self.input_size, input.len()));
        }

        let mut outputs: Vec<Vector> = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let next = layer.propagate(outputs.last().map_or(input, Vec::as_slice))?;
            outputs.push(next);
        }
        Ok(outputs)
    }

    /// Runs `input` through the network and classifies each output value
    /// (1 when strictly above 0.5).
    pub fn test(&self, input: &[f64]) -> Result<(Vector, Vec<u8>)> {
        let output = self.forward(input)?.pop().ok_or(NnError::EmptyNetwork)?;
        let classes = output.iter().map(|&y| u8::from(y > 0.5)).collect();
        Ok((output, classes))
    }

    /// Trains until the loss limit, the patience, or the epoch cap is hit.
    pub fn train(&mut self, samples: &Samples) -> Result<TrainOutcome> {
        train_loop(self, samples)
    }

    /// Adds one delta per layer into the live parameters. Layers are updated
    /// in parallel when the output layer is wide. An empty set is a no-op.
    pub(crate) fn update_weights(&mut self, deltas: &Deltas) -> Result<()> {
        let Some(last) = deltas.last() else {
            return Ok(());
        };
        if deltas.len() != self.layers.len() {
            return Err(NnError::dimension("layer deltas", self.layers.len(), deltas.len()));
        }

        if last.biases.len() >= PARALLEL_THRESHOLD {
            self.layers
                .par_iter_mut()
                .zip(deltas.par_iter())
                .try_for_each(|(layer, delta)| layer.apply_delta(delta))
        } else {
            self.layers
                .iter_mut()
                .zip(deltas)
                .try_for_each(|(layer, delta)| layer.apply_delta(delta))
        }
    }

    /// Flat record holding everything needed to rebuild this network.
    pub fn to_profile(&self) -> NetworkProfile {
        NetworkProfile::capture(self)
    }

    /// Rebuilds a network, restoring strategies through their registries.
    pub fn from_profile(profile: &NetworkProfile) -> Result<Network> {
        let layers = profile.restore_layers()?;
        if layers.is_empty() {
            return Err(NnError::EmptyNetwork);
        }
        check_chain(profile.input_size, profile.output_size, &layers)?;

        let mut config = TrainConfig::default();
        config.apply(profile.props.restore()?);

        Ok(Network {
            input_size: profile.input_size,
            output_size: profile.output_size,
            layers,
            config,
            loss_history: Vec::new(),
        })
    }

    /// Serializes the network to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_profile().save_json(path)
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Network> {
        Network::from_profile(&NetworkProfile::load_json(path)?)
    }
}

fn check_chain(input_size: usize, output_size: usize, layers: &[Layer]) -> Result<()> {
    let mut expected = input_size;
    for (i, layer) in layers.iter().enumerate() {
        if layer.source_size() != expected {
            return Err(NnError::InvalidShape(format!(
                "layer {i} reads {} values but receives {expected}",
                layer.source_size()
            )));
        }
        expected = layer.target_size();
    }
    if expected != output_size {
        return Err(NnError::InvalidShape(format!(
            "last layer emits {expected} values, network output is {output_size}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Matrix;
    use crate::train::delta::Delta;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(Network::new(0, 1, ActivationFunction::Sigmoid).is_err());
        assert!(Network::new(2, 0, ActivationFunction::Sigmoid).is_err());
    }

    #[test]
    fn add_layer_rewires_last_layer() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut network = Network::with_rng(3, 2, ActivationFunction::ReLU, &mut rng).unwrap();
        network.add_layer_with_rng(5, ActivationFunction::Sigmoid, &mut rng).unwrap();

        let shapes: Vec<_> = network.layers().iter().map(|l| (l.source_size(), l.target_size())).collect();
        assert_eq!(shapes, vec![(3, 5), (5, 2)]);
        assert_eq!(network.layers()[0].activation, ActivationFunction::ReLU);
        assert_eq!(network.layers()[1].activation, ActivationFunction::Sigmoid);
        assert!(network.add_layer(0, ActivationFunction::Tanh).is_err());
    }

    #[test]
    fn from_layers_checks_chain() {
        let mut rng = StdRng::seed_from_u64(2);
        let a = Layer::new(2, 3, ActivationFunction::Tanh, &mut rng);
        let b = Layer::new(4, 1, ActivationFunction::Tanh, &mut rng);
        assert!(matches!(Network::from_layers(vec![a, b]), Err(NnError::InvalidShape(_))));
        assert!(matches!(Network::from_layers(vec![]), Err(NnError::EmptyNetwork)));
    }

    #[test]
    fn test_thresholds_output() {
        let layer = Layer::from_parts(
            1,
            2,
            Matrix::from_data(vec![vec![1.0, -1.0]]),
            vec![0.0, 0.0],
            ActivationFunction::Sigmoid,
        )
        .unwrap();
        let network = Network::from_layers(vec![layer]).unwrap();
        let (output, classes) = network.test(&[2.0]).unwrap();
        assert_eq!(output.len(), 2);
        assert_eq!(classes, vec![1, 0]);
    }

    #[test]
    fn update_weights_checks_layer_count() {
        let mut network = Network::new(2, 1, ActivationFunction::Sigmoid).unwrap();
        let before = network.layers().to_vec();
        assert!(network.update_weights(&Deltas::new()).is_ok());
        assert_eq!(network.layers(), before.as_slice());

        let delta = Delta { weights: Matrix::zeros(2, 1), biases: vec![0.0] };
        assert!(network.update_weights(&vec![delta.clone(), delta]).is_err());
    }

    #[test]
    fn wide_update_runs_in_parallel_and_matches() {
        let mut rng = StdRng::seed_from_u64(5);
        let width = PARALLEL_THRESHOLD;
        let mut network = Network::with_rng(3, width, ActivationFunction::Identity, &mut rng).unwrap();
        network.add_layer_with_rng(4, ActivationFunction::Identity, &mut rng).unwrap();
        let before = network.layers().to_vec();

        let deltas: Deltas = before
            .iter()
            .map(|l| Delta {
                weights: Matrix::zeros(l.source_size(), l.target_size()).map(|_| 0.25),
                biases: vec![-0.5; l.target_size()],
            })
            .collect();
        network.update_weights(&deltas).unwrap();

        for (after, before) in network.layers().iter().zip(&before) {
            assert!((after.weights.data[0][0] - before.weights.data[0][0] - 0.25).abs() < 1e-12);
            assert!((after.biases[0] - before.biases[0] + 0.5).abs() < 1e-12);
        }
    }
}
