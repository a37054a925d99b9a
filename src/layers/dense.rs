use rand::Rng;
use rayon::prelude::*;

use crate::activation::activation::ActivationFunction;
use crate::error::{NnError, Result};
use crate::math::{Matrix, Vector};
use crate::optim::Optimizer;
use crate::train::delta::Delta;

/// Output width above which neurons are computed in parallel.
pub const PARALLEL_THRESHOLD: usize = 128;

/// Range new weights and biases are drawn from.
pub const INIT_RANGE: (f64, f64) = (-0.5, 0.5);

/// One fully-connected stage: `source_size` inputs to `target_size` outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer{
    source_size: usize,
    target_size: usize,
    /// `source_size` rows × `target_size` columns.
    pub weights: Matrix,
    pub biases: Vector,
    pub activation: ActivationFunction,
}

impl Layer {
    pub fn new<R: Rng + ?Sized>(
        source_size: usize,
        target_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        let (low, high) = INIT_RANGE;
        let weights = Matrix::uniform(source_size, target_size, low, high, rng);
        let biases = (0..target_size).map(|_| rng.gen_range(low..=high)).collect();

        Layer {
            source_size,
            target_size,
            weights,
            biases,
            activation,
        }
    }

    /// Rebuilds a layer from stored parameters, checking them against the
    /// declared sizes.
    pub fn from_parts(
        source_size: usize,
        target_size: usize,
        weights: Matrix,
        biases: Vector,
        activation: ActivationFunction,
    ) -> Result<Layer> {
        if weights.rows != source_size
            || !weights.is_rectangular()
            || (source_size > 0 && weights.cols != target_size)
        {
            return Err(NnError::InvalidShape(format!(
                "weight matrix must be {source_size}x{target_size}, got {} rows",
                weights.data.len()
            )));
        }
        if biases.len() != target_size {
            return Err(NnError::InvalidShape(format!(
                "bias vector must have {target_size} values, got {}",
                biases.len()
            )));
        }

        Ok(Layer {
            source_size,
            target_size,
            weights: Matrix { cols: target_size, ..weights },
            biases,
            activation,
        })
    }

    pub fn source_size(&self) -> usize {
        self.source_size
    }

    pub fn target_size(&self) -> usize {
        self.target_size
    }

    /// Activated output of every neuron, in neuron order.
    pub fn propagate(&self, input: &[f64]) -> Result<Vector> {
        if input.len() != self.source_size {
            return Err(NnError::dimension("propagate input", self.source_size, input.len()));
        }

        let mut output = vec![0.0; self.target_size];
        if self.target_size > PARALLEL_THRESHOLD {
            output
                .par_iter_mut()
                .enumerate()
                .for_each(|(j, slot)| *slot = self.neuron(input, j));
        } else {
            for (j, slot) in output.iter_mut().enumerate() {
                *slot = self.neuron(input, j);
            }
        }
        Ok(output)
    }

    fn neuron(&self, input: &[f64], j: usize) -> f64 {
        let sum: f64 = input
            .iter()
            .zip(&self.weights.data)
            .map(|(x, row)| row[j] * x)
            .sum();
        self.activation.function(sum + self.biases[j])
    }

    /// Backward step through this layer.
    ///
    /// `gradient` is the loss gradient at this layer's output and `node` the
    /// activations that fed it. `upstream` is the activation that produced
    /// `node`; `None` for the input layer, where the returned gradient is
    /// the raw weighted sum.
    ///
    /// Returns the gradient for the previous layer and this layer's delta.
    /// The optimizer is consulted once per weight (row by row) and then once
    /// per bias.
    pub fn back_propagate(
        &self,
        gradient: &[f64],
        node: &[f64],
        upstream: Option<ActivationFunction>,
        optimizer: &dyn Optimizer,
    ) -> Result<(Vector, Delta)> {
        if gradient.len() != self.target_size {
            return Err(NnError::dimension("back-propagate gradient", self.target_size, gradient.len()));
        }
        if node.len() != self.source_size {
            return Err(NnError::dimension("back-propagate node", self.source_size, node.len()));
        }

        let mut prev_gradient = Vec::with_capacity(self.source_size);
        let mut weights = Matrix::zeros(self.source_size, self.target_size);

        for (i, (&x, row)) in node.iter().zip(&self.weights.data).enumerate() {
            let mut sum = 0.0;
            for (j, &g) in gradient.iter().enumerate() {
                sum += g * row[j];
                weights.data[i][j] = optimizer.calculate_delta(x * g);
            }
            prev_gradient.push(match upstream {
                Some(activation) => sum * activation.derivate(x),
                None => sum,
            });
        }

        let biases = gradient.iter().map(|&g| optimizer.calculate_delta(g)).collect();

        Ok((prev_gradient, Delta { weights, biases }))
    }

    /// Adds `delta` into the live weights and biases.
    pub fn apply_delta(&mut self, delta: &Delta) -> Result<()> {
        if !self.weights.same_shape(&delta.weights) {
            return Err(NnError::dimension("delta weight rows", self.weights.rows, delta.weights.rows));
        }
        if delta.biases.len() != self.biases.len() {
            return Err(NnError::dimension("delta biases", self.biases.len(), delta.biases.len()));
        }

        self.weights.add_assign(&delta.weights);
        for (b, d) in self.biases.iter_mut().zip(&delta.biases) {
            *b += d;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optim::Sgd;
    use rand::{rngs::StdRng, SeedableRng};

    fn fixed_layer(activation: ActivationFunction) -> Layer {
        Layer::from_parts(
            2,
            3,
            Matrix::from_data(vec![vec![0.1, 0.2, -0.3], vec![0.4, -0.5, 0.6]]),
            vec![0.01, 0.02, 0.03],
            activation,
        )
        .unwrap()
    }

    #[test]
    fn new_respects_shape_and_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let layer = Layer::new(3, 5, ActivationFunction::Tanh, &mut rng);
        assert_eq!((layer.weights.rows, layer.weights.cols), (3, 5));
        assert_eq!(layer.biases.len(), 5);
        assert!(layer.biases.iter().all(|b| (-0.5..=0.5).contains(b)));
    }

    #[test]
    fn propagate_computes_weighted_sum_plus_bias() {
        let layer = fixed_layer(ActivationFunction::Identity);
        let out = layer.propagate(&[1.0, 2.0]).unwrap();
        let expected = [0.1 + 0.8 + 0.01, 0.2 - 1.0 + 0.02, -0.3 + 1.2 + 0.03];
        for (got, want) in out.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn propagate_rejects_wrong_input_length() {
        let layer = fixed_layer(ActivationFunction::Sigmoid);
        assert!(matches!(
            layer.propagate(&[1.0]),
            Err(NnError::DimensionMismatch { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn wide_layer_matches_sequential_result() {
        let mut rng = StdRng::seed_from_u64(3);
        let wide = Layer::new(4, PARALLEL_THRESHOLD + 20, ActivationFunction::Sigmoid, &mut rng);
        let input = [0.3, -0.1, 0.7, 0.2];
        let out = wide.propagate(&input).unwrap();
        assert_eq!(out.len(), PARALLEL_THRESHOLD + 20);
        for (j, y) in out.iter().enumerate() {
            assert_eq!(*y, wide.neuron(&input, j));
        }
    }

    #[test]
    fn back_propagate_produces_gradient_and_scaled_delta() {
        let layer = fixed_layer(ActivationFunction::Identity);
        let sgd = Sgd::new(0.5);
        let gradient = [1.0, -1.0, 2.0];
        let node = [0.5, 0.25];

        let (prev, delta) = layer
            .back_propagate(&gradient, &node, Some(ActivationFunction::Sigmoid), &sgd)
            .unwrap();

        let sum0 = 1.0 * 0.1 - 1.0 * 0.2 + 2.0 * -0.3;
        assert!((prev[0] - sum0 * 0.5 * (1.0 - 0.5)).abs() < 1e-12);
        assert!((delta.weights.data[1][2] - 0.5 * 0.25 * 2.0).abs() < 1e-12);
        assert_eq!(delta.biases, vec![0.5, -0.5, 1.0]);
    }

    #[test]
    fn back_propagate_checks_lengths() {
        let layer = fixed_layer(ActivationFunction::Identity);
        let sgd = Sgd::new(0.1);
        assert!(layer.back_propagate(&[1.0], &[0.0, 0.0], None, &sgd).is_err());
        assert!(layer.back_propagate(&[1.0, 1.0, 1.0], &[0.0], None, &sgd).is_err());
    }

    #[test]
    fn apply_delta_adds_in_place() {
        let mut layer = fixed_layer(ActivationFunction::Identity);
        let delta = Delta {
            weights: Matrix::from_data(vec![vec![1.0; 3], vec![2.0; 3]]),
            biases: vec![-0.01, -0.02, -0.03],
        };
        layer.apply_delta(&delta).unwrap();
        assert!((layer.weights.data[1][1] - 1.5).abs() < 1e-12);
        assert!(layer.biases.iter().all(|b| b.abs() < 1e-12));
    }

    #[test]
    fn from_parts_rejects_bad_shapes() {
        let w = Matrix::from_data(vec![vec![0.0; 3], vec![0.0; 2]]);
        assert!(matches!(
            Layer::from_parts(2, 3, w, vec![0.0; 3], ActivationFunction::ReLU),
            Err(NnError::InvalidShape(_))
        ));
        let w = Matrix::zeros(2, 3);
        assert!(Layer::from_parts(2, 3, w, vec![0.0; 2], ActivationFunction::ReLU).is_err());
    }
}
