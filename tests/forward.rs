use rand::{rngs::StdRng, SeedableRng};
use synaptic_nn::{ActivationFunction, Network, NnError};

fn network(rng: &mut StdRng) -> Network {
    let mut network = Network::with_rng(3, 2, ActivationFunction::Tanh, rng).unwrap();
    network.add_layer_with_rng(6, ActivationFunction::Sigmoid, rng).unwrap();
    network
}

#[test]
fn forward_returns_one_output_per_layer() {
    let mut rng = StdRng::seed_from_u64(21);
    let network = network(&mut rng);
    let outputs = network.forward(&[0.1, 0.2, 0.3]).unwrap();

    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].len(), 6);
    assert_eq!(outputs[1].len(), 2);
    // hidden layer kept the first Tanh, output uses the new Sigmoid
    assert!(outputs[0].iter().all(|y| (-1.0..=1.0).contains(y)));
    assert!(outputs[1].iter().all(|y| (0.0..=1.0).contains(y)));
}

#[test]
fn forward_feeds_each_layer_the_previous_output() {
    let mut rng = StdRng::seed_from_u64(4);
    let network = network(&mut rng);
    let input = [0.5, -0.5, 1.0];
    let outputs = network.forward(&input).unwrap();

    let hidden = network.layers()[0].propagate(&input).unwrap();
    let output = network.layers()[1].propagate(&hidden).unwrap();
    assert_eq!(outputs, vec![hidden, output]);
}

#[test]
fn wrong_input_length_always_fails() {
    let mut rng = StdRng::seed_from_u64(9);
    let network = network(&mut rng);
    for input in [vec![], vec![1.0], vec![1.0, 2.0], vec![1.0, 2.0, 3.0, 4.0]] {
        match network.forward(&input) {
            Err(NnError::DimensionMismatch { expected, actual, .. }) => {
                assert_eq!(expected, 3);
                assert_eq!(actual, input.len());
            }
            other => panic!("expected dimension mismatch, got {other:?}"),
        }
    }
}

#[test]
fn wide_layers_go_through_parallel_path() {
    let mut rng = StdRng::seed_from_u64(17);
    let mut network = Network::with_rng(8, 3, ActivationFunction::ReLU, &mut rng).unwrap();
    network.add_layer_with_rng(300, ActivationFunction::Sigmoid, &mut rng).unwrap();

    let input = vec![0.25; 8];
    let a = network.forward(&input).unwrap();
    let b = network.forward(&input).unwrap();
    assert_eq!(a[0].len(), 300);
    assert_eq!(a, b);
}
