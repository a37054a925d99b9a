use crate::error::{NnError, Result};
use crate::math::{mean, Sample, Vector};
use crate::network::network::Network;
use crate::train::delta::Deltas;

/// One forward and backward pass over a single sample.
///
/// Returns the mean of the output error vector (`target - output`) and one
/// delta per layer. Nothing in the network is modified.
pub fn train_sample(network: &Network, sample: &Sample) -> Result<(f64, Deltas)> {
    if sample.target.len() != network.output_size() {
        return Err(NnError::dimension("sample target", network.output_size(), sample.target.len()));
    }

    let outputs = network.forward(&sample.feature)?;
    let (output, hidden) = outputs.split_last().ok_or(NnError::EmptyNetwork)?;
    let last_layer = network.layers().last().ok_or(NnError::EmptyNetwork)?;

    // Inputs each layer saw: the feature, then every hidden output.
    let nodes: Vec<&[f64]> = std::iter::once(sample.feature.as_slice())
        .chain(hidden.iter().map(Vec::as_slice))
        .collect();

    let errors: Vector = sample.target.iter().zip(output).map(|(t, y)| t - y).collect();
    let gradient: Vector = errors
        .iter()
        .zip(output)
        .map(|(e, &y)| e * last_layer.activation.derivate(y))
        .collect();

    let deltas = calculate_delta(network, gradient, &nodes)?;
    Ok((mean(&errors)?, deltas))
}

/// Back-propagates `output_gradient` from the last layer to the first.
///
/// `nodes[i]` is the input layer `i` received. The returned deltas are in
/// network order, not in the order they were computed.
pub fn calculate_delta(network: &Network, output_gradient: Vector, nodes: &[&[f64]]) -> Result<Deltas> {
    let layers = network.layers();
    if nodes.len() != layers.len() {
        return Err(NnError::dimension("back-propagate node list", layers.len(), nodes.len()));
    }

    let optimizer = network.config().optimizer.as_ref();
    let mut gradient = output_gradient;
    let mut deltas = Deltas::with_capacity(layers.len());

    for (i, layer) in layers.iter().enumerate().rev() {
        let upstream = i.checked_sub(1).map(|prev| layers[prev].activation);
        let (prev_gradient, delta) = layer.back_propagate(&gradient, nodes[i], upstream, optimizer)?;
        deltas.push(delta);
        gradient = prev_gradient;
    }

    deltas.reverse();
    Ok(deltas)
}
