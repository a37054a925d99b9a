use synaptic_nn::{ActivationFunction, Network, RmseLoss, Samples, Sgd, TrainProps};

fn main() -> synaptic_nn::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut network = Network::new(2, 1, ActivationFunction::Sigmoid)?;
    network.add_layer(4, ActivationFunction::Sigmoid)?;
    network.set_props(TrainProps {
        loss: Some(Box::new(RmseLoss)),
        optimizer: Some(Box::new(Sgd::new(1.0))),
        max_epoch: Some(10_000),
        err_limit: Some(0.001),
        patience: Some(2000),
        ..Default::default()
    });

    let samples = Samples::new(
        vec![vec![1.0, 0.0], vec![1.0, 1.0], vec![0.0, 1.0], vec![0.0, 0.0]],
        vec![vec![1.0], vec![0.0], vec![1.0], vec![0.0]],
    )?;

    let outcome = network.train(&samples)?;
    println!("Stopped after {} epochs: {:?}", outcome.epochs, outcome.reason);

    for sample in &samples {
        let (output, classes) = network.test(&sample.feature)?;
        println!("Input: {:?} -> Output: {:.4} ({})", sample.feature, output[0], classes[0]);
    }
    Ok(())
}
