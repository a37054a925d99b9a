pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod data;

mod registry;

// Convenience re-exports
pub use error::{NnError, Result};
pub use math::{Matrix, Sample, Samples, Vector};
pub use activation::ActivationFunction;
pub use layers::Layer;
pub use network::{Network, NetworkProfile};
pub use loss::{Loss, RmseLoss};
pub use optim::{Optimizer, Sgd};
pub use train::{StopReason, TrainConfig, TrainOutcome, TrainProps};
