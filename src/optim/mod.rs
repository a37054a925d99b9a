pub mod optimizer;
pub mod sgd;

pub use optimizer::{load, Optimizer};
pub use sgd::Sgd;
