pub mod loss_fn;
pub mod rmse;
pub mod mse;
pub mod mae;
pub mod huber;

pub use loss_fn::{load, Loss};
pub use rmse::RmseLoss;
pub use mse::MseLoss;
pub use mae::MaeLoss;
pub use huber::HuberLoss;
