use std::fmt::Debug;
use std::sync::LazyLock;

use serde_json::{json, Value};

use crate::error::Result;
use crate::loss::{HuberLoss, MaeLoss, MseLoss, RmseLoss};
use crate::registry::Registry;

/// Reduces one epoch's per-sample errors to a scalar loss.
pub trait Loss: Debug + Send + Sync {
    /// Must return 0 for an empty slice.
    fn calculate(&self, errors: &[f64]) -> f64;

    /// Lowercase registry key.
    fn name(&self) -> &'static str;

    fn props(&self) -> Value {
        json!({})
    }
}

/// Rebuilds a loss function from its registry name and parameters.
pub fn load(name: &str, props: &Value) -> Result<Box<dyn Loss>> {
    LOSSES.generate(name, props)
}

static LOSSES: LazyLock<Registry<Box<dyn Loss>>> = LazyLock::new(|| {
    Registry::<Box<dyn Loss>>::new("loss")
        .register("rmse", |_| Ok(Box::new(RmseLoss) as Box<dyn Loss>))
        .register("mse", |_| Ok(Box::new(MseLoss) as Box<dyn Loss>))
        .register("mae", |_| Ok(Box::new(MaeLoss) as Box<dyn Loss>))
        .register("huber", |_| Ok(Box::new(HuberLoss) as Box<dyn Loss>))
});
