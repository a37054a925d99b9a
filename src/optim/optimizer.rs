use std::fmt::Debug;
use std::sync::LazyLock;

use serde_json::Value;

use crate::error::Result;
use crate::optim::sgd::{Sgd, SgdProps};
use crate::registry::{decode_props, Registry};

/// Turns one raw gradient component into the additive update for a weight
/// or bias. Called once per scalar, concurrently from every batch task.
pub trait Optimizer: Debug + Send + Sync {
    fn calculate_delta(&self, gradient: f64) -> f64;

    /// Lowercase registry key.
    fn name(&self) -> &'static str;

    /// Parameters (and any carried state) needed to rebuild this optimizer.
    fn props(&self) -> Value;
}

/// Rebuilds an optimizer from its registry name and parameters.
pub fn load(name: &str, props: &Value) -> Result<Box<dyn Optimizer>> {
    OPTIMIZERS.generate(name, props)
}

static OPTIMIZERS: LazyLock<Registry<Box<dyn Optimizer>>> = LazyLock::new(|| {
    Registry::<Box<dyn Optimizer>>::new("optimizer").register("sgd", |props| {
        let p: SgdProps = decode_props("optimizer", props)?;
        Ok(Box::new(Sgd::from(p)) as Box<dyn Optimizer>)
    })
});
