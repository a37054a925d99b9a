use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::Result;
use crate::registry::{decode_props, Registry};

/// Element-wise activation applied to every neuron of a layer.
///
/// `derivate` always receives the *activated* output `y = function(x)`,
/// never the pre-activation sum. Every variant expresses its derivative in
/// terms of `y`, so the forward outputs can be fed straight back into the
/// backward pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Sigmoid,
    ReLU,
    Tanh,
    Identity,
    LeakyReLU { alpha: f64 },
    Elu { alpha: f64 },
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            ActivationFunction::ReLU => x.max(0.0),
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::Identity => x,
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
            ActivationFunction::Elu { alpha } => {
                if x > 0.0 { x } else { alpha * (x.exp() - 1.0) }
            }
        }
    }

    /// Derivative evaluated at the activated output `y`.
    pub fn derivate(&self, y: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => y * (1.0 - y),
            // y = max(0, x) is never negative, so y >= 0 exactly when x >= 0.
            ActivationFunction::ReLU => if y >= 0.0 { 1.0 } else { 0.0 },
            // sech²(x) == 1 - tanh²(x)
            ActivationFunction::Tanh => 1.0 - y * y,
            ActivationFunction::Identity => 1.0,
            ActivationFunction::LeakyReLU { alpha } => if y > 0.0 { 1.0 } else { *alpha },
            ActivationFunction::Elu { alpha } => if y > 0.0 { 1.0 } else { y + alpha },
        }
    }

    /// Lowercase registry key.
    pub fn name(&self) -> &'static str {
        match self {
            ActivationFunction::Sigmoid => "sigmoid",
            ActivationFunction::ReLU => "relu",
            ActivationFunction::Tanh => "tanh",
            ActivationFunction::Identity => "identity",
            ActivationFunction::LeakyReLU { .. } => "leaky_relu",
            ActivationFunction::Elu { .. } => "elu",
        }
    }

    /// Parameters needed to rebuild this activation through [`ActivationFunction::load`].
    pub fn props(&self) -> Value {
        match self {
            ActivationFunction::LeakyReLU { alpha } | ActivationFunction::Elu { alpha } => {
                json!({ "alpha": alpha })
            }
            _ => json!({}),
        }
    }

    /// Rebuilds an activation from its registry name and parameters.
    pub fn load(name: &str, props: &Value) -> Result<ActivationFunction> {
        ACTIVATIONS.generate(name, props)
    }
}

#[derive(Deserialize)]
struct AlphaProps {
    #[serde(default = "default_alpha")]
    alpha: f64,
}

fn default_alpha() -> f64 {
    0.01
}

static ACTIVATIONS: LazyLock<Registry<ActivationFunction>> = LazyLock::new(|| {
    Registry::new("activation")
        .register("sigmoid", |_| Ok(ActivationFunction::Sigmoid))
        .register("relu", |_| Ok(ActivationFunction::ReLU))
        .register("tanh", |_| Ok(ActivationFunction::Tanh))
        .register("identity", |_| Ok(ActivationFunction::Identity))
        .register("leaky_relu", |props| {
            let p: AlphaProps = decode_props("activation", props)?;
            Ok(ActivationFunction::LeakyReLU { alpha: p.alpha })
        })
        .register("elu", |props| {
            let p: AlphaProps = decode_props("activation", props)?;
            Ok(ActivationFunction::Elu { alpha: p.alpha })
        })
});
