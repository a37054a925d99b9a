use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::optim::optimizer::Optimizer;

pub const DEFAULT_LEARNING_RATE: f64 = 0.01;

/// Stochastic gradient descent with optional (Nesterov) momentum.
///
/// The momentum velocity is a single scalar shared by every weight and bias
/// the optimizer touches, not one slot per parameter. Concurrent batch
/// tasks update it under a lock.
#[derive(Debug)]
pub struct Sgd {
    pub learning_rate: f64,
    pub momentum: f64,
    pub nesterov: bool,
    velocity: Mutex<f64>,
}

/// Persisted form of [`Sgd`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SgdProps {
    #[serde(default = "default_learning_rate")]
    pub alpha: f64,
    #[serde(default)]
    pub momentum: f64,
    #[serde(default)]
    pub is_nesterov: bool,
    #[serde(default)]
    pub velocity: f64,
}

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

impl Sgd {
    /// Plain gradient descent. A zero rate falls back to the default.
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd::with_momentum(learning_rate, 0.0, false)
    }

    pub fn with_momentum(learning_rate: f64, momentum: f64, nesterov: bool) -> Sgd {
        let learning_rate = if learning_rate == 0.0 { DEFAULT_LEARNING_RATE } else { learning_rate };
        Sgd {
            learning_rate,
            momentum,
            nesterov,
            velocity: Mutex::new(0.0),
        }
    }

    pub fn velocity(&self) -> f64 {
        *self.velocity.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Sgd {
    fn default() -> Self {
        Sgd::new(DEFAULT_LEARNING_RATE)
    }
}

impl From<SgdProps> for Sgd {
    fn from(p: SgdProps) -> Self {
        let sgd = Sgd::with_momentum(p.alpha, p.momentum, p.is_nesterov);
        *sgd.velocity.lock().unwrap_or_else(PoisonError::into_inner) = p.velocity;
        sgd
    }
}

impl Optimizer for Sgd {
    fn calculate_delta(&self, gradient: f64) -> f64 {
        if self.momentum == 0.0 {
            return self.learning_rate * gradient;
        }

        let mut velocity = self.velocity.lock().unwrap_or_else(PoisonError::into_inner);
        *velocity = self.momentum * *velocity + self.learning_rate * gradient;
        if self.nesterov {
            *velocity
        } else {
            self.momentum * *velocity + self.learning_rate * gradient
        }
    }

    fn name(&self) -> &'static str {
        "sgd"
    }

    fn props(&self) -> Value {
        serde_json::json!(SgdProps {
            alpha: self.learning_rate,
            momentum: self.momentum,
            is_nesterov: self.nesterov,
            velocity: self.velocity(),
        })
    }
}
