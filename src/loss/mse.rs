use crate::loss::loss_fn::Loss;

#[derive(Debug, Clone, Copy, Default)]
pub struct MseLoss;

impl Loss for MseLoss {
    /// mean(e²)
    fn calculate(&self, errors: &[f64]) -> f64 {
        if errors.is_empty() {
            return 0.0;
        }
        let n = errors.len() as f64;
        errors.iter().map(|e| e.powi(2)).sum::<f64>() / n
    }

    fn name(&self) -> &'static str {
        "mse"
    }
}
