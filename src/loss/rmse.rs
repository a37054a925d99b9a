use crate::loss::loss_fn::Loss;

#[derive(Debug, Clone, Copy, Default)]
pub struct RmseLoss;

impl Loss for RmseLoss {
    /// sqrt(mean(e²)); 0 for no errors.
    fn calculate(&self, errors: &[f64]) -> f64 {
        if errors.is_empty() {
            return 0.0;
        }
        let n = errors.len() as f64;
        (errors.iter().map(|e| e * e).sum::<f64>() / n).sqrt()
    }

    fn name(&self) -> &'static str {
        "rmse"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_zero() {
        assert_eq!(RmseLoss.calculate(&[]), 0.0);
    }

    #[test]
    fn known_value() {
        let got = RmseLoss.calculate(&[0.01, 0.02, 0.34, 0.72]);
        assert!((got - 0.3983).abs() < 1e-4, "got {got}");
    }
}
