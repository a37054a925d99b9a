use crate::loss::loss_fn::Loss;

#[derive(Debug, Clone, Copy, Default)]
pub struct MaeLoss;

impl Loss for MaeLoss {
    /// mean(|e|)
    fn calculate(&self, errors: &[f64]) -> f64 {
        if errors.is_empty() {
            return 0.0;
        }
        let n = errors.len() as f64;
        errors.iter().map(|e| e.abs()).sum::<f64>() / n
    }

    fn name(&self) -> &'static str {
        "mae"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loss::MseLoss;

    #[test]
    fn sign_does_not_matter() {
        assert!((MaeLoss.calculate(&[-0.5, 0.5, 1.0]) - 2.0 / 3.0).abs() < 1e-12);
        assert!((MseLoss.calculate(&[-0.5, 0.5, 1.0]) - 0.5).abs() < 1e-12);
    }
}
