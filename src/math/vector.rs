use crate::error::{NnError, Result};

/// A feature, target or activation vector.
pub type Vector = Vec<f64>;

/// One training pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub feature: Vector,
    pub target: Vector,
}

/// An ordered training set. Batching never reorders samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Samples(Vec<Sample>);

impl Samples {
    /// Zips features with targets.
    pub fn new(features: Vec<Vector>, targets: Vec<Vector>) -> Result<Samples> {
        if features.len() != targets.len() {
            return Err(NnError::SampleCountMismatch {
                features: features.len(),
                targets: targets.len(),
            });
        }

        Ok(Samples(
            features
                .into_iter()
                .zip(targets)
                .map(|(feature, target)| Sample { feature, target })
                .collect(),
        ))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.0
    }

    /// Contiguous batches of `batch_size`; the last one may be shorter.
    /// A zero batch size yields no batches.
    pub fn split(&self, batch_size: usize) -> Vec<&[Sample]> {
        if batch_size == 0 {
            return Vec::new();
        }
        self.0.chunks(batch_size).collect()
    }
}

impl From<Vec<Sample>> for Samples {
    fn from(samples: Vec<Sample>) -> Self {
        Samples(samples)
    }
}

impl<'a> IntoIterator for &'a Samples {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Arithmetic mean; an empty slice is a logic error.
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(NnError::DivisionByZero("mean"));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}
