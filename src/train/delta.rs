use crate::math::{Matrix, Vector};

/// Proposed additive update for one layer, shaped like its weights and biases.
#[derive(Debug, Clone, PartialEq)]
pub struct Delta {
    pub weights: Matrix,
    pub biases: Vector,
}

/// One [`Delta`] per layer, in network order.
pub type Deltas = Vec<Delta>;

impl Delta {
    fn add_assign(&mut self, other: &Delta) {
        self.weights.add_assign(&other.weights);
        for (b, d) in self.biases.iter_mut().zip(&other.biases) {
            *b += d;
        }
    }

    fn divide(&mut self, n: f64) {
        self.weights = self.weights.map(|w| w / n);
        for b in &mut self.biases {
            *b /= n;
        }
    }
}

/// Element-wise mean of several delta sets. All sets must be shaped like
/// the same network; an empty input merges to an empty set.
pub fn merge_deltas(sets: &[Deltas]) -> Deltas {
    let Some((first, rest)) = sets.split_first() else {
        return Deltas::new();
    };

    let mut merged = first.clone();
    for set in rest {
        for (acc, delta) in merged.iter_mut().zip(set) {
            acc.add_assign(delta);
        }
    }

    let n = sets.len() as f64;
    for delta in &mut merged {
        delta.divide(n);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(w: f64, b: f64) -> Delta {
        Delta {
            weights: Matrix::from_data(vec![vec![w, 2.0 * w], vec![-w, 0.5 * w]]),
            biases: vec![b, -b],
        }
    }

    fn set(seed: f64) -> Deltas {
        vec![delta(seed, seed * 0.1), delta(-seed, seed + 1.0)]
    }

    fn assert_close(a: &Deltas, b: &Deltas) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            for (rx, ry) in x.weights.data.iter().zip(&y.weights.data) {
                for (p, q) in rx.iter().zip(ry) {
                    assert!((p - q).abs() < 1e-12, "{p} != {q}");
                }
            }
            for (p, q) in x.biases.iter().zip(&y.biases) {
                assert!((p - q).abs() < 1e-12, "{p} != {q}");
            }
        }
    }

    #[test]
    fn empty_input_merges_to_nothing() {
        assert!(merge_deltas(&[]).is_empty());
    }

    #[test]
    fn duplicates_average_to_themselves() {
        let one = set(0.37);
        let merged = merge_deltas(&[one.clone(), one.clone(), one.clone()]);
        assert_close(&merged, &one);
    }

    #[test]
    fn merge_is_an_elementwise_mean() {
        let merged = merge_deltas(&[set(1.0), set(3.0)]);
        assert_close(&merged, &set(2.0));
    }

    #[test]
    fn order_does_not_matter() {
        let a = merge_deltas(&[set(0.1), set(-2.0), set(5.5)]);
        let b = merge_deltas(&[set(5.5), set(0.1), set(-2.0)]);
        assert_close(&a, &b);
    }
}
