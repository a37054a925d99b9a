use crate::error::{NnError, Result};
use crate::math::Vector;

/// Min-max scales every feature column to `[0, 1]`.
///
/// Rows must all have the same length and no column may be constant.
pub fn normalize(features: &[Vector]) -> Result<Vec<Vector>> {
    let Some(first) = features.first() else {
        return Err(NnError::Normalize("feature set is empty".to_string()));
    };
    let width = first.len();
    if let Some(row) = features.iter().position(|row| row.len() != width) {
        return Err(NnError::Normalize(format!(
            "row {row} has {} columns, expected {width}",
            features[row].len()
        )));
    }

    let mut ranges = vec![(f64::INFINITY, f64::NEG_INFINITY); width];
    for row in features {
        for (range, &x) in ranges.iter_mut().zip(row) {
            range.0 = range.0.min(x);
            range.1 = range.1.max(x);
        }
    }

    if let Some(col) = ranges.iter().position(|(low, high)| high - low == 0.0) {
        return Err(NnError::Normalize(format!("column {col} is constant")));
    }

    Ok(features
        .iter()
        .map(|row| {
            row.iter()
                .zip(&ranges)
                .map(|(x, (low, high))| (x - low) / (high - low))
                .collect()
        })
        .collect())
}
