use rand::Rng;
use serde::{Serialize, Deserialize};

/// Row-major dense matrix. For a layer's weights, rows index source
/// neurons and columns index target neurons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Samples every entry uniformly from `[low, high]`.
    pub fn uniform<R: Rng + ?Sized>(rows: usize, cols: usize, low: f64, high: f64, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen_range(low..=high);
            }
        }

        res
    }

    /// Wraps raw rows. Column count is taken from the first row; ragged
    /// input is left for `is_rectangular` to report.
    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data.first().map_or(0, |row| row.len()),
            data
        }
    }

    pub fn is_rectangular(&self) -> bool {
        self.data.len() == self.rows && self.data.iter().all(|row| row.len() == self.cols)
    }

    pub fn same_shape(&self, other: &Matrix) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Element-wise `self += rhs`. Both matrices must share a shape.
    pub fn add_assign(&mut self, rhs: &Matrix) {
        debug_assert!(self.same_shape(rhs));
        for (row, rhs_row) in self.data.iter_mut().zip(&rhs.data) {
            for (x, y) in row.iter_mut().zip(rhs_row) {
                *x += y;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn uniform_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = Matrix::uniform(5, 9, -0.5, 0.5, &mut rng);
        assert_eq!((m.rows, m.cols), (5, 9));
        assert!(m.is_rectangular());
        assert!(m.data.iter().flatten().all(|x| (-0.5..=0.5).contains(x)));
    }

    #[test]
    fn add_assign_is_elementwise() {
        let mut a = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = Matrix::from_data(vec![vec![1.0, -1.0], vec![0.5, 0.0]]);
        a.add_assign(&b);
        assert_eq!(a.data, vec![vec![2.0, 1.0], vec![3.5, 4.0]]);
        assert_eq!(a.map(|x| x * 2.0).data, vec![vec![4.0, 2.0], vec![7.0, 8.0]]);
    }

    #[test]
    fn ragged_rows_are_not_rectangular() {
        let m = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(!m.is_rectangular());
        assert_eq!(Matrix::from_data(vec![]).cols, 0);
    }
}
