//! Dense row-major matrix and the handful of operations attention needs.
//!
//! Shapes are tiny (at most 16 × 64), so everything is plain CPU loops over a
//! flat `Vec<f64>`. Shape mismatches are programming errors and panic.

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// Score assigned to disallowed positions before softmax.
pub const MASKED_SCORE: f64 = -1e9;

/// Dense 2D matrix stored in row-major order.
///
/// # Example
///
/// ```
/// use attention_explorer::utils::Matrix;
///
/// let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
/// let t = a.transpose();
/// assert_eq!(t.get(0, 1), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Allocate a rows × cols matrix filled with 0.0.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        assert_eq!(data.len(), rows * cols, "data length mismatch in Matrix::from_vec");
        Self { rows, cols, data }
    }

    /// Build a matrix from nested rows. An empty outer vector gives a 0 × 0 matrix.
    ///
    /// # Panics
    ///
    /// Panics if the rows have different lengths.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        let n = rows.len();
        let mut data = Vec::with_capacity(n * cols);
        for row in rows {
            assert_eq!(row.len(), cols, "ragged rows in Matrix::from_rows");
            data.extend(row);
        }
        Self {
            rows: n,
            cols,
            data,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.rows && j < self.cols, "index ({}, {}) out of bounds", i, j);
        self.data[i * self.cols + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        assert!(i < self.rows && j < self.cols, "index ({}, {}) out of bounds", i, j);
        self.data[i * self.cols + j] = value;
    }

    /// Borrow row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        assert!(i < self.rows, "row {} out of bounds", i);
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        assert!(i < self.rows, "row {} out of bounds", i);
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Flat row-major view of the data.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Copy out as nested rows, the shape a renderer consumes.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }

    /// Standard dense product `self · other`.
    ///
    /// # Panics
    ///
    /// Panics if `self.cols() != other.rows()`.
    pub fn matmul(&self, other: &Matrix) -> Matrix {
        assert_eq!(
            self.cols, other.rows,
            "matmul shape mismatch: {}x{} · {}x{}",
            self.rows, self.cols, other.rows, other.cols
        );
        let mut out = Matrix::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[i * self.cols + k];
                let b_row = &other.data[k * other.cols..(k + 1) * other.cols];
                let out_row = &mut out.data[i * other.cols..(i + 1) * other.cols];
                for (o, &b) in out_row.iter_mut().zip(b_row) {
                    *o += a * b;
                }
            }
        }
        out
    }

    /// Elementwise sum.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    pub fn add(&self, other: &Matrix) -> Matrix {
        assert_eq!(self.shape(), other.shape(), "add shape mismatch");
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a + b)
            .collect();
        Matrix::from_vec(self.rows, self.cols, data)
    }

    /// Apply `f` to every entry.
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Matrix {
        let data = self.data.iter().map(|&v| f(v)).collect();
        Matrix::from_vec(self.rows, self.cols, data)
    }

    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        out
    }

    /// Apply [`softmax_row`] to every row, with `allowed(i, j)` deciding
    /// whether row `i` may put weight on column `j`.
    pub fn softmax_rows_masked<F>(&self, allowed: F) -> Matrix
    where
        F: Fn(usize, usize) -> bool,
    {
        let mut out = Matrix::zeros(self.rows, self.cols);
        for i in 0..self.rows {
            let probs = softmax_row(self.row(i), |_, j| allowed(i, j));
            out.row_mut(i).copy_from_slice(&probs);
        }
        out
    }
}

impl Serialize for Matrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows))?;
        for i in 0..self.rows {
            seq.serialize_element(self.row(i))?;
        }
        seq.end()
    }
}

/// Numerically stable softmax over one row with a mask predicate.
///
/// `allowed(value, index)` returns false for positions that must receive no
/// weight; those are replaced by [`MASKED_SCORE`] before the max shift.
/// A zero denominator is treated as 1. A row with no allowed positions
/// yields all zeros.
pub fn softmax_row<F>(row: &[f64], allowed: F) -> Vec<f64>
where
    F: Fn(f64, usize) -> bool,
{
    let mut any_allowed = false;
    let masked: Vec<f64> = row
        .iter()
        .enumerate()
        .map(|(j, &v)| {
            if allowed(v, j) {
                any_allowed = true;
                v
            } else {
                MASKED_SCORE
            }
        })
        .collect();

    if !any_allowed {
        return vec![0.0; row.len()];
    }

    let max_value = masked.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = masked.iter().map(|&v| (v - max_value).exp()).collect();
    let sum: f64 = exps.iter().sum();
    let denom = if sum == 0.0 { 1.0 } else { sum };
    exps.into_iter().map(|e| e / denom).collect()
}
