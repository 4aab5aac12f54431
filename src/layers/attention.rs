//! Scaled dot-product attention for a single head
//!
//! Q = X·WQ, K = X·WK, V = X·WV
//! Scores = Q·Kᵀ / sqrt(d_k)
//! Weights = row-wise softmax of Scores (causal rows only see j <= i)
//! HeadOut = Weights·V
//!
//! Every row is independent; nothing is carried between rows.

use crate::layers::HeadWeights;
use crate::utils::Matrix;
use serde::Serialize;

/// Every intermediate tensor of one head, kept for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadResult {
    /// (T × d_k)
    pub q: Matrix,
    /// (T × d_k)
    pub k: Matrix,
    /// (T × d_k)
    pub v: Matrix,
    /// (T × T) scaled dot products
    pub scores: Matrix,
    /// (T × T) row-stochastic attention weights
    pub weights: Matrix,
    /// (T × d_k)
    pub head_out: Matrix,
}

impl HeadResult {
    /// Result for an empty sequence: zero-row matrices of the right widths.
    pub fn empty(d_k: usize) -> Self {
        Self {
            q: Matrix::zeros(0, d_k),
            k: Matrix::zeros(0, d_k),
            v: Matrix::zeros(0, d_k),
            scores: Matrix::zeros(0, 0),
            weights: Matrix::zeros(0, 0),
            head_out: Matrix::zeros(0, d_k),
        }
    }

    /// Number of tokens this head attended over.
    pub fn seq_len(&self) -> usize {
        self.weights.rows()
    }
}

/// Run one attention head over the input matrix `x` (T × d_model).
///
/// With `causal`, row `i` may only weight columns `j <= i`.
///
/// # Panics
///
/// Panics if `x.cols()` differs from the projection input dimension.
pub fn attention_for_head(x: &Matrix, weights: &HeadWeights, causal: bool) -> HeadResult {
    let q = x.matmul(&weights.wq);
    let k = x.matmul(&weights.wk);
    let v = x.matmul(&weights.wv);

    let scale = (q.cols() as f64).sqrt();
    let scores = q.matmul(&k.transpose()).map(|s| s / scale);

    let attn = scores.softmax_rows_masked(|i, j| !causal || j <= i);
    let head_out = attn.matmul(&v);

    HeadResult {
        q,
        k,
        v,
        scores,
        weights: attn,
        head_out,
    }
}
