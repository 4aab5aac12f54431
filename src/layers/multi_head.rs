//! Multi-head combination: concatenate head outputs and project.

use crate::layers::HeadResult;
use crate::utils::Matrix;

/// Lay head outputs side by side: token `t`, feature `j` of head `h` lands at
/// column `h * d_k + j`. Result is (T × heads·d_k).
///
/// # Panics
///
/// Panics if a head's output is not (seq_len × d_k).
pub fn concat_heads(heads: &[HeadResult], d_k: usize, seq_len: usize) -> Matrix {
    let mut concat = Matrix::zeros(seq_len, heads.len() * d_k);
    for (h, head) in heads.iter().enumerate() {
        assert_eq!(
            head.head_out.shape(),
            (seq_len, d_k),
            "head {} output shape mismatch in concat_heads",
            h
        );
        for t in 0..seq_len {
            let dst = &mut concat.row_mut(t)[h * d_k..(h + 1) * d_k];
            dst.copy_from_slice(head.head_out.row(t));
        }
    }
    concat
}

/// Concatenate the heads and apply the output projection `wo`.
///
/// Returns `(H_concat, MHA_out)`.
pub fn combine(heads: &[HeadResult], wo: &Matrix, d_k: usize, seq_len: usize) -> (Matrix, Matrix) {
    let concat = concat_heads(heads, d_k, seq_len);
    let output = concat.matmul(wo);
    (concat, output)
}
