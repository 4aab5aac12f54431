//! Seeded synthesis of the projection weights
//!
//! Nothing is trained: every weight matrix is drawn from a Gaussian seeded
//! by the master seed, scaled by 1/sqrt(fan_in).

use crate::utils::{Matrix, SeededRng};
use serde::Serialize;

/// Seed offset between consecutive heads.
pub const HEAD_SEED_STRIDE: u32 = 97;

/// Seed offset for the output projection generator.
pub const OUTPUT_SEED_OFFSET: u32 = 1337;

/// Query/key/value projections for one head, each (d_model × d_k).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadWeights {
    pub wq: Matrix,
    pub wk: Matrix,
    pub wv: Matrix,
}

/// All weights of the toy model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttentionWeights {
    /// One projection triple per head.
    pub heads: Vec<HeadWeights>,
    /// Output projection, (heads·d_k × d_model).
    pub wo: Matrix,
}

impl AttentionWeights {
    pub fn num_heads(&self) -> usize {
        self.heads.len()
    }
}

/// Synthesize every weight matrix from `master_seed`.
///
/// Head `h` draws from `SeededRng::new(master_seed + h * 97)`. Within a head
/// the three matrices are filled together in row-major order:
/// for each (i, j), WQ[i][j] then WK[i][j] then WV[i][j]. The output
/// projection draws row-major from `SeededRng::new(master_seed + 1337)`.
/// Seed offsets wrap at 32 bits.
///
/// # Example
///
/// ```
/// use attention_explorer::layers::make_weights;
///
/// let w = make_weights(2, 8, 4, 1234);
/// assert_eq!(w.heads[1].wq.shape(), (8, 4));
/// assert_eq!(w.wo.shape(), (8, 8));
/// ```
pub fn make_weights(heads: usize, d_model: usize, d_k: usize, master_seed: u32) -> AttentionWeights {
    let head_scale = (d_model as f64).sqrt();
    let head_weights = (0..heads)
        .map(|h| {
            let seed = master_seed.wrapping_add((h as u32).wrapping_mul(HEAD_SEED_STRIDE));
            let mut rng = SeededRng::new(seed);
            let mut wq = Matrix::zeros(d_model, d_k);
            let mut wk = Matrix::zeros(d_model, d_k);
            let mut wv = Matrix::zeros(d_model, d_k);
            for i in 0..d_model {
                for j in 0..d_k {
                    wq.set(i, j, rng.gaussian() / head_scale);
                    wk.set(i, j, rng.gaussian() / head_scale);
                    wv.set(i, j, rng.gaussian() / head_scale);
                }
            }
            HeadWeights { wq, wk, wv }
        })
        .collect();

    let concat_dim = heads * d_k;
    let out_scale = (concat_dim as f64).sqrt();
    let mut rng = SeededRng::new(master_seed.wrapping_add(OUTPUT_SEED_OFFSET));
    let mut wo = Matrix::zeros(concat_dim, d_model);
    for i in 0..concat_dim {
        for j in 0..d_model {
            wo.set(i, j, rng.gaussian() / out_scale);
        }
    }

    AttentionWeights {
        heads: head_weights,
        wo,
    }
}
