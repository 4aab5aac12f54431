//! Token embedding builder
//!
//! Each token string seeds its own generator through [`hash_str`], so the
//! embedding row of a token depends only on its text. Position enters only
//! through the optional additive [`positional_encoding`].

use crate::layers::positional_encoding;
use crate::utils::{hash_str, Matrix, SeededRng};

/// Scale applied to the Gaussian draws of a token embedding.
pub const EMBEDDING_SCALE: f64 = 0.5;

/// Embedding row for a single token: `d_model` Gaussian draws × 0.5 from a
/// generator seeded with the token's hash.
pub fn token_embedding(token: &str, d_model: usize) -> Vec<f64> {
    let mut rng = SeededRng::new(hash_str(token));
    (0..d_model)
        .map(|_| rng.gaussian() * EMBEDDING_SCALE)
        .collect()
}

/// Build the (T × d_model) input matrix for `tokens`.
///
/// With `use_positional`, the sinusoidal encoding is added elementwise.
///
/// # Example
///
/// ```
/// use attention_explorer::layers::make_embeddings;
///
/// let tokens = vec!["cat".to_string(), "sat".to_string()];
/// let e = make_embeddings(&tokens, 8, false);
/// assert_eq!(e.shape(), (2, 8));
/// ```
pub fn make_embeddings<S: AsRef<str>>(tokens: &[S], d_model: usize, use_positional: bool) -> Matrix {
    let mut embeddings = Matrix::zeros(tokens.len(), d_model);
    for (t, token) in tokens.iter().enumerate() {
        embeddings
            .row_mut(t)
            .copy_from_slice(&token_embedding(token.as_ref(), d_model));
    }

    if use_positional {
        embeddings.add(&positional_encoding(tokens.len(), d_model))
    } else {
        embeddings
    }
}
