//! Sinusoidal positional encoding (Transformer-style)
//!
//! PE(pos, 2i)   = sin(pos / 10000^(2i/d_model))
//! PE(pos, 2i+1) = cos(pos / 10000^(2i/d_model))
//!
//! The encoding depends only on the shape: no randomness, no token content.

use crate::utils::Matrix;

/// Build the (seq_len × d_model) positional encoding matrix.
///
/// Even dimensions use `sin`, odd dimensions use `cos`; each adjacent
/// even/odd pair shares one wavelength.
///
/// # Example
///
/// ```
/// use attention_explorer::layers::positional_encoding;
///
/// let pe = positional_encoding(3, 4);
/// assert_eq!(pe.shape(), (3, 4));
/// assert_eq!(pe.get(0, 0), 0.0); // sin(0)
/// assert_eq!(pe.get(0, 1), 1.0); // cos(0)
/// ```
pub fn positional_encoding(seq_len: usize, d_model: usize) -> Matrix {
    let mut pe = Matrix::zeros(seq_len, d_model);
    for pos in 0..seq_len {
        let row = pe.row_mut(pos);
        for (i, value) in row.iter_mut().enumerate() {
            // Wavelength increases exponentially with dimension index
            let div = 10000.0f64.powf((2 * (i / 2)) as f64 / d_model as f64);
            let angle = pos as f64 / div;
            *value = if i % 2 == 0 { angle.sin() } else { angle.cos() };
        }
    }
    pe
}
