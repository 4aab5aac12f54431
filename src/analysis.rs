//! Read-only summaries of attention weights for display.

use crate::layers::HeadResult;
use crate::utils::Matrix;
use serde::Serialize;

/// Where one query token puts most of its attention.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttentionLink {
    pub query: usize,
    pub key: usize,
    pub query_token: String,
    pub key_token: String,
    pub weight: f64,
}

/// For each query row of `head`, the key with the largest weight.
/// Ties go to the lowest key index. Rows with no weights are skipped.
///
/// # Panics
///
/// Panics if `tokens.len()` differs from the head's sequence length.
pub fn strongest_links<S: AsRef<str>>(head: &HeadResult, tokens: &[S]) -> Vec<AttentionLink> {
    assert_eq!(
        tokens.len(),
        head.seq_len(),
        "token count mismatch in strongest_links"
    );
    (0..head.weights.rows())
        .filter_map(|i| {
            let row = head.weights.row(i);
            let (key, &weight) = row
                .iter()
                .enumerate()
                .fold(None, |best: Option<(usize, &f64)>, (j, w)| match best {
                    Some((_, bw)) if *bw >= *w => best,
                    _ => Some((j, w)),
                })?;
            Some(AttentionLink {
                query: i,
                key,
                query_token: tokens[i].as_ref().to_string(),
                key_token: tokens[key].as_ref().to_string(),
                weight,
            })
        })
        .collect()
}

/// Shannon entropy (nats) of every row, with 0·ln 0 taken as 0.
///
/// Low entropy means focused attention; ln(T) is a uniform row.
pub fn row_entropy(weights: &Matrix) -> Vec<f64> {
    (0..weights.rows())
        .map(|i| {
            weights
                .row(i)
                .iter()
                .filter(|&&p| p > 0.0)
                .map(|&p| -p * p.ln())
                .sum()
        })
        .collect()
}
