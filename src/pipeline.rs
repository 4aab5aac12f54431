//! End-to-end attention computation
//!
//! tokens → embeddings (+ positional) → per-head Q/K/V, scores, weights,
//! outputs → concatenation → output projection.
//!
//! The whole pipeline is recomputed from scratch for every configuration;
//! each stage builds its own generators from derived seeds, so no random
//! state is shared between tokens or heads.

use crate::config::ExplorerConfig;
use crate::layers::{
    attention_for_head, combine, make_embeddings, make_weights, positional_encoding,
    AttentionWeights, HeadResult, HEAD_DIM,
};
use crate::utils::Matrix;
use serde::Serialize;

/// Everything the visualizer renders for one configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttentionRun {
    /// Input tokens in order.
    pub tokens: Vec<String>,
    /// E: (T × d_model), positional encoding already added when enabled.
    pub embeddings: Matrix,
    /// P: (T × d_model), present only when positional encoding is enabled.
    pub positional: Option<Matrix>,
    /// Synthesized projection weights.
    pub weights: AttentionWeights,
    /// Per-head intermediate tensors.
    pub heads: Vec<HeadResult>,
    /// H_concat: (T × heads·d_k)
    pub concat: Matrix,
    /// MHA_out: (T × d_model)
    pub output: Matrix,
}

impl AttentionRun {
    /// Number of tokens.
    pub fn seq_len(&self) -> usize {
        self.tokens.len()
    }

    pub fn d_model(&self) -> usize {
        self.embeddings.cols()
    }
}

/// Run the pipeline for `config`.
///
/// The head count is not validated here; callers reject bad counts with
/// [`crate::config::validate_config`] first.
///
/// # Example
///
/// ```
/// use attention_explorer::config::ExplorerConfig;
/// use attention_explorer::pipeline::run;
///
/// let config = ExplorerConfig {
///     text: "The cat sat".to_string(),
///     heads: 1,
///     ..ExplorerConfig::default()
/// };
/// let result = run(&config);
/// assert_eq!(result.heads[0].weights.shape(), (3, 3));
/// ```
pub fn run(config: &ExplorerConfig) -> AttentionRun {
    run_with_tokens(config.tokens(), config)
}

/// Run the pipeline on already-tokenized input, ignoring `config.text`.
pub fn run_with_tokens(tokens: Vec<String>, config: &ExplorerConfig) -> AttentionRun {
    let d_model = config.d_model();
    let weights = make_weights(config.heads, d_model, HEAD_DIM, config.seed);

    if tokens.is_empty() {
        return empty_run(config, weights);
    }

    let seq_len = tokens.len();
    let embeddings = make_embeddings(&tokens, d_model, config.use_positional);
    let positional = config
        .use_positional
        .then(|| positional_encoding(seq_len, d_model));

    let heads: Vec<HeadResult> = weights
        .heads
        .iter()
        .map(|head| attention_for_head(&embeddings, head, config.causal))
        .collect();

    let (concat, output) = combine(&heads, &weights.wo, HEAD_DIM, seq_len);

    AttentionRun {
        tokens,
        embeddings,
        positional,
        weights,
        heads,
        concat,
        output,
    }
}

// T = 0: zero-row matrices with the usual widths, softmax never runs.
fn empty_run(config: &ExplorerConfig, weights: AttentionWeights) -> AttentionRun {
    let d_model = config.d_model();
    AttentionRun {
        tokens: Vec::new(),
        embeddings: Matrix::zeros(0, d_model),
        positional: config.use_positional.then(|| Matrix::zeros(0, d_model)),
        weights,
        heads: (0..config.heads).map(|_| HeadResult::empty(HEAD_DIM)).collect(),
        concat: Matrix::zeros(0, config.heads * HEAD_DIM),
        output: Matrix::zeros(0, d_model),
    }
}
