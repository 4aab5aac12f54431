//! Building blocks of the toy attention model
//!
//! Each stage is a pure function of its inputs; the pipeline module wires
//! them together.

pub mod attention;
pub mod embedding;
pub mod multi_head;
pub mod positional;
pub mod weights;

/// Per-head projection dimension (d_k).
pub const HEAD_DIM: usize = 4;

pub use attention::{attention_for_head, HeadResult};
pub use embedding::{make_embeddings, token_embedding};
pub use multi_head::{combine, concat_heads};
pub use positional::positional_encoding;
pub use weights::{make_weights, AttentionWeights, HeadWeights};
