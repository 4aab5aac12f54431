//! Attention Explorer Library
//!
//! This library computes a small, fully deterministic multi-head
//! self-attention pass over whitespace tokens, keeping every intermediate
//! tensor so a visualizer can display it.
//!
//! # Modules
//!
//! - `utils`: Seeded RNG, token hashing and the dense `Matrix` type
//! - `tokenizer`: Whitespace tokenization capped at 16 tokens
//! - `layers`: Positional encoding, embeddings, weight synthesis, attention heads
//! - `pipeline`: The end-to-end computation returning an `AttentionRun`
//! - `config`: Explorer configuration and JSON loading
//! - `analysis`: Display summaries (strongest links, row entropy)
//! - `cache`: Memoization of the last run

pub mod analysis;
pub mod cache;
pub mod config;
pub mod layers;
pub mod pipeline;
pub mod tokenizer;
pub mod utils;
