//! Shared utilities for the attention pipeline
//!
//! This module provides the seeded random number generator, token hashing,
//! and the dense matrix type used by every layer.

pub mod hash;
pub mod matrix;
pub mod rng;

pub use hash::hash_str;
pub use matrix::{softmax_row, Matrix};
pub use rng::SeededRng;
