//! Configuration for one attention computation
//!
//! This module provides the parameter tuple the pipeline is a pure function
//! of, plus JSON loading and boundary validation.

use crate::layers::HEAD_DIM;
use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;

/// Largest head count accepted at the boundary.
pub const MAX_HEADS: usize = 16;

/// Parameters of the toy attention model.
///
/// Every field has a default, so a config file only needs the fields it
/// changes.
///
/// # Example
///
/// ```json
/// {
///   "text": "The cat sat",
///   "heads": 1,
///   "causal": true,
///   "use_positional": false,
///   "seed": 1234
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Free-form input text, split on whitespace into at most 16 tokens
    pub text: String,

    /// Number of attention heads; d_model = heads × 4
    pub heads: usize,

    /// Restrict each token to attend to itself and earlier tokens
    pub causal: bool,

    /// Add sinusoidal positional encoding to the embeddings
    pub use_positional: bool,

    /// Master seed for all weight matrices
    pub seed: u32,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            text: "The cat sat on the mat".to_string(),
            heads: 2,
            causal: false,
            use_positional: true,
            seed: 1234,
        }
    }
}

impl ExplorerConfig {
    /// Model dimension: heads × HEAD_DIM.
    pub fn d_model(&self) -> usize {
        self.heads * HEAD_DIM
    }

    /// Tokens derived from `text`.
    pub fn tokens(&self) -> Vec<String> {
        tokenize(&self.text)
    }

    /// The "randomize" action: same configuration with the next seed.
    pub fn randomized(&self) -> Self {
        Self {
            seed: self.seed.wrapping_add(1),
            ..self.clone()
        }
    }
}

/// Loads an explorer configuration from a JSON file.
///
/// Reads the file at `path`, deserializes it into an `ExplorerConfig` and
/// validates the head count.
///
/// # Returns
///
/// `Ok(ExplorerConfig)` on success, or an error if the file cannot be read,
/// the JSON is invalid, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use attention_explorer::config::load_config;
///
/// let cfg = load_config("config/causal.json").unwrap();
/// assert!(cfg.causal);
/// ```
pub fn load_config(path: &str) -> Result<ExplorerConfig, Box<dyn Error>> {
    let contents = fs::read_to_string(path)?;
    let config: ExplorerConfig = serde_json::from_str(&contents)?;
    validate_config(&config)?;
    Ok(config)
}

/// Reject head counts the pipeline cannot use.
pub fn validate_config(config: &ExplorerConfig) -> Result<(), Box<dyn Error>> {
    if config.heads == 0 {
        return Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "heads must be at least 1",
        )));
    }

    if config.heads > MAX_HEADS {
        return Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("heads must be at most {}, got {}", MAX_HEADS, config.heads),
        )));
    }

    Ok(())
}
