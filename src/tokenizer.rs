//! Whitespace tokenization for the toy model.
//!
//! There is no vocabulary: a token is simply a whitespace-delimited piece of
//! the input text, later hashed into an embedding seed.

/// Maximum number of tokens kept from the input text.
pub const MAX_TOKENS: usize = 16;

/// Split `text` on whitespace, drop empty segments and keep the first
/// [`MAX_TOKENS`] tokens in order.
///
/// # Example
///
/// ```
/// use attention_explorer::tokenizer::tokenize;
///
/// assert_eq!(tokenize("  The cat\tsat "), vec!["The", "cat", "sat"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .take(MAX_TOKENS)
        .map(str::to_owned)
        .collect()
}
