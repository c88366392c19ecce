//! Text tokenization
//!
//! Keyword routing nodes compare whole tokens, so the tokenizer decides what
//! counts as a word. [`RuleBasedTokenizer`] keeps letters, combining marks,
//! digits, underscores and inner apostrophes together and emits every other non-space character
//! as its own token.

use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{M}\p{N}_]+(?:'[\p{L}\p{M}\p{N}_]+)*|[^\s\p{L}\p{M}\p{N}_]")
        .expect("token pattern is a valid regex")
});

/// Splits text into an ordered sequence of tokens
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Word and punctuation tokenizer
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedTokenizer;

impl RuleBasedTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for RuleBasedTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        TOKEN_PATTERN
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Splits on whitespace only; punctuation stays attached to words
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}
