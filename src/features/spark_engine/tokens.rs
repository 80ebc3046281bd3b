//! Prompt token estimation
//!
//! A character heuristic is enough here: the count only gates oversized
//! prompts before they reach the engine.

/// Approximate characters per token for English prompts
const CHARS_PER_TOKEN: usize = 4;

/// Estimate the number of tokens in `text`, rounding up.
pub fn count_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

/// Largest prompt accepted for a model budget: half is kept for the answer.
pub fn prompt_budget(max_tokens: usize) -> usize {
    max_tokens / 2
}
