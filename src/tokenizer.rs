//! # Ingredient Line Tokenizer
//!
//! Splits a (possibly normalized) ingredient string into tokens while
//! preserving the exact byte span of every token in the source. Spans are
//! what let callers highlight the matched substring in the original line and
//! what the round-trip guarantee rests on: `&source[start..end]` always
//! reproduces the token text.
//!
//! ## Rules
//!
//! - Split on runs of non-whitespace.
//! - Peel leading `( [ " ' #` characters off a run one at a time, each as
//!   its own 1-byte token.
//! - Peel trailing `) ] " ' : ; , . ? %` characters the same way (collected
//!   from the end, emitted in original left-to-right order).
//! - Whatever remains in the middle is one token. Interior `.` and `/` are
//!   never split, which keeps "2.5" and "1$1/2" atomic.
//!
//! ## Example
//!
//! ```rust
//! use ingredients_core::tokenizer::tokenize;
//!
//! let tokens = tokenize("(2 tbsp)");
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, ["(", "2", "tbsp", ")"]);
//! ```

use serde::{Deserialize, Serialize};

use crate::normalize::preprocess;

/// A token extracted from one ingredient line.
///
/// The token keeps its exact position in the source string (`start` and
/// `end`, half-open byte offsets), which is crucial for:
/// 1. Reconstructing the matched substring for display or debugging.
/// 2. Keeping feature extraction and label alignment in lockstep by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The token text (e.g. "2", "tbsp", ",").
    pub text: String,
    /// Starting byte offset in the source string (inclusive).
    pub start: usize,
    /// Ending byte offset in the source string (exclusive).
    pub end: usize,
}

/// Leading characters peeled off a run as standalone tokens.
const PREFIXES: &[char] = &['(', '[', '"', '\'', '#'];

/// Trailing characters peeled off a run as standalone tokens.
const SUFFIXES: &[char] = &[')', ']', '"', '\'', ':', ';', ',', '.', '?', '%'];

/// Tokenizes a raw string without any normalization.
///
/// Empty input yields an empty token list.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for (start, run) in whitespace_runs(text) {
        split_run(&mut tokens, run, start);
    }
    tokens
}

/// Normalizes the string (see [`crate::normalize::preprocess`]) and
/// tokenizes the result.
///
/// Returns the normalized source alongside the tokens, because the token
/// spans refer to the normalized string, not the raw input.
pub fn tokenize_normalized(text: &str) -> (String, Vec<Token>) {
    let normalized = preprocess(text);
    let tokens = tokenize(&normalized);
    (normalized, tokens)
}

/// Yields `(byte_offset, run)` for each maximal run of non-whitespace.
fn whitespace_runs(text: &str) -> Vec<(usize, &str)> {
    let mut runs = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(start) = run_start.take() {
                runs.push((start, &text[start..i]));
            }
        } else if run_start.is_none() {
            run_start = Some(i);
        }
    }
    if let Some(start) = run_start {
        runs.push((start, &text[start..]));
    }

    runs
}

/// Splits one non-whitespace run into prefix, middle and suffix tokens.
fn split_run(tokens: &mut Vec<Token>, run: &str, run_start: usize) {
    let mut token = run;
    let mut start = run_start;
    let mut end = run_start + run.len();

    // Peel prefixes (all ASCII, so each occupies exactly 1 byte)
    while let Some(first) = token.chars().next() {
        if !PREFIXES.contains(&first) {
            break;
        }
        tokens.push(Token {
            text: first.to_string(),
            start,
            end: start + 1,
        });
        token = &token[1..];
        start += 1;
    }

    // Collect suffixes from the end, in reverse
    let mut suffixes = Vec::new();
    while let Some(last) = token.chars().last() {
        if !SUFFIXES.contains(&last) {
            break;
        }
        suffixes.push(last);
        token = &token[..token.len() - 1];
        end -= 1;
    }

    if !token.is_empty() {
        tokens.push(Token {
            text: token.to_string(),
            start,
            end,
        });
    }

    // Emit the collected suffixes back in left-to-right order
    for suffix in suffixes.into_iter().rev() {
        tokens.push(Token {
            text: suffix.to_string(),
            start: end,
            end: end + 1,
        });
        end += 1;
    }
}
