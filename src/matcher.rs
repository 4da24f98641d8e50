//! # Fuzzy Token Matcher
//!
//! Decides whether two tokens refer to the same word, tolerating simple
//! English pluralization: "shallot" matches "shallots" because the
//! pluralized side ends in `s` and contains the singular side as a
//! substring. This is a substring heuristic, not a stemmer: it will
//! false-positive on unrelated words that happen to nest ("pea" and
//! "peanuts").
//!
//! Stopwords and punctuation symbols are excluded from the substring check
//! (but still match on exact equality), otherwise "a" would fuzzily match
//! almost any plural.

use lazy_static::lazy_static;
use std::collections::HashSet;

/// Closed-class words that never participate in the substring heuristic.
const STOPWORDS: &[&str] = &[
    "a", "an", "at", "any", "as", "about", "by", "but", "for", "in", "is", "it", "its", "or",
    "of", "to",
];

/// Punctuation tokens, also excluded from the substring heuristic. Shared
/// with the feature builder's `symbol` feature.
const SYMBOLS: &[&str] = &[
    ",", ".", "(", ")", ":", ";", "/", "\"", "'", "!", "@", "#", "$", "%", "&", "-", "+", "?",
];

lazy_static! {
    static ref STOPWORD_SET: HashSet<&'static str> = STOPWORDS.iter().copied().collect();
    static ref SYMBOL_SET: HashSet<&'static str> = SYMBOLS.iter().copied().collect();
}

/// Checks whether a token is a stopword.
pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

/// Checks whether a token is a punctuation symbol.
pub fn is_symbol(token: &str) -> bool {
    SYMBOL_SET.contains(token)
}

/// Naively checks whether `x` and `y` are the same token up to
/// pluralization.
///
/// Empty strings never match. Exact equality always matches. Otherwise the
/// pluralized-contains-singular check runs in both directions.
///
/// # Example
///
/// ```rust
/// use ingredients_core::matcher::token_match;
///
/// assert!(token_match("shallot", "shallots"));
/// assert!(token_match("shallots", "shallot"));
/// assert!(!token_match("a", "as")); // stopword exclusion
/// ```
pub fn token_match(x: &str, y: &str) -> bool {
    if x.is_empty() || y.is_empty() {
        return false;
    }
    if x == y {
        return true;
    }

    if !is_stopword(x) && !is_symbol(x) && y.ends_with('s') && y.contains(x) {
        return true;
    }
    if !is_stopword(y) && !is_symbol(y) && x.ends_with('s') && x.contains(y) {
        return true;
    }

    false
}
