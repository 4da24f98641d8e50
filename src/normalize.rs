//! # Lexical Normalizer
//!
//! Converts raw ingredient text into the canonical plain-text form the rest
//! of the pipeline expects. Recipe text copied from the web is full of
//! unicode vulgar fractions ("1½"), superscript digits and stray HTML tags;
//! this module rewrites all of them before tokenization.
//!
//! ## Rewrite steps
//!
//! 1. [`clean`]: strip HTML-like `<...>` tags.
//! 2. [`asciify`]: replace every fraction glyph and superscript/subscript
//!    digit with its plaintext spelling ("½" → "1/2", "²" → "2").
//! 3. [`clump_fractions`]: join a whole number to the fraction that follows
//!    it with a `$` marker ("1 1/2" → "1$1/2") so the tokenizer keeps the
//!    mixed number as a single token.
//!
//! [`preprocess`] applies the three in that order.
//!
//! ## Example
//!
//! ```rust
//! use ingredients_core::normalize::preprocess;
//!
//! assert_eq!(preprocess("1½ cups flour"), "1$1/2 cups flour");
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

/// Plaintext spellings for unicode fraction glyphs and super/subscript digits.
const UNICODE_FRACTIONS: &[(char, &str)] = &[
    ('½', "1/2"),
    ('⅓', "1/3"),
    ('⅔', "2/3"),
    ('¼', "1/4"),
    ('¾', "3/4"),
    ('⅕', "1/5"),
    ('⅖', "2/5"),
    ('⅗', "3/5"),
    ('⅘', "4/5"),
    ('⅙', "1/6"),
    ('⅚', "5/6"),
    ('⅐', "1/7"),
    ('⅛', "1/8"),
    ('⅜', "3/8"),
    ('⅝', "5/8"),
    ('⅞', "7/8"),
    ('⅑', "1/9"),
    ('⅒', "1/10"),
    ('¹', "1"),
    ('²', "2"),
    ('³', "3"),
    ('⁴', "4"),
    ('⁵', "5"),
    ('⁶', "6"),
    ('⁷', "7"),
    ('⁸', "8"),
    ('⁹', "9"),
    ('₁', "1"),
    ('₂', "2"),
    ('₃', "3"),
    ('₄', "4"),
    ('₅', "5"),
    ('₆', "6"),
    ('₇', "7"),
    ('₈', "8"),
    ('₉', "9"),
];

/// Superscript and subscript digits. These count as digits when deciding
/// whether a fraction glyph needs a separating space, matching how the
/// pipeline treats "1½" and "²½" alike.
const SUPER_SUB_DIGITS: &str = "⁰¹²³⁴⁵⁶⁷⁸⁹₀₁₂₃₄₅₆₇₈₉";

lazy_static! {
    static ref FRACTION_MAP: HashMap<char, &'static str> =
        UNICODE_FRACTIONS.iter().copied().collect();
    static ref CLUMP_RE: Regex =
        Regex::new(r"(\d+)\s+(\d)/(\d)").expect("fraction clump pattern should be valid");
    static ref TAG_RE: Regex = Regex::new(r"<.*?>").expect("tag pattern should be valid");
    static ref DIGIT_LETTER_RE: Regex =
        Regex::new(r"(\d+)([a-zA-Z])").expect("digit/letter pattern should be valid");
    static ref SLASH_RE: Regex =
        Regex::new(r"([^0-9\s])/").expect("slash pattern should be valid");
    static ref SPACE_RE: Regex = Regex::new(r"\s+").expect("space pattern should be valid");
}

fn is_digit_like(ch: char) -> bool {
    ch.is_ascii_digit() || SUPER_SUB_DIGITS.contains(ch)
}

/// Replaces every unicode fraction glyph and superscript/subscript digit
/// with its plaintext spelling.
///
/// When a glyph immediately follows a digit, a separating space is inserted
/// first so that "1½" becomes "1 1/2" and not "11/2". The standalone
/// fraction slash `⁄` maps to `/`.
pub fn asciify(text: &str) -> String {
    let mut parsed = String::with_capacity(text.len());
    let mut prev: Option<char> = None;

    for ch in text.chars() {
        if let Some(plain) = FRACTION_MAP.get(&ch) {
            if prev.map(is_digit_like).unwrap_or(false) {
                parsed.push(' ');
            }
            parsed.push_str(plain);
        } else if ch == '⁄' {
            parsed.push('/');
        } else {
            parsed.push(ch);
        }
        prev = Some(ch);
    }

    parsed
}

/// Rewrites mixed numbers `A b/c` as `A$b/c`.
///
/// The `$` joiner is the one character guaranteed not to appear in recipe
/// quantities, so the tokenizer keeps the whole number and its fraction
/// together as a single token ("1$1/2").
pub fn clump_fractions(text: &str) -> String {
    CLUMP_RE.replace_all(text, "${1}$$${2}/${3}").into_owned()
}

/// Strips HTML-like `<...>` tags (each tag matched non-greedily).
pub fn clean(text: &str) -> String {
    TAG_RE.replace_all(text, "").into_owned()
}

/// Splits digit/unit clumps ("2tbsp" → "2 tbsp"), pads non-numeric slashes
/// ("grams/2" → "grams / 2") and squeezes whitespace runs.
///
/// Not part of [`preprocess`]: callers that want declumping compose it
/// explicitly, e.g. `preprocess(&declump(text))`.
pub fn declump(text: &str) -> String {
    let text = DIGIT_LETTER_RE.replace_all(text, "${1} ${2}");
    let text = SLASH_RE.replace_all(&text, "${1} / ");
    SPACE_RE.replace_all(&text, " ").into_owned()
}

/// Full normalization pipeline: tag stripping, then fraction asciification,
/// then fraction clumping.
pub fn preprocess(text: &str) -> String {
    clump_fractions(&asciify(&clean(text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asciify_vulgar_fraction() {
        assert_eq!(asciify("½ cup"), "1/2 cup");
        assert_eq!(asciify("⅞ tsp"), "7/8 tsp");
    }

    #[test]
    fn test_asciify_separates_digit_and_glyph() {
        // "1½" must become "1 1/2", never "11/2"
        assert_eq!(asciify("1½"), "1 1/2");
        // No digit before the glyph: no space inserted
        assert_eq!(asciify("add ½"), "add 1/2");
    }

    #[test]
    fn test_asciify_superscripts_and_slash() {
        assert_eq!(asciify("x²"), "x2");
        assert_eq!(asciify("1⁄2"), "1/2");
    }

    #[test]
    fn test_clump_fractions() {
        assert_eq!(clump_fractions("1 1/2 cups"), "1$1/2 cups");
        // A lone fraction has no whole number to clump with
        assert_eq!(clump_fractions("1/2 cup"), "1/2 cup");
    }

    #[test]
    fn test_clean_strips_tags() {
        assert_eq!(clean("<b>2 cups</b> sugar"), "2 cups sugar");
        // Non-greedy per tag: text between tags survives
        assert_eq!(clean("<i>a</i> and <i>b</i>"), "a and b");
    }

    #[test]
    fn test_declump_is_not_part_of_preprocess() {
        // The default pipeline leaves digit/unit clumps alone
        assert_eq!(preprocess("2tbsp"), "2tbsp");
        assert_eq!(declump("2tbsp"), "2 tbsp");
        assert_eq!(declump("500 grams/2 cups"), "500 grams / 2 cups");
    }

    #[test]
    fn test_preprocess_order() {
        assert_eq!(preprocess("<b>1½</b> cups"), "1$1/2 cups");
    }
}
