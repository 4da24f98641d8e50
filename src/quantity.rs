//! # Quantity Recognition
//!
//! Recognizes numeric tokens produced by the tokenizer and converts them to
//! `f64` for comparison against reference quantities. Three shapes are
//! numeric:
//!
//! - integers: `2`
//! - decimals: `2.5`
//! - clumped fractions: `1/2`, `1$1/2` (see [`crate::normalize::clump_fractions`])
//!
//! Anything else — including negative numbers, which the tokenizer grammar
//! never produces — converts to the [`NOT_A_QUANTITY`] sentinel instead of
//! raising an error, so alignment can simply fall through to the next label
//! in precedence.

use lazy_static::lazy_static;
use regex::Regex;

/// Sentinel returned by [`as_float`] for unparseable tokens.
///
/// It can never equal a valid reference quantity, which are all
/// non-negative, so a failed parse silently loses every quantity match.
pub const NOT_A_QUANTITY: f64 = -1.0;

lazy_static! {
    static ref DECIMAL_RE: Regex =
        Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("decimal pattern should be valid");
    static ref FRACTION_RE: Regex =
        Regex::new(r"^(?:(\d+)\$)?(\d+)/(\d+)$").expect("fraction pattern should be valid");
}

/// Checks whether a token is numeric: `000`, `000.000` or `0$0/0`.
pub fn is_quantity(token: &str) -> bool {
    DECIMAL_RE.is_match(token) || FRACTION_RE.is_match(token)
}

/// Converts a numeric token to `f64`.
///
/// Clumped fractions `whole$num/den` evaluate to `whole + num/den`; the
/// whole part defaults to 0 when absent ("2/3" → 0.666…). Non-numeric
/// tokens return [`NOT_A_QUANTITY`].
pub fn as_float(token: &str) -> f64 {
    if DECIMAL_RE.is_match(token) {
        // The pattern guarantees a parseable non-negative decimal
        return token.parse().unwrap_or(NOT_A_QUANTITY);
    }

    if let Some(caps) = FRACTION_RE.captures(token) {
        let whole: f64 = caps
            .get(1)
            .map(|m| m.as_str().parse().unwrap_or(0.0))
            .unwrap_or(0.0);
        let num: f64 = caps[2].parse().unwrap_or(0.0);
        let den: f64 = caps[3].parse().unwrap_or(0.0);
        return whole + num / den;
    }

    NOT_A_QUANTITY
}

/// Rounds to two decimal places with 0.5 always rounding up, which is how
/// the reference dataset's `range_end` column was produced (banker's
/// rounding would disagree at the boundary).
///
/// The [`NOT_A_QUANTITY`] sentinel passes through unchanged.
pub fn round2(x: f64) -> f64 {
    if x == NOT_A_QUANTITY {
        return x;
    }
    (100.0 * x + 0.5).trunc() / 100.0
}
