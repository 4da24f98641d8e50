//! # Label Aligner
//!
//! Training data for the tagger is not hand-annotated token by token: the
//! reference corpus provides the raw line plus separately-entered structured
//! fields (name, quantity, range-end, unit). The aligner projects those
//! fields back onto the raw token stream, assigning each token the label of
//! the first field it matches.
//!
//! ## Precedence
//!
//! 1. `QTY` — token parses to exactly the reference quantity.
//! 2. `QTY-UR` — token rounds (half-up, 2 decimals) to the range end.
//! 3. `UNIT` — standardized token fuzzy-matches a standardized token of
//!    the unit field, so "tbsp" in the line matches "T", "Tbsp." or
//!    "tablespoons" in the field.
//! 4. `INGR` — token fuzzy-matches a token of the name field.
//! 5. none.
//!
//! The order is fixed: quantity checks must run before the string matches,
//! otherwise numeric tokens can be absorbed by the looser substring
//! heuristics.

use serde::{Deserialize, Serialize};

use crate::matcher::token_match;
use crate::quantity::{as_float, round2};
use crate::tagger::Entity;
use crate::tokenizer::{tokenize_normalized, Token};
use crate::units::standardize;

/// One structured ground-truth row, as entered in the reference dataset.
///
/// Used only at training time; inference needs nothing but the raw line.
/// Row iteration and filtering of malformed rows is the caller's concern —
/// this type represents a well-formed row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRow {
    /// The raw ingredient line as it appeared in the recipe.
    pub input: String,
    /// The ingredient name field.
    pub name: String,
    /// The primary quantity.
    pub qty: f64,
    /// The range-end quantity (0.0 when the line has no range).
    pub range_end: f64,
    /// The unit field, in whatever spelling the annotator used.
    pub unit: String,
    /// Free-text comment field. Carried for ingestion fidelity; the aligner
    /// does not match against it.
    #[serde(default)]
    pub comment: Option<String>,
}

/// Assigns each raw token the label of the first reference field it
/// matches, in the fixed precedence order documented on the module.
///
/// `tokens` must be the tokenization of `row.input` (normalized); the
/// `name` and `unit` fields are tokenized with normalization here.
///
/// # Example
///
/// ```rust
/// use ingredients_core::aligner::{match_tags, ReferenceRow};
/// use ingredients_core::tagger::Entity;
/// use ingredients_core::tokenizer::tokenize_normalized;
///
/// let row = ReferenceRow {
///     input: "2 tbsp garlic, chopped".to_string(),
///     name: "garlic".to_string(),
///     qty: 2.0,
///     range_end: 0.0,
///     unit: "tbsp".to_string(),
///     comment: None,
/// };
/// let (_, tokens) = tokenize_normalized(&row.input);
/// let labels = match_tags(&tokens, &row);
/// assert_eq!(
///     labels,
///     [Some(Entity::Qty), Some(Entity::Unit), Some(Entity::Ingr), None, None]
/// );
/// ```
pub fn match_tags(tokens: &[Token], row: &ReferenceRow) -> Vec<Option<Entity>> {
    let name_tokens: Vec<String> = tokenize_normalized(&row.name)
        .1
        .iter()
        .map(|t| t.text.to_lowercase())
        .collect();
    // Standardized on both sides: the field may carry any spelling variant
    let unit_tokens: Vec<String> = tokenize_normalized(&row.unit)
        .1
        .iter()
        .map(|t| standardize(&t.text).to_lowercase())
        .collect();

    tokens
        .iter()
        .map(|token| label_token(&token.text, row, &name_tokens, &unit_tokens))
        .collect()
}

fn label_token(
    token: &str,
    row: &ReferenceRow,
    name_tokens: &[String],
    unit_tokens: &[String],
) -> Option<Entity> {
    let value = as_float(token);

    if value == row.qty {
        return Some(Entity::Qty);
    }

    if round2(value) == row.range_end {
        return Some(Entity::QtyUr);
    }

    let standardized = standardize(token).to_lowercase();
    if unit_tokens.iter().any(|u| token_match(&standardized, u)) {
        return Some(Entity::Unit);
    }

    let lowered = token.to_lowercase();
    if name_tokens.iter().any(|n| token_match(&lowered, n)) {
        return Some(Entity::Ingr);
    }

    None
}
