//! # Feature Extraction
//!
//! Builds the per-token feature maps consumed by the sequence-labeling
//! engine. Each token gets its own map over a 3-token sliding window
//! (previous, current, next) plus two pieces of running line state:
//!
//! - a **parenthetical** flag, raised by a bare `(` token and lowered by
//!   `)` — lowered *before* the `)` token's own features are read, so the
//!   closing paren always reports `parenthetical=false` for itself;
//! - a **comma parity** bit that toggles on every `,` seen outside
//!   parentheses. It is a parity across the whole line, not a one-token
//!   lookback: "after an odd number of commas" is the actual signal.
//!
//! ## Features emitted per token
//!
//! Current token: `token`, `capitalized`, `parenthetical`, `unit`,
//! `numeric`, `symbol`, `followscomma`. Window: either the `start` marker
//! or `-1token`/`-1capitalized`/`-1numeric`/`-1symbol`, and either the
//! `end` marker or the `+1…` equivalents.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::matcher::is_symbol;
use crate::quantity::is_quantity;
use crate::tokenizer::{tokenize_normalized, Token};
use crate::units::is_unit;

/// A single feature value: a boolean flag or a token string.
///
/// Untagged so a map serializes as a flat JSON object
/// (`{"token": "tbsp", "numeric": false, …}`), which is the shape an
/// out-of-process engine expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Flag(bool),
    Text(String),
}

/// The feature map for one token.
///
/// Ephemeral: one map per token per line, recomputed fresh on every call
/// and consumed immediately by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureMap {
    pub values: HashMap<String, FeatureValue>,
}

impl FeatureMap {
    fn new() -> Self {
        Self::default()
    }

    fn flag(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_string(), FeatureValue::Flag(value));
    }

    fn text(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), FeatureValue::Text(value));
    }

    /// Looks up a feature by name.
    pub fn get(&self, key: &str) -> Option<&FeatureValue> {
        self.values.get(key)
    }

    /// Convenience accessor for boolean features.
    pub fn is_set(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(FeatureValue::Flag(true)))
    }
}

/// Running state threaded through the left-to-right scan of one line.
///
/// Scoped to a single line; nothing carries over between calls.
#[derive(Debug, Default)]
struct LineState {
    parenthetical: bool,
    follows_comma: bool,
}

impl LineState {
    /// Applies the post-emission update for one token, in the fixed order:
    /// comma parity toggles first (using the current parenthetical flag),
    /// then `(` raises the parenthetical flag.
    fn update(&mut self, token: &str) {
        if !self.parenthetical && token == "," {
            self.follows_comma = !self.follows_comma;
        }
        if token == "(" {
            self.parenthetical = true;
        }
    }
}

/// Title-case check matching the reference semantics: at least one cased
/// character, every cased run starts uppercase and continues lowercase.
fn is_title(word: &str) -> bool {
    let mut cased = false;
    let mut prev_cased = false;

    for ch in word.chars() {
        if ch.is_uppercase() {
            if prev_cased {
                return false;
            }
            cased = true;
            prev_cased = true;
        } else if ch.is_lowercase() {
            if !prev_cased {
                return false;
            }
            cased = true;
        } else {
            prev_cased = false;
        }
    }

    cased
}

/// Builds the feature maps for a tokenized line.
///
/// The returned vector is aligned with the input: index `i` holds the
/// features of token `i`.
pub fn extract_features(tokens: &[Token]) -> Vec<FeatureMap> {
    let mut features = Vec::with_capacity(tokens.len());
    let mut state = LineState::default();

    for (i, token) in tokens.iter().enumerate() {
        let text = token.text.as_str();

        // `)` closes the parenthetical region before its own features are
        // read, so the token itself reports parenthetical=false
        if text == ")" {
            state.parenthetical = false;
        }

        let mut map = FeatureMap::new();
        map.text("token", text.to_lowercase());
        map.flag("capitalized", is_title(text));
        map.flag("parenthetical", state.parenthetical);
        map.flag("unit", is_unit(text));
        map.flag("numeric", is_quantity(text));
        map.flag("symbol", is_symbol(text));
        map.flag("followscomma", state.follows_comma);

        if i == 0 {
            map.flag("start", true);
        } else {
            let prev = tokens[i - 1].text.as_str();
            map.text("-1token", prev.to_lowercase());
            map.flag("-1capitalized", is_title(prev));
            map.flag("-1numeric", is_quantity(prev));
            map.flag("-1symbol", is_symbol(prev));
        }

        if i == tokens.len() - 1 {
            map.flag("end", true);
        } else {
            let next = tokens[i + 1].text.as_str();
            map.text("+1token", next.to_lowercase());
            map.flag("+1capitalized", is_title(next));
            map.flag("+1numeric", is_quantity(next));
            map.flag("+1symbol", is_symbol(next));
        }

        features.push(map);
        state.update(text);
    }

    features
}

/// Tokenizes a raw line (with normalization) and extracts its features.
pub fn features_for_line(line: &str) -> Vec<FeatureMap> {
    let (_, tokens) = tokenize_normalized(line);
    extract_features(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    #[test]
    fn test_current_token_features() {
        let tokens = tokenize("2 Tbsp garlic");
        let features = extract_features(&tokens);

        assert_eq!(
            features[0].get("token"),
            Some(&FeatureValue::Text("2".to_string()))
        );
        assert!(features[0].is_set("numeric"));
        assert!(!features[0].is_set("unit"));
        assert!(features[1].is_set("unit"));
        assert!(features[1].is_set("capitalized"));
        assert_eq!(
            features[1].get("token"),
            Some(&FeatureValue::Text("tbsp".to_string()))
        );
    }

    #[test]
    fn test_window_markers() {
        let tokens = tokenize("2 tbsp garlic");
        let features = extract_features(&tokens);

        assert!(features[0].is_set("start"));
        assert!(features[0].get("-1token").is_none());
        assert!(features[2].is_set("end"));
        assert!(features[2].get("+1token").is_none());

        // Middle token carries both windows
        assert_eq!(
            features[1].get("-1token"),
            Some(&FeatureValue::Text("2".to_string()))
        );
        assert!(features[1].is_set("-1numeric"));
        assert_eq!(
            features[1].get("+1token"),
            Some(&FeatureValue::Text("garlic".to_string()))
        );
    }

    #[test]
    fn test_single_token_line_has_both_markers() {
        let features = extract_features(&tokenize("salt"));
        assert!(features[0].is_set("start"));
        assert!(features[0].is_set("end"));
    }

    #[test]
    fn test_parenthetical_state() {
        let tokens = tokenize("(2 tbsp)");
        let features = extract_features(&tokens);

        // "(" itself is emitted before the flag is raised
        assert!(!features[0].is_set("parenthetical"));
        assert!(features[1].is_set("parenthetical"));
        assert!(features[2].is_set("parenthetical"));
        // ")" lowers the flag before reading its own features
        assert!(!features[3].is_set("parenthetical"));
    }

    #[test]
    fn test_comma_parity_toggles() {
        let tokens = tokenize("garlic, minced, and peeled");
        let features = extract_features(&tokens);
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["garlic", ",", "minced", ",", "and", "peeled"]);

        // Parity flips after each comma outside parentheses
        assert!(!features[0].is_set("followscomma"));
        assert!(!features[1].is_set("followscomma")); // read before the toggle
        assert!(features[2].is_set("followscomma"));
        assert!(features[3].is_set("followscomma"));
        assert!(!features[4].is_set("followscomma")); // second comma toggled back
        assert!(!features[5].is_set("followscomma"));
    }

    #[test]
    fn test_comma_inside_parentheses_does_not_toggle() {
        let tokens = tokenize("garlic (fresh, whole) minced");
        let features = extract_features(&tokens);
        let last = features.len() - 1;
        assert_eq!(tokens[last].text, "minced");
        assert!(!features[last].is_set("followscomma"));
    }

    #[test]
    fn test_is_title() {
        assert!(is_title("Tbsp"));
        assert!(!is_title("tbsp"));
        assert!(!is_title("TBSP"));
        assert!(!is_title("2"));
        assert!(is_title("Olive Oil"));
        assert!(!is_title("McDonald"));
    }

    #[test]
    fn test_feature_map_serializes_flat() {
        let features = features_for_line("2 cups");
        let json = serde_json::to_value(&features[0]).unwrap();
        assert_eq!(json["token"], "2");
        assert_eq!(json["numeric"], true);
        assert_eq!(json["start"], true);
    }
}
