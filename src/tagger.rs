//! # Entity Tags and IOB Encoding
//!
//! Defines the fixed entity alphabet for ingredient lines and the
//! **IOB** (Inside-Outside-Begin) encoding used to mark multi-token spans
//! for the sequence-labeling engine.
//!
//! ## Entity categories
//!
//! | Tag    | Meaning             | Examples              |
//! |--------|---------------------|-----------------------|
//! | QTY    | Primary quantity    | 2, 1$1/2, 2.5         |
//! | QTY-UR | Range-end quantity  | the 3 in "2 to 3 cups"|
//! | UNIT   | Unit of measure     | tbsp, cups, cloves    |
//! | INGR   | Ingredient name     | garlic, olive oil     |
//! | (none) | Unlabeled token     | chopped, ",", fresh   |
//!
//! ## IOB scheme
//!
//! - `B-TAG`: first token of a labeled span
//! - `I-TAG`: continuation token of the same span
//! - `O`: token outside any span

use serde::{Deserialize, Serialize};

/// Entity categories recognized in an ingredient line.
///
/// These four tags are the semantic vocabulary of the tagger; the engine's
/// label space is exactly their IOB expansion plus `O`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entity {
    /// **Primary quantity**: the token equal to the reference `qty` field.
    Qty,
    /// **Range-end quantity**: the upper bound of "2 to 3"-style ranges.
    QtyUr,
    /// **Unit of measure**, in any spelling the unit table recognizes.
    Unit,
    /// **Ingredient name** token.
    Ingr,
}

impl Entity {
    /// Canonical name of the entity (for labels, score keys and UI).
    pub fn name(&self) -> &'static str {
        match self {
            Entity::Qty => "QTY",
            Entity::QtyUr => "QTY-UR",
            Entity::Unit => "UNIT",
            Entity::Ingr => "INGR",
        }
    }

    /// Parses an entity from its canonical name.
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "QTY" => Some(Entity::Qty),
            "QTY-UR" => Some(Entity::QtyUr),
            "UNIT" => Some(Entity::Unit),
            "INGR" => Some(Entity::Ingr),
            _ => None,
        }
    }

    /// All entities in a fixed order (for scoring iteration).
    pub fn all() -> [Entity; 4] {
        [Entity::Ingr, Entity::Qty, Entity::QtyUr, Entity::Unit]
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// IOB tag applied to one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    /// **Begin**: first token of a labeled span.
    Begin(Entity),
    /// **Inside**: continuation of the span started by the preceding tag.
    Inside(Entity),
    /// **Outside**: no label.
    Outside,
}

impl Tag {
    /// Textual representation (e.g. "B-QTY", "I-INGR", "O").
    pub fn label(&self) -> String {
        match self {
            Tag::Begin(e) => format!("B-{}", e.name()),
            Tag::Inside(e) => format!("I-{}", e.name()),
            Tag::Outside => "O".to_string(),
        }
    }

    /// Parses a tag from its textual form.
    ///
    /// The entity name may itself contain a dash ("B-QTY-UR"), so only the
    /// first dash separates prefix from name.
    pub fn from_label(s: &str) -> Option<Self> {
        if s == "O" {
            return Some(Tag::Outside);
        }
        let (prefix, name) = s.split_once('-')?;
        let entity = Entity::from_name(name)?;
        match prefix {
            "B" => Some(Tag::Begin(entity)),
            "I" => Some(Tag::Inside(entity)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Encodes a per-token label sequence into IOB tags.
///
/// A run of identical consecutive labels becomes one `B-` followed by `I-`
/// continuations; an unlabeled token is always `O`; any label change
/// (including to or from none) starts a new `B-`.
pub fn iob_encode(labels: &[Option<Entity>]) -> Vec<Tag> {
    let mut tags = Vec::with_capacity(labels.len());

    for (i, label) in labels.iter().enumerate() {
        let tag = match label {
            None => Tag::Outside,
            Some(entity) => {
                if i > 0 && labels[i - 1].as_ref() == Some(entity) {
                    Tag::Inside(*entity)
                } else {
                    Tag::Begin(*entity)
                }
            }
        };
        tags.push(tag);
    }

    tags
}

/// Strips IOB prefixes from a label sequence.
///
/// `O` becomes the empty string; `B-`/`I-` tags reduce to the entity name;
/// anything else passes through unchanged, so tag streams that never
/// carried IOB prefixes survive a second pass.
pub fn remove_iob<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    labels
        .iter()
        .map(|label| {
            let label = label.as_ref();
            if label == "O" {
                String::new()
            } else if let Some(stripped) = label.strip_prefix("B-").or_else(|| label.strip_prefix("I-")) {
                stripped.to_string()
            } else {
                label.to_string()
            }
        })
        .collect()
}
