//! # ingredients-core — Ingredient Phrase Tagging Pipeline
//!
//! This crate prepares free-text recipe ingredient lines for sequence
//! labeling and scores the resulting predictions. It contains all the
//! domain-specific text processing — unicode fraction handling,
//! prefix/suffix stripping, plural-aware fuzzy matching, numeric
//! tolerance — while the statistical model itself stays behind a narrow
//! trait boundary.
//!
//! ## Architecture
//!
//! The system is a linear pipeline; data flows and is transformed step by
//! step:
//!
//! 1. **Input**: a raw ingredient line (`"1½ cups flour, sifted"`).
//! 2. **Normalization** ([`normalize`]): unicode fractions become plain
//!    text, mixed numbers are clumped, HTML tags stripped.
//! 3. **Tokenization** ([`tokenizer`]): the line splits into tokens with
//!    exact byte spans into the normalized source.
//! 4. **Feature extraction** ([`features`]): each token becomes a feature
//!    map over a 3-token window plus running line state.
//! 5. **Tagging** ([`model`], [`pipeline`]): an external linear-chain
//!    sequence labeler assigns IOB tags per token.
//!
//! At training time, the [`aligner`] projects structured reference fields
//! (name, quantity, range end, unit) onto the raw token stream and the
//! [`tagger`] IOB-encodes the result; the [`corpus`] module assembles
//! whole datasets. At evaluation time, [`evaluation`] turns true/predicted
//! label streams into per-entity accuracy, precision, recall and F-score.
//!
//! ## Example
//!
//! ```rust
//! use ingredients_core::aligner::{match_tags, ReferenceRow};
//! use ingredients_core::tagger::{iob_encode, Tag};
//! use ingredients_core::tokenizer::tokenize_normalized;
//!
//! let row = ReferenceRow {
//!     input: "2 tbsp garlic, chopped".to_string(),
//!     name: "garlic".to_string(),
//!     qty: 2.0,
//!     range_end: 0.0,
//!     unit: "tbsp".to_string(),
//!     comment: None,
//! };
//!
//! let (_, tokens) = tokenize_normalized(&row.input);
//! let labels = iob_encode(&match_tags(&tokens, &row));
//! let rendered: Vec<String> = labels.iter().map(Tag::label).collect();
//! assert_eq!(rendered, ["B-QTY", "B-UNIT", "B-INGR", "O", "O"]);
//! ```

pub mod aligner;
pub mod corpus;
pub mod evaluation;
pub mod features;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod quantity;
pub mod tagger;
pub mod tokenizer;
pub mod units;

pub use aligner::{match_tags, ReferenceRow};
pub use corpus::{build_dataset, build_dataset_parallel, split_dataset, TrainingData};
pub use evaluation::{evaluate, Metric, ScoreTable};
pub use features::{extract_features, features_for_line, FeatureMap, FeatureValue};
pub use model::{SequenceLabeler, SequenceTrainer};
pub use pipeline::Pipeline;
pub use tagger::{iob_encode, remove_iob, Entity, Tag};
pub use tokenizer::{tokenize, tokenize_normalized, Token};
