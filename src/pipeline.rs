//! # Tagging Pipeline
//!
//! Orchestrates the full path from a raw ingredient line to labeled tokens:
//! normalize → tokenize → extract features → engine tag. At evaluation
//! time it drives the same path over a held-out corpus, strips IOB from
//! both the predictions and the ground truth, and scores the flattened
//! streams.
//!
//! The engine itself is opaque (see [`crate::model`]); the pipeline only
//! holds whatever implements [`SequenceLabeler`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use ingredients_core::pipeline::Pipeline;
//!
//! let pipeline = Pipeline::new(my_trained_model);
//! let tags = pipeline.tag_line("2 tbsp garlic, chopped");
//! // tags: ["B-QTY", "B-UNIT", "B-INGR", "O", "O"]
//! ```

use tracing::debug;

use crate::corpus::TrainingData;
use crate::evaluation::{evaluate, ScoreTable};
use crate::features::features_for_line;
use crate::model::{SequenceLabeler, SequenceTrainer};
use crate::tagger::remove_iob;
use crate::tokenizer::{tokenize_normalized, Token};

/// A tagging pipeline wrapping a trained sequence-labeling model.
pub struct Pipeline<M: SequenceLabeler> {
    pub model: M,
}

impl<M: SequenceLabeler> Pipeline<M> {
    /// Wraps an already-trained model.
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Trains a model on a prepared dataset and wraps it.
    pub fn train<T>(trainer: &T, data: &TrainingData) -> Result<Self, T::Error>
    where
        T: SequenceTrainer<Model = M>,
    {
        debug!(lines = data.len(), "training sequence model");
        let model = trainer.train(&data.features, &data.labels)?;
        Ok(Pipeline::new(model))
    }

    /// Tags one raw ingredient line, returning the engine's IOB tag string
    /// for each token.
    pub fn tag_line(&self, line: &str) -> Vec<String> {
        self.model.tag(&features_for_line(line))
    }

    /// Tags one raw line and pairs each token with its IOB-decoded label
    /// (entity name, or empty string for unlabeled tokens).
    ///
    /// Token spans refer to the returned normalized source string.
    pub fn parse_line(&self, line: &str) -> (String, Vec<(Token, String)>) {
        let (normalized, tokens) = tokenize_normalized(line);
        let features = crate::features::extract_features(&tokens);
        let labels = remove_iob(&self.model.tag(&features));
        (normalized, tokens.into_iter().zip(labels).collect())
    }

    /// Scores the model against a held-out dataset.
    ///
    /// Every line is tagged independently; predictions and ground truth are
    /// flattened in line order, IOB-stripped, and scored in one pass.
    pub fn evaluate(&self, data: &TrainingData) -> ScoreTable {
        debug!(lines = data.len(), "evaluating model");

        let mut truth = Vec::new();
        let mut pred = Vec::new();

        for (features, labels) in data.features.iter().zip(&data.labels) {
            truth.extend(labels.iter().map(|tag| tag.label()));
            pred.extend(self.model.tag(features));
        }

        evaluate(&remove_iob(&truth), &remove_iob(&pred))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aligner::ReferenceRow;
    use crate::corpus::build_dataset;
    use crate::evaluation::{Metric, TOTAL};
    use crate::features::FeatureMap;
    use crate::model::SequenceLabeler;

    /// Deterministic stand-in for the external engine: labels tokens by
    /// their own features, the way a well-trained model would on easy
    /// lines.
    struct RuleLabeler;

    impl SequenceLabeler for RuleLabeler {
        fn tag(&self, features: &[FeatureMap]) -> Vec<String> {
            features
                .iter()
                .map(|map| {
                    if map.is_set("numeric") {
                        "B-QTY".to_string()
                    } else if map.is_set("unit") {
                        "B-UNIT".to_string()
                    } else {
                        "O".to_string()
                    }
                })
                .collect()
        }
    }

    #[test]
    fn test_tag_line() {
        let pipeline = Pipeline::new(RuleLabeler);
        let tags = pipeline.tag_line("2 tbsp garlic");
        assert_eq!(tags, ["B-QTY", "B-UNIT", "O"]);
    }

    #[test]
    fn test_parse_line_pairs_tokens_and_labels() {
        let pipeline = Pipeline::new(RuleLabeler);
        let (normalized, parsed) = pipeline.parse_line("1½ cups flour");
        assert_eq!(normalized, "1$1/2 cups flour");

        let pairs: Vec<(&str, &str)> = parsed
            .iter()
            .map(|(t, l)| (t.text.as_str(), l.as_str()))
            .collect();
        assert_eq!(pairs, [("1$1/2", "QTY"), ("cups", "UNIT"), ("flour", "")]);
    }

    #[test]
    fn test_evaluate_against_aligned_truth() {
        let rows = vec![ReferenceRow {
            input: "2 tbsp garlic".to_string(),
            name: "garlic".to_string(),
            qty: 2.0,
            range_end: 0.0,
            unit: "tbsp".to_string(),
            comment: None,
        }];
        let data = build_dataset(&rows);
        let pipeline = Pipeline::new(RuleLabeler);
        let scores = pipeline.evaluate(&data);

        // The rule labeler gets QTY and UNIT right but misses INGR
        assert_eq!(scores.precision["QTY"], Metric::Value(1.0));
        assert_eq!(scores.recall["QTY"], Metric::Value(1.0));
        assert_eq!(scores.recall["INGR"], Metric::Value(0.0));
        assert_eq!(scores.accuracy[TOTAL], Metric::Value(2.0 / 3.0));
    }
}
