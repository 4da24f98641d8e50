//! # Training Corpus Assembly
//!
//! Turns structured reference rows into the per-line feature and IOB label
//! sequences the sequence-labeling engine trains on. Each row is processed
//! independently: tokenize the raw input (with normalization), align labels
//! against the structured fields, extract features, encode IOB.
//!
//! Rows are independent, so the build is an embarrassingly parallel map —
//! [`build_dataset_parallel`] runs it over rayon, reassembling results in
//! original row order before anything downstream flattens them.

use rand::Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

use crate::aligner::{match_tags, ReferenceRow};
use crate::features::{extract_features, FeatureMap};
use crate::tagger::{iob_encode, Tag};
use crate::tokenizer::tokenize_normalized;

/// Per-line feature and label sequences, parallel by index.
#[derive(Debug, Clone, Default)]
pub struct TrainingData {
    pub features: Vec<Vec<FeatureMap>>,
    pub labels: Vec<Vec<Tag>>,
}

#[derive(Serialize)]
struct LineRecord<'a> {
    features: &'a [FeatureMap],
    labels: Vec<String>,
}

impl TrainingData {
    /// Number of lines in the dataset.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Serializes the dataset as JSON lines, one
    /// `{"features": […], "labels": […]}` object per input line — the
    /// handoff format for an out-of-process engine.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for (features, labels) in self.features.iter().zip(&self.labels) {
            let record = LineRecord {
                features,
                labels: labels.iter().map(Tag::label).collect(),
            };
            out.push_str(&serde_json::to_string(&record)?);
            out.push('\n');
        }
        Ok(out)
    }
}

/// Processes one reference row into its feature and label sequences.
///
/// Returns `None` for rows missing the raw input or the ingredient name —
/// nothing can be aligned without them.
fn build_line(row: &ReferenceRow) -> Option<(Vec<FeatureMap>, Vec<Tag>)> {
    if row.input.is_empty() || row.name.is_empty() {
        return None;
    }

    let (_, tokens) = tokenize_normalized(&row.input);
    let labels = iob_encode(&match_tags(&tokens, row));
    let features = extract_features(&tokens);

    trace!(input = %row.input, tokens = tokens.len(), "processed row");
    Some((features, labels))
}

/// Builds the training dataset sequentially, preserving row order.
pub fn build_dataset(rows: &[ReferenceRow]) -> TrainingData {
    debug!(rows = rows.len(), "building training dataset");
    collect_lines(rows.iter().filter_map(build_line).collect())
}

/// Builds the training dataset with one rayon task per row.
///
/// Results come back in original row order (rayon's collect preserves
/// indices), so downstream flattening sees the same sequences as the
/// sequential build.
pub fn build_dataset_parallel(rows: &[ReferenceRow]) -> TrainingData {
    debug!(rows = rows.len(), "building training dataset in parallel");
    collect_lines(rows.par_iter().filter_map(build_line).collect())
}

fn collect_lines(lines: Vec<(Vec<FeatureMap>, Vec<Tag>)>) -> TrainingData {
    let mut data = TrainingData::default();
    for (features, labels) in lines {
        data.features.push(features);
        data.labels.push(labels);
    }
    data
}

/// Splits a dataset into training and test partitions, assigning each line
/// to the test set independently with probability `test_prop`.
///
/// `test_prop` is clamped to `[0, 1]`; `0.0` keeps everything in the
/// training partition.
pub fn split_dataset(data: TrainingData, test_prop: f64) -> (TrainingData, TrainingData) {
    let test_prop = test_prop.clamp(0.0, 1.0);
    let mut rng = rand::rng();

    let mut train = TrainingData::default();
    let mut test = TrainingData::default();

    for (features, labels) in data.features.into_iter().zip(data.labels) {
        let target = if rng.random_bool(test_prop) {
            &mut test
        } else {
            &mut train
        };
        target.features.push(features);
        target.labels.push(labels);
    }

    debug!(
        train_lines = train.len(),
        test_lines = test.len(),
        "split dataset"
    );
    (train, test)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<ReferenceRow> {
        vec![
            ReferenceRow {
                input: "2 tbsp garlic, chopped".to_string(),
                name: "garlic".to_string(),
                qty: 2.0,
                range_end: 0.0,
                unit: "tbsp".to_string(),
                comment: Some("chopped".to_string()),
            },
            ReferenceRow {
                input: "1½ cups flour".to_string(),
                name: "flour".to_string(),
                qty: 1.5,
                range_end: 0.0,
                unit: "cup".to_string(),
                comment: None,
            },
        ]
    }

    #[test]
    fn test_build_dataset_shapes() {
        let data = build_dataset(&rows());
        assert_eq!(data.len(), 2);
        // Features and labels stay aligned per line
        for (features, labels) in data.features.iter().zip(&data.labels) {
            assert_eq!(features.len(), labels.len());
        }
        // "2 tbsp garlic , chopped" -> 5 tokens
        assert_eq!(data.features[0].len(), 5);
        // "1$1/2 cups flour" -> 3 tokens
        assert_eq!(data.features[1].len(), 3);
    }

    #[test]
    fn test_build_dataset_labels() {
        let data = build_dataset(&rows());
        let rendered: Vec<String> = data.labels[1].iter().map(Tag::label).collect();
        assert_eq!(rendered, ["B-QTY", "B-UNIT", "B-INGR"]);
    }

    #[test]
    fn test_rows_missing_fields_are_skipped() {
        let mut rows = rows();
        rows[0].name = String::new();
        let data = build_dataset(&rows);
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_parallel_matches_sequential_order() {
        let rows = rows();
        let sequential = build_dataset(&rows);
        let parallel = build_dataset_parallel(&rows);
        assert_eq!(sequential.labels, parallel.labels);
        assert_eq!(sequential.features, parallel.features);
    }

    #[test]
    fn test_split_extremes() {
        let data = build_dataset(&rows());
        let (train, test) = split_dataset(data.clone(), 0.0);
        assert_eq!(train.len(), 2);
        assert!(test.is_empty());

        let (train, test) = split_dataset(data, 1.0);
        assert!(train.is_empty());
        assert_eq!(test.len(), 2);
    }

    #[test]
    fn test_jsonl_export() {
        let data = build_dataset(&rows());
        let jsonl = data.to_jsonl().unwrap();
        let lines: Vec<&str> = jsonl.lines().collect();
        assert_eq!(lines.len(), 2);

        let record: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(record["labels"][0], "B-QTY");
        assert_eq!(record["features"][0]["token"], "1$1/2");
    }
}
