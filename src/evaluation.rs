//! # Entity-Level Scoring
//!
//! Turns a pair of true/predicted label sequences into per-entity and
//! aggregate accuracy, precision, recall and F-score. Labels must already
//! be IOB-decoded (see [`crate::tagger::remove_iob`]): plain entity names,
//! with the empty string standing for "no label".
//!
//! ## Zero-denominator convention
//!
//! Precision, recall and F-score resolve to `0` when their denominator is
//! zero; accuracy resolves to an explicit [`Metric::Undefined`] marker
//! instead. The asymmetry is part of the contract — an undefined accuracy
//! must never be confused with a true zero score.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tagger::Entity;

/// Key under which corpus-wide aggregates are reported.
pub const TOTAL: &str = "Total";

/// A metric value, or an explicit marker that the metric has no defined
/// value because its denominator was zero.
///
/// Serializes untagged: a plain number, or `null` for `Undefined`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Value(f64),
    Undefined,
}

impl Metric {
    /// The numeric value, if defined.
    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Value(v) => Some(*v),
            Metric::Undefined => None,
        }
    }
}

/// The four score mappings produced by one evaluation pass, each keyed by
/// entity name plus the synthetic [`TOTAL`] key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTable {
    pub accuracy: HashMap<String, Metric>,
    pub precision: HashMap<String, Metric>,
    pub recall: HashMap<String, Metric>,
    pub fscore: HashMap<String, Metric>,
}

/// Computes accuracy, precision, recall and F-score per entity and across
/// all entities.
///
/// `true_labels` and `pred_labels` are matched by position and must have
/// the same length; both use `""` for unlabeled positions.
pub fn evaluate<S: AsRef<str>, T: AsRef<str>>(
    true_labels: &[S],
    pred_labels: &[T],
) -> ScoreTable {
    debug_assert_eq!(true_labels.len(), pred_labels.len());

    // Tally entities, predictions and matches
    let mut ntrue: HashMap<String, f64> = HashMap::new();
    let mut npred: HashMap<String, f64> = HashMap::new();
    let mut correct: HashMap<String, f64> = HashMap::new();

    for (t, p) in true_labels.iter().zip(pred_labels) {
        let (t, p) = (t.as_ref(), p.as_ref());
        *ntrue.entry(t.to_string()).or_default() += 1.0;
        *npred.entry(p.to_string()).or_default() += 1.0;
        if t == p {
            *correct.entry(t.to_string()).or_default() += 1.0;
        }
    }

    let mut accuracy = HashMap::new();
    let mut precision = HashMap::new();
    let mut recall = HashMap::new();
    let mut fscore = HashMap::new();

    let count = |map: &HashMap<String, f64>, key: &str| map.get(key).copied().unwrap_or(0.0);

    for entity in Entity::all() {
        let e = entity.name();

        let cor_entities = count(&correct, e);
        let cor_nonentities = count(&correct, "");
        let n_entities = count(&ntrue, e);
        let n_nonentities = count(&ntrue, "");
        let n_predicted = count(&npred, e);

        let acc = if n_entities + n_nonentities > 0.0 {
            Metric::Value((cor_entities + cor_nonentities) / (n_entities + n_nonentities))
        } else {
            Metric::Undefined
        };

        let p = if n_predicted > 0.0 {
            cor_entities / n_predicted
        } else {
            0.0
        };
        let r = if n_entities > 0.0 {
            cor_entities / n_entities
        } else {
            0.0
        };
        let f = if p + r > 0.0 { 2.0 * p * r / (p + r) } else { 0.0 };

        accuracy.insert(e.to_string(), acc);
        precision.insert(e.to_string(), Metric::Value(p));
        recall.insert(e.to_string(), Metric::Value(r));
        fscore.insert(e.to_string(), Metric::Value(f));
    }

    // Overall accuracy includes the non-entity bucket on both sides, so it
    // is computed before that bucket is zeroed out
    let total_true: f64 = ntrue.values().sum();
    let total_correct: f64 = correct.values().sum();
    accuracy.insert(
        TOTAL.to_string(),
        if total_true > 0.0 {
            Metric::Value(total_correct / total_true)
        } else {
            Metric::Undefined
        },
    );

    // Drop the non-entity counts and recompute the aggregates over
    // entities only
    correct.insert(String::new(), 0.0);
    npred.insert(String::new(), 0.0);
    ntrue.insert(String::new(), 0.0);

    let sum_correct: f64 = correct.values().sum();
    let sum_npred: f64 = npred.values().sum();
    let sum_ntrue: f64 = ntrue.values().sum();

    let p_total = if sum_npred > 0.0 {
        sum_correct / sum_npred
    } else {
        0.0
    };
    let r_total = if sum_ntrue > 0.0 {
        sum_correct / sum_ntrue
    } else {
        0.0
    };
    let f_total = if p_total + r_total > 0.0 {
        2.0 * p_total * r_total / (p_total + r_total)
    } else {
        0.0
    };

    precision.insert(TOTAL.to_string(), Metric::Value(p_total));
    recall.insert(TOTAL.to_string(), Metric::Value(r_total));
    fscore.insert(TOTAL.to_string(), Metric::Value(f_total));

    debug!(
        positions = true_labels.len(),
        total_accuracy = ?accuracy.get(TOTAL),
        total_fscore = ?fscore.get(TOTAL),
        "evaluation complete"
    );

    ScoreTable {
        accuracy,
        precision,
        recall,
        fscore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn val(metric: &Metric) -> f64 {
        metric.value().expect("metric should be defined")
    }

    #[test]
    fn test_precision_recall_basic() {
        let truth = ["INGR", "", "QTY"];
        let pred = ["INGR", "INGR", "QTY"];
        let scores = evaluate(&truth, &pred);

        // Two INGR predictions, one correct
        assert!((val(&scores.precision["INGR"]) - 0.5).abs() < 1e-9);
        assert!((val(&scores.recall["INGR"]) - 1.0).abs() < 1e-9);
        // 2 of 3 positions correct overall
        assert!((val(&scores.accuracy[TOTAL]) - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_perfect_prediction() {
        let labels = ["QTY", "UNIT", "INGR", "", ""];
        let scores = evaluate(&labels, &labels);

        for key in ["QTY", "UNIT", "INGR", TOTAL] {
            assert!((val(&scores.precision[key]) - 1.0).abs() < 1e-9);
            assert!((val(&scores.recall[key]) - 1.0).abs() < 1e-9);
            assert!((val(&scores.fscore[key]) - 1.0).abs() < 1e-9);
        }
        assert!((val(&scores.accuracy[TOTAL]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_absent_entity_conventions() {
        // QTY-UR never occurs in truth or prediction
        let truth = ["QTY", ""];
        let pred = ["QTY", ""];
        let scores = evaluate(&truth, &pred);

        // Zero-denominator precision/recall/fscore resolve to 0…
        assert!((val(&scores.precision["QTY-UR"])).abs() < 1e-9);
        assert!((val(&scores.recall["QTY-UR"])).abs() < 1e-9);
        assert!((val(&scores.fscore["QTY-UR"])).abs() < 1e-9);
        // …but its accuracy still has the non-entity bucket as denominator
        assert!((val(&scores.accuracy["QTY-UR"]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_accuracy_undefined() {
        let empty: [&str; 0] = [];
        let scores = evaluate(&empty, &empty);
        assert_eq!(scores.accuracy[TOTAL], Metric::Undefined);
        assert_eq!(scores.accuracy["INGR"], Metric::Undefined);
        assert_eq!(scores.precision[TOTAL], Metric::Value(0.0));
    }

    #[test]
    fn test_total_accuracy_counts_nonentity_before_zeroing() {
        // All positions unlabeled and predicted unlabeled: total accuracy 1,
        // but entity-only precision/recall are 0
        let labels = ["", "", ""];
        let scores = evaluate(&labels, &labels);
        assert!((val(&scores.accuracy[TOTAL]) - 1.0).abs() < 1e-9);
        assert!((val(&scores.precision[TOTAL])).abs() < 1e-9);
        assert!((val(&scores.recall[TOTAL])).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_label_counts_toward_totals() {
        // A passthrough label outside the entity set still affects totals
        let truth = ["CMNT", "QTY"];
        let pred = ["CMNT", "QTY"];
        let scores = evaluate(&truth, &pred);
        assert!((val(&scores.accuracy[TOTAL]) - 1.0).abs() < 1e-9);
        // Entity-only aggregates include the CMNT counts in their sums
        assert!((val(&scores.precision[TOTAL]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_metric_serializes_as_number_or_null() {
        let json = serde_json::to_value([Metric::Value(0.5), Metric::Undefined]).unwrap();
        assert_eq!(json[0], 0.5);
        assert!(json[1].is_null());
    }
}
