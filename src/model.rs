//! # Sequence-Labeling Engine Interface
//!
//! The statistical model — training, tagging and persistence of a
//! linear-chain sequence labeler — is an external collaborator. This module
//! defines the narrow seam it plugs into, so the engine can be swapped
//! without touching tokenization, alignment or scoring.
//!
//! Both traits speak in the pipeline's own currency: per-line sequences of
//! [`FeatureMap`]s matched by position with per-line sequences of IOB tags.
//! What the engine does internally (and whether it parallelizes) is outside
//! this crate's contract.

use crate::features::FeatureMap;
use crate::tagger::Tag;

/// A trained model that assigns an IOB tag string to every token of a line.
///
/// The returned labels are positional: `tag(features)[i]` is the label of
/// the token whose features sit at `features[i]`. Implementations return
/// textual tags (e.g. `"B-QTY"`) rather than [`Tag`] values because an
/// out-of-process engine may emit labels outside the known alphabet; the
/// IOB decoder passes such labels through unchanged.
pub trait SequenceLabeler {
    fn tag(&self, features: &[FeatureMap]) -> Vec<String>;
}

/// Trains a [`SequenceLabeler`] from per-line feature and label sequences.
///
/// Engine configuration (hyperparameters, output paths, verbosity) lives on
/// the trainer value itself; `train` only carries the data.
pub trait SequenceTrainer {
    type Model: SequenceLabeler;
    type Error;

    /// Trains a model. `features` and `labels` are parallel by line and by
    /// token within each line.
    fn train(
        &self,
        features: &[Vec<FeatureMap>],
        labels: &[Vec<Tag>],
    ) -> Result<Self::Model, Self::Error>;
}

impl<M: SequenceLabeler + ?Sized> SequenceLabeler for &M {
    fn tag(&self, features: &[FeatureMap]) -> Vec<String> {
        (**self).tag(features)
    }
}

impl<M: SequenceLabeler + ?Sized> SequenceLabeler for Box<M> {
    fn tag(&self, features: &[FeatureMap]) -> Vec<String> {
        (**self).tag(features)
    }
}
