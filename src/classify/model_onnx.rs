//! Learned classifier over a pretrained ONNX artifact.
//!
//! The artifact is produced out-of-band by the training pipeline and loaded
//! once at startup; loading must fail fast when the file is missing or
//! corrupt. Per-frame inference feeds the 10-scalar feature vector as a
//! `[1, 10]` f32 tensor and reads class probabilities from the model's
//! final f32 output (classifier exports put label tensors first).

use std::path::Path;
use std::sync::Arc;

use ndarray::{arr2, CowArray};
use ort::tensor::OrtOwnedTensor;
use ort::{Environment, Session, SessionBuilder, Value};
use tracing::{info, warn};

use crate::classify::GestureClassifier;
use crate::config::{GestureId, GestureTable};
use crate::error::Error;
use crate::features::{extract_features, FEATURE_COUNT};
use crate::landmarks::LandmarkFrame;

/// Minimum confidence the predicted class must exceed to be accepted.
pub const CONFIDENCE_FLOOR: f32 = 0.70;

pub struct OnnxClassifier {
    session: Session,
    table: Arc<GestureTable>,
}

impl OnnxClassifier {
    /// Load the classifier artifact from disk. Fatal on any load failure.
    pub fn from_file(path: &Path, table: Arc<GestureTable>) -> Result<Self, Error> {
        let environment = Environment::builder()
            .with_name("gesture-trigger")
            .build()?
            .into_arc();
        let session = SessionBuilder::new(&environment)?
            .with_intra_threads(1)?
            .with_model_from_file(path)?;
        info!(model = %path.display(), "classifier artifact loaded");
        Ok(Self { session, table })
    }

    fn predict(&self, features: &[f32; FEATURE_COUNT]) -> Result<Option<usize>, ort::OrtError> {
        let array = CowArray::from(arr2(&[*features]).into_dyn());
        let inputs = vec![Value::from_array(self.session.allocator(), &array)?];
        let outputs = self.session.run(inputs)?;
        let value = match outputs.last() {
            Some(value) => value,
            None => return Ok(None),
        };
        let probs: OrtOwnedTensor<f32, _> = value.try_extract()?;
        let row: Vec<f32> = probs.view().iter().copied().collect();
        Ok(confidence_gate(&row))
    }
}

impl GestureClassifier for OnnxClassifier {
    fn classify(&self, frame: &LandmarkFrame) -> Option<GestureId> {
        let features = extract_features(frame)?;
        let class = match self.predict(&features) {
            Ok(class) => class?,
            Err(err) => {
                // a malformed frame degrades to "no gesture", never a panic
                warn!(%err, "classifier inference failed, skipping frame");
                return None;
            }
        };
        self.table.class_binding(class)
    }
}

/// Pick the winning class from a probability row, gated by the confidence
/// floor. The winning probability is clamped to `[0, 1]` before the
/// comparison; a confidence exactly at the floor does not pass.
pub(crate) fn confidence_gate(probs: &[f32]) -> Option<usize> {
    if probs.is_empty() {
        return None;
    }
    let mut best = 0;
    let mut best_prob = f32::NEG_INFINITY;
    for (class, &prob) in probs.iter().enumerate() {
        if prob > best_prob {
            best = class;
            best_prob = prob;
        }
    }
    let confidence = best_prob.clamp(0.0, 1.0);
    if confidence > CONFIDENCE_FLOOR {
        Some(best)
    } else {
        None
    }
}
