//! Per-frame engine context.
//!
//! One `Engine` is constructed at startup and owns everything mutable for a
//! run: the validated gesture table, the selected classifier, and the single
//! trigger state. Frames are processed strictly in arrival order; each call
//! runs extraction, classification, and the trigger step to completion
//! before returning. A dropped frame is just a skipped tick upstream.

use std::path::Path;
use std::sync::Arc;

use crate::classify::model_onnx::OnnxClassifier;
use crate::classify::rules::RuleClassifier;
use crate::classify::GestureClassifier;
use crate::config::{GestureId, GestureTable};
use crate::error::Error;
use crate::landmarks::LandmarkFrame;
use crate::trigger::TriggerState;

/// Compositor-facing output, emitted once per processed frame. The
/// compositor maps `active` to its asset and blends at `intensity / 255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerOutput {
    pub active: Option<GestureId>,
    pub intensity: u8,
}

pub struct Engine {
    table: Arc<GestureTable>,
    classifier: Box<dyn GestureClassifier>,
    trigger: TriggerState,
}

impl Engine {
    pub fn new(table: Arc<GestureTable>, classifier: Box<dyn GestureClassifier>) -> Self {
        Self {
            table,
            classifier,
            trigger: TriggerState::new(),
        }
    }

    /// Engine over the rule-based classifier path.
    pub fn with_rules(table: Arc<GestureTable>) -> Self {
        let classifier = RuleClassifier::new(Arc::clone(&table));
        Self::new(table, Box::new(classifier))
    }

    /// Engine over the learned classifier path. Fails fast when the
    /// artifact cannot be loaded.
    pub fn with_model(table: Arc<GestureTable>, model_path: &Path) -> Result<Self, Error> {
        let classifier = OnnxClassifier::from_file(model_path, Arc::clone(&table))?;
        Ok(Self::new(table, Box::new(classifier)))
    }

    /// Classify one frame and advance the trigger state.
    pub fn process_frame(&mut self, frame: &LandmarkFrame) -> TriggerOutput {
        let result = self.classifier.classify(frame);
        self.trigger.step(result);
        TriggerOutput {
            active: self.trigger.active(),
            intensity: self.trigger.intensity(),
        }
    }

    pub fn table(&self) -> &GestureTable {
        &self.table
    }

    pub fn state(&self) -> &TriggerState {
        &self.trigger
    }
}
