//! Gesture recognition and overlay trigger engine.
//!
//! Watches a stream of holistic landmark frames (face, pose, hands) and
//! decides, frame by frame, which configured gesture the user is performing,
//! driving a smoothly-fading active-gesture signal for an external overlay
//! compositor. Two interchangeable classifier paths share one contract:
//! hand-crafted geometric rules and a pretrained ONNX classifier.
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use gesture_trigger::{Engine, GestureTable, LandmarkFrame};
//!
//! # fn main() -> Result<(), gesture_trigger::Error> {
//! let table = Arc::new(GestureTable::from_toml_path(Path::new("gestures.toml"))?);
//! let mut engine = Engine::with_rules(table);
//! loop {
//!     let frame = LandmarkFrame::default(); // from the landmark detector
//!     let out = engine.process_frame(&frame);
//!     // hand (out.active, out.intensity) to the compositor
//! }
//! # }
//! ```

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod features;
pub mod landmarks;
pub mod trigger;

pub use classify::model_onnx::{OnnxClassifier, CONFIDENCE_FLOOR};
pub use classify::rules::RuleClassifier;
pub use classify::GestureClassifier;
pub use config::{GestureId, GestureSpec, GestureTable, RuleKind};
pub use engine::{Engine, TriggerOutput};
pub use error::Error;
pub use features::{extract_features, FEATURE_COUNT};
pub use landmarks::{
    FaceLandmark, Hand, HandLandmark, LandmarkFrame, LandmarkPoint, PoseLandmark,
};
pub use trigger::{TriggerState, FADE_STEP, INTENSITY_MAX};
