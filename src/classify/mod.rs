pub mod model_onnx;
pub mod rules;

use crate::config::GestureId;
use crate::landmarks::LandmarkFrame;

/// Per-frame classification contract shared by both classifier paths.
///
/// `None` means "no gesture this frame" and covers every soft failure:
/// missing landmark sets, no satisfied rule, sub-floor model confidence.
/// A deployment selects one implementation; the trigger state machine is
/// agnostic to which.
pub trait GestureClassifier {
    fn classify(&self, frame: &LandmarkFrame) -> Option<GestureId>;
}
