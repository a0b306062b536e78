//! Rule-based geometric classifier.
//!
//! Rules are evaluated in a fixed, non-reorderable sequence and the first
//! satisfied rule wins: the two-hand symmetric rule, then per-hand rules
//! (left hand first) in the order center, corner, ear-touch. Evaluation
//! stops at the first hand that satisfies any sub-rule. Every threshold
//! comparison is strict, so a value exactly at a boundary does not match.

use std::sync::Arc;

use nalgebra::distance;

use crate::classify::GestureClassifier;
use crate::config::{GestureId, GestureTable, RuleKind};
use crate::landmarks::{
    FaceLandmark, Hand, HandLandmark, LandmarkFrame, LandmarkPoint, PoseLandmark,
};

/// Max vertical distance between index tip and upper lip for the center rule.
pub const T_MOUTH_Y: f32 = 0.05;
/// Max horizontal distance between index tip and nose for the center rule.
pub const T_CENTER_X: f32 = 0.025;
/// Max Euclidean distance between index tip and a mouth corner.
pub const T_CORNER: f32 = 0.04;
/// Lip gap above which the mouth counts as open.
pub const T_OPEN: f32 = 0.03;
/// Max knuckle-to-ear distance per hand for the two-hand rule.
pub const T_EAR: f32 = 0.12;
/// Max knuckle-to-ear distance for the single-hand ear-touch rule.
pub const T_EAR_SINGLE: f32 = 0.08;

pub struct RuleClassifier {
    table: Arc<GestureTable>,
}

impl RuleClassifier {
    pub fn new(table: Arc<GestureTable>) -> Self {
        Self { table }
    }

    /// Both hands at the ears with open palms and an open mouth. Checked
    /// before the per-hand loop; all conditions must hold simultaneously.
    fn two_hand_symmetric(&self, frame: &LandmarkFrame) -> Option<GestureId> {
        let id = self.table.rule_binding(RuleKind::TwoHandSymmetric)?;
        let left = frame.hand_points(Hand::Left)?;
        let right = frame.hand_points(Hand::Right)?;
        let gap = lip_gap(frame)?;
        if gap <= T_OPEN {
            return None;
        }
        let left_ear = frame.pose_point(PoseLandmark::LeftEar)?;
        let right_ear = frame.pose_point(PoseLandmark::RightEar)?;
        let left_knuckle = left[HandLandmark::IndexBase.index()];
        let right_knuckle = right[HandLandmark::IndexBase.index()];
        if !near(left_knuckle, left_ear, T_EAR) || !near(right_knuckle, right_ear, T_EAR) {
            return None;
        }
        if is_palm_open(left) && is_palm_open(right) {
            Some(id)
        } else {
            None
        }
    }

    /// Per-hand sub-rules, in source order: center, corner, ear-touch.
    fn hand_rules(&self, frame: &LandmarkFrame, hand: Hand) -> Option<GestureId> {
        let points = frame.hand_points(hand)?;
        let tip = points[HandLandmark::IndexTip.index()];
        let nose = frame.face_point(FaceLandmark::NoseTip)?;
        let upper_lip = frame.face_point(FaceLandmark::UpperLip)?;
        let near_center_x = (tip.x - nose.x).abs() < T_CENTER_X;

        if let Some(id) = self.table.rule_binding(RuleKind::FingerCenter) {
            if (tip.y - upper_lip.y).abs() < T_MOUTH_Y && near_center_x {
                return Some(id);
            }
        }

        if let Some(id) = self.table.rule_binding(RuleKind::FingerCorner) {
            let at_corner = [FaceLandmark::MouthCornerLeft, FaceLandmark::MouthCornerRight]
                .into_iter()
                .filter_map(|corner| frame.face_point(corner))
                .any(|corner| near(tip, corner, T_CORNER));
            // a centered fingertip is never read as a corner touch
            if at_corner && !near_center_x {
                return Some(id);
            }
        }

        if let Some(id) = self.table.rule_binding(RuleKind::EarTouch) {
            if let Some(gap) = lip_gap(frame) {
                if gap < T_OPEN && is_palm_open(points) {
                    let knuckle = points[HandLandmark::IndexBase.index()];
                    let at_ear = [PoseLandmark::LeftEar, PoseLandmark::RightEar]
                        .into_iter()
                        .filter_map(|ear| frame.pose_point(ear))
                        .any(|ear| near(knuckle, ear, T_EAR_SINGLE));
                    if at_ear {
                        return Some(id);
                    }
                }
            }
        }

        None
    }
}

impl GestureClassifier for RuleClassifier {
    fn classify(&self, frame: &LandmarkFrame) -> Option<GestureId> {
        if let Some(id) = self.two_hand_symmetric(frame) {
            return Some(id);
        }
        for hand in [Hand::Left, Hand::Right] {
            if let Some(id) = self.hand_rules(frame, hand) {
                return Some(id);
            }
        }
        None
    }
}

/// A palm counts as open when every non-thumb fingertip is strictly farther
/// from the wrist than that finger's base knuckle.
pub fn is_palm_open(points: &[LandmarkPoint]) -> bool {
    if points.len() < crate::landmarks::HAND_LANDMARK_COUNT {
        return false;
    }
    const FINGERS: [(HandLandmark, HandLandmark); 4] = [
        (HandLandmark::IndexTip, HandLandmark::IndexBase),
        (HandLandmark::MiddleTip, HandLandmark::MiddleBase),
        (HandLandmark::RingTip, HandLandmark::RingBase),
        (HandLandmark::LittleTip, HandLandmark::LittleBase),
    ];
    let wrist = points[HandLandmark::Wrist.index()];
    FINGERS.into_iter().all(|(tip, base)| {
        distance(&points[tip.index()], &wrist) > distance(&points[base.index()], &wrist)
    })
}

/// Vertical gap between upper and lower lip landmarks.
fn lip_gap(frame: &LandmarkFrame) -> Option<f32> {
    let upper = frame.face_point(FaceLandmark::UpperLip)?;
    let lower = frame.face_point(FaceLandmark::LowerLip)?;
    Some((lower.y - upper.y).abs())
}

fn near(a: LandmarkPoint, b: LandmarkPoint, threshold: f32) -> bool {
    distance(&a, &b) < threshold
}
