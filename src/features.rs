//! Per-frame feature extraction for the learned classifier.
//!
//! The layout below is also the recorder/training sample format, so the
//! engine and the offline pipeline cannot drift apart.

use crate::landmarks::{FaceLandmark, Hand, HandLandmark, LandmarkFrame};

/// Number of scalars in one feature vector.
pub const FEATURE_COUNT: usize = 10;

/// Derive the feature vector for one frame, or `None` when the face set is
/// missing (a normal "cannot classify this frame" signal, not an error).
///
/// Layout:
/// - 0/1: nose tip x, y
/// - 2/3: left mouth corner x, y
/// - 4/5: right mouth corner x, y
/// - 6/7: left index fingertip x, y (0, 0 when the hand is absent)
/// - 8/9: right index fingertip x, y (0, 0 when the hand is absent)
///
/// The zero substitution for a missing hand is intentional; the model was
/// fit against that convention.
pub fn extract_features(frame: &LandmarkFrame) -> Option<[f32; FEATURE_COUNT]> {
    let nose = frame.face_point(FaceLandmark::NoseTip)?;
    let left_corner = frame.face_point(FaceLandmark::MouthCornerLeft)?;
    let right_corner = frame.face_point(FaceLandmark::MouthCornerRight)?;

    let left_index = frame.hand_point(Hand::Left, HandLandmark::IndexTip);
    let right_index = frame.hand_point(Hand::Right, HandLandmark::IndexTip);

    Some([
        nose.x,
        nose.y,
        left_corner.x,
        left_corner.y,
        right_corner.x,
        right_corner.y,
        left_index.map_or(0.0, |p| p.x),
        left_index.map_or(0.0, |p| p.y),
        right_index.map_or(0.0, |p| p.x),
        right_index.map_or(0.0, |p| p.y),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{LandmarkPoint, FACE_LANDMARK_COUNT, HAND_LANDMARK_COUNT};

    fn face_fixture() -> Vec<LandmarkPoint> {
        let mut face = vec![LandmarkPoint::new(0.0, 0.0); FACE_LANDMARK_COUNT];
        face[FaceLandmark::NoseTip.index()] = LandmarkPoint::new(0.5, 0.4);
        face[FaceLandmark::MouthCornerLeft.index()] = LandmarkPoint::new(0.45, 0.55);
        face[FaceLandmark::MouthCornerRight.index()] = LandmarkPoint::new(0.55, 0.55);
        face
    }

    #[test]
    fn missing_face_is_unavailable() {
        let frame = LandmarkFrame {
            left_hand: Some(vec![LandmarkPoint::new(0.5, 0.5); HAND_LANDMARK_COUNT]),
            ..Default::default()
        };
        assert!(extract_features(&frame).is_none());
    }

    #[test]
    fn missing_hands_substitute_zero() {
        let frame = LandmarkFrame {
            face: Some(face_fixture()),
            ..Default::default()
        };
        let features = extract_features(&frame).unwrap();
        assert_eq!(&features[..6], &[0.5, 0.4, 0.45, 0.55, 0.55, 0.55]);
        assert_eq!(&features[6..], &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn present_hand_contributes_index_tip() {
        let mut right = vec![LandmarkPoint::new(0.0, 0.0); HAND_LANDMARK_COUNT];
        right[HandLandmark::IndexTip.index()] = LandmarkPoint::new(0.7, 0.3);
        let frame = LandmarkFrame {
            face: Some(face_fixture()),
            right_hand: Some(right),
            ..Default::default()
        };
        let features = extract_features(&frame).unwrap();
        assert_eq!(&features[6..], &[0.0, 0.0, 0.7, 0.3]);
    }
}
