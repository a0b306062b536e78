use nalgebra::Point2;

/// A single landmark in normalized `[0,1]` frame coordinates.
pub type LandmarkPoint = Point2<f32>;

// per-set point counts of the holistic detector topology
pub const FACE_LANDMARK_COUNT: usize = 468;
pub const POSE_LANDMARK_COUNT: usize = 33;
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Named face mesh points used by the engine.
#[derive(Debug, Clone, Copy)]
pub enum FaceLandmark {
    NoseTip,
    MouthCornerLeft,
    MouthCornerRight,
    UpperLip,
    LowerLip,
}

impl FaceLandmark {
    pub fn index(self) -> usize {
        match self {
            FaceLandmark::NoseTip => 1,
            FaceLandmark::MouthCornerLeft => 61,
            FaceLandmark::MouthCornerRight => 291,
            FaceLandmark::UpperLip => 13,
            FaceLandmark::LowerLip => 14,
        }
    }
}

/// Named hand skeleton points used by the engine.
#[derive(Debug, Clone, Copy)]
pub enum HandLandmark {
    Wrist,
    IndexBase,
    MiddleBase,
    RingBase,
    LittleBase,
    IndexTip,
    MiddleTip,
    RingTip,
    LittleTip,
}

impl HandLandmark {
    pub fn index(self) -> usize {
        match self {
            HandLandmark::Wrist => 0,
            HandLandmark::IndexBase => 5,
            HandLandmark::MiddleBase => 9,
            HandLandmark::RingBase => 13,
            HandLandmark::LittleBase => 17,
            HandLandmark::IndexTip => 8,
            HandLandmark::MiddleTip => 12,
            HandLandmark::RingTip => 16,
            HandLandmark::LittleTip => 20,
        }
    }
}

/// Named body pose points used by the engine.
#[derive(Debug, Clone, Copy)]
pub enum PoseLandmark {
    LeftEar,
    RightEar,
}

impl PoseLandmark {
    pub fn index(self) -> usize {
        match self {
            PoseLandmark::LeftEar => 7,
            PoseLandmark::RightEar => 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Left,
    Right,
}

/// One frame's worth of landmark sets as delivered by the external detector.
///
/// Any set may be absent when the detector failed to find it that frame.
/// Consumed read-only by the engine and never kept beyond the current frame.
#[derive(Debug, Clone, Default)]
pub struct LandmarkFrame {
    pub face: Option<Vec<LandmarkPoint>>,
    pub pose: Option<Vec<LandmarkPoint>>,
    pub left_hand: Option<Vec<LandmarkPoint>>,
    pub right_hand: Option<Vec<LandmarkPoint>>,
}

impl LandmarkFrame {
    pub fn face_point(&self, landmark: FaceLandmark) -> Option<LandmarkPoint> {
        point_at(self.face.as_deref(), landmark.index())
    }

    pub fn pose_point(&self, landmark: PoseLandmark) -> Option<LandmarkPoint> {
        point_at(self.pose.as_deref(), landmark.index())
    }

    /// The full point set for one hand, only when it is present and complete.
    pub fn hand_points(&self, hand: Hand) -> Option<&[LandmarkPoint]> {
        let points = match hand {
            Hand::Left => self.left_hand.as_deref()?,
            Hand::Right => self.right_hand.as_deref()?,
        };
        if points.len() < HAND_LANDMARK_COUNT {
            return None;
        }
        Some(points)
    }

    pub fn hand_point(&self, hand: Hand, landmark: HandLandmark) -> Option<LandmarkPoint> {
        self.hand_points(hand).map(|points| points[landmark.index()])
    }
}

fn point_at(points: Option<&[LandmarkPoint]>, index: usize) -> Option<LandmarkPoint> {
    points.and_then(|points| points.get(index).copied())
}
