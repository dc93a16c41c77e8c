//! Interaction frame - the classifier's per-tick output
//!
//! Fully replaced every tick. Right-hand fields only exist when a right hand
//! was observed, so "no right hand" can never claim cursor control.

/// A point in normalized camera space, already mirrored for the screen
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NormPoint {
    pub x: f32,
    pub y: f32,
}

impl NormPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Cursor-hand (right) classification
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RightHandPose {
    /// Mirrored index fingertip
    pub cursor: NormPoint,
    /// Index tip to thumb tip, normalized units
    pub pinch_distance: f32,
    pub is_strict_pointing: bool,
    pub is_pinch_ready: bool,
    pub can_control_cursor: bool,
    pub is_open_palm: bool,
}

/// Zoom/pan-hand (left) classification
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeftHandPose {
    pub thumb_up: bool,
    pub index_up: bool,
    pub open_palm: bool,
    /// Mirrored wrist position
    pub palm_center: NormPoint,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InteractionFrame {
    pub right: Option<RightHandPose>,
    pub left: Option<LeftHandPose>,
}

impl InteractionFrame {
    pub fn right_hand_detected(&self) -> bool {
        self.right.is_some()
    }

    pub fn left_hand_detected(&self) -> bool {
        self.left.is_some()
    }

    pub fn cursor(&self) -> Option<NormPoint> {
        self.right.map(|r| r.cursor)
    }

    pub fn pinch_distance(&self) -> Option<f32> {
        self.right.map(|r| r.pinch_distance)
    }

    pub fn is_strict_pointing(&self) -> bool {
        self.right.is_some_and(|r| r.is_strict_pointing)
    }

    pub fn is_pinch_ready(&self) -> bool {
        self.right.is_some_and(|r| r.is_pinch_ready)
    }

    /// Always false without a right hand, whatever the left hand does
    pub fn can_control_cursor(&self) -> bool {
        self.right.is_some_and(|r| r.can_control_cursor)
    }

    pub fn is_open_palm(&self) -> bool {
        self.right.is_some_and(|r| r.is_open_palm)
    }

    pub fn left_thumb_up(&self) -> bool {
        self.left.is_some_and(|l| l.thumb_up)
    }

    pub fn left_index_up(&self) -> bool {
        self.left.is_some_and(|l| l.index_up)
    }

    pub fn left_open_palm(&self) -> bool {
        self.left.is_some_and(|l| l.open_palm)
    }

    pub fn left_palm_center(&self) -> Option<NormPoint> {
        self.left.map(|l| l.palm_center)
    }
}
