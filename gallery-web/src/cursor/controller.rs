//! Cursor controller - smoothing and control arbitration
//!
//! Owns the smoothed cursor and decides, each tick, whether the right hand
//! is currently steering it.

use super::smoothing::ExpSmoother2D;
use crate::gesture::{InteractionFrame, NormPoint};
use crate::views::{ScreenPoint, Viewport};

/// Result of one controller update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorUpdate {
    /// The right hand is pointing or pinch-ready this tick
    pub controlling: bool,
    /// Smoothed cursor in screen pixels, only while controlling
    pub screen: Option<ScreenPoint>,
}

#[derive(Clone, Copy, Debug)]
pub struct CursorController {
    smoother: ExpSmoother2D,
    was_controlling: bool,
}

impl CursorController {
    pub fn new(smoothing: f32) -> Self {
        Self {
            smoother: ExpSmoother2D::new(smoothing),
            was_controlling: false,
        }
    }

    pub fn set_smoothing(&mut self, smoothing: f32) {
        self.smoother.set_factor(smoothing);
    }

    /// Process one non-null frame
    pub fn update(&mut self, frame: &InteractionFrame, viewport: Viewport) -> CursorUpdate {
        let controlling = frame.can_control_cursor() || frame.is_strict_pointing();

        let update = match (controlling, frame.cursor()) {
            (true, Some(raw)) => {
                // Regaining control snaps straight to the raw point
                let smoothed = if !self.was_controlling {
                    self.smoother.snap(raw);
                    raw
                } else {
                    self.smoother.filter(raw)
                };
                CursorUpdate {
                    controlling: true,
                    screen: Some(viewport.to_screen(smoothed)),
                }
            }
            _ => CursorUpdate {
                controlling: false,
                screen: None,
            },
        };

        self.was_controlling = update.controlling;
        update
    }

    /// Smoothed position in normalized space
    pub fn position(&self) -> NormPoint {
        self.smoother.value()
    }

    pub fn is_controlling(&self) -> bool {
        self.was_controlling
    }
}

impl Default for CursorController {
    fn default() -> Self {
        Self::new(0.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::fixtures::*;
    use crate::gesture::{GestureClassifier, Handedness};

    const VIEW: Viewport = Viewport {
        width: 1000.0,
        height: 500.0,
    };

    fn frame_pointing(x: f32, y: f32) -> InteractionFrame {
        GestureClassifier::default()
            .classify(&[right_pointing_at(x, y)])
            .unwrap()
    }

    fn frame_fist() -> InteractionFrame {
        GestureClassifier::default()
            .classify(&[fist(Handedness::Right)])
            .unwrap()
    }

    #[test]
    fn snaps_on_control_gain_then_lerps() {
        let mut cursor = CursorController::default();

        let first = cursor.update(&frame_pointing(0.2, 0.4), VIEW);
        let p = first.screen.unwrap();
        assert!((p.x - 800.0).abs() < 1e-3);
        assert!((p.y - 200.0).abs() < 1e-3);

        // raw jumps to mirrored x=0.3: smoothed moves 20% of the way
        let second = cursor.update(&frame_pointing(0.7, 0.4), VIEW);
        let p = second.screen.unwrap();
        assert!((p.x - 700.0).abs() < 1e-2, "x = {}", p.x);
    }

    #[test]
    fn losing_control_keeps_last_position_and_resnaps() {
        let mut cursor = CursorController::default();
        cursor.update(&frame_pointing(0.5, 0.5), VIEW);

        let idle = cursor.update(&frame_fist(), VIEW);
        assert!(!idle.controlling);
        assert_eq!(idle.screen, None);
        assert_eq!(cursor.position(), NormPoint::new(0.5, 0.5));

        let back = cursor.update(&frame_pointing(0.1, 0.9), VIEW);
        assert!(back.controlling);
        assert!((cursor.position().x - 0.9).abs() < 1e-6);
    }

    #[test]
    fn left_hand_only_frame_is_not_control() {
        let mut cursor = CursorController::default();
        let mut hand = right_pointing_at(0.5, 0.5);
        hand.handedness = Some(Handedness::Left);
        let frame = GestureClassifier::default().classify(&[hand]).unwrap();
        assert!(!cursor.update(&frame, VIEW).controlling);
        assert!(!cursor.is_controlling());
    }
}
