//! Landmark-to-gesture classifier
//!
//! Turns one frame's hand list into a single [`InteractionFrame`]. The right
//! hand drives the cursor, the left hand drives zoom and pan. Screen up is
//! smaller y, so "extended" means tip.y < joint.y.

use super::frame::{InteractionFrame, LeftHandPose, NormPoint, RightHandPose};
use super::landmarks::*;

/// Stateless per-frame classifier
#[derive(Clone, Copy, Debug)]
pub struct GestureClassifier {
    /// Left thumb/index must rise this far above their reference joint
    left_extension_margin: f32,
}

impl GestureClassifier {
    pub fn new(left_extension_margin: f32) -> Self {
        Self {
            left_extension_margin,
        }
    }

    pub fn set_left_extension_margin(&mut self, margin: f32) {
        self.left_extension_margin = margin;
    }

    /// Classify one frame. `None` means no hands at all this tick.
    ///
    /// At most one hand per handedness is used; the first occurrence wins.
    pub fn classify(&self, hands: &[HandObservation]) -> Option<InteractionFrame> {
        if hands.is_empty() {
            return None;
        }

        let right = hands
            .iter()
            .find(|h| h.handedness == Some(Handedness::Right))
            .map(classify_right);
        let left = hands
            .iter()
            .find(|h| h.handedness == Some(Handedness::Left))
            .map(|h| self.classify_left(h));

        Some(InteractionFrame { right, left })
    }

    fn classify_left(&self, hand: &HandObservation) -> LeftHandPose {
        let index_extension = hand.point(INDEX_TIP).y - hand.point(INDEX_PIP).y;
        let thumb_extension = hand.point(THUMB_TIP).y - hand.point(THUMB_MCP).y;

        let index_ext = index_extension < -self.left_extension_margin;
        let thumb_ext = thumb_extension < -self.left_extension_margin;
        let middle_ext = finger_extended(hand, MIDDLE_TIP, MIDDLE_PIP);
        let ring_ext = finger_extended(hand, RING_TIP, RING_PIP);
        let pinky_ext = finger_extended(hand, PINKY_TIP, PINKY_PIP);

        // Open palm wins over thumb/index so panning never zooms
        let open_palm = index_ext && middle_ext && ring_ext && pinky_ext;

        let (thumb_up, index_up) = if open_palm {
            (false, false)
        } else {
            let others_curled = !middle_ext && !ring_ext;
            (
                thumb_ext && others_curled && thumb_extension < index_extension,
                index_ext && others_curled && index_extension < thumb_extension,
            )
        };

        let wrist = hand.point(WRIST);
        LeftHandPose {
            thumb_up,
            index_up,
            open_palm,
            palm_center: NormPoint::new(1.0 - wrist.x, wrist.y),
        }
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(0.03)
    }
}

fn finger_extended(hand: &HandObservation, tip: usize, pip: usize) -> bool {
    hand.point(tip).y < hand.point(pip).y
}

fn classify_right(hand: &HandObservation) -> RightHandPose {
    let index_ext = finger_extended(hand, INDEX_TIP, INDEX_PIP);
    let middle_ext = finger_extended(hand, MIDDLE_TIP, MIDDLE_PIP);
    let ring_ext = finger_extended(hand, RING_TIP, RING_PIP);
    let pinky_ext = finger_extended(hand, PINKY_TIP, PINKY_PIP);

    // Right hand faces the camera: an open thumb points toward smaller x
    let thumb_tip = hand.point(THUMB_TIP);
    let thumb_ext = thumb_tip.x < hand.point(THUMB_IP).x;

    let others_curled = !middle_ext && !ring_ext && !pinky_ext;
    let is_strict_pointing = index_ext && others_curled;
    let is_pinch_ready = index_ext && thumb_ext && others_curled;

    let index_tip = hand.point(INDEX_TIP);
    RightHandPose {
        cursor: NormPoint::new(1.0 - index_tip.x, index_tip.y),
        pinch_distance: index_tip.distance_to(&thumb_tip),
        is_strict_pointing,
        is_pinch_ready,
        can_control_cursor: is_strict_pointing || is_pinch_ready,
        is_open_palm: index_ext && middle_ext && ring_ext && pinky_ext,
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use proptest::prelude::*;

    fn classify(hands: &[HandObservation]) -> InteractionFrame {
        GestureClassifier::default().classify(hands).expect("hands present")
    }

    #[test]
    fn empty_hand_list_is_null_frame() {
        assert_eq!(GestureClassifier::default().classify(&[]), None);
    }

    #[test]
    fn pointing_with_tucked_thumb_is_strict_not_pinch() {
        let mut hand = right_pointing_at(0.4, 0.3);
        // tip right of the IP joint: thumb folded across the palm
        hand.landmarks[THUMB_TIP] = HandLandmark::new(0.52, 0.5);
        hand.landmarks[THUMB_IP] = HandLandmark::new(0.5, 0.5);
        let frame = classify(&[hand]);
        assert!(frame.is_strict_pointing());
        assert!(!frame.is_pinch_ready());
        assert!(frame.can_control_cursor());
    }

    #[test]
    fn thumb_inside_ip_is_pinch_ready() {
        let frame = classify(&[right_pinching_at(0.4, 0.3, 0.08)]);
        assert!(frame.is_strict_pointing());
        assert!(frame.is_pinch_ready());
        assert!(frame.can_control_cursor());
    }

    #[test]
    fn cursor_is_mirrored_index_tip() {
        let frame = classify(&[right_pointing_at(0.3, 0.25)]);
        let cursor = frame.cursor().unwrap();
        assert!((cursor.x - 0.7).abs() < 1e-6);
        assert!((cursor.y - 0.25).abs() < 1e-6);
    }

    #[test]
    fn right_open_palm_ignores_thumb() {
        let frame = classify(&[open_palm(Handedness::Right)]);
        assert!(frame.is_open_palm());
        assert!(!frame.is_strict_pointing());
        assert!(!frame.can_control_cursor());
    }

    #[test]
    fn left_hand_alone_never_controls_cursor() {
        let mut left = right_pointing_at(0.4, 0.4);
        left.handedness = Some(Handedness::Left);
        let frame = classify(&[left]);
        assert!(!frame.right_hand_detected());
        assert!(frame.left_hand_detected());
        assert!(!frame.can_control_cursor());
        assert_eq!(frame.pinch_distance(), None);
    }

    #[test]
    fn left_open_palm_suppresses_thumb_and_index() {
        let mut hand = left_open_palm_at(0.3, 0.7);
        // thumb also well above its MCP, index margin also satisfied
        hand.landmarks[THUMB_TIP].y = hand.landmarks[THUMB_MCP].y - 0.2;
        let frame = classify(&[hand]);
        assert!(frame.left_open_palm());
        assert!(!frame.left_thumb_up());
        assert!(!frame.left_index_up());
        let palm = frame.left_palm_center().unwrap();
        assert!((palm.x - 0.7).abs() < 1e-6);
        assert!((palm.y - 0.7).abs() < 1e-6);
    }

    #[test]
    fn left_thumb_up_beats_index() {
        let frame = classify(&[left_thumb_up()]);
        assert!(frame.left_thumb_up());
        assert!(!frame.left_index_up());
        assert!(!frame.left_open_palm());
    }

    #[test]
    fn left_index_up_beats_thumb() {
        let frame = classify(&[left_index_up()]);
        assert!(frame.left_index_up());
        assert!(!frame.left_thumb_up());
    }

    #[test]
    fn left_margin_filters_small_lifts() {
        let mut hand = fist(Handedness::Left);
        hand.landmarks[INDEX_TIP].y = hand.landmarks[INDEX_PIP].y - 0.02;
        let frame = classify(&[hand]);
        assert!(!frame.left_index_up());
    }

    #[test]
    fn left_curled_middle_required_for_zoom() {
        let mut hand = left_index_up();
        extend(&mut hand, MIDDLE_TIP, MIDDLE_PIP);
        let frame = classify(&[hand]);
        assert!(!frame.left_index_up());
    }

    #[test]
    fn first_hand_per_side_wins() {
        let first = right_pointing_at(0.2, 0.2);
        let second = right_pointing_at(0.8, 0.8);
        let frame = classify(&[first, second]);
        assert!((frame.cursor().unwrap().x - 0.8).abs() < 1e-6);
    }

    #[test]
    fn unlabelled_hands_give_empty_frame() {
        let mut hand = right_pointing_at(0.5, 0.5);
        hand.handedness = None;
        let frame = classify(&[hand]);
        assert!(!frame.right_hand_detected());
        assert!(!frame.left_hand_detected());
    }

    fn arb_point() -> impl Strategy<Value = HandLandmark> {
        (0.0f32..1.0, 0.0f32..1.0).prop_map(|(x, y)| HandLandmark::new(x, y))
    }

    fn arb_hand() -> impl Strategy<Value = [HandLandmark; HAND_LANDMARK_COUNT]> {
        proptest::collection::vec(arb_point(), HAND_LANDMARK_COUNT).prop_map(|points| {
            let mut out = [HandLandmark::default(); HAND_LANDMARK_COUNT];
            out.copy_from_slice(&points);
            out
        })
    }

    proptest! {
        #[test]
        fn index_only_extension_is_strict_pointing(mut points in arb_hand()) {
            points[INDEX_TIP].y = points[INDEX_PIP].y - 0.01;
            for (tip, pip) in [(MIDDLE_TIP, MIDDLE_PIP), (RING_TIP, RING_PIP), (PINKY_TIP, PINKY_PIP)] {
                points[tip].y = points[pip].y;
            }
            let frame = classify(&[HandObservation::new(points, Handedness::Right)]);
            prop_assert!(frame.is_strict_pointing());
            prop_assert!(frame.can_control_cursor());
        }

        #[test]
        fn pinch_distance_is_symmetric(a in arb_point(), b in arb_point()) {
            prop_assert_eq!(a.distance_to(&b), b.distance_to(&a));
            prop_assert_eq!(a.distance_to(&a), 0.0);
        }

        #[test]
        fn left_open_palm_excludes_zoom(points in arb_hand()) {
            let frame = classify(&[HandObservation::new(points, Handedness::Left)]);
            if frame.left_open_palm() {
                prop_assert!(!frame.left_thumb_up() && !frame.left_index_up());
            }
            prop_assert!(!(frame.left_thumb_up() && frame.left_index_up()));
        }
    }
}
