//! Hand landmark layout and decoding of the landmark source's flat buffers
//!
//! The landmark model reports 21 normalized points per hand (origin top-left,
//! y grows downward) plus a handedness label. JS flattens them into one
//! `Float32Array` of `hands x 21 x (x, y, z)`.

use crate::error::GalleryError;

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Points per hand
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Floats per hand in the flat buffer
pub const FLOATS_PER_HAND: usize = HAND_LANDMARK_COUNT * 3;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandLandmark {
    pub x: f32, // 0-1 normalized
    pub y: f32, // 0-1 normalized, down is positive
    pub z: f32, // relative depth, unused by classification
}

impl HandLandmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Planar distance to another landmark in normalized units
    pub fn distance_to(&self, other: &HandLandmark) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Which physical hand the model believes a landmark set belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Parse the model's category name (`"Left"` / `"Right"`)
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Left" | "left" => Some(Handedness::Left),
            "Right" | "right" => Some(Handedness::Right),
            _ => None,
        }
    }
}

/// One detected hand for one video frame
#[derive(Clone, Debug, PartialEq)]
pub struct HandObservation {
    pub landmarks: [HandLandmark; HAND_LANDMARK_COUNT],
    /// `None` when the model's label was missing or unrecognised
    pub handedness: Option<Handedness>,
}

impl HandObservation {
    pub fn new(landmarks: [HandLandmark; HAND_LANDMARK_COUNT], handedness: Handedness) -> Self {
        Self {
            landmarks,
            handedness: Some(handedness),
        }
    }

    pub fn point(&self, index: usize) -> HandLandmark {
        self.landmarks[index]
    }
}

/// Decode the flat landmark buffer for one frame.
///
/// `labels` carries one handedness label per hand; its length is the hand
/// count.
pub fn decode_hands<S: AsRef<str>>(
    flat_data: &[f32],
    labels: &[S],
) -> Result<Vec<HandObservation>, GalleryError> {
    let hands = labels.len();
    if flat_data.len() != hands * FLOATS_PER_HAND {
        return Err(GalleryError::InvalidLandmarkData {
            len: flat_data.len(),
            hands,
        });
    }

    let observations = flat_data
        .chunks_exact(FLOATS_PER_HAND)
        .zip(labels)
        .map(|(chunk, label)| {
            let mut landmarks = [HandLandmark::default(); HAND_LANDMARK_COUNT];
            for (point, xyz) in landmarks.iter_mut().zip(chunk.chunks_exact(3)) {
                *point = HandLandmark {
                    x: xyz[0],
                    y: xyz[1],
                    z: xyz[2],
                };
            }
            HandObservation {
                landmarks,
                handedness: Handedness::from_label(label.as_ref()),
            }
        })
        .collect();

    Ok(observations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_hand(seed: f32) -> Vec<f32> {
        (0..FLOATS_PER_HAND).map(|i| seed + i as f32 * 0.001).collect()
    }

    #[test]
    fn decodes_two_hands_in_order() {
        let mut data = flat_hand(0.1);
        data.extend(flat_hand(0.5));
        let hands = decode_hands(&data, &["Right", "Left"]).unwrap();

        assert_eq!(hands.len(), 2);
        assert_eq!(hands[0].handedness, Some(Handedness::Right));
        assert_eq!(hands[1].handedness, Some(Handedness::Left));
        assert!((hands[0].point(WRIST).x - 0.1).abs() < 1e-6);
        assert!((hands[1].point(INDEX_TIP).y - (0.5 + 25.0 * 0.001)).abs() < 1e-6);
    }

    #[test]
    fn rejects_mismatched_length() {
        let data = flat_hand(0.1);
        let err = decode_hands(&data[..62], &["Right"]).unwrap_err();
        assert!(matches!(err, GalleryError::InvalidLandmarkData { len: 62, hands: 1 }));
    }

    #[test]
    fn unknown_label_keeps_hand_without_handedness() {
        let hands = decode_hands(&flat_hand(0.2), &["Unknown"]).unwrap();
        assert_eq!(hands[0].handedness, None);
    }

    #[test]
    fn empty_frame_decodes_to_no_hands() {
        let labels: [&str; 0] = [];
        assert!(decode_hands(&[], &labels).unwrap().is_empty());
    }

    #[test]
    fn distance_is_planar() {
        let a = HandLandmark { x: 0.0, y: 0.0, z: 5.0 };
        let b = HandLandmark::new(0.3, 0.4);
        assert!((a.distance_to(&b) - 0.5).abs() < 1e-6);
    }
}
