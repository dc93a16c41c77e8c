//! Gesture module - hand landmarks to interaction frames
//!
//! Re-exports only. All logic in submodules.

mod classifier;
mod frame;
mod landmarks;

pub use classifier::GestureClassifier;
pub use frame::{InteractionFrame, LeftHandPose, NormPoint, RightHandPose};
pub use landmarks::{
    decode_hands, HandLandmark, HandObservation, Handedness, FLOATS_PER_HAND,
    HAND_LANDMARK_COUNT,
};

#[cfg(test)]
pub(crate) use classifier::fixtures;
