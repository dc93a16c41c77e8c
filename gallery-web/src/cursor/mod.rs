//! Cursor module - smoothed, arbitrated pointer driven by the right hand
//!
//! Re-exports only. All logic in submodules.

mod controller;
mod smoothing;

pub use controller::{CursorController, CursorUpdate};
pub use smoothing::{ExpSmoother, ExpSmoother2D};
