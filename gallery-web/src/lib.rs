//! Gesture Gallery - hand-gesture driven image gallery
//!
//! Landmarks from the hand model come in through `bridge`, get classified in
//! `gesture`, steer the cursor in `cursor` and drive the gallery state
//! machines in `views`. `app` runs that pipeline once per video frame.

use wasm_bindgen::prelude::*;

// ============================================================================
// CONSOLE LOGGING
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => ($crate::log(&format_args!($($t)*).to_string()))
}

pub mod app;
mod bridge;
pub mod config;
pub mod cursor;
pub mod error;
pub mod gesture;
pub mod status;
pub mod views;

pub use app::{GalleryApp, GalleryEvent, Stage, TickReport};
pub use bridge::*;
pub use config::GalleryConfig;
pub use error::GalleryError;

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}
