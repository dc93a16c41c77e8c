//! Bridge module - JS <-> Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod controls;
mod dom;
mod session;

pub use controls::{set_cursor_smoothing, set_drag_params, set_zoom_params};
pub use dom::DomSurface;
pub use session::{
    current_mode, init, install_error_handler, process_hands, render_frame, report_recognition_failure,
    report_startup_failure, resize, switch_mode, toggle_mode,
};
