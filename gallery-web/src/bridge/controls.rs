//! Runtime tuning from JS
//!
//! Setters edit the pending config held in the session slot; a running
//! session picks the change up immediately.

use wasm_bindgen::prelude::*;

use super::session::update_config;
use crate::config::GalleryConfig;

/// Cursor smoothing factor, clamped to (0, 1]
#[wasm_bindgen]
pub fn set_cursor_smoothing(factor: f32) {
    update_config(|config| with_cursor_smoothing(config, factor));
}

/// Flat drag sensitivity (scroll px per cursor px) and inertia friction
#[wasm_bindgen]
pub fn set_drag_params(sensitivity: f32, friction: f32) {
    update_config(|config| with_drag_params(config, sensitivity, friction));
}

/// Detail zoom step per tick and zoom range
#[wasm_bindgen]
pub fn set_zoom_params(step: f32, min_zoom: f32, max_zoom: f32) -> Result<(), JsValue> {
    if !(min_zoom > 0.0 && min_zoom <= max_zoom) {
        return Err(JsValue::from_str(&format!(
            "invalid zoom range [{}, {}]",
            min_zoom, max_zoom
        )));
    }
    update_config(|config| with_zoom_params(config, step, min_zoom, max_zoom));
    Ok(())
}

fn with_cursor_smoothing(mut config: GalleryConfig, factor: f32) -> GalleryConfig {
    config.cursor_smoothing = factor.clamp(0.01, 1.0);
    config
}

fn with_drag_params(mut config: GalleryConfig, sensitivity: f32, friction: f32) -> GalleryConfig {
    config.flat.sensitivity = sensitivity.max(0.0);
    // friction >= 1 would coast forever
    config.flat.friction = friction.clamp(0.0, 0.99);
    config
}

fn with_zoom_params(mut config: GalleryConfig, step: f32, min_zoom: f32, max_zoom: f32) -> GalleryConfig {
    config.detail.zoom_step = step.abs();
    config.detail.min_zoom = min_zoom;
    config.detail.max_zoom = max_zoom;
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothing_is_clamped() {
        let config = with_cursor_smoothing(GalleryConfig::default(), 3.0);
        assert_eq!(config.cursor_smoothing, 1.0);
        let config = with_cursor_smoothing(config, 0.0);
        assert_eq!(config.cursor_smoothing, 0.01);
    }

    #[test]
    fn friction_never_reaches_one() {
        let config = with_drag_params(GalleryConfig::default(), 2.0, 1.2);
        assert_eq!(config.flat.sensitivity, 2.0);
        assert_eq!(config.flat.friction, 0.99);
        assert_eq!(config.flat.inertia_stop_speed, 0.1, "untouched fields survive");
    }

    #[test]
    fn zoom_params_replace_range() {
        let config = with_zoom_params(GalleryConfig::default(), -0.05, 0.5, 3.0);
        assert_eq!(config.detail.zoom_step, 0.05);
        assert_eq!((config.detail.min_zoom, config.detail.max_zoom), (0.5, 3.0));
        assert_eq!(config.detail.fade_ms, 500);
    }
}
