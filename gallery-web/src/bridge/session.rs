//! Thread-local gallery session and the per-frame entry points
//!
//! JS owns the camera and the landmark model. Each recognized video frame is
//! handed to `process_hands`; each display refresh calls `render_frame`.

use js_sys::Function;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::dom::{write_status, DomSurface};
use crate::app::{GalleryApp, GalleryEvent};
use crate::config::GalleryConfig;
use crate::error::GalleryError;
use crate::gesture::decode_hands;
use crate::status::StatusLine;
use crate::views::ViewMode;

struct Session {
    app: GalleryApp,
    surface: DomSurface,
}

#[derive(Default)]
struct SessionSlot {
    /// Applied at `init` and re-applied on every setter call
    config: GalleryConfig,
    session: Option<Session>,
}

thread_local! {
    static SESSION: RefCell<SessionSlot> = RefCell::new(SessionSlot::default());
}

fn with_session<T>(f: impl FnOnce(&mut Session) -> T) -> Result<T, GalleryError> {
    SESSION.with(|slot_cell| {
        let mut slot = slot_cell.borrow_mut();
        slot.session.as_mut().map(f).ok_or(GalleryError::NotInitialized)
    })
}

pub(super) fn update_config(edit: impl FnOnce(GalleryConfig) -> GalleryConfig) {
    SESSION.with(|slot_cell| {
        let mut slot = slot_cell.borrow_mut();
        let config = edit(slot.config);
        slot.config = config;
        if let Some(session) = slot.session.as_mut() {
            session.app.reconfigure(config);
            session.surface.set_fade_ms(config.detail.fade_ms);
        }
    });
}

/// Error text in the status line, with or without a running session
fn show_error(message: String) {
    let unhandled = SESSION.with(|slot_cell| {
        // An error raised mid-tick must not re-enter the session
        let Ok(mut slot) = slot_cell.try_borrow_mut() else {
            return Some(message);
        };
        match slot.session.as_mut() {
            Some(session) => {
                session.app.report_error(message, &mut session.surface);
                None
            }
            None => Some(message),
        }
    });
    if let Some(message) = unhandled {
        write_status(&StatusLine::Error(message));
    }
}

/// Per-tick failures are warnings, startup failures are errors
fn log_error(err: &GalleryError) {
    let message = err.to_string().into();
    if err.is_recoverable() {
        web_sys::console::warn_1(&message);
    } else {
        web_sys::console::error_1(&message);
    }
}

/// Decode one frame and run it through the live session
fn run_frame(
    flat: &[f32],
    handedness: &[String],
    timestamp_ms: f64,
) -> Result<Vec<GalleryEvent>, GalleryError> {
    let hands = decode_hands(flat, handedness)?;
    let report = with_session(|session| {
        session
            .app
            .tick(&hands, timestamp_ms, &mut session.surface)
    })?;
    Ok(report.events)
}

fn log_event(event: &GalleryEvent) {
    match event {
        GalleryEvent::ModeSwitched(mode) => console_log!("Switched to {} mode", mode.as_str()),
        GalleryEvent::DetailEntered { layer, item } => {
            console_log!("Opened item {} from {:?} gallery", item, layer)
        }
        GalleryEvent::DetailExited => console_log!("Closed detail view"),
        GalleryEvent::SelectionIgnored { item } => web_sys::console::warn_1(
            &format!("Selected item {} has no image in the manifest", item).into(),
        ),
    }
}

// ============================================================================
// WASM API
// ============================================================================

/// Bind to the page, build the galleries and mount the flat view.
///
/// `images` is the manifest; when empty the page's placeholder items are used.
#[wasm_bindgen]
pub fn init(images: Vec<String>) -> Result<(), JsValue> {
    let config = SESSION.with(|slot_cell| slot_cell.borrow().config);

    let (mut surface, images) = match DomSurface::new(images, config.detail.fade_ms) {
        Ok(bound) => bound,
        Err(err) => {
            web_sys::console::error_1(&err.to_string().into());
            write_status(&StatusLine::Error(format!("Startup Failed: {}", err)));
            return Err(err.into());
        }
    };

    let mut app = GalleryApp::new(config, images, surface.viewport());
    app.start(&mut surface);
    surface.hide_loader();
    console_log!("✅ Gallery ready with {} images", app.image_count());

    SESSION.with(|slot_cell| {
        slot_cell.borrow_mut().session = Some(Session { app, surface });
    });
    Ok(())
}

/// One recognized video frame.
///
/// `flat` holds 63 floats (21 landmarks x `x,y,z`) per hand, in the same order
/// as `handedness`. A malformed frame, or one arriving before `init`, is
/// logged and skipped.
#[wasm_bindgen]
pub fn process_hands(flat: &[f32], handedness: Vec<String>, timestamp_ms: f64) -> Result<(), JsValue> {
    match run_frame(flat, &handedness, timestamp_ms) {
        Ok(events) => events.iter().for_each(log_event),
        Err(err) if err.is_recoverable() => log_error(&err),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

/// Run this display refresh's scheduled work (sphere rotation easing)
#[wasm_bindgen]
pub fn render_frame() {
    if let Err(GalleryError::NotInitialized) =
        with_session(|session| session.app.animate(&mut session.surface))
    {
        // nothing is scheduled before init
    }
}

/// Re-read the window size and recompute view layouts
#[wasm_bindgen]
pub fn resize() -> Result<(), JsValue> {
    with_session(|session| {
        let viewport = session.surface.viewport();
        session.app.resize(viewport, &mut session.surface);
    })?;
    Ok(())
}

/// Switch to `"flat"` or `"sphere"`; the active mode is a no-op
#[wasm_bindgen]
pub fn switch_mode(mode: &str) -> Result<(), JsValue> {
    let mode = ViewMode::parse(mode)
        .ok_or_else(|| JsValue::from_str(&format!("unknown gallery mode '{}'", mode)))?;
    let event = with_session(|session| session.app.switch_mode(mode, &mut session.surface))?;
    if let Some(event) = event {
        log_event(&event);
    }
    Ok(())
}

/// Flip between flat and sphere; returns the new mode name
#[wasm_bindgen]
pub fn toggle_mode() -> Result<String, JsValue> {
    let (event, mode) = with_session(|session| {
        let event = session.app.toggle_mode(&mut session.surface);
        (event, session.app.mode())
    })?;
    if let Some(event) = event {
        log_event(&event);
    }
    Ok(mode.as_str().to_string())
}

#[wasm_bindgen]
pub fn current_mode() -> Option<String> {
    with_session(|session| session.app.mode().as_str().to_string()).ok()
}

/// The landmark model threw on one frame; the loop carries on
#[wasm_bindgen]
pub fn report_recognition_failure(message: String) {
    log_error(&GalleryError::RecognitionFailure(message));
}

/// Camera or model setup failed; shown in the status line, not retried
#[wasm_bindgen]
pub fn report_startup_failure(message: String) {
    log_error(&GalleryError::StartupFailure(message.clone()));
    show_error(format!("Startup Failed: {}", message));
}

/// Route otherwise unhandled script errors to the status line
#[wasm_bindgen]
pub fn install_error_handler() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or(GalleryError::MissingElement("window"))?;
    let handler = Closure::<dyn FnMut(JsValue) -> bool>::new(|message: JsValue| {
        let text = message
            .as_string()
            .unwrap_or_else(|| format!("{:?}", message));
        show_error(format!("Script Error: {}", text));
        false
    });
    window.set_onerror(Some(handler.as_ref().unchecked_ref::<Function>()));
    handler.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_before_init_is_skipped_not_thrown() {
        let err = run_frame(&[], &[], 16.0).unwrap_err();
        assert!(matches!(err, GalleryError::NotInitialized));
        assert!(err.is_recoverable());
    }

    #[test]
    fn malformed_frame_is_skipped_not_thrown() {
        let err = run_frame(&[0.5; 62], &["Right".to_string()], 16.0).unwrap_err();
        assert!(matches!(err, GalleryError::InvalidLandmarkData { len: 62, hands: 1 }));
        assert!(err.is_recoverable());
    }
}
