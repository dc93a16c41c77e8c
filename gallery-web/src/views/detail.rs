//! Detail overlay - left-hand zoom and pan, right open palm to close
//!
//! Not a gallery view: it sits on top of whichever gallery is mounted and
//! suspends gallery routing while open. Zoom and pan start at identity on
//! every entry since each entry builds a fresh [`DetailView`].

use super::surface::{DetailTransform, ScreenPoint, Viewport};
use crate::config::DetailConfig;
use crate::gesture::InteractionFrame;
use crate::status::StatusLine;

/// Left-hand gesture acted on this tick, highest priority first
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailGesture {
    ZoomIn,
    ZoomOut,
    Pan,
    Idle,
}

impl DetailGesture {
    pub fn status(self) -> StatusLine {
        match self {
            DetailGesture::ZoomIn => StatusLine::ZoomingIn,
            DetailGesture::ZoomOut => StatusLine::ZoomingOut,
            DetailGesture::Pan => StatusLine::Panning,
            DetailGesture::Idle => StatusLine::DetailIdle,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetailOutcome {
    pub gesture: DetailGesture,
    /// Right open palm seen; the overlay should close
    pub exit: bool,
}

#[derive(Clone, Debug)]
pub struct DetailView {
    source: String,
    config: DetailConfig,
    zoom: f32,
    pan: ScreenPoint,
    /// Last palm position while a pan is armed
    last_palm: Option<ScreenPoint>,
}

impl DetailView {
    pub fn new(source: impl Into<String>, config: DetailConfig) -> Self {
        Self {
            source: source.into(),
            config,
            zoom: 1.0,
            pan: ScreenPoint::default(),
            last_palm: None,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> ScreenPoint {
        self.pan
    }

    pub fn is_panning(&self) -> bool {
        self.last_palm.is_some()
    }

    pub fn set_config(&mut self, config: DetailConfig) {
        self.config = config;
        self.zoom = self.zoom.clamp(config.min_zoom, config.max_zoom);
    }

    pub fn transform(&self) -> DetailTransform {
        DetailTransform {
            pan: self.pan,
            zoom: self.zoom,
        }
    }

    /// Drop the pan anchor so the next palm frame re-anchors without a jump
    pub fn release_tracking(&mut self) {
        self.last_palm = None;
    }

    pub fn update(&mut self, frame: &InteractionFrame, viewport: Viewport) -> DetailOutcome {
        let gesture = if frame.left_thumb_up() {
            self.zoom = (self.zoom + self.config.zoom_step).min(self.config.max_zoom);
            self.last_palm = None;
            DetailGesture::ZoomIn
        } else if frame.left_index_up() {
            self.zoom = (self.zoom - self.config.zoom_step).max(self.config.min_zoom);
            self.last_palm = None;
            DetailGesture::ZoomOut
        } else if let Some(palm) = frame.left_palm_center().filter(|_| frame.left_open_palm()) {
            let at = viewport.to_screen(palm);
            if let Some(last) = self.last_palm {
                self.pan.x += at.x - last.x;
                self.pan.y += at.y - last.y;
            }
            self.last_palm = Some(at);
            DetailGesture::Pan
        } else {
            self.last_palm = None;
            DetailGesture::Idle
        };

        DetailOutcome {
            gesture,
            exit: frame.right_hand_detected() && frame.is_open_palm(),
        }
    }
}
