//! View router - one active gallery view at a time
//!
//! Flat and sphere galleries share the [`GalleryView`] lifecycle. Switching
//! unmounts the outgoing view (cancelling its per-frame work) before the
//! incoming one mounts.

use super::flat::FlatView;
use super::hover::Selection;
use super::scheduler::FrameScheduler;
use super::sphere::SphereView;
use super::surface::{ScreenPoint, Surface, Viewport};
use crate::config::GalleryConfig;
use crate::gesture::InteractionFrame;
use crate::status::StatusLine;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Flat,
    Sphere,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Flat => ViewMode::Sphere,
            ViewMode::Sphere => ViewMode::Flat,
        }
    }

    /// Accepts "flat" / "sphere" in any case
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "flat" => Some(ViewMode::Flat),
            "sphere" => Some(ViewMode::Sphere),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Flat => "flat",
            ViewMode::Sphere => "sphere",
        }
    }

    pub fn status(self) -> StatusLine {
        match self {
            ViewMode::Flat => StatusLine::FlatGallery,
            ViewMode::Sphere => StatusLine::SphereGallery,
        }
    }
}

/// Cursor-controller output handed to the active view
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureInput {
    pub controlling: bool,
    /// Smoothed cursor in screen pixels, present while controlling
    pub screen: Option<ScreenPoint>,
    pub now_ms: f64,
}

/// Collaborators a view may touch during one call
pub struct ViewContext<'a> {
    pub surface: &'a mut dyn Surface,
    pub scheduler: &'a mut FrameScheduler,
    pub viewport: Viewport,
}

pub trait GalleryView {
    fn mode(&self) -> ViewMode;

    /// Show the view and reset its interaction state
    fn mount(&mut self, ctx: &mut ViewContext<'_>);

    /// Hide the view, cancel scheduled work and drop drag state
    fn unmount(&mut self, ctx: &mut ViewContext<'_>);

    /// Recompute size-dependent state after a resize
    fn update_layout(&mut self, ctx: &mut ViewContext<'_>);

    /// Consume one non-null frame; returns a selection when an item is picked
    fn on_gesture(
        &mut self,
        frame: &InteractionFrame,
        input: &GestureInput,
        ctx: &mut ViewContext<'_>,
    ) -> Option<Selection>;
}

pub struct ViewRouter {
    flat: FlatView,
    sphere: SphereView,
    mode: ViewMode,
    mounted: bool,
}

impl ViewRouter {
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            flat: FlatView::new(config.flat, config.hover),
            sphere: SphereView::new(config.sphere, config.hover),
            mode: ViewMode::Flat,
            mounted: false,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn flat(&self) -> &FlatView {
        &self.flat
    }

    pub fn sphere(&self) -> &SphereView {
        &self.sphere
    }

    pub fn sphere_mut(&mut self) -> &mut SphereView {
        &mut self.sphere
    }

    pub fn reconfigure(&mut self, config: &GalleryConfig) {
        self.flat.set_config(config.flat, config.hover);
        self.sphere.set_config(config.sphere, config.hover);
    }

    fn active_mut(&mut self) -> &mut dyn GalleryView {
        match self.mode {
            ViewMode::Flat => &mut self.flat,
            ViewMode::Sphere => &mut self.sphere,
        }
    }

    /// Mount the initial view; later calls are no-ops
    pub fn start(&mut self, ctx: &mut ViewContext<'_>) {
        if !self.mounted {
            self.active_mut().mount(ctx);
            self.mounted = true;
        }
    }

    /// Returns false when `mode` is already active
    pub fn switch_mode(&mut self, mode: ViewMode, ctx: &mut ViewContext<'_>) -> bool {
        if mode == self.mode {
            return false;
        }
        if self.mounted {
            self.active_mut().unmount(ctx);
        }
        self.mode = mode;
        self.active_mut().mount(ctx);
        self.mounted = true;
        true
    }

    pub fn on_gesture(
        &mut self,
        frame: &InteractionFrame,
        input: &GestureInput,
        ctx: &mut ViewContext<'_>,
    ) -> Option<Selection> {
        if !self.mounted {
            return None;
        }
        self.active_mut().on_gesture(frame, input, ctx)
    }

    pub fn update_layout(&mut self, ctx: &mut ViewContext<'_>) {
        if self.mounted {
            self.active_mut().update_layout(ctx);
        }
    }
}
