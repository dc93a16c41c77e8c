//! Render collaborator interface
//!
//! State machines never touch the DOM. They drive a [`Surface`], which the
//! bridge implements on top of `web_sys` and tests implement with a recorder.

use nalgebra::Matrix4;

use crate::gesture::NormPoint;
use crate::status::StatusLine;

/// A point in CSS pixels, origin top-left
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Current window size in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn to_screen(&self, point: NormPoint) -> ScreenPoint {
        ScreenPoint::new(point.x * self.width, point.y * self.height)
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Which gallery's items a hit-test or highlight refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Flat,
    Sphere,
}

/// Cursor indicator presentation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorVisibility {
    /// Right hand in control
    Active,
    /// Hand visible but not pointing - cursor dimmed, not hidden
    Dimmed,
    /// No hands this tick
    Hidden,
}

/// Pan and zoom applied to the detail image.
///
/// Translation is applied before scale: pan is in screen pixels and the
/// image scales about its own center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetailTransform {
    pub pan: ScreenPoint,
    pub zoom: f32,
}

impl DetailTransform {
    pub const IDENTITY: DetailTransform = DetailTransform {
        pan: ScreenPoint { x: 0.0, y: 0.0 },
        zoom: 1.0,
    };

    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.pan.x, self.pan.y, self.zoom
        )
    }
}

/// Everything the core asks of the page
pub trait Surface {
    // -- cursor --
    fn place_cursor(&mut self, at: ScreenPoint);
    fn set_cursor_visibility(&mut self, visibility: CursorVisibility);
    fn set_cursor_scale(&mut self, scale: f32);
    /// Pinch progress ring, 0 clears it
    fn set_cursor_progress(&mut self, progress: f32);

    // -- gallery items --
    /// Topmost item of `layer` under `at`, ignoring the cursor itself
    fn hit_test(&mut self, layer: Layer, at: ScreenPoint) -> Option<usize>;
    /// Highlight one item of `layer` and clear all others (`None` clears all)
    fn highlight(&mut self, layer: Layer, item: Option<usize>);
    fn set_layer_visible(&mut self, layer: Layer, visible: bool);

    // -- flat track --
    /// Scrollable width of the flat track
    fn track_width(&self) -> f32;
    fn set_track_offset(&mut self, scroll: f32);

    // -- sphere --
    fn sphere_item_count(&self) -> usize;
    fn place_sphere_item(&mut self, index: usize, model: &Matrix4<f32>);
    fn set_sphere_viewport(&mut self, viewport: Viewport);

    // -- detail overlay --
    fn open_detail(&mut self, source: &str);
    fn set_detail_transform(&mut self, transform: &DetailTransform);
    /// Fade out and remove the overlay
    fn close_detail(&mut self);

    fn set_status(&mut self, status: &StatusLine);
}
