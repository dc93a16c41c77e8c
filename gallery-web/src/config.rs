//! Tunable constants for classification, cursor and view state machines
//!
//! Defaults reproduce the gallery's shipped feel. The bridge exposes a few
//! setters; everything else is fixed at session start.

/// Hover / pinch-to-select thresholds shared by the flat and sphere views
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverConfig {
    /// Pinch distance (normalized) below which the hovered item is selected
    pub select_distance: f32,
    /// Pinch distance at which the progress ring starts filling
    pub progress_start: f32,
    /// Cursor scale shown while the view is being dragged
    pub grab_scale: f32,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            select_distance: 0.06,
            progress_start: 0.15,
            grab_scale: 0.8,
        }
    }
}

impl HoverConfig {
    /// Progress ring fill for a pinch distance, 0 (open) to 1 (about to select)
    pub fn progress(&self, pinch_distance: f32) -> f32 {
        let span = self.progress_start - self.select_distance;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.progress_start - pinch_distance) / span).clamp(0.0, 1.0)
    }
}

/// Flat gallery drag and inertia
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatConfig {
    /// Scroll pixels per cursor pixel
    pub sensitivity: f32,
    /// Minimum time between velocity samples (ms)
    pub velocity_sample_ms: f64,
    /// Weight of the previous velocity in the blend
    pub velocity_blend: f32,
    /// Release speed (px/tick) above which inertia starts
    pub inertia_start_speed: f32,
    /// Speed below which inertia snaps to rest
    pub inertia_stop_speed: f32,
    /// Velocity multiplier applied every inertia tick
    pub friction: f32,
    /// Hover is only evaluated while the drag has moved at most this far
    pub hover_max_shift: f32,
    /// ...and the scroll velocity is at most this
    pub hover_max_speed: f32,
}

impl Default for FlatConfig {
    fn default() -> Self {
        Self {
            sensitivity: 1.5,
            velocity_sample_ms: 16.0,
            velocity_blend: 0.5,
            inertia_start_speed: 0.5,
            inertia_stop_speed: 0.1,
            friction: 0.95,
            hover_max_shift: 20.0,
            hover_max_speed: 2.0,
        }
    }
}

/// Sphere gallery layout and rotation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereConfig {
    /// Sphere radius in CSS pixels
    pub radius: f32,
    /// Radians of rotation per cursor pixel
    pub rotation_speed: f32,
    /// Fraction of the remaining rotation applied per render tick
    pub damping: f32,
    /// Hover is only evaluated while |dx| and |dy| stay below this
    pub hover_max_shift: f32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: 800.0,
            rotation_speed: 0.005,
            damping: 0.1,
            hover_max_shift: 30.0,
        }
    }
}

/// Detail overlay zoom and pan
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetailConfig {
    pub zoom_step: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Overlay fade-out before removal (ms)
    pub fade_ms: i32,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            zoom_step: 0.03,
            min_zoom: 0.3,
            max_zoom: 5.0,
            fade_ms: 500,
        }
    }
}

/// Full session configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GalleryConfig {
    /// Exponential smoothing factor applied to the cursor each frame
    pub cursor_smoothing: f32,
    /// Left-hand thumb/index must rise this far above their joint to count
    pub left_extension_margin: f32,
    pub hover: HoverConfig,
    pub flat: FlatConfig,
    pub sphere: SphereConfig,
    pub detail: DetailConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            cursor_smoothing: 0.2,
            left_extension_margin: 0.03,
            hover: HoverConfig::default(),
            flat: FlatConfig::default(),
            sphere: SphereConfig::default(),
            detail: DetailConfig::default(),
        }
    }
}
