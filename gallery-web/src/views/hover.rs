//! Hover and pinch-to-select, shared by both gallery views
//!
//! Selection is instant once the pinch closes past the threshold; before
//! that the pinch distance drives a progress ring on the cursor.

use super::surface::{Layer, ScreenPoint, Surface};
use crate::config::HoverConfig;
use crate::gesture::InteractionFrame;

/// A gallery item chosen by pinching over it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub layer: Layer,
    pub item: usize,
}

#[derive(Clone, Copy, Debug)]
pub struct HoverTracker {
    layer: Layer,
    target: Option<usize>,
    config: HoverConfig,
}

impl HoverTracker {
    pub fn new(layer: Layer, config: HoverConfig) -> Self {
        Self {
            layer,
            target: None,
            config,
        }
    }

    pub fn set_config(&mut self, config: HoverConfig) {
        self.config = config;
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    pub fn config(&self) -> &HoverConfig {
        &self.config
    }

    /// Hit-test `at`, track the hovered item and fire a selection on pinch
    pub fn check(
        &mut self,
        frame: &InteractionFrame,
        at: ScreenPoint,
        surface: &mut dyn Surface,
    ) -> Option<Selection> {
        let Some(item) = surface.hit_test(self.layer, at) else {
            self.reset(surface);
            return None;
        };

        if self.target != Some(item) {
            self.target = Some(item);
            surface.highlight(self.layer, Some(item));
        }

        let pinch = frame.pinch_distance().unwrap_or(1.0);
        if pinch < self.config.select_distance {
            self.reset(surface);
            return Some(Selection {
                layer: self.layer,
                item,
            });
        }

        surface.set_cursor_progress(self.config.progress(pinch));
        None
    }

    pub fn reset(&mut self, surface: &mut dyn Surface) {
        self.target = None;
        surface.set_cursor_progress(0.0);
        surface.highlight(self.layer, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::fixtures::*;
    use crate::gesture::GestureClassifier;
    use crate::views::surface::testing::{Call, RecordingSurface};

    fn pinch_frame(distance: f32) -> InteractionFrame {
        GestureClassifier::default()
            .classify(&[right_pinching_at(0.5, 0.5, distance)])
            .unwrap()
    }

    #[test]
    fn highlights_once_per_new_target() {
        let mut surface = RecordingSurface::with_flat_item();
        let mut hover = HoverTracker::new(Layer::Flat, HoverConfig::default());
        let at = ScreenPoint::new(100.0, 100.0);

        hover.check(&pinch_frame(0.2), at, &mut surface);
        hover.check(&pinch_frame(0.2), at, &mut surface);

        assert_eq!(hover.target(), Some(0));
        assert_eq!(
            surface.count(|c| *c == Call::Highlight(Layer::Flat, Some(0))),
            1
        );
    }

    #[test]
    fn closing_pinch_fills_progress() {
        let mut surface = RecordingSurface::with_flat_item();
        let mut hover = HoverTracker::new(Layer::Flat, HoverConfig::default());
        let at = ScreenPoint::new(10.0, 10.0);

        assert_eq!(hover.check(&pinch_frame(0.105), at, &mut surface), None);
        let progress = surface.last_progress().unwrap();
        assert!((progress - 0.5).abs() < 0.01);
    }

    #[test]
    fn pinch_selects_and_clears_hover() {
        let mut surface = RecordingSurface::with_flat_item();
        let mut hover = HoverTracker::new(Layer::Flat, HoverConfig::default());

        let selected = hover.check(&pinch_frame(0.03), ScreenPoint::new(5.0, 5.0), &mut surface);
        assert_eq!(
            selected,
            Some(Selection {
                layer: Layer::Flat,
                item: 0
            })
        );
        assert_eq!(hover.target(), None);
        assert_eq!(surface.last_progress(), Some(0.0));
        assert_eq!(surface.calls.last(), Some(&Call::Highlight(Layer::Flat, None)));
    }

    #[test]
    fn miss_resets() {
        let mut surface = RecordingSurface::new();
        let mut hover = HoverTracker::new(Layer::Sphere, HoverConfig::default());
        assert_eq!(
            hover.check(&pinch_frame(0.01), ScreenPoint::new(1.0, 1.0), &mut surface),
            None
        );
        assert_eq!(surface.last_progress(), Some(0.0));
    }
}
