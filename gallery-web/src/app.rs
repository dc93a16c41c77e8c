//! Per-tick orchestration
//!
//! One [`GalleryApp::tick`] per recognized video frame, always in the same
//! order: classify, smooth the cursor, route to the active gallery view (only
//! while no detail overlay is open), then update the detail overlay.

use crate::config::GalleryConfig;
use crate::cursor::{CursorController, CursorUpdate};
use crate::gesture::{GestureClassifier, HandObservation, InteractionFrame};
use crate::status::StatusLine;
use crate::views::{
    CursorVisibility, DetailTransform, DetailView, FrameScheduler, FrameTask, GestureInput, Layer,
    Selection, Surface, ViewContext, ViewMode, ViewRouter, Viewport,
};

/// Whether gestures drive the gallery or the detail overlay
#[derive(Clone, Debug)]
pub enum Stage {
    Gallery,
    Detail(DetailView),
}

/// Transitions worth reporting to the host page
#[derive(Clone, Debug, PartialEq)]
pub enum GalleryEvent {
    ModeSwitched(ViewMode),
    DetailEntered { layer: Layer, item: usize },
    DetailExited,
    /// A pinch picked an item with no manifest image behind it
    SelectionIgnored { item: usize },
}

#[derive(Clone, Debug, Default)]
pub struct TickReport {
    /// `None` when no hands were seen
    pub frame: Option<InteractionFrame>,
    pub cursor: Option<CursorUpdate>,
    pub events: Vec<GalleryEvent>,
}

pub struct GalleryApp {
    config: GalleryConfig,
    classifier: GestureClassifier,
    cursor: CursorController,
    router: ViewRouter,
    scheduler: FrameScheduler,
    stage: Stage,
    viewport: Viewport,
    images: Vec<String>,
    status: Option<StatusLine>,
}

impl GalleryApp {
    pub fn new(config: GalleryConfig, images: Vec<String>, viewport: Viewport) -> Self {
        Self {
            classifier: GestureClassifier::new(config.left_extension_margin),
            cursor: CursorController::new(config.cursor_smoothing),
            router: ViewRouter::new(&config),
            scheduler: FrameScheduler::new(),
            stage: Stage::Gallery,
            viewport,
            images,
            status: None,
            config,
        }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn mode(&self) -> ViewMode {
        self.router.mode()
    }

    pub fn router(&self) -> &ViewRouter {
        &self.router
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn detail(&self) -> Option<&DetailView> {
        match &self.stage {
            Stage::Detail(view) => Some(view),
            Stage::Gallery => None,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Mount the initial gallery and show the ready status
    pub fn start(&mut self, surface: &mut dyn Surface) {
        self.router.start(&mut ViewContext {
            surface: &mut *surface,
            scheduler: &mut self.scheduler,
            viewport: self.viewport,
        });
        self.set_status(StatusLine::Ready, surface);
    }

    /// Swap in new tunables; a detail overlay keeps its zoom clamped
    pub fn reconfigure(&mut self, config: GalleryConfig) {
        self.classifier
            .set_left_extension_margin(config.left_extension_margin);
        self.cursor.set_smoothing(config.cursor_smoothing);
        self.router.reconfigure(&config);
        if let Stage::Detail(view) = &mut self.stage {
            view.set_config(config.detail);
        }
        self.config = config;
    }

    pub fn tick(
        &mut self,
        hands: &[HandObservation],
        now_ms: f64,
        surface: &mut dyn Surface,
    ) -> TickReport {
        let mut report = TickReport::default();

        let Some(frame) = self.classifier.classify(hands) else {
            surface.set_cursor_visibility(CursorVisibility::Hidden);
            if let Stage::Detail(view) = &mut self.stage {
                view.release_tracking();
            }
            return report;
        };
        report.frame = Some(frame);

        let cursor = self.cursor.update(&frame, self.viewport);
        report.cursor = Some(cursor);
        match cursor.screen {
            Some(at) => {
                surface.set_cursor_visibility(CursorVisibility::Active);
                surface.place_cursor(at);
            }
            None => surface.set_cursor_visibility(CursorVisibility::Dimmed),
        }

        if matches!(self.stage, Stage::Gallery) {
            let input = GestureInput {
                controlling: cursor.controlling,
                screen: cursor.screen,
                now_ms,
            };
            let selection = self.router.on_gesture(
                &frame,
                &input,
                &mut ViewContext {
                    surface: &mut *surface,
                    scheduler: &mut self.scheduler,
                    viewport: self.viewport,
                },
            );
            if let Some(selection) = selection {
                report.events.push(self.enter_detail(selection, surface));
            }
        }

        if !cursor.controlling {
            surface.set_cursor_progress(0.0);
        }

        let mut exit = false;
        let status = match &mut self.stage {
            Stage::Detail(view) => {
                let outcome = view.update(&frame, self.viewport);
                surface.set_detail_transform(&view.transform());
                exit = outcome.exit;
                outcome.gesture.status()
            }
            Stage::Gallery => self.router.mode().status(),
        };

        if exit {
            self.exit_detail(surface);
            report.events.push(GalleryEvent::DetailExited);
            self.set_status(self.router.mode().status(), surface);
        } else {
            self.set_status(status, surface);
        }

        report
    }

    fn enter_detail(&mut self, selection: Selection, surface: &mut dyn Surface) -> GalleryEvent {
        let Some(source) = self.images.get(selection.item) else {
            return GalleryEvent::SelectionIgnored {
                item: selection.item,
            };
        };

        let view = DetailView::new(source.as_str(), self.config.detail);
        surface.set_cursor_progress(0.0);
        surface.open_detail(view.source());
        surface.set_detail_transform(&DetailTransform::IDENTITY);
        self.stage = Stage::Detail(view);

        GalleryEvent::DetailEntered {
            layer: selection.layer,
            item: selection.item,
        }
    }

    fn exit_detail(&mut self, surface: &mut dyn Surface) {
        self.stage = Stage::Gallery;
        surface.close_detail();
    }

    /// Run this display refresh's scheduled tasks
    pub fn animate(&mut self, surface: &mut dyn Surface) {
        for task in self.scheduler.due() {
            match task {
                FrameTask::SphereSpin => self.router.sphere_mut().animate(surface),
            }
        }
    }

    pub fn resize(&mut self, viewport: Viewport, surface: &mut dyn Surface) {
        self.viewport = viewport;
        self.router.update_layout(&mut ViewContext {
            surface,
            scheduler: &mut self.scheduler,
            viewport,
        });
    }

    /// Returns the event when the mode actually changed
    pub fn switch_mode(&mut self, mode: ViewMode, surface: &mut dyn Surface) -> Option<GalleryEvent> {
        let switched = self.router.switch_mode(
            mode,
            &mut ViewContext {
                surface: &mut *surface,
                scheduler: &mut self.scheduler,
                viewport: self.viewport,
            },
        );
        if !switched {
            return None;
        }
        if matches!(self.stage, Stage::Gallery) {
            self.set_status(mode.status(), surface);
        }
        Some(GalleryEvent::ModeSwitched(mode))
    }

    pub fn toggle_mode(&mut self, surface: &mut dyn Surface) -> Option<GalleryEvent> {
        self.switch_mode(self.router.mode().toggled(), surface)
    }

    /// Show an error in the status line; the loop keeps running
    pub fn report_error(&mut self, message: impl Into<String>, surface: &mut dyn Surface) {
        self.set_status(StatusLine::Error(message.into()), surface);
    }

    fn set_status(&mut self, status: StatusLine, surface: &mut dyn Surface) {
        if self.status.as_ref() != Some(&status) {
            surface.set_status(&status);
            self.status = Some(status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::fixtures::*;
    use crate::gesture::Handedness;
    use crate::views::testing::{Call, RecordingSurface};

    fn app_with(images: &[&str], surface: &mut RecordingSurface) -> GalleryApp {
        let mut app = GalleryApp::new(
            GalleryConfig::default(),
            images.iter().map(|s| s.to_string()).collect(),
            Viewport::new(1000.0, 800.0),
        );
        app.start(surface);
        app
    }

    fn entered(report: &TickReport) -> usize {
        report
            .events
            .iter()
            .filter(|e| matches!(e, GalleryEvent::DetailEntered { .. }))
            .count()
    }

    #[test]
    fn start_mounts_flat_and_reports_ready() {
        let mut surface = RecordingSurface::with_flat_item();
        let app = app_with(&["a.jpg"], &mut surface);
        assert_eq!(app.mode(), ViewMode::Flat);
        assert_eq!(app.status(), Some(&StatusLine::Ready));
        assert!(surface.calls.contains(&Call::LayerVisible(Layer::Flat, true)));
    }

    #[test]
    fn no_hands_hides_cursor() {
        let mut surface = RecordingSurface::with_flat_item();
        let mut app = app_with(&["a.jpg"], &mut surface);
        let report = app.tick(&[], 16.0, &mut surface);
        assert!(report.frame.is_none());
        assert_eq!(
            surface.calls.last(),
            Some(&Call::CursorVisibility(CursorVisibility::Hidden))
        );
    }

    #[test]
    fn uncontrolled_hand_dims_cursor_and_clears_progress() {
        let mut surface = RecordingSurface::with_flat_item();
        let mut app = app_with(&["a.jpg"], &mut surface);
        app.tick(&[fist(Handedness::Right)], 16.0, &mut surface);
        assert!(surface
            .calls
            .contains(&Call::CursorVisibility(CursorVisibility::Dimmed)));
        assert_eq!(surface.last_progress(), Some(0.0));
        assert_eq!(surface.count(|c| matches!(c, Call::PlaceCursor(_))), 0);
    }

    #[test]
    fn pinch_over_item_enters_detail_exactly_once() {
        let mut surface = RecordingSurface::with_flat_item();
        let mut app = app_with(&["a.jpg", "b.jpg"], &mut surface);
        let pinch = right_pinching_at(0.5, 0.5, 0.03);

        let first = app.tick(&[pinch.clone()], 16.0, &mut surface);
        assert_eq!(entered(&first), 1);
        assert_eq!(app.detail().map(DetailView::source), Some("a.jpg"));

        for i in 0..5 {
            let report = app.tick(&[pinch.clone()], 32.0 + 16.0 * i as f64, &mut surface);
            assert_eq!(entered(&report), 0);
        }
        assert_eq!(surface.count(|c| matches!(c, Call::OpenDetail(_))), 1);
        assert_eq!(app.status(), Some(&StatusLine::DetailIdle));
    }

    #[test]
    fn right_open_palm_closes_detail() {
        let mut surface = RecordingSurface::with_flat_item();
        let mut app = app_with(&["a.jpg"], &mut surface);
        app.tick(&[right_pinching_at(0.5, 0.5, 0.03)], 16.0, &mut surface);
        app.tick(&[left_thumb_up()], 32.0, &mut surface);
        assert!(app.detail().unwrap().zoom() > 1.0);

        let report = app.tick(&[open_palm(Handedness::Right)], 48.0, &mut surface);
        assert!(report.events.contains(&GalleryEvent::DetailExited));
        assert!(app.detail().is_none());
        assert_eq!(surface.count(|c| *c == Call::CloseDetail), 1);
        assert_eq!(app.status(), Some(&StatusLine::FlatGallery));
    }

    #[test]
    fn detail_entry_starts_at_identity() {
        let mut surface = RecordingSurface::with_flat_item();
        let mut app = app_with(&["a.jpg"], &mut surface);
        app.tick(&[right_pinching_at(0.5, 0.5, 0.03)], 16.0, &mut surface);
        app.tick(&[left_thumb_up()], 32.0, &mut surface);
        app.tick(&[open_palm(Handedness::Right)], 48.0, &mut surface);

        app.tick(&[right_pinching_at(0.5, 0.5, 0.03)], 64.0, &mut surface);
        let view = app.detail().unwrap();
        assert_eq!(view.transform().pan, DetailTransform::IDENTITY.pan);
        // the entry tick itself carries no left-hand gesture
        assert_eq!(view.zoom(), 1.0);
    }

    #[test]
    fn selection_without_image_is_ignored() {
        let mut surface = RecordingSurface::with_flat_item();
        let mut app = app_with(&[], &mut surface);
        let report = app.tick(&[right_pinching_at(0.5, 0.5, 0.03)], 16.0, &mut surface);
        assert_eq!(report.events, vec![GalleryEvent::SelectionIgnored { item: 0 }]);
        assert!(app.detail().is_none());
    }

    #[test]
    fn null_frame_releases_pan_anchor() {
        let mut surface = RecordingSurface::with_flat_item();
        let mut app = app_with(&["a.jpg"], &mut surface);
        app.tick(&[right_pinching_at(0.5, 0.5, 0.03)], 16.0, &mut surface);
        app.tick(&[left_open_palm_at(0.5, 0.5)], 32.0, &mut surface);
        assert!(app.detail().unwrap().is_panning());

        app.tick(&[], 48.0, &mut surface);
        assert!(!app.detail().unwrap().is_panning());
    }

    #[test]
    fn status_is_written_only_on_change() {
        let mut surface = RecordingSurface::with_flat_item();
        let mut app = app_with(&["a.jpg"], &mut surface);
        surface.clear();
        for i in 0..4 {
            app.tick(&[fist(Handedness::Right)], 16.0 * i as f64, &mut surface);
        }
        assert_eq!(surface.count(|c| matches!(c, Call::Status(_))), 1);
        assert_eq!(surface.last_status(), Some(&StatusLine::FlatGallery));
    }

    #[test]
    fn toggle_mode_drives_the_sphere_spin() {
        let mut surface = RecordingSurface::with_sphere_item();
        let mut app = app_with(&["a.jpg"], &mut surface);
        assert_eq!(
            app.toggle_mode(&mut surface),
            Some(GalleryEvent::ModeSwitched(ViewMode::Sphere))
        );
        assert_eq!(app.status(), Some(&StatusLine::SphereGallery));

        surface.clear();
        app.animate(&mut surface);
        assert_eq!(surface.count(|c| matches!(c, Call::SphereItem(_))), 12);

        assert_eq!(app.switch_mode(ViewMode::Sphere, &mut surface), None);
        app.toggle_mode(&mut surface);
        surface.clear();
        app.animate(&mut surface);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn resize_recomputes_flat_bounds() {
        let mut surface = RecordingSurface::with_flat_item();
        let mut app = app_with(&["a.jpg"], &mut surface);
        assert_eq!(app.router().flat().max_scroll(), 2000.0);
        app.resize(Viewport::new(2500.0, 800.0), &mut surface);
        assert_eq!(app.router().flat().max_scroll(), 500.0);
    }

    #[test]
    fn reported_error_shows_in_status() {
        let mut surface = RecordingSurface::new();
        let mut app = app_with(&[], &mut surface);
        app.report_error("Recognition failed: model unavailable", &mut surface);
        assert!(app.status().unwrap().is_error());
        assert_eq!(
            surface.last_status().map(|s| s.to_string()),
            Some("Recognition failed: model unavailable".to_string())
        );
    }
}
