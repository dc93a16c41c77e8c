//! Flat (2D) gallery - horizontal drag with inertia
//!
//! idle -> dragging on the first controlled frame, dragging -> inertia on
//! release when the hand was still moving, inertia -> idle once friction
//! has bled the velocity off or the track hits an end.

use super::hover::{HoverTracker, Selection};
use super::router::{GalleryView, GestureInput, ViewContext, ViewMode};
use super::surface::{Layer, ScreenPoint};
use crate::config::{FlatConfig, HoverConfig};
use crate::gesture::InteractionFrame;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    Inertia,
}

#[derive(Clone, Debug)]
pub struct FlatView {
    config: FlatConfig,
    scroll: f32,
    max_scroll: f32,
    /// Scroll pixels per tick, positive scrolls right
    velocity: f32,
    phase: DragPhase,
    anchor_x: f32,
    anchor_scroll: f32,
    last_sample_ms: f64,
    hover: HoverTracker,
}

impl FlatView {
    pub fn new(config: FlatConfig, hover: HoverConfig) -> Self {
        Self {
            config,
            scroll: 0.0,
            max_scroll: 0.0,
            velocity: 0.0,
            phase: DragPhase::Idle,
            anchor_x: 0.0,
            anchor_scroll: 0.0,
            last_sample_ms: 0.0,
            hover: HoverTracker::new(Layer::Flat, hover),
        }
    }

    pub fn set_config(&mut self, config: FlatConfig, hover: HoverConfig) {
        self.config = config;
        self.hover.set_config(hover);
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    pub fn max_scroll(&self) -> f32 {
        self.max_scroll
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hover.target()
    }

    fn reset_motion(&mut self) {
        self.phase = DragPhase::Idle;
        self.velocity = 0.0;
        self.anchor_x = 0.0;
        self.anchor_scroll = 0.0;
    }

    fn drag(
        &mut self,
        frame: &InteractionFrame,
        at: ScreenPoint,
        now_ms: f64,
        ctx: &mut ViewContext<'_>,
    ) -> Option<Selection> {
        match self.phase {
            DragPhase::Dragging => {}
            DragPhase::Idle | DragPhase::Inertia => {
                self.phase = DragPhase::Dragging;
                self.anchor_x = at.x;
                self.anchor_scroll = self.scroll;
                self.last_sample_ms = now_ms;
                self.velocity = 0.0;
            }
        }

        let delta_x = at.x - self.anchor_x;
        let target = self.anchor_scroll - delta_x * self.config.sensitivity;

        // Rate-limited so per-frame jitter doesn't dominate the release speed
        if now_ms - self.last_sample_ms > self.config.velocity_sample_ms {
            let displacement = target - self.scroll;
            let blend = self.config.velocity_blend;
            self.velocity = blend * self.velocity + (1.0 - blend) * displacement;
            self.last_sample_ms = now_ms;
        }

        self.scroll = target.clamp(0.0, self.max_scroll);
        ctx.surface.set_track_offset(self.scroll);

        let settled = delta_x.abs() <= self.config.hover_max_shift
            && self.velocity.abs() <= self.config.hover_max_speed;
        if settled {
            ctx.surface.set_cursor_scale(1.0);
            self.hover.check(frame, at, ctx.surface)
        } else {
            self.hover.reset(ctx.surface);
            ctx.surface.set_cursor_scale(self.hover.config().grab_scale);
            None
        }
    }

    fn release(&mut self, ctx: &mut ViewContext<'_>) {
        if self.phase == DragPhase::Dragging {
            self.phase = if self.velocity.abs() > self.config.inertia_start_speed {
                DragPhase::Inertia
            } else {
                DragPhase::Idle
            };
        }

        if self.phase == DragPhase::Inertia {
            self.scroll += self.velocity;
            self.velocity *= self.config.friction;

            if self.scroll < 0.0 || self.scroll > self.max_scroll {
                self.scroll = self.scroll.clamp(0.0, self.max_scroll);
                self.velocity = 0.0;
                self.phase = DragPhase::Idle;
            }
            if self.velocity.abs() < self.config.inertia_stop_speed {
                self.velocity = 0.0;
                self.phase = DragPhase::Idle;
            }
            ctx.surface.set_track_offset(self.scroll);
        }

        self.hover.reset(ctx.surface);
    }
}

impl GalleryView for FlatView {
    fn mode(&self) -> ViewMode {
        ViewMode::Flat
    }

    fn mount(&mut self, ctx: &mut ViewContext<'_>) {
        ctx.surface.set_layer_visible(Layer::Flat, true);
        self.update_layout(ctx);
        self.reset_motion();
        self.scroll = 0.0;
        ctx.surface.set_track_offset(0.0);
    }

    fn unmount(&mut self, ctx: &mut ViewContext<'_>) {
        ctx.surface.set_layer_visible(Layer::Flat, false);
        self.reset_motion();
        self.hover.reset(ctx.surface);
    }

    fn update_layout(&mut self, ctx: &mut ViewContext<'_>) {
        self.max_scroll = (ctx.surface.track_width() - ctx.viewport.width).max(0.0);
        if self.scroll > self.max_scroll {
            self.scroll = self.max_scroll;
            ctx.surface.set_track_offset(self.scroll);
        }
    }

    fn on_gesture(
        &mut self,
        frame: &InteractionFrame,
        input: &GestureInput,
        ctx: &mut ViewContext<'_>,
    ) -> Option<Selection> {
        match input.screen {
            Some(at) if input.controlling => self.drag(frame, at, input.now_ms, ctx),
            _ => {
                self.release(ctx);
                None
            }
        }
    }
}
