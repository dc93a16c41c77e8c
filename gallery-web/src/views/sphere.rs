//! Sphere (3D) gallery - pointing drag drives a damped group rotation
//!
//! Rotation target is absolute from the drag start (`base + delta * speed`)
//! so a long drag never accumulates per-frame rounding. The displayed
//! rotation eases toward the target once per rendered frame via the
//! [`FrameTask::SphereSpin`] task, which only exists while mounted.

use nalgebra::{Isometry3, Matrix4, Vector2};

use super::hover::{HoverTracker, Selection};
use super::layout::{group_rotation, sphere_layout};
use super::router::{GalleryView, GestureInput, ViewContext, ViewMode};
use super::scheduler::{FrameTask, TaskHandle};
use super::surface::{Layer, ScreenPoint, Surface};
use crate::config::{HoverConfig, SphereConfig};
use crate::gesture::InteractionFrame;

#[derive(Clone, Debug)]
pub struct SphereView {
    config: SphereConfig,
    /// x is yaw (about Y), y is pitch (about X), in radians
    target: Vector2<f32>,
    current: Vector2<f32>,
    base: Vector2<f32>,
    drag_start: ScreenPoint,
    was_pointing: bool,
    hover: HoverTracker,
    task: Option<TaskHandle>,
    layout: Vec<Isometry3<f32>>,
}

impl SphereView {
    pub fn new(config: SphereConfig, hover: HoverConfig) -> Self {
        Self {
            config,
            target: Vector2::zeros(),
            current: Vector2::zeros(),
            base: Vector2::zeros(),
            drag_start: ScreenPoint::default(),
            was_pointing: false,
            hover: HoverTracker::new(Layer::Sphere, hover),
            task: None,
            layout: Vec::new(),
        }
    }

    pub fn set_config(&mut self, config: SphereConfig, hover: HoverConfig) {
        let radius_changed = config.radius != self.config.radius;
        self.config = config;
        self.hover.set_config(hover);
        if radius_changed {
            self.layout.clear();
        }
    }

    pub fn target_rotation(&self) -> Vector2<f32> {
        self.target
    }

    pub fn current_rotation(&self) -> Vector2<f32> {
        self.current
    }

    pub fn is_dragging(&self) -> bool {
        self.was_pointing
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hover.target()
    }

    pub fn is_spinning(&self) -> bool {
        self.task.is_some()
    }

    /// Model matrix of item `index` under the current group rotation
    pub fn item_matrix(&self, index: usize) -> Option<Matrix4<f32>> {
        let pose = self.layout.get(index)?;
        let group = group_rotation(self.current.x, self.current.y);
        Some(group.to_homogeneous() * pose.to_homogeneous())
    }

    fn ensure_layout(&mut self, surface: &dyn Surface) {
        let total = surface.sphere_item_count();
        if self.layout.len() != total {
            self.layout = sphere_layout(total, self.config.radius);
        }
    }

    /// One render tick: ease toward the target and re-place every item
    pub fn animate(&mut self, surface: &mut dyn Surface) {
        self.current += (self.target - self.current) * self.config.damping;

        self.ensure_layout(surface);
        let group = group_rotation(self.current.x, self.current.y).to_homogeneous();
        for (index, pose) in self.layout.iter().enumerate() {
            surface.place_sphere_item(index, &(group * pose.to_homogeneous()));
        }
    }

    fn release(&mut self, ctx: &mut ViewContext<'_>) {
        self.was_pointing = false;
        ctx.surface.set_cursor_scale(1.0);
        self.hover.reset(ctx.surface);
    }
}

impl GalleryView for SphereView {
    fn mode(&self) -> ViewMode {
        ViewMode::Sphere
    }

    fn mount(&mut self, ctx: &mut ViewContext<'_>) {
        ctx.surface.set_layer_visible(Layer::Sphere, true);
        ctx.surface.set_layer_visible(Layer::Flat, false);
        if self.task.is_none() {
            self.task = Some(ctx.scheduler.schedule(FrameTask::SphereSpin));
        }
        self.update_layout(ctx);
        self.animate(ctx.surface);
    }

    fn unmount(&mut self, ctx: &mut ViewContext<'_>) {
        ctx.surface.set_layer_visible(Layer::Sphere, false);
        ctx.surface.set_layer_visible(Layer::Flat, true);
        if let Some(handle) = self.task.take() {
            ctx.scheduler.unschedule(handle);
        }
        self.was_pointing = false;
        self.hover.reset(ctx.surface);
    }

    fn update_layout(&mut self, ctx: &mut ViewContext<'_>) {
        ctx.surface.set_sphere_viewport(ctx.viewport);
        self.ensure_layout(ctx.surface);
    }

    fn on_gesture(
        &mut self,
        frame: &InteractionFrame,
        input: &GestureInput,
        ctx: &mut ViewContext<'_>,
    ) -> Option<Selection> {
        let at = match input.screen {
            Some(at) if frame.is_strict_pointing() => at,
            _ => {
                self.release(ctx);
                return None;
            }
        };

        if !self.was_pointing {
            self.base = self.target;
            self.drag_start = at;
            self.was_pointing = true;
        }

        let delta = Vector2::new(at.x - self.drag_start.x, at.y - self.drag_start.y);
        self.target = self.base + delta * self.config.rotation_speed;

        let steady = delta.x.abs() < self.config.hover_max_shift
            && delta.y.abs() < self.config.hover_max_shift;
        if steady {
            ctx.surface.set_cursor_scale(1.0);
            self.hover.check(frame, at, ctx.surface)
        } else {
            ctx.surface.set_cursor_scale(self.hover.config().grab_scale);
            self.hover.reset(ctx.surface);
            None
        }
    }
}
