//! DOM implementation of the render surface
//!
//! Expects the page to provide `#app`, `#gallery-track`, `#cursor`,
//! `.cursor-ring` and `#status-bar`. The sphere container and the detail
//! overlay are created here.

use nalgebra::{Matrix4, Vector4};
use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, Window};

use crate::error::GalleryError;
use crate::status::StatusLine;
use crate::views::{CursorVisibility, DetailTransform, Layer, ScreenPoint, Surface, Viewport};

const FLAT_ITEM: &str = ".gallery-item";
const SPHERE_ITEM: &str = ".sphere-item";
const ACCENT: &str = "#646cff";

/// Vertical field of view and camera distance of the sphere scene
const CAMERA_FOV_DEG: f32 = 50.0;
const CAMERA_DISTANCE: f32 = 1800.0;

pub struct DomSurface {
    window: Window,
    document: Document,
    app: HtmlElement,
    track: HtmlElement,
    cursor: HtmlElement,
    cursor_ring: HtmlElement,
    status_bar: HtmlElement,
    sphere_container: HtmlElement,
    sphere_stage: HtmlElement,
    sphere_items: Vec<HtmlElement>,
    detail_overlay: Option<HtmlElement>,
    detail_image: Option<HtmlImageElement>,
    fade_ms: i32,
}

fn html_by_id(document: &Document, id: &'static str) -> Result<HtmlElement, GalleryError> {
    document
        .get_element_by_id(id)
        .ok_or(GalleryError::MissingElement(id))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| GalleryError::MissingElement(id))
}

fn create_html(document: &Document, tag: &str) -> Result<HtmlElement, GalleryError> {
    document
        .create_element(tag)
        .map_err(|e| GalleryError::StartupFailure(format!("create <{}>: {:?}", tag, e)))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| GalleryError::StartupFailure(format!("<{}> is not an HtmlElement", tag)))
}

fn js_err(context: &str) -> impl Fn(JsValue) -> GalleryError + '_ {
    move |e| GalleryError::StartupFailure(format!("{}: {:?}", context, e))
}

/// Style writes can only fail on a read-only declaration, which ours never are
fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

fn paint_status(bar: &HtmlElement, status: &StatusLine) {
    bar.set_inner_text(status.text());
    set_style(bar, "color", if status.is_error() { "red" } else { "#aaa" });
}

/// Write straight to `#status-bar`, for errors raised before a session exists
pub fn write_status(status: &StatusLine) {
    let bar = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("status-bar"))
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    if let Some(bar) = bar {
        paint_status(&bar, status);
    }
}

fn data_index(el: &Element) -> Option<usize> {
    el.get_attribute("data-index")?.parse().ok()
}

impl DomSurface {
    /// Bind to the page and build gallery items for `images`.
    ///
    /// With an empty manifest the page's placeholder items are kept and their
    /// sources returned instead.
    pub fn new(images: Vec<String>, fade_ms: i32) -> Result<(Self, Vec<String>), GalleryError> {
        let window = web_sys::window().ok_or(GalleryError::MissingElement("window"))?;
        let document = window
            .document()
            .ok_or(GalleryError::MissingElement("document"))?;

        let app = html_by_id(&document, "app")?;
        let track = html_by_id(&document, "gallery-track")?;
        let cursor = html_by_id(&document, "cursor")?;
        let status_bar = html_by_id(&document, "status-bar")?;
        let cursor_ring = document
            .query_selector(".cursor-ring")
            .map_err(js_err("query .cursor-ring"))?
            .ok_or(GalleryError::MissingElement("cursor-ring"))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| GalleryError::MissingElement("cursor-ring"))?;

        let images = if images.is_empty() {
            placeholder_sources(&document)?
        } else {
            build_flat_items(&document, &track, &images)?;
            images
        };

        let sphere_container = create_html(&document, "div")?;
        sphere_container.set_id("sphere-container");
        sphere_container.style().set_css_text(
            "position:fixed; top:0; left:0; width:100%; height:100%; z-index:10; \
             display:none; background:#000; overflow:hidden;",
        );
        let sphere_stage = create_html(&document, "div")?;
        sphere_stage.style().set_css_text(
            "position:absolute; top:50%; left:50%; width:0; height:0; transform-style:preserve-3d;",
        );
        sphere_container
            .append_child(&sphere_stage)
            .map_err(js_err("mount sphere stage"))?;

        let mut sphere_items = Vec::with_capacity(images.len());
        for (index, src) in images.iter().enumerate() {
            let item = create_html(&document, "div")?;
            item.set_class_name("sphere-item");
            item.set_attribute("data-index", &index.to_string())
                .map_err(js_err("tag sphere item"))?;
            item.style().set_css_text(
                "position:absolute; width:240px; height:360px; backface-visibility:hidden;",
            );
            let img = document
                .create_element("img")
                .map_err(js_err("create sphere image"))?
                .dyn_into::<HtmlImageElement>()
                .map_err(|_| GalleryError::StartupFailure("sphere image".into()))?;
            img.set_src(src);
            img.style().set_css_text(
                "width:100%; height:100%; object-fit:cover; border-radius:12px; \
                 box-shadow:0 0 20px rgba(0,255,255,0.2);",
            );
            item.append_child(&img).map_err(js_err("mount sphere image"))?;
            sphere_stage
                .append_child(&item)
                .map_err(js_err("mount sphere item"))?;
            sphere_items.push(item);
        }

        document
            .body()
            .ok_or(GalleryError::MissingElement("body"))?
            .append_child(&sphere_container)
            .map_err(js_err("mount sphere container"))?;

        let surface = Self {
            window,
            document,
            app,
            track,
            cursor,
            cursor_ring,
            status_bar,
            sphere_container,
            sphere_stage,
            sphere_items,
            detail_overlay: None,
            detail_image: None,
            fade_ms,
        };
        Ok((surface, images))
    }

    pub fn viewport(&self) -> Viewport {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(1280.0);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(720.0);
        Viewport::new(width as f32, height as f32)
    }

    pub fn hide_loader(&self) {
        if let Some(loader) = self.document.get_element_by_id("loader") {
            let _ = loader.class_list().add_1("hidden");
        }
    }

    pub fn set_fade_ms(&mut self, fade_ms: i32) {
        self.fade_ms = fade_ms;
    }

    fn items(&self, layer: Layer) -> Vec<HtmlElement> {
        let selector = match layer {
            Layer::Flat => FLAT_ITEM,
            Layer::Sphere => return self.sphere_items.clone(),
        };
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }
}

fn placeholder_sources(document: &Document) -> Result<Vec<String>, GalleryError> {
    let list = document
        .query_selector_all(FLAT_ITEM)
        .map_err(js_err("query gallery items"))?;
    let mut sources = Vec::new();
    for i in 0..list.length() {
        let Some(item) = list.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        item.set_attribute("data-index", &sources.len().to_string())
            .map_err(js_err("tag gallery item"))?;
        let src = item
            .query_selector("img")
            .ok()
            .flatten()
            .and_then(|img| img.dyn_into::<HtmlImageElement>().ok())
            .map(|img| img.src())
            .unwrap_or_default();
        sources.push(src);
    }
    Ok(sources)
}

fn build_flat_items(
    document: &Document,
    track: &HtmlElement,
    images: &[String],
) -> Result<(), GalleryError> {
    track.set_inner_html("");
    for (index, src) in images.iter().enumerate() {
        let item = create_html(document, "div")?;
        item.set_class_name("gallery-item");
        item.set_attribute("data-index", &index.to_string())
            .map_err(js_err("tag gallery item"))?;
        let img = document
            .create_element("img")
            .map_err(js_err("create gallery image"))?
            .dyn_into::<HtmlImageElement>()
            .map_err(|_| GalleryError::StartupFailure("gallery image".into()))?;
        img.set_src(src);
        img.set_alt(&format!("Image {}", index + 1));
        item.append_child(&img).map_err(js_err("mount gallery image"))?;
        track.append_child(&item).map_err(js_err("mount gallery item"))?;
    }
    Ok(())
}

/// CSS `matrix3d()` for a y-up model matrix on the y-down page
fn css_matrix(model: &Matrix4<f32>) -> String {
    let flip = Matrix4::from_diagonal(&Vector4::new(1.0, -1.0, 1.0, 1.0));
    let css = flip * model * flip;
    let values: Vec<String> = css.as_slice().iter().map(|v| format!("{:.6}", v)).collect();
    format!("translate(-50%, -50%) matrix3d({})", values.join(","))
}

impl Surface for DomSurface {
    fn place_cursor(&mut self, at: ScreenPoint) {
        set_style(&self.cursor, "left", &format!("{}px", at.x));
        set_style(&self.cursor, "top", &format!("{}px", at.y));
    }

    fn set_cursor_visibility(&mut self, visibility: CursorVisibility) {
        let (opacity, ring) = match visibility {
            CursorVisibility::Active => ("1", Some(ACCENT)),
            CursorVisibility::Dimmed => ("0.3", Some("red")),
            CursorVisibility::Hidden => ("0", None),
        };
        set_style(&self.cursor, "opacity", opacity);
        if let Some(color) = ring {
            set_style(&self.cursor_ring, "border-color", color);
        }
    }

    fn set_cursor_scale(&mut self, scale: f32) {
        set_style(&self.cursor, "transform", &format!("scale({})", scale));
    }

    fn set_cursor_progress(&mut self, progress: f32) {
        if progress > 0.0 {
            set_style(
                &self.cursor_ring,
                "background-color",
                &format!("rgba(100, 108, 255, {})", progress * 0.5),
            );
            set_style(
                &self.cursor_ring,
                "transform",
                &format!("scale({})", 1.0 + progress * 0.5),
            );
        } else {
            set_style(&self.cursor_ring, "background-color", "transparent");
            set_style(&self.cursor_ring, "transform", "scale(1)");
        }
    }

    fn hit_test(&mut self, layer: Layer, at: ScreenPoint) -> Option<usize> {
        // The cursor sits on top of everything; take it out of the hit-test
        set_style(&self.cursor, "display", "none");
        let hit = self.document.element_from_point(at.x, at.y);
        set_style(&self.cursor, "display", "flex");

        let selector = match layer {
            Layer::Flat => FLAT_ITEM,
            Layer::Sphere => SPHERE_ITEM,
        };
        let item = hit?.closest(selector).ok()??;
        data_index(&item)
    }

    fn highlight(&mut self, layer: Layer, item: Option<usize>) {
        for (index, el) in self.items(layer).iter().enumerate() {
            let position = data_index(el).unwrap_or(index);
            let _ = el
                .class_list()
                .toggle_with_force("hovered", item == Some(position));
        }
    }

    fn set_layer_visible(&mut self, layer: Layer, visible: bool) {
        match layer {
            Layer::Flat => set_style(&self.app, "display", if visible { "flex" } else { "none" }),
            Layer::Sphere => set_style(
                &self.sphere_container,
                "display",
                if visible { "block" } else { "none" },
            ),
        }
    }

    fn track_width(&self) -> f32 {
        self.track.scroll_width() as f32
    }

    fn set_track_offset(&mut self, scroll: f32) {
        set_style(&self.track, "transform", &format!("translateX({}px)", -scroll));
    }

    fn sphere_item_count(&self) -> usize {
        self.sphere_items.len()
    }

    fn place_sphere_item(&mut self, index: usize, model: &Matrix4<f32>) {
        if let Some(item) = self.sphere_items.get(index) {
            set_style(item, "transform", &css_matrix(model));
        }
    }

    fn set_sphere_viewport(&mut self, viewport: Viewport) {
        // CSS perspective distance matching a perspective camera's fov
        let half_fov = (CAMERA_FOV_DEG.to_radians()) / 2.0;
        let perspective = viewport.height / 2.0 / half_fov.tan();
        set_style(
            &self.sphere_container,
            "perspective",
            &format!("{}px", perspective),
        );
        set_style(
            &self.sphere_stage,
            "transform",
            &format!("translateZ({}px)", perspective - CAMERA_DISTANCE),
        );
    }

    fn open_detail(&mut self, source: &str) {
        // A previous overlay may still be fading out
        self.detail_overlay = None;
        self.detail_image = None;

        let Ok(overlay) = create_html(&self.document, "div") else {
            return;
        };
        overlay.set_id("detail-view");
        overlay.style().set_css_text(&format!(
            "position:fixed; top:0; left:0; width:100vw; height:100vh; \
             background:rgba(0,0,0,0.95); z-index:500; display:flex; \
             justify-content:center; align-items:center; opacity:0; \
             transition:opacity {}ms;",
            self.fade_ms
        ));

        let Some(img) = self
            .document
            .create_element("img")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
        else {
            return;
        };
        img.set_src(source);
        img.style().set_css_text(
            "max-width:90%; max-height:90%; transition:transform 0.1s; transform-origin:center;",
        );

        if overlay.append_child(&img).is_err() {
            return;
        }
        let Some(body) = self.document.body() else {
            return;
        };
        if body.append_child(&overlay).is_err() {
            return;
        }

        // Fade in on the next frame so the transition runs
        let fading = overlay.clone();
        let fade_in = Closure::once_into_js(move || set_style(&fading, "opacity", "1"));
        let _ = self
            .window
            .request_animation_frame(fade_in.unchecked_ref::<Function>());

        self.detail_overlay = Some(overlay);
        self.detail_image = Some(img);
    }

    fn set_detail_transform(&mut self, transform: &DetailTransform) {
        if let Some(img) = &self.detail_image {
            let _ = img.style().set_property("transform", &transform.to_css());
        }
    }

    fn close_detail(&mut self) {
        self.detail_image = None;
        let Some(overlay) = self.detail_overlay.take() else {
            return;
        };
        set_style(&overlay, "opacity", "0");
        let remove = Closure::once_into_js(move || overlay.remove());
        let _ = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                remove.unchecked_ref::<Function>(),
                self.fade_ms,
            );
    }

    fn set_status(&mut self, status: &StatusLine) {
        paint_status(&self.status_bar, status);
    }
}
