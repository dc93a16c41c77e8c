//! User-visible status line

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum StatusLine {
    Loading,
    Ready,
    FlatGallery,
    SphereGallery,
    DetailIdle,
    ZoomingIn,
    ZoomingOut,
    Panning,
    /// Startup failures and unhandled script errors
    Error(String),
}

impl StatusLine {
    pub fn text(&self) -> &str {
        match self {
            StatusLine::Loading => "Loading hand tracking...",
            StatusLine::Ready => "Ready - raise your right index finger to take control",
            StatusLine::FlatGallery => "Gallery: point with your right index finger and swipe",
            StatusLine::SphereGallery => "Sphere: point to rotate, hover and pinch to open",
            StatusLine::DetailIdle => {
                "Detail: left thumb up to zoom in, left index up to zoom out, left palm to pan, right palm to close"
            }
            StatusLine::ZoomingIn => "Zooming in...",
            StatusLine::ZoomingOut => "Zooming out...",
            StatusLine::Panning => "Panning...",
            StatusLine::Error(msg) => msg,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StatusLine::Error(_))
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
