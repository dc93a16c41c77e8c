//! Error types surfaced across the JS bridge

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can go wrong between the landmark source and the DOM
#[derive(Debug, Error)]
pub enum GalleryError {
    /// The landmark model threw while recognising one video frame
    #[error("recognition failed: {0}")]
    RecognitionFailure(String),

    /// Camera, model or page setup failed before the first tick
    #[error("startup failed: {0}")]
    StartupFailure(String),

    #[error("no element matching '{0}' found")]
    MissingElement(&'static str),

    /// Flat landmark buffer does not match the number of hands reported
    #[error("invalid landmark data length: {len} (expected {hands} x 63)")]
    InvalidLandmarkData { len: usize, hands: usize },

    #[error("gallery not initialized - call init() first")]
    NotInitialized,
}

impl GalleryError {
    /// Per-tick failures are logged and skipped; everything else is fatal to startup.
    ///
    /// A frame arriving before `init` is per-tick too: the recognition loop
    /// may start first.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GalleryError::RecognitionFailure(_)
                | GalleryError::InvalidLandmarkData { .. }
                | GalleryError::NotInitialized
        )
    }
}

impl From<GalleryError> for JsValue {
    fn from(err: GalleryError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
