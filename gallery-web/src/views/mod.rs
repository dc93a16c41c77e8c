//! Gallery views and their render collaborator
//!
//! - `surface`: the [`Surface`] trait the page implements
//! - `flat` / `sphere`: the two [`GalleryView`]s, switched by [`ViewRouter`]
//! - `detail`: zoom/pan overlay, orthogonal to the gallery mode
//! - `scheduler`: per-frame tasks that outlive a single gesture tick

pub mod detail;
pub mod flat;
pub mod hover;
pub mod layout;
pub mod router;
pub mod scheduler;
pub mod sphere;
pub mod surface;

pub use detail::{DetailGesture, DetailOutcome, DetailView};
pub use flat::{DragPhase, FlatView};
pub use hover::{HoverTracker, Selection};
pub use router::{GalleryView, GestureInput, ViewContext, ViewMode, ViewRouter};
pub use scheduler::{FrameScheduler, FrameTask, TaskHandle};
pub use sphere::SphereView;
pub use surface::{CursorVisibility, DetailTransform, Layer, ScreenPoint, Surface, Viewport};

#[cfg(test)]
pub(crate) use surface::testing;
