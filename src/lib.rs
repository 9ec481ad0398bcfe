//! cropview — interactive crop-selection geometry core.
//!
//! A pannable/zoomable viewport over a raster image plus a pointer- and
//! keyboard-driven state machine for drawing, moving, and resizing
//! rectangular selections in image-pixel coordinates. Rendering and the
//! crop/export pipeline are external collaborators behind the [`Renderer`]
//! and [`CropExporter`] traits.

pub mod constants;
mod controller;
mod error;
mod event;
mod export;
mod geometry;
mod render;
mod selection;
mod session;
mod source;
mod viewport;

pub use controller::{Handle, InteractionController, InteractionState, Mode};
pub use error::CropError;
pub use event::{Key, Modifiers, PointerButton};
pub use export::{CropExporter, CropRegion, regions_to_json};
pub use geometry::{Point, Rect};
pub use render::{RenderFrame, Renderer};
pub use selection::{BoundsPatch, Selection, SelectionStore};
pub use session::EditorSession;
pub use source::{ImageSource, LoadedImage};
pub use viewport::{ViewportState, ViewportTransform};
