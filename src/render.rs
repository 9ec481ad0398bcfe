//! Renderer seam.
//!
//! The renderer is a pure presentation layer: after every handled event it
//! receives the current viewport state and selection sequence and draws
//! them. Nothing flows back into the core.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::selection::Selection;
use crate::viewport::ViewportState;

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: ViewportState,
    /// Selections in display order, with the active flag set.
    pub selections: Vec<Selection>,
    /// In-progress draw rectangle (image space), if any.
    pub preview: Option<Rect>,
}

/// The presentation collaborator.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame);
}
