//! The editing session: one image, one viewport, one selection store.
//!
//! `EditorSession` is the explicit object the surrounding application
//! constructs once and passes to whichever layer needs it. It owns the
//! viewport transform, the selection store, and the interaction
//! controller, and exposes the fixed event-handling surface of the core.
//! All event handlers are synchronous and run to completion; the caller
//! re-renders from [`EditorSession::frame`] after each handled event.

use crate::constants::fit;
use crate::controller::{InteractionController, Mode};
use crate::error::CropError;
use crate::event::{Key, Modifiers, PointerButton};
use crate::export::{CropExporter, CropRegion};
use crate::geometry::Point;
use crate::render::RenderFrame;
use crate::selection::{Selection, SelectionStore};
use crate::source::{ImageSource, LoadedImage};
use crate::viewport::ViewportTransform;

/// An editing session over a single image.
#[derive(Debug, Default)]
pub struct EditorSession {
    viewport: ViewportTransform,
    store: SelectionStore,
    controller: InteractionController,
    image: Option<LoadedImage>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with a known surface size.
    pub fn with_surface_size(width: f32, height: f32) -> Self {
        let mut session = Self::new();
        session.set_surface_size(width, height);
        session
    }

    // ------------------------------------------------------------------
    // Image lifecycle
    // ------------------------------------------------------------------

    /// Install a new image, replacing any current one.
    ///
    /// Clears all selections (numbering restarts at 1), cancels any
    /// gesture in progress, and fits the image to the surface.
    pub fn load_image(&mut self, image: LoadedImage) {
        self.controller.cancel_current_operation();
        self.store.reset();
        self.viewport.reset();
        self.viewport
            .set_image_size(image.width() as f32, image.height() as f32);
        self.viewport.fit_to_surface(fit::MARGIN);
        log::info!("Loaded {}x{} image", image.width(), image.height());
        self.image = Some(image);
    }

    /// Decode an image file and install it.
    pub fn load_image_from_path(&mut self, path: impl AsRef<std::path::Path>) -> Result<(), CropError> {
        let image = LoadedImage::open(path)?;
        self.load_image(image);
        Ok(())
    }

    /// Drop the current image and all session state derived from it.
    pub fn close_image(&mut self) {
        self.controller.cancel_current_operation();
        self.store.reset();
        self.viewport.reset();
        self.image = None;
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    /// Update the rendering surface dimensions, keeping the image
    /// reasonably positioned.
    pub fn set_surface_size(&mut self, width: f32, height: f32) {
        self.viewport.set_surface_size(width, height);
        self.viewport.constrain_position();
    }

    // ------------------------------------------------------------------
    // Event surface
    // ------------------------------------------------------------------

    /// Handle pointer-down at a surface position.
    pub fn pointer_down(&mut self, point: Point, button: PointerButton) {
        self.controller
            .pointer_down(point, button, &mut self.viewport, &mut self.store);
    }

    /// Handle pointer-move to a surface position.
    pub fn pointer_move(&mut self, point: Point) {
        self.controller
            .pointer_move(point, &mut self.viewport, &mut self.store);
    }

    /// Handle pointer-up.
    pub fn pointer_up(&mut self) {
        self.controller.pointer_up(&mut self.viewport, &mut self.store);
    }

    /// Handle a wheel event at a surface position.
    pub fn wheel(&mut self, delta: f32, point: Point) {
        self.controller.wheel(delta, point, &mut self.viewport);
    }

    /// Handle a key press.
    pub fn key_down(&mut self, key: Key, modifiers: Modifiers) {
        self.controller
            .key_down(key, modifiers, &mut self.viewport, &mut self.store);
    }

    /// Force-cancel any in-progress gesture.
    pub fn cancel_current_operation(&mut self) {
        self.controller.cancel_current_operation();
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn selections(&self) -> &[Selection] {
        self.store.all()
    }

    pub fn active_selection(&self) -> Option<&Selection> {
        self.store.active()
    }

    pub fn scale(&self) -> f32 {
        self.viewport.scale()
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    pub fn can_zoom_in(&self) -> bool {
        self.viewport.can_zoom_in()
    }

    pub fn can_zoom_out(&self) -> bool {
        self.viewport.can_zoom_out()
    }

    /// Snapshot everything the renderer needs for one frame.
    pub fn frame(&self) -> RenderFrame {
        RenderFrame {
            viewport: self.viewport.state(),
            selections: self.store.all().to_vec(),
            preview: self.controller.preview_rect(),
        }
    }

    // ------------------------------------------------------------------
    // Export handoff
    // ------------------------------------------------------------------

    /// Snapshot the selection sequence for the export collaborator, in
    /// display order with display labels.
    pub fn export_regions(&self) -> Vec<CropRegion> {
        self.store.all().iter().map(CropRegion::from_selection).collect()
    }

    /// Hand the current selections and image to an export collaborator.
    ///
    /// The collaborator receives copies; the store remains untouched by
    /// export success or failure.
    pub fn export_to(&self, exporter: &mut dyn CropExporter) -> Result<(), CropError> {
        let Some(image) = self.image.as_ref() else {
            return Err(CropError::NoImage);
        };
        let regions = self.export_regions();
        exporter.export(&regions, image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;

    fn test_image(w: u32, h: u32) -> LoadedImage {
        LoadedImage::new(DynamicImage::new_rgba8(w, h)).unwrap()
    }

    #[test]
    fn test_load_image_fits_and_resets() {
        let mut session = EditorSession::with_surface_size(800.0, 600.0);
        session.load_image(test_image(4000, 3000));

        // 4000x3000 into 800x600 with margin 20
        let expected = 560.0 / 3000.0;
        assert!((session.scale() - expected).abs() < 0.001);

        let frame = session.frame();
        assert!((frame.viewport.offset_x - (800.0 - 4000.0 * expected) / 2.0).abs() < 0.001);
        assert!((frame.viewport.offset_y - (600.0 - 3000.0 * expected) / 2.0).abs() < 0.001);
    }

    #[test]
    fn test_reload_restarts_numbering() {
        let mut session = EditorSession::with_surface_size(800.0, 600.0);
        session.load_image(test_image(400, 300));
        let frame = session.frame();
        let (ox, oy, s) = (
            frame.viewport.offset_x,
            frame.viewport.offset_y,
            frame.viewport.scale,
        );

        // Draw one selection in the middle of the image
        let at = |ix: f32, iy: f32| Point::new(ix * s + ox, iy * s + oy);
        session.pointer_down(at(50.0, 50.0), PointerButton::Primary);
        session.pointer_move(at(150.0, 150.0));
        session.pointer_up();
        assert_eq!(session.selections().len(), 1);

        session.load_image(test_image(400, 300));
        assert!(session.selections().is_empty());

        session.pointer_down(at(50.0, 50.0), PointerButton::Primary);
        session.pointer_move(at(150.0, 150.0));
        session.pointer_up();
        assert_eq!(session.selections()[0].id, 1);
    }

    #[test]
    fn test_no_image_events_are_noops() {
        let mut session = EditorSession::with_surface_size(800.0, 600.0);
        session.pointer_down(Point::new(100.0, 100.0), PointerButton::Primary);
        session.pointer_move(Point::new(200.0, 200.0));
        session.pointer_up();
        session.wheel(1.0, Point::new(100.0, 100.0));
        session.key_down(Key::Delete, Modifiers::NONE);
        assert!(session.selections().is_empty());
        assert_eq!(session.scale(), 1.0);
    }

    #[test]
    fn test_export_snapshot_is_independent() {
        struct Recorder {
            regions: Vec<CropRegion>,
        }
        impl CropExporter for Recorder {
            fn export(
                &mut self,
                regions: &[CropRegion],
                _image: &LoadedImage,
            ) -> Result<(), CropError> {
                self.regions = regions.to_vec();
                Ok(())
            }
        }

        let mut session = EditorSession::with_surface_size(800.0, 600.0);
        session.load_image(test_image(400, 300));
        let frame = session.frame();
        let (ox, oy, s) = (
            frame.viewport.offset_x,
            frame.viewport.offset_y,
            frame.viewport.scale,
        );
        let at = |ix: f32, iy: f32| Point::new(ix * s + ox, iy * s + oy);

        session.pointer_down(at(20.0, 20.0), PointerButton::Primary);
        session.pointer_move(at(80.0, 80.0));
        session.pointer_up();
        session.key_down(Key::Escape, Modifiers::NONE);
        session.pointer_down(at(150.0, 150.0), PointerButton::Primary);
        session.pointer_move(at(250.0, 250.0));
        session.pointer_up();

        let mut recorder = Recorder { regions: Vec::new() };
        session.export_to(&mut recorder).unwrap();
        assert_eq!(recorder.regions.len(), 2);
        assert_eq!(recorder.regions[0].label, "1");
        assert_eq!(recorder.regions[1].label, "2");

        // Deleting afterward does not touch the exported copy
        session.key_down(Key::Delete, Modifiers::NONE);
        assert_eq!(session.selections().len(), 1);
        assert_eq!(recorder.regions.len(), 2);
    }

    #[test]
    fn test_export_without_image_fails() {
        struct Nop;
        impl CropExporter for Nop {
            fn export(
                &mut self,
                _regions: &[CropRegion],
                _image: &LoadedImage,
            ) -> Result<(), CropError> {
                Ok(())
            }
        }
        let session = EditorSession::new();
        assert!(matches!(
            session.export_to(&mut Nop),
            Err(CropError::NoImage)
        ));
    }
}
