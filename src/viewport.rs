//! Affine viewport transform between image space and surface space.
//!
//! The mapping is `surface = image * scale + offset` per axis. This module
//! owns the zoom bounds and the position-constraint policy that keeps the
//! image from being panned entirely out of view.

use serde::{Deserialize, Serialize};

use crate::constants::{pan, zoom};
use crate::geometry::Point;

/// Snapshot of the viewport state, handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub image_width: f32,
    pub image_height: f32,
    pub surface_width: f32,
    pub surface_height: f32,
}

/// The pan/zoom transform for the editing session.
///
/// Position constraints are applied after discrete zoom operations and at
/// pan-gesture end, not continuously during a pan (the caller invokes
/// [`ViewportTransform::constrain_position`] on gesture release).
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportTransform {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    min_scale: f32,
    max_scale: f32,
    image_width: f32,
    image_height: f32,
    surface_width: f32,
    surface_height: f32,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportTransform {
    /// Create a transform with no image and default zoom bounds.
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            min_scale: zoom::MIN,
            max_scale: zoom::MAX,
            image_width: 0.0,
            image_height: 0.0,
            surface_width: 0.0,
            surface_height: 0.0,
        }
    }

    /// Whether an image is installed. The loader rejects zero-dimension
    /// rasters, so non-zero width implies a loaded image.
    pub fn has_image(&self) -> bool {
        self.image_width > 0.0 && self.image_height > 0.0
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> (f32, f32) {
        (self.offset_x, self.offset_y)
    }

    pub fn image_size(&self) -> (f32, f32) {
        (self.image_width, self.image_height)
    }

    pub fn surface_size(&self) -> (f32, f32) {
        (self.surface_width, self.surface_height)
    }

    /// Install a new image. Zoom and pan are left for the caller to
    /// re-derive (typically via [`ViewportTransform::fit_to_surface`]).
    pub fn set_image_size(&mut self, width: f32, height: f32) {
        self.image_width = width;
        self.image_height = height;
    }

    /// Update the rendering surface dimensions.
    pub fn set_surface_size(&mut self, width: f32, height: f32) {
        self.surface_width = width;
        self.surface_height = height;
    }

    /// Drop the image and return to the identity transform.
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.offset_x = 0.0;
        self.offset_y = 0.0;
        self.image_width = 0.0;
        self.image_height = 0.0;
    }

    /// Map a surface point to image space.
    ///
    /// Returns `None` while no image is loaded; the inverse map is
    /// meaningless without one.
    pub fn to_image_space(&self, surface: Point) -> Option<Point> {
        if !self.has_image() {
            return None;
        }
        Some(Point::new(
            (surface.x - self.offset_x) / self.scale,
            (surface.y - self.offset_y) / self.scale,
        ))
    }

    /// Map an image point to surface space.
    pub fn to_surface_space(&self, image: Point) -> Point {
        Point::new(
            image.x * self.scale + self.offset_x,
            image.y * self.scale + self.offset_y,
        )
    }

    /// Check whether a surface point falls on the image.
    pub fn is_point_in_image(&self, surface: Point) -> bool {
        match self.to_image_space(surface) {
            Some(p) => {
                p.x >= 0.0 && p.x <= self.image_width && p.y >= 0.0 && p.y <= self.image_height
            }
            None => false,
        }
    }

    /// Fit the image inside the surface with a margin on every side and
    /// center it. Never scales above 100%.
    pub fn fit_to_surface(&mut self, margin: f32) {
        if !self.has_image() {
            return;
        }
        let avail_w = (self.surface_width - 2.0 * margin).max(1.0);
        let avail_h = (self.surface_height - 2.0 * margin).max(1.0);
        let fit = (avail_w / self.image_width)
            .min(avail_h / self.image_height)
            .min(1.0);
        self.scale = fit.clamp(self.min_scale, self.max_scale);
        self.center();
        log::debug!("Fit to surface: scale {:.4}", self.scale);
    }

    /// Set the scale and re-center the image (no anchor preservation).
    ///
    /// Changes below [`zoom::EPSILON`] are no-ops to avoid redundant
    /// recomputation and jitter.
    pub fn set_scale_centered(&mut self, new_scale: f32) {
        let new_scale = new_scale.clamp(self.min_scale, self.max_scale);
        if (new_scale - self.scale).abs() < zoom::EPSILON {
            return;
        }
        self.scale = new_scale;
        self.center();
        log::debug!("Zoom (centered): {:.2}x", self.scale);
    }

    /// Set the scale while keeping the image point under `anchor` fixed on
    /// the surface, then constrain the position.
    ///
    /// The algorithm:
    /// 1. Find the image-space point under the anchor
    /// 2. After scaling, solve for the offset that puts it back under the
    ///    anchor
    pub fn set_scale_around_point(&mut self, new_scale: f32, anchor: Point) {
        let new_scale = new_scale.clamp(self.min_scale, self.max_scale);
        if (new_scale - self.scale).abs() < zoom::EPSILON {
            return;
        }
        let img_x = (anchor.x - self.offset_x) / self.scale;
        let img_y = (anchor.y - self.offset_y) / self.scale;
        self.scale = new_scale;
        self.offset_x = anchor.x - img_x * new_scale;
        self.offset_y = anchor.y - img_y * new_scale;
        self.constrain_position();
        log::debug!(
            "Zoom-to-point: {:.2}x at ({:.1}, {:.1})",
            self.scale,
            anchor.x,
            anchor.y
        );
    }

    /// Apply a pan delta directly to the offset. No constraint is applied
    /// mid-gesture; call [`ViewportTransform::constrain_position`] on
    /// release.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Clamp the offset so the image stays reasonably on-screen.
    ///
    /// When the displayed image fits an axis, the offset may deviate from
    /// the centered position by at most [`pan::CENTER_SLACK`]. When it
    /// overflows, at least `min(200, 0.3 * display_size)` of the image must
    /// remain visible on that axis.
    pub fn constrain_position(&mut self) {
        if !self.has_image() {
            return;
        }
        let display_w = self.image_width * self.scale;
        let display_h = self.image_height * self.scale;
        self.offset_x = constrain_axis(self.offset_x, display_w, self.surface_width);
        self.offset_y = constrain_axis(self.offset_y, display_h, self.surface_height);
    }

    /// Zoom in one step around the surface center.
    pub fn zoom_in(&mut self) {
        let center = self.surface_center();
        self.set_scale_around_point(self.scale * zoom::FACTOR, center);
    }

    /// Zoom out one step around the surface center.
    pub fn zoom_out(&mut self) {
        let center = self.surface_center();
        self.set_scale_around_point(self.scale / zoom::FACTOR, center);
    }

    pub fn can_zoom_in(&self) -> bool {
        self.scale < self.max_scale
    }

    pub fn can_zoom_out(&self) -> bool {
        self.scale > self.min_scale
    }

    /// Snapshot the current state for the renderer.
    pub fn state(&self) -> ViewportState {
        ViewportState {
            scale: self.scale,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
            min_scale: self.min_scale,
            max_scale: self.max_scale,
            image_width: self.image_width,
            image_height: self.image_height,
            surface_width: self.surface_width,
            surface_height: self.surface_height,
        }
    }

    fn surface_center(&self) -> Point {
        Point::new(self.surface_width / 2.0, self.surface_height / 2.0)
    }

    fn center(&mut self) {
        self.offset_x = (self.surface_width - self.image_width * self.scale) / 2.0;
        self.offset_y = (self.surface_height - self.image_height * self.scale) / 2.0;
    }
}

/// Constrain one axis of the offset. See
/// [`ViewportTransform::constrain_position`].
fn constrain_axis(offset: f32, display: f32, surface: f32) -> f32 {
    if display <= surface {
        let centered = (surface - display) / 2.0;
        offset.clamp(centered - pan::CENTER_SLACK, centered + pan::CENTER_SLACK)
    } else {
        let min_visible = pan::MIN_VISIBLE.min(pan::MIN_VISIBLE_FRACTION * display);
        offset.clamp(min_visible - display, surface - min_visible)
    }
}
