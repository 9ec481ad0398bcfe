//! Geometry primitives shared by the viewport and selection modules.
//!
//! `Point` and `Rect` are coordinate-system agnostic; whether a value is in
//! image space or surface space is a property of the call site.

use serde::{Deserialize, Serialize};

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner X coordinate
    pub x: f32,
    /// Top-left corner Y coordinate
    pub y: f32,
    /// Width of the rectangle
    pub width: f32,
    /// Height of the rectangle
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from two corner points, in any order.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let x = p1.x.min(p2.x);
        let y = p1.y.min(p2.y);
        let width = (p1.x - p2.x).abs();
        let height = (p1.y - p2.y).abs();
        Self { x, y, width, height }
    }

    /// Check if a point is inside the rectangle (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Get the top-left corner.
    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Get the bottom-right corner.
    pub fn bottom_right(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    /// Translate by a delta, keeping the size.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Intersect with the bounds `[0, width] x [0, height]`.
    ///
    /// The result may be degenerate (zero width or height) when the
    /// rectangle lies entirely outside the bounds.
    pub fn clamped_to(&self, width: f32, height: f32) -> Self {
        let x0 = self.x.clamp(0.0, width);
        let y0 = self.y.clamp(0.0, height);
        let x1 = (self.x + self.width).clamp(0.0, width);
        let y1 = (self.y + self.height).clamp(0.0, height);
        Self::new(x0, y0, (x1 - x0).max(0.0), (y1 - y0).max(0.0))
    }

    /// Translate and clamp the position so the rectangle stays fully inside
    /// `[0, width] x [0, height]`. The size never changes.
    pub fn translated_within(&self, dx: f32, dy: f32, width: f32, height: f32) -> Self {
        let x = (self.x + dx).clamp(0.0, (width - self.width).max(0.0));
        let y = (self.y + dy).clamp(0.0, (height - self.height).max(0.0));
        Self::new(x, y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes() {
        let r = Rect::from_corners(Point::new(50.0, 80.0), Point::new(10.0, 20.0));
        assert_eq!(r, Rect::new(10.0, 20.0, 40.0, 60.0));
    }

    #[test]
    fn test_contains_edges() {
        let r = Rect::new(10.0, 10.0, 100.0, 100.0);
        assert!(r.contains(Point::new(50.0, 50.0)));
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(110.0, 110.0)));
        assert!(!r.contains(Point::new(5.0, 50.0)));
    }

    #[test]
    fn test_clamped_to_bounds() {
        let r = Rect::new(-20.0, -20.0, 100.0, 100.0);
        let clamped = r.clamped_to(400.0, 300.0);
        assert_eq!(clamped, Rect::new(0.0, 0.0, 80.0, 80.0));
    }

    #[test]
    fn test_clamped_to_fully_outside() {
        let r = Rect::new(500.0, 500.0, 50.0, 50.0);
        let clamped = r.clamped_to(400.0, 300.0);
        assert_eq!(clamped.width, 0.0);
        assert_eq!(clamped.height, 0.0);
    }

    #[test]
    fn test_translated_within_clamps_at_origin() {
        let r = Rect::new(0.0, 0.0, 50.0, 50.0);
        let moved = r.translated_within(-100.0, -100.0, 400.0, 300.0);
        assert_eq!(moved, Rect::new(0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn test_translated_within_clamps_at_far_edge() {
        let r = Rect::new(300.0, 200.0, 50.0, 50.0);
        let moved = r.translated_within(500.0, 500.0, 400.0, 300.0);
        assert_eq!(moved, Rect::new(350.0, 250.0, 50.0, 50.0));
    }
}
