//! Tuning constants for the interaction core.
//!
//! This module centralizes all hardcoded values for zoom limits, pan
//! constraints, selection minimums, and hit-test tolerances.

/// Zoom constants.
pub mod zoom {
    /// Zoom increment/decrement factor
    pub const FACTOR: f32 = 1.2;
    /// Maximum zoom level
    pub const MAX: f32 = 10.0;
    /// Minimum zoom level
    pub const MIN: f32 = 0.1;
    /// Minimum scale change to trigger an update
    pub const EPSILON: f32 = 0.001;
}

/// Pan position-constraint constants.
pub mod pan {
    /// Allowed deviation from the centered position when the displayed
    /// image fits inside the surface on an axis (surface units)
    pub const CENTER_SLACK: f32 = 100.0;
    /// Upper bound on the visible-portion requirement for oversized images
    pub const MIN_VISIBLE: f32 = 200.0;
    /// Fraction of the displayed size that must stay visible when the
    /// image overflows the surface on an axis
    pub const MIN_VISIBLE_FRACTION: f32 = 0.3;
}

/// Selection size constants (image units).
pub mod selection {
    /// Minimum width/height accepted by the store at creation
    pub const CREATE_MIN: f32 = 1.0;
    /// Resize floor; shrinking below this pins the opposite edge
    pub const MIN_SIZE: f32 = 10.0;
    /// A draw gesture commits only if the raw rectangle exceeds this
    pub const DRAW_MIN_RAW: f32 = 10.0;
    /// ...and the image-clamped rectangle exceeds this
    pub const DRAW_MIN_CLAMPED: f32 = 5.0;
}

/// Handle hit-test constants.
pub mod handle {
    /// Hit tolerance around each handle point, in surface pixels.
    /// Independent of zoom level.
    pub const TOLERANCE: f32 = 8.0;
}

/// Fit-to-surface constants.
pub mod fit {
    /// Default margin kept around the image when fitting (surface units)
    pub const MARGIN: f32 = 20.0;
}
