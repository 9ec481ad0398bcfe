//! Error types for the crop-selection core.

use thiserror::Error;

/// Errors that can occur in the crop-selection core and its loader seam.
///
/// Interaction handlers never propagate `TooSmall`, `NotFound`, or
/// `NoImage` to the caller; they degrade to no-ops. The variants exist so
/// the store and loader seams can report precisely what was rejected.
#[derive(Error, Debug)]
pub enum CropError {
    /// Selection creation would produce a rectangle under the minimum size
    #[error("selection too small: {width:.1}x{height:.1} (minimum {min:.1})")]
    TooSmall {
        /// Requested width
        width: f32,
        /// Requested height
        height: f32,
        /// Minimum accepted dimension
        min: f32,
    },

    /// Referenced selection id is not present in the store
    #[error("selection not found: {id}")]
    NotFound {
        /// The stale id
        id: u32,
    },

    /// An operation requiring image-space math ran with no image loaded
    #[error("no image loaded")]
    NoImage,

    /// Decoded image has a zero dimension
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Decoded width
        width: u32,
        /// Decoded height
        height: u32,
    },

    /// Image decoding failed (includes I/O failures while reading)
    #[error("decode error: {0}")]
    Decode(#[from] image::ImageError),

    /// JSON serialization of an export snapshot failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
