//! Image source adapter.
//!
//! The core only needs dimensions; the decoded raster is an opaque handle
//! passed through to the renderer and export collaborators.

use std::path::Path;

use image::DynamicImage;

use crate::error::CropError;

/// Anything that can stand in for a loaded image.
pub trait ImageSource {
    /// Image width in image-space pixels, immutable per loaded image.
    fn width(&self) -> u32;
    /// Image height in image-space pixels, immutable per loaded image.
    fn height(&self) -> u32;
}

/// A decoded raster image.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    raster: DynamicImage,
}

impl LoadedImage {
    /// Wrap an already-decoded raster. Zero-dimension rasters are rejected
    /// before the viewport transform ever sees them.
    pub fn new(raster: DynamicImage) -> Result<Self, CropError> {
        if raster.width() == 0 || raster.height() == 0 {
            return Err(CropError::InvalidDimensions {
                width: raster.width(),
                height: raster.height(),
            });
        }
        Ok(Self { raster })
    }

    /// Decode an image file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CropError> {
        let path = path.as_ref();
        let raster = image::open(path)?;
        log::trace!(
            "Loaded {}x{} image from {:?}",
            raster.width(),
            raster.height(),
            path
        );
        Self::new(raster)
    }

    /// Decode an image from an in-memory byte buffer.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CropError> {
        let raster = image::load_from_memory(data)?;
        Self::new(raster)
    }

    /// The decoded raster, for the renderer and export collaborators.
    pub fn raster(&self) -> &DynamicImage {
        &self.raster
    }
}

impl ImageSource for LoadedImage {
    fn width(&self) -> u32 {
        self.raster.width()
    }

    fn height(&self) -> u32 {
        self.raster.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_dimensions() {
        let raster = DynamicImage::new_rgba8(0, 10);
        let err = LoadedImage::new(raster).unwrap_err();
        assert!(matches!(
            err,
            CropError::InvalidDimensions {
                width: 0,
                height: 10
            }
        ));
    }

    #[test]
    fn test_dimensions_pass_through() {
        let img = LoadedImage::new(DynamicImage::new_rgba8(640, 480)).unwrap();
        assert_eq!(img.width(), 640);
        assert_eq!(img.height(), 480);
    }

    #[test]
    fn test_from_bytes_decodes_png() {
        // Encode a tiny PNG, then decode it back through the adapter
        let mut buf = std::io::Cursor::new(Vec::new());
        DynamicImage::new_rgba8(4, 3)
            .write_to(&mut buf, image::ImageFormat::Png)
            .unwrap();
        let img = LoadedImage::from_bytes(buf.get_ref()).unwrap();
        assert_eq!((img.width(), img.height()), (4, 3));
    }
}
