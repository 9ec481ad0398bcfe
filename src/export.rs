//! Export handoff types.
//!
//! The session hands the export collaborator a snapshot copy of the
//! selection sequence. The ids and order match what is displayed at the
//! moment of the handoff; whatever the collaborator does afterward never
//! touches the store, and later renumbering never mutates exported data.

use serde::{Deserialize, Serialize};

use crate::error::CropError;
use crate::selection::Selection;
use crate::source::LoadedImage;

/// A single crop rectangle handed to the export collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    /// Display label at handoff time ("1", "2", ...). Positional, not a
    /// stable identity.
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CropRegion {
    /// Snapshot a selection.
    pub fn from_selection(selection: &Selection) -> Self {
        Self {
            label: selection.label(),
            x: selection.x,
            y: selection.y,
            width: selection.width,
            height: selection.height,
        }
    }
}

/// Serialize regions to pretty JSON, for collaborators that persist the
/// handoff.
pub fn regions_to_json(regions: &[CropRegion]) -> Result<String, CropError> {
    Ok(serde_json::to_string_pretty(regions)?)
}

/// The external cropping/export collaborator.
///
/// Receives a snapshot of the selection sequence plus the image handle.
/// Export success or failure has no effect on the session state.
pub trait CropExporter {
    fn export(&mut self, regions: &[CropRegion], image: &LoadedImage) -> Result<(), CropError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::selection::SelectionStore;

    #[test]
    fn test_region_snapshot_carries_label() {
        let mut store = SelectionStore::new();
        store
            .create(Point::new(10.0, 20.0), Point::new(40.0, 60.0))
            .unwrap();
        let region = CropRegion::from_selection(&store.all()[0]);
        assert_eq!(region.label, "1");
        assert_eq!((region.x, region.y), (10.0, 20.0));
        assert_eq!((region.width, region.height), (30.0, 40.0));
    }

    #[test]
    fn test_regions_to_json() {
        let regions = vec![CropRegion {
            label: "1".to_string(),
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        }];
        let json = regions_to_json(&regions).unwrap();
        assert!(json.contains("\"label\": \"1\""));
    }
}
