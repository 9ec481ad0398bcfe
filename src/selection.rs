//! Selection data model and store.
//!
//! Selections are rectangles in image space, kept in creation order with
//! contiguous display ids `1..=N`. Ids are positional labels, not stable
//! identities: every delete renumbers the remainder, so a stale id held
//! across a delete may point at a different selection or at nothing.
//! Collaborators that need durable data take snapshot copies (see
//! `crate::export`).

use serde::{Deserialize, Serialize};

use crate::constants::selection as limits;
use crate::error::CropError;
use crate::geometry::{Point, Rect};

/// A rectangular selection in image space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Display id; always the 1-based position in the store.
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// At most one selection in a store is active.
    pub active: bool,
}

impl Selection {
    /// The id formatted as the display label.
    pub fn label(&self) -> String {
        self.id.to_string()
    }

    /// The bounds as a [`Rect`].
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Partial bounds update; only the present fields are written.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundsPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl BoundsPatch {
    /// A patch that moves the selection without resizing it.
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// A patch replacing all four bounds fields.
    pub fn bounds(rect: Rect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.width),
            height: Some(rect.height),
        }
    }
}

/// Ordered storage for the selections on the current image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionStore {
    selections: Vec<Selection>,
    /// Currently active selection id, if any.
    #[serde(skip)]
    active_id: Option<u32>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selection from two corner points in image space.
    ///
    /// The corners are normalized; rectangles under
    /// [`limits::CREATE_MIN`] on either dimension are rejected. The new
    /// selection becomes the active one.
    pub fn create(&mut self, p1: Point, p2: Point) -> Result<&Selection, CropError> {
        let rect = Rect::from_corners(p1, p2);
        if rect.width < limits::CREATE_MIN || rect.height < limits::CREATE_MIN {
            return Err(CropError::TooSmall {
                width: rect.width,
                height: rect.height,
                min: limits::CREATE_MIN,
            });
        }

        let id = self.selections.len() as u32 + 1;
        for s in &mut self.selections {
            s.active = false;
        }
        self.selections.push(Selection {
            id,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            active: true,
        });
        self.active_id = Some(id);
        log::info!(
            "Created selection {} at ({:.1}, {:.1}) {:.1}x{:.1}",
            id,
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
        Ok(self.selections.last().expect("just pushed"))
    }

    /// Merge a partial bounds update into the matching selection.
    ///
    /// Unknown ids are silent no-ops: renumbering can legitimately
    /// invalidate ids held across a delete. Minimum size is not
    /// revalidated here; drag/resize callers pre-clamp.
    pub fn update(&mut self, id: u32, patch: BoundsPatch) {
        let Some(sel) = self.selections.iter_mut().find(|s| s.id == id) else {
            log::debug!("Update for missing selection {id} ignored");
            return;
        };
        if let Some(x) = patch.x {
            sel.x = x;
        }
        if let Some(y) = patch.y {
            sel.y = y;
        }
        if let Some(width) = patch.width {
            sel.width = width;
        }
        if let Some(height) = patch.height {
            sel.height = height;
        }
    }

    /// Replace a selection's bounds wholesale.
    pub fn set_bounds(&mut self, id: u32, rect: Rect) {
        self.update(id, BoundsPatch::bounds(rect));
    }

    /// Delete a selection and renumber the remainder to `1..=N`.
    ///
    /// If the deleted selection was active, the active pointer is cleared;
    /// otherwise the active reference follows its selection through the
    /// renumbering. Unknown ids are silent no-ops.
    pub fn delete(&mut self, id: u32) {
        let Some(index) = self.selections.iter().position(|s| s.id == id) else {
            log::debug!("Delete for missing selection {id} ignored");
            return;
        };
        self.selections.remove(index);
        if self.active_id == Some(id) {
            self.active_id = None;
        }
        self.renumber();
        log::info!("Deleted selection {id}, {} remain", self.selections.len());
    }

    /// Mark the given selection active, deactivating any other.
    pub fn set_active(&mut self, id: u32) {
        if !self.selections.iter().any(|s| s.id == id) {
            return;
        }
        for s in &mut self.selections {
            s.active = s.id == id;
        }
        self.active_id = Some(id);
    }

    /// Clear the active selection, if any.
    pub fn clear_active(&mut self) {
        for s in &mut self.selections {
            s.active = false;
        }
        self.active_id = None;
    }

    /// The active selection, if any.
    pub fn active(&self) -> Option<&Selection> {
        self.active_id
            .and_then(|id| self.selections.iter().find(|s| s.id == id))
    }

    /// The active selection id, if any.
    pub fn active_id(&self) -> Option<u32> {
        self.active_id
    }

    /// All selections in creation order.
    pub fn all(&self) -> &[Selection] {
        &self.selections
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Cycle the active selection forward or backward through the store
    /// order, wrapping around. No-op on an empty store.
    pub fn cycle_active(&mut self, backward: bool) {
        if self.selections.is_empty() {
            return;
        }
        let count = self.selections.len();
        let current = self
            .active_id
            .and_then(|id| self.selections.iter().position(|s| s.id == id));
        let next = match (current, backward) {
            (Some(i), false) => (i + 1) % count,
            (Some(i), true) => (i + count - 1) % count,
            (None, false) => 0,
            (None, true) => count - 1,
        };
        let id = self.selections[next].id;
        self.set_active(id);
    }

    /// Clear everything; the next `create` restarts numbering at 1.
    pub fn reset(&mut self) {
        self.selections.clear();
        self.active_id = None;
    }

    /// Reassign ids to `1..=N` in the current order, remapping the active
    /// reference if its selection moved.
    fn renumber(&mut self) {
        let active_index = self
            .active_id
            .and_then(|id| self.selections.iter().position(|s| s.id == id));
        for (i, s) in self.selections.iter_mut().enumerate() {
            s.id = i as u32 + 1;
        }
        self.active_id = active_index.map(|i| self.selections[i].id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(store: &SelectionStore) -> Vec<u32> {
        store.all().iter().map(|s| s.id).collect()
    }

    fn active_count(store: &SelectionStore) -> usize {
        store.all().iter().filter(|s| s.active).count()
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut store = SelectionStore::new();
        store
            .create(Point::new(10.0, 10.0), Point::new(50.0, 50.0))
            .unwrap();
        store
            .create(Point::new(60.0, 60.0), Point::new(100.0, 100.0))
            .unwrap();
        assert_eq!(ids(&store), vec![1, 2]);
        assert_eq!(store.all()[0].label(), "1");
    }

    #[test]
    fn test_create_rejects_degenerate() {
        let mut store = SelectionStore::new();
        let err = store
            .create(Point::new(10.0, 10.0), Point::new(10.5, 50.0))
            .unwrap_err();
        assert!(matches!(err, CropError::TooSmall { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_new_selection_becomes_active() {
        let mut store = SelectionStore::new();
        store
            .create(Point::new(0.0, 0.0), Point::new(10.0, 10.0))
            .unwrap();
        store
            .create(Point::new(20.0, 20.0), Point::new(40.0, 40.0))
            .unwrap();
        assert_eq!(store.active_id(), Some(2));
        assert_eq!(active_count(&store), 1);
    }

    #[test]
    fn test_delete_renumbers_and_remaps_active() {
        // Three selections, delete 2: remainder renumbers to 1..=2 and the
        // active reference follows its rectangle
        let mut store = SelectionStore::new();
        store
            .create(Point::new(10.0, 10.0), Point::new(50.0, 50.0))
            .unwrap();
        store
            .create(Point::new(60.0, 60.0), Point::new(100.0, 100.0))
            .unwrap();
        store
            .create(Point::new(110.0, 110.0), Point::new(150.0, 150.0))
            .unwrap();
        assert_eq!(ids(&store), vec![1, 2, 3]);
        assert_eq!(store.active_id(), Some(3));

        store.delete(2);
        assert_eq!(ids(&store), vec![1, 2]);
        // The same rectangle is still active under its new id
        assert_eq!(store.active_id(), Some(2));
        let active = store.active().unwrap();
        assert_eq!(active.x, 110.0);

        let created = store
            .create(Point::new(0.0, 0.0), Point::new(20.0, 20.0))
            .unwrap();
        assert_eq!(created.id, 3);
    }

    #[test]
    fn test_delete_active_clears_pointer() {
        let mut store = SelectionStore::new();
        store
            .create(Point::new(0.0, 0.0), Point::new(10.0, 10.0))
            .unwrap();
        store.delete(1);
        assert!(store.active().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut store = SelectionStore::new();
        store
            .create(Point::new(0.0, 0.0), Point::new(10.0, 10.0))
            .unwrap();
        store.delete(99);
        assert_eq!(ids(&store), vec![1]);
    }

    #[test]
    fn test_update_merges_fields() {
        let mut store = SelectionStore::new();
        store
            .create(Point::new(0.0, 0.0), Point::new(10.0, 10.0))
            .unwrap();
        store.update(1, BoundsPatch::position(5.0, 7.0));
        let s = &store.all()[0];
        assert_eq!((s.x, s.y), (5.0, 7.0));
        assert_eq!((s.width, s.height), (10.0, 10.0));

        // Unknown id: no-op
        store.update(42, BoundsPatch::position(0.0, 0.0));
        assert_eq!(store.all()[0].x, 5.0);
    }

    #[test]
    fn test_single_active_invariant() {
        let mut store = SelectionStore::new();
        for i in 0..5 {
            let base = i as f32 * 20.0;
            store
                .create(Point::new(base, base), Point::new(base + 10.0, base + 10.0))
                .unwrap();
            assert_eq!(active_count(&store), 1);
        }
        store.set_active(2);
        assert_eq!(active_count(&store), 1);
        assert_eq!(store.active_id(), Some(2));
        store.clear_active();
        assert_eq!(active_count(&store), 0);
    }

    #[test]
    fn test_set_active_unknown_id_is_noop() {
        let mut store = SelectionStore::new();
        store
            .create(Point::new(0.0, 0.0), Point::new(10.0, 10.0))
            .unwrap();
        store.set_active(42);
        assert_eq!(store.active_id(), Some(1));
    }

    #[test]
    fn test_cycle_active_wraps() {
        let mut store = SelectionStore::new();
        for i in 0..3 {
            let base = i as f32 * 20.0;
            store
                .create(Point::new(base, base), Point::new(base + 10.0, base + 10.0))
                .unwrap();
        }
        assert_eq!(store.active_id(), Some(3));
        store.cycle_active(false);
        assert_eq!(store.active_id(), Some(1));
        store.cycle_active(true);
        assert_eq!(store.active_id(), Some(3));
        store.cycle_active(true);
        assert_eq!(store.active_id(), Some(2));
    }

    #[test]
    fn test_cycle_active_empty_store_is_noop() {
        let mut store = SelectionStore::new();
        store.cycle_active(false);
        assert!(store.active().is_none());
    }

    #[test]
    fn test_reset_restarts_numbering() {
        let mut store = SelectionStore::new();
        store
            .create(Point::new(0.0, 0.0), Point::new(10.0, 10.0))
            .unwrap();
        store
            .create(Point::new(20.0, 20.0), Point::new(40.0, 40.0))
            .unwrap();
        store.reset();
        assert!(store.is_empty());
        let s = store
            .create(Point::new(0.0, 0.0), Point::new(10.0, 10.0))
            .unwrap();
        assert_eq!(s.id, 1);
    }

    #[test]
    fn test_id_contiguity_over_mixed_operations() {
        let mut store = SelectionStore::new();
        for i in 0..6 {
            let base = i as f32 * 30.0;
            store
                .create(Point::new(base, base), Point::new(base + 20.0, base + 20.0))
                .unwrap();
        }
        store.delete(1);
        store.delete(3);
        store
            .create(Point::new(200.0, 200.0), Point::new(240.0, 240.0))
            .unwrap();
        store.delete(2);

        let expected: Vec<u32> = (1..=store.len() as u32).collect();
        assert_eq!(ids(&store), expected);
    }
}
