//! Pointer/keyboard interaction state machine.
//!
//! The controller translates raw input events into mutations of the
//! viewport transform and the selection store. It is the only mutator of
//! either during a session; every handler runs synchronously to
//! completion, and a move event is interpreted relative to the last
//! sample point recorded by the gesture in progress.

use crate::constants::{fit, handle as handle_const, selection as limits, zoom};
use crate::error::CropError;
use crate::event::{Key, Modifiers, PointerButton};
use crate::geometry::{Point, Rect};
use crate::selection::SelectionStore;
use crate::viewport::ViewportTransform;

/// Interaction mode gating which gestures are reachable from `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Pointer-down pans the viewport.
    Pan,
    /// Pointer-down draws, drags, or resizes selections.
    #[default]
    Select,
}

/// One of the eight resize handles on the active selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
    North,
    South,
    East,
    West,
}

impl Handle {
    /// Probe order for hit-testing; corners first so they win over the
    /// edge midpoints they touch.
    pub const ALL: [Handle; 8] = [
        Handle::NorthWest,
        Handle::NorthEast,
        Handle::SouthWest,
        Handle::SouthEast,
        Handle::North,
        Handle::South,
        Handle::East,
        Handle::West,
    ];

    /// The handle's anchor point on a rectangle.
    pub fn point_on(self, rect: Rect) -> Point {
        let cx = rect.x + rect.width / 2.0;
        let cy = rect.y + rect.height / 2.0;
        match self {
            Handle::NorthWest => Point::new(rect.x, rect.y),
            Handle::NorthEast => Point::new(rect.x + rect.width, rect.y),
            Handle::SouthWest => Point::new(rect.x, rect.y + rect.height),
            Handle::SouthEast => Point::new(rect.x + rect.width, rect.y + rect.height),
            Handle::North => Point::new(cx, rect.y),
            Handle::South => Point::new(cx, rect.y + rect.height),
            Handle::East => Point::new(rect.x + rect.width, cy),
            Handle::West => Point::new(rect.x, cy),
        }
    }

    fn moves_left_edge(self) -> bool {
        matches!(self, Handle::NorthWest | Handle::SouthWest | Handle::West)
    }

    fn moves_right_edge(self) -> bool {
        matches!(self, Handle::NorthEast | Handle::SouthEast | Handle::East)
    }

    fn moves_top_edge(self) -> bool {
        matches!(self, Handle::NorthWest | Handle::NorthEast | Handle::North)
    }

    fn moves_bottom_edge(self) -> bool {
        matches!(self, Handle::SouthWest | Handle::SouthEast | Handle::South)
    }
}

/// The gesture currently in progress. Gesture-scoped data lives in the
/// variant, so leaving a state drops its snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Panning the viewport; `last` is the previous surface sample.
    Panning { last: Point },
    /// Drawing a new selection; both points are in image space.
    Drawing { start: Point, current: Point },
    /// Dragging a selection; `last` is the previous surface sample.
    Dragging { id: u32, last: Point },
    /// Resizing the active selection against its pre-gesture bounds.
    Resizing {
        id: u32,
        handle: Handle,
        /// Image-space point where the gesture started.
        start: Point,
        /// Bounds at gesture start.
        original: Rect,
    },
}

/// The interaction state machine.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    state: InteractionState,
    mode: Mode,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, InteractionState::Idle)
    }

    /// The provisional rectangle of an in-progress draw gesture, for the
    /// renderer. Not yet committed to the store.
    pub fn preview_rect(&self) -> Option<Rect> {
        match self.state {
            InteractionState::Drawing { start, current } => {
                Some(Rect::from_corners(start, current))
            }
            _ => None,
        }
    }

    /// Switch interaction mode, cancelling any gesture in progress.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.cancel_current_operation();
            self.mode = mode;
            log::debug!("Mode: {mode:?}");
        }
    }

    /// Toggle between pan and select mode.
    pub fn toggle_mode(&mut self) {
        let next = match self.mode {
            Mode::Pan => Mode::Select,
            Mode::Select => Mode::Pan,
        };
        self.set_mode(next);
    }

    /// Reset all transient gesture state unconditionally.
    ///
    /// The single recovery path for interrupted gestures; called on mode
    /// switch, `Escape`, and image load/reset. Callable from any state and
    /// never fails.
    pub fn cancel_current_operation(&mut self) {
        if !self.is_idle() {
            log::debug!("Cancelled gesture: {:?}", self.state);
        }
        self.state = InteractionState::Idle;
    }

    /// Handle pointer-down. Only the primary button starts gestures.
    pub fn pointer_down(
        &mut self,
        point: Point,
        button: PointerButton,
        viewport: &mut ViewportTransform,
        store: &mut SelectionStore,
    ) {
        if button != PointerButton::Primary || !viewport.has_image() {
            return;
        }

        if self.mode == Mode::Pan {
            self.state = InteractionState::Panning { last: point };
            log::debug!("Pan started at ({:.1}, {:.1})", point.x, point.y);
            return;
        }

        // Resize beats drag beats draw.
        if let Some(active) = store.active() {
            let surface_rect = selection_surface_rect(active.rect(), viewport);
            if let Some(handle) = handle_at(point, surface_rect) {
                // The guard above ensures the inverse map exists
                let Some(start) = viewport.to_image_space(point) else {
                    return;
                };
                self.state = InteractionState::Resizing {
                    id: active.id,
                    handle,
                    start,
                    original: active.rect(),
                };
                log::debug!("Resize started on selection {} via {handle:?}", active.id);
                return;
            }
        }

        let Some(image_point) = viewport.to_image_space(point) else {
            return;
        };

        // Topmost first: last-created wins ties
        if let Some(hit) = store
            .all()
            .iter()
            .rev()
            .find(|s| s.rect().contains(image_point))
        {
            let id = hit.id;
            store.set_active(id);
            self.state = InteractionState::Dragging { id, last: point };
            log::debug!("Drag started on selection {id}");
            return;
        }

        if viewport.is_point_in_image(point) {
            store.clear_active();
            self.state = InteractionState::Drawing {
                start: image_point,
                current: image_point,
            };
            log::debug!(
                "Draw started at ({:.1}, {:.1})",
                image_point.x,
                image_point.y
            );
        }
        // Outside the image: remain Idle
    }

    /// Handle pointer-move relative to the last sample of the gesture.
    pub fn pointer_move(
        &mut self,
        point: Point,
        viewport: &mut ViewportTransform,
        store: &mut SelectionStore,
    ) {
        match self.state {
            InteractionState::Idle => {}
            InteractionState::Panning { last } => {
                viewport.pan(point.x - last.x, point.y - last.y);
                self.state = InteractionState::Panning { last: point };
            }
            InteractionState::Drawing { start, .. } => {
                if let Some(current) = viewport.to_image_space(point) {
                    self.state = InteractionState::Drawing { start, current };
                }
            }
            InteractionState::Dragging { id, last } => {
                let scale = viewport.scale();
                let dx = (point.x - last.x) / scale;
                let dy = (point.y - last.y) / scale;
                let (img_w, img_h) = viewport.image_size();
                if let Some(sel) = store.all().iter().find(|s| s.id == id) {
                    let moved = sel.rect().translated_within(dx, dy, img_w, img_h);
                    store.set_bounds(id, moved);
                }
                self.state = InteractionState::Dragging { id, last: point };
            }
            InteractionState::Resizing {
                id,
                handle,
                start,
                original,
            } => {
                let Some(current) = viewport.to_image_space(point) else {
                    return;
                };
                let (img_w, img_h) = viewport.image_size();
                let delta = Point::new(current.x - start.x, current.y - start.y);
                let resized = resize_rect(original, handle, delta, img_w, img_h);
                store.set_bounds(id, resized);
            }
        }
    }

    /// Handle pointer-up: commit or finish the gesture and return to
    /// `Idle`.
    pub fn pointer_up(&mut self, viewport: &mut ViewportTransform, store: &mut SelectionStore) {
        match self.state {
            InteractionState::Idle => {}
            InteractionState::Panning { .. } => {
                viewport.constrain_position();
            }
            InteractionState::Drawing { start, current } => {
                self.commit_draw(start, current, viewport, store);
            }
            InteractionState::Dragging { .. } | InteractionState::Resizing { .. } => {}
        }
        self.state = InteractionState::Idle;
    }

    /// Handle a wheel event: one zoom step per notch, anchored at the
    /// cursor.
    pub fn wheel(&mut self, delta: f32, point: Point, viewport: &mut ViewportTransform) {
        if !viewport.has_image() || delta == 0.0 {
            return;
        }
        let new_scale = if delta > 0.0 {
            viewport.scale() * zoom::FACTOR
        } else {
            viewport.scale() / zoom::FACTOR
        };
        viewport.set_scale_around_point(new_scale, point);
    }

    /// Handle a key press.
    pub fn key_down(
        &mut self,
        key: Key,
        modifiers: Modifiers,
        viewport: &mut ViewportTransform,
        store: &mut SelectionStore,
    ) {
        if !viewport.has_image() {
            return;
        }
        match key {
            Key::Escape => {
                self.cancel_current_operation();
                store.clear_active();
            }
            Key::Tab => {
                store.cycle_active(modifiers.shift);
            }
            Key::Delete | Key::Backspace => {
                if let Some(id) = store.active_id() {
                    store.delete(id);
                }
            }
            Key::Space => {
                self.toggle_mode();
            }
            Key::Plus if modifiers.command => {
                viewport.zoom_in();
            }
            Key::Minus if modifiers.command => {
                viewport.zoom_out();
            }
            Key::Key0 if modifiers.command => {
                viewport.fit_to_surface(fit::MARGIN);
            }
            Key::Key1 if modifiers.command => {
                viewport.set_scale_centered(1.0);
            }
            _ => {}
        }
    }

    /// Commit a finished draw gesture if it is large enough, both as drawn
    /// and after clamping to the image bounds. Undersized gestures are
    /// discarded silently.
    fn commit_draw(
        &self,
        start: Point,
        current: Point,
        viewport: &ViewportTransform,
        store: &mut SelectionStore,
    ) {
        let raw = Rect::from_corners(start, current);
        if raw.width <= limits::DRAW_MIN_RAW || raw.height <= limits::DRAW_MIN_RAW {
            log::debug!(
                "Draw gesture discarded: {:.1}x{:.1} raw",
                raw.width,
                raw.height
            );
            return;
        }
        let (img_w, img_h) = viewport.image_size();
        let clamped = raw.clamped_to(img_w, img_h);
        if clamped.width <= limits::DRAW_MIN_CLAMPED || clamped.height <= limits::DRAW_MIN_CLAMPED {
            log::debug!(
                "Draw gesture discarded: {:.1}x{:.1} after clamping",
                clamped.width,
                clamped.height
            );
            return;
        }
        match store.create(clamped.top_left(), clamped.bottom_right()) {
            Ok(_) => {}
            Err(CropError::TooSmall { width, height, .. }) => {
                log::debug!("Draw gesture discarded by store: {width:.1}x{height:.1}");
            }
            Err(err) => {
                log::warn!("Unexpected create failure: {err}");
            }
        }
    }
}

/// Map a selection's image-space bounds to surface space.
fn selection_surface_rect(rect: Rect, viewport: &ViewportTransform) -> Rect {
    let tl = viewport.to_surface_space(rect.top_left());
    let br = viewport.to_surface_space(rect.bottom_right());
    Rect::from_corners(tl, br)
}

/// Hit-test the eight handles of a surface-space rectangle. The first
/// handle within tolerance on both axes wins.
fn handle_at(point: Point, surface_rect: Rect) -> Option<Handle> {
    Handle::ALL.into_iter().find(|h| {
        let hp = h.point_on(surface_rect);
        (point.x - hp.x).abs() <= handle_const::TOLERANCE
            && (point.y - hp.y).abs() <= handle_const::TOLERANCE
    })
}

/// Apply handle-specific edge arithmetic to the pre-gesture bounds.
///
/// Each handle moves only its own edges; the opposite edges stay at their
/// pre-gesture positions. When a dimension would drop below the minimum
/// floor, the moving edge is pulled back so the opposite edge stays pinned
/// and the dimension clamps to the floor. The result is clamped to the
/// image bounds.
fn resize_rect(original: Rect, handle: Handle, delta: Point, img_w: f32, img_h: f32) -> Rect {
    let mut x0 = original.x;
    let mut x1 = original.x + original.width;
    let mut y0 = original.y;
    let mut y1 = original.y + original.height;

    if handle.moves_left_edge() {
        x0 = (original.x + delta.x).min(x1 - limits::MIN_SIZE);
    }
    if handle.moves_right_edge() {
        x1 = (original.x + original.width + delta.x).max(x0 + limits::MIN_SIZE);
    }
    if handle.moves_top_edge() {
        y0 = (original.y + delta.y).min(y1 - limits::MIN_SIZE);
    }
    if handle.moves_bottom_edge() {
        y1 = (original.y + original.height + delta.y).max(y0 + limits::MIN_SIZE);
    }

    x0 = x0.clamp(0.0, img_w);
    x1 = x1.clamp(0.0, img_w);
    y0 = y0.clamp(0.0, img_h);
    y1 = y1.clamp(0.0, img_h);

    Rect::new(x0, y0, (x1 - x0).max(0.0), (y1 - y0).max(0.0))
}
