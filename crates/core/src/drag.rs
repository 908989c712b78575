//! Drag-and-drop gesture state machine.
//!
//! Independent of any input device API: callers feed pointer positions and
//! drop targets, and get a [`MoveIntent`] back when a drag completes on a
//! different cell.
//!
//! ```text
//! Idle --pointer_down--> Pressed --move past threshold--> Dragging
//! Pressed --release/cancel--> Idle                 (click, no move)
//! Dragging --release(Some(target))--> Idle + MoveIntent
//! Dragging --release(None)/cancel--> Idle          (no mutation)
//! ```

use crate::grid::CellKey;
use crate::moves::MoveIntent;
use crate::types::EntityId;

/// Distance in pixels the pointer must travel before a press becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD_PX: f64 = 8.0;

/// A pointer position in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    /// Pointer is down on a card but has not moved far enough.
    Pressed {
        card_id: EntityId,
        source: CellKey,
        origin: Point,
    },
    Dragging {
        card_id: EntityId,
        source: CellKey,
    },
}

/// Tracks one drag gesture at a time.
#[derive(Debug, Clone)]
pub struct DragTracker {
    state: DragState,
    threshold: f64,
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD_PX)
    }
}

impl DragTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            state: DragState::Idle,
            threshold,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// The card being dragged, once the threshold has been exceeded.
    pub fn dragging(&self) -> Option<EntityId> {
        match self.state {
            DragState::Dragging { card_id, .. } => Some(card_id),
            _ => None,
        }
    }

    /// Pointer pressed on a card. Ignored unless idle.
    pub fn pointer_down(&mut self, card_id: EntityId, source: CellKey, at: Point) {
        if self.state == DragState::Idle {
            self.state = DragState::Pressed {
                card_id,
                source,
                origin: at,
            };
        }
    }

    /// Pointer moved. Returns `true` if this move started the drag.
    pub fn pointer_move(&mut self, at: Point) -> bool {
        if let DragState::Pressed {
            card_id,
            source,
            origin,
        } = self.state
        {
            if origin.distance_to(at) > self.threshold {
                self.state = DragState::Dragging { card_id, source };
                return true;
            }
        }
        false
    }

    /// Pointer released over `target` (or over nothing droppable).
    ///
    /// Always returns to idle. Yields an intent only for a real drag that
    /// ends on a cell other than the source.
    pub fn release(&mut self, target: Option<CellKey>) -> Option<MoveIntent> {
        let state = std::mem::replace(&mut self.state, DragState::Idle);
        match (state, target) {
            (DragState::Dragging { card_id, source }, Some(to)) if to != source => {
                Some(MoveIntent {
                    card_id,
                    from: source,
                    to,
                })
            }
            _ => None,
        }
    }

    /// Abort the gesture (e.g. Escape, pointer lost).
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u128) -> EntityId {
        EntityId::from_u128(n)
    }

    fn cell(c: u128, h: u128) -> CellKey {
        CellKey::new(id(c), id(h))
    }

    fn pressed_tracker() -> DragTracker {
        let mut tracker = DragTracker::default();
        tracker.pointer_down(id(5), cell(1, 1), Point::new(0.0, 0.0));
        tracker
    }

    #[test]
    fn small_moves_do_not_start_drag() {
        let mut tracker = pressed_tracker();
        assert!(!tracker.pointer_move(Point::new(5.0, 5.0)));
        assert!(!tracker.pointer_move(Point::new(8.0, 0.0)));
        assert_eq!(tracker.dragging(), None);
    }

    #[test]
    fn passing_threshold_starts_drag() {
        let mut tracker = pressed_tracker();
        assert!(tracker.pointer_move(Point::new(6.0, 6.0)));
        assert_eq!(tracker.dragging(), Some(id(5)));
        assert!(!tracker.pointer_move(Point::new(50.0, 50.0)));
    }

    #[test]
    fn drop_on_other_cell_emits_intent() {
        let mut tracker = pressed_tracker();
        tracker.pointer_move(Point::new(20.0, 0.0));
        let intent = tracker.release(Some(cell(2, 1))).unwrap();
        assert_eq!(intent.card_id, id(5));
        assert_eq!(intent.from, cell(1, 1));
        assert_eq!(intent.to, cell(2, 1));
        assert_eq!(tracker.state(), DragState::Idle);
    }

    #[test]
    fn drop_outside_or_on_source_emits_nothing() {
        let mut tracker = pressed_tracker();
        tracker.pointer_move(Point::new(20.0, 0.0));
        assert!(tracker.release(None).is_none());
        assert_eq!(tracker.state(), DragState::Idle);

        let mut tracker = pressed_tracker();
        tracker.pointer_move(Point::new(20.0, 0.0));
        assert!(tracker.release(Some(cell(1, 1))).is_none());
    }

    #[test]
    fn click_without_drag_emits_nothing() {
        let mut tracker = pressed_tracker();
        assert!(tracker.release(Some(cell(2, 2))).is_none());
        assert_eq!(tracker.state(), DragState::Idle);
    }

    #[test]
    fn second_press_during_gesture_is_ignored() {
        let mut tracker = pressed_tracker();
        tracker.pointer_down(id(6), cell(2, 2), Point::new(0.0, 0.0));
        tracker.pointer_move(Point::new(30.0, 0.0));
        assert_eq!(tracker.dragging(), Some(id(5)));
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut tracker = pressed_tracker();
        tracker.pointer_move(Point::new(30.0, 0.0));
        tracker.cancel();
        assert_eq!(tracker.state(), DragState::Idle);
        assert!(tracker.release(Some(cell(2, 2))).is_none());
    }
}
