//! Drag controller - one pick-up/move/release protocol for every input modality.
//!
//! Input adapters translate raw pointer or touch events into [`DragSignal`]s;
//! the controller owns the single held [`DragSession`] and resolves a release
//! against the [`SlotBoard`].

use tracing::debug;

use crate::board::SlotBoard;
use crate::types::{DropTarget, FragmentId, Point, SlotPosition};

/// Modality-independent drag input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSignal {
    /// `offset` is the pointer position relative to the fragment's top-left.
    PickUp {
        fragment: FragmentId,
        pointer: Point,
        offset: Point,
    },
    Move { pointer: Point },
    /// `None` means nothing droppable was under the release point.
    Release { target: Option<DropTarget> },
}

/// The fragment currently held. Exists only between pick-up and release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub fragment: FragmentId,
    pub pointer_offset: Point,
    /// Where the fragment's top-left is drawn (`pointer - pointer_offset`).
    pub translation: Point,
}

/// How a release was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Placed {
        fragment: FragmentId,
        slot: SlotPosition,
        complete: bool,
    },
    Returned { fragment: FragmentId },
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    held: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> Option<&DragSession> {
        self.held.as_ref()
    }

    /// Hold `fragment`. Any session already held is overwritten.
    pub fn pick_up(&mut self, fragment: FragmentId, pointer: Point, offset: Point) -> DragSession {
        let session = DragSession {
            fragment,
            pointer_offset: offset,
            translation: pointer - offset,
        };
        self.held = Some(session);
        session
    }

    /// Track the pointer; returns the updated session.
    pub fn move_to(&mut self, pointer: Point) -> Option<DragSession> {
        let session = self.held.as_mut()?;
        session.translation = pointer - session.pointer_offset;
        Some(*session)
    }

    /// End the drag, placing into an empty slot or returning to the pool.
    pub fn release(
        &mut self,
        target: Option<DropTarget>,
        board: &mut SlotBoard,
    ) -> Option<DropOutcome> {
        let session = self.held.take()?;
        let fragment = session.fragment;

        if let Some(DropTarget::Slot(slot)) = target {
            match board.place_in_slot(slot, fragment) {
                Ok(placement) => {
                    return Some(DropOutcome::Placed {
                        fragment,
                        slot,
                        complete: placement.complete,
                    })
                }
                Err(err) => debug!(fragment, %err, "drop rejected"),
            }
        }

        board.return_to_pool(fragment);
        Some(DropOutcome::Returned { fragment })
    }

    /// Drop the held session without touching the board.
    pub fn cancel(&mut self) -> Option<DragSession> {
        self.held.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> SlotBoard {
        SlotBoard::new(2, 3)
    }

    #[test]
    fn test_pick_up_tracks_offset() {
        let mut drag = DragController::new();
        let s = drag.pick_up(1, Point::new(12, 5), Point::new(2, 0));
        assert_eq!(s.translation, Point::new(10, 5));

        let s = drag.move_to(Point::new(20, 8)).unwrap();
        assert_eq!(s.translation, Point::new(18, 8));
        assert_eq!(drag.held().unwrap().fragment, 1);
    }

    #[test]
    fn test_move_without_hold_is_noop() {
        let mut drag = DragController::new();
        assert_eq!(drag.move_to(Point::new(1, 1)), None);
        assert_eq!(drag.release(Some(DropTarget::Slot(0)), &mut board()), None);
    }

    #[test]
    fn test_release_on_empty_slot_places() {
        let mut drag = DragController::new();
        let mut b = board();
        drag.pick_up(2, Point::default(), Point::default());
        let out = drag.release(Some(DropTarget::Slot(1)), &mut b);
        assert_eq!(
            out,
            Some(DropOutcome::Placed {
                fragment: 2,
                slot: 1,
                complete: false
            })
        );
        assert_eq!(b.slots(), &[None, Some(2)]);
        assert!(drag.held().is_none());
    }

    #[test]
    fn test_release_on_occupied_slot_returns_to_pool() {
        let mut drag = DragController::new();
        let mut b = board();
        b.place_in_slot(0, 0).unwrap();
        b.place_in_slot(1, 1).unwrap();

        drag.pick_up(1, Point::default(), Point::default());
        let out = drag.release(Some(DropTarget::Slot(0)), &mut b);
        assert_eq!(out, Some(DropOutcome::Returned { fragment: 1 }));
        assert_eq!(b.slots(), &[Some(0), None]);
        assert_eq!(b.pool(), &[1, 2]);
    }

    #[test]
    fn test_release_elsewhere_returns_to_pool() {
        let mut drag = DragController::new();
        let mut b = board();
        b.place_in_slot(0, 2).unwrap();

        drag.pick_up(2, Point::default(), Point::default());
        assert_eq!(
            drag.release(None, &mut b),
            Some(DropOutcome::Returned { fragment: 2 })
        );
        assert_eq!(b.pool(), &[0, 1, 2]);

        drag.pick_up(0, Point::default(), Point::default());
        assert_eq!(
            drag.release(Some(DropTarget::Pool), &mut b),
            Some(DropOutcome::Returned { fragment: 0 })
        );
        assert_eq!(b.pool(), &[0, 1, 2]);
    }

    #[test]
    fn test_second_pick_up_overwrites() {
        let mut drag = DragController::new();
        drag.pick_up(0, Point::default(), Point::default());
        drag.pick_up(1, Point::new(3, 3), Point::default());
        assert_eq!(drag.held().unwrap().fragment, 1);
        assert_eq!(drag.cancel().map(|s| s.fragment), Some(1));
        assert!(drag.held().is_none());
    }
}
