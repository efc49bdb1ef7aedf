//! Pointer (native drag) modality.
//!
//! The surface decides where a drop lands and hands the adapter the delivered
//! target; the adapter only turns the drag-start/over/drop sequence into drag
//! signals. The fragment is drawn under the cursor, so the pick-up offset is zero.

use tracing::trace;

use crate::core::DragSignal;
use crate::types::{DropTarget, FragmentId, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    DragStart { fragment: FragmentId, at: Point },
    DragOver { at: Point },
    /// `delivered` is the drop target the surface resolved under the cursor.
    Drop { delivered: Option<DropTarget> },
}

#[derive(Debug, Clone, Default)]
pub struct PointerAdapter {
    dragging: Option<FragmentId>,
}

impl PointerAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dragging(&self) -> Option<FragmentId> {
        self.dragging
    }

    pub fn handle(&mut self, event: PointerEvent) -> Option<DragSignal> {
        match event {
            PointerEvent::DragStart { fragment, at } => {
                trace!(fragment, x = at.x, y = at.y, "pointer drag start");
                self.dragging = Some(fragment);
                Some(DragSignal::PickUp {
                    fragment,
                    pointer: at,
                    offset: Point::default(),
                })
            }
            PointerEvent::DragOver { at } => {
                self.dragging?;
                Some(DragSignal::Move { pointer: at })
            }
            PointerEvent::Drop { delivered } => {
                self.dragging.take()?;
                Some(DragSignal::Release { target: delivered })
            }
        }
    }
}
