//! Touch modality.
//!
//! Pick-up records where the finger landed inside the fragment so the fragment
//! tracks the finger without snapping. Release hit-tests the final finger
//! position itself; anything that is not a slot sends the fragment home.

use tracing::trace;

use crate::core::DragSignal;
use crate::hit::{Element, HitTest};
use crate::types::{DropTarget, FragmentId, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub at: Point,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, at: Point) -> Self {
        Self { phase, at }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TouchAdapter {
    held: Option<FragmentId>,
}

impl TouchAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> Option<FragmentId> {
        self.held
    }

    pub fn handle(&mut self, event: TouchEvent, surface: &impl HitTest) -> Option<DragSignal> {
        match event.phase {
            TouchPhase::Start => {
                let Some(Element::Fragment(fragment)) = surface.element_at(event.at, None) else {
                    return None;
                };
                let rect = surface.fragment_rect(fragment)?;
                let offset = event.at - rect.origin();
                trace!(fragment, dx = offset.x, dy = offset.y, "touch pick-up");
                self.held = Some(fragment);
                Some(DragSignal::PickUp {
                    fragment,
                    pointer: event.at,
                    offset,
                })
            }
            TouchPhase::Move => {
                self.held?;
                Some(DragSignal::Move { pointer: event.at })
            }
            TouchPhase::End => {
                let fragment = self.held.take()?;
                let target = match surface.drop_target_at(event.at, fragment) {
                    Some(DropTarget::Slot(pos)) => DropTarget::Slot(pos),
                    _ => DropTarget::Pool,
                };
                Some(DragSignal::Release {
                    target: Some(target),
                })
            }
            TouchPhase::Cancel => {
                self.held.take()?;
                Some(DragSignal::Release {
                    target: Some(DropTarget::Pool),
                })
            }
        }
    }
}
