//! Terminal mouse events routed through the configured drag modality.
//!
//! A terminal has one pointing device, so both modalities are driven by the
//! same left-button press/drag/release sequence; they differ in how the
//! pick-up offset is taken and who resolves the drop target.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::core::DragSignal;
use crate::hit::{Element, HitTest};
use crate::pointer::{PointerAdapter, PointerEvent};
use crate::touch::{TouchAdapter, TouchEvent, TouchPhase};
use crate::types::{DropTarget, FragmentId, InputModality, Point};

/// Cell coordinates of a mouse event.
pub fn mouse_point(mouse: &MouseEvent) -> Point {
    Point::new(i32::from(mouse.column), i32::from(mouse.row))
}

/// Translate a mouse event for the pointer modality.
///
/// The pointer surface is what resolves the drop, so the hit test happens here.
pub fn pointer_event(
    mouse: &MouseEvent,
    dragging: Option<FragmentId>,
    surface: &impl HitTest,
) -> Option<PointerEvent> {
    let at = mouse_point(mouse);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match surface.element_at(at, None)? {
            Element::Fragment(fragment) => Some(PointerEvent::DragStart { fragment, at }),
            _ => None,
        },
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerEvent::DragOver { at }),
        MouseEventKind::Up(MouseButton::Left) => {
            let delivered = dragging.and_then(|held| surface.drop_target_at(at, held));
            Some(PointerEvent::Drop { delivered })
        }
        _ => None,
    }
}

/// Translate a mouse event for the touch modality.
pub fn touch_event(mouse: &MouseEvent) -> Option<TouchEvent> {
    let phase = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => TouchPhase::Start,
        MouseEventKind::Drag(MouseButton::Left) => TouchPhase::Move,
        MouseEventKind::Up(MouseButton::Left) => TouchPhase::End,
        _ => return None,
    };
    Some(TouchEvent::new(phase, mouse_point(mouse)))
}

/// Drag input for whichever modality was chosen at startup.
#[derive(Debug, Clone, Default)]
pub struct DragInput {
    modality: InputModality,
    pointer: PointerAdapter,
    touch: TouchAdapter,
}

impl DragInput {
    pub fn new(modality: InputModality) -> Self {
        Self {
            modality,
            ..Self::default()
        }
    }

    pub fn modality(&self) -> InputModality {
        self.modality
    }

    /// Fragment currently held by this input, if any.
    pub fn held(&self) -> Option<FragmentId> {
        match self.modality {
            InputModality::Pointer => self.pointer.dragging(),
            InputModality::Touch => self.touch.held(),
        }
    }

    pub fn handle_mouse(&mut self, mouse: &MouseEvent, surface: &impl HitTest) -> Option<DragSignal> {
        match self.modality {
            InputModality::Pointer => {
                let event = pointer_event(mouse, self.pointer.dragging(), surface)?;
                self.pointer.handle(event)
            }
            InputModality::Touch => {
                let event = touch_event(mouse)?;
                self.touch.handle(event, surface)
            }
        }
    }

    /// Abort the held drag; the fragment goes back to the pool.
    pub fn cancel(&mut self, surface: &impl HitTest) -> Option<DragSignal> {
        match self.modality {
            InputModality::Pointer => self.pointer.handle(PointerEvent::Drop {
                delivered: Some(DropTarget::Pool),
            }),
            InputModality::Touch => self
                .touch
                .handle(TouchEvent::new(TouchPhase::Cancel, Point::default()), surface),
        }
    }

    /// Forget a drag the quiz has already ended on its own.
    pub fn reset(&mut self) {
        self.pointer = PointerAdapter::new();
        self.touch = TouchAdapter::new();
    }
}
