//! Hit-testing seam between input adapters and whatever lays out the screen.

use crate::types::{DropTarget, FragmentId, Point, QuizIntent, Rect, SlotPosition};

/// Something the player can click that is not part of the drag protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Intent(QuizIntent),
    /// Answer to the pending confirmation prompt
    Confirm(bool),
    /// Leave the program
    Exit,
}

/// A laid-out element on the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Fragment(FragmentId),
    Slot(SlotPosition),
    /// The fragment source area
    Pool,
    Control(Command),
}

pub trait HitTest {
    /// Topmost element at `p`. `transparent` is skipped, the way a held
    /// fragment lets events pass through to whatever lies beneath it.
    fn element_at(&self, p: Point, transparent: Option<FragmentId>) -> Option<Element>;

    /// Bounding box of a fragment as currently laid out.
    fn fragment_rect(&self, fragment: FragmentId) -> Option<Rect>;

    /// Slot currently holding `fragment`.
    fn slot_of(&self, fragment: FragmentId) -> Option<SlotPosition>;

    /// Resolve where `held` would land if released at `p`.
    ///
    /// A fragment resolves to the slot that contains it, or to the pool.
    fn drop_target_at(&self, p: Point, held: FragmentId) -> Option<DropTarget> {
        match self.element_at(p, Some(held))? {
            Element::Slot(pos) => Some(DropTarget::Slot(pos)),
            Element::Fragment(f) => Some(
                self.slot_of(f)
                    .map(DropTarget::Slot)
                    .unwrap_or(DropTarget::Pool),
            ),
            Element::Pool => Some(DropTarget::Pool),
            Element::Control(_) => None,
        }
    }

    /// The control under `p`, if any.
    fn control_at(&self, p: Point) -> Option<Command> {
        match self.element_at(p, None)? {
            Element::Control(cmd) => Some(cmd),
            _ => None,
        }
    }
}

/// Paint-ordered list of element rectangles; the last match is on top.
///
/// Small enough for tests and hosts that do not need anything fancier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Regions {
    items: Vec<(Rect, Element)>,
    slot_occupants: Vec<Option<FragmentId>>,
}

impl Regions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rect: Rect, element: Element) {
        self.items.push((rect, element));
    }

    /// Record which fragment sits in each slot.
    pub fn set_slot_occupants(&mut self, occupants: &[Option<FragmentId>]) {
        self.slot_occupants = occupants.to_vec();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.slot_occupants.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Rect, Element)> {
        self.items.iter()
    }

    pub fn rect_of(&self, element: Element) -> Option<Rect> {
        self.items
            .iter()
            .rev()
            .find(|(_, e)| *e == element)
            .map(|(r, _)| *r)
    }
}

impl HitTest for Regions {
    fn element_at(&self, p: Point, transparent: Option<FragmentId>) -> Option<Element> {
        self.items
            .iter()
            .rev()
            .filter(|(_, e)| match (e, transparent) {
                (Element::Fragment(f), Some(t)) => *f != t,
                _ => true,
            })
            .find(|(r, _)| r.contains(p))
            .map(|(_, e)| *e)
    }

    fn fragment_rect(&self, fragment: FragmentId) -> Option<Rect> {
        self.rect_of(Element::Fragment(fragment))
    }

    fn slot_of(&self, fragment: FragmentId) -> Option<SlotPosition> {
        self.slot_occupants
            .iter()
            .position(|s| *s == Some(fragment))
    }
}
