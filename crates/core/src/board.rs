//! Slot board - ordered drop targets for the current question.
//!
//! Every fragment of the question is either in exactly one slot or in the pool.
//! The pool is kept in fragment index order, so placing a fragment and
//! returning it restores the previous board exactly.

use crate::error::BoardError;
use crate::question::Question;
use crate::types::{FragmentId, SlotPosition};

/// Where a fragment currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentLocation {
    Pool,
    Slot(SlotPosition),
}

/// Result of a successful placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub slot: SlotPosition,
    /// The fragment came from another slot rather than the pool.
    pub moved_from: Option<SlotPosition>,
    /// Every slot is now filled.
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlotBoard {
    slots: Vec<Option<FragmentId>>,
    pool: Vec<FragmentId>,
    fragment_count: usize,
}

impl SlotBoard {
    /// Empty slots with every fragment in the pool.
    pub fn new(slot_count: usize, fragment_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count],
            pool: (0..fragment_count).collect(),
            fragment_count,
        }
    }

    pub fn for_question(question: &Question) -> Self {
        Self::new(question.slot_count, question.fragments.len())
    }

    /// Rebuild for `question`, discarding prior state.
    pub fn reset(&mut self, question: &Question) {
        *self = Self::for_question(question);
    }

    /// Send every slotted fragment back to the pool, keeping the slot count.
    pub fn clear_to_pool(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
        self.pool = (0..self.fragment_count).collect();
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn fragment_count(&self) -> usize {
        self.fragment_count
    }

    pub fn slots(&self) -> &[Option<FragmentId>] {
        &self.slots
    }

    pub fn pool(&self) -> &[FragmentId] {
        &self.pool
    }

    pub fn location(&self, fragment: FragmentId) -> Option<FragmentLocation> {
        if fragment >= self.fragment_count {
            return None;
        }
        match self.slot_of(fragment) {
            Some(pos) => Some(FragmentLocation::Slot(pos)),
            None => Some(FragmentLocation::Pool),
        }
    }

    fn slot_of(&self, fragment: FragmentId) -> Option<SlotPosition> {
        self.slots.iter().position(|s| *s == Some(fragment))
    }

    /// Move `fragment` into the slot at `position`.
    ///
    /// Dropping a fragment back onto the slot it already occupies is accepted
    /// and changes nothing.
    pub fn place_in_slot(
        &mut self,
        position: SlotPosition,
        fragment: FragmentId,
    ) -> Result<Placement, BoardError> {
        if fragment >= self.fragment_count {
            return Err(BoardError::UnknownFragment(fragment));
        }
        let occupant = *self
            .slots
            .get(position)
            .ok_or(BoardError::SlotOutOfRange {
                position,
                count: self.slots.len(),
            })?;

        match occupant {
            Some(f) if f == fragment => {
                return Ok(Placement {
                    slot: position,
                    moved_from: None,
                    complete: self.is_complete(),
                })
            }
            Some(_) => return Err(BoardError::SlotOccupied(position)),
            None => {}
        }

        let moved_from = self.slot_of(fragment);
        match moved_from {
            Some(prev) => self.slots[prev] = None,
            None => self.pool.retain(|&f| f != fragment),
        }
        self.slots[position] = Some(fragment);

        Ok(Placement {
            slot: position,
            moved_from,
            complete: self.is_complete(),
        })
    }

    /// Take `fragment` out of any slot and put it in the pool. Idempotent.
    pub fn return_to_pool(&mut self, fragment: FragmentId) {
        if fragment >= self.fragment_count {
            return;
        }
        if let Some(pos) = self.slot_of(fragment) {
            self.slots[pos] = None;
        }
        if let Err(at) = self.pool.binary_search(&fragment) {
            self.pool.insert(at, fragment);
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.slots.is_empty() && self.slots.iter().all(Option::is_some)
    }

    /// Fragment index per slot in position order; `None` marks an empty slot.
    pub fn current_order(&self) -> Vec<Option<FragmentId>> {
        self.slots.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board3() -> SlotBoard {
        SlotBoard::for_question(&Question::new("q", ["a", "b", "c"], vec![2, 0, 1]))
    }

    #[test]
    fn test_new_board_all_in_pool() {
        let board = board3();
        assert_eq!(board.slots(), &[None, None, None]);
        assert_eq!(board.pool(), &[0, 1, 2]);
        assert!(!board.is_complete());
    }

    #[test]
    fn test_place_moves_out_of_pool() {
        let mut board = board3();
        let p = board.place_in_slot(1, 2).unwrap();
        assert_eq!(p.slot, 1);
        assert_eq!(p.moved_from, None);
        assert!(!p.complete);
        assert_eq!(board.slots(), &[None, Some(2), None]);
        assert_eq!(board.pool(), &[0, 1]);
        assert_eq!(board.location(2), Some(FragmentLocation::Slot(1)));
    }

    #[test]
    fn test_place_into_occupied_slot_fails() {
        let mut board = board3();
        board.place_in_slot(0, 1).unwrap();
        assert_eq!(board.place_in_slot(0, 2), Err(BoardError::SlotOccupied(0)));
        assert_eq!(board.pool(), &[0, 2]);
    }

    #[test]
    fn test_place_same_fragment_on_own_slot_is_noop() {
        let mut board = board3();
        board.place_in_slot(0, 1).unwrap();
        let before = board.clone();
        assert!(board.place_in_slot(0, 1).is_ok());
        assert_eq!(board, before);
    }

    #[test]
    fn test_place_moves_between_slots() {
        let mut board = board3();
        board.place_in_slot(0, 1).unwrap();
        let p = board.place_in_slot(2, 1).unwrap();
        assert_eq!(p.moved_from, Some(0));
        assert_eq!(board.slots(), &[None, None, Some(1)]);
        assert_eq!(board.pool(), &[0, 2]);
    }

    #[test]
    fn test_place_rejects_bad_indices() {
        let mut board = board3();
        assert_eq!(
            board.place_in_slot(3, 0),
            Err(BoardError::SlotOutOfRange {
                position: 3,
                count: 3
            })
        );
        assert_eq!(
            board.place_in_slot(0, 7),
            Err(BoardError::UnknownFragment(7))
        );
    }

    #[test]
    fn test_completion_and_order() {
        let mut board = board3();
        assert!(!board.place_in_slot(0, 2).unwrap().complete);
        assert!(!board.place_in_slot(1, 0).unwrap().complete);
        assert!(board.place_in_slot(2, 1).unwrap().complete);
        assert!(board.is_complete());
        assert_eq!(board.current_order(), vec![Some(2), Some(0), Some(1)]);
        assert!(board.pool().is_empty());
    }

    #[test]
    fn test_return_to_pool_round_trip() {
        let mut board = board3();
        board.place_in_slot(0, 2).unwrap();
        let before = board.clone();

        board.place_in_slot(2, 0).unwrap();
        board.return_to_pool(0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_return_to_pool_idempotent() {
        let mut board = board3();
        let before = board.clone();
        board.return_to_pool(1);
        board.return_to_pool(1);
        assert_eq!(board, before);
        board.return_to_pool(42);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_to_pool_keeps_slots() {
        let mut board = board3();
        board.place_in_slot(0, 0).unwrap();
        board.place_in_slot(1, 1).unwrap();
        board.clear_to_pool();
        assert_eq!(board.slot_count(), 3);
        assert_eq!(board.slots(), &[None, None, None]);
        assert_eq!(board.pool(), &[0, 1, 2]);
    }

    #[test]
    fn test_distractor_fragments_stay_in_pool() {
        let q = Question::new("q", ["a", "b", "c", "d"], vec![3, 1]);
        let mut board = SlotBoard::for_question(&q);
        board.place_in_slot(0, 3).unwrap();
        assert!(board.place_in_slot(1, 1).unwrap().complete);
        assert_eq!(board.pool(), &[0, 2]);
        assert_eq!(board.current_order().len(), q.slot_count);
    }

    #[test]
    fn test_reset_rebuilds_for_new_question() {
        let mut board = board3();
        board.place_in_slot(0, 0).unwrap();
        board.reset(&Question::new("next", ["x", "y"], vec![1, 0]));
        assert_eq!(board.slot_count(), 2);
        assert_eq!(board.pool(), &[0, 1]);
    }
}
