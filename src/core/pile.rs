//! Tableau columns and probe positions.
//!
//! ## TableauColumn
//!
//! One of the seven main columns: a count of face-down cards underneath an
//! ordered run of face-up cards. The face-down cards are never inspected
//! for identity — the model only learns one when it is flipped and the
//! recognizer is asked to observe it.
//!
//! The face-up run uses `im::Vector`, so cloning a whole `GameState` per
//! move stays cheap.
//!
//! ## TableauPosition
//!
//! The coordinates of one card slot within a column, as consumed by the
//! card recognizer: column index, how many face-down cards sit below, and
//! the index within the face-up run.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::Card;

/// One tableau column: face-down cards below an ordered face-up run.
///
/// The top of the column is the LAST element of the face-up run. Cards are
/// only ever appended to or removed from that end.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableauColumn {
    face_down: u8,
    cards: Vector<Card>,
}

impl TableauColumn {
    /// Create a column with the given face-down count and face-up run.
    ///
    /// No legality check is applied: a freshly dealt column is legal by
    /// definition, and test fixtures construct columns directly.
    #[must_use]
    pub fn new(face_down: u8, cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            face_down,
            cards: cards.into_iter().collect(),
        }
    }

    /// Number of face-down cards.
    #[must_use]
    pub fn face_down_count(&self) -> usize {
        self.face_down as usize
    }

    /// Number of face-up cards.
    #[must_use]
    pub fn face_up_count(&self) -> usize {
        self.cards.len()
    }

    /// Total cards in the column, hidden and visible.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.face_down_count() + self.face_up_count()
    }

    /// True when the column holds no cards at all.
    ///
    /// Only this state accepts a King: a column whose face-up run is empty
    /// but still has hidden cards is NOT empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.face_down == 0 && self.cards.is_empty()
    }

    /// The top face-up card, if any.
    #[must_use]
    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Iterate the face-up run, bottom to top.
    pub fn face_up(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }

    /// The run of `count` cards ending at the top, bottom-of-run first.
    ///
    /// Returns `None` when `count` is zero or exceeds the face-up run.
    #[must_use]
    pub fn top_run(&self, count: usize) -> Option<SmallVec<[Card; 13]>> {
        if count == 0 || count > self.cards.len() {
            return None;
        }
        Some(
            self.cards
                .iter()
                .skip(self.cards.len() - count)
                .copied()
                .collect(),
        )
    }

    /// Append a card to the top of the face-up run.
    pub(crate) fn push(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Append a whole run to the top, preserving order.
    pub(crate) fn push_run(&mut self, run: impl IntoIterator<Item = Card>) {
        for card in run {
            self.cards.push_back(card);
        }
    }

    /// Remove and return the top face-up card.
    pub(crate) fn pop(&mut self) -> Option<Card> {
        self.cards.pop_back()
    }

    /// Remove the top `count` cards, returning them bottom-of-run first.
    ///
    /// Callers validate `count` against the face-up run beforehand.
    pub(crate) fn take_top_run(&mut self, count: usize) -> SmallVec<[Card; 13]> {
        debug_assert!(count >= 1 && count <= self.cards.len());
        let keep = self.cards.len() - count;
        let run = self.cards.iter().skip(keep).copied().collect();
        self.cards.truncate(keep);
        run
    }

    /// Flip one hidden card face-up with the identity the recognizer saw.
    ///
    /// Callers ensure the face-up run is empty and hidden cards remain.
    pub(crate) fn reveal(&mut self, card: Card) {
        debug_assert!(self.cards.is_empty() && self.face_down > 0);
        self.face_down -= 1;
        self.cards.push_back(card);
    }
}

/// The probe coordinates of one face-up card slot within a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableauPosition {
    /// Column index, 0..7.
    pub column: u8,
    /// Face-down cards below the face-up run at probe time.
    pub num_hidden: u8,
    /// Index within the face-up run, 0 = bottom of the run.
    pub index: u8,
}

impl TableauPosition {
    /// Create a probe position.
    #[must_use]
    pub const fn new(column: u8, num_hidden: u8, index: u8) -> Self {
        Self {
            column,
            num_hidden,
            index,
        }
    }
}

impl std::fmt::Display for TableauPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "column {} (hidden {}, index {})",
            self.column, self.num_hidden, self.index
        )
    }
}
