//! The aggregate game snapshot.
//!
//! ## GameState
//!
//! Seven tableau columns, four foundation slots, the stock/waste counters,
//! and the visible waste-pile top. A `GameState` is an immutable snapshot:
//! every move operation takes a state and returns a NEW state, never
//! mutating its input. Cloning is cheap because the tableau runs are
//! persistent vectors.
//!
//! ## What the model knows
//!
//! The model only ever stores what has been observed. Face-down tableau
//! cards and undrawn stock cards are counts, not identities; a foundation
//! slot stores its top card only (the top's face value IS the pile size,
//! since foundations grow by exactly one rank at a time).

use serde::{Deserialize, Serialize};

use super::card::{Card, Rank};
use super::pile::TableauColumn;

/// Number of tableau columns.
pub const TABLEAU_COLUMNS: usize = 7;

/// Number of foundation slots.
pub const FOUNDATION_SLOTS: usize = 4;

/// Stock size after the canonical deal: 52 − 28 dealt to the tableau.
pub const INITIAL_STOCK: u32 = 24;

/// One immutable snapshot of the whole table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    tableau: [TableauColumn; TABLEAU_COLUMNS],
    foundations: [Option<Card>; FOUNDATION_SLOTS],
    /// Cards not yet drawn in the current pass through the stock.
    stock_size: u32,
    /// Cards still circulating through the stock/waste cycle. Set at deal
    /// time, decremented only when a waste card leaves for the tableau or
    /// a foundation.
    remaining_size: u32,
    waste_top: Option<Card>,
}

impl GameState {
    /// Construct the canonical Klondike deal from the seven observed
    /// upturned cards.
    ///
    /// Column `i` gets `i` face-down cards plus `upturned[i]` face-up; all
    /// foundations are empty; the stock holds the remaining 24 cards. No
    /// legality check — a fresh deal is legal by definition.
    #[must_use]
    pub fn with_deal(upturned: [Card; TABLEAU_COLUMNS]) -> Self {
        let tableau = std::array::from_fn(|i| TableauColumn::new(i as u8, [upturned[i]]));

        Self {
            tableau,
            foundations: [None; FOUNDATION_SLOTS],
            stock_size: INITIAL_STOCK,
            remaining_size: INITIAL_STOCK,
            waste_top: None,
        }
    }

    // === Read access ===

    /// All tableau columns, left to right.
    #[must_use]
    pub fn columns(&self) -> &[TableauColumn] {
        &self.tableau
    }

    /// One tableau column.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 7`. Move operations validate indices before
    /// touching the state, so they never reach this panic.
    #[must_use]
    pub fn column(&self, index: usize) -> &TableauColumn {
        &self.tableau[index]
    }

    /// The top card of one foundation slot, `None` when the slot is empty.
    #[must_use]
    pub fn foundation(&self, slot: usize) -> Option<Card> {
        self.foundations[slot]
    }

    /// All four foundation slots.
    #[must_use]
    pub fn foundations(&self) -> &[Option<Card>; FOUNDATION_SLOTS] {
        &self.foundations
    }

    /// Cards not yet drawn in the current pass through the stock.
    #[must_use]
    pub fn stock_size(&self) -> u32 {
        self.stock_size
    }

    /// Cards still circulating through the stock/waste cycle.
    #[must_use]
    pub fn remaining_size(&self) -> u32 {
        self.remaining_size
    }

    /// Cards currently sitting in the waste pile.
    #[must_use]
    pub fn waste_size(&self) -> u32 {
        self.remaining_size - self.stock_size
    }

    /// The visible card at the top of the waste pile, if any.
    #[must_use]
    pub fn waste_top(&self) -> Option<Card> {
        self.waste_top
    }

    // === Derived facts ===

    /// Cards a foundation slot holds: the top card's face value.
    #[must_use]
    pub fn foundation_count(&self, slot: usize) -> u32 {
        self.foundations[slot].map_or(0, |card| u32::from(card.rank.value()))
    }

    /// Total cards on the table: tableau + foundations + stock/waste cycle.
    ///
    /// Invariant: 52 for every state reachable by legal moves from a deal.
    #[must_use]
    pub fn card_count(&self) -> u32 {
        let tableau: u32 = self.tableau.iter().map(|c| c.card_count() as u32).sum();
        let foundations: u32 = (0..FOUNDATION_SLOTS)
            .map(|slot| self.foundation_count(slot))
            .sum();
        tableau + foundations + self.remaining_size
    }

    /// True when every foundation has reached its King.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.foundations
            .iter()
            .all(|slot| slot.is_some_and(|card| card.rank == Rank::King))
    }

    // === Narrow mutation, for the move executor ===

    pub(crate) fn column_mut(&mut self, index: usize) -> &mut TableauColumn {
        &mut self.tableau[index]
    }

    pub(crate) fn set_foundation(&mut self, slot: usize, card: Card) {
        self.foundations[slot] = Some(card);
    }

    pub(crate) fn set_waste_top(&mut self, card: Option<Card>) {
        self.waste_top = card;
    }

    /// One card drawn: stock shrinks, the drawn card becomes the waste top.
    pub(crate) fn record_draw(&mut self, card: Card) {
        debug_assert!(self.stock_size > 0);
        self.stock_size -= 1;
        self.waste_top = Some(card);
    }

    /// Stock reset: the whole cycle is face-down again, waste empty.
    pub(crate) fn record_reset(&mut self) {
        debug_assert_eq!(self.stock_size, 0);
        self.stock_size = self.remaining_size;
        self.waste_top = None;
    }

    /// One waste card consumed by the tableau or a foundation.
    ///
    /// Returns true when the waste pile is now empty (every card drawn
    /// since the last reset has been consumed) — the caller must otherwise
    /// re-observe the newly exposed waste top.
    pub(crate) fn record_waste_consumed(&mut self) -> bool {
        debug_assert!(self.remaining_size > self.stock_size);
        self.remaining_size -= 1;
        if self.stock_size == self.remaining_size {
            self.waste_top = None;
            true
        } else {
            false
        }
    }
}
