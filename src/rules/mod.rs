//! The legality engine: pure predicates over snapshot values.
//!
//! These predicates are the single source of truth for move validity.
//! Every move operation in `crate::session` consults the matching
//! predicate BEFORE performing any physical action, and fails atomically
//! when it returns false.
//!
//! All functions here are side-effect-free and touch no I/O.

use crate::core::card::{Card, Rank};
use crate::core::pile::TableauColumn;

/// Can `card` land on top of `column`?
///
/// True when the column is truly empty (no hidden cards, no face-up run)
/// and the card is a King, or when the column's top face-up card is
/// exactly one rank above `card` with the opposite color.
///
/// A column whose face-up run is empty but still holds hidden cards
/// accepts nothing: it is not empty for the King rule, and it has no top
/// card to stack on.
#[must_use]
pub fn tableau_accepts(column: &TableauColumn, card: Card) -> bool {
    match column.top() {
        None => column.is_empty() && card.rank == Rank::King,
        Some(top) => top.rank.is_one_above(card.rank) && top.color() != card.color(),
    }
}

/// Can `card` be promoted onto a foundation slot currently topped by
/// `slot`?
///
/// True when the slot is empty and the card is an Ace, or when the slot's
/// card has the SAME suit and sits exactly one rank below `card`. A
/// foundation only ever accepts ascending consecutive ranks of one suit.
#[must_use]
pub fn foundation_accepts(slot: Option<Card>, card: Card) -> bool {
    match slot {
        None => card.rank == Rank::Ace,
        Some(top) => top.suit == card.suit && card.rank.is_one_above(top.rank),
    }
}

/// Is `run` a legal movable unit?
///
/// The run is given bottom-of-run first. Every adjacent pair must descend
/// by exactly one rank toward the top with alternating color. A single
/// card is always a legal run.
#[must_use]
pub fn is_valid_run(run: &[Card]) -> bool {
    run.windows(2)
        .all(|pair| pair[0].rank.is_one_above(pair[1].rank) && pair[0].color() != pair[1].color())
}
