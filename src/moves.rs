//! The move catalogue and pure move enumeration.
//!
//! `Move` names every operation the executor can perform, with its
//! parameters. `legal_moves` enumerates the moves whose preconditions hold
//! for a snapshot — pure, no I/O — so an external driver can plan before
//! touching the window.

use serde::{Deserialize, Serialize};

use crate::core::state::{GameState, FOUNDATION_SLOTS, TABLEAU_COLUMNS};
use crate::rules;

/// One move, with its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Turn one card from the stock onto the waste pile.
    Draw,
    /// Turn the exhausted stock face-down again.
    ResetStock,
    /// Move the visible waste-pile top onto a tableau column.
    WasteToTableau { column: usize },
    /// Promote the visible waste-pile top to a foundation slot.
    WasteToFoundation { slot: usize },
    /// Promote the top card of a tableau column to a foundation slot.
    TableauToFoundation { column: usize, slot: usize },
    /// Move the run of `count` cards ending at the top of `from` onto `to`.
    ColumnToColumn {
        from: usize,
        count: usize,
        to: usize,
    },
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Draw => write!(f, "draw"),
            Move::ResetStock => write!(f, "reset stock"),
            Move::WasteToTableau { column } => write!(f, "waste -> column {column}"),
            Move::WasteToFoundation { slot } => write!(f, "waste -> foundation {slot}"),
            Move::TableauToFoundation { column, slot } => {
                write!(f, "column {column} -> foundation {slot}")
            }
            Move::ColumnToColumn { from, count, to } => {
                write!(f, "{count} cards, column {from} -> column {to}")
            }
        }
    }
}

/// Every move whose precondition holds for `state`.
///
/// Enumeration mirrors the executor's own checks exactly; it applies no
/// strategy filtering beyond legality.
#[must_use]
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    let mut moves = Vec::new();

    if state.stock_size() > 0 {
        moves.push(Move::Draw);
    } else {
        moves.push(Move::ResetStock);
    }

    if let Some(waste) = state.waste_top() {
        for column in 0..TABLEAU_COLUMNS {
            if rules::tableau_accepts(state.column(column), waste) {
                moves.push(Move::WasteToTableau { column });
            }
        }
        for slot in 0..FOUNDATION_SLOTS {
            if rules::foundation_accepts(state.foundation(slot), waste) {
                moves.push(Move::WasteToFoundation { slot });
            }
        }
    }

    for column in 0..TABLEAU_COLUMNS {
        if let Some(top) = state.column(column).top() {
            for slot in 0..FOUNDATION_SLOTS {
                if rules::foundation_accepts(state.foundation(slot), top) {
                    moves.push(Move::TableauToFoundation { column, slot });
                }
            }
        }
    }

    for from in 0..TABLEAU_COLUMNS {
        let source = state.column(from);
        for count in 1..=source.face_up_count() {
            let Some(run) = source.top_run(count) else {
                continue;
            };
            if !rules::is_valid_run(&run) {
                // Longer runs only extend this one downward; they cannot
                // become valid again.
                break;
            }
            for to in 0..TABLEAU_COLUMNS {
                if to != from && rules::tableau_accepts(state.column(to), run[0]) {
                    moves.push(Move::ColumnToColumn { from, count, to });
                }
            }
        }
    }

    moves
}
