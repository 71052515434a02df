//! The move executor: validate, gesture, observe, return a new snapshot.
//!
//! ## Session
//!
//! A `Session` owns the two collaborator handles — cursor automation and
//! card recognition — for the lifetime of one game. Every move operation
//! follows the same shape:
//!
//! 1. Check the precondition against the input snapshot, via the legality
//!    engine. On failure, return `IllegalMove` — no gesture has been
//!    issued and no state has changed.
//! 2. Perform the single click or drag the move maps to.
//! 3. Build the successor snapshot, asking the recognizer to observe any
//!    card the move newly exposed (the next waste top, a flipped tableau
//!    card).
//!
//! The input snapshot is never mutated; callers replace their current
//! state with the returned one on success.
//!
//! The session does not guard against two sessions driving the same
//! window — the collaborators are physically exclusive and it is the
//! external driver's job not to interleave them.

use log::debug;

use crate::core::card::{Card, Rank, Suit};
use crate::core::pile::TableauPosition;
use crate::core::state::{GameState, FOUNDATION_SLOTS, TABLEAU_COLUMNS};
use crate::driver::input::InputDriver;
use crate::driver::vision::CardRecognizer;
use crate::error::{IllegalMove, PilotError};
use crate::layout::TableLayout;
use crate::moves::Move;
use crate::rules;

/// One game session: collaborator handles plus the table geometry.
pub struct Session<I, R> {
    input: I,
    vision: R,
    layout: TableLayout,
}

impl<I, R> Session<I, R>
where
    I: InputDriver,
    R: CardRecognizer,
{
    /// Create a session with the default table layout.
    pub fn new(input: I, vision: R) -> Self {
        Self::with_layout(input, vision, TableLayout::default())
    }

    /// Create a session against a specific window layout.
    pub fn with_layout(input: I, vision: R, layout: TableLayout) -> Self {
        Self {
            input,
            vision,
            layout,
        }
    }

    /// The table geometry this session aims at.
    #[must_use]
    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    /// Tear the session down, returning the collaborator handles.
    pub fn into_parts(self) -> (I, R) {
        (self.input, self.vision)
    }

    /// Observe a freshly dealt table and build the initial snapshot.
    ///
    /// Seven recognition probes, one per column's upturned card. No
    /// legality checks: a fresh deal is legal by definition.
    pub fn deal(&mut self) -> Result<GameState, PilotError> {
        // Placeholder values, overwritten below by the seven probes.
        let mut upturned = [Card::new(Suit::Clubs, Rank::Ace); TABLEAU_COLUMNS];
        for (i, slot) in upturned.iter_mut().enumerate() {
            let pos = TableauPosition::new(i as u8, i as u8, 0);
            *slot = self.vision.recognize_tableau_card(pos)?;
        }

        let state = GameState::with_deal(upturned);
        debug!("dealt: {} in stock", state.stock_size());
        Ok(state)
    }

    /// Turn one card from the stock onto the waste pile.
    pub fn draw_from_stock(&mut self, state: &GameState) -> Result<GameState, PilotError> {
        if state.stock_size() == 0 {
            return Err(IllegalMove.into());
        }

        self.input.click(self.layout.stock_target());

        let mut next = state.clone();
        let card = self.vision.recognize_waste_card()?;
        next.record_draw(card);
        debug!("drew {card}, {} left in stock", next.stock_size());
        Ok(next)
    }

    /// Turn the exhausted stock face-down again.
    pub fn reset_stock(&mut self, state: &GameState) -> Result<GameState, PilotError> {
        if state.stock_size() != 0 {
            return Err(IllegalMove.into());
        }

        self.input.click(self.layout.stock_target());

        let mut next = state.clone();
        next.record_reset();
        debug!("reset stock to {}", next.stock_size());
        Ok(next)
    }

    /// Move the visible waste-pile top onto a tableau column.
    pub fn move_waste_to_tableau(
        &mut self,
        state: &GameState,
        column: usize,
    ) -> Result<GameState, PilotError> {
        if column >= TABLEAU_COLUMNS {
            return Err(IllegalMove.into());
        }
        let waste = state.waste_top().ok_or(IllegalMove)?;
        if !rules::tableau_accepts(state.column(column), waste) {
            return Err(IllegalMove.into());
        }

        let to = self.layout.column_drop_target(column, state.column(column));
        self.input.drag(self.layout.waste_target(), to);

        let mut next = state.clone();
        next.column_mut(column).push(waste);
        self.observe_next_waste(&mut next)?;
        debug!("{waste} from waste onto column {column}");
        Ok(next)
    }

    /// Promote the visible waste-pile top to a foundation slot.
    pub fn move_waste_to_foundation(
        &mut self,
        state: &GameState,
        slot: usize,
    ) -> Result<GameState, PilotError> {
        if slot >= FOUNDATION_SLOTS {
            return Err(IllegalMove.into());
        }
        let waste = state.waste_top().ok_or(IllegalMove)?;
        if !rules::foundation_accepts(state.foundation(slot), waste) {
            return Err(IllegalMove.into());
        }

        self.input
            .drag(self.layout.waste_target(), self.layout.foundation_target(slot));

        let mut next = state.clone();
        next.set_foundation(slot, waste);
        self.observe_next_waste(&mut next)?;
        debug!("{waste} from waste to foundation {slot}");
        Ok(next)
    }

    /// Promote the top card of a tableau column to a foundation slot.
    pub fn move_tableau_to_foundation(
        &mut self,
        state: &GameState,
        column: usize,
        slot: usize,
    ) -> Result<GameState, PilotError> {
        if column >= TABLEAU_COLUMNS || slot >= FOUNDATION_SLOTS {
            return Err(IllegalMove.into());
        }
        let source = state.column(column);
        let top = source.top().ok_or(IllegalMove)?;
        if !rules::foundation_accepts(state.foundation(slot), top) {
            return Err(IllegalMove.into());
        }

        let from = self.layout.tableau_card_target(TableauPosition::new(
            column as u8,
            source.face_down_count() as u8,
            (source.face_up_count() - 1) as u8,
        ));
        self.input.drag(from, self.layout.foundation_target(slot));

        let mut next = state.clone();
        next.column_mut(column).pop();
        next.set_foundation(slot, top);
        self.flip_if_exposed(&mut next, column)?;
        debug!("{top} from column {column} to foundation {slot}");
        Ok(next)
    }

    /// Move the run of `count` cards ending at the top of `from` onto `to`.
    pub fn move_column_to_column(
        &mut self,
        state: &GameState,
        from: usize,
        count: usize,
        to: usize,
    ) -> Result<GameState, PilotError> {
        if from >= TABLEAU_COLUMNS || to >= TABLEAU_COLUMNS || from == to {
            return Err(IllegalMove.into());
        }
        let source = state.column(from);
        let run = source.top_run(count).ok_or(IllegalMove)?;
        if !rules::is_valid_run(&run) {
            return Err(IllegalMove.into());
        }
        if !rules::tableau_accepts(state.column(to), run[0]) {
            return Err(IllegalMove.into());
        }

        // Grab the bottom card of the moved run; the window lifts the
        // whole run with it.
        let grab = self.layout.tableau_grab_target(TableauPosition::new(
            from as u8,
            source.face_down_count() as u8,
            (source.face_up_count() - count) as u8,
        ));
        let drop = self.layout.column_drop_target(to, state.column(to));
        self.input.drag(grab, drop);

        let mut next = state.clone();
        let run = next.column_mut(from).take_top_run(count);
        next.column_mut(to).push_run(run);
        self.flip_if_exposed(&mut next, from)?;
        debug!("{count} cards from column {from} onto column {to}");
        Ok(next)
    }

    /// Dispatch one catalogued move.
    pub fn apply(&mut self, state: &GameState, mv: Move) -> Result<GameState, PilotError> {
        match mv {
            Move::Draw => self.draw_from_stock(state),
            Move::ResetStock => self.reset_stock(state),
            Move::WasteToTableau { column } => self.move_waste_to_tableau(state, column),
            Move::WasteToFoundation { slot } => self.move_waste_to_foundation(state, slot),
            Move::TableauToFoundation { column, slot } => {
                self.move_tableau_to_foundation(state, column, slot)
            }
            Move::ColumnToColumn { from, count, to } => {
                self.move_column_to_column(state, from, count, to)
            }
        }
    }

    /// Reveal-next-waste bookkeeping after the waste top was consumed.
    ///
    /// Removing the top card exposes a card the model cannot infer from
    /// arithmetic; unless the waste pile drained empty, re-observe it.
    fn observe_next_waste(&mut self, next: &mut GameState) -> Result<(), PilotError> {
        if !next.record_waste_consumed() {
            let card = self.vision.recognize_waste_card()?;
            next.set_waste_top(Some(card));
        }
        Ok(())
    }

    /// Flip the exposed hidden card after a column's face-up run emptied.
    fn flip_if_exposed(&mut self, next: &mut GameState, column: usize) -> Result<(), PilotError> {
        let col = next.column(column);
        if col.face_up_count() == 0 && col.face_down_count() > 0 {
            let pos =
                TableauPosition::new(column as u8, (col.face_down_count() - 1) as u8, 0);
            let card = self.vision.recognize_tableau_card(pos)?;
            next.column_mut(column).reveal(card);
            debug!("column {column} revealed {card}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Rank, Suit};
    use crate::driver::vision::RecognitionError;
    use crate::layout::Point;
    use std::collections::VecDeque;

    fn card(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    /// Counts gestures; settles instantly.
    #[derive(Default)]
    struct CountingInput {
        moves: usize,
        presses: usize,
        releases: usize,
    }

    impl InputDriver for CountingInput {
        fn move_cursor(&mut self, _x: i32, _y: i32) {
            self.moves += 1;
        }
        fn press_button(&mut self) {
            self.presses += 1;
        }
        fn release_button(&mut self) {
            self.releases += 1;
        }
        fn settle(&mut self) {}
    }

    /// Answers recognition probes from a fixed script, failing when the
    /// script runs dry.
    struct ScriptedVision {
        script: VecDeque<Card>,
    }

    impl ScriptedVision {
        fn new(cards: impl IntoIterator<Item = Card>) -> Self {
            Self {
                script: cards.into_iter().collect(),
            }
        }
    }

    impl CardRecognizer for ScriptedVision {
        fn recognize_tableau_card(
            &mut self,
            _pos: TableauPosition,
        ) -> Result<Card, RecognitionError> {
            self.script.pop_front().ok_or(RecognitionError::NoCardVisible)
        }

        fn recognize_waste_card(&mut self) -> Result<Card, RecognitionError> {
            self.script.pop_front().ok_or(RecognitionError::NoCardVisible)
        }
    }

    fn session(
        script: impl IntoIterator<Item = Card>,
    ) -> Session<CountingInput, ScriptedVision> {
        Session::new(CountingInput::default(), ScriptedVision::new(script))
    }

    fn upturned() -> [Card; TABLEAU_COLUMNS] {
        [
            card(Suit::Clubs, Rank::Ace),
            card(Suit::Diamonds, Rank::Seven),
            card(Suit::Spades, Rank::King),
            card(Suit::Hearts, Rank::Three),
            card(Suit::Clubs, Rank::Ten),
            card(Suit::Diamonds, Rank::Queen),
            card(Suit::Spades, Rank::Five),
        ]
    }

    #[test]
    fn test_deal_probes_seven_columns() {
        let mut session = session(upturned());
        let state = session.deal().unwrap();

        assert_eq!(state.stock_size(), 24);
        assert_eq!(state.column(2).top(), Some(card(Suit::Spades, Rank::King)));
        // Dealing observes, it does not touch the window.
        assert_eq!(session.input.presses, 0);
    }

    #[test]
    fn test_draw_clicks_and_observes() {
        let state = GameState::with_deal(upturned());
        let mut session = session([card(Suit::Hearts, Rank::Nine)]);

        let next = session.draw_from_stock(&state).unwrap();

        assert_eq!(next.stock_size(), 23);
        assert_eq!(next.waste_top(), Some(card(Suit::Hearts, Rank::Nine)));
        assert_eq!(session.input.presses, 1);
        assert_eq!(session.input.releases, 1);
        // Input snapshot untouched.
        assert_eq!(state.stock_size(), 24);
    }

    #[test]
    fn test_draw_from_empty_stock_is_illegal_and_silent() {
        let mut state = GameState::with_deal(upturned());
        for _ in 0..24 {
            state.record_draw(card(Suit::Hearts, Rank::Nine));
        }

        let before = state.clone();
        let mut session = session([]);
        let err = session.draw_from_stock(&state).unwrap_err();

        assert_eq!(err, PilotError::Illegal(IllegalMove));
        assert_eq!(state, before);
        // No gesture was issued.
        assert_eq!(session.input.presses, 0);
        assert_eq!(session.input.moves, 0);
    }

    #[test]
    fn test_reset_requires_empty_stock() {
        let state = GameState::with_deal(upturned());
        let mut session = session([]);

        assert_eq!(
            session.reset_stock(&state).unwrap_err(),
            PilotError::Illegal(IllegalMove)
        );
        assert_eq!(session.input.presses, 0);
    }

    #[test]
    fn test_reset_refills_stock_and_clears_waste() {
        let mut state = GameState::with_deal(upturned());
        for _ in 0..24 {
            state.record_draw(card(Suit::Hearts, Rank::Nine));
        }

        let mut session = session([]);
        let next = session.reset_stock(&state).unwrap();

        assert_eq!(next.stock_size(), 24);
        assert_eq!(next.waste_top(), None);
        assert_eq!(session.input.presses, 1);
    }

    #[test]
    fn test_waste_to_tableau_observes_next_waste() {
        let mut state = GameState::with_deal(upturned());
        // Two draws so a card remains under the consumed one.
        state.record_draw(card(Suit::Clubs, Rank::Two));
        state.record_draw(card(Suit::Spades, Rank::Six));

        // 6 of spades lands on the 7 of diamonds (column 1); the 2 of
        // clubs is then re-observed as the waste top.
        let mut session = session([card(Suit::Clubs, Rank::Two)]);
        let next = session.move_waste_to_tableau(&state, 1).unwrap();

        assert_eq!(next.column(1).top(), Some(card(Suit::Spades, Rank::Six)));
        assert_eq!(next.waste_top(), Some(card(Suit::Clubs, Rank::Two)));
        assert_eq!(next.remaining_size(), 23);
        assert_eq!(next.card_count(), 52);
    }

    #[test]
    fn test_waste_drains_to_empty_without_probing() {
        let mut state = GameState::with_deal(upturned());
        state.record_draw(card(Suit::Spades, Rank::Six));

        // The script is empty: a recognition probe would fail the move.
        let mut session = session([]);
        let next = session.move_waste_to_tableau(&state, 1).unwrap();

        assert_eq!(next.waste_top(), None);
        assert_eq!(next.stock_size(), next.remaining_size());
    }

    #[test]
    fn test_waste_to_tableau_rejects_bad_stack() {
        let mut state = GameState::with_deal(upturned());
        state.record_draw(card(Suit::Diamonds, Rank::Six)); // red on red 7

        let mut session = session([]);
        let err = session.move_waste_to_tableau(&state, 1).unwrap_err();

        assert_eq!(err, PilotError::Illegal(IllegalMove));
        assert_eq!(session.input.moves, 0);
    }

    #[test]
    fn test_waste_to_foundation_requires_ace_on_empty() {
        let mut state = GameState::with_deal(upturned());
        state.record_draw(card(Suit::Hearts, Rank::Nine));

        let mut session = session([]);
        let err = session.move_waste_to_foundation(&state, 0).unwrap_err();
        assert_eq!(err, PilotError::Illegal(IllegalMove));

        // An Ace is accepted.
        let mut state = GameState::with_deal(upturned());
        state.record_draw(card(Suit::Hearts, Rank::Ace));
        let next = session.move_waste_to_foundation(&state, 0).unwrap();
        assert_eq!(next.foundation(0), Some(card(Suit::Hearts, Rank::Ace)));
        assert_eq!(next.card_count(), 52);
    }

    #[test]
    fn test_tableau_to_foundation_flips_hidden_card() {
        let state = GameState::with_deal(upturned());

        // Column 1 has one hidden card under the 7; move the 7 away via a
        // foundation built up to 6 of diamonds.
        let mut state = state;
        state.set_foundation(2, card(Suit::Diamonds, Rank::Six));

        let mut session = session([card(Suit::Hearts, Rank::Jack)]);
        let next = session.move_tableau_to_foundation(&state, 1, 2).unwrap();

        assert_eq!(next.foundation(2), Some(card(Suit::Diamonds, Rank::Seven)));
        assert_eq!(next.column(1).top(), Some(card(Suit::Hearts, Rank::Jack)));
        assert_eq!(next.column(1).face_down_count(), 0);
    }

    #[test]
    fn test_tableau_to_foundation_without_flip_on_column_zero() {
        let mut state = GameState::with_deal(upturned());
        state.set_foundation(0, card(Suit::Clubs, Rank::King)); // occupied, wrong

        // Column 0's Ace goes to empty slot 1; column 0 has no hidden
        // cards, so nothing is probed.
        let mut session = session([]);
        let next = session.move_tableau_to_foundation(&state, 0, 1).unwrap();

        assert_eq!(next.foundation(1), Some(card(Suit::Clubs, Rank::Ace)));
        assert!(next.column(0).is_empty());
    }

    #[test]
    fn test_column_to_column_moves_run_and_flips() {
        let state = GameState::with_deal(upturned());

        // Queen of diamonds (column 5, five hidden below) onto the King
        // of spades (column 2); the exposed hidden card is observed.
        let mut session = session([card(Suit::Clubs, Rank::Four)]);
        let next = session.move_column_to_column(&state, 5, 1, 2).unwrap();

        assert_eq!(
            next.column(2).top(),
            Some(card(Suit::Diamonds, Rank::Queen))
        );
        assert_eq!(next.column(2).face_up_count(), 2);
        assert_eq!(next.column(5).top(), Some(card(Suit::Clubs, Rank::Four)));
        assert_eq!(next.column(5).face_down_count(), 4);
        assert_eq!(next.card_count(), 52);
    }

    #[test]
    fn test_column_to_column_rejects_broken_run() {
        let mut state = GameState::with_deal(upturned());
        // Force an invalid two-card "run" onto column 0.
        state.column_mut(0).push(card(Suit::Hearts, Rank::Nine));

        let mut session = session([]);
        let err = session.move_column_to_column(&state, 0, 2, 3).unwrap_err();

        assert_eq!(err, PilotError::Illegal(IllegalMove));
        assert_eq!(session.input.moves, 0);
    }

    #[test]
    fn test_column_to_column_rejects_self_and_bad_count() {
        let state = GameState::with_deal(upturned());
        let mut session = session([]);

        assert!(session.move_column_to_column(&state, 2, 1, 2).is_err());
        assert!(session.move_column_to_column(&state, 5, 0, 2).is_err());
        assert!(session.move_column_to_column(&state, 5, 2, 2).is_err());
    }

    #[test]
    fn test_recognition_failure_is_not_illegal_move() {
        let state = GameState::with_deal(upturned());

        // The click happens, then the waste probe fails.
        let mut session = session([]);
        let err = session.draw_from_stock(&state).unwrap_err();

        assert!(matches!(err, PilotError::Recognition(_)));
        assert_eq!(session.input.presses, 1);
    }

    #[test]
    fn test_apply_dispatches() {
        let state = GameState::with_deal(upturned());
        let mut session = session([card(Suit::Hearts, Rank::Nine)]);

        let next = session.apply(&state, Move::Draw).unwrap();
        assert_eq!(next.stock_size(), 23);

        let err = session.apply(&next, Move::ResetStock).unwrap_err();
        assert_eq!(err, PilotError::Illegal(IllegalMove));
    }

    #[test]
    fn test_into_parts_returns_handles() {
        let session = session([]);
        let (input, _vision) = session.into_parts();
        assert_eq!(input.presses, 0);
    }
}
