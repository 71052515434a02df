//! A simulated game window with full knowledge of every card.
//!
//! `SimTable` stands in for the real window: it holds a complete shuffled
//! deck, interprets the same click/drag gestures the executor issues (by
//! hit-testing pixel positions against the shared `TableLayout`), applies
//! the real game's rules, and answers recognition probes from its hidden
//! state. Illegal drops snap back, exactly like the window would.
//!
//! `SimInput` and `SimVision` are the two collaborator handles over one
//! shared table; pass them to `Session::new` to drive a full game without
//! a screen.

use std::cell::RefCell;
use std::rc::Rc;

use log::trace;

use crate::core::card::Card;
use crate::core::pile::{TableauColumn, TableauPosition};
use crate::core::state::{FOUNDATION_SLOTS, TABLEAU_COLUMNS};
use crate::driver::input::InputDriver;
use crate::driver::vision::{CardRecognizer, RecognitionError};
use crate::layout::{PileHit, Point, TableLayout};
use crate::rules;

use super::rng::DealRng;

#[derive(Clone, Debug, Default)]
struct SimColumn {
    face_down: Vec<Card>,
    face_up: Vec<Card>,
}

impl SimColumn {
    /// View as the model's column type, for the shared rule predicates.
    fn as_model(&self) -> TableauColumn {
        TableauColumn::new(self.face_down.len() as u8, self.face_up.iter().copied())
    }

    /// The window flips an exposed hidden card automatically.
    fn flip_if_exposed(&mut self) {
        if self.face_up.is_empty() {
            if let Some(card) = self.face_down.pop() {
                self.face_up.push(card);
            }
        }
    }
}

/// The simulated table: full deck, gesture interpretation, game rules.
#[derive(Clone, Debug)]
pub struct SimTable {
    layout: TableLayout,
    columns: [SimColumn; TABLEAU_COLUMNS],
    foundations: [Vec<Card>; FOUNDATION_SLOTS],
    /// Face-down draw pile, top = last.
    stock: Vec<Card>,
    /// Face-up waste pile, top = last.
    waste: Vec<Card>,
    cursor: Point,
    pressed_at: Option<Point>,
}

impl SimTable {
    /// Deal a fresh table from a seeded shuffle, with the default layout.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_layout(seed, TableLayout::default())
    }

    /// Deal a fresh table against a specific layout.
    #[must_use]
    pub fn with_layout(seed: u64, layout: TableLayout) -> Self {
        let mut deck: Vec<Card> = Card::full_deck().collect();
        DealRng::new(seed).shuffle(&mut deck);

        let mut deck = deck.into_iter();
        let columns = std::array::from_fn(|i| {
            let face_down = (&mut deck).take(i).collect();
            let face_up = vec![deck.next().expect("52 cards cover the deal")];
            SimColumn { face_down, face_up }
        });
        let stock: Vec<Card> = deck.collect();
        debug_assert_eq!(stock.len(), 24);

        Self {
            layout,
            columns,
            foundations: std::array::from_fn(|_| Vec::new()),
            stock,
            waste: Vec::new(),
            cursor: Point::new(0, 0),
            pressed_at: None,
        }
    }

    /// Wrap the table for sharing between handles.
    ///
    /// Keep a clone of the `Rc` to inspect the table while a session
    /// drives it.
    #[must_use]
    pub fn shared(self) -> Rc<RefCell<SimTable>> {
        Rc::new(RefCell::new(self))
    }

    /// Split into the two collaborator handles over one shared table.
    #[must_use]
    pub fn into_handles(self) -> (SimInput, SimVision) {
        let table = self.shared();
        (SimInput::new(Rc::clone(&table)), SimVision::new(table))
    }

    // === Read access for tests and assertions ===

    /// Cards left in the face-down stock.
    #[must_use]
    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    /// Cards in the face-up waste pile.
    #[must_use]
    pub fn waste_len(&self) -> usize {
        self.waste.len()
    }

    /// The visible waste top.
    #[must_use]
    pub fn waste_top(&self) -> Option<Card> {
        self.waste.last().copied()
    }

    /// Cards promoted to one foundation slot.
    #[must_use]
    pub fn foundation_len(&self, slot: usize) -> usize {
        self.foundations[slot].len()
    }

    /// Top face-up card of a column.
    #[must_use]
    pub fn column_top(&self, column: usize) -> Option<Card> {
        self.columns[column].face_up.last().copied()
    }

    /// Total cards everywhere; always 52.
    #[must_use]
    pub fn card_count(&self) -> usize {
        let columns: usize = self
            .columns
            .iter()
            .map(|c| c.face_down.len() + c.face_up.len())
            .sum();
        let foundations: usize = self.foundations.iter().map(Vec::len).sum();
        columns + foundations + self.stock.len() + self.waste.len()
    }

    // === Gesture interpretation ===

    fn press(&mut self) {
        self.pressed_at = Some(self.cursor);
    }

    fn release(&mut self) {
        let Some(from) = self.pressed_at.take() else {
            return;
        };
        let to = self.cursor;
        if from == to {
            self.click(from);
        } else {
            self.drop(from, to);
        }
    }

    fn click(&mut self, at: Point) {
        if self.layout.hit_test(at) != Some(PileHit::Stock) {
            return;
        }
        if let Some(card) = self.stock.pop() {
            trace!("sim: drew {card}");
            self.waste.push(card);
        } else {
            // Flip the waste over: original draw order repeats.
            trace!("sim: recycled {} waste cards", self.waste.len());
            self.waste.reverse();
            self.stock.append(&mut self.waste);
        }
    }

    fn drop(&mut self, from: Point, to: Point) {
        let (Some(source), Some(target)) =
            (self.layout.hit_test(from), self.layout.hit_test(to))
        else {
            return;
        };

        match (source, target) {
            (PileHit::Waste, PileHit::Column(column)) => {
                let Some(card) = self.waste.last().copied() else {
                    return;
                };
                if rules::tableau_accepts(&self.columns[column].as_model(), card) {
                    self.waste.pop();
                    self.columns[column].face_up.push(card);
                }
            }
            (PileHit::Waste, PileHit::Foundation(slot)) => {
                let Some(card) = self.waste.last().copied() else {
                    return;
                };
                if rules::foundation_accepts(self.foundations[slot].last().copied(), card) {
                    self.waste.pop();
                    self.foundations[slot].push(card);
                }
            }
            (PileHit::Column(column), PileHit::Foundation(slot)) => {
                let Some(card) = self.columns[column].face_up.last().copied() else {
                    return;
                };
                if rules::foundation_accepts(self.foundations[slot].last().copied(), card) {
                    self.columns[column].face_up.pop();
                    self.foundations[slot].push(card);
                    self.columns[column].flip_if_exposed();
                }
            }
            (PileHit::Column(from_col), PileHit::Column(to_col)) if from_col != to_col => {
                self.drop_run(from, from_col, to_col);
            }
            _ => {}
        }
    }

    /// Which face-up card does a grab at `from` pick up, and is dragging
    /// that whole run to `to_col` legal?
    fn drop_run(&mut self, from: Point, from_col: usize, to_col: usize) {
        let column = &self.columns[from_col];
        let base_y = self.layout.tableau_origin.y
            + column.face_down.len() as i32 * self.layout.face_down_step;
        let rel = from.y - base_y;
        if rel < 0 || column.face_up.is_empty() {
            // Grabbed a face-down card or an empty slot.
            return;
        }

        let top_index = column.face_up.len() - 1;
        let grabbed = usize::min((rel / self.layout.face_up_step) as usize, top_index);
        let run = &column.face_up[grabbed..];

        if !rules::is_valid_run(run) {
            return;
        }
        if !rules::tableau_accepts(&self.columns[to_col].as_model(), run[0]) {
            return;
        }

        let run: Vec<Card> = self.columns[from_col].face_up.split_off(grabbed);
        self.columns[to_col].face_up.extend(run);
        self.columns[from_col].flip_if_exposed();
    }
}

/// Cursor-automation handle over a shared `SimTable`.
pub struct SimInput {
    table: Rc<RefCell<SimTable>>,
}

impl SimInput {
    /// Create a handle over a shared table.
    #[must_use]
    pub fn new(table: Rc<RefCell<SimTable>>) -> Self {
        Self { table }
    }
}

impl InputDriver for SimInput {
    fn move_cursor(&mut self, x: i32, y: i32) {
        self.table.borrow_mut().cursor = Point::new(x, y);
    }

    fn press_button(&mut self) {
        self.table.borrow_mut().press();
    }

    fn release_button(&mut self) {
        self.table.borrow_mut().release();
    }

    /// Nothing renders; no reason to wait.
    fn settle(&mut self) {}
}

/// Recognition handle over a shared `SimTable`.
pub struct SimVision {
    table: Rc<RefCell<SimTable>>,
}

impl SimVision {
    /// Create a handle over a shared table.
    #[must_use]
    pub fn new(table: Rc<RefCell<SimTable>>) -> Self {
        Self { table }
    }
}

impl CardRecognizer for SimVision {
    fn recognize_tableau_card(
        &mut self,
        pos: TableauPosition,
    ) -> Result<Card, RecognitionError> {
        let table = self.table.borrow();
        let column = table
            .columns
            .get(pos.column as usize)
            .ok_or(RecognitionError::NoCardVisible)?;
        column
            .face_up
            .get(pos.index as usize)
            .copied()
            .ok_or(RecognitionError::NoCardVisible)
    }

    fn recognize_waste_card(&mut self) -> Result<Card, RecognitionError> {
        self.table
            .borrow()
            .waste
            .last()
            .copied()
            .ok_or(RecognitionError::NoCardVisible)
    }
}
