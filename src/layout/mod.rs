//! Table geometry: where each pile lives on screen.
//!
//! Drag and click targets are a deterministic pure function of the layout
//! constants plus the snapshot: the tableau X offset scales linearly with
//! the column index, and the Y offset is the sum of a per-hidden-card step
//! and a per-face-up-card step. The executor aims at card centers, like a
//! human would.
//!
//! The concrete pixel values are configuration, not game logic — override
//! the fields of `TableLayout` to match the real window. The simulator
//! reuses the same layout in reverse (`hit_test`) to interpret gestures.

use serde::{Deserialize, Serialize};

use crate::core::pile::{TableauColumn, TableauPosition};
use crate::core::state::{FOUNDATION_SLOTS, TABLEAU_COLUMNS};

/// A screen position in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Which pile a screen position falls on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PileHit {
    Stock,
    Waste,
    Foundation(usize),
    Column(usize),
}

/// Anchor positions and offsets for every pile on the table.
///
/// All anchors are the top-left corner of the base card slot; target
/// computation adds half a card to aim at the center.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLayout {
    pub card_width: i32,
    pub card_height: i32,
    /// Top-left of the stock pile.
    pub stock: Point,
    /// Top-left of the waste pile.
    pub waste: Point,
    /// Top-left of foundation slot 0; slots run left to right.
    pub foundation_origin: Point,
    /// X distance between adjacent foundation slots.
    pub foundation_stride: i32,
    /// Top-left of tableau column 0.
    pub tableau_origin: Point,
    /// X distance between adjacent tableau columns.
    pub column_stride: i32,
    /// Y step per face-down card in a column.
    pub face_down_step: i32,
    /// Y step per face-up card in a column.
    pub face_up_step: i32,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            card_width: 71,
            card_height: 96,
            stock: Point::new(30, 30),
            waste: Point::new(120, 30),
            foundation_origin: Point::new(350, 30),
            foundation_stride: 90,
            tableau_origin: Point::new(30, 160),
            column_stride: 90,
            face_down_step: 15,
            face_up_step: 25,
        }
    }
}

impl TableLayout {
    fn centered(&self, anchor: Point) -> Point {
        Point::new(anchor.x + self.card_width / 2, anchor.y + self.card_height / 2)
    }

    /// Click target for the stock pile.
    #[must_use]
    pub fn stock_target(&self) -> Point {
        self.centered(self.stock)
    }

    /// Drag source for the visible waste-pile top.
    #[must_use]
    pub fn waste_target(&self) -> Point {
        self.centered(self.waste)
    }

    /// Drag target for a foundation slot.
    #[must_use]
    pub fn foundation_target(&self, slot: usize) -> Point {
        debug_assert!(slot < FOUNDATION_SLOTS);
        let anchor = Point::new(
            self.foundation_origin.x + slot as i32 * self.foundation_stride,
            self.foundation_origin.y,
        );
        self.centered(anchor)
    }

    /// Center of one face-up card slot in a tableau column.
    #[must_use]
    pub fn tableau_card_target(&self, pos: TableauPosition) -> Point {
        debug_assert!((pos.column as usize) < TABLEAU_COLUMNS);
        let anchor = Point::new(
            self.tableau_origin.x + i32::from(pos.column) * self.column_stride,
            self.tableau_origin.y
                + i32::from(pos.num_hidden) * self.face_down_step
                + i32::from(pos.index) * self.face_up_step,
        );
        self.centered(anchor)
    }

    /// Grab point for one card inside a face-up run.
    ///
    /// Cards below the top only show a `face_up_step`-tall strip; aiming
    /// at the card's center would land on the card overlapping it from
    /// below. The top card is fully visible, but the strip aim works for
    /// it too.
    #[must_use]
    pub fn tableau_grab_target(&self, pos: TableauPosition) -> Point {
        debug_assert!((pos.column as usize) < TABLEAU_COLUMNS);
        Point::new(
            self.tableau_origin.x
                + i32::from(pos.column) * self.column_stride
                + self.card_width / 2,
            self.tableau_origin.y
                + i32::from(pos.num_hidden) * self.face_down_step
                + i32::from(pos.index) * self.face_up_step
                + self.face_up_step / 2,
        )
    }

    /// Drop target when adding to a column: its current top card, or the
    /// base slot when the face-up run is empty.
    #[must_use]
    pub fn column_drop_target(&self, index: usize, column: &TableauColumn) -> Point {
        let top_index = column.face_up_count().saturating_sub(1);
        self.tableau_card_target(TableauPosition::new(
            index as u8,
            column.face_down_count() as u8,
            top_index as u8,
        ))
    }

    /// Which pile does a screen position fall on?
    ///
    /// The inverse of the target computation, used by the simulated table
    /// to interpret gestures. Tableau columns extend downward without
    /// bound since a long run can hang well below the base slot.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<PileHit> {
        let in_rect = |anchor: Point| {
            point.x >= anchor.x
                && point.x < anchor.x + self.card_width
                && point.y >= anchor.y
                && point.y < anchor.y + self.card_height
        };

        if in_rect(self.stock) {
            return Some(PileHit::Stock);
        }
        if in_rect(self.waste) {
            return Some(PileHit::Waste);
        }
        for slot in 0..FOUNDATION_SLOTS {
            let anchor = Point::new(
                self.foundation_origin.x + slot as i32 * self.foundation_stride,
                self.foundation_origin.y,
            );
            if in_rect(anchor) {
                return Some(PileHit::Foundation(slot));
            }
        }
        if point.y >= self.tableau_origin.y {
            for column in 0..TABLEAU_COLUMNS {
                let x = self.tableau_origin.x + column as i32 * self.column_stride;
                if point.x >= x && point.x < x + self.card_width {
                    return Some(PileHit::Column(column));
                }
            }
        }
        None
    }
}
