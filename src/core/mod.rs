//! Core data model: cards, piles, and the aggregate game snapshot.
//!
//! Everything here is pure data with no I/O. The move executor in
//! `crate::session` is the only place these values meet the outside world.

pub mod card;
pub mod pile;
pub mod state;

pub use card::{Card, Color, Rank, Suit};
pub use pile::{TableauColumn, TableauPosition};
pub use state::{GameState, FOUNDATION_SLOTS, INITIAL_STOCK, TABLEAU_COLUMNS};
