//! Sandbox mode: an in-process table implementing both collaborators.
//!
//! Drive a `Session` against `SimTable`'s handles instead of a real
//! window. Deals are seeded, so every simulated game is reproducible.

pub mod rng;
pub mod table;

pub use rng::DealRng;
pub use table::{SimInput, SimTable, SimVision};
