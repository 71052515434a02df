//! Failure surface of the move executor.
//!
//! Two kinds of failure, kept distinct:
//!
//! - `IllegalMove`: a move's precondition does not hold for the given
//!   snapshot. Always detected before any physical action or state
//!   mutation, so the caller's state value stays valid and the caller may
//!   simply try a different move.
//! - Recognition failures: the vision collaborator could not identify a
//!   card it was asked to observe. These are NOT rule violations and are
//!   reported separately rather than smuggled in as a corrupt card value.

use thiserror::Error;

use crate::driver::vision::RecognitionError;

/// A move whose precondition does not hold for the given snapshot.
///
/// There is no finer-grained taxonomy: legality is the only precondition
/// class in this core, so one signal covers stock-empty, no-waste-card,
/// and predicate failures alike.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("illegal move")]
pub struct IllegalMove;

/// Any failure a move operation can report.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PilotError {
    /// The move is not legal for this snapshot. No physical action was
    /// taken and no state changed.
    #[error(transparent)]
    Illegal(#[from] IllegalMove),

    /// The vision collaborator failed to identify a card. The physical
    /// gesture may already have happened; the returned snapshot is lost
    /// and the caller must re-establish trust in the model externally.
    #[error("card recognition failed: {0}")]
    Recognition(#[from] RecognitionError),
}
