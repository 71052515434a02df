//! Card recognition: the vision contract.
//!
//! The core never infers card identities from pixels itself. Wherever a
//! previously unknown card becomes visible — the seven upturned cards at
//! deal time, the waste top after a draw or a consumed waste card, a
//! hidden tableau card flipped by an emptied run — it asks this
//! collaborator and trusts the answer.

use thiserror::Error;

use crate::core::card::Card;
use crate::core::pile::TableauPosition;

/// The vision collaborator could not identify a card.
///
/// Distinct from `IllegalMove`: this is an observation failure, not a rule
/// violation, and the model does not fabricate a card value to paper over
/// it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RecognitionError {
    /// Nothing card-shaped was rendered at the probed position.
    #[error("no card is visible at the probed position")]
    NoCardVisible,

    /// Something was rendered but matched no known card face.
    #[error("the rendered card could not be matched: {0}")]
    Unrecognized(String),
}

/// Synchronous, blocking card identification at a pile position.
pub trait CardRecognizer {
    /// Identify the card rendered at a face-up tableau slot.
    fn recognize_tableau_card(&mut self, pos: TableauPosition)
        -> Result<Card, RecognitionError>;

    /// Identify the card rendered at the top of the waste pile.
    fn recognize_waste_card(&mut self) -> Result<Card, RecognitionError>;
}
