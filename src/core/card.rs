//! Card values: suits, ranks, and colors.
//!
//! ## Card
//!
//! A `Card` is a pure value — suit plus rank, nothing else. Two cards with
//! the same suit and rank are the same card; the crate never tracks card
//! identity beyond that pair.
//!
//! ## Color
//!
//! Suits are laid out so that the discriminant's parity gives the color:
//! even suits are black, odd suits are red. Tableau stacking only cares
//! about color, never about the specific suit.

use serde::{Deserialize, Serialize};

/// The four suits, ordered so parity encodes color (even = black, odd = red).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Spades = 2,
    Hearts = 3,
}

impl Suit {
    /// All suits, in discriminant order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Spades, Suit::Hearts];

    /// The color of this suit.
    #[must_use]
    pub const fn color(self) -> Color {
        if self as u8 % 2 == 0 {
            Color::Black
        } else {
            Color::Red
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
        };
        write!(f, "{symbol}")
    }
}

/// Card color, derived from suit parity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    Red,
}

/// The thirteen ranks, `Ace` lowest through `King` highest.
///
/// The discriminant doubles as the face value (`Ace = 1`, `King = 13`),
/// which is also how many cards a foundation topped by this rank holds.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All ranks, ascending.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Face value, 1 (`Ace`) through 13 (`King`).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// The next rank up, or `None` for `King`.
    #[must_use]
    pub fn successor(self) -> Option<Rank> {
        // value() is 1-based, ALL is 0-based, so value() indexes the next rank
        Rank::ALL.get(self.value() as usize).copied()
    }

    /// True if `self` is exactly one rank above `other`.
    #[must_use]
    pub fn is_one_above(self, other: Rank) -> bool {
        self.value() == other.value() + 1
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Rank::Ace => "A",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            other => return write!(f, "{}", other.value()),
        };
        write!(f, "{label}")
    }
}

/// A playing card: suit plus rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// The card's color.
    #[must_use]
    pub const fn color(self) -> Color {
        self.suit.color()
    }

    /// Iterate the full 52-card deck, suit-major.
    pub fn full_deck() -> impl Iterator<Item = Card> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card::new(suit, rank)))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
