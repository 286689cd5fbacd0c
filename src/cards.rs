//! Card identity model: the 52-card space and the artwork lifecycle.
//!
//! A card is identified by its `(rank, suit)` pair; no two cards in the same
//! deck may share an identity. The artwork field tracks where a card is in
//! its lifecycle: waiting for a portrait, carrying one, or marked as a
//! pip-only card that never fetches artwork.

use serde::{Deserialize, Serialize};

/// The four suits, in the fixed enumeration order used for full-deck builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Unicode symbol shown in card corners
    pub fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }

    /// Hearts and diamonds render red, clubs and spades black.
    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }
}

/// The thirteen ranks, in the fixed enumeration order A, K, Q, J, 10 .. 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    King,
    Queen,
    Jack,
    Ten,
    Nine,
    Eight,
    Seven,
    Six,
    Five,
    Four,
    Three,
    Two,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::King,
        Rank::Queen,
        Rank::Jack,
        Rank::Ten,
        Rank::Nine,
        Rank::Eight,
        Rank::Seven,
        Rank::Six,
        Rank::Five,
        Rank::Four,
        Rank::Three,
        Rank::Two,
    ];

    /// Short corner label ("A", "K", .., "10", .., "2")
    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::King => "K",
            Rank::Queen => "Q",
            Rank::Jack => "J",
            Rank::Ten => "10",
            Rank::Nine => "9",
            Rank::Eight => "8",
            Rank::Seven => "7",
            Rank::Six => "6",
            Rank::Five => "5",
            Rank::Four => "4",
            Rank::Three => "3",
            Rank::Two => "2",
        }
    }

    /// Long display name used in accessibility labels
    pub fn name(self) -> &'static str {
        match self {
            Rank::Ace => "Ace",
            Rank::King => "King",
            Rank::Queen => "Queen",
            Rank::Jack => "Jack",
            other => other.label(),
        }
    }

    /// Face ranks are the only ranks that receive generated portraits in
    /// full-deck mode; number cards get the pip marker instead.
    pub fn is_face(self) -> bool {
        matches!(self, Rank::Ace | Rank::King | Rank::Queen | Rank::Jack)
    }
}

/// A card identity: one of the 52 `(rank, suit)` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId {
    pub rank: Rank,
    pub suit: Suit,
}

impl CardId {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

/// Where a card is in its artwork lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Artwork {
    /// Selected by the draw allocator, portrait fetch pending
    Empty,
    /// Placeholder marker: render procedural pips, never fetch
    Pips,
    /// A fetched portrait, stored as a `data:image/png;base64,..` URL
    Portrait(String),
}

impl Artwork {
    pub fn is_pending(&self) -> bool {
        matches!(self, Artwork::Empty)
    }

    pub fn is_portrait(&self) -> bool {
        matches!(self, Artwork::Portrait(_))
    }
}

/// One card record in a deck: identity plus artwork state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub artwork: Artwork,
}

impl Card {
    /// A freshly drawn card awaiting its portrait
    pub fn placeholder(id: CardId) -> Self {
        Self { id, artwork: Artwork::Empty }
    }

    /// A number card that renders pips and never fetches artwork
    pub fn pips(id: CardId) -> Self {
        Self { id, artwork: Artwork::Pips }
    }
}

/// All 52 identities: suits outer loop, ranks inner loop, both in their
/// fixed enumeration order.
pub fn full_deck() -> Vec<CardId> {
    let mut ids = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            ids.push(CardId::new(rank, suit));
        }
    }
    ids
}
