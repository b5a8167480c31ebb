//! Card catalog: suits, ranks, spectra and the standard 52-card deck
//!
//! Everything here is derived from rank and suit alone, so cards are plain
//! `Copy` values that never change after the deck is built.

use crate::core::{CardId, CardIdAllocator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Card suits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Clubs,
    Hearts,
    Diamonds,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Clubs, Suit::Hearts, Suit::Diamonds];

    /// Spades/Clubs are Physical, Hearts/Diamonds are Magical
    pub fn spectrum(&self) -> Spectrum {
        match self {
            Suit::Spades | Suit::Clubs => Spectrum::Physical,
            Suit::Hearts | Suit::Diamonds => Spectrum::Magical,
        }
    }

    fn symbol(&self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Clubs => '♣',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
        }
    }
}

/// The two colors a unit can fight in. Only same-spectrum units may fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Spectrum {
    /// Black suits
    Physical,
    /// Red suits
    Magical,
}

impl Spectrum {
    pub const ALL: [Spectrum; 2] = [Spectrum::Physical, Spectrum::Magical];
}

/// Card ranks, Ace low
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
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

    /// Numeric value: Ace=1, 2..10 face value, Jack=11, Queen=12, King=13
    pub fn value(&self) -> u8 {
        *self as u8 + 1
    }

    /// Resource cost to play a card of this rank
    pub fn cost(&self) -> u8 {
        match self {
            Rank::Ace => 1,
            Rank::Jack => 2,
            Rank::Queen => 3,
            Rank::King => 4,
            other => other.value(),
        }
    }

    pub fn is_face(&self) -> bool {
        matches!(self, Rank::Jack | Rank::Queen | Rank::King)
    }

    fn label(&self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// How a card behaves when played from hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    /// Ace and 2..10: conscripted onto the field
    Soldier,
    /// Discard, draw two
    Jack,
    /// Attach to a unit, recoloring it
    Queen,
    /// Destroy a same-spectrum unit
    King,
}

/// A single immutable playing card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(id: CardId, suit: Suit, rank: Rank) -> Self {
        Card { id, suit, rank }
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    pub fn cost(&self) -> u8 {
        self.rank.cost()
    }

    /// Value used when this card fights. Aces count as 1.
    pub fn combat_value(&self) -> u8 {
        self.rank.value()
    }

    pub fn spectrum(&self) -> Spectrum {
        self.suit.spectrum()
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }

    /// Face cards are Tactics: one-shot effects instead of field presence
    pub fn is_tactic(&self) -> bool {
        self.rank.is_face()
    }

    pub fn kind(&self) -> CardKind {
        match self.rank {
            Rank::Jack => CardKind::Jack,
            Rank::Queen => CardKind::Queen,
            Rank::King => CardKind::King,
            _ => CardKind::Soldier,
        }
    }

    /// Sort key used for hands: spectrum first, then rank weight
    pub fn hand_sort_key(&self) -> (Spectrum, u8, Suit) {
        (self.spectrum(), self.value(), self.suit)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

/// Build one standard 52-card deck, ordered by suit then rank
pub fn standard_deck(ids: &mut CardIdAllocator) -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card::new(ids.next_id(), suit, rank));
        }
    }
    deck
}
