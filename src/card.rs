//! Card types, short-code encoding, and raw-name mapping.

use core::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Two.
    Two,
    /// Three.
    Three,
    /// Four.
    Four,
    /// Five.
    Five,
    /// Six.
    Six,
    /// Seven.
    Seven,
    /// Eight.
    Eight,
    /// Nine.
    Nine,
    /// Ten.
    Ten,
    /// Jack.
    Jack,
    /// Queen.
    Queen,
    /// King.
    King,
    /// Ace.
    Ace,
}

impl Rank {
    /// All thirteen ranks, in scoring order.
    pub const ALL: [Self; 13] = [
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Ace,
    ];

    /// Base scoring value: numeric rank for 2-10, 10 for face cards,
    /// 1 for an ace (the evaluator decides when an ace counts as 11).
    #[must_use]
    pub const fn base_value(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
            Self::Nine => 9,
            Self::Ten | Self::Jack | Self::Queen | Self::King => 10,
            Self::Ace => 1,
        }
    }

    /// Single-character short code. Ten is `0` (deck API convention).
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Two => '2',
            Self::Three => '3',
            Self::Four => '4',
            Self::Five => '5',
            Self::Six => '6',
            Self::Seven => '7',
            Self::Eight => '8',
            Self::Nine => '9',
            Self::Ten => '0',
            Self::Jack => 'J',
            Self::Queen => 'Q',
            Self::King => 'K',
            Self::Ace => 'A',
        }
    }

    /// Parses a short-code character.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        Some(match code {
            '2' => Self::Two,
            '3' => Self::Three,
            '4' => Self::Four,
            '5' => Self::Five,
            '6' => Self::Six,
            '7' => Self::Seven,
            '8' => Self::Eight,
            '9' => Self::Nine,
            '0' => Self::Ten,
            'J' => Self::Jack,
            'Q' => Self::Queen,
            'K' => Self::King,
            'A' => Self::Ace,
            _ => return None,
        })
    }

    /// Parses a deck-API rank name (`"ACE"`, `"2"`..`"10"`, `"JACK"`, ...),
    /// case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name.to_ascii_uppercase().as_str() {
            "ACE" => Self::Ace,
            "2" => Self::Two,
            "3" => Self::Three,
            "4" => Self::Four,
            "5" => Self::Five,
            "6" => Self::Six,
            "7" => Self::Seven,
            "8" => Self::Eight,
            "9" => Self::Nine,
            "10" => Self::Ten,
            "JACK" => Self::Jack,
            "QUEEN" => Self::Queen,
            "KING" => Self::King,
            _ => return None,
        })
    }
}

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs.
    Clubs,
    /// Diamonds.
    Diamonds,
    /// Hearts.
    Hearts,
    /// Spades.
    Spades,
}

impl Suit {
    /// All four suits.
    pub const ALL: [Self; 4] = [Self::Clubs, Self::Diamonds, Self::Hearts, Self::Spades];

    /// Single-character short code.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Clubs => 'C',
            Self::Diamonds => 'D',
            Self::Hearts => 'H',
            Self::Spades => 'S',
        }
    }

    /// Parses a short-code character.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        Some(match code {
            'C' => Self::Clubs,
            'D' => Self::Diamonds,
            'H' => Self::Hearts,
            'S' => Self::Spades,
            _ => return None,
        })
    }

    /// Parses a deck-API suit name (`"CLUBS"`, ...), case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name.to_ascii_uppercase().as_str() {
            "CLUBS" => Self::Clubs,
            "DIAMONDS" => Self::Diamonds,
            "HEARTS" => Self::Hearts,
            "SPADES" => Self::Spades,
            _ => return None,
        })
    }
}

/// A playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// The rank of the card.
    pub rank: Rank,
    /// The suit of the card.
    pub suit: Suit,
}

impl Card {
    /// Creates a new card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Returns whether the card is an ace.
    #[must_use]
    pub const fn is_ace(self) -> bool {
        matches!(self.rank, Rank::Ace)
    }

    /// Base scoring value of the card.
    #[must_use]
    pub const fn base_value(self) -> u8 {
        self.rank.base_value()
    }

    /// Two-character short code, rank char followed by suit char
    /// (for example `AS`, `0H`, `KD`).
    #[must_use]
    pub fn code(self) -> String {
        let mut s = String::with_capacity(2);
        s.push(self.rank.code());
        s.push(self.suit.code());
        s
    }

    /// Parses a two-character short code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let rank = Rank::from_code(chars.next()?)?;
        let suit = Suit::from_code(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self { rank, suit })
    }

    /// Maps raw deck-API rank/suit names to a card.
    ///
    /// Unrecognized names do not fail the mapping: they fall back to
    /// Two of Spades and log a warning, so one malformed card from the
    /// source cannot take down a whole shoe refill.
    #[must_use]
    pub fn from_raw_names(value: &str, suit: &str) -> Self {
        let rank = Rank::from_name(value).unwrap_or_else(|| {
            warn!(value, "unrecognized rank name from card source, using Two");
            Rank::Two
        });
        let suit = Suit::from_name(suit).unwrap_or_else(|| {
            warn!(suit, "unrecognized suit name from card source, using Spades");
            Suit::Spades
        });
        Self { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} of {:?}", self.rank, self.suit)
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;
