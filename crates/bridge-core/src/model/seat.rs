use crate::model::card::Card;
use crate::model::hand::Hand;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SeatPosition {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl SeatPosition {
    pub const LOOP: [SeatPosition; 4] = [
        SeatPosition::North,
        SeatPosition::East,
        SeatPosition::South,
        SeatPosition::West,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(SeatPosition::North),
            1 => Some(SeatPosition::East),
            2 => Some(SeatPosition::South),
            3 => Some(SeatPosition::West),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> SeatPosition {
        match self {
            SeatPosition::North => SeatPosition::East,
            SeatPosition::East => SeatPosition::South,
            SeatPosition::South => SeatPosition::West,
            SeatPosition::West => SeatPosition::North,
        }
    }

    pub const fn previous(self) -> SeatPosition {
        match self {
            SeatPosition::North => SeatPosition::West,
            SeatPosition::East => SeatPosition::North,
            SeatPosition::South => SeatPosition::East,
            SeatPosition::West => SeatPosition::South,
        }
    }

    pub const fn partner(self) -> SeatPosition {
        match self {
            SeatPosition::North => SeatPosition::South,
            SeatPosition::East => SeatPosition::West,
            SeatPosition::South => SeatPosition::North,
            SeatPosition::West => SeatPosition::East,
        }
    }

    /// North-South sit against East-West.
    pub const fn same_partnership(self, other: SeatPosition) -> bool {
        self.index() % 2 == other.index() % 2
    }
}

impl fmt::Display for SeatPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SeatPosition::North => "North",
            SeatPosition::East => "East",
            SeatPosition::South => "South",
            SeatPosition::West => "West",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatError {
    CardNotHeld(Card),
}

impl fmt::Display for SeatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeatError::CardNotHeld(card) => write!(f, "seat does not hold {card}"),
        }
    }
}

impl std::error::Error for SeatError {}

/// One chair at the table: a name, the cards it exclusively owns, and the
/// tricks it has taken this game.
#[derive(Debug, Clone)]
pub struct Seat {
    name: String,
    hand: Hand,
    tricks_won: u8,
}

impl Seat {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: Hand::new(),
            tricks_won: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn tricks_won(&self) -> u8 {
        self.tricks_won
    }

    pub fn receive_cards(&mut self, cards: &[Card]) {
        for card in cards {
            self.hand.add(*card);
        }
    }

    pub fn play_card(&mut self, card: Card) -> Result<(), SeatError> {
        if self.hand.remove(card) {
            Ok(())
        } else {
            Err(SeatError::CardNotHeld(card))
        }
    }

    pub fn record_trick_won(&mut self) {
        self.tricks_won += 1;
    }
}
