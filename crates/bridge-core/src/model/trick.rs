use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::seat::SeatPosition;
use crate::model::strain::Strain;
use crate::model::suit::Suit;
use std::fmt;

/// One round of four plays under the contract's trump strain.
#[derive(Debug, Clone)]
pub struct Trick {
    leader: SeatPosition,
    trump: Strain,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy)]
pub struct Play {
    pub seat: SeatPosition,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    TrickComplete,
    AlreadyPlayed(SeatPosition),
    OutOfTurn {
        expected: SeatPosition,
        actual: SeatPosition,
    },
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::TrickComplete => write!(f, "trick already complete"),
            TrickError::AlreadyPlayed(seat) => {
                write!(f, "{seat} has already played this trick")
            }
            TrickError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
        }
    }
}

impl std::error::Error for TrickError {}

impl Trick {
    pub fn new(leader: SeatPosition, trump: Strain) -> Self {
        Self {
            leader,
            trump,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> SeatPosition {
        self.leader
    }

    pub fn trump(&self) -> Strain {
        self.trump
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    /// Cards the seat may legally play: follow the lead suit when able,
    /// otherwise anything (discard or trump freely).
    pub fn legal_cards(&self, hand: &Hand) -> Vec<Card> {
        match self.lead_suit() {
            Some(suit) if hand.has_suit(suit) => hand.cards_of_suit(suit),
            _ => hand.cards().to_vec(),
        }
    }

    pub fn play(&mut self, seat: SeatPosition, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        if self.plays.iter().any(|play| play.seat == seat) {
            return Err(TrickError::AlreadyPlayed(seat));
        }

        let expected = self.expected_seat();
        if expected != seat {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        self.plays.push(Play { seat, card });
        Ok(())
    }

    /// Undefined until all four seats have played.
    pub fn winner(&self) -> Option<SeatPosition> {
        if !self.is_complete() {
            return None;
        }
        let mut best = &self.plays[0];
        for play in &self.plays[1..] {
            if self.beats(play.card, best.card) {
                best = play;
            }
        }
        Some(best.seat)
    }

    /// Whether `card` takes the trick from the current `best` card.
    fn beats(&self, card: Card, best: Card) -> bool {
        if let Some(trump) = self.trump.to_suit() {
            if card.suit == trump && best.suit != trump {
                return true;
            }
            if card.suit != trump && best.suit == trump {
                return false;
            }
        }

        if card.suit == best.suit {
            return card.rank > best.rank;
        }

        // Off-suit, non-trump cards never win.
        self.lead_suit() == Some(card.suit)
    }

    fn expected_seat(&self) -> SeatPosition {
        self.plays
            .last()
            .map(|play| play.seat.next())
            .unwrap_or(self.leader)
    }
}
