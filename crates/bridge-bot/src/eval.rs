//! Deterministic hand evaluation behind the skilled strategy: point counts,
//! shape, and suit quality. Pure functions over a hand; no auction state.

use bridge_core::model::hand::Hand;
use bridge_core::model::suit::Suit;

pub const MIN_POINTS_TO_BID: u32 = 8;
pub const MIN_POINTS_TO_OPEN: u32 = 12;
pub const MIN_POINTS_FOR_TWO_BID: u32 = 16;
pub const MIN_POINTS_FOR_THREE_BID: u32 = 19;
pub const MIN_HCP_FOR_NO_TRUMP: u32 = 15;

const SUIT_LENGTH_FACTOR: f32 = 0.5;
const HIGH_CARD_QUALITY_FACTOR: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandEvaluation {
    pub high_card_points: u32,
    pub distribution_points: u32,
    pub suit_lengths: [u8; 4],
}

impl HandEvaluation {
    pub fn total_points(&self) -> u32 {
        self.high_card_points + self.distribution_points
    }

    /// Every suit held 1..=5. Looser than the textbook
    /// 4-3-3-3/4-4-3-2/5-3-3-2 shapes; the bid selection relies on exactly
    /// this rule.
    pub fn is_balanced(&self) -> bool {
        self.suit_lengths.iter().all(|&count| (1..=5).contains(&count))
    }
}

pub fn evaluate(hand: &Hand) -> HandEvaluation {
    let suit_lengths = hand.suit_lengths();
    let high_card_points = hand
        .iter()
        .map(|card| card.rank.high_card_points())
        .sum();
    let distribution_points = suit_lengths
        .iter()
        .map(|&count| distribution_points_for(count))
        .sum();
    HandEvaluation {
        high_card_points,
        distribution_points,
        suit_lengths,
    }
}

/// Void 3, singleton 2, doubleton 1.
const fn distribution_points_for(count: u8) -> u32 {
    match count {
        0 => 3,
        1 => 2,
        2 => 1,
        _ => 0,
    }
}

/// Length plus honor weight: how biddable a suit is.
pub fn suit_quality(hand: &Hand, suit: Suit) -> f32 {
    let cards = hand.cards_of_suit(suit);
    let honors: u32 = cards.iter().map(|card| card.rank.high_card_points()).sum();
    cards.len() as f32 * SUIT_LENGTH_FACTOR + honors as f32 * HIGH_CARD_QUALITY_FACTOR
}

/// Quality-maximal suit; the lowest suit wins ties.
pub fn best_suit(hand: &Hand) -> Suit {
    let mut best = Suit::Clubs;
    let mut best_quality = suit_quality(hand, best);
    for suit in [Suit::Diamonds, Suit::Hearts, Suit::Spades] {
        let quality = suit_quality(hand, suit);
        if quality > best_quality {
            best = suit;
            best_quality = quality;
        }
    }
    best
}

/// Bid level the point total supports, if any.
pub fn bid_level(total_points: u32) -> Option<u8> {
    if total_points >= MIN_POINTS_FOR_THREE_BID {
        Some(3)
    } else if total_points >= MIN_POINTS_FOR_TWO_BID {
        Some(2)
    } else if total_points >= MIN_POINTS_TO_OPEN {
        Some(1)
    } else {
        None
    }
}
