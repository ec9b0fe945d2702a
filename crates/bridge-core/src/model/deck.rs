use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const DECK_SIZE: usize = 52;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckError {
    InsufficientCards { requested: usize, remaining: usize },
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::InsufficientCards {
                requested,
                remaining,
            } => {
                write!(f, "asked to deal {requested} cards but only {remaining} remain")
            }
        }
    }
}

impl std::error::Error for DeckError {}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ORDERED {
                cards.push(Card::new(suit, rank));
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Remove and return the top `count` cards.
    pub fn deal(&mut self, count: usize) -> Result<Vec<Card>, DeckError> {
        if count > self.cards.len() {
            return Err(DeckError::InsufficientCards {
                requested: count,
                remaining: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..count).collect())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::{Deck, DeckError};
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_52_distinct_cards() {
        let deck = Deck::standard();
        let unique: HashSet<_> = deck.cards().iter().copied().collect();
        assert_eq!(deck.len(), 52);
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(42);
        let deck_b = Deck::shuffled_with_seed(42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a = Deck::shuffled_with_seed(1);
        let deck_b = Deck::shuffled_with_seed(2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn dealing_removes_cards_from_the_top() {
        let mut deck = Deck::standard();
        let first = deck.cards()[0];
        let dealt = deck.deal(13).unwrap();
        assert_eq!(dealt.len(), 13);
        assert_eq!(dealt[0], first);
        assert_eq!(deck.len(), 39);
    }

    #[test]
    fn overdealing_is_rejected() {
        let mut deck = Deck::standard();
        deck.deal(52).unwrap();
        assert_eq!(
            deck.deal(1),
            Err(DeckError::InsufficientCards {
                requested: 1,
                remaining: 0
            })
        );
    }
}
