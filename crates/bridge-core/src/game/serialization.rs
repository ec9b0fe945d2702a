use crate::game::session::Game;
use crate::model::hand::Hand;
use crate::model::seat::SeatPosition;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};

/// Suit order used by double-dummy solver deal strings.
const SOLVER_SUIT_ORDER: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

/// One hand as four dot-separated suit groups (spades first), ranks listed
/// highest to lowest.
pub fn hand_string(hand: &Hand) -> String {
    let mut groups = Vec::with_capacity(4);
    for suit in SOLVER_SUIT_ORDER {
        let mut cards = hand.cards_of_suit(suit);
        cards.sort_by(|a, b| b.rank.cmp(&a.rank));
        groups.push(
            cards
                .iter()
                .map(|card| card.rank.to_string())
                .collect::<String>(),
        );
    }
    groups.join(".")
}

impl Game {
    /// Project the current deal into the textual encoding consumed by
    /// external double-dummy tooling: four space-separated hands in seat
    /// order, each formatted by [`hand_string`].
    pub fn deal_string(&self) -> String {
        SeatPosition::LOOP
            .iter()
            .map(|seat| hand_string(self.seat(*seat).hand()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Reproducibility record for one game: everything needed to replay or
/// audit it without persisting trick-by-trick history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    pub seed: u64,
    pub dealer: SeatPosition,
    pub scores: [u32; 4],
    pub contract: Option<String>,
    pub declarer: Option<SeatPosition>,
}

impl GameSnapshot {
    pub fn capture(game: &Game) -> Self {
        GameSnapshot {
            seed: game.seed(),
            dealer: game.dealer(),
            scores: *game.scores().standings(),
            contract: game.contract().map(|contract| contract.bid.to_string()),
            declarer: game.contract().map(|contract| contract.declarer),
        }
    }

    pub fn to_json(game: &Game) -> serde_json::Result<String> {
        let snapshot = Self::capture(game);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::{GameSnapshot, hand_string};
    use crate::game::session::Game;
    use crate::model::card::Card;
    use crate::model::hand::Hand;
    use crate::model::rank::Rank;
    use crate::model::seat::Seat;
    use crate::model::suit::Suit;

    fn seats() -> Vec<Seat> {
        vec![
            Seat::new("North"),
            Seat::new("East"),
            Seat::new("South"),
            Seat::new("West"),
        ]
    }

    #[test]
    fn hand_string_orders_suits_and_ranks() {
        let hand = Hand::with_cards(vec![
            Card::new(Suit::Clubs, Rank::Four),
            Card::new(Suit::Spades, Rank::Ten),
            Card::new(Suit::Spades, Rank::Ace),
            Card::new(Suit::Hearts, Rank::King),
            Card::new(Suit::Clubs, Rank::Queen),
        ]);
        assert_eq!(hand_string(&hand), "A10.K..Q4");
    }

    #[test]
    fn empty_hand_renders_bare_separators() {
        assert_eq!(hand_string(&Hand::new()), "...");
    }

    #[test]
    fn deal_string_joins_four_hands_in_seat_order() {
        let game = Game::new(seats(), 1).unwrap();
        // Hands are empty before the deal; the shape is still four groups.
        assert_eq!(game.deal_string(), "... ... ... ...");
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let game = Game::new(seats(), 99).unwrap();
        let json = GameSnapshot::to_json(&game).unwrap();
        assert!(json.contains("\"seed\": 99"));
        assert!(json.contains("\"contract\": null"));
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let game = Game::new(seats(), 123).unwrap();
        let snapshot = GameSnapshot::capture(&game);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(GameSnapshot::from_json(&json).unwrap(), snapshot);
    }
}
