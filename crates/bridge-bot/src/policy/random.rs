use bridge_core::model::bid::Bid;
use bridge_core::model::card::Card;
use bridge_core::strategy::{BidContext, PlayContext, Strategy};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Picks uniformly from whatever is legal. Useful as a baseline opponent
/// and for exercising the engine across arbitrary auctions.
#[derive(Debug)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn make_bid(&mut self, ctx: &BidContext<'_>) -> Bid {
        ctx.legal_bids[self.rng.gen_range(0..ctx.legal_bids.len())]
    }

    fn choose_card(&mut self, ctx: &PlayContext<'_>) -> Card {
        ctx.legal_cards[self.rng.gen_range(0..ctx.legal_cards.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::RandomStrategy;
    use bridge_core::model::auction::Auction;
    use bridge_core::model::card::Card;
    use bridge_core::model::hand::Hand;
    use bridge_core::model::rank::Rank;
    use bridge_core::model::seat::SeatPosition;
    use bridge_core::model::strain::Strain;
    use bridge_core::model::suit::Suit;
    use bridge_core::strategy::{BidContext, PlayContext, Strategy};

    #[test]
    fn bids_stay_inside_the_legal_set() {
        let auction = Auction::new(SeatPosition::North);
        let legal = auction.legal_bids();
        let hand = Hand::new();
        let mut strategy = RandomStrategy::with_seed(7);
        for _ in 0..100 {
            let bid = strategy.make_bid(&BidContext {
                seat: SeatPosition::East,
                hand: &hand,
                legal_bids: &legal,
            });
            assert!(legal.contains(&bid));
        }
    }

    #[test]
    fn cards_stay_inside_the_legal_set() {
        let hand = Hand::with_cards(vec![
            Card::new(Suit::Clubs, Rank::Two),
            Card::new(Suit::Hearts, Rank::Nine),
            Card::new(Suit::Spades, Rank::Ace),
        ]);
        let legal: Vec<Card> = hand.cards().to_vec();
        let mut strategy = RandomStrategy::with_seed(11);
        for _ in 0..100 {
            let card = strategy.choose_card(&PlayContext {
                seat: SeatPosition::South,
                hand: &hand,
                legal_cards: &legal,
                lead_suit: None,
                trump: Strain::NoTrump,
            });
            assert!(legal.contains(&card));
        }
    }

    #[test]
    fn equal_seeds_make_equal_choices() {
        let auction = Auction::new(SeatPosition::North);
        let legal = auction.legal_bids();
        let hand = Hand::new();
        let ctx = BidContext {
            seat: SeatPosition::West,
            hand: &hand,
            legal_bids: &legal,
        };
        let mut a = RandomStrategy::with_seed(42);
        let mut b = RandomStrategy::with_seed(42);
        for _ in 0..20 {
            assert_eq!(a.make_bid(&ctx), b.make_bid(&ctx));
        }
    }
}
