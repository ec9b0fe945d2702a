use crate::eval::{self, HandEvaluation};
use bridge_core::model::bid::Bid;
use bridge_core::model::card::Card;
use bridge_core::model::rank::Rank;
use bridge_core::model::strain::Strain;
use bridge_core::model::suit::Suit;
use bridge_core::strategy::{BidContext, PlayContext, Strategy};
use tracing::{Level, event};

/// The skilled built-in strategy: standard point-count bidding and basic
/// lead/follow conventions.
#[derive(Debug, Default)]
pub struct HeuristicStrategy;

impl HeuristicStrategy {
    pub fn new() -> Self {
        Self
    }

    /// The bid the hand is worth, ignoring what is currently legal.
    fn desired_bid(&self, ctx: &BidContext<'_>, evaluation: &HandEvaluation) -> Option<Bid> {
        if evaluation.total_points() < eval::MIN_POINTS_TO_BID {
            return None;
        }
        let level = eval::bid_level(evaluation.total_points())?;
        let strain = if evaluation.is_balanced()
            && evaluation.high_card_points >= eval::MIN_HCP_FOR_NO_TRUMP
        {
            Strain::NoTrump
        } else {
            Strain::from_suit(eval::best_suit(ctx.hand))
        };
        Some(Bid::contract(level, strain))
    }

    fn lead_card(&self, ctx: &PlayContext<'_>) -> Card {
        let lengths = ctx.hand.suit_lengths();
        // Longest suit still held; the lowest suit wins ties.
        let mut longest = Suit::Clubs;
        for suit in Suit::ALL {
            if lengths[suit.index()] > lengths[longest.index()] {
                longest = suit;
            }
        }

        let mut suit_cards: Vec<Card> = ctx
            .legal_cards
            .iter()
            .copied()
            .filter(|card| card.suit == longest)
            .collect();
        if suit_cards.is_empty() {
            return ctx
                .legal_cards
                .iter()
                .copied()
                .max_by_key(|card| card.rank)
                .expect("legal set is never empty");
        }

        suit_cards.sort_by_key(|card| card.rank);
        if suit_cards.len() >= 4 {
            // Fourth highest from the longest suit.
            suit_cards[suit_cards.len() - 4]
        } else {
            *suit_cards.last().expect("suit cards are non-empty")
        }
    }

    fn follow_card(&self, ctx: &PlayContext<'_>, lead: Suit) -> Card {
        let mut suit_cards: Vec<Card> = ctx
            .legal_cards
            .iter()
            .copied()
            .filter(|card| card.suit == lead)
            .collect();
        if suit_cards.is_empty() {
            // Void in the lead suit: discard the globally lowest card.
            return ctx
                .legal_cards
                .iter()
                .copied()
                .min_by_key(|card| (card.suit, card.rank))
                .expect("legal set is never empty");
        }

        suit_cards.sort_by_key(|card| card.rank);
        let highest = *suit_cards.last().expect("suit cards are non-empty");
        if matches!(highest.rank, Rank::Ace | Rank::King) {
            highest
        } else {
            suit_cards[0]
        }
    }
}

impl Strategy for HeuristicStrategy {
    fn make_bid(&mut self, ctx: &BidContext<'_>) -> Bid {
        let evaluation = eval::evaluate(ctx.hand);
        // Lowest legal bid at or above the desired one, otherwise pass.
        let chosen = self
            .desired_bid(ctx, &evaluation)
            .and_then(|desired| {
                ctx.legal_bids
                    .iter()
                    .copied()
                    .find(|bid| !bid.is_pass() && *bid >= desired)
            })
            .unwrap_or(Bid::Pass);
        log_bid_decision(ctx, &evaluation, chosen);
        chosen
    }

    fn choose_card(&mut self, ctx: &PlayContext<'_>) -> Card {
        let chosen = match ctx.lead_suit {
            None => self.lead_card(ctx),
            Some(lead) => self.follow_card(ctx, lead),
        };
        log_play_decision(ctx, chosen);
        chosen
    }
}

fn log_bid_decision(ctx: &BidContext<'_>, evaluation: &HandEvaluation, chosen: Bid) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    event!(
        target: "bridge_bot::bid",
        Level::INFO,
        seat = %ctx.seat,
        hcp = evaluation.high_card_points,
        total_points = evaluation.total_points(),
        balanced = evaluation.is_balanced(),
        legal_count = ctx.legal_bids.len(),
        chosen = %chosen,
    );
}

fn log_play_decision(ctx: &PlayContext<'_>, chosen: Card) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    event!(
        target: "bridge_bot::play",
        Level::INFO,
        seat = %ctx.seat,
        lead_suit = ?ctx.lead_suit,
        trump = %ctx.trump,
        legal_count = ctx.legal_cards.len(),
        chosen = %chosen,
    );
}

#[cfg(test)]
mod tests {
    use super::HeuristicStrategy;
    use bridge_core::model::auction::Auction;
    use bridge_core::model::bid::Bid;
    use bridge_core::model::card::Card;
    use bridge_core::model::hand::Hand;
    use bridge_core::model::rank::Rank;
    use bridge_core::model::seat::SeatPosition;
    use bridge_core::model::strain::Strain;
    use bridge_core::model::suit::Suit;
    use bridge_core::strategy::{BidContext, PlayContext, Strategy};

    fn hand(cards: &[(Suit, Rank)]) -> Hand {
        Hand::with_cards(cards.iter().map(|&(s, r)| Card::new(s, r)).collect())
    }

    fn bid_with(sample: &Hand, legal: &[Bid]) -> Bid {
        let mut strategy = HeuristicStrategy::new();
        strategy.make_bid(&BidContext {
            seat: SeatPosition::North,
            hand: sample,
            legal_bids: legal,
        })
    }

    fn card_with(sample: &Hand, legal: &[Card], lead: Option<Suit>) -> Card {
        let mut strategy = HeuristicStrategy::new();
        strategy.choose_card(&PlayContext {
            seat: SeatPosition::North,
            hand: sample,
            legal_cards: legal,
            lead_suit: lead,
            trump: Strain::NoTrump,
        })
    }

    /// 17 HCP, 4-3-3-3.
    fn strong_balanced_hand() -> Hand {
        hand(&[
            (Suit::Spades, Rank::Ace),
            (Suit::Spades, Rank::King),
            (Suit::Spades, Rank::Queen),
            (Suit::Spades, Rank::Two),
            (Suit::Hearts, Rank::Ace),
            (Suit::Hearts, Rank::Three),
            (Suit::Hearts, Rank::Two),
            (Suit::Diamonds, Rank::Ace),
            (Suit::Diamonds, Rank::Five),
            (Suit::Diamonds, Rank::Four),
            (Suit::Clubs, Rank::Five),
            (Suit::Clubs, Rank::Four),
            (Suit::Clubs, Rank::Three),
        ])
    }

    #[test]
    fn strong_balanced_hand_bids_no_trump() {
        let auction = Auction::new(SeatPosition::West);
        let chosen = bid_with(&strong_balanced_hand(), &auction.legal_bids());
        assert_eq!(chosen, Bid::contract(2, Strain::NoTrump));
    }

    #[test]
    fn weak_hand_passes() {
        let weak = hand(&[
            (Suit::Spades, Rank::Seven),
            (Suit::Spades, Rank::Six),
            (Suit::Hearts, Rank::Five),
            (Suit::Hearts, Rank::Four),
            (Suit::Diamonds, Rank::Three),
            (Suit::Diamonds, Rank::Two),
            (Suit::Clubs, Rank::Nine),
            (Suit::Clubs, Rank::Eight),
            (Suit::Clubs, Rank::Seven),
            (Suit::Clubs, Rank::Six),
            (Suit::Clubs, Rank::Five),
            (Suit::Clubs, Rank::Four),
            (Suit::Clubs, Rank::Three),
        ]);
        let auction = Auction::new(SeatPosition::West);
        assert_eq!(bid_with(&weak, &auction.legal_bids()), Bid::Pass);
    }

    #[test]
    fn unbalanced_opener_bids_its_best_suit() {
        // 13 HCP with a six-card heart suit: 1H territory.
        let shapely = hand(&[
            (Suit::Hearts, Rank::Ace),
            (Suit::Hearts, Rank::King),
            (Suit::Hearts, Rank::Queen),
            (Suit::Hearts, Rank::Five),
            (Suit::Hearts, Rank::Four),
            (Suit::Hearts, Rank::Three),
            (Suit::Spades, Rank::Jack),
            (Suit::Spades, Rank::Four),
            (Suit::Diamonds, Rank::King),
            (Suit::Diamonds, Rank::Six),
            (Suit::Clubs, Rank::Four),
            (Suit::Clubs, Rank::Three),
            (Suit::Clubs, Rank::Two),
        ]);
        let auction = Auction::new(SeatPosition::West);
        assert_eq!(
            bid_with(&shapely, &auction.legal_bids()),
            Bid::contract(1, Strain::Hearts)
        );
    }

    #[test]
    fn desired_bid_below_the_standing_bid_escalates_to_the_first_legal() {
        let mut auction = Auction::new(SeatPosition::West);
        auction.submit(Bid::contract(2, Strain::Clubs)).unwrap();

        // Wants 1H; everything legal starts at 2D, which is >= 1H.
        let shapely = hand(&[
            (Suit::Hearts, Rank::Ace),
            (Suit::Hearts, Rank::King),
            (Suit::Hearts, Rank::Queen),
            (Suit::Hearts, Rank::Five),
            (Suit::Hearts, Rank::Four),
            (Suit::Hearts, Rank::Three),
            (Suit::Spades, Rank::Jack),
            (Suit::Spades, Rank::Four),
            (Suit::Diamonds, Rank::King),
            (Suit::Diamonds, Rank::Six),
            (Suit::Clubs, Rank::Four),
            (Suit::Clubs, Rank::Three),
            (Suit::Clubs, Rank::Two),
        ]);
        assert_eq!(
            bid_with(&shapely, &auction.legal_bids()),
            Bid::contract(2, Strain::Diamonds)
        );
    }

    #[test]
    fn leads_fourth_highest_from_the_longest_suit() {
        let sample = hand(&[
            (Suit::Spades, Rank::Ace),
            (Suit::Spades, Rank::Jack),
            (Suit::Spades, Rank::Eight),
            (Suit::Spades, Rank::Six),
            (Suit::Spades, Rank::Two),
            (Suit::Hearts, Rank::King),
            (Suit::Hearts, Rank::Four),
            (Suit::Diamonds, Rank::Nine),
        ]);
        let legal: Vec<Card> = sample.cards().to_vec();
        assert_eq!(
            card_with(&sample, &legal, None),
            Card::new(Suit::Spades, Rank::Six)
        );
    }

    #[test]
    fn leads_highest_of_a_short_longest_suit() {
        let sample = hand(&[
            (Suit::Diamonds, Rank::Queen),
            (Suit::Diamonds, Rank::Seven),
            (Suit::Diamonds, Rank::Three),
            (Suit::Clubs, Rank::King),
            (Suit::Clubs, Rank::Two),
        ]);
        let legal: Vec<Card> = sample.cards().to_vec();
        assert_eq!(
            card_with(&sample, &legal, None),
            Card::new(Suit::Diamonds, Rank::Queen)
        );
    }

    #[test]
    fn follows_low_without_a_top_honor() {
        let sample = hand(&[
            (Suit::Hearts, Rank::Queen),
            (Suit::Hearts, Rank::Seven),
            (Suit::Hearts, Rank::Two),
            (Suit::Clubs, Rank::Ace),
        ]);
        let legal = sample.cards_of_suit(Suit::Hearts);
        assert_eq!(
            card_with(&sample, &legal, Some(Suit::Hearts)),
            Card::new(Suit::Hearts, Rank::Two)
        );
    }

    #[test]
    fn follows_high_with_a_likely_winner() {
        let sample = hand(&[
            (Suit::Hearts, Rank::Ace),
            (Suit::Hearts, Rank::Seven),
            (Suit::Clubs, Rank::Queen),
        ]);
        let legal = sample.cards_of_suit(Suit::Hearts);
        assert_eq!(
            card_with(&sample, &legal, Some(Suit::Hearts)),
            Card::new(Suit::Hearts, Rank::Ace)
        );
    }

    #[test]
    fn discards_the_lowest_card_when_void_in_the_lead_suit() {
        let sample = hand(&[
            (Suit::Spades, Rank::Ace),
            (Suit::Diamonds, Rank::Nine),
            (Suit::Clubs, Rank::Three),
        ]);
        let legal: Vec<Card> = sample.cards().to_vec();
        assert_eq!(
            card_with(&sample, &legal, Some(Suit::Hearts)),
            Card::new(Suit::Clubs, Rank::Three)
        );
    }
}
