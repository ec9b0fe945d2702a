use bridge_core::model::bid::Bid;
use bridge_core::model::card::Card;
use bridge_core::strategy::{BidContext, PlayContext, Strategy};

/// Never contracts: passes every auction and plays the first legal card.
#[derive(Debug, Default)]
pub struct PassStrategy;

impl PassStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for PassStrategy {
    fn make_bid(&mut self, _ctx: &BidContext<'_>) -> Bid {
        Bid::Pass
    }

    fn choose_card(&mut self, ctx: &PlayContext<'_>) -> Card {
        ctx.legal_cards[0]
    }
}
