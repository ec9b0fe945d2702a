use crate::model::bid::Bid;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::seat::SeatPosition;
use crate::model::strain::Strain;
use crate::model::suit::Suit;

/// Context provided to a strategy when a call is due in the auction.
pub struct BidContext<'a> {
    pub seat: SeatPosition,
    pub hand: &'a Hand,
    pub legal_bids: &'a [Bid],
}

/// Context provided to a strategy when a card is due in a trick.
/// `lead_suit` is `None` when the seat is leading.
pub struct PlayContext<'a> {
    pub seat: SeatPosition,
    pub hand: &'a Hand,
    pub legal_cards: &'a [Card],
    pub lead_suit: Option<Suit>,
    pub trump: Strain,
}

/// Decision interface for one seat. Calls are synchronous and may block
/// (e.g. a relay awaiting external input); the engine defines no timeout.
pub trait Strategy: Send {
    /// Must return a member of `ctx.legal_bids`.
    fn make_bid(&mut self, ctx: &BidContext<'_>) -> Bid;

    /// Must return a member of `ctx.legal_cards`.
    fn choose_card(&mut self, ctx: &PlayContext<'_>) -> Card;

    /// Hand-management hook: the seat was dealt these cards.
    fn receive_cards(&mut self, _cards: &[Card]) {}

    /// Hand-management hook: the engine accepted this card from the seat.
    fn card_played(&mut self, _card: Card) {}
}
