use crate::model::bid::Bid;
use crate::model::seat::SeatPosition;
use crate::model::strain::Strain;
use std::fmt;

/// Tricks the declaring side must take beyond the book of six.
const BOOK_TRICKS: u8 = 6;

/// The bidding phase: seats call in rotation, starting left of the dealer,
/// until a bid stands through three passes or all four seats pass.
#[derive(Debug, Clone)]
pub struct Auction {
    dealer: SeatPosition,
    turn: SeatPosition,
    calls: Vec<(SeatPosition, Bid)>,
    highest_bid: Bid,
    highest_bidder: Option<SeatPosition>,
    declarer: Option<SeatPosition>,
    consecutive_passes: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contract {
    pub declarer: SeatPosition,
    pub bid: Bid,
}

impl Contract {
    pub fn level(&self) -> u8 {
        self.bid.level().expect("a contract never holds a pass bid")
    }

    pub fn trump(&self) -> Strain {
        self.bid
            .strain()
            .expect("a contract never holds a pass bid")
    }

    pub fn tricks_needed(&self) -> u8 {
        BOOK_TRICKS + self.level()
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.bid, self.declarer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuctionError {
    AuctionComplete,
    BidNotHigher { bid: Bid, highest: Bid },
}

impl fmt::Display for AuctionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuctionError::AuctionComplete => write!(f, "auction already complete"),
            AuctionError::BidNotHigher { bid, highest } => {
                write!(f, "bid {bid} does not beat the standing {highest}")
            }
        }
    }
}

impl std::error::Error for AuctionError {}

impl Auction {
    pub fn new(dealer: SeatPosition) -> Self {
        Self {
            dealer,
            turn: dealer.next(),
            calls: Vec::new(),
            highest_bid: Bid::Pass,
            highest_bidder: None,
            declarer: None,
            consecutive_passes: 0,
        }
    }

    pub fn dealer(&self) -> SeatPosition {
        self.dealer
    }

    pub fn turn(&self) -> SeatPosition {
        self.turn
    }

    pub fn calls(&self) -> &[(SeatPosition, Bid)] {
        &self.calls
    }

    pub fn highest_bid(&self) -> Bid {
        self.highest_bid
    }

    pub fn is_complete(&self) -> bool {
        (self.highest_bidder.is_some() && self.consecutive_passes == 3)
            || self.consecutive_passes == 4
    }

    /// Pass first, then every contract strictly above the standing bid,
    /// ascending. Pure function of the auction state.
    pub fn legal_bids(&self) -> Vec<Bid> {
        let mut bids = vec![Bid::Pass];
        for level in Bid::MIN_LEVEL..=Bid::MAX_LEVEL {
            for strain in Strain::ALL {
                let bid = Bid::contract(level, strain);
                if bid > self.highest_bid {
                    bids.push(bid);
                }
            }
        }
        bids
    }

    /// Record the current seat's call and advance the turn. Returns whether
    /// the auction is now complete.
    pub fn submit(&mut self, bid: Bid) -> Result<bool, AuctionError> {
        if self.is_complete() {
            return Err(AuctionError::AuctionComplete);
        }

        let seat = self.turn;
        if bid.is_pass() {
            self.consecutive_passes += 1;
        } else {
            if bid <= self.highest_bid {
                return Err(AuctionError::BidNotHigher {
                    bid,
                    highest: self.highest_bid,
                });
            }
            self.declarer = Some(self.declarer_for(seat, bid));
            self.highest_bid = bid;
            self.highest_bidder = Some(seat);
            self.consecutive_passes = 0;
        }

        self.calls.push((seat, bid));
        self.turn = self.turn.next();
        Ok(self.is_complete())
    }

    pub fn contract(&self) -> Option<Contract> {
        let declarer = self.declarer?;
        match self.highest_bid {
            Bid::Pass => None,
            bid => Some(Contract { declarer, bid }),
        }
    }

    /// The declarer belongs to the partnership that first named the
    /// contracted strain: a partner raising the same strain keeps the
    /// original declarer, while a new strain or an opposing bid reassigns it.
    fn declarer_for(&self, bidder: SeatPosition, bid: Bid) -> SeatPosition {
        match self.declarer {
            Some(previous)
                if previous.same_partnership(bidder)
                    && bid.strain() == self.highest_bid.strain() =>
            {
                previous
            }
            _ => bidder,
        }
    }
}
