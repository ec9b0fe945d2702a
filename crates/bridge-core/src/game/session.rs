use crate::model::auction::{Auction, AuctionError, Contract};
use crate::model::bid::Bid;
use crate::model::card::Card;
use crate::model::deck::{Deck, DeckError};
use crate::model::score::ScoreBoard;
use crate::model::seat::{Seat, SeatError, SeatPosition};
use crate::model::trick::{Trick, TrickError};
use crate::strategy::{BidContext, PlayContext, Strategy};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;

pub const HAND_SIZE: usize = 13;
pub const TRICKS_PER_GAME: usize = 13;

/// One complete game: deal, auction, thirteen tricks, scoring. Owns its
/// seats, auction outcome and trick history exclusively; nothing is shared
/// across games.
#[derive(Debug)]
pub struct Game {
    seats: [Seat; 4],
    dealer: SeatPosition,
    contract: Option<Contract>,
    tricks: Vec<Trick>,
    scores: ScoreBoard,
    rng: StdRng,
    seed: u64,
    played: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// All four seats passed; no play phase, no points.
    PassedOut,
    Played {
        contract: Contract,
        declarer_tricks: u8,
        made: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    InvalidSeatCount { found: usize },
    AlreadyPlayed,
    IllegalBid { seat: SeatPosition, bid: Bid },
    IllegalCard { seat: SeatPosition, card: Card },
    IncompleteTrick,
    Deck(DeckError),
    Auction(AuctionError),
    Seat(SeatError),
    Trick(TrickError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidSeatCount { found } => {
                write!(f, "bridge requires exactly 4 seats, got {found}")
            }
            GameError::AlreadyPlayed => write!(f, "game has already been played"),
            GameError::IllegalBid { seat, bid } => {
                write!(f, "{seat} returned {bid}, which is not a legal bid")
            }
            GameError::IllegalCard { seat, card } => {
                write!(f, "{seat} returned {card}, which is not a legal card")
            }
            GameError::IncompleteTrick => write!(f, "trick finished without a winner"),
            GameError::Deck(err) => write!(f, "{err}"),
            GameError::Auction(err) => write!(f, "{err}"),
            GameError::Seat(err) => write!(f, "{err}"),
            GameError::Trick(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for GameError {}

impl Game {
    /// Build a game from exactly four seats. The seed drives every random
    /// decision (dealer selection and the shuffle), so equal seeds replay
    /// identical deals.
    pub fn new(seats: Vec<Seat>, seed: u64) -> Result<Self, GameError> {
        let found = seats.len();
        let seats: [Seat; 4] = seats
            .try_into()
            .map_err(|_| GameError::InvalidSeatCount { found })?;
        let mut rng = StdRng::seed_from_u64(seed);
        let dealer =
            SeatPosition::from_index(rng.gen_range(0..4)).expect("dealer index in range");
        Ok(Self {
            seats,
            dealer,
            contract: None,
            tricks: Vec::new(),
            scores: ScoreBoard::new(),
            rng,
            seed,
            played: false,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn dealer(&self) -> SeatPosition {
        self.dealer
    }

    pub fn seat(&self, position: SeatPosition) -> &Seat {
        &self.seats[position.index()]
    }

    pub fn contract(&self) -> Option<Contract> {
        self.contract
    }

    pub fn tricks(&self) -> &[Trick] {
        &self.tricks
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    /// Run the full sequence: deal, auction, play, scoring. Final per-seat
    /// scores stay readable on the game afterwards.
    pub fn play(
        &mut self,
        strategies: &mut [Box<dyn Strategy>; 4],
    ) -> Result<GameOutcome, GameError> {
        if self.played {
            return Err(GameError::AlreadyPlayed);
        }
        self.played = true;

        self.deal(strategies)?;

        let contract = match self.run_auction(strategies)? {
            Some(contract) => contract,
            None => return Ok(GameOutcome::PassedOut),
        };

        self.play_tricks(contract, strategies)?;
        Ok(self.score_game(contract))
    }

    fn deal(&mut self, strategies: &mut [Box<dyn Strategy>; 4]) -> Result<(), GameError> {
        let mut deck = Deck::shuffled(&mut self.rng);
        for position in SeatPosition::LOOP {
            let cards = deck.deal(HAND_SIZE).map_err(GameError::Deck)?;
            self.seats[position.index()].receive_cards(&cards);
            strategies[position.index()].receive_cards(&cards);
        }
        Ok(())
    }

    fn run_auction(
        &mut self,
        strategies: &mut [Box<dyn Strategy>; 4],
    ) -> Result<Option<Contract>, GameError> {
        let mut auction = Auction::new(self.dealer);
        loop {
            let seat = auction.turn();
            let legal = auction.legal_bids();
            let bid = {
                let ctx = BidContext {
                    seat,
                    hand: self.seats[seat.index()].hand(),
                    legal_bids: &legal,
                };
                strategies[seat.index()].make_bid(&ctx)
            };
            if !legal.contains(&bid) {
                return Err(GameError::IllegalBid { seat, bid });
            }
            if auction.submit(bid).map_err(GameError::Auction)? {
                break;
            }
        }
        self.contract = auction.contract();
        Ok(self.contract)
    }

    fn play_tricks(
        &mut self,
        contract: Contract,
        strategies: &mut [Box<dyn Strategy>; 4],
    ) -> Result<(), GameError> {
        let trump = contract.trump();
        let mut leader = contract.declarer.next();

        for _ in 0..TRICKS_PER_GAME {
            let mut trick = Trick::new(leader, trump);
            let mut seat = leader;
            for _ in 0..4 {
                let legal = trick.legal_cards(self.seats[seat.index()].hand());
                let card = {
                    let ctx = PlayContext {
                        seat,
                        hand: self.seats[seat.index()].hand(),
                        legal_cards: &legal,
                        lead_suit: trick.lead_suit(),
                        trump,
                    };
                    strategies[seat.index()].choose_card(&ctx)
                };
                if !legal.contains(&card) {
                    return Err(GameError::IllegalCard { seat, card });
                }
                self.seats[seat.index()].play_card(card).map_err(GameError::Seat)?;
                strategies[seat.index()].card_played(card);
                trick.play(seat, card).map_err(GameError::Trick)?;
                seat = seat.next();
            }
            let winner = trick.winner().ok_or(GameError::IncompleteTrick)?;
            self.seats[winner.index()].record_trick_won();
            self.tricks.push(trick);
            leader = winner;
        }
        Ok(())
    }

    fn score_game(&mut self, contract: Contract) -> GameOutcome {
        let declarer = contract.declarer;
        let declarer_tricks = self.seats[declarer.index()].tricks_won()
            + self.seats[declarer.partner().index()].tricks_won();
        let made = declarer_tricks >= contract.tricks_needed();
        self.scores.apply_contract_result(declarer, made);
        GameOutcome::Played {
            contract,
            declarer_tricks,
            made,
        }
    }
}
