use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Deck exhausted: requested {requested}, remaining {remaining}")]
    DeckExhausted { requested: usize, remaining: usize },
    #[error("Hand evaluation needs 5 to 7 cards, got {0}")]
    InvalidCardCount(usize),
    #[error("Invalid card: {0:?}")]
    InvalidCard(String),
    #[error("Invalid bet amount: {amount}, minimum: {minimum}")]
    InvalidBetAmount { amount: u32, minimum: u32 },
    #[error("Insufficient chips for action: need {needed}, have {available}")]
    InsufficientChips { needed: u32, available: u32 },
    #[error("Cannot check while facing a bet of {to_call}")]
    CannotCheck { to_call: u32 },
    #[error("Nothing to call")]
    NothingToCall,
    #[error("Raising is not allowed for this seat")]
    RaiseNotAllowed,
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("Player already folded")]
    PlayerAlreadyFolded,
    #[error("It's not seat {actual}'s turn (expected seat {expected:?})")]
    NotPlayersTurn {
        expected: Option<usize>,
        actual: usize,
    },
    #[error("At least two funded seats are required, got {0}")]
    NotEnoughPlayers(usize),
    #[error("Seat index {0} is out of range")]
    SeatOutOfRange(usize),
    #[error("Stacks at the table total {0} chips, more than a pot can hold")]
    TooManyChips(u64),
}
