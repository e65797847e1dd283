use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::PlayerAction as A;

/// Forced bets posted before the cards are dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blinds {
    pub small: u32,
    pub big: u32,
}

impl Blinds {
    pub fn new(small: u32, big: u32) -> Self {
        Self { small, big }
    }
}

/// Inclusive range for the total a seat may raise its street bet to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaiseBounds {
    pub min_total: u32,
    pub max_total: u32,
}

/// What the acting seat is allowed to do. Folding is always allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalActions {
    /// `current_bet - street_bet`, before capping to the stack
    pub to_call: u32,
    pub can_check: bool,
    /// Chips a call would move (capped to the stack), if calling is legal
    pub call: Option<u32>,
    pub raise: Option<RaiseBounds>,
}

impl LegalActions {
    pub fn call_is_all_in(&self, stack: u32) -> bool {
        self.call.is_some_and(|c| c >= stack)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips moved by the call
    Call(u32),
    /// New street-bet total
    Raise(u32),
    /// Street-bet total once the whole stack is in
    AllIn(u32),
}

/// Smallest total a raise may bring the street bet to: the current bet plus
/// the larger of the big blind and the current bet.
pub fn min_raise_to(current_bet: u32, big_blind: u32) -> u32 {
    current_bet.saturating_add(big_blind.max(current_bet))
}

pub fn legal_actions(stack: u32, street_bet: u32, current_bet: u32, big_blind: u32) -> LegalActions {
    let to_call = current_bet.saturating_sub(street_bet);
    let call = (to_call > 0).then(|| to_call.min(stack));
    let raise = (stack > to_call).then(|| {
        let max_total = street_bet + stack;
        RaiseBounds {
            min_total: min_raise_to(current_bet, big_blind).min(max_total),
            max_total,
        }
    });
    LegalActions {
        to_call,
        can_check: to_call == 0,
        call,
        raise,
    }
}

/// Validates a player action against the seat's chips and the table's bet.
///
/// Calls that the stack cannot cover and raises of the entire stack become
/// [`ValidatedAction::AllIn`]; an all-in raise is accepted even when it is
/// smaller than the minimum raise.
///
/// # Errors
///
/// - [`GameError::CannotCheck`] - check while facing a bet
/// - [`GameError::NothingToCall`] - call with nothing to call
/// - [`GameError::RaiseNotAllowed`] - raise when the stack cannot exceed the call
/// - [`GameError::InsufficientChips`] - raise total beyond the stack
/// - [`GameError::InvalidBetAmount`] - raise total below the minimum
///
/// # Examples
///
/// ```
/// use holdem_engine::rules::{validate_action, ValidatedAction};
/// use holdem_engine::player::PlayerAction;
///
/// // Raise to 60 over a 20 big blind
/// let result = validate_action(1000, 0, 20, 20, PlayerAction::Raise(60));
/// assert_eq!(result, Ok(ValidatedAction::Raise(60)));
///
/// // 50 chips facing a raise to 60: the call is all-in for 50
/// let result = validate_action(50, 0, 60, 20, PlayerAction::Call);
/// assert_eq!(result, Ok(ValidatedAction::AllIn(50)));
/// ```
pub fn validate_action(
    stack: u32,
    street_bet: u32,
    current_bet: u32,
    big_blind: u32,
    action: A,
) -> Result<ValidatedAction, GameError> {
    let legal = legal_actions(stack, street_bet, current_bet, big_blind);
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if legal.can_check {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::CannotCheck {
                    to_call: legal.to_call,
                })
            }
        }
        A::Call => match legal.call {
            None => Err(GameError::NothingToCall),
            Some(chips) if chips >= stack => Ok(ValidatedAction::AllIn(street_bet + stack)),
            Some(chips) => Ok(ValidatedAction::Call(chips)),
        },
        A::Raise(total) => {
            let bounds = legal.raise.ok_or(GameError::RaiseNotAllowed)?;
            if total > bounds.max_total {
                Err(GameError::InsufficientChips {
                    needed: total - street_bet,
                    available: stack,
                })
            } else if total == bounds.max_total {
                Ok(ValidatedAction::AllIn(total))
            } else if total < min_raise_to(current_bet, big_blind) {
                Err(GameError::InvalidBetAmount {
                    amount: total,
                    minimum: bounds.min_total,
                })
            } else {
                Ok(ValidatedAction::Raise(total))
            }
        }
    }
}
