//! Error taxonomy shared by the hand controller and the match environment.
//!
//! Only [`EngineError::IllegalAction`] is recoverable: the state is untouched
//! and the caller may resubmit. Everything else signals a broken invariant or
//! a bad configuration and ends the match.

use crate::config::ConfigError;
use crate::evaluator::EvalError;

/// A submitted action violated a betting constraint. State is unchanged.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IllegalAction {
    #[error("the hand is over")]
    HandOver,
    #[error("the match is over")]
    MatchOver,
    #[error("seat {expected} is to act, not seat {got}")]
    WrongActor { expected: usize, got: usize },
    #[error("cannot check facing a bet: {to_call} to call")]
    CheckFacingBet { to_call: u64 },
    #[error("nothing to call")]
    NothingToCall,
    #[error("raising is not allowed: {reason}")]
    RaiseNotAllowed { reason: &'static str },
    #[error("raise to {got} is below the minimum raise to {min}")]
    RaiseBelowMinimum { min: u64, got: u64 },
    #[error("raise to {got} exceeds the maximum raise to {max}")]
    RaiseAboveMaximum { max: u64, got: u64 },
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum EngineError {
    #[error("illegal action: {0}")]
    IllegalAction(#[from] IllegalAction),
    #[error("deck exhausted: requested {requested}, {remaining} remaining")]
    DeckExhausted { requested: usize, remaining: usize },
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
    #[error("showdown evaluation failed: {0}")]
    Evaluation(#[from] EvalError),
    #[error("environment has not been reset")]
    NotReset,
}

impl EngineError {
    /// True when the caller may retry with a corrected action.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EngineError::IllegalAction(_))
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
