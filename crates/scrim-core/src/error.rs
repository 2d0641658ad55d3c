use thiserror::Error;

use crate::model::lane::Lane;

/// Precondition violations surfaced by the balancer. No partial result is
/// produced when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    #[error("expected exactly {expected} players, got {actual}")]
    InvalidPlayerCount { expected: usize, actual: usize },
    #[error("invalid lane set: {0}")]
    InvalidLaneSet(LaneSetProblem),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaneSetProblem {
    #[error("expected {expected} lanes, got {actual}")]
    WrongSize { expected: usize, actual: usize },
    #[error("lane '{0}' listed more than once")]
    Duplicate(Lane),
    #[error("unknown lane name '{0}'")]
    Unknown(String),
}

impl BalanceError {
    pub(crate) fn player_count(expected: usize, actual: usize) -> Self {
        BalanceError::InvalidPlayerCount { expected, actual }
    }
}

impl From<LaneSetProblem> for BalanceError {
    fn from(problem: LaneSetProblem) -> Self {
        BalanceError::InvalidLaneSet(problem)
    }
}
