//! Error types.
//!
//! Rule violations never escape the public boolean API: they are logged at
//! `debug` level and turned into `false`. They exist as a typed enum so the
//! `try_*` operations and tests can say *why* an action was refused.
//!
//! Persistence errors are caught at the engine boundary and downgraded to
//! "no save available".

use thiserror::Error;

use crate::core::{Owner, Position};

/// Why a game action was refused. No state changes accompany any of these.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("the game is over")]
    GameOver,
    #[error("action not allowed during the {0} phase")]
    WrongPhase(&'static str),
    #[error("it is not {0}'s turn")]
    NotYourTurn(Owner),
    #[error("position {0} is off the board")]
    OutOfBounds(Position),
    #[error("position {0} is already occupied")]
    Occupied(Position),
    #[error("row {row} is not a deployment row for {owner}")]
    NotASetupRow { owner: Owner, row: u8 },
    #[error("{0} has no units left to place")]
    SetupExhausted(Owner),
    #[error("no unit at {0}")]
    NoUnit(Position),
    #[error("no unit is selected")]
    NoSelection,
    #[error("no actions remaining this turn")]
    NoActionsRemaining,
    #[error("{to} is not a legal destination from {from}")]
    IllegalDestination { from: Position, to: Position },
    #[error("{to} is not a legal target from {from}")]
    IllegalTarget { from: Position, to: Position },
    #[error("a flag cannot attack")]
    FlagCannotAttack,
    #[error("unit has no unused special ability")]
    AbilityUnavailable,
    #[error("cover at {0} blocks special abilities")]
    AbilityBlocked(Position),
}

/// Result alias for rule-checked operations.
pub type RuleResult<T> = Result<T, RuleError>;

/// Failure while writing or reading the autosave slot.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("no save available")]
    NoSave,
    #[error("save storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON snapshot codec failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("binary snapshot codec failed: {0}")]
    Binary(#[from] bincode::Error),
    #[error("corrupt snapshot: {0}")]
    Corrupt(String),
}

impl PersistenceError {
    /// Build a `Corrupt` error from any displayable reason.
    pub fn corrupt(reason: impl Into<String>) -> Self {
        PersistenceError::Corrupt(reason.into())
    }
}
