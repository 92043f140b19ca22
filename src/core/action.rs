//! Action vocabulary.
//!
//! Actions are the commands a player (or the AI planner) can issue. The
//! engine's `apply` funnels each one into the matching rule-checked
//! operation, so the AI drives the game through exactly the same checks as
//! the human's clicks.

use serde::{Deserialize, Serialize};

use super::position::Position;

/// A command issued to the engine.
///
/// ## Example
///
/// ```
/// use galactic_gladiators::core::{Action, Position};
///
/// let step = Action::Move { from: Position::new(1, 4), to: Position::new(2, 4) };
/// assert!(step.consumes_action());
/// assert!(!Action::EndTurn.consumes_action());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Place the head of the current setup queue.
    Place { at: Position },
    /// Select an own unit (or clear the selection with an empty cell).
    Select { at: Position },
    /// Move the unit at `from` (or, in rally mode, the ally it commands).
    Move { from: Position, to: Position },
    /// Attack `to` with the unit at `from`.
    Attack { from: Position, to: Position },
    /// Activate the special ability of the unit at `at`.
    UseAbility { at: Position },
    /// Hand the turn to the opponent.
    EndTurn,
}

impl Action {
    /// Whether a successful application spends one turn action.
    #[must_use]
    pub const fn consumes_action(&self) -> bool {
        matches!(self, Action::Move { .. } | Action::Attack { .. })
    }
}
