//! Game events.
//!
//! Every successful state change appends one or more events to the engine's
//! log. A presentation layer drains them to drive a combat log or
//! animations. Events are transient and never persisted.

use serde::{Deserialize, Serialize};

use super::player::Owner;
use super::position::Position;
use crate::units::{CombatOutcome, SpecialAbility, UnitId};

/// Something that happened in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A unit was deployed during setup.
    UnitPlaced { unit: UnitId, owner: Owner, at: Position },

    /// The human finished deploying; play begins.
    SetupComplete,

    /// A unit stepped (or leapt) to an empty cell.
    UnitMoved { unit: UnitId, from: Position, to: Position },

    /// A warlord moved one of its adjacent allies.
    Rallied {
        warlord: UnitId,
        ally: UnitId,
        from: Position,
        to: Position,
    },

    /// A scout leapt over an enemy.
    Infiltrated {
        scout: UnitId,
        jumped: UnitId,
        from: Position,
        to: Position,
    },

    /// An attack was resolved. Ranks are effective ranks.
    Combat {
        attacker: UnitId,
        defender: UnitId,
        from: Position,
        to: Position,
        attacker_rank: u8,
        defender_rank: u8,
        outcome: CombatOutcome,
    },

    AbilityActivated { unit: UnitId, ability: SpecialAbility },

    /// A sensor tile exposed a unit.
    UnitRevealed { unit: UnitId, at: Position },

    /// A goldmine paid out one gold.
    GoldmineReward { unit: UnitId, owner: Owner, at: Position },

    TurnEnded { player: Owner, turn: u32 },

    GameOver { winner: Owner },
}

impl GameEvent {
    /// Short one-line description for a text log.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            GameEvent::UnitPlaced { owner, at, .. } => format!("{owner} deployed a unit at {at}"),
            GameEvent::SetupComplete => "setup complete".to_string(),
            GameEvent::UnitMoved { from, to, .. } => format!("unit moved {from} -> {to}"),
            GameEvent::Rallied { from, to, .. } => format!("warlord rallied an ally {from} -> {to}"),
            GameEvent::Infiltrated { from, to, .. } => format!("scout infiltrated {from} -> {to}"),
            GameEvent::Combat {
                from,
                to,
                attacker_rank,
                defender_rank,
                outcome,
                ..
            } => {
                let verdict = match outcome {
                    CombatOutcome::AttackerWins => "attacker wins",
                    CombatOutcome::DefenderWins => "defender holds",
                };
                format!("{from} ({attacker_rank}) attacked {to} ({defender_rank}): {verdict}")
            }
            GameEvent::AbilityActivated { ability, .. } => format!("{ability:?} activated"),
            GameEvent::UnitRevealed { at, .. } => format!("sensor revealed the unit at {at}"),
            GameEvent::GoldmineReward { owner, at, .. } => format!("goldmine at {at} paid {owner} 1 gold"),
            GameEvent::TurnEnded { player, turn } => format!("{player} ended turn {turn}"),
            GameEvent::GameOver { winner } => format!("{winner} captured the flag"),
        }
    }
}
