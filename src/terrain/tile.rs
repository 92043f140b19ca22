//! Special tiles and their effects.
//!
//! | Tile       | Effect                                               |
//! |------------|------------------------------------------------------|
//! | `elevated` | +1 effective rank for the unit standing on it        |
//! | `cover`    | the unit standing on it cannot activate abilities    |
//! | `sensor`   | permanently reveals any unit that steps on it        |
//! | `goldmine` | one gold per three consecutive turns of occupancy    |
//!
//! Tiles never move. Only the goldmine bookkeeping (`unit_on_tile`,
//! `goldmine_turns`) mutates during a game.

use serde::{Deserialize, Serialize};

use crate::core::config::GOLDMINE_REWARD_TURNS;
use crate::core::Position;
use crate::units::{Unit, UnitId};

/// Kinds of special tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    Elevated,
    Cover,
    Sensor,
    Goldmine,
}

impl TileType {
    /// Short player-facing description of the effect.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            TileType::Elevated => "+1 Rank in combat",
            TileType::Cover => "Immune to special abilities",
            TileType::Sensor => "Reveals unit type",
            TileType::Goldmine => "1 gold after 3 turns",
        }
    }
}

/// A special tile placed on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialTile {
    pub tile_type: TileType,
    pub position: Position,

    /// Unit the goldmine counter is tracking.
    pub unit_on_tile: Option<UnitId>,

    /// Consecutive turns `unit_on_tile` has been anchored here.
    pub goldmine_turns: u32,
}

impl SpecialTile {
    #[must_use]
    pub fn new(tile_type: TileType, position: Position) -> Self {
        Self {
            tile_type,
            position,
            unit_on_tile: None,
            goldmine_turns: 0,
        }
    }

    /// Apply this tile's effect to the unit standing on it.
    ///
    /// Sensors reveal the unit. Goldmines continue counting for the same
    /// occupant and restart at 1 for a new one.
    pub fn apply_effect(&mut self, unit: &mut Unit) {
        match self.tile_type {
            TileType::Sensor => unit.is_revealed = true,
            TileType::Goldmine => {
                if self.unit_on_tile == Some(unit.id) {
                    self.goldmine_turns += 1;
                } else {
                    self.unit_on_tile = Some(unit.id);
                    self.goldmine_turns = 1;
                }
            }
            TileType::Elevated | TileType::Cover => {}
        }
    }

    /// Rank bonus for a combatant standing here at the moment of attack.
    #[must_use]
    pub fn combat_bonus(&self) -> u8 {
        u8::from(self.tile_type == TileType::Elevated)
    }

    #[must_use]
    pub fn blocks_special_abilities(&self) -> bool {
        self.tile_type == TileType::Cover
    }

    /// Check whether the occupant has earned a gold.
    ///
    /// Returns true and resets the counter to 0 once the counter reaches
    /// the reward threshold. The caller credits the occupant's owner.
    pub fn check_goldmine_reward(&mut self) -> bool {
        if self.tile_type == TileType::Goldmine && self.goldmine_turns >= GOLDMINE_REWARD_TURNS {
            self.goldmine_turns = 0;
            true
        } else {
            false
        }
    }

    /// Forget the tracked occupant (it left or was destroyed).
    pub fn clear_occupant(&mut self) {
        self.unit_on_tile = None;
        self.goldmine_turns = 0;
    }
}
