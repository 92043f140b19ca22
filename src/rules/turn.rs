//! Turn flow: ending a turn, effect expiry, goldmine ticks and the AI
//! hand-off.

use tracing::{debug, info};

use super::engine::{Engine, GamePhase};
use crate::ai;
use crate::core::{GameEvent, Owner};
use crate::terrain::TileType;

impl Engine {
    /// Whether the human may end the turn now.
    #[must_use]
    pub fn can_end_turn(&self) -> bool {
        self.phase == GamePhase::Playing && self.current_player == Owner::Human
    }

    #[must_use]
    pub fn has_actions_remaining(&self) -> bool {
        self.actions_remaining > 0
    }

    /// End the human's turn and play the AI's turn to completion.
    ///
    /// Returns with the human to move again, unless the AI captured the
    /// flag. Autosaves once the cycle completes.
    pub fn end_turn(&mut self) -> bool {
        if !self.can_end_turn() {
            return false;
        }
        self.advance_turn();

        if self.phase == GamePhase::Playing && self.current_player == Owner::Ai {
            if self.config.ai_enabled {
                let actions = ai::take_turn(self);
                info!(actions, "ai turn finished");
            }
            if self.phase == GamePhase::Playing {
                self.advance_turn();
            }
        }
        self.autosave();
        true
    }

    /// Hand the move to the other player.
    pub(crate) fn advance_turn(&mut self) {
        let ending = self.current_player;
        self.selection.clear();
        if self.modes.any() {
            debug!(modes = ?self.modes, "unspent ability modes expired");
        }
        self.modes.clear();
        for unit in self.board.roster_mut(ending) {
            unit.reset_special_effects();
        }
        self.record(GameEvent::TurnEnded {
            player: ending,
            turn: self.turn_counter,
        });

        self.current_player = ending.opponent();
        self.actions_remaining = self.max_actions_per_turn;
        if self.current_player == Owner::Human {
            self.turn_counter += 1;
        }
        info!(player = %self.current_player, turn = self.turn_counter, "turn started");
        self.tick_goldmines(self.current_player);
    }

    /// Advance every goldmine held by `owner` and pay out rewards.
    fn tick_goldmines(&mut self, owner: Owner) {
        let mut rewards = Vec::new();
        for tile in self.tiles.values_mut() {
            if tile.tile_type != TileType::Goldmine {
                continue;
            }
            let Some(unit) = tile.unit_on_tile.and_then(|id| self.board.unit_mut(id)) else {
                continue;
            };
            if unit.owner != owner {
                continue;
            }
            tile.apply_effect(unit);
            if tile.check_goldmine_reward() {
                rewards.push((unit.id, tile.position));
            }
        }
        // Deterministic event order regardless of map iteration
        rewards.sort_unstable_by_key(|&(_, at)| at);

        for (unit, at) in rewards {
            self.gold[owner] += 1;
            info!(%owner, %at, gold = self.gold[owner], "goldmine paid out");
            self.record(GameEvent::GoldmineReward { unit, owner, at });
        }
    }
}
