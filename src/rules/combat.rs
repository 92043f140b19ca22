//! Combat: legal targets, effective ranks and attack resolution.
//!
//! Effective rank = base rank
//!   + 1 while standing on an elevated tile
//!   + 1 for a defender under shield protection.
//!
//! The loser leaves the board. A winning attacker moves into the
//! defender's cell and triggers that cell's tile. Capturing a flag ends
//! the game on the spot.

use tracing::info;

use super::engine::{report, Engine, GamePhase};
use crate::core::config::FLAG_CAPTURE_BONUS;
use crate::core::{GameEvent, Owner, Position};
use crate::error::{RuleError, RuleResult};
use crate::units::{resolve_combat, CombatOutcome, SpecialAbility, Unit};

/// Reach of a sniper's armed long-range attack.
const LONG_RANGE: u32 = 2;

impl Engine {
    /// Cells the unit at `pos` may attack, honoring armed modes.
    ///
    /// Flags never attack, so a flag has no targets.
    #[must_use]
    pub fn valid_attacks_for(&self, pos: Position) -> Vec<Position> {
        let Some(unit) = self.board.get(pos) else {
            return Vec::new();
        };
        if unit.is_flag() {
            return Vec::new();
        }

        let is_enemy = |target: Position| self.board.get(target).is_some_and(|t| unit.can_attack(t));
        let mut targets: Vec<Position> = pos.neighbors().into_iter().filter(|&n| is_enemy(n)).collect();

        if self.modes.long_range && unit.special_ability == Some(SpecialAbility::LongRange) {
            let reach = LONG_RANGE as i32;
            for dr in -reach..=reach {
                for dc in -reach..=reach {
                    let Some(target) = Position::checked(i32::from(pos.row) + dr, i32::from(pos.col) + dc) else {
                        continue;
                    };
                    let distance = pos.manhattan(target);
                    if (2..=LONG_RANGE).contains(&distance) && is_enemy(target) {
                        targets.push(target);
                    }
                }
            }
        }
        targets
    }

    /// Rank a unit fights with at `pos` right now.
    #[must_use]
    pub fn effective_rank(&self, unit: &Unit, pos: Position, defending: bool) -> u8 {
        let terrain = self.tiles.get(&pos).map_or(0, |t| t.combat_bonus());
        let shield = u8::from(defending && unit.protected_by_shield);
        unit.rank + terrain + shield
    }

    /// Attack the unit at `to` with the unit at `from`.
    pub fn attack_unit(&mut self, from: Position, to: Position) -> bool {
        report("attack", self.try_attack(from, to))
    }

    /// Rule-checked form of [`Engine::attack_unit`].
    pub fn try_attack(&mut self, from: Position, to: Position) -> RuleResult<CombatOutcome> {
        self.ensure_can_act()?;
        let attacker = self.board.get(from).ok_or(RuleError::NoUnit(from))?;
        self.ensure_turn_of(attacker.owner)?;
        if attacker.is_flag() {
            return Err(RuleError::FlagCannotAttack);
        }
        if !self.valid_attacks_for(from).contains(&to) {
            return Err(RuleError::IllegalTarget { from, to });
        }
        self.resolve_attack(from, to)
    }

    fn resolve_attack(&mut self, from: Position, to: Position) -> RuleResult<CombatOutcome> {
        if self.actions_remaining == 0 {
            return Err(RuleError::NoActionsRemaining);
        }
        let attacker = self.board.get(from).ok_or(RuleError::NoUnit(from))?;
        let defender = self.board.get(to).ok_or(RuleError::NoUnit(to))?;

        let attacker_rank = self.effective_rank(attacker, from, false);
        let defender_rank = self.effective_rank(defender, to, true);
        let outcome = resolve_combat(attacker_rank, defender_rank, defender.is_flag());
        let (attacker_id, defender_id) = (attacker.id, defender.id);
        let attacking_owner = attacker.owner;

        self.actions_remaining -= 1;

        let (winner_id, loser_id) = match outcome {
            CombatOutcome::AttackerWins => {
                self.board.remove(defender_id);
                self.leave_tile(defender_id, to);
                self.relocate_unit(attacker_id, to)?;
                (attacker_id, defender_id)
            }
            CombatOutcome::DefenderWins => {
                self.board.remove(attacker_id);
                self.leave_tile(attacker_id, from);
                (defender_id, attacker_id)
            }
        };
        if let Some(survivor) = self.board.unit_mut(winner_id) {
            survivor.is_revealed = true;
        }

        self.modes.long_range = false;
        self.selection.clear();

        info!(%from, %to, attacker_rank, defender_rank, ?outcome, "combat resolved");
        self.record(GameEvent::Combat {
            attacker: attacker_id,
            defender: defender_id,
            from,
            to,
            attacker_rank,
            defender_rank,
            outcome,
        });

        if self.board.unit(loser_id).is_some_and(Unit::is_flag) {
            self.finish_game(attacking_owner);
        }
        Ok(outcome)
    }

    /// End the game in `winner`'s favour and settle gold.
    ///
    /// The winner receives the capture bonus; each side then adds one gold
    /// per own unit still on the board.
    pub(crate) fn finish_game(&mut self, winner: Owner) {
        self.phase = GamePhase::GameOver;
        self.winner = Some(winner);
        self.gold[winner] += FLAG_CAPTURE_BONUS;
        for owner in Owner::ALL {
            let survivors = self.board.count_on_board(owner) as u32;
            self.gold[owner] += survivors;
        }
        self.selection.clear();
        self.modes.clear();

        info!(%winner, human_gold = self.gold[Owner::Human], ai_gold = self.gold[Owner::Ai], "flag captured");
        self.record(GameEvent::GameOver { winner });
        self.autosave();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineConfig;
    use crate::rules::EngineBuilder;
    use crate::terrain::TileType;
    use crate::units::{UnitId, UnitType};

    fn p(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_baseline_targets_orthogonal_enemies() {
        let engine = EngineBuilder::new(EngineConfig::default())
            .unit(Owner::Human, UnitType::Infantry, p(4, 4))
            .unit(Owner::Ai, UnitType::Infantry, p(5, 4))
            .unit(Owner::Ai, UnitType::Infantry, p(5, 5))
            .unit(Owner::Human, UnitType::Infantry, p(4, 3))
            .build()
            .unwrap();

        assert_eq!(engine.valid_attacks_for(p(4, 4)), vec![p(5, 4)]);
    }

    #[test]
    fn test_long_range_reach() {
        let mut engine = EngineBuilder::new(EngineConfig::default())
            .unit(Owner::Human, UnitType::Sniper, p(4, 4))
            .unit(Owner::Ai, UnitType::Infantry, p(6, 4))
            .unit(Owner::Ai, UnitType::Infantry, p(5, 5))
            .unit(Owner::Ai, UnitType::Infantry, p(7, 4))
            .build()
            .unwrap();

        assert!(engine.valid_attacks_for(p(4, 4)).is_empty());
        engine.modes.long_range = true;
        let targets = engine.valid_attacks_for(p(4, 4));
        assert!(targets.contains(&p(6, 4)));
        assert!(targets.contains(&p(5, 5)));
        assert!(!targets.contains(&p(7, 4)));
    }

    #[test]
    fn test_effective_rank_modifiers() {
        let mut engine = EngineBuilder::new(EngineConfig::default())
            .tile(TileType::Elevated, p(4, 4))
            .unit(Owner::Human, UnitType::Sniper, p(4, 4))
            .unit(Owner::Ai, UnitType::Infantry, p(5, 4))
            .build()
            .unwrap();

        let sniper = engine.board().get(p(4, 4)).unwrap().clone();
        assert_eq!(engine.effective_rank(&sniper, p(4, 4), false), 4);

        engine.board.unit_mut(UnitId(1)).unwrap().protected_by_shield = true;
        let infantry = engine.board().get(p(5, 4)).unwrap().clone();
        assert_eq!(engine.effective_rank(&infantry, p(5, 4), true), 3);
        assert_eq!(engine.effective_rank(&infantry, p(5, 4), false), 2);
    }

    #[test]
    fn test_flag_cannot_attack() {
        let mut engine = EngineBuilder::new(EngineConfig::default())
            .unit(Owner::Human, UnitType::Flag, p(4, 4))
            .unit(Owner::Ai, UnitType::Infantry, p(5, 4))
            .build()
            .unwrap();

        assert!(engine.valid_attacks_for(p(4, 4)).is_empty());
        assert_eq!(engine.try_attack(p(4, 4), p(5, 4)), Err(RuleError::FlagCannotAttack));
        assert_eq!(engine.actions_remaining(), 2);
    }

    #[test]
    fn test_gold_settlement() {
        let mut engine = EngineBuilder::new(EngineConfig::default())
            .unit(Owner::Human, UnitType::Scout, p(4, 4))
            .unit(Owner::Human, UnitType::Infantry, p(0, 0))
            .unit(Owner::Human, UnitType::Flag, p(0, 1))
            .unit(Owner::Ai, UnitType::Flag, p(5, 4))
            .unit(Owner::Ai, UnitType::Commando, p(9, 9))
            .build()
            .unwrap();

        assert_eq!(engine.try_attack(p(4, 4), p(5, 4)), Ok(CombatOutcome::AttackerWins));
        assert_eq!(engine.phase(), GamePhase::GameOver);
        assert_eq!(engine.winner(), Some(Owner::Human));
        // 10 bonus + 3 surviving human units
        assert_eq!(engine.gold(Owner::Human), 13);
        // 1 surviving AI unit
        assert_eq!(engine.gold(Owner::Ai), 1);
    }
}
