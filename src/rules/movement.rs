//! Movement: legal destinations and move execution.
//!
//! ## Baseline
//!
//! A unit steps to any empty orthogonal neighbor.
//!
//! ## Compound Moves
//!
//! - **Infiltration** (scout, mode armed): if an orthogonal neighbor holds
//!   an enemy, the empty cell directly beyond it is also a destination.
//! - **Rally** (warlord, mode armed): every destination an orthogonally
//!   adjacent ally could step to is added. Choosing one moves that ally,
//!   not the warlord.
//!
//! A submitted destination is mapped back to the displacement it stands
//! for (`plan_move`). Allies and jumped enemies are scanned in
//! `DIRECTIONS` order and the first match wins; in rally mode an ally
//! displacement beats the warlord's own step to the same cell.

use smallvec::SmallVec;
use tracing::debug;

use super::engine::{report, Engine};
use crate::core::{GameEvent, Position, DIRECTIONS};
use crate::error::{RuleError, RuleResult};
use crate::units::{SpecialAbility, UnitId};

/// The displacement a legal destination stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MovePlan {
    /// The unit itself steps to an empty neighbor.
    Step { unit: UnitId, from: Position, to: Position },
    /// A warlord sends an adjacent ally to `to`.
    Rally {
        warlord: UnitId,
        ally: UnitId,
        ally_from: Position,
        to: Position,
    },
    /// A scout leaps over `jumped`.
    Infiltrate {
        scout: UnitId,
        jumped: UnitId,
        from: Position,
        to: Position,
    },
}

impl Engine {
    /// Empty orthogonal neighbors of `pos`.
    pub(crate) fn step_moves(&self, pos: Position) -> SmallVec<[Position; 4]> {
        pos.neighbors()
            .into_iter()
            .filter(|&n| !self.board.is_occupied(n))
            .collect()
    }

    /// Legal destinations for the unit at `pos`, honoring armed modes.
    ///
    /// Empty when the cell is empty.
    #[must_use]
    pub fn valid_moves_for(&self, pos: Position) -> Vec<Position> {
        let Some(unit) = self.board.get(pos) else {
            return Vec::new();
        };
        let mut moves: Vec<Position> = self.step_moves(pos).into_vec();

        if self.modes.infiltration && unit.special_ability == Some(SpecialAbility::Infiltration) {
            for (_, _, beyond) in self.infiltration_jumps(pos) {
                push_unique(&mut moves, beyond);
            }
        }
        if self.modes.rally && unit.special_ability == Some(SpecialAbility::Rally) {
            for (_, _, dest) in self.rally_moves(pos) {
                push_unique(&mut moves, dest);
            }
        }
        moves
    }

    /// `(enemy, enemy_pos, landing)` for every leap available from `pos`.
    fn infiltration_jumps(&self, pos: Position) -> Vec<(UnitId, Position, Position)> {
        let Some(owner) = self.board.get(pos).map(|u| u.owner) else {
            return Vec::new();
        };
        DIRECTIONS
            .iter()
            .filter_map(|&dir| {
                let over = pos.offset(dir, 1)?;
                let beyond = pos.offset(dir, 2)?;
                let enemy = self.board.get(over).filter(|u| u.owner != owner)?;
                (!self.board.is_occupied(beyond)).then_some((enemy.id, over, beyond))
            })
            .collect()
    }

    /// `(ally, ally_pos, destination)` for every step an adjacent ally of
    /// the unit at `pos` could take.
    fn rally_moves(&self, pos: Position) -> Vec<(UnitId, Position, Position)> {
        let Some(owner) = self.board.get(pos).map(|u| u.owner) else {
            return Vec::new();
        };
        let mut moves = Vec::new();
        for neighbor in pos.neighbors() {
            let Some(ally) = self.board.get(neighbor).filter(|u| u.owner == owner) else {
                continue;
            };
            for dest in self.step_moves(neighbor) {
                moves.push((ally.id, neighbor, dest));
            }
        }
        moves
    }

    /// Map a destination back to the displacement it represents.
    pub(crate) fn plan_move(&self, from: Position, to: Position) -> Option<MovePlan> {
        let unit = self.board.get(from)?;

        if self.modes.rally && unit.special_ability == Some(SpecialAbility::Rally) {
            let rallied = self
                .rally_moves(from)
                .into_iter()
                .find(|&(_, _, dest)| dest == to);
            if let Some((ally, ally_from, _)) = rallied {
                return Some(MovePlan::Rally {
                    warlord: unit.id,
                    ally,
                    ally_from,
                    to,
                });
            }
        }

        if self.modes.infiltration && unit.special_ability == Some(SpecialAbility::Infiltration) {
            let jump = self
                .infiltration_jumps(from)
                .into_iter()
                .find(|&(_, _, beyond)| beyond == to);
            if let Some((jumped, _, _)) = jump {
                return Some(MovePlan::Infiltrate {
                    scout: unit.id,
                    jumped,
                    from,
                    to,
                });
            }
        }

        self.step_moves(from).contains(&to).then_some(MovePlan::Step {
            unit: unit.id,
            from,
            to,
        })
    }

    /// Move the unit at `from` to `to` (or the ally it rallies).
    pub fn move_unit(&mut self, from: Position, to: Position) -> bool {
        report("move", self.try_move(from, to))
    }

    /// Rule-checked form of [`Engine::move_unit`].
    pub fn try_move(&mut self, from: Position, to: Position) -> RuleResult<()> {
        self.ensure_can_act()?;
        let owner = self.board.get(from).ok_or(RuleError::NoUnit(from))?.owner;
        self.ensure_turn_of(owner)?;
        let plan = self
            .plan_move(from, to)
            .ok_or(RuleError::IllegalDestination { from, to })?;
        self.execute_move(plan)
    }

    fn execute_move(&mut self, plan: MovePlan) -> RuleResult<()> {
        if self.actions_remaining == 0 {
            return Err(RuleError::NoActionsRemaining);
        }

        match plan {
            MovePlan::Step { unit, from, to } => {
                self.relocate_unit(unit, to)?;
                self.record(GameEvent::UnitMoved { unit, from, to });
            }
            MovePlan::Rally {
                warlord,
                ally,
                ally_from,
                to,
            } => {
                self.relocate_unit(ally, to)?;
                self.modes.rally = false;
                debug!(%warlord, %ally, "rally executed");
                self.record(GameEvent::Rallied {
                    warlord,
                    ally,
                    from: ally_from,
                    to,
                });
            }
            MovePlan::Infiltrate { scout, jumped, from, to } => {
                self.relocate_unit(scout, to)?;
                self.modes.infiltration = false;
                self.record(GameEvent::Infiltrated { scout, jumped, from, to });
            }
        }

        self.actions_remaining -= 1;
        self.selection.clear();
        Ok(())
    }

    /// Move a unit to an empty cell, settling tile bookkeeping on both ends.
    pub(crate) fn relocate_unit(&mut self, id: UnitId, to: Position) -> RuleResult<()> {
        let from = self.board.relocate(id, to)?;
        self.leave_tile(id, from);
        self.enter_tile(id, to);
        Ok(())
    }

    /// Drop goldmine tracking for a unit leaving (or dying on) `pos`.
    pub(crate) fn leave_tile(&mut self, id: UnitId, pos: Position) {
        if let Some(tile) = self.tiles.get_mut(&pos) {
            if tile.unit_on_tile == Some(id) {
                tile.clear_occupant();
            }
        }
    }

    /// Apply the tile effect at `pos` to a unit that just arrived.
    pub(crate) fn enter_tile(&mut self, id: UnitId, pos: Position) {
        let (Some(tile), Some(unit)) = (self.tiles.get_mut(&pos), self.board.unit_mut(id)) else {
            return;
        };
        let was_revealed = unit.is_revealed;
        tile.apply_effect(unit);
        if !was_revealed && unit.is_revealed {
            self.record(GameEvent::UnitRevealed { unit: id, at: pos });
        }
    }
}

fn push_unique(list: &mut Vec<Position>, pos: Position) {
    if !list.contains(&pos) {
        list.push(pos);
    }
}
