//! Special ability activation.
//!
//! Immediate abilities (stealth, protection) change units on the spot.
//! Toggle abilities (infiltration, long range, rally) arm a global mode
//! that widens the next move or attack; the mode is spent by that move or
//! attack, or at turn end. Activation itself never costs an action.

use tracing::debug;

use super::engine::{report, Engine};
use crate::core::{GameEvent, Position};
use crate::error::{RuleError, RuleResult};
use crate::units::{SpecialAbility, UnitId};

impl Engine {
    /// Activate the ability of the currently selected unit.
    pub fn use_special_ability(&mut self) -> bool {
        let result = self
            .selection
            .position
            .ok_or(RuleError::NoSelection)
            .and_then(|pos| self.try_activate_ability(pos));
        report("ability", result)
    }

    /// Activate the ability of the unit at `pos`.
    pub fn activate_ability_at(&mut self, pos: Position) -> bool {
        report("ability", self.try_activate_ability(pos))
    }

    /// Rule-checked ability activation. Returns the ability spent.
    pub fn try_activate_ability(&mut self, pos: Position) -> RuleResult<SpecialAbility> {
        let unit = self.board.get(pos).ok_or(RuleError::NoUnit(pos))?;
        self.ensure_turn_of(unit.owner)?;
        if !unit.has_ability_ready() {
            return Err(RuleError::AbilityUnavailable);
        }
        if self.tiles.get(&pos).is_some_and(|t| t.blocks_special_abilities()) {
            return Err(RuleError::AbilityBlocked(pos));
        }

        let (id, owner) = (unit.id, unit.owner);
        // Protection is a snapshot of whoever is adjacent right now.
        let shielded: Vec<UnitId> = pos
            .neighbors()
            .into_iter()
            .filter_map(|n| self.board.get(n))
            .filter(|ally| ally.owner == owner)
            .map(|ally| ally.id)
            .collect();

        let ability = self
            .board
            .unit_mut(id)
            .and_then(|unit| unit.use_special_ability())
            .ok_or(RuleError::AbilityUnavailable)?;

        match ability {
            SpecialAbility::Protection => {
                for ally in shielded {
                    if let Some(unit) = self.board.unit_mut(ally) {
                        unit.protected_by_shield = true;
                    }
                }
            }
            SpecialAbility::Infiltration => self.modes.infiltration = true,
            SpecialAbility::LongRange => self.modes.long_range = true,
            SpecialAbility::Rally => self.modes.rally = true,
            SpecialAbility::Stealth => {}
        }

        debug!(unit = %id, ?ability, armed = ability.is_mode(), "ability activated");
        self.record(GameEvent::AbilityActivated { unit: id, ability });
        if self.selection.position == Some(pos) {
            self.refresh_selection();
        }
        Ok(ability)
    }
}
