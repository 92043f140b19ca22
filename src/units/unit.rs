//! Units: identity, rank, owner, ability slot and per-turn effect flags.
//!
//! ## Combat Rule
//!
//! Combat is a pure rank comparison:
//! - a flag defender always loses
//! - a flag never initiates (callers refuse the attack first)
//! - higher rank wins
//! - equal ranks go to the defender
//!
//! The engine feeds *effective* ranks (terrain and shield modifiers
//! included) into [`resolve_combat`]; [`Unit::attack`] applies the same rule
//! to base ranks.

use serde::{Deserialize, Serialize};

use crate::core::{Owner, Position};

/// Stable identifier of a unit for the whole game.
///
/// Units live in an arena; the id is the arena index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    /// Arena index of this id.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unit({})", self.0)
    }
}

/// The seven kinds of unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Flag,
    Scout,
    Infantry,
    Sniper,
    Shield,
    Warlord,
    Commando,
}

impl UnitType {
    /// Base combat rank. Rank 0 belongs to the flag alone.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            UnitType::Flag => 0,
            UnitType::Scout => 1,
            UnitType::Infantry => 2,
            UnitType::Sniper => 3,
            UnitType::Shield => 4,
            UnitType::Warlord => 5,
            UnitType::Commando => 6,
        }
    }

    /// The special ability this unit type carries, if any.
    #[must_use]
    pub const fn ability(self) -> Option<SpecialAbility> {
        match self {
            UnitType::Scout => Some(SpecialAbility::Infiltration),
            UnitType::Sniper => Some(SpecialAbility::LongRange),
            UnitType::Shield => Some(SpecialAbility::Protection),
            UnitType::Warlord => Some(SpecialAbility::Rally),
            UnitType::Commando => Some(SpecialAbility::Stealth),
            UnitType::Flag | UnitType::Infantry => None,
        }
    }

    /// One-letter board symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            UnitType::Scout => 'S',
            UnitType::Infantry => 'I',
            UnitType::Sniper => 'N',
            UnitType::Shield => 'H',
            UnitType::Warlord => 'W',
            UnitType::Commando => 'C',
            UnitType::Flag => 'F',
        }
    }
}

/// Special abilities. Each unit may use its ability once per game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialAbility {
    /// Scout: leap over one adjacent enemy into the empty cell beyond.
    Infiltration,
    /// Sniper: attack enemies up to Manhattan distance 2.
    LongRange,
    /// Shield: adjacent allies gain +1 rank when defending.
    Protection,
    /// Warlord: move an adjacent ally instead of itself.
    Rally,
    /// Commando: hidden from enemy view until its owner's turn ends.
    Stealth,
}

impl SpecialAbility {
    /// Whether the ability only arms an engine mode flag rather than
    /// acting immediately.
    #[must_use]
    pub const fn is_mode(self) -> bool {
        matches!(
            self,
            SpecialAbility::Infiltration | SpecialAbility::LongRange | SpecialAbility::Rally
        )
    }
}

/// Result of a combat between an attacker and a defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatOutcome {
    AttackerWins,
    DefenderWins,
}

/// Resolve combat between two ranks.
///
/// `defender_is_flag` overrides the rank comparison: the flag always loses.
#[must_use]
pub fn resolve_combat(attacker_rank: u8, defender_rank: u8, defender_is_flag: bool) -> CombatOutcome {
    if defender_is_flag || attacker_rank > defender_rank {
        CombatOutcome::AttackerWins
    } else {
        CombatOutcome::DefenderWins
    }
}

/// A single piece.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Arena id, stable for the whole game.
    pub id: UnitId,

    pub unit_type: UnitType,

    /// Base rank, 0..=6.
    pub rank: u8,

    pub owner: Owner,

    pub special_ability: Option<SpecialAbility>,

    /// Set permanently once the ability has been activated.
    pub special_used: bool,

    /// Visible to the opponent (sensor tile or combat).
    pub is_revealed: bool,

    /// Board cell, kept in sync with the occupancy map by `Board`.
    pub(crate) position: Option<Position>,

    pub stealth_active: bool,

    /// +1 defending rank until the owner's turn ends.
    pub protected_by_shield: bool,
}

impl Unit {
    /// Create an unplaced unit of the given type.
    #[must_use]
    pub fn new(id: UnitId, unit_type: UnitType, owner: Owner) -> Self {
        Self {
            id,
            unit_type,
            rank: unit_type.rank(),
            owner,
            special_ability: unit_type.ability(),
            special_used: false,
            is_revealed: false,
            position: None,
            stealth_active: false,
            protected_by_shield: false,
        }
    }

    /// Current board cell, `None` before placement and after capture.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    #[must_use]
    pub fn is_flag(&self) -> bool {
        self.unit_type == UnitType::Flag
    }

    /// A unit may attack anything not on its own side.
    #[must_use]
    pub fn can_attack(&self, target: &Unit) -> bool {
        target.owner != self.owner
    }

    /// Resolve combat against `target` on base ranks alone.
    #[must_use]
    pub fn attack(&self, target: &Unit) -> CombatOutcome {
        if target.is_flag() {
            CombatOutcome::AttackerWins
        } else if self.is_flag() {
            CombatOutcome::DefenderWins
        } else {
            resolve_combat(self.rank, target.rank, false)
        }
    }

    /// Whether the unit still holds an unused ability.
    #[must_use]
    pub fn has_ability_ready(&self) -> bool {
        self.special_ability.is_some() && !self.special_used
    }

    /// Spend the ability slot.
    ///
    /// Returns the ability on success, `None` if it was already used or the
    /// unit has none. Only the unit-local part of the effect (stealth) is
    /// applied here; board-wide effects and mode flags belong to the engine.
    pub fn use_special_ability(&mut self) -> Option<SpecialAbility> {
        let ability = self.special_ability.filter(|_| !self.special_used)?;
        self.special_used = true;
        if ability == SpecialAbility::Stealth {
            self.stealth_active = true;
        }
        Some(ability)
    }

    /// Clear the effects that last until the owner's turn ends.
    pub fn reset_special_effects(&mut self) {
        self.stealth_active = false;
        self.protected_by_shield = false;
    }
}
