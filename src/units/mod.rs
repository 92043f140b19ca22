//! Units, the starting unit set and the combat rule.

pub mod roster;
pub mod unit;

pub use roster::{create_unit_set, UNITS_PER_SIDE, UNIT_SET};
pub use unit::{resolve_combat, CombatOutcome, SpecialAbility, Unit, UnitId, UnitType};
