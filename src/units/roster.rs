//! The fixed 20-unit set each side starts with.

use super::unit::{Unit, UnitId, UnitType};
use crate::core::Owner;

/// Unit counts per side, in deployment order.
pub const UNIT_SET: [(UnitType, usize); 7] = [
    (UnitType::Scout, 3),
    (UnitType::Infantry, 7),
    (UnitType::Sniper, 3),
    (UnitType::Shield, 2),
    (UnitType::Warlord, 2),
    (UnitType::Commando, 2),
    (UnitType::Flag, 1),
];

/// Number of units in a full set.
pub const UNITS_PER_SIDE: usize = 20;

/// Create a complete unit set for one owner.
///
/// Ids are allocated consecutively starting at `first_id`. The returned
/// order is the setup queue order.
#[must_use]
pub fn create_unit_set(owner: Owner, first_id: u32) -> Vec<Unit> {
    UNIT_SET
        .iter()
        .flat_map(|&(unit_type, count)| std::iter::repeat(unit_type).take(count))
        .zip(first_id..)
        .map(|(unit_type, id)| Unit::new(UnitId(id), unit_type, owner))
        .collect()
}
