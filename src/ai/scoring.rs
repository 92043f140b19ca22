//! Heuristics for the AI move pass.

use crate::core::{Owner, Position};
use crate::rules::Engine;
use crate::terrain::TileType;

/// Bonus for landing on a tile worth holding.
pub const TERRAIN_BONUS: i32 = 5;

/// Weight of the distance to the nearest enemy.
pub const ENEMY_DISTANCE_WEIGHT: i32 = 2;

/// Score a destination for an AI unit. Higher is better.
///
/// `-(distance to centre) - 2 * (distance to nearest human unit)`, plus a
/// bonus on elevated and goldmine tiles. With no human unit on the board
/// the enemy term is 0.
#[must_use]
pub fn move_score(engine: &Engine, dest: Position) -> i32 {
    let centre = -(dest.manhattan(Position::center()) as i32);
    let nearest_enemy = engine
        .board()
        .iter()
        .filter(|(_, unit)| unit.owner == Owner::Human)
        .map(|(pos, _)| dest.manhattan(pos) as i32)
        .min()
        .unwrap_or(0);
    let terrain = match engine.tile_at(dest).map(|t| t.tile_type) {
        Some(TileType::Elevated | TileType::Goldmine) => TERRAIN_BONUS,
        _ => 0,
    };
    centre - ENEMY_DISTANCE_WEIGHT * nearest_enemy + terrain
}
