//! Randomized special-tile layout for a new game.

use rustc_hash::FxHashMap;

use super::tile::{SpecialTile, TileType};
use crate::core::{GameRng, Position};

/// Rows eligible for special tiles (the board's middle band).
pub const TILE_ROWS: std::ops::RangeInclusive<u8> = 3..=6;

/// How many tiles of each type a new game gets, in assignment order.
pub const TILE_LAYOUT: [(TileType, usize); 4] = [
    (TileType::Elevated, 3),
    (TileType::Cover, 2),
    (TileType::Sensor, 4),
    (TileType::Goldmine, 3),
];

/// Tiles keyed by position.
pub type TileMap = FxHashMap<Position, SpecialTile>;

/// Sample 12 distinct middle-band cells and assign them 3/2/4/3.
///
/// Shuffle-then-slice over the 40 candidate cells.
pub fn create_special_tiles(rng: &mut GameRng) -> TileMap {
    let mut candidates: Vec<Position> = TILE_ROWS.flat_map(Position::row_cells).collect();
    rng.shuffle(&mut candidates);

    TILE_LAYOUT
        .iter()
        .flat_map(|&(tile_type, count)| std::iter::repeat(tile_type).take(count))
        .zip(candidates)
        .map(|(tile_type, pos)| (pos, SpecialTile::new(tile_type, pos)))
        .collect()
}
