//! Board terrain: special tiles and their generation.

pub mod generation;
pub mod tile;

pub use generation::{create_special_tiles, TileMap, TILE_LAYOUT, TILE_ROWS};
pub use tile::{SpecialTile, TileType};
