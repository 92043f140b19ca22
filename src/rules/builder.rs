//! Scenario builder for hand-made positions (tests, tutorials, puzzles).

use super::engine::Engine;
use crate::board::Board;
use crate::core::{EngineConfig, GameRng, Owner, Position};
use crate::error::{RuleError, RuleResult};
use crate::terrain::{create_special_tiles, SpecialTile, TileMap, TileType};
use crate::units::{Unit, UnitId, UnitType};

/// Builds an engine already in the playing phase, human to move.
///
/// Unit ids are assigned in the order `unit` is called, starting at 0.
///
/// ```
/// use galactic_gladiators::{EngineBuilder, EngineConfig, Owner, Position, UnitType};
///
/// let engine = EngineBuilder::new(EngineConfig::default())
///     .unit(Owner::Human, UnitType::Scout, Position::new(4, 4))
///     .unit(Owner::Ai, UnitType::Flag, Position::new(5, 4))
///     .build()
///     .unwrap();
/// assert_eq!(engine.valid_attacks_for(Position::new(4, 4)), vec![Position::new(5, 4)]);
/// ```
#[derive(Clone, Debug)]
pub struct EngineBuilder {
    config: EngineConfig,
    units: Vec<(Owner, UnitType, Position)>,
    tiles: Vec<(TileType, Position)>,
    random_tiles: bool,
}

impl EngineBuilder {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            units: Vec::new(),
            tiles: Vec::new(),
            random_tiles: false,
        }
    }

    #[must_use]
    pub fn unit(mut self, owner: Owner, unit_type: UnitType, at: Position) -> Self {
        self.units.push((owner, unit_type, at));
        self
    }

    #[must_use]
    pub fn tile(mut self, tile_type: TileType, at: Position) -> Self {
        self.tiles.push((tile_type, at));
        self
    }

    /// Start from the usual random layout; explicit tiles replace any
    /// random tile on the same cell.
    #[must_use]
    pub fn random_tiles(mut self) -> Self {
        self.random_tiles = true;
        self
    }

    /// Build the engine. Fails on out-of-bounds or doubly used cells.
    pub fn build(self) -> RuleResult<Engine> {
        let mut rng = GameRng::new(self.config.seed);

        let mut tiles = if self.random_tiles {
            create_special_tiles(&mut rng)
        } else {
            TileMap::default()
        };
        let mut explicit = Vec::with_capacity(self.tiles.len());
        for (tile_type, at) in self.tiles {
            if !at.in_bounds() {
                return Err(RuleError::OutOfBounds(at));
            }
            if explicit.contains(&at) {
                return Err(RuleError::Occupied(at));
            }
            explicit.push(at);
            tiles.insert(at, SpecialTile::new(tile_type, at));
        }

        let units = self
            .units
            .iter()
            .zip(0u32..)
            .map(|(&(owner, unit_type, _), id)| Unit::new(UnitId(id), unit_type, owner))
            .collect();
        let mut board = Board::new(units);
        for (&(_, _, at), id) in self.units.iter().zip(0u32..) {
            board.place(UnitId(id), at)?;
        }

        let mut engine = Engine::assemble(self.config, rng, board, tiles);
        for (&(_, _, at), id) in self.units.iter().zip(0u32..) {
            engine.enter_tile(UnitId(id), at);
        }
        engine.events.clear();
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::GamePhase;

    #[test]
    fn test_builds_playing_engine() {
        let engine = EngineBuilder::new(EngineConfig::default())
            .tile(TileType::Sensor, Position::new(2, 2))
            .unit(Owner::Human, UnitType::Infantry, Position::new(2, 2))
            .unit(Owner::Ai, UnitType::Flag, Position::new(9, 9))
            .build()
            .unwrap();

        assert_eq!(engine.phase(), GamePhase::Playing);
        assert_eq!(engine.current_player(), Owner::Human);
        assert_eq!(engine.board().len(), 2);
        assert_eq!(engine.tiles().len(), 1);
        // Starting on a sensor reveals the unit
        assert!(engine.board().get(Position::new(2, 2)).unwrap().is_revealed);
        assert!(engine.events().is_empty());
    }

    #[test]
    fn test_rejects_double_occupancy() {
        let result = EngineBuilder::new(EngineConfig::default())
            .unit(Owner::Human, UnitType::Infantry, Position::new(2, 2))
            .unit(Owner::Ai, UnitType::Infantry, Position::new(2, 2))
            .build();
        assert!(matches!(result, Err(RuleError::Occupied(_))));

        let result = EngineBuilder::new(EngineConfig::default())
            .unit(Owner::Human, UnitType::Infantry, Position::new(10, 2))
            .build();
        assert!(matches!(result, Err(RuleError::OutOfBounds(_))));
    }

    #[test]
    fn test_random_tiles_with_override() {
        let engine = EngineBuilder::new(EngineConfig::default())
            .random_tiles()
            .tile(TileType::Cover, Position::new(0, 0))
            .build()
            .unwrap();
        assert_eq!(engine.tiles().len(), 13);
        assert_eq!(engine.tile_at(Position::new(0, 0)).unwrap().tile_type, TileType::Cover);
    }
}
