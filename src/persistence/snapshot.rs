//! Full-state snapshots of an engine.
//!
//! A snapshot carries every scalar engine field, the board occupancy keyed
//! by `"row,col"`, every special tile and both complete rosters (captured
//! units included), plus the RNG seed and keystream position so AI draws
//! continue where they left off. Selection, ability modes and the event
//! log are never stored; a restored engine starts with them empty.

use std::collections::{BTreeMap, VecDeque};
use std::time::{SystemTime, UNIX_EPOCH};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{EngineConfig, GameRng, Owner, OwnerMap, Position, BOARD_SIZE};
use crate::error::PersistenceError;
use crate::rules::{Engine, GamePhase};
use crate::terrain::{SpecialTile, TileMap};
use crate::units::{Unit, UnitId};

/// Current snapshot layout version.
pub const SNAPSHOT_VERSION: u32 = 2;

/// Serializable image of an engine's persistent state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    /// Seconds since the Unix epoch at capture time.
    pub saved_at: u64,
    pub board_size: u8,
    pub current_player: Owner,
    pub game_phase: GamePhase,
    pub winner: Option<Owner>,
    pub gold_human: u32,
    pub gold_ai: u32,
    pub actions_remaining: u8,
    pub max_actions_per_turn: u8,
    pub setup_phase: Owner,
    pub turn_counter: u32,
    pub rng_seed: u64,
    /// Keystream offset of the engine RNG, in 32-bit words.
    pub rng_word_pos: u128,
    /// Occupancy keyed by `"row,col"`.
    pub board: BTreeMap<String, UnitId>,
    pub special_tiles: Vec<SpecialTile>,
    pub human_units: Vec<Unit>,
    pub ai_units: Vec<Unit>,
}

impl Snapshot {
    /// Capture the persistent state of `engine`.
    #[must_use]
    pub fn capture(engine: &Engine) -> Self {
        let saved_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());

        let board = engine
            .board
            .iter()
            .map(|(pos, unit)| (pos.to_string(), unit.id))
            .collect();

        let mut special_tiles: Vec<SpecialTile> = engine.tiles.values().cloned().collect();
        special_tiles.sort_unstable_by_key(|tile| tile.position);

        Self {
            version: SNAPSHOT_VERSION,
            saved_at,
            board_size: BOARD_SIZE,
            current_player: engine.current_player,
            game_phase: engine.phase,
            winner: engine.winner,
            gold_human: engine.gold[Owner::Human],
            gold_ai: engine.gold[Owner::Ai],
            actions_remaining: engine.actions_remaining,
            max_actions_per_turn: engine.max_actions_per_turn,
            setup_phase: engine.setup_phase,
            turn_counter: engine.turn_counter,
            rng_seed: engine.rng.seed(),
            rng_word_pos: engine.rng.word_pos(),
            board,
            special_tiles,
            human_units: engine.board.roster(Owner::Human).cloned().collect(),
            ai_units: engine.board.roster(Owner::Ai).cloned().collect(),
        }
    }

    /// Rebuild an engine, validating the snapshot as it goes.
    ///
    /// The RNG resumes at the saved keystream position; `config.seed` is
    /// not consulted. The setup queues are recomputed
    /// from the rosters while the game is still in setup and left empty
    /// otherwise.
    pub fn restore(self, config: EngineConfig) -> Result<Engine, PersistenceError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(PersistenceError::corrupt(format!("unsupported version {}", self.version)));
        }
        if self.board_size != BOARD_SIZE {
            return Err(PersistenceError::corrupt(format!("board size {} is not {BOARD_SIZE}", self.board_size)));
        }
        if self.max_actions_per_turn == 0 || self.actions_remaining > self.max_actions_per_turn {
            return Err(PersistenceError::corrupt(format!(
                "{} of {} actions remaining",
                self.actions_remaining, self.max_actions_per_turn
            )));
        }
        if (self.game_phase == GamePhase::GameOver) != self.winner.is_some() {
            return Err(PersistenceError::corrupt("winner does not match game phase"));
        }

        let board = Self::restore_board(self.human_units, self.ai_units, &self.board)?;
        let tiles = Self::restore_tiles(self.special_tiles, &board)?;

        let rng = GameRng::resume(self.rng_seed, self.rng_word_pos);
        let mut engine = Engine::assemble(config, rng, board, tiles);
        engine.phase = self.game_phase;
        engine.current_player = self.current_player;
        engine.winner = self.winner;
        engine.gold[Owner::Human] = self.gold_human;
        engine.gold[Owner::Ai] = self.gold_ai;
        engine.actions_remaining = self.actions_remaining;
        engine.max_actions_per_turn = self.max_actions_per_turn;
        engine.setup_phase = self.setup_phase;
        engine.turn_counter = self.turn_counter;

        if engine.phase == GamePhase::Setup {
            let board = &engine.board;
            let queues = OwnerMap::new(|owner| {
                board
                    .roster(owner)
                    .filter(|unit| unit.position().is_none())
                    .map(|unit| unit.id)
                    .collect::<VecDeque<_>>()
            });
            engine.setup_remaining = queues;
        }
        Ok(engine)
    }

    fn restore_board(
        human_units: Vec<Unit>,
        ai_units: Vec<Unit>,
        occupancy: &BTreeMap<String, UnitId>,
    ) -> Result<Board, PersistenceError> {
        let owners_ok = human_units.iter().all(|u| u.owner == Owner::Human)
            && ai_units.iter().all(|u| u.owner == Owner::Ai);
        if !owners_ok {
            return Err(PersistenceError::corrupt("unit listed under the wrong roster"));
        }

        let mut units = human_units;
        units.extend(ai_units);
        units.sort_unstable_by_key(|unit| unit.id);
        let board = Board::restore(units).map_err(PersistenceError::corrupt)?;

        if occupancy.len() != board.len() {
            return Err(PersistenceError::corrupt(format!(
                "board lists {} units but rosters place {}",
                occupancy.len(),
                board.len()
            )));
        }
        for (key, &id) in occupancy {
            let pos: Position = key.parse().map_err(|err| PersistenceError::corrupt(format!("{err}")))?;
            if board.unit_id_at(pos) != Some(id) {
                return Err(PersistenceError::corrupt(format!("{pos} should hold {id}")));
            }
        }
        Ok(board)
    }

    fn restore_tiles(special_tiles: Vec<SpecialTile>, board: &Board) -> Result<TileMap, PersistenceError> {
        let mut seen = FxHashSet::default();
        let mut tiles = TileMap::default();
        for tile in special_tiles {
            if !tile.position.in_bounds() || !seen.insert(tile.position) {
                return Err(PersistenceError::corrupt(format!("bad tile at {}", tile.position)));
            }
            // A tracked occupant must be standing on the tile
            if let Some(id) = tile.unit_on_tile {
                if board.unit_id_at(tile.position) != Some(id) {
                    return Err(PersistenceError::corrupt(format!("tile at {} tracks absent {id}", tile.position)));
                }
            }
            tiles.insert(tile.position, tile);
        }
        Ok(tiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::EngineBuilder;
    use crate::terrain::TileType;
    use crate::units::UnitType;

    fn p(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_capture_keys_and_rosters() {
        let engine = Engine::new(EngineConfig::default().with_seed(8));
        let snapshot = Snapshot::capture(&engine);

        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.game_phase, GamePhase::Setup);
        assert_eq!(snapshot.human_units.len(), 20);
        assert_eq!(snapshot.ai_units.len(), 20);
        assert_eq!(snapshot.board.len(), 20);
        assert_eq!(snapshot.special_tiles.len(), 12);
        assert!(snapshot.board.keys().all(|key| key.starts_with('8') || key.starts_with('9')));
    }

    #[test]
    fn test_restore_keeps_captured_units_off_queue() {
        let mut engine = EngineBuilder::new(EngineConfig::default())
            .unit(Owner::Human, UnitType::Commando, p(4, 4))
            .unit(Owner::Ai, UnitType::Scout, p(5, 4))
            .unit(Owner::Ai, UnitType::Flag, p(9, 9))
            .build()
            .unwrap();
        assert!(engine.attack_unit(p(4, 4), p(5, 4)));

        let restored = Snapshot::capture(&engine).restore(EngineConfig::default()).unwrap();
        assert_eq!(restored.setup_remaining_count(Owner::Ai), 0);
        assert_eq!(restored.board().unit(UnitId(1)).unwrap().position(), None);
        assert_eq!(restored.actions_remaining(), 1);
    }

    #[test]
    fn test_restore_rejects_inconsistent_board() {
        let engine = EngineBuilder::new(EngineConfig::default())
            .tile(TileType::Sensor, p(3, 3))
            .unit(Owner::Human, UnitType::Infantry, p(4, 4))
            .build()
            .unwrap();

        let mut snapshot = Snapshot::capture(&engine);
        snapshot.board.insert("7,7".to_string(), UnitId(0));
        assert!(matches!(snapshot.restore(EngineConfig::default()), Err(PersistenceError::Corrupt(_))));

        let mut snapshot = Snapshot::capture(&engine);
        snapshot.special_tiles.push(SpecialTile::new(TileType::Cover, p(3, 3)));
        assert!(snapshot.restore(EngineConfig::default()).is_err());

        let mut snapshot = Snapshot::capture(&engine);
        snapshot.winner = Some(Owner::Ai);
        assert!(snapshot.restore(EngineConfig::default()).is_err());

        let mut snapshot = Snapshot::capture(&engine);
        snapshot.human_units[0].owner = Owner::Ai;
        assert!(snapshot.restore(EngineConfig::default()).is_err());
    }

    #[test]
    fn test_restore_rejects_stray_goldmine_occupant() {
        let engine = EngineBuilder::new(EngineConfig::default())
            .tile(TileType::Goldmine, p(4, 4))
            .unit(Owner::Human, UnitType::Infantry, p(4, 4))
            .unit(Owner::Ai, UnitType::Infantry, p(7, 7))
            .build()
            .unwrap();

        // Tracking the unit that stands there is fine
        assert!(Snapshot::capture(&engine).restore(EngineConfig::default()).is_ok());

        // Tracking a unit elsewhere on the board would pay the wrong side
        let mut snapshot = Snapshot::capture(&engine);
        snapshot.special_tiles[0].unit_on_tile = Some(UnitId(1));
        assert!(matches!(snapshot.restore(EngineConfig::default()), Err(PersistenceError::Corrupt(_))));
    }

    #[test]
    fn test_restore_resumes_rng_stream() {
        let engine = Engine::new(EngineConfig::default().with_seed(31));
        let snapshot = Snapshot::capture(&engine);
        assert_eq!(snapshot.rng_seed, 31);
        assert!(snapshot.rng_word_pos > 0);

        // A different config seed does not rewind the stream
        let restored = snapshot.clone().restore(EngineConfig::default().with_seed(99)).unwrap();
        assert_eq!(restored.rng.seed(), 31);
        assert_eq!(restored.rng.word_pos(), snapshot.rng_word_pos);
    }
}
