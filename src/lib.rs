//! # galactic-gladiators
//!
//! Rules engine for a two-player, hidden-rank strategy game on a 10×10
//! grid, played by a human against a scripted opponent.
//!
//! ## Design Principles
//!
//! 1. **One Owner of State**: `Engine` owns the board, units, tiles and
//!    turn state. The presentation layer reads through `&Engine` and
//!    mutates only through engine operations.
//!
//! 2. **All-or-Nothing Operations**: every rule check runs before the
//!    first mutation. Rule-checked `try_*` forms return a typed
//!    `RuleError`; the boolean forms log the refusal and return `false`.
//!
//! 3. **Deterministic Given a Seed**: tile layout, AI deployment and
//!    every AI choice draw from one seedable `GameRng`.
//!
//! ## Game Flow
//!
//! - **Setup**: the AI deploys while the engine is built; the human places
//!   units one click at a time from a fixed queue.
//! - **Playing**: two actions per turn (move or attack). Abilities are
//!   free. Ending the turn runs the AI's turn synchronously.
//! - **Game over**: the first flag capture ends the game and settles gold.
//!
//! ## Modules
//!
//! - `core`: positions, owners, RNG, configuration, actions, events
//! - `units`: unit types, abilities and the combat rule
//! - `terrain`: special tiles and their random layout
//! - `board`: unit arena and occupancy map
//! - `rules`: the `Engine` state machine
//! - `ai`: the scripted opponent
//! - `persistence`: snapshots, codecs and save stores

pub mod ai;
pub mod board;
pub mod core;
pub mod error;
pub mod persistence;
pub mod rules;
pub mod terrain;
pub mod units;

// Re-export commonly used types
pub use crate::core::{
    Action, EngineConfig, GameEvent, GameRng, Owner, OwnerMap, Position, SaveFormat, BOARD_SIZE,
};

pub use crate::units::{CombatOutcome, SpecialAbility, Unit, UnitId, UnitType};

pub use crate::terrain::{SpecialTile, TileType};

pub use crate::board::Board;

pub use crate::rules::{AbilityModes, CellView, Engine, EngineBuilder, GamePhase, Selection};

pub use crate::persistence::{FileStore, MemoryStore, SaveStore, Snapshot};

pub use crate::error::{PersistenceError, RuleError, RuleResult};
