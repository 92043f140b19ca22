//! The game engine: owner of all mutable game state.
//!
//! ## State Machine
//!
//! `Setup` → `Playing` → `GameOver` (terminal).
//!
//! - The AI deploys synchronously while the engine is constructed.
//! - Play begins the instant the human's setup queue empties.
//! - The game ends the instant a flag is captured.
//!
//! ## Operations
//!
//! The engine is split across modules by concern, each adding an `impl
//! Engine` block:
//!
//! - `setup`: placement checks and FIFO deployment
//! - `movement`: legal moves, rally/infiltration reverse lookup, moves
//! - `combat`: legal targets, effective ranks, attack resolution
//! - `abilities`: special ability activation and mode flags
//! - `turn`: turn flips, effect expiry, goldmine ticks, AI hand-off
//! - `input`: cell-click dispatch and selection
//! - `view`: fog-of-war projection
//!
//! Every mutating operation comes in two forms: `try_*` returning a
//! `RuleResult`, and a boolean wrapper that logs the refusal and returns
//! `false`. All checks run before the first mutation.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::ai;
use crate::board::Board;
use crate::core::{Action, EngineConfig, GameEvent, GameRng, Owner, OwnerMap, Position};
use crate::error::{PersistenceError, RuleError, RuleResult};
use crate::persistence::{codec, SaveStore, Snapshot};
use crate::terrain::{create_special_tiles, SpecialTile, TileMap};
use crate::units::{create_unit_set, Unit, UnitId, UNITS_PER_SIDE};

/// Top-level game phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Setup,
    Playing,
    GameOver,
}

impl GamePhase {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            GamePhase::Setup => "setup",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "game over",
        }
    }
}

/// The human's current selection and the targets it offers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub unit: Option<UnitId>,
    pub position: Option<Position>,
    pub valid_moves: Vec<Position>,
    pub valid_attacks: Vec<Position>,
}

impl Selection {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unit.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Turn-scoped ability modes armed by toggle abilities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AbilityModes {
    /// Warlords may move an adjacent ally.
    pub rally: bool,
    /// Scouts may leap over one adjacent enemy.
    pub infiltration: bool,
    /// Snipers may attack at Manhattan distance 2.
    pub long_range: bool,
}

impl AbilityModes {
    #[must_use]
    pub fn any(&self) -> bool {
        self.rally || self.infiltration || self.long_range
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// The rules engine.
///
/// One instance per session, owned by the caller and passed to the
/// presentation layer by reference.
#[derive(Debug)]
pub struct Engine {
    pub(crate) config: EngineConfig,
    pub(crate) rng: GameRng,
    pub(crate) board: Board,
    pub(crate) tiles: TileMap,

    pub(crate) phase: GamePhase,
    pub(crate) current_player: Owner,
    pub(crate) winner: Option<Owner>,
    pub(crate) gold: OwnerMap<u32>,
    pub(crate) actions_remaining: u8,
    pub(crate) max_actions_per_turn: u8,
    pub(crate) setup_phase: Owner,
    pub(crate) turn_counter: u32,
    pub(crate) setup_remaining: OwnerMap<VecDeque<UnitId>>,

    pub(crate) selection: Selection,
    pub(crate) modes: AbilityModes,
    pub(crate) events: Vec<GameEvent>,

    pub(crate) store: Option<Box<dyn SaveStore>>,
}

impl Engine {
    /// Start a new game seeded from `config.seed`.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self::with_rng(config, rng)
    }

    /// Start a new game drawing from an injected RNG.
    ///
    /// Generates the special tiles, creates both unit sets and lets the AI
    /// deploy before returning. The human's setup queue is left full.
    #[must_use]
    pub fn with_rng(config: EngineConfig, mut rng: GameRng) -> Self {
        let tiles = create_special_tiles(&mut rng);

        let mut units = create_unit_set(Owner::Human, 0);
        units.extend(create_unit_set(Owner::Ai, UNITS_PER_SIDE as u32));
        let setup_remaining = OwnerMap::new(|owner| {
            units
                .iter()
                .filter(|u| u.owner == owner)
                .map(|u| u.id)
                .collect::<VecDeque<_>>()
        });

        let mut engine = Self::assemble(config, rng, Board::new(units), tiles);
        engine.phase = GamePhase::Setup;
        engine.setup_remaining = setup_remaining;

        engine.setup_phase = Owner::Ai;
        ai::place_units(&mut engine);
        engine.setup_phase = Owner::Human;

        info!(seed = engine.rng.seed(), "new game ready for human deployment");
        engine
    }

    /// Load the autosave from `store`, or start a new game if there is none.
    ///
    /// Any load failure is logged and treated as "no save available".
    #[must_use]
    pub fn load_or_new(config: EngineConfig, store: Box<dyn SaveStore>) -> Self {
        let mut engine = match Self::load(config.clone(), store.as_ref()) {
            Ok(engine) => {
                info!(turn = engine.turn_counter, phase = engine.phase.name(), "resumed autosave");
                engine
            }
            Err(err) => {
                warn!(%err, "no save available, starting a new game");
                Self::new(config)
            }
        };
        engine.store = Some(store);
        engine
    }

    /// Restore a game from the snapshot held by `store`.
    pub fn load(config: EngineConfig, store: &dyn SaveStore) -> Result<Self, PersistenceError> {
        let bytes = store.read()?;
        let snapshot = codec::decode(&bytes, config.save_format)?;
        snapshot.restore(config)
    }

    /// Attach a save store for autosaves.
    #[must_use]
    pub fn with_store(mut self, store: Box<dyn SaveStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Throw the current game away and deal a fresh one.
    ///
    /// Keeps the configuration, the save store and the RNG stream.
    pub fn restart(&mut self) {
        let rng = std::mem::replace(&mut self.rng, GameRng::new(self.config.seed));
        let store = self.store.take();
        *self = Self::with_rng(self.config.clone(), rng);
        self.store = store;
        info!("game restarted");
    }

    /// Engine with every scalar at its start-of-play value.
    pub(crate) fn assemble(config: EngineConfig, rng: GameRng, board: Board, tiles: TileMap) -> Self {
        let max_actions = config.max_actions_per_turn.max(1);
        Self {
            config,
            rng,
            board,
            tiles,
            phase: GamePhase::Playing,
            current_player: Owner::Human,
            winner: None,
            gold: OwnerMap::default(),
            actions_remaining: max_actions,
            max_actions_per_turn: max_actions,
            setup_phase: Owner::Human,
            turn_counter: 1,
            setup_remaining: OwnerMap::default(),
            selection: Selection::default(),
            modes: AbilityModes::default(),
            events: Vec::new(),
            store: None,
        }
    }

    // === Read-only State ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read-only view of board occupancy and every unit.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn tiles(&self) -> &TileMap {
        &self.tiles
    }

    #[must_use]
    pub fn tile_at(&self, pos: Position) -> Option<&SpecialTile> {
        self.tiles.get(&pos)
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn current_player(&self) -> Owner {
        self.current_player
    }

    /// Whose deployment the setup phase is waiting on.
    #[must_use]
    pub fn setup_phase(&self) -> Owner {
        self.setup_phase
    }

    #[must_use]
    pub fn winner(&self) -> Option<Owner> {
        self.winner
    }

    #[must_use]
    pub fn gold(&self, owner: Owner) -> u32 {
        self.gold[owner]
    }

    #[must_use]
    pub fn actions_remaining(&self) -> u8 {
        self.actions_remaining
    }

    #[must_use]
    pub fn max_actions_per_turn(&self) -> u8 {
        self.max_actions_per_turn
    }

    /// Completed rounds plus one; advances when the AI hands back.
    #[must_use]
    pub fn turn_counter(&self) -> u32 {
        self.turn_counter
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn modes(&self) -> AbilityModes {
        self.modes
    }

    /// Every unit an owner started with, captured ones included.
    pub fn roster(&self, owner: Owner) -> impl Iterator<Item = &Unit> {
        self.board.roster(owner)
    }

    // === Events ===

    /// Events recorded since the last drain.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the log empty.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn record(&mut self, event: GameEvent) {
        debug!(event = %event.describe(), "game event");
        self.events.push(event);
    }

    // === Commands ===

    /// Apply an action through the matching rule-checked operation.
    pub fn apply(&mut self, action: &Action) -> bool {
        match *action {
            Action::Place { at } => self.place_unit(at, self.setup_phase),
            Action::Select { at } => self.select(at),
            Action::Move { from, to } => self.move_unit(from, to),
            Action::Attack { from, to } => self.attack_unit(from, to),
            Action::UseAbility { at } => self.activate_ability_at(at),
            Action::EndTurn => self.end_turn(),
        }
    }

    /// Refuse unless the game is in play with actions left.
    pub(crate) fn ensure_can_act(&self) -> RuleResult<()> {
        match self.phase {
            GamePhase::GameOver => return Err(RuleError::GameOver),
            GamePhase::Setup => return Err(RuleError::WrongPhase(self.phase.name())),
            GamePhase::Playing => {}
        }
        if self.actions_remaining == 0 {
            return Err(RuleError::NoActionsRemaining);
        }
        Ok(())
    }

    /// Refuse unless the game is in play and `owner` is to move.
    pub(crate) fn ensure_turn_of(&self, owner: Owner) -> RuleResult<()> {
        match self.phase {
            GamePhase::GameOver => Err(RuleError::GameOver),
            GamePhase::Setup => Err(RuleError::WrongPhase(self.phase.name())),
            GamePhase::Playing if owner != self.current_player => Err(RuleError::NotYourTurn(owner)),
            GamePhase::Playing => Ok(()),
        }
    }

    pub(crate) fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    // === Persistence ===

    /// Write the autosave slot now.
    pub fn save(&self) -> Result<(), PersistenceError> {
        let store = self.store.as_ref().ok_or(PersistenceError::NoSave)?;
        let snapshot = Snapshot::capture(self);
        let bytes = codec::encode(&snapshot, self.config.save_format)?;
        store.write(&bytes)
    }

    /// Best-effort save at a turn boundary. Failures are logged only.
    pub(crate) fn autosave(&self) {
        if !self.config.autosave || self.store.is_none() {
            return;
        }
        match self.save() {
            Ok(()) => debug!(turn = self.turn_counter, "autosaved"),
            Err(err) => warn!(%err, "autosave failed, continuing without it"),
        }
    }
}

/// Collapse a rule-checked result into the boolean API, logging refusals.
pub(crate) fn report<T>(op: &'static str, result: RuleResult<T>) -> bool {
    match result {
        Ok(_) => true,
        Err(err) => {
            debug!(op, %err, "action refused");
            false
        }
    }
}
