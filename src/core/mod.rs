//! Core types: positions, owners, RNG, configuration, actions and events.

pub mod action;
pub mod config;
pub mod event;
pub mod player;
pub mod position;
pub mod rng;

pub use action::Action;
pub use config::{EngineConfig, SaveFormat};
pub use event::GameEvent;
pub use player::{Owner, OwnerMap};
pub use position::{Neighbors, Position, BOARD_SIZE, DIRECTIONS};
pub use rng::GameRng;
