//! The rules engine.
//!
//! `Engine` owns every piece of mutable game state. Its operations are
//! spread over one module per concern; each module adds an `impl Engine`
//! block.

pub mod abilities;
pub mod builder;
pub mod combat;
pub mod engine;
pub mod input;
pub mod movement;
pub mod setup;
pub mod turn;
pub mod view;

pub use builder::EngineBuilder;
pub use engine::{AbilityModes, Engine, GamePhase, Selection};
pub use view::CellView;
