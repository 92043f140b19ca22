//! The scripted opponent.
//!
//! A deterministic function of the board and the shared RNG: it deploys
//! the AI's units during setup and plays each AI turn to completion.

pub mod planner;
pub mod scoring;

pub use planner::{place_units, take_turn};
pub use scoring::move_score;
