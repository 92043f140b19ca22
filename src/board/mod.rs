//! Board occupancy model.

#[allow(clippy::module_inception)]
pub mod board;

pub use board::Board;
