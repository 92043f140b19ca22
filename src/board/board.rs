//! Board occupancy: the unit arena plus the position → unit map.
//!
//! ## Invariant
//!
//! A unit's `position` is `Some(p)` exactly when the occupancy map holds
//! `p → unit.id`, and no two positions map to the same unit. Every
//! mutation goes through `place`, `relocate` or `remove`, which update both
//! sides together. `check_invariants` verifies the whole structure.
//!
//! Captured units stay in the arena with `position == None`, so the
//! per-owner roster is never lost.

use rustc_hash::FxHashMap;

use crate::core::{Owner, Position};
use crate::error::{RuleError, RuleResult};
use crate::units::{Unit, UnitId, UnitType};

/// Authoritative board state shared by the engine.
#[derive(Clone, Debug, Default)]
pub struct Board {
    units: Vec<Unit>,
    occupancy: FxHashMap<Position, UnitId>,
}

impl Board {
    /// Create a board over an arena of unplaced units.
    ///
    /// Unit ids must equal their index in `units`.
    #[must_use]
    pub(crate) fn new(units: Vec<Unit>) -> Self {
        debug_assert!(units.iter().enumerate().all(|(i, u)| u.id.index() == i));
        Self {
            units,
            occupancy: FxHashMap::default(),
        }
    }

    /// Rebuild a board from restored units, trusting each unit's
    /// `position` field, then verify it.
    pub(crate) fn restore(units: Vec<Unit>) -> Result<Self, String> {
        let mut occupancy = FxHashMap::default();
        for (index, unit) in units.iter().enumerate() {
            if unit.id.index() != index {
                return Err(format!("{} stored at arena slot {index}", unit.id));
            }
            if let Some(pos) = unit.position {
                if let Some(other) = occupancy.insert(pos, unit.id) {
                    return Err(format!("{other} and {} both occupy {pos}", unit.id));
                }
            }
        }
        let board = Self { units, occupancy };
        board.check_invariants()?;
        Ok(board)
    }

    // === Queries ===

    /// Look up a unit by id, on or off the board.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.index())
    }

    pub(crate) fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(id.index())
    }

    /// Mutable access to an owner's roster. Callers must not touch
    /// `position`.
    pub(crate) fn roster_mut(&mut self, owner: Owner) -> impl Iterator<Item = &mut Unit> {
        self.units.iter_mut().filter(move |u| u.owner == owner)
    }

    /// The unit standing on `pos`, if any.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&Unit> {
        self.occupancy.get(&pos).and_then(|&id| self.unit(id))
    }

    #[must_use]
    pub fn unit_id_at(&self, pos: Position) -> Option<UnitId> {
        self.occupancy.get(&pos).copied()
    }

    #[must_use]
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.occupancy.contains_key(&pos)
    }

    /// Check that `pos` is on the board and free.
    pub fn is_empty_cell(&self, pos: Position) -> bool {
        pos.in_bounds() && !self.is_occupied(pos)
    }

    /// Number of units currently on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.occupancy.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupancy.is_empty()
    }

    /// Iterate over occupied cells in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Unit)> {
        self.occupancy
            .iter()
            .filter_map(|(&pos, &id)| self.unit(id).map(|u| (pos, u)))
    }

    /// Every unit in the arena, placed or not.
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Every unit an owner started with, including captured ones.
    pub fn roster(&self, owner: Owner) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(move |u| u.owner == owner)
    }

    /// Positions held by an owner, sorted row-major.
    ///
    /// Sorted so that callers shuffling this list draw the same order after
    /// a save/restore cycle.
    #[must_use]
    pub fn positions_of(&self, owner: Owner) -> Vec<Position> {
        let mut positions: Vec<Position> = self
            .iter()
            .filter(|(_, u)| u.owner == owner)
            .map(|(pos, _)| pos)
            .collect();
        positions.sort_unstable();
        positions
    }

    /// Number of an owner's units still on the board.
    #[must_use]
    pub fn count_on_board(&self, owner: Owner) -> usize {
        self.iter().filter(|(_, u)| u.owner == owner).count()
    }

    /// Where an owner's flag stands, if it is on the board.
    #[must_use]
    pub fn flag_position(&self, owner: Owner) -> Option<Position> {
        self.iter()
            .find(|(_, u)| u.owner == owner && u.unit_type == UnitType::Flag)
            .map(|(pos, _)| pos)
    }

    // === Mutation ===

    /// Put an unplaced unit onto an empty cell.
    pub(crate) fn place(&mut self, id: UnitId, pos: Position) -> RuleResult<()> {
        if !pos.in_bounds() {
            return Err(RuleError::OutOfBounds(pos));
        }
        if self.is_occupied(pos) {
            return Err(RuleError::Occupied(pos));
        }
        let unit = self.units.get_mut(id.index()).ok_or(RuleError::NoUnit(pos))?;
        if unit.position.is_some() {
            return Err(RuleError::Occupied(pos));
        }
        unit.position = Some(pos);
        self.occupancy.insert(pos, id);
        Ok(())
    }

    /// Move a placed unit to an empty cell. Returns the cell it left.
    pub(crate) fn relocate(&mut self, id: UnitId, to: Position) -> RuleResult<Position> {
        if !to.in_bounds() {
            return Err(RuleError::OutOfBounds(to));
        }
        if self.is_occupied(to) {
            return Err(RuleError::Occupied(to));
        }
        let unit = self.units.get_mut(id.index()).ok_or(RuleError::NoUnit(to))?;
        let from = unit.position.ok_or(RuleError::NoUnit(to))?;
        unit.position = Some(to);
        self.occupancy.remove(&from);
        self.occupancy.insert(to, id);
        Ok(from)
    }

    /// Take a unit off the board. Returns the cell it occupied.
    pub(crate) fn remove(&mut self, id: UnitId) -> Option<Position> {
        let unit = self.units.get_mut(id.index())?;
        let pos = unit.position.take()?;
        self.occupancy.remove(&pos);
        Some(pos)
    }

    /// Verify occupancy/position consistency and the one-flag rule.
    pub fn check_invariants(&self) -> Result<(), String> {
        for (&pos, &id) in &self.occupancy {
            let unit = self
                .unit(id)
                .ok_or_else(|| format!("{pos} maps to missing {id}"))?;
            if unit.position != Some(pos) {
                return Err(format!("{pos} maps to {id} whose position is {:?}", unit.position));
            }
            if !pos.in_bounds() {
                return Err(format!("{id} is off the board at {pos}"));
            }
        }
        for unit in &self.units {
            if let Some(pos) = unit.position {
                if self.occupancy.get(&pos) != Some(&unit.id) {
                    return Err(format!("{} claims {pos} but the board disagrees", unit.id));
                }
            }
        }
        for owner in Owner::ALL {
            let flags = self
                .iter()
                .filter(|(_, u)| u.owner == owner && u.is_flag())
                .count();
            if flags > 1 {
                return Err(format!("{owner} has {flags} flags on the board"));
            }
        }
        Ok(())
    }
}
