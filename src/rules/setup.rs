//! Setup phase: placement legality and FIFO deployment.
//!
//! Callers never choose which unit goes next. Each owner's queue is
//! consumed head-first; `next_setup_unit` tells the presentation layer
//! what the next click will place.

use tracing::info;

use super::engine::{report, Engine, GamePhase};
use crate::core::{GameEvent, Owner, Position};
use crate::error::{RuleError, RuleResult};
use crate::units::{Unit, UnitId};

impl Engine {
    /// Whether the head of `owner`'s queue could be placed on `pos`.
    #[must_use]
    pub fn can_place_unit_at(&self, pos: Position, owner: Owner) -> bool {
        self.check_placement(pos, owner).is_ok() && !self.setup_remaining[owner].is_empty()
    }

    fn check_placement(&self, pos: Position, owner: Owner) -> RuleResult<()> {
        if self.phase != GamePhase::Setup {
            return Err(RuleError::WrongPhase(self.phase.name()));
        }
        if !pos.in_bounds() {
            return Err(RuleError::OutOfBounds(pos));
        }
        if self.board.is_occupied(pos) {
            return Err(RuleError::Occupied(pos));
        }
        if !owner.setup_rows().contains(&pos.row) {
            return Err(RuleError::NotASetupRow { owner, row: pos.row });
        }
        Ok(())
    }

    /// Place the head of `owner`'s setup queue on `pos`.
    pub fn place_unit(&mut self, pos: Position, owner: Owner) -> bool {
        report("place", self.try_place_unit(pos, owner))
    }

    /// Rule-checked form of [`Engine::place_unit`]. Returns the placed unit.
    pub fn try_place_unit(&mut self, pos: Position, owner: Owner) -> RuleResult<UnitId> {
        self.check_placement(pos, owner)?;
        let id = *self.setup_remaining[owner]
            .front()
            .ok_or(RuleError::SetupExhausted(owner))?;

        self.board.place(id, pos)?;
        self.setup_remaining[owner].pop_front();
        self.record(GameEvent::UnitPlaced { unit: id, owner, at: pos });

        if owner == Owner::Human && self.setup_remaining[owner].is_empty() {
            self.begin_play();
        }
        Ok(id)
    }

    #[must_use]
    pub fn setup_remaining_count(&self, owner: Owner) -> usize {
        self.setup_remaining[owner].len()
    }

    /// The unit the next placement for `owner` will deploy.
    #[must_use]
    pub fn next_setup_unit(&self, owner: Owner) -> Option<&Unit> {
        self.setup_remaining[owner]
            .front()
            .and_then(|&id| self.board.unit(id))
    }

    fn begin_play(&mut self) {
        self.phase = GamePhase::Playing;
        self.current_player = Owner::Human;
        self.actions_remaining = self.max_actions_per_turn;
        self.selection.clear();
        self.record(GameEvent::SetupComplete);
        info!("deployment complete, play begins");
        self.autosave();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineConfig;
    use crate::units::UnitType;

    fn engine() -> Engine {
        Engine::new(EngineConfig::default().with_seed(3))
    }

    #[test]
    fn test_human_rows_only() {
        let engine = engine();
        for pos in Position::all() {
            let expected = pos.row <= 1;
            assert_eq!(engine.can_place_unit_at(pos, Owner::Human), expected, "{pos}");
        }
    }

    #[test]
    fn test_fifo_queue() {
        let mut engine = engine();
        assert_eq!(engine.next_setup_unit(Owner::Human).map(|u| u.unit_type), Some(UnitType::Scout));

        let first = engine.try_place_unit(Position::new(0, 0), Owner::Human).unwrap();
        assert_eq!(first, UnitId(0));
        assert_eq!(engine.setup_remaining_count(Owner::Human), 19);
        assert_eq!(engine.board().get(Position::new(0, 0)).unwrap().id, UnitId(0));
        assert_eq!(engine.next_setup_unit(Owner::Human).unwrap().id, UnitId(1));
    }

    #[test]
    fn test_rejects_occupied_and_wrong_row() {
        let mut engine = engine();
        engine.try_place_unit(Position::new(1, 1), Owner::Human).unwrap();

        assert_eq!(
            engine.try_place_unit(Position::new(1, 1), Owner::Human),
            Err(RuleError::Occupied(Position::new(1, 1)))
        );
        assert_eq!(
            engine.try_place_unit(Position::new(2, 1), Owner::Human),
            Err(RuleError::NotASetupRow { owner: Owner::Human, row: 2 })
        );
        assert_eq!(engine.setup_remaining_count(Owner::Human), 19);
    }

    #[test]
    fn test_ai_queue_is_empty() {
        let mut engine = engine();
        assert!(!engine.can_place_unit_at(Position::new(0, 5), Owner::Ai));
        assert_eq!(engine.next_setup_unit(Owner::Ai), None);
        assert!(!engine.place_unit(Position::new(0, 5), Owner::Ai));
    }

    #[test]
    fn test_last_placement_starts_play() {
        let mut engine = engine();
        for pos in Position::row_cells(0).chain(Position::row_cells(1)) {
            assert_eq!(engine.phase(), GamePhase::Setup);
            assert!(engine.place_unit(pos, Owner::Human));
        }
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert_eq!(engine.current_player(), Owner::Human);
        assert_eq!(engine.actions_remaining(), 2);
        assert_eq!(engine.setup_remaining_count(Owner::Human), 0);

        // No more placement once play begins
        assert!(!engine.can_place_unit_at(Position::new(0, 0), Owner::Human));
    }
}
