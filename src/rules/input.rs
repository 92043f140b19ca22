//! Cell-click dispatch: the single funnel for user-driven mutation.

use super::engine::{Engine, GamePhase};
use crate::core::{Owner, Position};

impl Engine {
    /// Interpret a click on `pos` according to phase and selection.
    ///
    /// - setup: place the next unit of the owner being deployed
    /// - playing, human to move: attack or move with the selection if
    ///   `pos` is one of its targets, deselect on a second click, select
    ///   otherwise
    /// - anything else: refused
    pub fn handle_cell_click(&mut self, pos: Position) -> bool {
        match self.phase {
            GamePhase::GameOver => false,
            GamePhase::Setup => self.place_unit(pos, self.setup_phase),
            GamePhase::Playing if self.current_player != Owner::Human => false,
            GamePhase::Playing => self.click_in_play(pos),
        }
    }

    fn click_in_play(&mut self, pos: Position) -> bool {
        let Some(selected) = self.selection.position else {
            return self.select(pos);
        };
        if selected == pos {
            self.selection.clear();
            return true;
        }
        if self.selection.valid_attacks.contains(&pos) {
            return self.attack_unit(selected, pos);
        }
        if self.selection.valid_moves.contains(&pos) {
            return self.move_unit(selected, pos);
        }
        self.select(pos)
    }

    /// Select the current player's unit at `pos`, computing its targets.
    ///
    /// Anything else clears the selection and returns false.
    pub fn select(&mut self, pos: Position) -> bool {
        let selectable = self.phase == GamePhase::Playing
            && self
                .board
                .get(pos)
                .is_some_and(|u| u.owner == self.current_player);
        if !selectable {
            self.selection.clear();
            return false;
        }
        self.selection.position = Some(pos);
        self.refresh_selection();
        true
    }

    /// Recompute targets for the selected cell after a mode change.
    pub(crate) fn refresh_selection(&mut self) {
        let Some(pos) = self.selection.position else {
            return;
        };
        let Some(unit) = self.board.unit_id_at(pos) else {
            self.selection.clear();
            return;
        };
        self.selection.unit = Some(unit);
        self.selection.valid_moves = self.valid_moves_for(pos);
        self.selection.valid_attacks = self.valid_attacks_for(pos);
    }
}
