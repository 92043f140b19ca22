//! The scripted opponent: deployment and the greedy turn loop.
//!
//! The planner only reads public engine state and acts through
//! [`Engine::apply`], so every AI action passes the same rule checks as
//! a human one.

use tracing::debug;

use super::scoring::move_score;
use crate::core::{Action, Owner, Position};
use crate::rules::{Engine, GamePhase};

/// Deploy the AI's whole setup queue onto shuffled cells of its rows.
///
/// Returns the number of units placed.
pub fn place_units(engine: &mut Engine) -> usize {
    let mut cells: Vec<Position> = Owner::Ai
        .setup_rows()
        .into_iter()
        .flat_map(Position::row_cells)
        .filter(|&pos| engine.board().is_empty_cell(pos))
        .collect();
    engine.rng_mut().shuffle(&mut cells);

    let mut placed = 0;
    for at in cells {
        if engine.setup_remaining_count(Owner::Ai) == 0 {
            break;
        }
        if engine.apply(&Action::Place { at }) {
            placed += 1;
        }
    }
    debug!(placed, "ai deployment done");
    placed
}

/// Play the AI's turn until its actions run out or nothing is worth
/// doing. Returns the number of actions spent.
///
/// Each pass over the (shuffled) units tries, in order:
/// 1. an attack: any flag, else the highest-ranked target
/// 2. ability rolls for every unit with an unused ability
/// 3. the best-scoring move
///
/// An attack restarts the pass; a pass with neither attack nor move ends
/// the turn.
pub fn take_turn(engine: &mut Engine) -> usize {
    let mut spent = 0;
    while engine.phase() == GamePhase::Playing
        && engine.current_player() == Owner::Ai
        && engine.has_actions_remaining()
    {
        let mut units = engine.board().positions_of(Owner::Ai);
        engine.rng_mut().shuffle(&mut units);

        if let Some(action) = choose_attack(engine, &units) {
            if engine.apply(&action) {
                debug!(?action, "ai attacks");
                spent += 1;
                continue;
            }
        }

        roll_abilities(engine, &units);

        match choose_move(engine, &units) {
            Some(action) if engine.apply(&action) => {
                debug!(?action, "ai moves");
                spent += 1;
            }
            _ => break,
        }
    }
    spent
}

/// Pick an attack: a flag target wins outright, otherwise the target
/// with the highest base rank, first found on ties.
fn choose_attack(engine: &Engine, units: &[Position]) -> Option<Action> {
    let mut best: Option<(u8, Action)> = None;
    for &from in units {
        for to in engine.valid_attacks_for(from) {
            let Some(target) = engine.board().get(to) else {
                continue;
            };
            let action = Action::Attack { from, to };
            if target.is_flag() {
                return Some(action);
            }
            if best.map_or(true, |(rank, _)| target.rank > rank) {
                best = Some((target.rank, action));
            }
        }
    }
    best.map(|(_, action)| action)
}

fn roll_abilities(engine: &mut Engine, units: &[Position]) {
    let chance = engine.config().ai_ability_chance;
    for &at in units {
        let ready = engine.board().get(at).is_some_and(|u| u.has_ability_ready());
        if ready && engine.rng_mut().gen_bool(chance) && engine.apply(&Action::UseAbility { at }) {
            debug!(%at, "ai activated ability");
        }
    }
}

/// Pick the highest-scoring move across all units, first found on ties.
fn choose_move(engine: &Engine, units: &[Position]) -> Option<Action> {
    let mut best: Option<(i32, Action)> = None;
    for &from in units {
        for to in engine.valid_moves_for(from) {
            let score = move_score(engine, to);
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, Action::Move { from, to }));
            }
        }
    }
    best.map(|(_, action)| action)
}
