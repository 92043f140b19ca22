//! Setup phase integration tests.
//!
//! Deployment is driven entirely through cell clicks, the way the
//! presentation layer drives it.

use galactic_gladiators::{Engine, EngineConfig, GameEvent, GamePhase, Owner, Position, UnitType, BOARD_SIZE};

fn new_engine(seed: u64) -> Engine {
    Engine::new(EngineConfig::default().with_seed(seed))
}

fn deploy_human(engine: &mut Engine) {
    for row in Owner::Human.setup_rows() {
        for pos in Position::row_cells(row) {
            assert!(engine.handle_cell_click(pos), "placing at {pos}");
        }
    }
}

// =============================================================================
// Initial state
// =============================================================================

#[test]
fn test_new_game_layout() {
    let engine = new_engine(42);

    assert_eq!(engine.phase(), GamePhase::Setup);
    assert_eq!(engine.setup_remaining_count(Owner::Human), 20);
    assert_eq!(engine.setup_remaining_count(Owner::Ai), 0);

    // Tiles live in rows 3-6 only, never overlapping
    assert_eq!(engine.tiles().len(), 12);
    assert!(engine.tiles().keys().all(|pos| (3..=6).contains(&pos.row)));

    // The AI fills both of its rows exactly
    for row in 8..BOARD_SIZE {
        for pos in Position::row_cells(row) {
            assert_eq!(engine.board().get(pos).map(|u| u.owner), Some(Owner::Ai));
        }
    }
}

#[test]
fn test_each_side_has_one_flag() {
    let engine = new_engine(7);
    for owner in Owner::ALL {
        let flags = engine.roster(owner).filter(|u| u.unit_type == UnitType::Flag).count();
        assert_eq!(flags, 1, "{owner}");
        assert_eq!(engine.roster(owner).count(), 20);
    }
}

// =============================================================================
// Human deployment
// =============================================================================

#[test]
fn test_clicks_place_queue_head() {
    let mut engine = new_engine(1);
    let next = engine.next_setup_unit(Owner::Human).unwrap().id;

    assert!(engine.handle_cell_click(Position::new(1, 4)));
    assert_eq!(engine.board().get(Position::new(1, 4)).unwrap().id, next);

    // Outside the human rows nothing happens
    assert!(!engine.handle_cell_click(Position::new(2, 4)));
    assert!(!engine.handle_cell_click(Position::new(9, 4)));
    assert_eq!(engine.setup_remaining_count(Owner::Human), 19);
}

#[test]
fn test_full_deployment_starts_play() {
    let mut engine = new_engine(99);
    deploy_human(&mut engine);

    assert_eq!(engine.phase(), GamePhase::Playing);
    assert_eq!(engine.current_player(), Owner::Human);
    assert_eq!(engine.actions_remaining(), engine.max_actions_per_turn());
    assert_eq!(engine.board().len(), 40);
    assert!(engine.board().check_invariants().is_ok());
    assert!(engine.events().contains(&GameEvent::SetupComplete));
}

#[test]
fn test_setup_is_deterministic() {
    let mut a = new_engine(2024);
    let mut b = new_engine(2024);
    deploy_human(&mut a);
    deploy_human(&mut b);

    for pos in Position::all() {
        assert_eq!(a.board().get(pos), b.board().get(pos), "{pos}");
        assert_eq!(a.tile_at(pos), b.tile_at(pos), "{pos}");
    }
}
