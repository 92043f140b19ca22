//! Special ability integration tests.

use galactic_gladiators::{
    Action, EngineBuilder, EngineConfig, GameEvent, Owner, Position, RuleError, SpecialAbility, TileType, UnitId,
    UnitType,
};

fn p(row: u8, col: u8) -> Position {
    Position::new(row, col)
}

fn config() -> EngineConfig {
    EngineConfig::default().with_ai(false)
}

// =============================================================================
// Activation rules
// =============================================================================

#[test]
fn test_activation_is_free_and_single_use() {
    let mut engine = EngineBuilder::new(config())
        .unit(Owner::Human, UnitType::Warlord, p(4, 4))
        .build()
        .unwrap();

    assert!(engine.apply(&Action::UseAbility { at: p(4, 4) }));
    assert!(engine.modes().rally);
    assert_eq!(engine.actions_remaining(), 2);
    assert!(engine.board().get(p(4, 4)).unwrap().special_used);

    assert_eq!(engine.try_activate_ability(p(4, 4)), Err(RuleError::AbilityUnavailable));
}

#[test]
fn test_units_without_abilities() {
    let mut engine = EngineBuilder::new(config())
        .unit(Owner::Human, UnitType::Infantry, p(4, 4))
        .unit(Owner::Human, UnitType::Flag, p(0, 0))
        .build()
        .unwrap();

    assert_eq!(engine.try_activate_ability(p(4, 4)), Err(RuleError::AbilityUnavailable));
    assert_eq!(engine.try_activate_ability(p(0, 0)), Err(RuleError::AbilityUnavailable));
    assert_eq!(engine.try_activate_ability(p(5, 5)), Err(RuleError::NoUnit(p(5, 5))));
}

#[test]
fn test_cover_blocks_until_unit_leaves() {
    let mut engine = EngineBuilder::new(config())
        .tile(TileType::Cover, p(4, 4))
        .unit(Owner::Human, UnitType::Commando, p(4, 4))
        .build()
        .unwrap();

    assert!(!engine.activate_ability_at(p(4, 4)));
    assert!(!engine.board().get(p(4, 4)).unwrap().stealth_active);

    assert!(engine.move_unit(p(4, 4), p(4, 5)));
    assert!(engine.activate_ability_at(p(4, 5)));
    assert!(engine.board().get(p(4, 5)).unwrap().stealth_active);
}

#[test]
fn test_activation_needs_no_actions() {
    let mut engine = EngineBuilder::new(config())
        .unit(Owner::Human, UnitType::Infantry, p(4, 4))
        .unit(Owner::Human, UnitType::Commando, p(0, 0))
        .build()
        .unwrap();

    assert!(engine.move_unit(p(4, 4), p(5, 4)));
    assert!(engine.move_unit(p(5, 4), p(6, 4)));
    assert!(!engine.has_actions_remaining());
    assert_eq!(engine.try_activate_ability(p(0, 0)), Ok(SpecialAbility::Stealth));
}

// =============================================================================
// Protection
// =============================================================================

#[test]
fn test_protection_is_a_snapshot() {
    let mut engine = EngineBuilder::new(config())
        .unit(Owner::Human, UnitType::Shield, p(4, 4))
        .unit(Owner::Human, UnitType::Infantry, p(3, 4))
        .unit(Owner::Human, UnitType::Infantry, p(2, 5))
        .build()
        .unwrap();

    assert!(engine.activate_ability_at(p(4, 4)));
    assert!(engine.board().unit(UnitId(1)).unwrap().protected_by_shield);
    assert!(!engine.board().unit(UnitId(2)).unwrap().protected_by_shield);

    // Moving next to the shield afterwards grants nothing
    assert!(engine.move_unit(p(2, 5), p(3, 5)));
    assert!(engine.move_unit(p(3, 5), p(4, 5)));
    assert!(!engine.board().unit(UnitId(2)).unwrap().protected_by_shield);

    // Expires when the owner's turn ends
    assert!(engine.end_turn());
    assert!(!engine.board().unit(UnitId(1)).unwrap().protected_by_shield);
}

// =============================================================================
// Rally
// =============================================================================

#[test]
fn test_rally_moves_the_ally() {
    let mut engine = EngineBuilder::new(config())
        .unit(Owner::Human, UnitType::Warlord, p(4, 4))
        .unit(Owner::Human, UnitType::Infantry, p(4, 5))
        .build()
        .unwrap();

    assert!(engine.handle_cell_click(p(4, 4)));
    assert!(engine.use_special_ability());
    assert!(engine.selection().valid_moves.contains(&p(4, 6)));

    assert!(engine.handle_cell_click(p(4, 6)));
    assert_eq!(engine.board().get(p(4, 6)).unwrap().id, UnitId(1));
    assert_eq!(engine.board().get(p(4, 4)).unwrap().id, UnitId(0));
    assert_eq!(engine.actions_remaining(), 1);
    assert!(!engine.modes().rally);
    assert!(engine.events().contains(&GameEvent::Rallied {
        warlord: UnitId(0),
        ally: UnitId(1),
        from: p(4, 5),
        to: p(4, 6),
    }));
}

#[test]
fn test_rally_keeps_own_steps() {
    let mut engine = EngineBuilder::new(config())
        .unit(Owner::Human, UnitType::Warlord, p(4, 4))
        .unit(Owner::Human, UnitType::Infantry, p(4, 5))
        .build()
        .unwrap();
    assert!(engine.activate_ability_at(p(4, 4)));

    // Ally destinations sit two cells away, own steps one, so they never
    // collide; the warlord can still walk
    assert!(engine.move_unit(p(4, 4), p(3, 4)));
    assert_eq!(engine.board().get(p(3, 4)).unwrap().id, UnitId(0));
    assert!(engine.modes().rally);
}

// =============================================================================
// Infiltration
// =============================================================================

#[test]
fn test_infiltration_leaps_one_enemy() {
    let mut engine = EngineBuilder::new(config())
        .unit(Owner::Human, UnitType::Scout, p(4, 4))
        .unit(Owner::Ai, UnitType::Commando, p(5, 4))
        .build()
        .unwrap();

    assert!(!engine.move_unit(p(4, 4), p(6, 4)));
    assert!(engine.activate_ability_at(p(4, 4)));
    assert!(engine.move_unit(p(4, 4), p(6, 4)));

    assert_eq!(engine.board().get(p(6, 4)).unwrap().id, UnitId(0));
    // The jumped enemy is untouched
    assert_eq!(engine.board().get(p(5, 4)).unwrap().id, UnitId(1));
    assert_eq!(engine.actions_remaining(), 1);
    assert!(!engine.modes().infiltration);
    assert!(engine.events().contains(&GameEvent::Infiltrated {
        scout: UnitId(0),
        jumped: UnitId(1),
        from: p(4, 4),
        to: p(6, 4),
    }));
}

#[test]
fn test_modes_expire_at_turn_end() {
    let mut engine = EngineBuilder::new(config())
        .unit(Owner::Human, UnitType::Scout, p(4, 4))
        .unit(Owner::Ai, UnitType::Commando, p(5, 4))
        .build()
        .unwrap();

    assert!(engine.activate_ability_at(p(4, 4)));
    assert!(engine.end_turn());
    assert!(!engine.modes().infiltration);
    // Spent for good
    assert!(!engine.activate_ability_at(p(4, 4)));
    assert!(!engine.move_unit(p(4, 4), p(6, 4)));
}
