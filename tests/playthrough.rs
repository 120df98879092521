use cargo_empire::history::{HistoryEntry, MemoryHistoryLog};
use cargo_empire::seed::GameSeed;
use cargo_empire::store::{MemorySessionStore, SessionStore};
use cargo_empire::{
    Airport, AirportCatalog, FlightMode, GameConfig, GameError, GameManager, GameStatus, GreatCircle,
    TurnCommand, TurnMenu,
};

type Manager = GameManager<MemorySessionStore, MemoryHistoryLog, AirportCatalog, GreatCircle>;

/// A small region of airports a few dozen km apart
fn island_catalog() -> AirportCatalog {
    let airports = (0..8)
        .map(|i| {
            let code = format!("IS{:02}", i);
            Airport::new(&code, &format!("Island Field {}", i), 0.0, i as f64 * 0.3)
        })
        .collect();
    AirportCatalog::from_airports("IS", airports)
}

fn manager(config: GameConfig) -> Manager {
    GameManager::new(
        GameConfig {
            region: "IS".to_string(),
            pool_size: 8,
            ..config
        },
        GreatCircle,
        MemorySessionStore::new(),
        MemoryHistoryLog::new(),
        island_catalog(),
    )
}

#[test]
fn test_progression_through_all_menus() {
    let mut m = manager(GameConfig::default());
    m.login_with_seed("ace", GameSeed::new(17)).unwrap();

    // Phase 1: tutorial
    assert_eq!(m.menu("ace").unwrap(), TurnMenu::Tutorial);
    assert_eq!(m.offer("ace", None).unwrap().len(), 1);
    let s = m.commit("ace", TurnCommand::select(0)).unwrap().session;
    assert_eq!((s.phase, s.money), (2, 2200.0));

    // Phase 2: three basic contracts
    assert_eq!(m.menu("ace").unwrap(), TurnMenu::Basic);
    assert_eq!(m.offer("ace", None).unwrap().len(), 3);
    let s = m.commit("ace", TurnCommand::select(1)).unwrap().session;
    assert_eq!((s.phase, s.normal_flight_count), (3, 1));

    // Phase 3: free choice, take the safe contract
    assert_eq!(m.menu("ace").unwrap(), TurnMenu::FreeChoice);
    assert_eq!(m.offer("ace", Some(FlightMode::Basic)).unwrap().len(), 1);
    let s = m.commit("ace", TurnCommand::select(0)).unwrap().session;
    assert!(s.forced_random);
    assert_eq!(s.normal_flight_count, 2);

    // Phase 4: forced into the special pair
    assert_eq!(m.menu("ace").unwrap(), TurnMenu::ForcedRandom);
    assert!(matches!(
        m.offer("ace", Some(FlightMode::Basic)),
        Err(GameError::ModeNotOffered)
    ));
    let views = m.offer("ace", None).unwrap();
    assert_eq!(views.len(), 2);
    let before = m.session("ace").unwrap();
    let outcome = m.commit("ace", TurnCommand::select(0)).unwrap();
    let s = outcome.session.clone();
    assert!(!s.forced_random);
    assert_eq!(s.normal_flight_count, 0);
    assert_eq!(s.phase, 5);
    if outcome.option.is_fraud() {
        assert_eq!(s.money, before.money);
    } else {
        assert_eq!(s.money, before.money + outcome.option.reward);
    }

    // Phase 5: choice is open again
    assert_eq!(m.menu("ace").unwrap(), TurnMenu::FreeChoice);

    let log = m.flight_log(s.id);
    assert_eq!(log.len(), 4);
    assert!(matches!(log[0], HistoryEntry::Contract { .. }));
    assert!(matches!(log[3], HistoryEntry::Bonus { .. }));
}

#[test]
fn test_game_is_won_and_closed() {
    let mut m = manager(GameConfig {
        win_amount: 2000.0,
        ..GameConfig::default()
    });
    let id = m.login_with_seed("ace", GameSeed::new(1)).unwrap().session().id;
    m.offer("ace", None).unwrap();
    let outcome = m.commit("ace", TurnCommand::select(0)).unwrap();
    assert_eq!(outcome.session.status, GameStatus::Won);

    // finished games are no longer active
    assert!(matches!(m.session("ace"), Err(GameError::UnknownPlayer(_))));
    assert!(m.store().load("ACE").is_none());
    let fresh = m.login_with_seed("ace", GameSeed::new(2)).unwrap();
    assert_ne!(fresh.session().id, id);
}

#[test]
fn test_fuel_purchase_with_turn() {
    let mut m = manager(GameConfig::default());
    m.login_with_seed("ace", GameSeed::new(5)).unwrap();
    m.offer("ace", None).unwrap();

    let err = m
        .commit("ace", TurnCommand::select(0).with_fuel(0.0))
        .unwrap_err();
    assert!(err.is_recoverable());

    let outcome = m.commit("ace", TurnCommand::select(0).with_fuel(100.0)).unwrap();
    assert_eq!(outcome.session.money, 1000.0 - 100.0 + 1200.0);
    assert_eq!(
        outcome.session.fuel_range,
        2000.0 + 200.0 - outcome.option.distance_km
    );
}

#[test]
fn test_players_are_independent() {
    let mut m = manager(GameConfig::default());
    m.login_with_seed("ace", GameSeed::new(1)).unwrap();
    m.login_with_seed("bob", GameSeed::new(2)).unwrap();

    m.offer("ace", None).unwrap();
    m.commit("ace", TurnCommand::select(0)).unwrap();

    assert_eq!(m.session("ace").unwrap().phase, 2);
    assert_eq!(m.session("bob").unwrap().phase, 1);
}
