use std::collections::BTreeMap;

use crate::error::{GameError, GameResult};
use crate::session::GameSession;

/// Persistence of game sessions
pub trait SessionStore {
    /// The active game of `player_name`, if any
    fn load(&self, player_name: &str) -> Option<GameSession>;

    /// Store a new game, returning its id
    fn create(&mut self, initial: GameSession) -> GameResult<u64>;

    /// Replace a stored game.
    ///
    /// `session.revision` must equal the stored revision; the stored copy
    /// gets the next revision, which is returned.
    fn save(&mut self, session: &GameSession) -> GameResult<u64>;
}

/// Session store kept in memory
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: BTreeMap<u64, GameSession>,
    next_id: u64,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn get(&self, id: u64) -> Option<&GameSession> {
        self.sessions.get(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, player_name: &str) -> Option<GameSession> {
        self.sessions
            .values()
            .find(|s| s.player_name == player_name && s.is_active())
            .cloned()
    }

    fn create(&mut self, mut initial: GameSession) -> GameResult<u64> {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        initial.id = id;
        initial.revision = 0;
        self.sessions.insert(id, initial);
        Ok(id)
    }

    fn save(&mut self, session: &GameSession) -> GameResult<u64> {
        let stored = self
            .sessions
            .get_mut(&session.id)
            .ok_or_else(|| GameError::UnknownPlayer(session.player_name.clone()))?;
        if stored.revision != session.revision {
            return Err(GameError::StaleRevision {
                id: session.id,
                expected: session.revision,
                found: stored.revision,
            });
        }
        *stored = session.clone();
        stored.revision += 1;
        Ok(stored.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airport::AirportCode;
    use crate::config::GameConfig;
    use crate::seed::GameSeed;
    use crate::session::GameStatus;

    fn new_game(name: &str) -> GameSession {
        GameSession::new(name, AirportCode::new("EDDF"), &GameConfig::default(), GameSeed::new(5))
    }

    #[test]
    fn test_create_and_load() {
        let mut store = MemorySessionStore::new();
        let id = store.create(new_game("ACE")).unwrap();
        assert_eq!(id, 1);
        let loaded = store.load("ACE").unwrap();
        assert_eq!(loaded.id, 1);
        assert!(store.load("BOB").is_none());
        assert_eq!(store.create(new_game("BOB")).unwrap(), 2);
    }

    #[test]
    fn test_save_bumps_revision() {
        let mut store = MemorySessionStore::new();
        store.create(new_game("ACE")).unwrap();
        let mut s = store.load("ACE").unwrap();
        s.money = 50.0;
        assert_eq!(store.save(&s).unwrap(), 1);
        assert_eq!(store.load("ACE").unwrap().money, 50.0);
    }

    #[test]
    fn test_stale_save_rejected() {
        let mut store = MemorySessionStore::new();
        store.create(new_game("ACE")).unwrap();
        let first = store.load("ACE").unwrap();
        let second = first.clone();

        store.save(&first).unwrap();
        let err = store.save(&second).unwrap_err();
        assert!(matches!(err, GameError::StaleRevision { expected: 0, found: 1, .. }));
    }

    #[test]
    fn test_finished_games_are_not_loaded() {
        let mut store = MemorySessionStore::new();
        store.create(new_game("ACE")).unwrap();
        let mut s = store.load("ACE").unwrap();
        s.status = GameStatus::Won;
        store.save(&s).unwrap();
        assert!(store.load("ACE").is_none());
        assert_eq!(store.get(1).unwrap().status, GameStatus::Won);
    }

    #[test]
    fn test_save_unknown_game() {
        let mut store = MemorySessionStore::new();
        let mut s = new_game("ACE");
        s.id = 42;
        assert!(matches!(store.save(&s), Err(GameError::UnknownPlayer(_))));
    }
}
