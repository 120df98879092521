use std::collections::HashMap;

use rand::seq::SliceRandom;

use crate::airport::{Airport, AirportProvider, PoolCriteria};
use crate::config::GameConfig;
use crate::contract::OptionView;
use crate::distance::DistanceService;
use crate::error::{GameError, GameResult};
use crate::game_state::{FlightMode, GameStateMachine, TurnCommand, TurnMenu, TurnOffer, TurnOutcome};
use crate::history::{HistoryEntry, HistoryLog};
use crate::seed::GameSeed;
use crate::session::GameSession;
use crate::store::SessionStore;

/// Result of a login
#[derive(Clone, Debug, PartialEq)]
pub enum LoginOutcome {
    /// The player had an active game
    Resumed(GameSession),
    /// A fresh game was started
    New(GameSession),
}

impl LoginOutcome {
    pub fn session(&self) -> &GameSession {
        match self {
            LoginOutcome::Resumed(s) | LoginOutcome::New(s) => s,
        }
    }

    pub fn into_session(self) -> GameSession {
        match self {
            LoginOutcome::Resumed(s) | LoginOutcome::New(s) => s,
        }
    }
}

/// Request/response front of the game.
///
/// Owns the store, history and airport handles; every call loads the
/// player's session, runs the state machine and saves the result.
pub struct GameManager<S, H, P, D> {
    machine: GameStateMachine<D>,
    store: S,
    history: H,
    airports: P,
    /// Offers waiting for the player's pick, by player name
    pending: HashMap<String, TurnOffer>,
}

impl<S, H, P, D> GameManager<S, H, P, D>
where
    S: SessionStore,
    H: HistoryLog,
    P: AirportProvider,
    D: DistanceService,
{
    pub fn new(config: GameConfig, distance: D, store: S, history: H, airports: P) -> Self {
        Self {
            machine: GameStateMachine::new(config, distance),
            store,
            history,
            airports,
            pending: HashMap::new(),
        }
    }

    // ==========================================
    // Accessors
    // ==========================================

    pub fn config(&self) -> &GameConfig {
        self.machine.config()
    }

    pub fn machine(&self) -> &GameStateMachine<D> {
        &self.machine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    // ==========================================
    // Sessions
    // ==========================================

    /// Resume the player's active game or start a new one
    pub fn login(&mut self, player_name: &str) -> GameResult<LoginOutcome> {
        self.login_with_seed(player_name, GameSeed::random())
    }

    /// Like [`login`](Self::login), with a fixed seed for a new game
    pub fn login_with_seed(&mut self, player_name: &str, seed: GameSeed) -> GameResult<LoginOutcome> {
        let name = normalize_name(player_name)?;
        if let Some(existing) = self.store.load(&name) {
            log::info!("{} resumed game {} at phase {}", name, existing.id, existing.phase);
            return Ok(LoginOutcome::Resumed(existing));
        }

        let mut rng = seed.turn_rng(0, "start");
        let pool = self
            .airports
            .sample(&self.criteria(), self.config().pool_size, &mut rng)?;
        let start = pool.choose(&mut rng).ok_or(GameError::EmptyPool)?;

        let mut session = GameSession::new(&name, start.code.clone(), self.config(), seed);
        session.id = self.store.create(session.clone())?;
        log::info!("{} started game {} at {}", name, session.id, start.name);
        Ok(LoginOutcome::New(session))
    }

    /// The player's active game
    pub fn session(&self, player_name: &str) -> GameResult<GameSession> {
        let name = normalize_name(player_name)?;
        self.store
            .load(&name)
            .ok_or(GameError::UnknownPlayer(name))
    }

    /// Airport the player is currently at
    pub fn location(&self, player_name: &str) -> GameResult<Airport> {
        let session = self.session(player_name)?;
        self.current_airport(&session)
    }

    // ==========================================
    // Turns
    // ==========================================

    pub fn menu(&self, player_name: &str) -> GameResult<TurnMenu> {
        let session = self.session(player_name)?;
        self.machine.menu(&session)
    }

    /// Generate this turn's options and hold them until the player commits
    pub fn offer(&mut self, player_name: &str, mode: Option<FlightMode>) -> GameResult<Vec<OptionView>> {
        let session = self.session(player_name)?;
        let (current, pool) = self.turn_pool(&session)?;
        let offer = self.machine.prepare_turn(&session, &current, &pool, mode)?;
        let views = offer.views();
        self.pending.insert(session.player_name.clone(), offer);
        Ok(views)
    }

    pub fn pending_offer(&self, player_name: &str) -> Option<&TurnOffer> {
        let name = normalize_name(player_name).ok()?;
        self.pending.get(&name)
    }

    /// Resolve the pending offer with the player's pick and persist the result.
    /// A failed commit leaves both the session and the pending offer in place.
    pub fn commit(&mut self, player_name: &str, command: TurnCommand) -> GameResult<TurnOutcome> {
        let session = self.session(player_name)?;
        let offer = self
            .pending
            .get(&session.player_name)
            .ok_or_else(|| GameError::NoPendingOffer(session.player_name.clone()))?;

        let mut outcome = self.machine.resolve_turn(&session, offer, command)?;
        outcome.session.revision = self.store.save(&outcome.session)?;
        self.history.record(outcome.history_entry());
        self.pending.remove(&session.player_name);

        if outcome.session.status.is_terminal() {
            log::info!(
                "Game {} of {} ended: {}",
                outcome.session.id,
                outcome.session.player_name,
                outcome.session.status
            );
        }
        Ok(outcome)
    }

    /// Buy fuel between turns
    pub fn buy_fuel(&mut self, player_name: &str, amount: f64) -> GameResult<GameSession> {
        let session = self.session(player_name)?;
        let mut next = self.machine.buy_fuel(&session, amount)?;
        next.revision = self.store.save(&next)?;
        log::info!(
            "{} bought {:.0} km of range for {:.2}",
            next.player_name,
            next.fuel_range - session.fuel_range,
            amount
        );
        Ok(next)
    }

    /// Last chance for a stranded player; ends the game if nothing comes in range
    pub fn rescue(&mut self, player_name: &str, purchase: Option<f64>) -> GameResult<GameSession> {
        let session = self.session(player_name)?;
        let (current, pool) = self.turn_pool(&session)?;
        let mut next = self.machine.rescue(&session, &current, &pool, purchase)?;
        if next != session {
            next.revision = self.store.save(&next)?;
            self.pending.remove(&session.player_name);
        }
        Ok(next)
    }

    /// Completed flights of a game, oldest first
    pub fn flight_log(&self, game_id: u64) -> Vec<HistoryEntry> {
        self.history.entries(game_id)
    }

    fn criteria(&self) -> PoolCriteria {
        PoolCriteria::region(&self.config().region)
    }

    fn current_airport(&self, session: &GameSession) -> GameResult<Airport> {
        self.airports
            .airport(&session.current_location)
            .ok_or_else(|| GameError::UnknownAirport(session.current_location.to_string()))
    }

    /// The player's airport and the working pool for the current turn
    fn turn_pool(&self, session: &GameSession) -> GameResult<(Airport, Vec<Airport>)> {
        let current = self.current_airport(session)?;
        let mut rng = session.game_seed().turn_rng(session.phase, "pool");
        let pool = self
            .airports
            .sample(&self.criteria(), self.config().pool_size, &mut rng)?;
        Ok((current, pool))
    }
}

/// Players are identified by their trimmed, upper-cased name
fn normalize_name(player_name: &str) -> GameResult<String> {
    let name = player_name.trim().to_uppercase();
    if name.is_empty() {
        Err(GameError::InvalidPlayerName)
    } else {
        Ok(name)
    }
}
