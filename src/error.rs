use thiserror::Error;

use crate::session::GameStatus;

pub type GameResult<T> = Result<T, GameError>;

/// Everything that can go wrong while running a game
#[derive(Debug, Error)]
pub enum GameError {
    #[error("no airports available")]
    EmptyPool,
    #[error("selection {index} is out of range ({available} options offered)")]
    InvalidSelection { index: usize, available: usize },
    #[error("cannot buy fuel for {amount} with a balance of {balance}")]
    InvalidFuelAmount { amount: f64, balance: f64 },
    #[error("flight needs {required_km:.0} km of range but only {available_km:.0} km is left")]
    InsufficientFuel { required_km: f64, available_km: f64 },
    #[error("no airport is reachable with the current range")]
    NoReachableDestination,
    #[error("choose between a basic contract and a random opportunity")]
    ModeRequired,
    #[error("basic contracts are not offered this turn")]
    ModeNotOffered,
    #[error("offer does not belong to the current turn")]
    StaleOffer,
    #[error("no offer is pending for {0}")]
    NoPendingOffer(String),
    #[error("game is already {0}")]
    SessionFinished(GameStatus),
    #[error("no active game for {0}")]
    UnknownPlayer(String),
    #[error("player name must not be empty")]
    InvalidPlayerName,
    #[error("unknown airport {0}")]
    UnknownAirport(String),
    #[error("game {id} was modified concurrently (expected revision {expected}, found {found})")]
    StaleRevision { id: u64, expected: u64, found: u64 },
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl GameError {
    /// Recoverable errors leave the session untouched and the turn can be retried
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::InvalidSelection { .. }
                | GameError::InvalidFuelAmount { .. }
                | GameError::ModeRequired
                | GameError::ModeNotOffered
                | GameError::StaleOffer
                | GameError::NoPendingOffer(_)
                | GameError::InvalidPlayerName
                | GameError::StaleRevision { .. }
        )
    }
}
