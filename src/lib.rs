pub mod airport;
pub mod balance;
pub mod config;
pub mod contract;
pub mod distance;
pub mod error;
pub mod game_manager;
pub mod game_state;
pub mod history;
pub mod seed;
pub mod session;
pub mod special_offer;
pub mod store;

pub use airport::{Airport, AirportCatalog, AirportCode, AirportProvider, PoolCriteria};
pub use config::{GameConfig, LossPolicy};
pub use contract::{ContractGenerator, ContractKind, ContractOption, OptionView};
pub use distance::{DistanceService, GreatCircle};
pub use error::{GameError, GameResult};
pub use game_manager::{GameManager, LoginOutcome};
pub use game_state::{FlightMode, GameStateMachine, TurnCommand, TurnMenu, TurnOffer, TurnOutcome};
pub use session::{GameSession, GameStatus};
