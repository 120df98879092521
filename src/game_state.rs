use crate::airport::{Airport, AirportCode};
use crate::config::GameConfig;
use crate::contract::{ContractGenerator, ContractKind, ContractOption, OptionView};
use crate::distance::DistanceService;
use crate::error::{GameError, GameResult};
use crate::history::HistoryEntry;
use crate::session::{GameSession, GameStatus};
use crate::special_offer::OptionPairBuilder;

/// Which generation rule applies to the coming turn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnMenu {
    /// Phase 1: a single tutorial delivery
    Tutorial,
    /// Phase 2: pick one of the basic contracts
    Basic,
    /// Last flight was a chosen basic one; only the special pair is offered
    ForcedRandom,
    /// Player picks between a basic contract and the special pair
    FreeChoice,
}

/// The player's pick on a free-choice turn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlightMode {
    Basic,
    Random,
}

/// How an offer came about. Decides how the forced-random flag moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OfferKind {
    Tutorial,
    Basic,
    ChosenBasic,
    ChosenRandom,
    ForcedRandom,
}

impl OfferKind {
    fn topic(&self) -> &'static str {
        match self {
            OfferKind::Tutorial => "tutorial",
            OfferKind::Basic | OfferKind::ChosenBasic => "basic",
            OfferKind::ChosenRandom | OfferKind::ForcedRandom => "special",
        }
    }

    /// Forced-random flag after a flight from this offer
    fn next_forced_random(&self, current: bool) -> bool {
        match self {
            OfferKind::Tutorial | OfferKind::Basic => current,
            OfferKind::ChosenBasic => true,
            OfferKind::ChosenRandom | OfferKind::ForcedRandom => false,
        }
    }
}

/// Options generated for one turn of one session
#[derive(Clone, Debug, PartialEq)]
pub struct TurnOffer {
    pub origin: AirportCode,
    pub phase: u32,
    pub kind: OfferKind,
    pub options: Vec<ContractOption>,
}

impl TurnOffer {
    /// What the presentation layer shows, in offer order
    pub fn views(&self) -> Vec<OptionView> {
        self.options.iter().map(ContractOption::view).collect()
    }
}

/// The player's answer to an offer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurnCommand {
    /// Index into `TurnOffer::options`
    pub selection: usize,
    /// Money to spend on fuel before taking off
    pub fuel_purchase: Option<f64>,
}

impl TurnCommand {
    pub fn select(selection: usize) -> Self {
        Self {
            selection,
            fuel_purchase: None,
        }
    }

    pub fn with_fuel(mut self, amount: f64) -> Self {
        self.fuel_purchase = Some(amount);
        self
    }
}

/// What happened to the cargo
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Tutorial or basic contract paid
    Delivered,
    /// Honest special opportunity paid, bonus fuel included
    BonusPaid,
    /// The client vanished
    Fraud,
}

/// Result of a resolved turn
#[derive(Clone, Debug, PartialEq)]
pub struct TurnOutcome {
    pub session: GameSession,
    pub option: ContractOption,
    pub outcome: DeliveryOutcome,
    /// Money actually credited
    pub paid: f64,
}

impl TurnOutcome {
    pub fn message(&self) -> &'static str {
        match (self.session.status, self.outcome) {
            (GameStatus::Won, _) => "VICTORY! Empire Built.",
            (GameStatus::Lost, _) => "Out of fuel. Game Over.",
            (_, DeliveryOutcome::Fraud) => "FRAUD! The company vanished.",
            _ => "Delivery Successful!",
        }
    }

    /// Log entry for the history collaborator
    pub fn history_entry(&self) -> HistoryEntry {
        HistoryEntry::from_outcome(self)
    }
}

/// Owns the turn rules: which options are offered, how a pick is settled,
/// and when the game ends.
#[derive(Clone, Debug)]
pub struct GameStateMachine<D> {
    config: GameConfig,
    generator: ContractGenerator<D>,
}

impl<D: DistanceService> GameStateMachine<D> {
    pub fn new(config: GameConfig, distance: D) -> Self {
        let generator = ContractGenerator::new(distance, config.tutorial_reward);
        Self { config, generator }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn generator(&self) -> &ContractGenerator<D> {
        &self.generator
    }

    /// The menu for the session's next turn
    pub fn menu(&self, session: &GameSession) -> GameResult<TurnMenu> {
        ensure_active(session)?;
        Ok(match session.phase {
            0 | 1 => TurnMenu::Tutorial,
            2 => TurnMenu::Basic,
            _ if session.forced_random => TurnMenu::ForcedRandom,
            _ => TurnMenu::FreeChoice,
        })
    }

    /// Whether any airport in `pool` is within the session's range
    pub fn has_reachable(&self, session: &GameSession, current: &Airport, pool: &[Airport]) -> bool {
        !self.generator.reachable(current, pool, session.fuel_range).is_empty()
    }

    /// Generate the options for the session's next turn.
    ///
    /// `mode` is only consulted on free-choice turns. Draws come from the
    /// session seed, so asking twice for the same turn gives the same offer.
    pub fn prepare_turn(
        &self,
        session: &GameSession,
        current: &Airport,
        pool: &[Airport],
        mode: Option<FlightMode>,
    ) -> GameResult<TurnOffer> {
        let menu = self.menu(session)?;
        if current.code != session.current_location {
            return Err(GameError::UnknownAirport(current.code.to_string()));
        }
        if !self.has_reachable(session, current, pool) {
            log::warn!(
                "{} is stranded at {} with {:.0} km of range",
                session.player_name,
                session.current_location,
                session.fuel_range
            );
            return Err(GameError::NoReachableDestination);
        }

        let kind = match (menu, mode) {
            (TurnMenu::Tutorial, _) => OfferKind::Tutorial,
            (TurnMenu::Basic, _) => OfferKind::Basic,
            (TurnMenu::ForcedRandom, Some(FlightMode::Basic)) => return Err(GameError::ModeNotOffered),
            (TurnMenu::ForcedRandom, _) => OfferKind::ForcedRandom,
            (TurnMenu::FreeChoice, Some(FlightMode::Basic)) => OfferKind::ChosenBasic,
            (TurnMenu::FreeChoice, Some(FlightMode::Random)) => OfferKind::ChosenRandom,
            (TurnMenu::FreeChoice, None) => return Err(GameError::ModeRequired),
        };

        let mut rng = session.game_seed().turn_rng(session.phase, kind.topic());
        let range = session.fuel_range;
        let options: Vec<ContractOption> = match kind {
            OfferKind::Tutorial => self
                .generator
                .tutorial(current, pool, range, &mut rng)
                .into_iter()
                .collect(),
            OfferKind::Basic => {
                self.generator
                    .basic(current, pool, range, self.config.basic_contract_count, &mut rng)
            }
            OfferKind::ChosenBasic => self.generator.basic(current, pool, range, 1, &mut rng),
            OfferKind::ChosenRandom | OfferKind::ForcedRandom => OptionPairBuilder::new(&self.generator)
                .build(current, pool, range, &mut rng)
                .map(Vec::from)
                .unwrap_or_default(),
        };
        if options.is_empty() {
            return Err(GameError::NoReachableDestination);
        }

        log::debug!(
            "Turn {} for {}: {:?} offer with {} option(s)",
            session.phase,
            session.player_name,
            kind,
            options.len()
        );
        Ok(TurnOffer {
            origin: session.current_location.clone(),
            phase: session.phase,
            kind,
            options,
        })
    }

    /// Apply the player's pick. On error the session is left as it was and
    /// the turn can be retried.
    pub fn resolve_turn(
        &self,
        session: &GameSession,
        offer: &TurnOffer,
        command: TurnCommand,
    ) -> GameResult<TurnOutcome> {
        ensure_active(session)?;
        if offer.origin != session.current_location || offer.phase != session.phase {
            return Err(GameError::StaleOffer);
        }
        let option = offer
            .options
            .get(command.selection)
            .ok_or(GameError::InvalidSelection {
                index: command.selection,
                available: offer.options.len(),
            })?;

        let fueled = match command.fuel_purchase {
            Some(amount) => self.buy_fuel(session, amount)?,
            None => session.clone(),
        };
        if option.distance_km > fueled.fuel_range {
            return Err(GameError::InsufficientFuel {
                required_km: option.distance_km,
                available_km: fueled.fuel_range,
            });
        }

        Ok(self.settle(&fueled, option, offer.kind))
    }

    /// Fly `option` and settle it: travel, payment, counters, terminal check.
    /// Does not check that the range covers the flight.
    pub fn settle(&self, session: &GameSession, option: &ContractOption, kind: OfferKind) -> TurnOutcome {
        let mut next = session.clone();
        next.fuel_range -= option.distance_km;
        next.current_location = option.destination.code.clone();

        let (outcome, paid) = match option.kind {
            ContractKind::Tutorial | ContractKind::Basic => (DeliveryOutcome::Delivered, option.reward),
            ContractKind::Special { fraud: true } => (DeliveryOutcome::Fraud, 0.0),
            ContractKind::Special { fraud: false } => {
                next.fuel_range += option.fuel_bonus;
                (DeliveryOutcome::BonusPaid, option.reward)
            }
        };
        next.add_money(paid);

        next.phase += 1;
        next.normal_flight_count = match option.kind {
            ContractKind::Basic => next.normal_flight_count + 1,
            ContractKind::Tutorial | ContractKind::Special { .. } => 0,
        };
        next.forced_random = kind.next_forced_random(next.forced_random);
        next.status = self.terminal_status(next.money, next.fuel_range);

        log::info!(
            "{} flew {} -> {} ({:.0} km): {:?}, money {:.2}, range {:.0} km, status {}",
            next.player_name,
            session.current_location,
            next.current_location,
            option.distance_km,
            outcome,
            next.money,
            next.fuel_range,
            next.status
        );
        TurnOutcome {
            session: next,
            option: option.clone(),
            outcome,
            paid,
        }
    }

    /// Trade `amount` money for `amount * fuel_rate` km of range
    pub fn buy_fuel(&self, session: &GameSession, amount: f64) -> GameResult<GameSession> {
        ensure_active(session)?;
        if !amount.is_finite() || amount <= 0.0 || !session.can_afford(amount) {
            return Err(GameError::InvalidFuelAmount {
                amount,
                balance: session.money,
            });
        }
        let mut next = session.clone();
        next.deduct(amount);
        next.fuel_range += amount * self.config.fuel_rate;
        Ok(next)
    }

    /// Handle a player with nothing in range.
    ///
    /// A purchase that brings an airport into range is applied. If nothing
    /// is reachable afterwards the game is lost and the failed purchase is
    /// not charged.
    pub fn rescue(
        &self,
        session: &GameSession,
        current: &Airport,
        pool: &[Airport],
        purchase: Option<f64>,
    ) -> GameResult<GameSession> {
        ensure_active(session)?;
        let fueled = match purchase {
            Some(amount) => self.buy_fuel(session, amount)?,
            None => session.clone(),
        };
        if self.has_reachable(&fueled, current, pool) {
            return Ok(fueled);
        }

        log::warn!(
            "{} has no reachable destination from {}; game lost",
            session.player_name,
            session.current_location
        );
        let mut lost = session.clone();
        lost.status = GameStatus::Lost;
        Ok(lost)
    }

    /// Win is checked before loss
    fn terminal_status(&self, money: f64, fuel_range: f64) -> GameStatus {
        if money >= self.config.win_amount {
            GameStatus::Won
        } else if self.config.loss_policy.is_lost(money, fuel_range) {
            GameStatus::Lost
        } else {
            GameStatus::Active
        }
    }
}

fn ensure_active(session: &GameSession) -> GameResult<()> {
    if session.status.is_terminal() {
        Err(GameError::SessionFinished(session.status))
    } else {
        Ok(())
    }
}
