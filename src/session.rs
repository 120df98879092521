use std::fmt;

use serde::{Deserialize, Serialize};

use crate::airport::AirportCode;
use crate::config::GameConfig;
use crate::seed::GameSeed;

/// Where a game stands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Active,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Active)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameStatus::Active => "active",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        })
    }
}

/// One player's game: the only mutable state of the simulation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    /// Assigned by the session store on creation
    pub id: u64,
    pub player_name: String,
    /// May dip below zero only transiently, before the terminal check
    pub money: f64,
    /// Remaining range in km
    pub fuel_range: f64,
    pub current_location: AirportCode,
    /// Turn counter, starts at 1
    pub phase: u32,
    /// Consecutive basic deliveries since the last tutorial or special flight
    pub normal_flight_count: u32,
    /// Next turn must be a special opportunity pair
    pub forced_random: bool,
    pub status: GameStatus,
    /// Drives the per-turn contract draws
    pub seed: u64,
    /// Bumped on every change; the store rejects saves of stale revisions
    pub revision: u64,
}

impl GameSession {
    /// A fresh game at `start` with the configured starting balance and range
    pub fn new(player_name: &str, start: AirportCode, config: &GameConfig, seed: GameSeed) -> Self {
        Self {
            id: 0,
            player_name: player_name.to_string(),
            money: config.start_money,
            fuel_range: config.start_range,
            current_location: start,
            phase: 1,
            normal_flight_count: 0,
            forced_random: false,
            status: GameStatus::Active,
            seed: seed.raw_seed(),
            revision: 0,
        }
    }

    pub fn game_seed(&self) -> GameSeed {
        GameSeed::new(self.seed)
    }

    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    /// Check if the player can afford a cost
    pub fn can_afford(&self, amount: f64) -> bool {
        self.money >= amount
    }

    /// Add money (rewards)
    pub fn add_money(&mut self, amount: f64) {
        self.money += amount;
    }

    /// Deduct money if affordable, returns true if successful
    pub fn deduct(&mut self, amount: f64) -> bool {
        if self.can_afford(amount) {
            self.money -= amount;
            true
        } else {
            false
        }
    }
}
