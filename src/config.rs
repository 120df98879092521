//! Deployment configuration.
//!
//! Every field defaults to the value in `balance`, so a config file only has
//! to name what it changes.

use serde::{Deserialize, Serialize};

use crate::balance;
use crate::error::GameResult;

/// How a game is lost once the win check has failed
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum LossPolicy {
    /// Range below zero after a flight
    FuelExhausted,
    /// Out of money and too little range left to reach anything useful
    Bankrupt { min_range_km: f64 },
}

impl LossPolicy {
    pub fn is_lost(&self, money: f64, fuel_range: f64) -> bool {
        match *self {
            LossPolicy::FuelExhausted => fuel_range < 0.0,
            LossPolicy::Bankrupt { min_range_km } => money <= 0.0 && fuel_range < min_range_km,
        }
    }
}

impl Default for LossPolicy {
    fn default() -> Self {
        LossPolicy::FuelExhausted
    }
}

/// Fixed-at-deployment game settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub start_money: f64,
    pub start_range: f64,
    pub win_amount: f64,
    /// km of range per unit of currency
    pub fuel_rate: f64,
    pub tutorial_reward: f64,
    pub basic_contract_count: usize,
    pub pool_size: usize,
    /// Region passed to the airport provider
    pub region: String,
    pub loss_policy: LossPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_money: balance::START_MONEY,
            start_range: balance::START_RANGE,
            win_amount: balance::WIN_AMOUNT,
            fuel_rate: balance::FUEL_RATE,
            tutorial_reward: balance::TUTORIAL_REWARD,
            basic_contract_count: balance::BASIC_CONTRACT_COUNT,
            pool_size: balance::POOL_SIZE,
            region: "EU".to_string(),
            loss_policy: LossPolicy::default(),
        }
    }
}

impl GameConfig {
    /// Parse a JSON config, filling gaps from the defaults
    pub fn from_json(json: &str) -> GameResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The bankruptcy rule used by the web variant of the game
    pub fn with_bankrupt_policy(mut self) -> Self {
        self.loss_policy = LossPolicy::Bankrupt {
            min_range_km: balance::BANKRUPT_MIN_RANGE,
        };
        self
    }
}
