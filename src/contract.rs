use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::airport::Airport;
use crate::balance::{self, BASIC_CARGO, TUTORIAL_CARGO};
use crate::distance::DistanceService;

/// What kind of delivery an option is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContractKind {
    /// The single fixed-price first flight
    Tutorial,
    /// Distance-priced delivery
    Basic,
    /// Special opportunity from a reward/fraud pair
    Special { fraud: bool },
}

/// How an option is labelled on screen. Honest and fraudulent special
/// opportunities share a label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionLabel {
    Tutorial,
    Basic,
    Special,
}

/// A delivery the player may accept this turn
#[derive(Clone, Debug, PartialEq)]
pub struct ContractOption {
    pub kind: ContractKind,
    pub cargo: String,
    pub description: String,
    pub destination: Airport,
    pub distance_km: f64,
    /// Promised payout
    pub reward: f64,
    /// Promised range refill in km
    pub fuel_bonus: f64,
}

impl ContractOption {
    pub fn is_fraud(&self) -> bool {
        matches!(self.kind, ContractKind::Special { fraud: true })
    }

    pub fn is_special(&self) -> bool {
        matches!(self.kind, ContractKind::Special { .. })
    }

    pub fn label(&self) -> OptionLabel {
        match self.kind {
            ContractKind::Tutorial => OptionLabel::Tutorial,
            ContractKind::Basic => OptionLabel::Basic,
            ContractKind::Special { .. } => OptionLabel::Special,
        }
    }

    /// What the presentation layer is allowed to see
    pub fn view(&self) -> OptionView {
        OptionView {
            label: self.label(),
            cargo: self.cargo.clone(),
            description: self.description.clone(),
            destination: self.destination.clone(),
            distance_km: self.distance_km.round(),
            reward: self.reward,
            fuel_bonus: self.fuel_bonus,
        }
    }
}

/// Display projection of a [`ContractOption`]; carries no fraud flag
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OptionView {
    pub label: OptionLabel,
    pub cargo: String,
    pub description: String,
    pub destination: Airport,
    pub distance_km: f64,
    pub reward: f64,
    pub fuel_bonus: f64,
}

/// Builds delivery contracts reachable from the current airport
#[derive(Clone, Debug)]
pub struct ContractGenerator<D> {
    distance: D,
    tutorial_reward: f64,
}

impl<D: DistanceService> ContractGenerator<D> {
    pub fn new(distance: D, tutorial_reward: f64) -> Self {
        Self {
            distance,
            tutorial_reward,
        }
    }

    pub fn distance(&self, a: &Airport, b: &Airport) -> f64 {
        self.distance.distance(a, b)
    }

    /// Airports in `pool` with `0 < distance <= range`, paired with their distance
    pub fn reachable(&self, current: &Airport, pool: &[Airport], range: f64) -> Vec<(Airport, f64)> {
        pool.iter()
            .filter(|a| a.code != current.code)
            .map(|a| (a.clone(), self.distance.distance(current, a)))
            .filter(|(_, d)| *d > 0.0 && *d <= range)
            .collect()
    }

    /// The tutorial delivery to one random reachable airport
    pub fn tutorial<R: Rng + ?Sized>(
        &self,
        current: &Airport,
        pool: &[Airport],
        range: f64,
        rng: &mut R,
    ) -> Option<ContractOption> {
        let reachable = self.reachable(current, pool, range);
        let (destination, distance_km) = reachable.choose(rng)?.clone();
        Some(ContractOption {
            kind: ContractKind::Tutorial,
            cargo: TUTORIAL_CARGO.to_string(),
            description: format!("Deliver {} to {}", TUTORIAL_CARGO.to_lowercase(), destination.name),
            destination,
            distance_km,
            reward: self.tutorial_reward,
            fuel_bonus: 0.0,
        })
    }

    /// Up to `count` basic contracts to distinct reachable airports.
    /// Returns fewer when fewer airports are in range.
    pub fn basic<R: Rng + ?Sized>(
        &self,
        current: &Airport,
        pool: &[Airport],
        range: f64,
        count: usize,
        rng: &mut R,
    ) -> Vec<ContractOption> {
        let reachable = self.reachable(current, pool, range);
        let picked: Vec<(Airport, f64)> = reachable.choose_multiple(rng, count).cloned().collect();

        picked
            .into_iter()
            .map(|(destination, distance_km)| {
                let cargo = BASIC_CARGO.choose(rng).copied().unwrap_or(TUTORIAL_CARGO);
                ContractOption {
                    kind: ContractKind::Basic,
                    cargo: cargo.to_string(),
                    description: format!(
                        "Deliver {} to {} ({:.0} km)",
                        cargo.to_lowercase(),
                        destination.name,
                        distance_km
                    ),
                    destination,
                    distance_km,
                    reward: balance::basic_reward(distance_km),
                    fuel_bonus: 0.0,
                }
            })
            .collect()
    }
}
