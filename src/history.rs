use serde::Serialize;

use crate::airport::AirportCode;
use crate::game_state::{DeliveryOutcome, TurnOutcome};

/// How a special opportunity ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusResult {
    Success,
    Fraud,
}

/// One line of a player's flight log
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HistoryEntry {
    /// A tutorial or basic delivery
    Contract {
        game_id: u64,
        phase: u32,
        cargo: String,
        destination: AirportCode,
        distance_km: f64,
        reward: f64,
    },
    /// A special opportunity, honest or not
    Bonus {
        game_id: u64,
        phase: u32,
        name: String,
        destination: AirportCode,
        distance_km: f64,
        promised_reward: f64,
        promised_fuel_bonus: f64,
        result: BonusResult,
    },
}

impl HistoryEntry {
    pub fn from_outcome(outcome: &TurnOutcome) -> Self {
        let option = &outcome.option;
        let game_id = outcome.session.id;
        // phase the flight was taken in
        let phase = outcome.session.phase.saturating_sub(1);
        let destination = option.destination.code.clone();

        match outcome.outcome {
            DeliveryOutcome::Delivered => HistoryEntry::Contract {
                game_id,
                phase,
                cargo: option.cargo.clone(),
                destination,
                distance_km: option.distance_km,
                reward: outcome.paid,
            },
            DeliveryOutcome::BonusPaid | DeliveryOutcome::Fraud => HistoryEntry::Bonus {
                game_id,
                phase,
                name: option.cargo.clone(),
                destination,
                distance_km: option.distance_km,
                promised_reward: option.reward,
                promised_fuel_bonus: option.fuel_bonus,
                result: if outcome.outcome == DeliveryOutcome::Fraud {
                    BonusResult::Fraud
                } else {
                    BonusResult::Success
                },
            },
        }
    }

    pub fn game_id(&self) -> u64 {
        match self {
            HistoryEntry::Contract { game_id, .. } | HistoryEntry::Bonus { game_id, .. } => *game_id,
        }
    }
}

/// Append-only record of completed flights
pub trait HistoryLog {
    fn record_contract(&mut self, entry: HistoryEntry);
    fn record_bonus(&mut self, entry: HistoryEntry);
    /// Entries of one game, oldest first
    fn entries(&self, game_id: u64) -> Vec<HistoryEntry>;

    /// Route an entry to the matching record call
    fn record(&mut self, entry: HistoryEntry) {
        match entry {
            HistoryEntry::Contract { .. } => self.record_contract(entry),
            HistoryEntry::Bonus { .. } => self.record_bonus(entry),
        }
    }
}

/// History log kept in memory
#[derive(Debug, Default)]
pub struct MemoryHistoryLog {
    contracts: Vec<HistoryEntry>,
    bonuses: Vec<HistoryEntry>,
    /// Arrival order across both tables
    order: Vec<(bool, usize)>,
}

impl MemoryHistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contract_count(&self) -> usize {
        self.contracts.len()
    }

    pub fn bonus_count(&self) -> usize {
        self.bonuses.len()
    }
}

impl HistoryLog for MemoryHistoryLog {
    fn record_contract(&mut self, entry: HistoryEntry) {
        self.order.push((false, self.contracts.len()));
        self.contracts.push(entry);
    }

    fn record_bonus(&mut self, entry: HistoryEntry) {
        self.order.push((true, self.bonuses.len()));
        self.bonuses.push(entry);
    }

    fn entries(&self, game_id: u64) -> Vec<HistoryEntry> {
        self.order
            .iter()
            .map(|&(bonus, idx)| if bonus { &self.bonuses[idx] } else { &self.contracts[idx] })
            .filter(|e| e.game_id() == game_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airport::Airport;
    use crate::contract::{ContractKind, ContractOption};
    use crate::config::GameConfig;
    use crate::seed::GameSeed;
    use crate::session::GameSession;

    fn outcome(kind: ContractKind, result: DeliveryOutcome, paid: f64) -> TurnOutcome {
        let mut session =
            GameSession::new("ACE", AirportCode::new("EGLL"), &GameConfig::default(), GameSeed::new(1));
        session.id = 7;
        session.phase = 4;
        TurnOutcome {
            session,
            option: ContractOption {
                kind,
                cargo: "Luxury Goods".to_string(),
                description: String::new(),
                destination: Airport::new("EGLL", "Heathrow", 51.47, -0.46),
                distance_km: 350.0,
                reward: 5000.0,
                fuel_bonus: 200.0,
            },
            outcome: result,
            paid,
        }
    }

    #[test]
    fn test_fraud_entry() {
        let entry = HistoryEntry::from_outcome(&outcome(
            ContractKind::Special { fraud: true },
            DeliveryOutcome::Fraud,
            0.0,
        ));
        match entry {
            HistoryEntry::Bonus { result, phase, promised_reward, .. } => {
                assert_eq!(result, BonusResult::Fraud);
                assert_eq!(phase, 3);
                assert_eq!(promised_reward, 5000.0);
            }
            other => panic!("expected bonus entry, got {other:?}"),
        }
    }

    #[test]
    fn test_log_keeps_order_per_game() {
        let mut log = MemoryHistoryLog::new();
        let contract = HistoryEntry::from_outcome(&outcome(ContractKind::Basic, DeliveryOutcome::Delivered, 375.0));
        let bonus = HistoryEntry::from_outcome(&outcome(
            ContractKind::Special { fraud: false },
            DeliveryOutcome::BonusPaid,
            5000.0,
        ));
        log.record(bonus.clone());
        log.record(contract.clone());

        assert_eq!(log.contract_count(), 1);
        assert_eq!(log.bonus_count(), 1);
        assert_eq!(log.entries(7), vec![bonus, contract]);
        assert!(log.entries(8).is_empty());
    }

    #[test]
    fn test_entry_json_tag() {
        let entry = HistoryEntry::from_outcome(&outcome(ContractKind::Basic, DeliveryOutcome::Delivered, 375.0));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "contract");
        assert_eq!(json["reward"], 375.0);
    }
}
