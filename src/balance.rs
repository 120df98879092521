//! Tuning parameters for game balance.
//! Centralizes the starting conditions, win threshold, pricing and the
//! cargo/opportunity catalogues offered to the player.

// ==========================================
// Starting Conditions
// ==========================================

/// Money a new airline starts with
pub const START_MONEY: f64 = 1000.0;

/// Fuel range of a new airline in km
pub const START_RANGE: f64 = 2000.0;

/// Balance at which the empire is considered built
pub const WIN_AMOUNT: f64 = 10_000.0;

/// Kilometres of range bought per unit of currency
pub const FUEL_RATE: f64 = 2.0;

// ==========================================
// Contracts
// ==========================================

/// Fixed payout of the tutorial delivery
pub const TUTORIAL_REWARD: f64 = 1200.0;

/// Cargo label of the tutorial delivery
pub const TUTORIAL_CARGO: &str = "General Cargo";

/// Basic contract reward: BASE + PER_KM * distance
pub const BASIC_REWARD_BASE: f64 = 200.0;
pub const BASIC_REWARD_PER_KM: f64 = 0.5;

/// Number of basic contracts shown in phase 2
pub const BASIC_CONTRACT_COUNT: usize = 3;

/// Number of airports sampled into the working pool each turn
pub const POOL_SIZE: usize = 30;

/// Range floor used by the bankruptcy loss policy
pub const BANKRUPT_MIN_RANGE: f64 = 100.0;

/// Cargo names for basic contracts
pub const BASIC_CARGO: &[&str] = &[
    "Electronics",
    "Textiles",
    "Auto Parts",
    "Pharmaceuticals",
    "Fresh Produce",
    "Mail & Parcels",
    "Machine Parts",
    "Books & Paper",
    "Flowers",
    "Sports Equipment",
];

/// Basic contract reward for a flight of `distance_km`, rounded to cents
pub fn basic_reward(distance_km: f64) -> f64 {
    round_cents(BASIC_REWARD_BASE + BASIC_REWARD_PER_KM * distance_km)
}

/// Round a money value to two decimals
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

// ==========================================
// Special Opportunities
// ==========================================

/// A special opportunity template.
/// Honest and fraudulent presets share this shape so the offer itself
/// never gives the scam away.
#[derive(Clone, Debug, PartialEq)]
pub struct SpecialPreset {
    pub name: &'static str,
    pub description: &'static str,
    pub reward: f64,
    pub fuel_bonus: f64,
}

/// Legitimate opportunities: pay out on delivery, no fuel bonus
pub const REWARD_PRESETS: &[SpecialPreset] = &[
    SpecialPreset {
        name: "Hospital Supplies",
        description: "Urgent medical supplies for a regional hospital",
        reward: 3000.0,
        fuel_bonus: 0.0,
    },
    SpecialPreset {
        name: "Research Lab Equipment",
        description: "Calibrated instruments for a university research lab",
        reward: 3500.0,
        fuel_bonus: 0.0,
    },
];

/// Fraudulent opportunities: promise money and fuel, pay nothing
pub const FRAUD_PRESETS: &[SpecialPreset] = &[
    SpecialPreset {
        name: "Industrial Machinery",
        description: "Heavy machinery for a new factory, fuel refill included",
        reward: 6000.0,
        fuel_bonus: 300.0,
    },
    SpecialPreset {
        name: "Luxury Goods",
        description: "High-value luxury goods, client covers part of the fuel",
        reward: 5000.0,
        fuel_bonus: 200.0,
    },
];

/// Format a money value for display (e.g., "€10.2K")
pub fn format_money(amount: f64) -> String {
    if amount.abs() >= 1_000_000.0 {
        format!("€{:.1}M", amount / 1_000_000.0)
    } else if amount.abs() >= 10_000.0 {
        format!("€{:.1}K", amount / 1_000.0)
    } else {
        format!("€{:.0}", amount)
    }
}
