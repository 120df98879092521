use rand::seq::SliceRandom;
use rand::Rng;

use crate::airport::Airport;
use crate::balance::{SpecialPreset, FRAUD_PRESETS, REWARD_PRESETS};
use crate::contract::{ContractGenerator, ContractKind, ContractOption};
use crate::distance::DistanceService;

/// Builds the two-option special opportunity: one honest, one fraud
pub struct OptionPairBuilder<'a, D> {
    generator: &'a ContractGenerator<D>,
}

impl<'a, D: DistanceService> OptionPairBuilder<'a, D> {
    pub fn new(generator: &'a ContractGenerator<D>) -> Self {
        Self { generator }
    }

    /// The honest/fraud pair in random order, or `None` if nothing is reachable.
    ///
    /// The two options go to different airports when at least two are in
    /// range; with a single reachable airport both target it.
    pub fn build<R: Rng + ?Sized>(
        &self,
        current: &Airport,
        pool: &[Airport],
        range: f64,
        rng: &mut R,
    ) -> Option<[ContractOption; 2]> {
        let reachable = self.generator.reachable(current, pool, range);
        let targets: Vec<&(Airport, f64)> = reachable.choose_multiple(rng, 2).collect();
        let (honest_target, fraud_target) = match targets.as_slice() {
            [] => return None,
            [only] => (*only, *only),
            [first, second, ..] => (*first, *second),
        };

        let honest_preset = REWARD_PRESETS.choose(rng)?;
        let fraud_preset = FRAUD_PRESETS.choose(rng)?;

        let mut pair = [
            special_option(honest_preset, honest_target, false),
            special_option(fraud_preset, fraud_target, true),
        ];
        pair.shuffle(rng);
        Some(pair)
    }
}

fn special_option(preset: &SpecialPreset, target: &(Airport, f64), fraud: bool) -> ContractOption {
    let (destination, distance_km) = target.clone();
    ContractOption {
        kind: ContractKind::Special { fraud },
        cargo: preset.name.to_string(),
        description: format!("{} to {}", preset.description, destination.name),
        destination,
        distance_km,
        reward: preset.reward,
        fuel_bonus: preset.fuel_bonus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance;
    use crate::contract::tests::line_of_airports;
    use crate::distance::GreatCircle;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn generator() -> ContractGenerator<GreatCircle> {
        ContractGenerator::new(GreatCircle, balance::TUTORIAL_REWARD)
    }

    #[test]
    fn test_exactly_one_fraud() {
        let pool = line_of_airports(10, 1.0);
        let generator = generator();
        let builder = OptionPairBuilder::new(&generator);
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let pair = builder.build(&pool[0], &pool, 2000.0, &mut rng).unwrap();
            assert_eq!(pair.iter().filter(|o| o.is_fraud()).count(), 1);
            assert!(pair.iter().all(|o| o.is_special()));
            assert_ne!(pair[0].destination.code, pair[1].destination.code);
        }
    }

    #[test]
    fn test_order_is_shuffled() {
        let pool = line_of_airports(10, 1.0);
        let generator = generator();
        let builder = OptionPairBuilder::new(&generator);
        let mut fraud_first = 0;
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let pair = builder.build(&pool[0], &pool, 2000.0, &mut rng).unwrap();
            if pair[0].is_fraud() {
                fraud_first += 1;
            }
        }
        assert!(fraud_first > 50 && fraud_first < 150, "fraud first {fraud_first}/200");
    }

    #[test]
    fn test_single_reachable_airport_shared() {
        let pool = line_of_airports(5, 1.0);
        let generator = generator();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let pair = OptionPairBuilder::new(&generator)
            .build(&pool[0], &pool, 150.0, &mut rng)
            .unwrap();
        assert_eq!(pair[0].destination.code, pair[1].destination.code);
        assert_eq!(pair.iter().filter(|o| o.is_fraud()).count(), 1);
    }

    #[test]
    fn test_nothing_reachable() {
        let pool = line_of_airports(5, 10.0);
        let generator = generator();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(OptionPairBuilder::new(&generator)
            .build(&pool[0], &pool, 100.0, &mut rng)
            .is_none());
    }

    #[test]
    fn test_views_hide_fraud() {
        let pool = line_of_airports(10, 1.0);
        let generator = generator();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let pair = OptionPairBuilder::new(&generator)
            .build(&pool[0], &pool, 2000.0, &mut rng)
            .unwrap();

        let a = serde_json::to_value(pair[0].view()).unwrap();
        let b = serde_json::to_value(pair[1].view()).unwrap();
        let keys = |v: &serde_json::Value| {
            let mut keys: Vec<String> = v.as_object().unwrap().keys().cloned().collect();
            keys.sort();
            keys
        };
        assert_eq!(keys(&a), keys(&b));
        assert_eq!(a["label"], b["label"]);
        assert!(a["reward"].is_number() && b["reward"].is_number());
        assert!(a["fuel_bonus"].is_number() && b["fuel_bonus"].is_number());
        assert!(a.get("is_fraud").is_none());
    }

    #[test]
    fn test_presets_come_from_catalogues() {
        let pool = line_of_airports(10, 1.0);
        let generator = generator();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let pair = OptionPairBuilder::new(&generator)
            .build(&pool[0], &pool, 2000.0, &mut rng)
            .unwrap();
        for option in &pair {
            let catalogue = if option.is_fraud() { FRAUD_PRESETS } else { REWARD_PRESETS };
            assert!(catalogue.iter().any(|p| p.name == option.cargo && p.reward == option.reward));
        }
    }
}
