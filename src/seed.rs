use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A deterministic seed for the random draws of one game.
///
/// Asking for the same topic on the same turn always yields the same
/// stream, so re-requesting a turn's contracts cannot re-roll them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSeed {
    seed: u64,
}

impl GameSeed {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create a GameSeed with a random seed
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        Self { seed: rng.gen() }
    }

    /// Get the raw seed value (for persistence)
    pub fn raw_seed(&self) -> u64 {
        self.seed
    }

    /// RNG stream for `topic` on turn `phase`
    pub fn turn_rng(&self, phase: u32, topic: &str) -> ChaCha8Rng {
        let topic_hash = fnv1a(topic.as_bytes());
        let mut seed_bytes = [0u8; 32];
        seed_bytes[..8].copy_from_slice(&self.seed.to_le_bytes());
        seed_bytes[8..12].copy_from_slice(&phase.to_le_bytes());
        seed_bytes[16..24].copy_from_slice(&topic_hash.to_le_bytes());
        ChaCha8Rng::from_seed(seed_bytes)
    }
}

/// FNV-1a hash; stable across platforms and compiler versions, unlike
/// std's DefaultHasher.
fn fnv1a(data: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for &byte in data {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
