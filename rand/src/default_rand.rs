use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::ChaCha20Rng;
use xrand::{RngCore, SeedableRng};

use crate::Rand;

/// 默认使用ChaCha20 <br>
///
/// Explicitly seedable so prime generation can be reproduced; seed `0` means
/// "derive a seed from the system time".
#[derive(Clone)]
pub struct DefaultRand {
    rng: ChaCha20Rng,
}

impl DefaultRand {
    pub fn from_seed(seed: u64) -> Self {
        let seed = if seed == 0 { time_seed() } else { seed };
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        *self = Self::from_seed(seed);
    }
}

impl Default for DefaultRand {
    fn default() -> Self {
        Self::from_seed(0)
    }
}

impl Rand for DefaultRand {
    fn next_word(&mut self) -> u64 {
        self.rng.next_u64()
    }
}

fn time_seed() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_nanos() as u64 | 1,
        Err(_) => 1,
    }
}
