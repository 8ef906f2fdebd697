use bignat::BigNat;
use rand::Rand;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::euclid;
use crate::prime::PrimeGenerator;
use crate::CipherError;

/// Miller-Rabin rounds used when the caller has no opinion. Three rounds
/// bound the per-prime error by `4^-3` (about 1.6%), the count recommended
/// by Cormen et al. for key generation.
pub const DEFAULT_ROUNDS: usize = 3;

/// Decimal digits the modulus must have before a key is usable.
pub const MIN_MODULUS_DIGITS: usize = 7;

/// Keys weaker than `phi >= 2^20` are refused outright.
const MIN_TOTIENT: u64 = 1 << 20;

/// One RSA key half: the shared modulus and one exponent. Which exponent it
/// is decides whether the key encrypts or decrypts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Key {
    modulus: BigNat,
    exponent: BigNat,
}

impl Key {
    pub fn new(modulus: BigNat, exponent: BigNat) -> Self {
        Self { modulus, exponent }
    }

    pub fn modulus(&self) -> &BigNat {
        &self.modulus
    }

    pub fn exponent(&self) -> &BigNat {
        &self.exponent
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    private: Key,
    public: Key,
}

impl KeyPair {
    pub fn new(private: Key, public: Key) -> Self {
        Self { private, public }
    }

    pub fn private_key(&self) -> &Key {
        &self.private
    }

    pub fn public_key(&self) -> &Key {
        &self.public
    }

    /// Generates a key pair whose primes are `digit_count` decimal digits
    /// long, so the modulus has `2 * digit_count` or `2 * digit_count - 1`
    /// digits. Each prime passes `rounds` Miller-Rabin rounds and is wrong
    /// with probability at most `4^-rounds`.
    pub fn generate<R: Rand>(
        digit_count: usize,
        rounds: usize,
        rng: R,
    ) -> Result<KeyPair, CipherError> {
        let mut gen = PrimeGenerator::new(rng);
        let one = BigNat::one();

        let p = gen.generate(digit_count, rounds);
        let mut q = gen.generate(digit_count, rounds);
        while p == q {
            q = gen.generate(digit_count, rounds);
        }

        let n = &p * &q;
        let phi = &p.checked_sub(&one)? * &q.checked_sub(&one)?;

        if phi < BigNat::from(MIN_TOTIENT) {
            return Err(CipherError::KeyTooWeak);
        }

        // prefer F4; when phi shares a factor with it, fall back to random
        // odd draws of up to five digits, never below 65537
        let floor = BigNat::from(65537u64);
        let mut e = floor.clone();
        while euclid::gcd(&phi, &e) != one || e < floor || !e.is_odd() {
            e = gen.make_random(5);
        }

        // d*e = 1 (mod phi), already reduced into [1, phi-1]
        let d = euclid::solve_modular_linear(&e, &one, &phi)?;

        Ok(KeyPair {
            private: Key::new(n.clone(), d),
            public: Key::new(n, e),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use rand::DefaultRand;

    use super::*;

    fn key_basics(pair: &KeyPair) {
        let n = pair.public_key().modulus();
        assert_eq!(pair.private_key().modulus(), n);
        assert!(*pair.public_key().exponent() >= BigNat::from(65537u64));
        assert!(pair.public_key().exponent().is_odd());

        // m^e^d = m (mod n)
        let m = BigNat::from(42u64);
        let c = m
            .pow_mod(pair.public_key().exponent(), n)
            .unwrap();
        let m2 = c
            .pow_mod(pair.private_key().exponent(), n)
            .unwrap();
        assert_eq!(m, m2, "encrypt then decrypt lost the message");
    }

    #[test]
    fn keygen_small() {
        let t = Instant::now();
        let pair = KeyPair::generate(5, 8, DefaultRand::from_seed(101)).unwrap();
        println!("keygen(5) took {:?}", t.elapsed());

        let n_len = pair.public_key().modulus().len();
        assert!(n_len == 9 || n_len == 10, "modulus length {n_len}");
        key_basics(&pair);
    }

    #[test]
    fn keygen_twenty_digit_primes() {
        let t = Instant::now();
        let pair = KeyPair::generate(20, 8, DefaultRand::from_seed(103)).unwrap();
        println!("keygen(20) took {:?}", t.elapsed());

        let n_len = pair.public_key().modulus().len();
        assert!(n_len == 39 || n_len == 40, "modulus length {n_len}");
        key_basics(&pair);
    }

    #[test]
    fn weak_keys_are_refused() {
        // 3-digit primes cap phi below 2^20
        assert!(matches!(
            KeyPair::generate(3, 8, DefaultRand::from_seed(107)),
            Err(CipherError::KeyTooWeak)
        ));
    }

    #[test]
    fn key_file_round_trip() {
        let pair = KeyPair::generate(5, 8, DefaultRand::from_seed(109)).unwrap();
        let json = serde_json::to_string(&pair).unwrap();
        let back: KeyPair = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pair);
    }
}
