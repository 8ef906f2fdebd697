//! 素数生成
//!
//! Miller-Rabin素数测试: 对于奇数$n \gt 3$和正整数$k$, 误判概率至多为$4^{-k}$.

use bignat::BigNat;
use rand::Rand;

/// Probabilistic prime generator over a caller-supplied random source.
pub struct PrimeGenerator<R: Rand> {
    rng: R,
}

impl<R: Rand> PrimeGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// `k` uniformly random decimal digits, little-endian.
    ///
    /// Each drawn word is consumed digit by digit while the residue stays
    /// `>= 10`; the final digit of every word is discarded because it is not
    /// uniform over `[0, 9]`.
    fn random_digits(&mut self, k: usize) -> Vec<u8> {
        let mut digits = vec![0u8; k];
        let mut filled = 0;
        while filled < k {
            let mut word = self.rng.next_word();
            while word >= 10 && filled < k {
                digits[filled] = (word % 10) as u8;
                word /= 10;
                filled += 1;
            }
        }
        digits
    }

    /// One uniform decimal digit.
    fn random_digit(&mut self) -> u8 {
        loop {
            let word = self.rng.next_word();
            if word >= 10 {
                return (word % 10) as u8;
            }
        }
    }

    /// A random number of up to `k` digits (leading zeroes collapse).
    pub fn make_random(&mut self, k: usize) -> BigNat {
        BigNat::from_le_digits(self.random_digits(k)).expect("random digits are in range")
    }

    /// A uniform value in `[1, top)`, by rejection sampling over a uniform
    /// digit count in `[1, top.len()]`.
    pub fn random_below(&mut self, top: &BigNat) -> BigNat {
        loop {
            let count = (self.rng.next_word() % top.len() as u64) as usize + 1;
            let n = BigNat::from_le_digits(self.random_digits(count))
                .expect("random digits are in range");
            if !n.is_zero() && n < *top {
                return n;
            }
        }
    }

    /// An odd candidate with exactly `digit_count` digits: the low digit is
    /// forced odd, the top digit is resampled until non-zero.
    fn prime_candidate(&mut self, digit_count: usize) -> BigNat {
        let mut digits = self.random_digits(digit_count);
        if digits[0] % 2 == 0 {
            digits[0] += 1;
        }
        while digits[digit_count - 1] == 0 {
            digits[digit_count - 1] = self.random_digit();
        }
        BigNat::from_le_digits(digits).expect("random digits are in range")
    }

    /// Miller-Rabin with `rounds` independent witnesses.
    ///
    /// Small and even values are answered directly, so any input is
    /// acceptable. A `true` answer is wrong with probability at most
    /// `4^-rounds`.
    pub fn is_probable_prime(&mut self, n: &BigNat, rounds: usize) -> bool {
        let one = BigNat::one();
        let two = BigNat::from(2u64);
        let three = BigNat::from(3u64);
        if *n == two || *n == three {
            return true;
        }
        if *n < two || !n.is_odd() {
            return false;
        }

        // n - 1 = 2^s * d with d odd
        let n_m1 = n.checked_sub(&one).expect("n > 1");
        let mut d = n_m1.clone();
        let mut s = 0usize;
        while !d.is_odd() {
            d.halve();
            s += 1;
        }

        for _ in 0..rounds {
            let a = self.random_below(n);
            let mut x = a.pow_mod(&d, n).expect("modulus is non-zero");
            if x == one || x == n_m1 {
                continue;
            }
            // square up to s-1 more times looking for n-1; hitting 1 first
            // means a non-trivial square root of 1 exists, so n is composite
            let mut inconclusive = false;
            for _ in 1..s {
                x = (&x * &x).rem_nat(n).expect("modulus is non-zero");
                if x == n_m1 {
                    inconclusive = true;
                    break;
                }
                if x == one {
                    break;
                }
            }
            if !inconclusive {
                return false;
            }
        }
        true
    }

    /// A probable prime with exactly `digit_count` digits.
    ///
    /// Steps the candidate by 2 past even numbers; when the stepping carries
    /// past `digit_count` digits a fresh candidate is drawn.
    pub fn generate(&mut self, digit_count: usize, rounds: usize) -> BigNat {
        let two = BigNat::from(2u64);
        let mut candidate = self.prime_candidate(digit_count);
        while !self.is_probable_prime(&candidate, rounds) {
            candidate += &two;
            if candidate.len() > digit_count {
                candidate = self.prime_candidate(digit_count);
            }
        }
        candidate
    }
}
