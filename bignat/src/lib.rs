//! Arbitrary-precision unsigned integers over decimal digits.
//!
//! A [`BigNat`] stores its digits little-endian (index 0 is the ones place),
//! one decimal digit per byte, in a buffer that is grown by a factor of 1.6
//! so that numbers have spare room to carry into. Negative values, fractions
//! and bases other than 10 are out of scope; the representation is chosen for
//! the RSA toolkit built on top of it, where keys, ciphertext and wire format
//! are all decimal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

mod error;
pub use error::NatError;

mod cmp;

mod add;
mod sub;

mod mul;
pub use mul::MulMode;

mod div;
mod pow;
mod shift;

/// Buffer growth factor applied when a number is created or copied.
const GROWTH_FACTOR: f64 = 1.6;

/// Capacity to allocate for a number of `used` digits.
fn grown_capacity(used: usize) -> usize {
    (used as f64 * GROWTH_FACTOR).round() as usize + 1
}

/// An arbitrary-precision unsigned integer.
///
/// Invariants:
/// - `used >= 1`, zero is exactly `used == 1, digits[0] == 0`;
/// - `digits[used - 1] != 0` for any non-zero value;
/// - every slot in `[0, used)` holds a value in `[0, 9]`;
/// - every slot in `[used, capacity)` is zero, so carries can run into the
///   slack without clearing it first.
pub struct BigNat {
    digits: Vec<u8>,
    used: usize,
}

impl BigNat {
    /// The number 0.
    pub fn new() -> Self {
        Self {
            digits: vec![0; 10],
            used: 1,
        }
    }

    pub fn zero() -> Self {
        Self::new()
    }

    pub fn one() -> Self {
        Self::from(1u64)
    }

    /// Builds a number from little-endian decimal digits (values `0..=9`,
    /// not ASCII). Leading zero digits are stripped; an empty buffer is zero.
    pub fn from_le_digits(digits: Vec<u8>) -> Result<Self, NatError> {
        if let Some(idx) = digits.iter().position(|&d| d > 9) {
            return Err(NatError::InvalidDigit {
                idx,
                byte: digits[idx],
            });
        }
        if digits.is_empty() {
            return Ok(Self::new());
        }
        let used = digits
            .iter()
            .rposition(|&d| d != 0)
            .map(|i| i + 1)
            .unwrap_or(1);
        Ok(Self { digits, used })
    }

    /// Number of decimal digits.
    pub fn len(&self) -> usize {
        self.used
    }

    pub fn is_zero(&self) -> bool {
        self.used == 1 && self.digits[0] == 0
    }

    pub fn is_odd(&self) -> bool {
        self.digits[0] & 1 == 1
    }

    /// The `n`th digit counted from the most significant one, 0-based.
    pub fn digit(&self, n: usize) -> Result<u8, NatError> {
        if n >= self.used {
            return Err(NatError::IndexOutOfRange {
                idx: n,
                len: self.used,
            });
        }
        Ok(self.digits[self.used - 1 - n])
    }

    /// All meaningful digits, little-endian.
    pub fn le_digits(&self) -> &[u8] {
        &self.digits[..self.used]
    }

    /// Grows the buffer to hold at least `n` digits. Never shrinks.
    pub(crate) fn grow_to(&mut self, n: usize) {
        if n > self.digits.len() {
            self.digits.resize(n, 0);
        }
    }

    /// Restores the no-leading-zero invariant after an operation that may
    /// have cleared high digits.
    pub(crate) fn trim(&mut self) {
        while self.used > 1 && self.digits[self.used - 1] == 0 {
            self.used -= 1;
        }
    }

    /// Takes ownership of a raw result buffer and sets `used` to the highest
    /// non-zero digit. The buffer must already contain only valid digits.
    pub(crate) fn from_buffer(digits: Vec<u8>) -> Self {
        debug_assert!(!digits.is_empty());
        let used = digits
            .iter()
            .rposition(|&d| d != 0)
            .map(|i| i + 1)
            .unwrap_or(1);
        Self { digits, used }
    }

    #[cfg(test)]
    fn capacity(&self) -> usize {
        self.digits.len()
    }
}

impl Default for BigNat {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for BigNat {
    /// Deep copy with room to grow: the copy gets at least
    /// `round(used * 1.6) + 1` slots even when the source is nearly full.
    fn clone(&self) -> Self {
        let cap = self.digits.len().max(grown_capacity(self.used));
        let mut digits = vec![0u8; cap];
        digits[..self.used].copy_from_slice(self.le_digits());
        Self {
            digits,
            used: self.used,
        }
    }
}

impl From<u64> for BigNat {
    fn from(mut n: u64) -> Self {
        let mut digits = Vec::new();
        loop {
            digits.push((n % 10) as u8);
            n /= 10;
            if n == 0 {
                break;
            }
        }
        let used = digits.len();
        digits.resize(grown_capacity(used), 0);
        Self { digits, used }
    }
}

impl TryFrom<i64> for BigNat {
    type Error = NatError;

    fn try_from(n: i64) -> Result<Self, NatError> {
        if n < 0 {
            return Err(NatError::NegativeInput(n));
        }
        Ok(Self::from(n as u64))
    }
}

impl FromStr for BigNat {
    type Err = NatError;

    fn from_str(s: &str) -> Result<Self, NatError> {
        if s.is_empty() {
            return Err(NatError::EmptyInput);
        }
        let trimmed = s.trim_start_matches('0');
        let stripped = s.len() - trimmed.len();
        for (i, b) in trimmed.bytes().enumerate() {
            if !b.is_ascii_digit() {
                return Err(NatError::InvalidDigit {
                    idx: stripped + i,
                    byte: b,
                });
            }
        }
        // the input was all zeroes
        if trimmed.is_empty() {
            return Ok(Self::new());
        }
        let used = trimmed.len();
        let mut digits = vec![0u8; grown_capacity(used)];
        for (i, b) in trimmed.bytes().rev().enumerate() {
            digits[i] = b - b'0';
        }
        Ok(Self { digits, used })
    }
}

impl fmt::Display for BigNat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &d in self.le_digits().iter().rev() {
            fmt::Write::write_char(f, (b'0' + d) as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for BigNat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl Zeroize for BigNat {
    fn zeroize(&mut self) {
        self.digits.as_mut_slice().zeroize();
        self.used = 1;
    }
}

impl Serialize for BigNat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BigNat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Little-endian digit window as a machine word. The window must be short
/// enough that the value fits in a `u64`.
pub(crate) fn digits_to_word(digits: &[u8]) -> u64 {
    let mut word = 0u64;
    let mut pow = 1u64;
    for &d in digits {
        word += d as u64 * pow;
        pow = pow.wrapping_mul(10);
    }
    word
}

/// Decomposes `word` into the whole of `out`, zero-padding the high slots.
pub(crate) fn word_into_digits(mut word: u64, out: &mut [u8]) {
    for slot in out.iter_mut() {
        *slot = (word % 10) as u8;
        word /= 10;
    }
}

/// Decimal digit count of `u64::MAX` (20 on every host Rust supports).
pub(crate) fn word_digit_count() -> usize {
    u64::MAX.ilog10() as usize + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_canonical() {
        let z = BigNat::new();
        assert_eq!(z.len(), 1);
        assert!(z.is_zero());
        assert!(!z.is_odd());
        assert_eq!(z.to_string(), "0");
        assert_eq!("00000".parse::<BigNat>().unwrap(), z);
        assert_eq!(BigNat::from(0u64), z);
    }

    #[test]
    fn parse_and_display_round_trip() {
        let cases = [
            "1",
            "42",
            "65537",
            "123456789123456789123456789",
            "10000000000000000000000000000000000000001",
        ];
        for s in cases {
            let n = s.parse::<BigNat>().unwrap();
            assert_eq!(n.to_string(), s, "round trip failed for `{s}`");
        }
        // leading zeroes are stripped
        assert_eq!("000123".parse::<BigNat>().unwrap().to_string(), "123");
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!("".parse::<BigNat>(), Err(NatError::EmptyInput));
        assert_eq!(
            "12a".parse::<BigNat>(),
            Err(NatError::InvalidDigit { idx: 2, byte: b'a' })
        );
        assert_eq!(
            "0x10".parse::<BigNat>(),
            Err(NatError::InvalidDigit { idx: 1, byte: b'x' })
        );
    }

    #[test]
    fn negative_integer_rejected() {
        assert_eq!(BigNat::try_from(-1i64), Err(NatError::NegativeInput(-1)));
        assert_eq!(BigNat::try_from(7i64).unwrap(), BigNat::from(7u64));
    }

    #[test]
    fn from_u64_decomposes_digits() {
        let n = BigNat::from(90817_u64);
        assert_eq!(n.le_digits(), &[7, 1, 8, 0, 9]);
        assert_eq!(n.len(), 5);
        assert_eq!(n.to_string(), "90817");
    }

    #[test]
    fn msb_digit_index() {
        let n = BigNat::from(345u64);
        assert_eq!(n.digit(0), Ok(3));
        assert_eq!(n.digit(2), Ok(5));
        assert_eq!(n.digit(3), Err(NatError::IndexOutOfRange { idx: 3, len: 3 }));
    }

    #[test]
    fn clone_keeps_room_to_grow() {
        let n = "999999999".parse::<BigNat>().unwrap();
        let copy = n.clone();
        assert_eq!(copy, n);
        assert!(copy.capacity() >= grown_capacity(copy.len()));
    }

    #[test]
    fn from_le_digits_normalizes() {
        let n = BigNat::from_le_digits(vec![1, 2, 3, 0, 0]).unwrap();
        assert_eq!(n.to_string(), "321");
        assert!(BigNat::from_le_digits(vec![]).unwrap().is_zero());
        assert!(BigNat::from_le_digits(vec![0, 0, 0]).unwrap().is_zero());
        assert_eq!(
            BigNat::from_le_digits(vec![3, 17]),
            Err(NatError::InvalidDigit { idx: 1, byte: 17 })
        );
    }

    #[test]
    fn zeroize_resets_to_zero() {
        let mut n = "123456789".parse::<BigNat>().unwrap();
        n.zeroize();
        assert!(n.is_zero());
        assert!(n.digits.iter().all(|&d| d == 0));
    }

    #[test]
    fn serde_round_trip() {
        let n = "123456789123456789123456789".parse::<BigNat>().unwrap();
        let json = serde_json::to_string(&n).unwrap();
        assert_eq!(json, "\"123456789123456789123456789\"");
        let back: BigNat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, n);
    }

    #[test]
    fn word_helpers() {
        assert_eq!(digits_to_word(&[5, 4, 3]), 345);
        assert_eq!(word_digit_count(), 20);
        let mut out = [0u8; 6];
        word_into_digits(345, &mut out);
        assert_eq!(out, [5, 4, 3, 0, 0, 0]);
    }
}
