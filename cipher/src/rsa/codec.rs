//! Fixed decimal message codec.
//!
//! Byte `i` of the message occupies little-endian digit positions
//! `3i..3i+3` of the number as `(hundreds, tens, ones)`, so every byte costs
//! exactly three digits and the ciphertext length is predictable without any
//! length headers. This is an encoding, not a cryptographic padding.

use bignat::BigNat;

/// Maps a byte string onto a number.
pub fn encode(msg: &[u8]) -> BigNat {
    let mut digits = vec![0u8; msg.len() * 3];
    for (i, &b) in msg.iter().enumerate() {
        digits[i * 3] = b / 100;
        digits[i * 3 + 1] = (b / 10) % 10;
        digits[i * 3 + 2] = b % 10;
    }
    BigNat::from_le_digits(digits).expect("byte digits are in range")
}

/// Reads the number back as bytes, three digits at a time. Digits past the
/// last full triple are ignored.
pub fn decode(n: &BigNat) -> Vec<u8> {
    let digits = n.le_digits();
    let count = digits.len() / 3;
    let mut msg = Vec::with_capacity(count);
    for i in 0..count {
        let b = 100 * digits[i * 3] as u16 + 10 * digits[i * 3 + 1] as u16 + digits[i * 3 + 2] as u16;
        msg.push(b as u8);
    }
    msg
}
