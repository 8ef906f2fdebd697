use std::cmp::Ordering;
use std::ops::{Div, DivAssign, Rem, RemAssign};

use crate::{digits_to_word, word_digit_count, BigNat, NatError};

impl BigNat {
    /// Euclidean division: returns `(q, r)` with `self == q * rhs + r` and
    /// `0 <= r < rhs`.
    pub fn div_rem(&self, rhs: &BigNat) -> Result<(BigNat, BigNat), NatError> {
        if rhs.is_zero() {
            return Err(NatError::DivideByZero);
        }
        match self.cmp(rhs) {
            Ordering::Less => Ok((BigNat::zero(), self.clone())),
            Ordering::Equal => Ok((BigNat::one(), BigNat::zero())),
            Ordering::Greater => divide(self, rhs),
        }
    }

    /// `self mod rhs`, with the short-circuits cheap comparison allows.
    pub fn rem_nat(&self, rhs: &BigNat) -> Result<BigNat, NatError> {
        if rhs.is_zero() {
            return Err(NatError::DivideByZero);
        }
        match self.cmp(rhs) {
            Ordering::Equal => Ok(BigNat::zero()),
            Ordering::Less => Ok(self.clone()),
            Ordering::Greater => Ok(divide(self, rhs)?.1),
        }
    }
}

/// School division accelerated by machine-word estimation: each round guesses
/// a partial quotient from the leading digits of the running remainder and
/// the divisor, then corrects downward until the product fits.
fn divide(dividend: &BigNat, divisor: &BigNat) -> Result<(BigNat, BigNat), NatError> {
    let wlen = word_digit_count();
    let mut quotient = BigNat::zero();
    let mut x = dividend.clone();

    while x >= *divisor {
        let offset = x.used - divisor.used;

        let mut z1 = if offset <= wlen - 2 {
            // both leading windows fit in one word at matching magnitudes
            let i = x.used.min(wlen - 1);
            let j = i - offset;
            let top_x = digits_to_word(&x.le_digits()[x.used - i..]);
            let top_d = digits_to_word(&divisor.le_digits()[divisor.used - j..]);
            BigNat::from(top_x / top_d)
        } else {
            // the offset is too wide for one word: estimate from fixed-size
            // windows and shift the guess up to the right magnitude
            let i = wlen - 1;
            let j = divisor.used.min(wlen - 2);
            let top_x = digits_to_word(&x.le_digits()[x.used - i..]);
            let top_d = digits_to_word(&divisor.le_digits()[divisor.used - j..]);
            let mut z = BigNat::from(top_x / top_d);
            let shift = offset - z.used;
            z.shl_digits(shift);
            z
        };

        loop {
            let product = &z1 * divisor;
            if product <= x {
                x = x.checked_sub(&product)?;
                quotient += &z1;
                break;
            }
            // over-estimate: drop a decimal place, or step down when the
            // guess is a single digit
            if z1.used > 1 {
                z1.shr_digits(1)?;
            } else {
                z1.decrement()?;
            }
        }
    }

    Ok((quotient, x))
}

impl Div<&BigNat> for &BigNat {
    type Output = BigNat;

    /// Panics on a zero divisor; use [`BigNat::div_rem`] to keep the error.
    fn div(self, rhs: &BigNat) -> BigNat {
        match self.div_rem(rhs) {
            Ok((q, _)) => q,
            Err(e) => panic!("{e}"),
        }
    }
}

impl Rem<&BigNat> for &BigNat {
    type Output = BigNat;

    /// Panics on a zero divisor; use [`BigNat::rem_nat`] to keep the error.
    fn rem(self, rhs: &BigNat) -> BigNat {
        match self.rem_nat(rhs) {
            Ok(r) => r,
            Err(e) => panic!("{e}"),
        }
    }
}

impl DivAssign<&BigNat> for BigNat {
    fn div_assign(&mut self, rhs: &BigNat) {
        *self = &*self / rhs;
    }
}

impl RemAssign<&BigNat> for BigNat {
    fn rem_assign(&mut self, rhs: &BigNat) {
        *self = &*self % rhs;
    }
}
