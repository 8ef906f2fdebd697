use std::ops::{Sub, SubAssign};

use crate::{BigNat, NatError};

impl BigNat {
    /// `self - rhs`, requiring `self >= rhs`.
    pub fn checked_sub(&self, rhs: &BigNat) -> Result<BigNat, NatError> {
        if self < rhs {
            return Err(NatError::NegativeResult);
        }
        if self == rhs {
            return Ok(BigNat::zero());
        }

        let mut result = self.clone();
        let mut borrow = 0u8;
        for i in 0..rhs.used {
            let take = rhs.digits[i] + borrow;
            if result.digits[i] < take {
                result.digits[i] = result.digits[i] + 10 - take;
                borrow = 1;
            } else {
                result.digits[i] -= take;
                borrow = 0;
            }
        }
        // a pending borrow turns a run of zeroes into nines until it finds a
        // non-zero digit to take from; `self > rhs` guarantees it finds one
        let mut i = rhs.used;
        while borrow != 0 {
            if result.digits[i] == 0 {
                result.digits[i] = 9;
                i += 1;
            } else {
                result.digits[i] -= 1;
                borrow = 0;
            }
        }
        result.trim();
        Ok(result)
    }

    /// Subtracts one in place. Zero has no predecessor.
    pub fn decrement(&mut self) -> Result<(), NatError> {
        if self.is_zero() {
            return Err(NatError::NegativeResult);
        }
        let mut i = 0;
        loop {
            if self.digits[i] == 0 {
                self.digits[i] = 9;
                i += 1;
            } else {
                self.digits[i] -= 1;
                break;
            }
        }
        self.trim();
        Ok(())
    }
}

impl Sub<&BigNat> for &BigNat {
    type Output = BigNat;

    /// Panics when `rhs > self`; use [`BigNat::checked_sub`] to keep the
    /// error.
    fn sub(self, rhs: &BigNat) -> BigNat {
        match self.checked_sub(rhs) {
            Ok(diff) => diff,
            Err(e) => panic!("{e}"),
        }
    }
}

impl Sub for BigNat {
    type Output = BigNat;

    fn sub(self, rhs: BigNat) -> BigNat {
        &self - &rhs
    }
}

impl SubAssign<&BigNat> for BigNat {
    fn sub_assign(&mut self, rhs: &BigNat) {
        *self = &*self - rhs;
    }
}
