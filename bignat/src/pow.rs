use crate::{BigNat, NatError};

impl BigNat {
    /// Halves the value in place, truncating. Division by two is cheap in
    /// decimal: one top-down pass carrying the odd remainder.
    pub fn halve(&mut self) {
        let mut carry = 0u8;
        for i in (0..self.used).rev() {
            let v = carry * 10 + self.digits[i];
            self.digits[i] = v / 2;
            carry = v % 2;
        }
        self.trim();
    }

    /// `self^exp` by square-and-multiply, `O(log exp)` multiplications.
    pub fn pow(&self, mut exp: u64) -> BigNat {
        let mut result = BigNat::one();
        let mut base = self.clone();
        while exp > 0 {
            if exp & 1 == 1 {
                result = &result * &base;
            }
            exp >>= 1;
            if exp > 0 {
                base = &base * &base;
            }
        }
        result
    }

    /// `self^exp` for an arbitrary-precision exponent.
    pub fn pow_nat(&self, exp: &BigNat) -> BigNat {
        let mut result = BigNat::one();
        let mut base = self.clone();
        let mut exp = exp.clone();
        while !exp.is_zero() {
            if exp.is_odd() {
                result = &result * &base;
            }
            exp.halve();
            if !exp.is_zero() {
                base = &base * &base;
            }
        }
        result
    }

    /// `self^exp mod modulus`.
    ///
    /// The exponent is decoded into its bit sequence by repeated halving,
    /// then walked from the most significant bit down: square each step,
    /// multiply in the base on set bits. The result is always `< modulus`.
    pub fn pow_mod(&self, exp: &BigNat, modulus: &BigNat) -> Result<BigNat, NatError> {
        if modulus.is_zero() {
            return Err(NatError::DivideByZero);
        }

        let mut bits = Vec::new();
        let mut e = exp.clone();
        while !e.is_zero() {
            bits.push(e.is_odd());
            e.halve();
        }

        let base = self.rem_nat(modulus)?;
        let mut result = BigNat::one().rem_nat(modulus)?;
        for &bit in bits.iter().rev() {
            result = (&result * &result).rem_nat(modulus)?;
            if bit {
                result = (&result * &base).rem_nat(modulus)?;
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nat(s: &str) -> BigNat {
        s.parse().unwrap()
    }

    #[test]
    fn pow_zero_is_one() {
        assert_eq!(nat("123456789").pow(0), BigNat::one());
        assert_eq!(BigNat::zero().pow(0), BigNat::one());
        assert_eq!(nat("7").pow_nat(&BigNat::zero()), BigNat::one());
    }

    #[test]
    fn two_to_the_71st() {
        assert_eq!(nat("2").pow(71).to_string(), "2361183241434822606848");
        assert_eq!(
            nat("2").pow_nat(&nat("71")).to_string(),
            "2361183241434822606848"
        );
    }

    #[test]
    fn pow_step_property() {
        let a = nat("37");
        for k in 0..8u64 {
            assert_eq!(a.pow(k + 1), &a.pow(k) * &a);
        }
    }

    #[test]
    fn halve_matches_division() {
        let mut n = nat("123456789123456789");
        n.halve();
        assert_eq!(n.to_string(), "61728394561728394");
        let mut one = BigNat::one();
        one.halve();
        assert!(one.is_zero());
    }

    #[test]
    fn pow_mod_small_values() {
        // 3^5 mod 7 = 243 mod 7 = 5
        assert_eq!(
            nat("3").pow_mod(&nat("5"), &nat("7")).unwrap(),
            nat("5")
        );
        // anything mod 1 is 0
        assert!(nat("10")
            .pow_mod(&nat("10"), &BigNat::one())
            .unwrap()
            .is_zero());
        // exponent 0
        assert_eq!(
            nat("99").pow_mod(&BigNat::zero(), &nat("13")).unwrap(),
            BigNat::one()
        );
    }

    #[test]
    fn pow_mod_matches_pow() {
        let (a, m) = (nat("123456"), nat("999999999989"));
        for e in [1u64, 2, 3, 7, 16, 31] {
            let expect = a.pow(e).rem_nat(&m).unwrap();
            assert_eq!(a.pow_mod(&BigNat::from(e), &m).unwrap(), expect, "e = {e}");
        }
    }

    #[test]
    fn pow_mod_large() {
        assert_eq!(
            nat("123456789")
                .pow_mod(&nat("987654321"), &nat("1000000007"))
                .unwrap()
                .to_string(),
            "652541198"
        );
    }

    #[test]
    fn pow_mod_fermat() {
        // 1000000007 is prime, so a^(p-1) = 1 mod p
        let p = nat("1000000007");
        let p_m1 = p.checked_sub(&BigNat::one()).unwrap();
        for a in ["2", "31415926", "999999999"] {
            assert_eq!(nat(a).pow_mod(&p_m1, &p).unwrap(), BigNat::one(), "a = {a}");
        }
    }

    #[test]
    fn zero_modulus_is_an_error() {
        assert_eq!(
            nat("2").pow_mod(&nat("3"), &BigNat::zero()),
            Err(NatError::DivideByZero)
        );
    }
}
