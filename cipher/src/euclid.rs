//! 欧几里得算法
//!
//! - $\gcd(a, 0) = a$, $\gcd(a, b) = \gcd(b, a \bmod b)$;
//! - 扩展欧几里得: $a x + b y = d = \gcd(a, b)$;
//! - 模线性方程: $a x \equiv b \pmod n$, 当且仅当$\gcd(a,n) \mid b$时有解;

use std::cmp::Ordering;

use bignat::BigNat;

use crate::CipherError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Sign {
    Plus,
    Minus,
}

/// Sign-magnitude integer for the extended-Euclid coefficients, which go
/// negative even though [`BigNat`] cannot. Not exposed: every public result
/// is reduced back into `[0, n)` before it leaves this module.
#[derive(Clone, Debug)]
struct SignedNat {
    sign: Sign,
    mag: BigNat,
}

impl SignedNat {
    fn zero() -> Self {
        Self {
            sign: Sign::Plus,
            mag: BigNat::zero(),
        }
    }

    fn from_nat(mag: BigNat) -> Self {
        Self {
            sign: Sign::Plus,
            mag,
        }
    }

    fn is_negative(&self) -> bool {
        self.sign == Sign::Minus && !self.mag.is_zero()
    }

    /// `self - rhs`.
    fn sub(&self, rhs: &Self) -> Self {
        match (self.sign, rhs.sign) {
            (Sign::Plus, Sign::Minus) => Self {
                sign: Sign::Plus,
                mag: &self.mag + &rhs.mag,
            },
            (Sign::Minus, Sign::Plus) => Self {
                sign: Sign::Minus,
                mag: &self.mag + &rhs.mag,
            },
            (Sign::Plus, Sign::Plus) => Self::signed_diff(&self.mag, &rhs.mag),
            (Sign::Minus, Sign::Minus) => Self::signed_diff(&rhs.mag, &self.mag),
        }
    }

    /// `a - b` as a signed value.
    fn signed_diff(a: &BigNat, b: &BigNat) -> Self {
        match a.cmp(b) {
            Ordering::Less => Self {
                sign: Sign::Minus,
                mag: b - a,
            },
            _ => Self {
                sign: Sign::Plus,
                mag: a - b,
            },
        }
    }

    fn mul_nat(&self, rhs: &BigNat) -> Self {
        Self {
            sign: self.sign,
            mag: &self.mag * rhs,
        }
    }

    /// The value reduced into `[0, n)`.
    fn rem_floor(&self, n: &BigNat) -> Result<BigNat, CipherError> {
        let r = self.mag.rem_nat(n)?;
        if self.is_negative() && !r.is_zero() {
            Ok(n - &r)
        } else {
            Ok(r)
        }
    }
}

/// Greatest common divisor by recursive Euclid.
pub fn gcd(a: &BigNat, b: &BigNat) -> BigNat {
    if b.is_zero() {
        a.clone()
    } else {
        gcd(b, &(a % b))
    }
}

/// Extended Euclid: returns `(d, x, y)` with `a*x + b*y = d = gcd(a, b)`.
/// Recursion depth is `O(log min(a, b))`.
fn extended_gcd(a: &BigNat, b: &BigNat) -> Result<(BigNat, SignedNat, SignedNat), CipherError> {
    if b.is_zero() {
        return Ok((
            a.clone(),
            SignedNat::from_nat(BigNat::one()),
            SignedNat::zero(),
        ));
    }
    let (q, r) = a.div_rem(b)?;
    let (d, x, y) = extended_gcd(b, &r)?;
    let next = x.sub(&y.mul_nat(&q));
    Ok((d, y, next))
}

/// Solves `a*x = b (mod n)`.
///
/// Runs extended Euclid on `(a, n)` for `(d, p, _)`; a solution exists iff
/// `d | b`, and then `x = p * (b / d) mod n`, reduced into `[0, n)`.
pub fn solve_modular_linear(a: &BigNat, b: &BigNat, n: &BigNat) -> Result<BigNat, CipherError> {
    let (d, p, _) = extended_gcd(a, n)?;
    let (scale, rem) = b.div_rem(&d)?;
    if !rem.is_zero() {
        return Err(CipherError::NoSolution);
    }
    p.mul_nat(&scale).rem_floor(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nat(s: &str) -> BigNat {
        s.parse().unwrap()
    }

    #[test]
    fn gcd_cases() {
        assert_eq!(gcd(&nat("252"), &nat("105")), nat("21"));
        assert_eq!(gcd(&nat("105"), &nat("252")), nat("21"));
        assert_eq!(gcd(&nat("17"), &nat("0")), nat("17"));
        assert_eq!(gcd(&nat("0"), &nat("17")), nat("17"));
        assert_eq!(
            gcd(&nat("13756265695458089029"), &nat("13496181268022124907")),
            BigNat::one()
        );
    }

    #[test]
    fn extended_gcd_identity() {
        // a*x + b*y = d, checked by reducing both sides mod b
        let (a, b) = (nat("240"), nat("46"));
        let (d, x, _) = extended_gcd(&a, &b).unwrap();
        assert_eq!(d, nat("2"));
        // a*x = d (mod b)
        let ax = x.mul_nat(&a).rem_floor(&b).unwrap();
        assert_eq!(ax, d.rem_nat(&b).unwrap());
    }

    #[test]
    fn modular_inverses() {
        // 3 * 5 = 15 = 1 (mod 7)
        assert_eq!(
            solve_modular_linear(&nat("3"), &BigNat::one(), &nat("7")).unwrap(),
            nat("5")
        );
        // the classic textbook pair
        assert_eq!(
            solve_modular_linear(&nat("17"), &BigNat::one(), &nat("3120")).unwrap(),
            nat("2753")
        );
        // F4 inverse mod the totient of 10007 * 10009
        assert_eq!(
            solve_modular_linear(&nat("65537"), &BigNat::one(), &nat("100140048")).unwrap(),
            nat("35910881")
        );
    }

    #[test]
    fn general_solutions_satisfy_the_congruence() {
        let cases = [("6", "3", "9"), ("14", "30", "100"), ("5", "3", "13")];
        for (a, b, n) in cases {
            let (a, b, n) = (nat(a), nat(b), nat(n));
            let x = solve_modular_linear(&a, &b, &n).unwrap();
            assert!(x < n);
            assert_eq!(
                (&a * &x).rem_nat(&n).unwrap(),
                b.rem_nat(&n).unwrap(),
                "{a}*{x} != {b} (mod {n})"
            );
        }
    }

    #[test]
    fn no_solution_when_gcd_does_not_divide() {
        // gcd(2, 4) = 2 does not divide 1
        assert!(matches!(
            solve_modular_linear(&nat("2"), &BigNat::one(), &nat("4")),
            Err(CipherError::NoSolution)
        ));
    }

    #[test]
    fn signed_wrapper_reduces_into_range() {
        // -5 mod 3 = 1
        let minus_five = SignedNat::zero().sub(&SignedNat::from_nat(nat("5")));
        assert!(minus_five.is_negative());
        assert_eq!(minus_five.rem_floor(&nat("3")).unwrap(), BigNat::one());
        // -6 mod 3 = 0
        let minus_six = SignedNat::zero().sub(&SignedNat::from_nat(nat("6")));
        assert!(minus_six.rem_floor(&nat("3")).unwrap().is_zero());
    }
}
