use std::ops::{Mul, MulAssign};
use std::sync::OnceLock;

use crate::cmp::cmp_digit_slices;
use crate::{digits_to_word, word_into_digits, BigNat};

/// Multiplication algorithm. Long multiplication is the default; it wins
/// below roughly [`KARATSUBA_THRESHOLD`] digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MulMode {
    Long,
    Karatsuba,
}

/// Digit count below which long multiplication beats the recursive split.
pub const KARATSUBA_THRESHOLD: usize = 100;

/// Little-endian digits of `isqrt(u64::MAX)`: the largest value whose square
/// still fits in a machine word, derived from the host word limit once at
/// first use.
fn sqrt_word_digits() -> &'static [u8] {
    static DIGITS: OnceLock<Vec<u8>> = OnceLock::new();
    DIGITS.get_or_init(|| {
        let mut digits = Vec::new();
        let mut w = u64::MAX.isqrt();
        loop {
            digits.push((w % 10) as u8);
            w /= 10;
            if w == 0 {
                break;
            }
        }
        digits
    })
}

impl BigNat {
    /// `self * rhs` with an explicit algorithm choice. The `Mul` operator
    /// picks for you; this entry point exists for benchmarks and tests.
    pub fn mul_with(&self, rhs: &BigNat, mode: MulMode) -> BigNat {
        if self.is_zero() || rhs.is_zero() {
            return BigNat::zero();
        }
        match mode {
            MulMode::Long => self.long_mul(rhs),
            MulMode::Karatsuba => self.karatsuba_mul(rhs),
        }
    }

    fn long_mul(&self, rhs: &BigNat) -> BigNat {
        let (a, b) = (self.le_digits(), rhs.le_digits());
        let mut out = vec![0u8; a.len() + b.len()];
        for (i, &x) in a.iter().enumerate() {
            if x == 0 {
                continue;
            }
            let mut carry = 0u32;
            for (j, &y) in b.iter().enumerate() {
                let t = out[i + j] as u32 + x as u32 * y as u32 + carry;
                out[i + j] = (t % 10) as u8;
                carry = t / 10;
            }
            let mut k = i + b.len();
            while carry != 0 {
                let t = out[k] as u32 + carry;
                out[k] = (t % 10) as u8;
                carry = t / 10;
                k += 1;
            }
        }
        BigNat::from_buffer(out)
    }

    fn karatsuba_mul(&self, rhs: &BigNat) -> BigNat {
        let n = self.used.max(rhs.used);
        let mut a = vec![0u8; n];
        a[..self.used].copy_from_slice(self.le_digits());
        let mut b = vec![0u8; n];
        b[..rhs.used].copy_from_slice(rhs.le_digits());

        // one arena for the whole recursion; levels carve it into slices
        let mut buf = vec![0u8; scratch_len(n)];
        karatsuba(&a, &b, &mut buf);
        buf.truncate(2 * n);
        BigNat::from_buffer(buf)
    }
}

/// Arena size for a top-level multiply of two `n` digit operands: every level
/// needs its own `2n` result slots plus the partial products, and the operand
/// length roughly halves per level.
fn scratch_len(mut n: usize) -> usize {
    let mut total = 16;
    while n > 4 {
        total += 4 * n + 4;
        n = n / 2 + 2;
    }
    total + 4 * n
}

/// True when the (possibly zero-padded) operand is certain to fit in a
/// machine word small enough to square in hardware.
fn fits_word(padded: &[u8]) -> bool {
    cmp_digit_slices(padded, sqrt_word_digits()) != std::cmp::Ordering::Greater
}

/// Karatsuba product of two equal-length operands.
///
/// `buf[..2n]` receives the product; `buf[2n..]` is transient scratch shared
/// sequentially by the three recursive products.
fn karatsuba(a: &[u8], b: &[u8], buf: &mut [u8]) {
    let n = a.len();
    if fits_word(a) && fits_word(b) {
        let product = digits_to_word(a) * digits_to_word(b);
        word_into_digits(product, &mut buf[..2 * n]);
        return;
    }

    let nh = n / 2;
    let nl = n - nh;
    let nt = nl + 1;

    let (head, tail) = buf.split_at_mut(2 * n);

    // stage aH+aL and bH+bL in the result area; they are consumed by p3
    add_into(&a[nl..], &a[..nl], &mut head[..nt]);
    add_into(&b[nl..], &b[..nl], &mut head[nt..2 * nt]);

    // p1 = aH*bH, p2 = aL*bL, p3 = (aH+aL)*(bH+bL); each call's scratch
    // extends past its result slots but is dead by the time the next starts
    karatsuba(&a[nl..], &b[nl..], tail);
    karatsuba(&a[..nl], &b[..nl], &mut tail[2 * nh..]);
    karatsuba(&head[..nt], &head[nt..2 * nt], &mut tail[2 * n..]);

    // result = p2 + shift(p3 - p1 - p2, nl) + shift(p1, 2*nl), in base 10
    head[..nl].fill(0);
    let p3_low = 2 * n;
    head[nl..nl + 2 * nl + 1].copy_from_slice(&tail[p3_low..p3_low + 2 * nl + 1]);
    head[nl + 2 * nl + 1..].fill(0);

    borrow_sub(&mut head[nl..], &tail[2 * nh..2 * nh + 2 * nl]); // -= p2
    borrow_sub(&mut head[nl..], &tail[..2 * nh]); // -= p1
    carry_add(&mut head[2 * nl..], &tail[..2 * nh]); // += shifted p1
    carry_add(&mut head[..], &tail[2 * nh..2 * nh + 2 * nl]); // += p2
}

/// `out = a + b` where `a` is the longer slice; `out` must hold one extra
/// slot for the carry and is zero-padded past the sum.
fn add_into(a: &[u8], b: &[u8], out: &mut [u8]) {
    // the caller passes the high half first, which is never longer
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut carry = 0u8;
    let mut i = 0;
    for (&x, &y) in long.iter().zip(short.iter()) {
        let t = x + y + carry;
        out[i] = t % 10;
        carry = t / 10;
        i += 1;
    }
    for &x in &long[short.len()..] {
        let t = x + carry;
        out[i] = t % 10;
        carry = t / 10;
        i += 1;
    }
    if carry != 0 {
        out[i] = carry;
        i += 1;
    }
    out[i..].fill(0);
}

/// Subtracts `src` from the front of `dst` in place, running the borrow into
/// the higher slots of `dst`.
fn borrow_sub(dst: &mut [u8], src: &[u8]) {
    let mut borrow = 0u8;
    for (i, &s) in src.iter().enumerate() {
        let take = s + borrow;
        if dst[i] < take {
            dst[i] = dst[i] + 10 - take;
            borrow = 1;
        } else {
            dst[i] -= take;
            borrow = 0;
        }
    }
    let mut i = src.len();
    while borrow != 0 && i < dst.len() {
        if dst[i] == 0 {
            dst[i] = 9;
        } else {
            dst[i] -= 1;
            borrow = 0;
        }
        i += 1;
    }
}

/// Adds `src` to the front of `dst` in place, running the carry into the
/// higher slots of `dst`.
fn carry_add(dst: &mut [u8], src: &[u8]) {
    let mut carry = 0u8;
    for (i, &s) in src.iter().enumerate() {
        let t = dst[i] + s + carry;
        dst[i] = t % 10;
        carry = t / 10;
    }
    let mut i = src.len();
    while carry != 0 {
        let t = dst[i] + carry;
        dst[i] = t % 10;
        carry = t / 10;
        i += 1;
    }
}

impl Mul<&BigNat> for &BigNat {
    type Output = BigNat;

    fn mul(self, rhs: &BigNat) -> BigNat {
        if cfg!(feature = "karatsuba") && self.used.max(rhs.used) >= KARATSUBA_THRESHOLD {
            self.mul_with(rhs, MulMode::Karatsuba)
        } else {
            self.mul_with(rhs, MulMode::Long)
        }
    }
}

impl Mul for BigNat {
    type Output = BigNat;

    fn mul(self, rhs: BigNat) -> BigNat {
        &self * &rhs
    }
}

impl MulAssign<&BigNat> for BigNat {
    fn mul_assign(&mut self, rhs: &BigNat) {
        *self = &*self * rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nat(s: &str) -> BigNat {
        s.parse().unwrap()
    }

    fn factorial(n: u64) -> BigNat {
        let mut acc = BigNat::one();
        for k in 2..=n {
            acc *= &BigNat::from(k);
        }
        acc
    }

    #[test]
    fn identities() {
        let a = nat("123456789123456789");
        assert_eq!(&a * &BigNat::one(), a);
        assert!((&a * &BigNat::zero()).is_zero());
        assert!((&BigNat::zero() * &a).is_zero());
    }

    #[test]
    fn commutative_and_distributive() {
        let a = nat("987654321987654321");
        let b = nat("123456789");
        let c = nat("271828182845904523536");
        assert_eq!(&a * &b, &b * &a);
        assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
    }

    #[test]
    fn repunit_square() {
        assert_eq!(
            (&nat("111111111111") * &nat("111111111111")).to_string(),
            "12345679012320987654321"
        );
    }

    #[test]
    fn powers_of_two_product() {
        assert_eq!(
            (&nat("4294967296") * &nat("2147483648")).to_string(),
            "9223372036854775808"
        );
    }

    #[test]
    fn factorials() {
        assert_eq!(factorial(19).to_string(), "121645100408832000");
        assert_eq!(factorial(20).to_string(), "2432902008176640000");
        assert_eq!(
            factorial(67).to_string(),
            "36471110918188685288249859096605464427167635314049524593701628500267962436943872000000000000000"
        );
        assert_eq!(
            factorial(100).to_string(),
            "93326215443944152681699238856266700490715968264381621468592963895217599993229915608941463976156518286253697920827223758251185210916864000000000000000000000000"
        );
    }

    #[test]
    fn karatsuba_matches_long() {
        let cases = [
            ("9", "9"),
            ("99", "99"),
            ("12345678901", "98765432109"),
            ("4294967295", "4294967295"),
            ("4294967296", "4294967296"),
            (
                "718281828459045235360287471352662497757247093699959574966967",
                "141421356237309504880168872420969807856967187537694809",
            ),
        ];
        for (a, b) in cases {
            let (a, b) = (nat(a), nat(b));
            assert_eq!(
                a.mul_with(&b, MulMode::Karatsuba),
                a.mul_with(&b, MulMode::Long),
                "{a} * {b}"
            );
        }

        // operands well past the threshold, uneven lengths
        let big_a = factorial(100);
        let big_b = factorial(67);
        assert_eq!(
            big_a.mul_with(&big_b, MulMode::Karatsuba),
            big_a.mul_with(&big_b, MulMode::Long)
        );
        assert_eq!(
            big_a.mul_with(&nat("3"), MulMode::Karatsuba),
            big_a.mul_with(&nat("3"), MulMode::Long)
        );
    }

    #[test]
    fn word_base_case_bound() {
        // exactly the largest pair the hardware path may take
        let m = BigNat::from(u64::MAX.isqrt());
        assert_eq!(
            m.mul_with(&m, MulMode::Karatsuba).to_string(),
            (u64::MAX.isqrt() * u64::MAX.isqrt()).to_string()
        );
    }

    #[test]
    fn mul_assign() {
        let mut a = nat("101");
        a *= &nat("11");
        assert_eq!(a.to_string(), "1111");
    }
}
