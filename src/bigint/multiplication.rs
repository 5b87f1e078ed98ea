use core::ops::{Mul, MulAssign};
use core::ptr;

use crate::big_digit::{self, BigDigit, DoubleBigDigit};
use crate::bigint::addition::adc;
use crate::bigint::{BigInt, Sign};
use crate::error::Result;

/// Largest operand (in digits) the Comba routines accept.
///
/// A full column accumulates at most `MAX_COMBA` digit products of
/// `2 * BITS` bits each on top of the running carry; with the payload
/// headroom this stays inside a `DoubleBigDigit`.
pub const MAX_COMBA: usize = 256;

/// Column-count bound for the Comba routines, from the same accumulator
/// budget as [`MAX_COMBA`].
pub const WARRAY: usize = 1 << (DoubleBigDigit::BITS as usize - 2 * big_digit::BITS + 1);

/// `a + b * c` plus the running carry, returning the masked digit and
/// leaving the next carry in `acc`.
#[inline]
pub fn mac_with_carry(a: BigDigit, b: BigDigit, c: BigDigit, acc: &mut DoubleBigDigit) -> BigDigit {
    *acc += a as DoubleBigDigit;
    *acc += (b as DoubleBigDigit) * (c as DoubleBigDigit);
    let lo = (*acc & big_digit::MASK as DoubleBigDigit) as BigDigit;
    *acc >>= big_digit::BITS;
    lo
}

/// One schoolbook row: `acc += b * c` for a single digit `c`.
///
/// `acc` must extend at least one digit past `b` so the final carry has a
/// slot to land in.
pub fn mac_digit(acc: &mut [BigDigit], b: &[BigDigit], c: BigDigit) {
    if c == 0 {
        return;
    }

    let mut carry = 0;
    let (a_lo, a_hi) = acc.split_at_mut(b.len());

    for (a, &b) in a_lo.iter_mut().zip(b) {
        *a = mac_with_carry(*a, b, c, &mut carry);
    }

    for a in a_hi {
        if carry == 0 {
            break;
        }
        *a = adc(*a, 0, &mut carry);
    }

    debug_assert!(carry == 0);
}

/// Schoolbook multiplication, `acc += b * c`.
///
/// `acc` must hold at least `b.len() + c.len()` zero-initialized (or
/// partial-sum) digits.
pub fn mac3(acc: &mut [BigDigit], b: &[BigDigit], c: &[BigDigit]) {
    let (x, y) = if b.len() < c.len() { (b, c) } else { (c, b) };
    for (i, &xi) in x.iter().enumerate() {
        mac_digit(&mut acc[i..], y, xi);
    }
}

/// In-place scalar multiplication, `a *= b`, returning the carry-out
/// digit.
pub fn scalar_mul(a: &mut [BigDigit], b: BigDigit) -> BigDigit {
    let mut carry: DoubleBigDigit = 0;
    for d in a.iter_mut() {
        carry += (*d as DoubleBigDigit) * (b as DoubleBigDigit);
        *d = (carry & big_digit::MASK as DoubleBigDigit) as BigDigit;
        carry >>= big_digit::BITS;
    }
    carry as BigDigit
}

/// Comba multiplication: accumulates each output column in a word and
/// flushes exactly one digit per column, with no intermediate stores.
///
/// `dest.len()` must equal `b.len() + c.len()` and the operands must be
/// within the [`MAX_COMBA`] bound.
pub fn comba_mul(dest: &mut [BigDigit], b: &[BigDigit], c: &[BigDigit]) {
    debug_assert_eq!(dest.len(), b.len() + c.len());
    debug_assert!(b.len().min(c.len()) <= MAX_COMBA);

    let mut w: DoubleBigDigit = 0;
    for ix in 0..dest.len() {
        // Window of products feeding this column.
        let ty = (c.len() - 1).min(ix);
        let tx = ix - ty;
        let iy = (b.len() - tx).min(ty + 1);

        for iz in 0..iy {
            w += (b[tx + iz] as DoubleBigDigit) * (c[ty - iz] as DoubleBigDigit);
        }

        dest[ix] = (w & big_digit::MASK as DoubleBigDigit) as BigDigit;
        w >>= big_digit::BITS;
    }
}

/// Comba squaring: off-diagonal products are taken once and doubled,
/// diagonal squares added on the even columns.
pub fn comba_sqr(dest: &mut [BigDigit], a: &[BigDigit]) {
    debug_assert_eq!(dest.len(), 2 * a.len());
    debug_assert!(a.len() <= MAX_COMBA);

    let mut w: DoubleBigDigit = 0;
    for ix in 0..dest.len() {
        let ty = (a.len() - 1).min(ix);
        let tx = ix - ty;
        let iy = (a.len() - tx).min(ty + 1);
        // Only the pairs strictly above the diagonal.
        let iy = iy.min((ty + 1 - tx) / 2);

        let mut sum: DoubleBigDigit = 0;
        for iz in 0..iy {
            sum += (a[tx + iz] as DoubleBigDigit) * (a[ty - iz] as DoubleBigDigit);
        }
        w += sum << 1;

        if ix & 1 == 0 {
            let d = a[ix / 2] as DoubleBigDigit;
            w += d * d;
        }

        dest[ix] = (w & big_digit::MASK as DoubleBigDigit) as BigDigit;
        w >>= big_digit::BITS;
    }
}

impl BigInt {
    /// `self <- a * b`.
    ///
    /// Operand identity (`a` and `b` being the same value in memory)
    /// dispatches to [`BigInt::assign_sqr`]. Small products go through
    /// Comba, the rest through schoolbook accumulation.
    pub fn assign_mul(&mut self, a: &BigInt, b: &BigInt) -> Result<()> {
        if a.is_zero() || b.is_zero() {
            self.set_zero();
            return Ok(());
        }
        if ptr::eq(a, b) {
            return self.assign_sqr(a);
        }

        let digs = a.used + b.used + 1;
        let old_used = self.used;
        self.grow(digs)?;
        if digs < WARRAY && a.used.min(b.used) <= MAX_COMBA {
            comba_mul(&mut self.data[..a.used + b.used], a.digits(), b.digits());
        } else {
            for d in &mut self.data[..a.used + b.used] {
                *d = 0;
            }
            mac3(&mut self.data[..a.used + b.used], a.digits(), b.digits());
        }
        self.used = a.used + b.used;
        self.zero_unused(old_used);
        self.clamp();
        let sign = if a.sign != b.sign { Sign::Minus } else { Sign::Plus };
        self.set_sign(sign);
        Ok(())
    }

    /// `self <- a * a`; the result sign is always non-negative.
    pub fn assign_sqr(&mut self, a: &BigInt) -> Result<()> {
        if a.is_zero() {
            self.set_zero();
            return Ok(());
        }

        let digs = 2 * a.used + 1;
        let old_used = self.used;
        self.grow(digs)?;
        if digs < WARRAY && a.used <= MAX_COMBA {
            comba_sqr(&mut self.data[..2 * a.used], a.digits());
        } else {
            for d in &mut self.data[..2 * a.used] {
                *d = 0;
            }
            mac3(&mut self.data[..2 * a.used], a.digits(), a.digits());
        }
        self.used = 2 * a.used;
        self.zero_unused(old_used);
        self.clamp();
        self.sign = Sign::Plus;
        Ok(())
    }

    /// Squares in place through an owned scratch.
    pub fn square(&mut self) -> Result<()> {
        let mut sq = BigInt::new();
        sq.assign_sqr(&*self)?;
        *self = sq;
        Ok(())
    }

    /// `self <- self * m` for a single non-negative digit.
    ///
    /// `0`, `1`, `2`, and powers of two take the dedicated fast paths.
    pub fn mul_digit(&mut self, m: BigDigit) -> Result<()> {
        debug_assert!(m <= big_digit::MASK);
        if m == 0 {
            self.set_zero();
            return Ok(());
        }
        if m == 1 || self.is_zero() {
            return Ok(());
        }
        if m == 2 {
            return self.shl1();
        }
        if m.is_power_of_two() {
            return self.shl(m.trailing_zeros() as usize);
        }

        let old_used = self.used;
        self.grow(old_used + 1)?;
        let carry = scalar_mul(&mut self.data[..old_used], m);
        self.data[old_used] = carry;
        self.used = old_used + 1;
        self.clamp();
        Ok(())
    }
}

impl Mul<&BigInt> for &BigInt {
    type Output = BigInt;

    fn mul(self, other: &BigInt) -> BigInt {
        let mut prod = BigInt::new();
        prod.assign_mul(self, other)
            .unwrap_or_else(|e| panic!("{e}"));
        prod
    }
}

forward_all_binop_to_ref_ref!(impl Mul for BigInt, mul);

impl MulAssign<&BigInt> for BigInt {
    fn mul_assign(&mut self, other: &BigInt) {
        // Schoolbook accumulation cannot run in place; multiply into an
        // owned scratch and swap it in.
        let mut prod = BigInt::new();
        prod.assign_mul(&*self, other)
            .unwrap_or_else(|e| panic!("{e}"));
        *self = prod;
    }
}

forward_val_assign!(impl MulAssign for BigInt, mul_assign);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_products() {
        assert_eq!(
            BigInt::from(7u32) * BigInt::from(6u32),
            BigInt::from(42u32)
        );
        assert_eq!(
            BigInt::from(-7i32) * BigInt::from(6i32),
            BigInt::from(-42i32)
        );
        assert_eq!(
            BigInt::from(-7i32) * BigInt::from(-6i32),
            BigInt::from(42u32)
        );
        assert!((BigInt::from(7u32) * BigInt::new()).is_zero());
        assert_eq!(
            BigInt::from(7u32) * BigInt::from(1u32),
            BigInt::from(7u32)
        );
    }

    #[test]
    fn cross_digit_product() {
        let a = BigInt::from(u64::MAX);
        let b = BigInt::from(u64::MAX);
        let expect = BigInt::from(u64::MAX as u128 * u64::MAX as u128);
        assert_eq!(&a * &b, expect);
    }

    #[test]
    fn comba_and_schoolbook_agree() {
        let b: alloc::vec::Vec<BigDigit> =
            (1..40).map(|i| (i * 0x9e37) as BigDigit & big_digit::MASK).collect();
        let c: alloc::vec::Vec<BigDigit> =
            (1..25).map(|i| (i * 0x51ed) as BigDigit & big_digit::MASK).collect();

        let mut via_comba = alloc::vec![0; b.len() + c.len()];
        comba_mul(&mut via_comba, &b, &c);

        let mut via_mac3 = alloc::vec![0; b.len() + c.len()];
        mac3(&mut via_mac3, &b, &c);

        assert_eq!(via_comba, via_mac3);
    }

    #[test]
    fn comba_sqr_matches_comba_mul() {
        let a: alloc::vec::Vec<BigDigit> = (1..32)
            .map(|i| (i * 0x6af3) as BigDigit & big_digit::MASK)
            .collect();

        let mut sq = alloc::vec![0; 2 * a.len()];
        comba_sqr(&mut sq, &a);

        let mut prod = alloc::vec![0; 2 * a.len()];
        comba_mul(&mut prod, &a, &a);

        assert_eq!(sq, prod);
    }

    #[test]
    fn square_dispatch_on_operand_identity() {
        let a = BigInt::from(-0x1234_5678_9abci64);
        let via_mul = &a * &a;
        let mut via_sqr = BigInt::new();
        via_sqr.assign_sqr(&a).unwrap();
        assert_eq!(via_mul, via_sqr);
        assert_eq!(via_mul.sign(), Sign::Plus);

        let mut in_place = a.clone();
        in_place.square().unwrap();
        assert_eq!(in_place, via_sqr);
    }

    #[test]
    fn mul_digit_fast_paths_match_general() {
        let base = BigInt::from(0x0123_4567_89ab_cdefu64);
        for m in [0, 1, 2, 8, 3, 10, 1 << 20] {
            let mut fast = base.clone();
            fast.mul_digit(m as BigDigit).unwrap();
            let expect = &base * &BigInt::from(m as u64);
            assert_eq!(fast, expect, "m = {m}");
        }
    }

    #[test]
    fn mul_digit_keeps_sign() {
        let mut a = BigInt::from(-5i32);
        a.mul_digit(3).unwrap();
        assert_eq!(a, BigInt::from(-15i32));
        a.mul_digit(0).unwrap();
        assert!(a.is_zero());
        assert_eq!(a.sign(), Sign::Plus);
    }
}
