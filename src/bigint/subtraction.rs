use core::cmp::Ordering;
use core::ops::{Sub, SubAssign};

use crate::big_digit::{self, BigDigit, DoubleBigDigit};
use crate::bigint::{BigInt, Sign, cmp_slice};
use crate::error::Result;

/// Subtracts `b` and the running borrow from `a`, returning the masked
/// digit. The new borrow is the high bit of the raw word-width
/// difference.
#[inline]
pub fn sbb(a: BigDigit, b: BigDigit, borrow: &mut BigDigit) -> BigDigit {
    let diff = (a as DoubleBigDigit)
        .wrapping_sub(b as DoubleBigDigit)
        .wrapping_sub(*borrow as DoubleBigDigit);
    *borrow = (diff >> (DoubleBigDigit::BITS - 1)) as BigDigit;
    (diff & big_digit::MASK as DoubleBigDigit) as BigDigit
}

/// Two argument subtraction of raw digit slices, `a -= b`.
///
/// The caller must ensure `|a| >= |b|`.
pub fn sub2(a: &mut [BigDigit], b: &[BigDigit]) {
    let mut borrow = 0;
    let len = a.len().min(b.len());
    let (a_lo, a_hi) = a.split_at_mut(len);
    let (b_lo, b_hi) = b.split_at(len);

    for (a, b) in a_lo.iter_mut().zip(b_lo) {
        *a = sbb(*a, *b, &mut borrow);
    }

    for a in a_hi {
        if borrow == 0 {
            break;
        }
        *a = sbb(*a, 0, &mut borrow);
    }

    debug_assert!(
        borrow == 0 && b_hi.iter().all(|&x| x == 0),
        "cannot subtract b from a because b is larger than a"
    );
}

/// Two argument reversed subtraction, `b = a - b`, over `b`'s length.
///
/// `b` must already be zero-extended to at least `a.len()` digits; the
/// final borrow is returned and must be zero when `|a| >= |b|`.
pub fn __sub2rev(a: &[BigDigit], b: &mut [BigDigit]) -> BigDigit {
    debug_assert!(b.len() >= a.len());

    let mut borrow = 0;
    let (b_lo, b_hi) = b.split_at_mut(a.len());

    for (b, a) in b_lo.iter_mut().zip(a) {
        *b = sbb(*a, *b, &mut borrow);
    }

    for b in b_hi {
        *b = sbb(0, *b, &mut borrow);
    }

    borrow
}

/// Two argument reversed subtraction, `b = a - b`, where the caller
/// guarantees `|a| >= |b|`.
pub fn sub2rev(a: &[BigDigit], b: &mut [BigDigit]) {
    let borrow = __sub2rev(a, b);
    debug_assert!(
        borrow == 0,
        "cannot subtract a from b because a is smaller than b"
    );
}

impl BigInt {
    /// `self <- a - b` with full sign dispatch.
    pub fn assign_sub(&mut self, a: &BigInt, b: &BigInt) -> Result<()> {
        if a.sign != b.sign {
            let sign = a.sign;
            self.uadd(a, b)?;
            self.set_sign(sign);
        } else {
            match cmp_slice(a.digits(), b.digits()) {
                Ordering::Less => {
                    let sign = -a.sign;
                    self.usub(b, a)?;
                    self.set_sign(sign);
                }
                _ => {
                    let sign = a.sign;
                    self.usub(a, b)?;
                    self.set_sign(sign);
                }
            }
        }
        Ok(())
    }

    /// `self <- self - d` for a single non-negative digit.
    pub fn sub_digit(&mut self, d: BigDigit) -> Result<()> {
        debug_assert!(d <= big_digit::MASK);
        if d == 0 {
            return Ok(());
        }
        if self.sign == Sign::Minus {
            self.uadd_digit(d)?;
            self.set_sign(Sign::Minus);
            Ok(())
        } else if self.used > 1 || (self.used == 1 && self.data[0] >= d) {
            sub2(&mut self.data[..self.used], &[d]);
            self.clamp();
            Ok(())
        } else {
            // 0 <= self < d
            let a0 = if self.used == 0 { 0 } else { self.data[0] };
            self.grow(1)?;
            self.data[0] = d - a0;
            self.used = 1;
            self.sign = Sign::Minus;
            self.clamp();
            Ok(())
        }
    }

    /// Magnitude-only `|self| <- |a| - |b|`; requires `|a| >= |b|`.
    pub(crate) fn usub(&mut self, a: &BigInt, b: &BigInt) -> Result<()> {
        let old_used = self.used;
        self.grow(a.used)?;
        self.data[..a.used].copy_from_slice(&a.data[..a.used]);
        sub2(&mut self.data[..a.used], &b.data[..b.used]);
        self.used = a.used;
        self.zero_unused(old_used);
        self.clamp();
        Ok(())
    }

    /// Magnitude-only in-place `|self| <- |self| - |other|`; requires
    /// `|self| >= |other|`.
    pub(crate) fn usub_assign(&mut self, other: &BigInt) {
        sub2(&mut self.data[..self.used], &other.data[..other.used]);
        self.clamp();
    }

    /// Magnitude-only in-place `|self| <- |other| - |self|`; requires
    /// `|other| >= |self|`.
    pub(crate) fn usub_rev_assign(&mut self, other: &BigInt) -> Result<()> {
        let old_used = self.used;
        self.grow(other.used)?;
        let borrow = __sub2rev(&other.data[..other.used], &mut self.data[..other.used]);
        debug_assert!(borrow == 0);
        self.used = other.used;
        self.zero_unused(old_used);
        self.clamp();
        Ok(())
    }

    pub(crate) fn sub_assign_ref(&mut self, other: &BigInt) -> Result<()> {
        if self.sign != other.sign {
            let sign = self.sign;
            self.uadd_assign(other)?;
            self.set_sign(sign);
        } else {
            match cmp_slice(self.digits(), other.digits()) {
                Ordering::Less => {
                    let sign = -self.sign;
                    self.usub_rev_assign(other)?;
                    self.set_sign(sign);
                }
                _ => {
                    let sign = self.sign;
                    self.usub_assign(other);
                    self.set_sign(sign);
                }
            }
        }
        Ok(())
    }
}

impl Sub<&BigInt> for &BigInt {
    type Output = BigInt;

    fn sub(self, other: &BigInt) -> BigInt {
        let mut diff = BigInt::new();
        diff.assign_sub(self, other)
            .unwrap_or_else(|e| panic!("{e}"));
        diff
    }
}

forward_all_binop_to_ref_ref!(impl Sub for BigInt, sub);

impl SubAssign<&BigInt> for BigInt {
    fn sub_assign(&mut self, other: &BigInt) {
        self.sub_assign_ref(other).unwrap_or_else(|e| panic!("{e}"));
    }
}

forward_val_assign!(impl SubAssign for BigInt, sub_assign);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::big_digit::MASK;

    #[test]
    fn zero_minus_one_is_minus_one() {
        let diff = BigInt::new() - BigInt::from(1u32);
        assert_eq!(diff.sign(), Sign::Minus);
        assert_eq!(diff.used(), 1);
        assert_eq!(diff.digits(), &[1]);
    }

    #[test]
    fn borrow_ripples_through_zero_digits() {
        // base^3 - 1 borrows across every digit
        let mut a = BigInt::new();
        a.grow(4).unwrap();
        a.data[3] = 1;
        a.used = 4;
        let mut b = a.clone();
        b.sub_digit(1).unwrap();
        assert_eq!(b.digits(), &[MASK, MASK, MASK]);
        assert_eq!(&b + &BigInt::from(1u32), a);
    }

    #[test]
    fn signed_dispatch_matrix() {
        let five = BigInt::from(5i32);
        let three = BigInt::from(3i32);
        assert_eq!(&five - &three, BigInt::from(2i32));
        assert_eq!(&three - &five, BigInt::from(-2i32));
        assert_eq!(&five - &-&three, BigInt::from(8i32));
        assert_eq!(&-&five - &three, BigInt::from(-8i32));
        assert_eq!(&-&five - &-&three, BigInt::from(-2i32));
        assert_eq!(&-&three - &-&five, BigInt::from(2i32));
    }

    #[test]
    fn sub_digit_crossing_zero() {
        let mut a = BigInt::from(2u32);
        a.sub_digit(5).unwrap();
        assert_eq!(a, BigInt::from(-3i32));

        let mut b = BigInt::new();
        b.sub_digit(4).unwrap();
        assert_eq!(b, BigInt::from(-4i32));

        let mut c = BigInt::from(-2i32);
        c.sub_digit(5).unwrap();
        assert_eq!(c, BigInt::from(-7i32));
    }

    #[test]
    fn sub_assign_in_place_matches_three_operand() {
        let a = BigInt::from(0x0123_4567_89ab_cdefu64);
        let b = BigInt::from(0xfedc_ba98_7654_3210u64);
        let mut c = a.clone();
        c -= &b;
        assert_eq!(c, &a - &b);

        let mut d = b.clone();
        d -= &a;
        assert_eq!(d, &b - &a);
        assert_eq!(-&d, c);
    }

    #[test]
    fn self_cancellation_yields_canonical_zero() {
        let a = BigInt::from(-(1i128 << 100));
        let mut b = a.clone();
        b -= &a;
        assert!(b.is_zero());
        assert_eq!(b.sign(), Sign::Plus);
    }
}
