use core::cmp::Ordering;
use core::ops::{Add, AddAssign};

use crate::big_digit::{self, BigDigit, DoubleBigDigit};
use crate::bigint::{BigInt, Sign, cmp_slice};
use crate::error::Result;

/// Adds `a + b` plus the running carry, returning the masked digit and
/// leaving the next carry in `acc`.
#[inline]
pub fn adc(a: BigDigit, b: BigDigit, acc: &mut DoubleBigDigit) -> BigDigit {
    *acc += a as DoubleBigDigit;
    *acc += b as DoubleBigDigit;
    let lo = (*acc & big_digit::MASK as DoubleBigDigit) as BigDigit;
    *acc >>= big_digit::BITS;
    lo
}

/// Two argument addition of raw digit slices, `a += b`.
///
/// The caller must ensure `a.len() >= b.len()`; the final carry, if any,
/// is returned.
pub fn __add2(a: &mut [BigDigit], b: &[BigDigit]) -> BigDigit {
    debug_assert!(a.len() >= b.len());

    let mut carry = 0;
    let (a_lo, a_hi) = a.split_at_mut(b.len());

    for (a, b) in a_lo.iter_mut().zip(b) {
        *a = adc(*a, *b, &mut carry);
    }

    for a in a_hi {
        if carry == 0 {
            break;
        }
        *a = adc(*a, 0, &mut carry);
    }

    carry as BigDigit
}

/// Two argument addition, `a += b`, where the sum is known to fit in `a`.
pub fn add2(a: &mut [BigDigit], b: &[BigDigit]) {
    let carry = __add2(a, b);
    debug_assert!(carry == 0);
}

impl BigInt {
    /// `self <- a + b` with full sign dispatch.
    pub fn assign_add(&mut self, a: &BigInt, b: &BigInt) -> Result<()> {
        if a.sign == b.sign {
            let sign = a.sign;
            self.uadd(a, b)?;
            self.set_sign(sign);
        } else {
            // Opposite signs reduce to a magnitude subtraction; the
            // larger magnitude decides the sign.
            match cmp_slice(a.digits(), b.digits()) {
                Ordering::Less => {
                    let sign = b.sign;
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

    /// `self <- self + d` for a single non-negative digit.
    ///
    /// The common positive case adjusts the low digits in place; a
    /// negative `self` dispatches on the magnitude comparison instead.
    pub fn add_digit(&mut self, d: BigDigit) -> Result<()> {
        debug_assert!(d <= big_digit::MASK);
        if d == 0 {
            return Ok(());
        }
        if self.sign == Sign::Plus {
            self.uadd_digit(d)
        } else if self.used > 1 || self.data[0] > d {
            super::subtraction::sub2(&mut self.data[..self.used], &[d]);
            self.clamp();
            Ok(())
        } else {
            let old = self.used;
            let v = d - self.data[0];
            self.data[0] = v;
            self.used = if v == 0 { 0 } else { 1 };
            self.zero_unused(old);
            self.sign = Sign::Plus;
            self.clamp();
            Ok(())
        }
    }

    /// Magnitude-only `|self| <- |a| + |b|`; the sign is left to the
    /// caller.
    pub(crate) fn uadd(&mut self, a: &BigInt, b: &BigInt) -> Result<()> {
        let (x, y) = if a.used >= b.used { (a, b) } else { (b, a) };
        let old_used = self.used;
        self.grow(x.used + 1)?;
        self.data[..x.used].copy_from_slice(&x.data[..x.used]);
        self.data[x.used] = 0;
        let carry = __add2(&mut self.data[..x.used + 1], &y.data[..y.used]);
        debug_assert!(carry == 0);
        self.used = x.used + 1;
        self.zero_unused(old_used);
        self.clamp();
        Ok(())
    }

    /// Magnitude-only in-place `|self| <- |self| + |other|`.
    pub(crate) fn uadd_assign(&mut self, other: &BigInt) -> Result<()> {
        let n = self.used.max(other.used);
        self.grow(n + 1)?;
        let carry = __add2(&mut self.data[..n + 1], &other.data[..other.used]);
        debug_assert!(carry == 0);
        self.used = n + 1;
        self.clamp();
        Ok(())
    }

    /// Magnitude-only in-place `|self| <- |self| + d`, bumping `used` for
    /// the potential carry digit and letting `clamp` take it back.
    pub(crate) fn uadd_digit(&mut self, d: BigDigit) -> Result<()> {
        let old_used = self.used;
        self.grow(old_used + 1)?;
        let mut carry = d as DoubleBigDigit;
        for i in 0..old_used {
            if carry == 0 {
                break;
            }
            carry += self.data[i] as DoubleBigDigit;
            self.data[i] = (carry & big_digit::MASK as DoubleBigDigit) as BigDigit;
            carry >>= big_digit::BITS;
        }
        self.data[old_used] = carry as BigDigit;
        self.used = old_used + 1;
        self.clamp();
        Ok(())
    }

    pub(crate) fn add_assign_ref(&mut self, other: &BigInt) -> Result<()> {
        if self.sign == other.sign {
            let sign = self.sign;
            self.uadd_assign(other)?;
            self.set_sign(sign);
        } else {
            match cmp_slice(self.digits(), other.digits()) {
                Ordering::Less => {
                    let sign = other.sign;
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

impl Add<&BigInt> for &BigInt {
    type Output = BigInt;

    fn add(self, other: &BigInt) -> BigInt {
        let mut sum = BigInt::new();
        sum.assign_add(self, other)
            .unwrap_or_else(|e| panic!("{e}"));
        sum
    }
}

forward_all_binop_to_ref_ref!(impl Add for BigInt, add);

impl AddAssign<&BigInt> for BigInt {
    fn add_assign(&mut self, other: &BigInt) {
        self.add_assign_ref(other).unwrap_or_else(|e| panic!("{e}"));
    }
}

forward_val_assign!(impl AddAssign for BigInt, add_assign);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::big_digit::MASK;

    fn canonical(x: &BigInt) -> bool {
        let lead_ok = if x.used == 0 {
            x.sign == Sign::Plus
        } else {
            x.data[x.used - 1] != 0
        };
        lead_ok && x.data[x.used..].iter().all(|&d| d == 0)
    }

    #[test]
    fn carry_ripples_through_saturated_digits() {
        // (base^3 - 1) + 1 == base^3
        let mut a = BigInt::new();
        a.grow(4).unwrap();
        a.data[..3].copy_from_slice(&[MASK, MASK, MASK]);
        a.used = 3;
        a.add_digit(1).unwrap();
        assert_eq!(a.used(), 4);
        assert_eq!(a.digits(), &[0, 0, 0, 1]);
        assert!(canonical(&a));
    }

    #[test]
    fn add_digit_without_carry_reclamps_used() {
        // The fast path bumps `used` for a carry that never materializes;
        // clamp has to take the spare digit back.
        let mut a = BigInt::from(5u32);
        a.add_digit(6).unwrap();
        assert_eq!(a.used(), 1);
        assert_eq!(a.digits(), &[11]);
        assert!(canonical(&a));
    }

    #[test]
    fn add_digit_negative_operand() {
        let mut a = BigInt::from(-7i32);
        a.add_digit(3).unwrap();
        assert_eq!(a, BigInt::from(-4i32));

        let mut b = BigInt::from(-7i32);
        b.add_digit(7).unwrap();
        assert!(b.is_zero());
        assert!(canonical(&b));

        let mut c = BigInt::from(-7i32);
        c.add_digit(9).unwrap();
        assert_eq!(c, BigInt::from(2u32));
    }

    #[test]
    fn signed_dispatch_matrix() {
        let five = BigInt::from(5i32);
        let three = BigInt::from(3i32);
        assert_eq!(&five + &three, BigInt::from(8i32));
        assert_eq!(&five + &-&three, BigInt::from(2i32));
        assert_eq!(&-&five + &three, BigInt::from(-2i32));
        assert_eq!(&-&five + &-&three, BigInt::from(-8i32));
        assert_eq!(&three + &-&five, BigInt::from(-2i32));
        assert_eq!(&-&three + &five, BigInt::from(2i32));
    }

    #[test]
    fn opposite_signs_cancel_to_canonical_zero() {
        let a = BigInt::from(1u128 << 90);
        let sum = &a + &-&a;
        assert!(sum.is_zero());
        assert_eq!(sum.sign(), Sign::Plus);
    }

    #[test]
    fn add_assign_in_place_matches_three_operand() {
        let a = BigInt::from(0x1234_5678_9abc_def0u64);
        let b = BigInt::from(-0x0fed_cba9_8765_4321i64);
        let mut c = a.clone();
        c += &b;
        assert_eq!(c, &a + &b);
        assert!(canonical(&c));

        let mut d = b.clone();
        d += &a;
        assert_eq!(d, c);
    }
}
