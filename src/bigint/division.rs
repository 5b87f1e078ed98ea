use core::cmp::Ordering;
use core::ops::{Div, Rem};

use crate::big_digit::{self, BigDigit, DoubleBigDigit};
use crate::bigint::addition::__add2;
use crate::bigint::{BigInt, Sign, cmp_slice};
use crate::error::{Error, Result};

/// Multiply-subtract for the quotient loop: `a -= b * c`, propagating the
/// borrow across all of `a`. Returns the final borrow.
pub(crate) fn sub_mul_digit_same_len(a: &mut [BigDigit], b: &[BigDigit], c: BigDigit) -> BigDigit {
    debug_assert!(a.len() >= b.len());

    let mut borrow: DoubleBigDigit = 0;
    for i in 0..a.len() {
        let prod = borrow
            + if i < b.len() {
                (b[i] as DoubleBigDigit) * (c as DoubleBigDigit)
            } else {
                0
            };
        borrow = prod >> big_digit::BITS;
        let sub = prod & big_digit::MASK as DoubleBigDigit;
        let av = a[i] as DoubleBigDigit;
        if av >= sub {
            a[i] = (av - sub) as BigDigit;
        } else {
            a[i] = (av + big_digit::BASE - sub) as BigDigit;
            borrow += 1;
        }
    }
    borrow as BigDigit
}

/// Truncated division, `n = q * d + r` with `|r| < |d|` and `r` taking
/// the sign of `n`.
///
/// Divisors of more than one digit go through schoolbook long division
/// (Knuth 4.3.1, Algorithm D): both operands are shifted left until the
/// divisor's top digit has its high payload bit set, one quotient digit
/// is estimated per step from the top two remainder digits and corrected
/// at most twice, and the remainder is shifted back down at the end.
pub fn div_rem(n: &BigInt, d: &BigInt) -> Result<(BigInt, BigInt)> {
    if d.is_zero() {
        return Err(Error::DivisionByZero);
    }
    if n.is_zero() {
        return Ok((BigInt::new(), BigInt::new()));
    }
    if d.used == 1 {
        let (mut q, r_digit) = div_rem_digit(n, d.data[0])?;
        if d.sign == Sign::Minus {
            let sign = -q.sign;
            q.set_sign(sign);
        }
        let mut r = BigInt::new();
        r.assign_single_digit(r_digit, n.sign);
        return Ok((q, r));
    }
    if cmp_slice(n.digits(), d.digits()) == Ordering::Less {
        return Ok((BigInt::new(), n.clone()));
    }

    let yn = d.used;
    let top = d.data[yn - 1];
    let shift = big_digit::BITS - (BigDigit::BITS as usize - top.leading_zeros() as usize);

    let mut rem = n.clone_magnitude();
    rem.shl(shift)?;
    let mut div = d.clone_magnitude();
    div.shl(shift)?;
    debug_assert_eq!(div.used, yn);

    let un = rem.used;
    let qlen = un - yn + 1;
    let mut q = BigInt::new();
    q.grow(qlen)?;
    rem.grow(un + 1)?;

    let y_top = div.data[yn - 1] as DoubleBigDigit;
    let y_second = div.data[yn - 2] as DoubleBigDigit;
    let mask = big_digit::MASK as DoubleBigDigit;

    for j in (0..qlen).rev() {
        let num = big_digit::to_doublebigdigit(rem.data[j + yn], rem.data[j + yn - 1]);
        let mut qhat = num / y_top;
        let mut rhat = num % y_top;

        // The estimate is at most two too high.
        loop {
            if qhat > mask
                || qhat * y_second > (rhat << big_digit::BITS) | rem.data[j + yn - 2] as DoubleBigDigit
            {
                qhat -= 1;
                rhat += y_top;
                if rhat > mask {
                    break;
                }
            } else {
                break;
            }
        }

        let mut qhat = qhat as BigDigit;
        let window = &mut rem.data[j..j + yn + 1];
        let borrow = sub_mul_digit_same_len(window, &div.data[..yn], qhat);
        if borrow != 0 {
            // One more than the true digit after all; add the divisor
            // back.
            qhat -= 1;
            let carry = __add2(window, &div.data[..yn]);
            debug_assert_eq!(carry, borrow);
        }
        q.data[j] = qhat;
    }

    q.used = qlen;
    BigInt::clamp(&mut q);
    let q_sign = if n.sign != d.sign { Sign::Minus } else { Sign::Plus };
    q.set_sign(q_sign);

    rem.used = yn;
    rem.zero_unused(un + 1);
    BigInt::clamp(&mut rem);
    rem.shr(shift);
    rem.set_sign(n.sign);

    Ok((q, rem))
}

/// Truncated division by a single non-negative digit.
///
/// The remainder is returned as a bare digit magnitude; a non-zero
/// remainder takes the sign of `n` numerically.
pub fn div_rem_digit(n: &BigInt, d: BigDigit) -> Result<(BigInt, BigDigit)> {
    debug_assert!(d <= big_digit::MASK);
    if d == 0 {
        return Err(Error::DivisionByZero);
    }
    if n.is_zero() {
        return Ok((BigInt::new(), 0));
    }
    if d == 1 {
        return Ok((n.clone(), 0));
    }
    if d == 2 {
        let r = n.data[0] & 1;
        let mut q = n.clone();
        q.shr1();
        return Ok((q, r));
    }
    if d.is_power_of_two() {
        let r = n.data[0] & (d - 1);
        let mut q = n.clone();
        q.shr(d.trailing_zeros() as usize);
        return Ok((q, r));
    }
    if d == 3 {
        return div_rem_3(n);
    }

    let mut q = BigInt::new();
    q.grow(n.used)?;
    let dd = d as DoubleBigDigit;
    let mut rem: DoubleBigDigit = 0;
    for i in (0..n.used).rev() {
        let acc = (rem << big_digit::BITS) | n.data[i] as DoubleBigDigit;
        q.data[i] = (acc / dd) as BigDigit;
        rem = acc % dd;
    }
    q.used = n.used;
    BigInt::clamp(&mut q);
    q.set_sign(n.sign);
    Ok((q, rem as BigDigit))
}

/// Dedicated walk for division by three.
fn div_rem_3(n: &BigInt) -> Result<(BigInt, BigDigit)> {
    let mut q = BigInt::new();
    q.grow(n.used)?;
    let mut rem: DoubleBigDigit = 0;
    for i in (0..n.used).rev() {
        let acc = (rem << big_digit::BITS) | n.data[i] as DoubleBigDigit;
        q.data[i] = (acc / 3) as BigDigit;
        rem = acc % 3;
    }
    q.used = n.used;
    BigInt::clamp(&mut q);
    q.set_sign(n.sign);
    Ok((q, rem as BigDigit))
}

impl BigInt {
    /// See [`div_rem`](crate::algorithms::div_rem).
    pub fn div_rem(&self, other: &BigInt) -> Result<(BigInt, BigInt)> {
        div_rem(self, other)
    }

    /// See [`div_rem_digit`](crate::algorithms::div_rem_digit).
    pub fn div_rem_digit(&self, d: BigDigit) -> Result<(BigInt, BigDigit)> {
        div_rem_digit(self, d)
    }
}

impl Div<&BigInt> for &BigInt {
    type Output = BigInt;

    fn div(self, other: &BigInt) -> BigInt {
        let (q, _) = div_rem(self, other).unwrap_or_else(|e| panic!("{e}"));
        q
    }
}

forward_all_binop_to_ref_ref!(impl Div for BigInt, div);

impl Rem<&BigInt> for &BigInt {
    type Output = BigInt;

    fn rem(self, other: &BigInt) -> BigInt {
        let (_, r) = div_rem(self, other).unwrap_or_else(|e| panic!("{e}"));
        r
    }
}

forward_all_binop_to_ref_ref!(impl Rem for BigInt, rem);
