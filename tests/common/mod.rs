#![allow(dead_code)]

use mpint::big_digit::{self, BigDigit};
use mpint::{BigInt, Sign};
use rand::RngCore;
use rand_xorshift::XorShiftRng;

/// Builds a value from a decimal string using only the single-digit
/// primitives, the way a radix reader would.
pub fn from_decimal(s: &str) -> BigInt {
    let (neg, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let mut x = BigInt::new();
    for c in digits.chars() {
        let d = c.to_digit(10).expect("decimal digit") as BigDigit;
        x.mul_digit(10).unwrap();
        x.add_digit(d).unwrap();
    }
    if neg { -x } else { x }
}

/// A random signed value of the given digit count (leading digit may be
/// zero, so the logical size can come out smaller).
pub fn random_bigint(rng: &mut XorShiftRng, digits: usize) -> BigInt {
    let mut x = BigInt::new();
    for _ in 0..digits {
        x.shl(big_digit::BITS).unwrap();
        x.add_digit((rng.next_u64() as BigDigit) & big_digit::MASK)
            .unwrap();
    }
    if rng.next_u32() & 1 == 1 { -x } else { x }
}

/// Checks the canonical-form clauses observable through the public API.
pub fn assert_canonical(x: &BigInt) {
    if x.used() == 0 {
        assert_eq!(x.sign(), Sign::Plus, "zero must be non-negative");
    } else {
        assert_ne!(x.digits()[x.used() - 1], 0, "leading zero digit");
    }
    assert!(
        x.digits().iter().all(|&d| d <= big_digit::MASK),
        "digit exceeds payload mask"
    );
}
