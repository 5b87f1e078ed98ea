use crate::bigint::BigInt;
use crate::error::{Error, Result};

cfg_digit!(
    // Everything that fits the primitive is served from the table.
    const SMALL_FACTORIALS: [u64; 21] = [
        1,
        1,
        2,
        6,
        24,
        120,
        720,
        5_040,
        40_320,
        362_880,
        3_628_800,
        39_916_800,
        479_001_600,
        6_227_020_800,
        87_178_291_200,
        1_307_674_368_000,
        20_922_789_888_000,
        355_687_428_096_000,
        6_402_373_705_728_000,
        121_645_100_408_832_000,
        2_432_902_008_176_640_000,
    ];
    const SMALL_FACTORIALS: [u128; 35] = [
        1,
        1,
        2,
        6,
        24,
        120,
        720,
        5_040,
        40_320,
        362_880,
        3_628_800,
        39_916_800,
        479_001_600,
        6_227_020_800,
        87_178_291_200,
        1_307_674_368_000,
        20_922_789_888_000,
        355_687_428_096_000,
        6_402_373_705_728_000,
        121_645_100_408_832_000,
        2_432_902_008_176_640_000,
        51_090_942_171_709_440_000,
        1_124_000_727_777_607_680_000,
        25_852_016_738_884_976_640_000,
        620_448_401_733_239_439_360_000,
        15_511_210_043_330_985_984_000_000,
        403_291_461_126_605_635_584_000_000,
        10_888_869_450_418_352_160_768_000_000,
        304_888_344_611_713_860_501_504_000_000,
        8_841_761_993_739_701_954_543_616_000_000,
        265_252_859_812_191_058_636_308_480_000_000,
        8_222_838_654_177_922_817_725_562_880_000_000,
        263_130_836_933_693_530_167_218_012_160_000_000,
        8_683_317_618_811_886_495_518_194_401_280_000_000,
        295_232_799_039_604_140_847_618_609_643_520_000_000,
    ];
);

const MAX_RECURSION: usize = 100;

/// Computes `n!`.
///
/// Small arguments come from a precomputed table. Larger ones use
/// Luschny's binary split: level `i` contributes the product of the odd
/// integers in `(n >> (i + 1), n >> i]`, an `inner` accumulator collects
/// the odd factorial of `n >> i`, an `outer` accumulator the product of
/// the inners, and a final left shift by `n - popcount(n)` restores the
/// power-of-two factor.
pub fn factorial(n: u64) -> Result<BigInt> {
    if (n as usize) < SMALL_FACTORIALS.len() {
        return Ok(BigInt::from(SMALL_FACTORIALS[n as usize]));
    }

    let mut inner = BigInt::from(1u32);
    let mut outer = BigInt::from(1u32);
    for i in (0..=n.ilog2()).rev() {
        let start = (n.checked_shr(i + 1).unwrap_or(0) + 1) | 1;
        let stop = ((n >> i) + 1) | 1;
        if stop > start {
            let p = recursive_product(start, stop - 2)?;
            let mut t = BigInt::new();
            t.assign_mul(&inner, &p)?;
            inner = t;
        }
        let mut t = BigInt::new();
        t.assign_mul(&outer, &inner)?;
        outer = t;
    }
    outer.shl((n - u64::from(n.count_ones())) as usize)?;
    Ok(outer)
}

/// Product of the odd integers `low, low + 2, .., high` (inclusive) by
/// balanced pairwise multiplication.
pub fn recursive_product(low: u64, high: u64) -> Result<BigInt> {
    if low > high || low & 1 == 0 || high & 1 == 0 {
        return Err(Error::InvalidArgument);
    }
    recurse(low, high, 0)
}

fn recurse(low: u64, high: u64, depth: usize) -> Result<BigInt> {
    if depth > MAX_RECURSION {
        return Err(Error::MaxIterationsReached);
    }
    let terms = (high - low) / 2 + 1;
    match terms {
        1 => Ok(BigInt::from(low)),
        2 => Ok(BigInt::from(low as u128 * high as u128)),
        _ => {
            let half = terms / 2;
            let left = recurse(low, low + 2 * (half - 1), depth + 1)?;
            let right = recurse(low + 2 * half, high, depth + 1)?;
            let mut prod = BigInt::new();
            prod.assign_mul(&left, &right)?;
            Ok(prod)
        }
    }
}
