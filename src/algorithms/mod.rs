//! Low-level algorithms for big integer arithmetic.
//!
//! This module re-exports the internal arithmetic primitives used by
//! [`BigInt`](crate::BigInt), making them available for direct use on
//! digit slices, and hosts the factorial helper built on top of them.

#![allow(clippy::many_single_char_names)]

// Re-export arithmetic primitives from their canonical locations.
//
// The implementations live inside the `bigint` submodules where they are
// used by the method and operator impls. We simply widen their visibility
// here.

// --- addition ---
pub use crate::bigint::addition::{__add2, adc, add2};

// --- subtraction ---
pub use crate::bigint::subtraction::{__sub2rev, sbb, sub2, sub2rev};

// --- multiplication ---
pub use crate::bigint::multiplication::{
    MAX_COMBA, WARRAY, comba_mul, comba_sqr, mac3, mac_digit, mac_with_carry, scalar_mul,
};

// --- division ---
pub use crate::bigint::division::{div_rem, div_rem_digit};

// --- comparison ---
pub use crate::bigint::cmp_slice;

// --- factorial ---
mod factorial;

pub use self::factorial::{factorial, recursive_product};
