#![cfg(feature = "zeroize")]
#![cfg_attr(docsrs, doc(cfg(feature = "zeroize")))]

use super::{BigInt, Sign};

impl zeroize::Zeroize for BigInt {
    fn zeroize(&mut self) {
        self.data.as_mut_slice().zeroize();
        self.used = 0;
        self.sign = Sign::Plus;
    }
}
