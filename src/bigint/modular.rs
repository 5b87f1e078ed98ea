use crate::bigint::BigInt;
use crate::error::Result;

impl BigInt {
    /// Reduces `self` modulo `m` into the canonical residue range:
    /// `[0, m)` for positive `m`, `(m, 0]` for negative `m`.
    pub fn mod_floor(&self, m: &BigInt) -> Result<BigInt> {
        let (_, mut r) = self.div_rem(m)?;
        if !r.is_zero() && r.sign() != m.sign() {
            let mut adjusted = BigInt::new();
            adjusted.assign_add(&r, m)?;
            r = adjusted;
        }
        Ok(r)
    }

    /// `(self + rhs) mod m`, in the canonical residue range.
    pub fn add_mod(&self, rhs: &BigInt, m: &BigInt) -> Result<BigInt> {
        let mut sum = BigInt::new();
        sum.assign_add(self, rhs)?;
        sum.mod_floor(m)
    }

    /// `(self - rhs) mod m`, in the canonical residue range.
    pub fn sub_mod(&self, rhs: &BigInt, m: &BigInt) -> Result<BigInt> {
        let mut diff = BigInt::new();
        diff.assign_sub(self, rhs)?;
        diff.mod_floor(m)
    }

    /// `(self * rhs) mod m`, in the canonical residue range.
    pub fn mul_mod(&self, rhs: &BigInt, m: &BigInt) -> Result<BigInt> {
        let mut prod = BigInt::new();
        prod.assign_mul(self, rhs)?;
        prod.mod_floor(m)
    }

    /// `self² mod m`, in the canonical residue range.
    pub fn sqr_mod(&self, m: &BigInt) -> Result<BigInt> {
        let mut sq = BigInt::new();
        sq.assign_sqr(self)?;
        sq.mod_floor(m)
    }
}
