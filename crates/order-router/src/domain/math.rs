//! Full-precision `a * b / c` helpers.
//!
//! Products are taken in 512 bits so that only the final quotient has to fit
//! into a `U256`, mirroring the `mulDiv` semantics of the settlement
//! contract.

use {
    super::Error,
    primitive_types::{U256, U512},
};

/// Computes `floor(a * b / denominator)`.
pub fn mul_div_down(a: U256, b: U256, denominator: U256) -> Result<U256, Error> {
    if denominator.is_zero() {
        return Err(Error::UnsupportedPair);
    }
    let quotient = a.full_mul(b) / U512::from(denominator);
    U256::try_from(quotient).map_err(|_| Error::Overflow)
}

/// Computes `ceil(a * b / denominator)`.
pub fn mul_div_up(a: U256, b: U256, denominator: U256) -> Result<U256, Error> {
    if denominator.is_zero() {
        return Err(Error::UnsupportedPair);
    }
    let (quotient, remainder) = a.full_mul(b).div_mod(U512::from(denominator));
    let quotient = if remainder.is_zero() {
        quotient
    } else {
        quotient + U512::one()
    };
    U256::try_from(quotient).map_err(|_| Error::Overflow)
}
