//! Fixed-point exchange-rate arithmetic.
//!
//! A pool edge `tokenA -> tokenB` gives out `tokenA` and takes `tokenB` at a
//! packed rate `(x1, x2)`:
//!
//! ```text
//! amountB = ceil(amountA * x2 / x1)
//! amountA = floor(amountB * x1 / x2)
//! ```
//!
//! Rounding always leaves the remainder with the resting order. These
//! functions must agree with the settlement contract bit for bit.

use {
    super::{Error, math},
    derive_more::{From, Into},
    primitive_types::U256,
    std::cmp::Ordering,
};

/// Two unsigned 128-bit components packed into one word: `x1` in the high
/// 128 bits, `x2` in the low 128 bits.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, From, Into)]
pub struct ExchangeRate(pub U256);

impl ExchangeRate {
    /// Packs the two rate components. Fails with [`Error::Overflow`] if
    /// either component exceeds `2^128 - 1`.
    pub fn encode(x1: U256, x2: U256) -> Result<Self, Error> {
        let limit = U256::from(u128::MAX);
        if x1 > limit || x2 > limit {
            return Err(Error::Overflow);
        }
        Ok(Self::from_parts(x1.low_u128(), x2.low_u128()))
    }

    pub fn from_parts(x1: u128, x2: u128) -> Self {
        let mut word = [0_u8; 32];
        word[..16].copy_from_slice(&x1.to_be_bytes());
        word[16..].copy_from_slice(&x2.to_be_bytes());
        Self(U256::from_big_endian(&word))
    }

    /// Returns `(x1, x2)`.
    pub fn decode(&self) -> (u128, u128) {
        let mut word = [0_u8; 32];
        self.0.to_big_endian(&mut word);
        let mut x1 = [0_u8; 16];
        let mut x2 = [0_u8; 16];
        x1.copy_from_slice(&word[..16]);
        x2.copy_from_slice(&word[16..]);
        (u128::from_be_bytes(x1), u128::from_be_bytes(x2))
    }

    pub fn is_nonzero(&self) -> bool {
        let (x1, x2) = self.decode();
        x1 > 0 && x2 > 0
    }

    /// Orders rates by how much `tokenA` a taker receives per unit of
    /// `tokenB` paid (`x1 / x2`); `Greater` means `self` is the better deal
    /// for the taker. Compared by cross-multiplication, never by division.
    pub fn cmp_for_taker(&self, other: &Self) -> Ordering {
        let (x1, x2) = self.decode();
        let (y1, y2) = other.decode();
        (U256::from(x1) * U256::from(y2)).cmp(&(U256::from(y1) * U256::from(x2)))
    }

    fn nonzero_parts(&self) -> Result<(U256, U256), Error> {
        match self.decode() {
            (0, _) | (_, 0) => Err(Error::UnsupportedPair),
            (x1, x2) => Ok((U256::from(x1), U256::from(x2))),
        }
    }
}

/// `floor(amount_b * x1 / x2)`: what the pool gives for `amount_b`.
pub fn amount_a_from_b(amount_b: U256, rate: ExchangeRate) -> Result<U256, Error> {
    let (x1, x2) = rate.nonzero_parts()?;
    math::mul_div_down(amount_b, x1, x2)
}

/// `ceil(amount_a * x2 / x1)`: what the pool requires for `amount_a`.
pub fn amount_b_from_a(amount_a: U256, rate: ExchangeRate) -> Result<U256, Error> {
    let (x1, x2) = rate.nonzero_parts()?;
    math::mul_div_up(amount_a, x2, x1)
}

/// A protocol fee in parts per million of the fee-inclusive taker amount.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct FeePpm(u32);

impl FeePpm {
    pub const DENOMINATOR: u32 = 1_000_000;

    /// Returns `None` for fees of 100% or more, which would make the
    /// fee-inclusive amount unbounded.
    pub fn new(ppm: u32) -> Option<Self> {
        (ppm < Self::DENOMINATOR).then_some(Self(ppm))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Grosses a market-maker amount up to the fee-inclusive taker amount:
    /// `floor(mm * 1e6 / (1e6 - fee))`.
    pub fn add_to(&self, amount_mm: U256) -> Result<U256, Error> {
        math::mul_div_down(
            amount_mm,
            U256::from(Self::DENOMINATOR),
            U256::from(Self::DENOMINATOR - self.0),
        )
    }

    /// Splits a fee-inclusive taker amount into `(mm, fee)` with
    /// `fee = floor(mt * fee / 1e6)`.
    pub fn split(&self, amount_mt: U256) -> Result<(U256, U256), Error> {
        let fee = math::mul_div_down(
            amount_mt,
            U256::from(self.0),
            U256::from(Self::DENOMINATOR),
        )?;
        Ok((amount_mt - fee, fee))
    }
}

/// Every leg of a single taker trade against one pool edge.
///
/// MM legs are what the resting order gives or receives at its quoted rate.
/// MT legs are the taker-facing amounts; only the `tokenB` side carries a
/// fee, paid on top to the fee receiver.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TakerAmounts {
    pub amount_a_mm: U256,
    pub amount_a_mt: U256,
    pub amount_b_mm: U256,
    pub amount_b_mt: U256,
    pub amount_b_fr: U256,
}

impl TakerAmounts {
    /// Caps the `tokenA` the taker receives. The pool keeps whatever
    /// `tokenB` it was already paid.
    pub fn cap_amount_a(mut self, limit: U256) -> Self {
        if self.amount_a_mm > limit {
            self.amount_a_mm = limit;
            self.amount_a_mt = limit;
        }
        self
    }
}

/// Fixes the `tokenA` amount the taker receives and derives what they pay.
pub fn taker_exact_in(
    amount_a: U256,
    rate: ExchangeRate,
    fee: FeePpm,
) -> Result<TakerAmounts, Error> {
    let amount_b_mm = amount_b_from_a(amount_a, rate)?;
    let amount_b_mt = fee.add_to(amount_b_mm)?;
    Ok(TakerAmounts {
        amount_a_mm: amount_a,
        amount_a_mt: amount_a,
        amount_b_mm,
        amount_b_mt,
        amount_b_fr: amount_b_mt - amount_b_mm,
    })
}

/// Fixes the fee-inclusive `tokenB` amount the taker pays and derives what
/// they receive.
pub fn taker_exact_out(
    amount_b: U256,
    rate: ExchangeRate,
    fee: FeePpm,
) -> Result<TakerAmounts, Error> {
    let (amount_b_mm, amount_b_fr) = fee.split(amount_b)?;
    let amount_a = amount_a_from_b(amount_b_mm, rate)?;
    Ok(TakerAmounts {
        amount_a_mm: amount_a,
        amount_a_mt: amount_a,
        amount_b_mm,
        amount_b_mt: amount_b,
        amount_b_fr,
    })
}
