use {
    super::{Error, aggregator::Request, math, path::{Path, SwapType}},
    primitive_types::U256,
};

/// The priced result of routing one request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Quote {
    pub side: SwapType,
    /// The requested amount.
    pub amount: U256,
    /// The other side: total output for exact-input, total input for
    /// exact-output.
    pub quote: U256,
    pub amount_in: U256,
    pub amount_out: U256,
    pub paths: Vec<Path>,
    pub gas: GasEstimate,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GasEstimate {
    /// Gas units.
    pub gas: U256,
    /// Cost of `gas` denominated in the quote token.
    pub quote: U256,
}

/// Caller-supplied pricing constants. Nothing here is fetched.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GasParameters {
    pub gas_per_hop: u64,
    pub base_gas: u64,
    /// Wei per gas unit.
    pub gas_price: U256,
    /// Quote-token units per native-token unit.
    pub native_price: Price,
}

/// An exact `numerator / denominator` ratio.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Price {
    pub numerator: U256,
    pub denominator: U256,
}

impl Default for GasParameters {
    fn default() -> Self {
        Self {
            gas_per_hop: 100_000,
            base_gas: 0,
            gas_price: U256::zero(),
            native_price: Price {
                numerator: U256::one(),
                denominator: U256::one(),
            },
        }
    }
}

pub fn build(request: &Request, paths: Vec<Path>, gas: &GasParameters) -> Result<Quote, Error> {
    let mut amount_in = U256::zero();
    let mut amount_out = U256::zero();
    let mut hops = U256::zero();
    for path in &paths {
        amount_in = amount_in.checked_add(path.amount_in).ok_or(Error::Overflow)?;
        amount_out = amount_out.checked_add(path.amount_out).ok_or(Error::Overflow)?;
        hops += U256::from(path.hops.len());
    }

    let units = hops
        .checked_mul(U256::from(gas.gas_per_hop))
        .and_then(|units| units.checked_add(U256::from(gas.base_gas)))
        .ok_or(Error::Overflow)?;
    let cost = units.checked_mul(gas.gas_price).ok_or(Error::Overflow)?;
    let cost = math::mul_div_down(
        cost,
        gas.native_price.numerator,
        gas.native_price.denominator,
    )?;

    Ok(Quote {
        side: request.side,
        amount: request.amount,
        quote: match request.side {
            SwapType::ExactIn => amount_out,
            SwapType::ExactOut => amount_in,
        },
        amount_in,
        amount_out,
        paths,
        gas: GasEstimate {
            gas: units,
            quote: cost,
        },
    })
}
