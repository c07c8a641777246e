use {
    super::{
        Error,
        eth,
        exchange::{ExchangeRate, TakerAmounts},
        graph::Edge,
    },
    primitive_types::U256,
};

/// Which side of the request is fixed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SwapType {
    /// The taker spends exactly `amount` of `tokenIn`.
    ExactIn,
    /// The taker receives exactly `amount` of `tokenOut`.
    ExactOut,
}

/// One trade against a single pool edge. The taker pays `tokenB` and
/// receives `tokenA`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Hop {
    pub pool: eth::PoolId,
    pub token_a: eth::TokenAddress,
    pub token_b: eth::TokenAddress,
    pub exchange_rate: ExchangeRate,
    pub amount_a_mm: U256,
    pub amount_a_mt: U256,
    pub amount_b_mm: U256,
    pub amount_b_mt: U256,
    pub amount_b_fr: U256,
}

impl Hop {
    pub fn new(
        edge: &Edge,
        token_a: eth::TokenAddress,
        token_b: eth::TokenAddress,
        amounts: TakerAmounts,
    ) -> Self {
        Self {
            pool: edge.pool,
            token_a,
            token_b,
            exchange_rate: edge.exchange_rate,
            amount_a_mm: amounts.amount_a_mm,
            amount_a_mt: amounts.amount_a_mt,
            amount_b_mm: amounts.amount_b_mm,
            amount_b_mt: amounts.amount_b_mt,
            amount_b_fr: amounts.amount_b_fr,
        }
    }

    /// What the taker pays into this hop, fee included.
    pub fn amount_in(&self) -> U256 {
        self.amount_b_mt
    }

    pub fn amount_out(&self) -> U256 {
        self.amount_a_mt
    }
}

/// A chain of hops from `tokenIn` to `tokenOut`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Path {
    pub token_list: Vec<eth::TokenAddress>,
    pub hops: Vec<Hop>,
    pub amount_in: U256,
    pub amount_out: U256,
}

impl Path {
    /// Adds `dust` of `tokenIn` to what the first pool is paid. The pool
    /// keeps it and the output does not change.
    pub fn absorb(&mut self, dust: U256) -> Result<(), Error> {
        let add = |value: U256| value.checked_add(dust).ok_or(Error::Overflow);
        self.amount_in = add(self.amount_in)?;
        if let Some(first) = self.hops.first_mut() {
            first.amount_b_mm = add(first.amount_b_mm)?;
            first.amount_b_mt = add(first.amount_b_mt)?;
        }
        Ok(())
    }
}

/// A hop together with the pool state it was resolved against. Only lives
/// between the path finder and the simulator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoutedHop {
    pub hop: Hop,
    pub capacity: U256,
    pub location_b: U256,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoutedPath {
    pub token_list: Vec<eth::TokenAddress>,
    pub hops: Vec<RoutedHop>,
    pub amount_in: U256,
    pub amount_out: U256,
}

impl RoutedPath {
    pub fn pool_ids(&self) -> Vec<eth::PoolId> {
        self.hops.iter().map(|routed| routed.hop.pool).collect()
    }

    /// Drops the internal pool state before the path leaves the router.
    pub fn strip(self) -> Path {
        Path {
            token_list: self.token_list,
            hops: self.hops.into_iter().map(|routed| routed.hop).collect(),
            amount_in: self.amount_in,
            amount_out: self.amount_out,
        }
    }
}
