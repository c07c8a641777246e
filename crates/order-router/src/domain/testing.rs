//! Snapshot fixtures shared by the domain unit tests.

use {
    super::{
        eth,
        exchange::ExchangeRate,
        location::Location,
        snapshot::{MarketSnapshot, TradeRequest},
    },
    primitive_types::{H160, U256},
};

pub fn token(n: u8) -> eth::TokenAddress {
    eth::TokenAddress(H160::repeat_byte(n))
}

pub fn pool_id(n: u64) -> eth::PoolId {
    eth::PoolId(U256::from(n))
}

pub fn amount(n: u64) -> U256 {
    U256::from(n)
}

/// Builds snapshots edge by edge. Each pool's owner is derived from its id
/// and, unless stated otherwise, receives `tokenB` at an external address.
#[derive(Default)]
pub struct Snapshot(MarketSnapshot);

impl Snapshot {
    /// Pool `pool` gives `token_a` for `token_b` at `x1:x2`, holding
    /// `balance` of `token_a`.
    pub fn edge(self, pool: u64, token_a: u8, token_b: u8, rate: (u128, u128), balance: u64) -> Self {
        let owner = Location::ExternalAddress(owner(pool));
        self.edge_to(pool, token_a, token_b, rate, balance, owner)
    }

    pub fn edge_to(
        mut self,
        pool: u64,
        token_a: u8,
        token_b: u8,
        rate: (u128, u128),
        balance: u64,
        location_b: Location,
    ) -> Self {
        let entry = self.0.pools.entry(pool_id(pool)).or_default();
        entry.owner = owner(pool);
        entry.trade_requests.entry(token(token_a)).or_default().insert(
            token(token_b),
            TradeRequest {
                exchange_rate: ExchangeRate::from_parts(rate.0, rate.1),
                location_b: location_b.encode().unwrap(),
            },
        );
        self.0
            .internal_balances_by_pool
            .entry(pool_id(pool))
            .or_default()
            .insert(token(token_a), amount(balance));
        self
    }

    /// Overrides what `pool` holds of `token_a`.
    pub fn balance(mut self, pool: u64, token_a: u8, balance: U256) -> Self {
        self.0
            .internal_balances_by_pool
            .entry(pool_id(pool))
            .or_default()
            .insert(token(token_a), balance);
        self
    }

    pub fn build(self) -> MarketSnapshot {
        self.0
    }
}

fn owner(pool: u64) -> eth::Address {
    eth::Address(H160::from_low_u64_be(0xa000 + pool))
}
