//! The market state a quote is computed against.

use {
    super::{Error, eth, exchange::ExchangeRate, location::Location},
    primitive_types::U256,
    std::collections::HashMap,
};

/// Pools and internal balances at one point in time. Quote computations
/// never mutate the caller's snapshot; the simulator works on a copy.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MarketSnapshot {
    pub pools: HashMap<eth::PoolId, Pool>,
    pub internal_balances_by_pool: HashMap<eth::PoolId, HashMap<eth::TokenAddress, U256>>,
    pub internal_balances_by_account: HashMap<eth::Address, HashMap<eth::TokenAddress, U256>>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Pool {
    pub owner: eth::Address,
    /// Sparse `[tokenA][tokenB]` matrix of the edges this pool offers.
    pub trade_requests: HashMap<eth::TokenAddress, HashMap<eth::TokenAddress, TradeRequest>>,
}

/// One directed edge: the pool gives `tokenA` at `exchange_rate` and sends
/// the `tokenB` it receives to `location_b`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TradeRequest {
    pub exchange_rate: ExchangeRate,
    /// Packed [`Location`]; only decoded when a hop is simulated.
    pub location_b: U256,
}

impl MarketSnapshot {
    pub fn pool_balance(&self, pool: &eth::PoolId, token: &eth::TokenAddress) -> U256 {
        self.internal_balances_by_pool
            .get(pool)
            .and_then(|balances| balances.get(token))
            .copied()
            .unwrap_or_default()
    }

    pub fn account_balance(&self, account: &eth::Address, token: &eth::TokenAddress) -> U256 {
        self.internal_balances_by_account
            .get(account)
            .and_then(|balances| balances.get(token))
            .copied()
            .unwrap_or_default()
    }

    /// Removes `amount` from a pool's balance, bottoming out at zero.
    pub fn debit_pool(&mut self, pool: eth::PoolId, token: eth::TokenAddress, amount: U256) {
        if let Some(balance) = self
            .internal_balances_by_pool
            .get_mut(&pool)
            .and_then(|balances| balances.get_mut(&token))
        {
            *balance = balance.saturating_sub(amount);
        }
    }

    /// Credits `amount` to a location. External addresses are not tracked,
    /// so crediting one is a no-op.
    pub fn credit(
        &mut self,
        location: Location,
        token: eth::TokenAddress,
        amount: U256,
    ) -> Result<(), Error> {
        let balance = match location {
            Location::ExternalAddress(_) => return Ok(()),
            Location::InternalAccount(account) => self
                .internal_balances_by_account
                .entry(account)
                .or_default()
                .entry(token)
                .or_default(),
            Location::Pool(pool) => self
                .internal_balances_by_pool
                .entry(pool)
                .or_default()
                .entry(token)
                .or_default(),
        };
        *balance = balance.checked_add(amount).ok_or(Error::Overflow)?;
        Ok(())
    }
}
