use {
    crate::domain::{self, eth, exchange::ExchangeRate},
    number::serialization::{DecimalU256, HexU256},
    primitive_types::U256,
    serde::Deserialize,
    serde_with::serde_as,
    std::{
        collections::{BTreeMap, HashMap, hash_map::Entry},
        fmt::Display,
        hash::Hash,
    },
};

/// A market snapshot as published by the snapshot poller. Keys are kept as
/// the strings they were sent as; canonicalization happens in
/// [`MarketSnapshot::into_domain`].
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub pools: BTreeMap<String, Pool>,
    #[serde_as(as = "BTreeMap<_, BTreeMap<_, DecimalU256>>")]
    #[serde(default)]
    pub internal_balances_by_pool: BTreeMap<String, BTreeMap<String, U256>>,
    #[serde_as(as = "BTreeMap<_, BTreeMap<_, DecimalU256>>")]
    #[serde(default)]
    pub internal_balances_by_account: BTreeMap<String, BTreeMap<String, U256>>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub owner: String,
    #[serde(default)]
    pub trade_requests: BTreeMap<String, BTreeMap<String, TradeRequest>>,
}

#[serde_as]
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequest {
    #[serde_as(as = "HexU256")]
    pub exchange_rate: U256,
    #[serde_as(as = "HexU256")]
    pub location_b: U256,
}

impl MarketSnapshot {
    /// Parses every key into its domain type. Fails if two keys name the
    /// same pool, token or account once canonicalized, e.g. the same
    /// address in different casing.
    pub fn into_domain(self) -> Result<domain::snapshot::MarketSnapshot, Error> {
        let mut snapshot = domain::snapshot::MarketSnapshot::default();

        for (id, pool) in self.pools {
            let mut trade_requests = HashMap::new();
            for (token_a, requests) in pool.trade_requests {
                let mut row = HashMap::new();
                for (token_b, request) in requests {
                    insert_unique(
                        &mut row,
                        token_b.parse::<eth::TokenAddress>()?,
                        domain::snapshot::TradeRequest {
                            exchange_rate: ExchangeRate(request.exchange_rate),
                            location_b: request.location_b,
                        },
                    )?;
                }
                insert_unique(&mut trade_requests, token_a.parse::<eth::TokenAddress>()?, row)?;
            }
            insert_unique(
                &mut snapshot.pools,
                id.parse::<eth::PoolId>()?,
                domain::snapshot::Pool {
                    owner: pool.owner.parse()?,
                    trade_requests,
                },
            )?;
        }

        for (id, balances) in self.internal_balances_by_pool {
            insert_unique(
                &mut snapshot.internal_balances_by_pool,
                id.parse::<eth::PoolId>()?,
                balances_into_domain(balances)?,
            )?;
        }
        for (account, balances) in self.internal_balances_by_account {
            insert_unique(
                &mut snapshot.internal_balances_by_account,
                account.parse::<eth::Address>()?,
                balances_into_domain(balances)?,
            )?;
        }

        Ok(snapshot)
    }
}

fn balances_into_domain(
    balances: BTreeMap<String, U256>,
) -> Result<HashMap<eth::TokenAddress, U256>, Error> {
    let mut domain = HashMap::new();
    for (token, amount) in balances {
        insert_unique(&mut domain, token.parse::<eth::TokenAddress>()?, amount)?;
    }
    Ok(domain)
}

fn insert_unique<K, V>(map: &mut HashMap<K, V>, key: K, value: V) -> Result<(), Error>
where
    K: Eq + Hash + Display,
{
    match map.entry(key) {
        Entry::Occupied(entry) => Err(Error::DuplicateKey(entry.key().to_string())),
        Entry::Vacant(entry) => {
            entry.insert(value);
            Ok(())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Address(#[from] eth::InvalidAddress),
    #[error(transparent)]
    PoolId(#[from] eth::InvalidPoolId),
    #[error("{0} appears more than once")]
    DuplicateKey(String),
}
