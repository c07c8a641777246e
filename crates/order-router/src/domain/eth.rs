//! Chain primitives used by the router.
//!
//! Addresses are parsed case-insensitively and always displayed in their
//! canonical lower-case `0x` form, so two spellings of the same token can
//! never end up as two graph nodes.

use {
    derive_more::{From, Into},
    primitive_types::{H160, U256},
    std::{fmt, str::FromStr},
};

/// An ERC20 token address.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, From, Into)]
pub struct TokenAddress(pub H160);

/// An owner or internal-ledger account address.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, From, Into)]
pub struct Address(pub H160);

/// Identifier of a standing order pool.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, From, Into)]
pub struct PoolId(pub U256);

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TokenAddress {
    type Err = InvalidAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_h160(s).map(Self)
    }
}

impl FromStr for Address {
    type Err = InvalidAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_h160(s).map(Self)
    }
}

impl FromStr for PoolId {
    type Err = InvalidPoolId;

    /// Pool ids are decimal strings; a `0x` prefix selects hex instead.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = if s.starts_with("0x") || s.starts_with("0X") {
            number::serialization::parse_hex_word(s)
        } else {
            number::serialization::parse_decimal(s)
        };
        id.map(Self).ok_or_else(|| InvalidPoolId(s.to_owned()))
    }
}

fn parse_h160(s: &str) -> Result<H160, InvalidAddress> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let mut bytes = [0_u8; 20];
    hex::decode_to_slice(digits, &mut bytes).map_err(|_| InvalidAddress(s.to_owned()))?;
    Ok(H160(bytes))
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid address {0:?}")]
pub struct InvalidAddress(pub String);

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid pool id {0:?}")]
pub struct InvalidPoolId(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_are_canonicalized() {
        let mixed: TokenAddress = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2".parse().unwrap();
        let lower: TokenAddress = "c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2".parse().unwrap();
        assert_eq!(mixed, lower);
        assert_eq!(
            mixed.to_string(),
            "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
        );
    }

    #[test]
    fn rejects_malformed_addresses() {
        for s in ["", "0x", "0x1234", "0xzz2aaa39b223fe8d0a0e5c4f27ead9083c756cc2"] {
            assert!(s.parse::<TokenAddress>().is_err(), "{s:?}");
        }
    }

    #[test]
    fn pool_ids_parse_decimal_and_hex() {
        assert_eq!("1001".parse::<PoolId>().unwrap(), PoolId(1001_u64.into()));
        assert_eq!("0x3e9".parse::<PoolId>().unwrap(), PoolId(1001_u64.into()));
        assert_eq!(PoolId(1001_u64.into()).to_string(), "1001");
        assert!("-1".parse::<PoolId>().is_err());
        assert!("pool".parse::<PoolId>().is_err());
    }
}
