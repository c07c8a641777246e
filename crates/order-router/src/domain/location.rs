//! Where tokens live: packed into one word whose top byte is a type tag.

use {
    super::{Error, eth},
    primitive_types::{H160, U256},
};

const EXTERNAL_ADDRESS: u8 = 0x01;
const INTERNAL_ACCOUNT: u8 = 0x02;
const POOL: u8 = 0x03;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Location {
    /// A wallet outside the settlement ledger. Balances sent here leave the
    /// simulated snapshot.
    ExternalAddress(eth::Address),
    /// An account of the internal ledger.
    InternalAccount(eth::Address),
    /// Another pool's internal balance.
    Pool(eth::PoolId),
}

impl Default for Location {
    fn default() -> Self {
        Self::ExternalAddress(eth::Address::default())
    }
}

impl Location {
    /// Addresses occupy the low 20 bytes, pool ids the low 31 bytes. Fails
    /// with [`Error::Overflow`] for pool ids that collide with the tag byte.
    pub fn encode(&self) -> Result<U256, Error> {
        let mut word = [0_u8; 32];
        match self {
            Self::ExternalAddress(address) | Self::InternalAccount(address) => {
                word[12..].copy_from_slice(address.0.as_bytes());
            }
            Self::Pool(id) => {
                id.0.to_big_endian(&mut word);
                if word[0] != 0 {
                    return Err(Error::Overflow);
                }
            }
        }
        word[0] = match self {
            Self::ExternalAddress(_) => EXTERNAL_ADDRESS,
            Self::InternalAccount(_) => INTERNAL_ACCOUNT,
            Self::Pool(_) => POOL,
        };
        Ok(U256::from_big_endian(&word))
    }

    pub fn decode(word: U256) -> Result<Self, Error> {
        let mut bytes = [0_u8; 32];
        word.to_big_endian(&mut bytes);
        let tag = bytes[0];
        bytes[0] = 0;
        let address = || eth::Address(H160::from_slice(&bytes[12..]));
        match tag {
            EXTERNAL_ADDRESS => Ok(Self::ExternalAddress(address())),
            INTERNAL_ACCOUNT => Ok(Self::InternalAccount(address())),
            POOL => Ok(Self::Pool(eth::PoolId(U256::from_big_endian(&bytes)))),
            tag => Err(Error::InvalidLocation(tag)),
        }
    }
}
