use {
    crate::domain::{self, eth},
    number::serialization::DecimalU256,
    primitive_types::U256,
    serde::{Deserialize, Serialize},
    serde_with::{DisplayFromStr, serde_as},
};

#[serde_as]
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub swap_type: SwapType,
    #[serde_as(as = "DecimalU256")]
    pub amount: U256,
    #[serde_as(as = "DecimalU256")]
    pub quote: U256,
    pub paths: Vec<Path>,
    #[serde_as(as = "DecimalU256")]
    pub gas_use_estimate: U256,
    #[serde_as(as = "DecimalU256")]
    pub gas_use_estimate_quote: U256,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SwapType {
    ExactIn,
    ExactOut,
}

#[serde_as]
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub token_list: Vec<eth::TokenAddress>,
    pub hops: Vec<Hop>,
}

#[serde_as]
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hop {
    #[serde(rename = "poolID")]
    #[serde_as(as = "DisplayFromStr")]
    pub pool_id: eth::PoolId,
    #[serde_as(as = "DisplayFromStr")]
    pub token_a: eth::TokenAddress,
    #[serde_as(as = "DisplayFromStr")]
    pub token_b: eth::TokenAddress,
    #[serde_as(as = "DecimalU256")]
    pub amount_in: U256,
    #[serde_as(as = "DecimalU256")]
    pub amount_out: U256,
}

impl Quote {
    pub fn from_domain(quote: &domain::quote::Quote) -> Self {
        Self {
            swap_type: quote.side.into(),
            amount: quote.amount,
            quote: quote.quote,
            paths: quote
                .paths
                .iter()
                .map(|path| Path {
                    token_list: path.token_list.clone(),
                    hops: path
                        .hops
                        .iter()
                        .map(|hop| Hop {
                            pool_id: hop.pool,
                            token_a: hop.token_a,
                            token_b: hop.token_b,
                            amount_in: hop.amount_in(),
                            amount_out: hop.amount_out(),
                        })
                        .collect(),
                })
                .collect(),
            gas_use_estimate: quote.gas.gas,
            gas_use_estimate_quote: quote.gas.quote,
        }
    }
}

impl From<domain::path::SwapType> for SwapType {
    fn from(value: domain::path::SwapType) -> Self {
        match value {
            domain::path::SwapType::ExactIn => Self::ExactIn,
            domain::path::SwapType::ExactOut => Self::ExactOut,
        }
    }
}

impl From<SwapType> for domain::path::SwapType {
    fn from(value: SwapType) -> Self {
        match value {
            SwapType::ExactIn => Self::ExactIn,
            SwapType::ExactOut => Self::ExactOut,
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::domain::{path, quote::GasEstimate},
        primitive_types::H160,
        serde_json::json,
    };

    #[test]
    fn serializes_the_wire_format() {
        let token_in = eth::TokenAddress(H160::repeat_byte(0x11));
        let token_out = eth::TokenAddress(H160::repeat_byte(0xaa));
        let quote = domain::quote::Quote {
            side: path::SwapType::ExactOut,
            amount: U256::from(50_u64),
            quote: U256::from(25_u64),
            amount_in: U256::from(25_u64),
            amount_out: U256::from(50_u64),
            paths: vec![path::Path {
                token_list: vec![token_in, token_out],
                hops: vec![path::Hop {
                    pool: eth::PoolId(U256::from(1001_u64)),
                    token_a: token_out,
                    token_b: token_in,
                    exchange_rate: Default::default(),
                    amount_a_mm: U256::from(50_u64),
                    amount_a_mt: U256::from(50_u64),
                    amount_b_mm: U256::from(24_u64),
                    amount_b_mt: U256::from(25_u64),
                    amount_b_fr: U256::from(1_u64),
                }],
                amount_in: U256::from(25_u64),
                amount_out: U256::from(50_u64),
            }],
            gas: GasEstimate {
                gas: U256::from(100_000_u64),
                quote: U256::from(3_u64),
            },
        };

        assert_eq!(
            serde_json::to_value(Quote::from_domain(&quote)).unwrap(),
            json!({
                "swapType": "exactOut",
                "amount": "50",
                "quote": "25",
                "paths": [{
                    "tokenList": [
                        "0x1111111111111111111111111111111111111111",
                        "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
                    ],
                    "hops": [{
                        "poolID": "1001",
                        "tokenA": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
                        "tokenB": "0x1111111111111111111111111111111111111111",
                        "amountIn": "25",
                        "amountOut": "50",
                    }],
                }],
                "gasUseEstimate": "100000",
                "gasUseEstimateQuote": "3",
            })
        );
    }
}
