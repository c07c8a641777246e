use {crate::domain::eth, primitive_types::U256};

/// Everything that can abort a quote computation. A failure anywhere aborts
/// the whole computation; partial quotes are never returned.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// No acyclic chain within the hop bound connects the two tokens, or
    /// liquidity ran out before the requested amount was filled.
    #[error("no route from {token_in} to {token_out}")]
    PathNotFound {
        token_in: eth::TokenAddress,
        token_out: eth::TokenAddress,
    },
    /// A rate component exceeds 128 bits or a result exceeds 256 bits.
    #[error("value does not fit in its fixed-point domain")]
    Overflow,
    /// Math was attempted on a rate that decodes to zero on one side. The
    /// graph never produces such edges, so this is an internal invariant
    /// violation rather than a user error.
    #[error("exchange rate decodes to zero")]
    UnsupportedPair,
    #[error("unknown location type tag {0:#04x}")]
    InvalidLocation(u8),
    /// The aggregator hit its extraction bound before filling the request.
    #[error("route needs more than {limit} extractions; {remaining} still unfilled")]
    IterationLimit { limit: usize, remaining: U256 },
    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),
}
