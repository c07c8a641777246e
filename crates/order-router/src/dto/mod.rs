//! JSON wire format of snapshots and quotes.

mod quote;
mod snapshot;

pub use {
    quote::{Hop, Path, Quote, SwapType},
    snapshot::{Error, MarketSnapshot, Pool, TradeRequest},
};
