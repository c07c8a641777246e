//! Local order router.
//!
//! Finds how to fill a token trade against a snapshot of standing order
//! pools. Every pool edge trades at a fixed packed exchange rate and has a
//! finite balance, so a single route is rarely enough: the router extracts
//! the best path it can find, simulates the depletion that path causes, and
//! repeats until the requested amount is filled. All amounts are computed
//! with the same integer rounding rules the settlement contract applies.
//!
//! The crate is pure computation. Snapshots arrive already fetched (see
//! [`dto::MarketSnapshot`]), and quotes leave as values (see [`dto::Quote`]).

pub mod domain;
pub mod dto;
pub mod infra;
mod router;

pub use {
    domain::{
        Error,
        aggregator::Request,
        path::SwapType,
        quote::Quote,
        snapshot::MarketSnapshot,
    },
    infra::config::Config,
    router::Router,
};
