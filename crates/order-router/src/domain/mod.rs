//! Routing domain: the components a quote flows through, leaf first.
//!
//! snapshot -> [`graph`] -> {[`path_finder`] <-> [`simulator`]} driven by
//! [`aggregator`] -> [`quote`].

pub mod aggregator;
pub mod eth;
pub mod exchange;
pub mod graph;
pub mod location;
pub mod math;
pub mod path;
pub mod path_finder;
pub mod quote;
pub mod simulator;
pub mod snapshot;

mod error;

#[cfg(test)]
pub(crate) mod testing;

pub use error::Error;
