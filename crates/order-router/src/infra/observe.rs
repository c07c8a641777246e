//! Every log line the router emits, in one place.

use {
    crate::domain::{
        Error,
        aggregator::Request,
        graph::Graph,
        path::RoutedPath,
        quote::Quote,
    },
    itertools::Itertools,
    primitive_types::U256,
};

pub fn quoting(request: &Request) {
    tracing::debug!(
        token_in = %request.token_in,
        token_out = %request.token_out,
        amount = %request.amount,
        side = ?request.side,
        "computing quote"
    );
}

pub fn graph_built(iteration: usize, graph: &Graph) {
    tracing::trace!(iteration, edges = graph.edge_count(), "built trade graph");
}

pub fn path_extracted(iteration: usize, path: &RoutedPath, remaining: U256) {
    tracing::debug!(
        iteration,
        tokens = %path.token_list.iter().join(" -> "),
        pools = %path.pool_ids().iter().join(","),
        amount_in = %path.amount_in,
        amount_out = %path.amount_out,
        %remaining,
        "extracted path"
    );
}

pub fn dust_absorbed(iteration: usize, dust: U256) {
    tracing::debug!(iteration, %dust, "remainder too small to route, paid into last path");
}

pub fn quoted(quote: &Quote) {
    tracing::info!(
        amount = %quote.amount,
        quote = %quote.quote,
        paths = quote.paths.len(),
        gas = %quote.gas.gas,
        "computed quote"
    );
}

pub fn quote_failed(err: &Error) {
    match err {
        Error::PathNotFound { .. } | Error::IterationLimit { .. } | Error::InvalidRequest(_) => {
            tracing::info!(%err, "no quote")
        }
        Error::Overflow | Error::UnsupportedPair | Error::InvalidLocation(_) => {
            tracing::warn!(%err, "quote computation failed")
        }
    }
}
