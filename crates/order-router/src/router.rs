use {
    crate::{
        domain::{
            Error,
            aggregator::{self, Request},
            quote::{self, Quote},
            snapshot::MarketSnapshot,
        },
        infra::{config::Config, observe},
    },
    std::sync::Arc,
};

/// Computes quotes against caller-supplied snapshots.
///
/// A router holds no mutable state. Every quote works on its own copy of
/// the snapshot, so one router can serve concurrent callers.
#[derive(Clone, Debug, Default)]
pub struct Router(Arc<Config>);

impl Router {
    pub fn new(config: Config) -> Self {
        Self(Arc::new(config))
    }

    pub fn config(&self) -> &Config {
        &self.0
    }

    pub fn quote(&self, request: &Request, snapshot: &MarketSnapshot) -> Result<Quote, Error> {
        let span = tracing::info_span!(
            "quote",
            token_in = %request.token_in,
            token_out = %request.token_out,
            side = ?request.side,
        );
        let _entered = span.enter();

        observe::quoting(request);
        let result = aggregator::aggregate(request, snapshot, &self.0.parameters)
            .and_then(|paths| quote::build(request, paths, &self.0.gas));
        match &result {
            Ok(quote) => observe::quoted(quote),
            Err(err) => observe::quote_failed(err),
        }
        result
    }
}
