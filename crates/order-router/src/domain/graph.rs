//! Adjacency structure of usable pool edges.

use {
    super::{eth, exchange::ExchangeRate, snapshot::MarketSnapshot},
    itertools::Itertools,
    primitive_types::U256,
    std::collections::HashMap,
};

/// A tradable edge `tokenA -> tokenB` of one pool.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Edge {
    pub pool: eth::PoolId,
    pub exchange_rate: ExchangeRate,
    /// The pool's `tokenA` balance: the most a taker can receive.
    pub capacity: U256,
    pub location_b: U256,
}

/// `tokenA -> tokenB -> edges`, best rate for the taker first.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Graph(HashMap<eth::TokenAddress, HashMap<eth::TokenAddress, Vec<Edge>>>);

impl Graph {
    /// Collects every edge with a positive balance and a rate that is
    /// non-zero on both sides.
    pub fn build(snapshot: &MarketSnapshot) -> Self {
        let mut graph = HashMap::<_, HashMap<_, Vec<_>>>::new();
        for (pool, state) in &snapshot.pools {
            for (token_a, requests) in &state.trade_requests {
                let capacity = snapshot.pool_balance(pool, token_a);
                if capacity.is_zero() {
                    continue;
                }
                for (token_b, request) in requests {
                    if token_a == token_b || !request.exchange_rate.is_nonzero() {
                        continue;
                    }
                    graph
                        .entry(*token_a)
                        .or_default()
                        .entry(*token_b)
                        .or_default()
                        .push(Edge {
                            pool: *pool,
                            exchange_rate: request.exchange_rate,
                            capacity,
                            location_b: request.location_b,
                        });
                }
            }
        }

        for edges in graph.values_mut().flat_map(HashMap::values_mut) {
            edges.sort_by(|a, b| {
                b.exchange_rate
                    .cmp_for_taker(&a.exchange_rate)
                    .then_with(|| a.pool.cmp(&b.pool))
            });
        }

        Self(graph)
    }

    pub fn edges(&self, token_a: &eth::TokenAddress, token_b: &eth::TokenAddress) -> &[Edge] {
        self.0
            .get(token_a)
            .and_then(|edges| edges.get(token_b))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn best_edge(
        &self,
        token_a: &eth::TokenAddress,
        token_b: &eth::TokenAddress,
    ) -> Option<&Edge> {
        self.edges(token_a, token_b).first()
    }

    /// Tokens a taker can pay to receive `token_a`, in ascending order.
    pub fn counter_tokens(&self, token_a: &eth::TokenAddress) -> Vec<eth::TokenAddress> {
        self.0
            .get(token_a)
            .map(|edges| edges.keys().copied().sorted().collect())
            .unwrap_or_default()
    }

    pub fn edge_count(&self) -> usize {
        self.0.values().flat_map(HashMap::values).map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::domain::testing::{Snapshot, amount, pool_id, token},
    };

    #[test]
    fn skips_empty_pools_and_zero_rates() {
        let snapshot = Snapshot::default()
            .edge(1, 1, 2, (1, 1), 10)
            .edge(2, 1, 2, (1, 1), 0)
            .edge(3, 1, 2, (0, 1), 10)
            .edge(4, 1, 2, (1, 0), 10)
            .edge(5, 1, 1, (1, 1), 10)
            .build();

        let graph = Graph::build(&snapshot);

        assert_eq!(graph.edge_count(), 1);
        let edge = graph.best_edge(&token(1), &token(2)).unwrap();
        assert_eq!(edge.pool, pool_id(1));
        assert_eq!(edge.capacity, amount(10));
        assert!(graph.best_edge(&token(2), &token(1)).is_none());
    }

    #[test]
    fn sorts_by_rate_then_pool_id() {
        let snapshot = Snapshot::default()
            .edge(1, 1, 2, (1, 1), 10)
            .edge(2, 1, 2, (2, 2), 10)
            .edge(3, 1, 2, (3, 2), 10)
            .edge(4, 1, 2, (1, 2), 10)
            .build();

        let graph = Graph::build(&snapshot);

        let pools = graph
            .edges(&token(1), &token(2))
            .iter()
            .map(|edge| edge.pool)
            .collect::<Vec<_>>();
        assert_eq!(pools, vec![pool_id(3), pool_id(1), pool_id(2), pool_id(4)]);
    }

    #[test]
    fn building_twice_yields_the_same_graph() {
        let snapshot = Snapshot::default()
            .edge(1, 1, 2, (1, 1), 10)
            .edge(1, 2, 1, (1, 1), 10)
            .edge(2, 3, 2, (5, 7), 10)
            .edge(3, 3, 2, (5, 7), 10)
            .build();

        assert_eq!(Graph::build(&snapshot), Graph::build(&snapshot));
        assert_eq!(
            Graph::build(&snapshot).counter_tokens(&token(3)),
            vec![token(2)]
        );
    }
}
