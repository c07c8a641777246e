//! Splits a request across as many paths as it takes to fill it.

use {
    super::{
        Error,
        eth,
        exchange::FeePpm,
        graph::Graph,
        location::Location,
        path::{Path, SwapType},
        path_finder::{self, Extraction, MAX_HOPS},
        simulator,
        snapshot::MarketSnapshot,
    },
    crate::infra::observe,
    primitive_types::U256,
    std::borrow::Cow,
};

/// A trade to be routed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Request {
    pub token_in: eth::TokenAddress,
    pub token_out: eth::TokenAddress,
    /// Amount of `tokenIn` for exact-input, `tokenOut` for exact-output.
    pub amount: U256,
    pub side: SwapType,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Parameters {
    /// Longest chain considered, in hops.
    pub max_hops: usize,
    /// Most paths a single request may be split into.
    pub max_iterations: usize,
    pub fees: Fees,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Fees {
    pub fee: FeePpm,
    pub receiver: Location,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            max_hops: MAX_HOPS,
            max_iterations: 32,
            fees: Fees::default(),
        }
    }
}

/// Extracts best paths one after the other, depleting a private copy of
/// the snapshot in between, until the whole amount is routed.
///
/// Running out of liquidity surfaces as [`Error::PathNotFound`]; nothing is
/// returned for a partially filled request. An exact-input remainder that
/// cannot buy a single unit of `tokenOut` anywhere is paid into the last
/// path instead.
pub fn aggregate(
    request: &Request,
    snapshot: &MarketSnapshot,
    parameters: &Parameters,
) -> Result<Vec<Path>, Error> {
    if request.token_in == request.token_out {
        return Err(Error::InvalidRequest("tokenIn and tokenOut are the same token"));
    }
    if request.amount.is_zero() {
        return Err(Error::InvalidRequest("amount must be positive"));
    }

    let mut working = Cow::Borrowed(snapshot);
    let mut remaining = request.amount;
    let mut paths: Vec<Path> = Vec::new();
    while !remaining.is_zero() {
        if paths.len() == parameters.max_iterations {
            return Err(Error::IterationLimit {
                limit: parameters.max_iterations,
                remaining,
            });
        }

        let graph = Graph::build(&working);
        observe::graph_built(paths.len(), &graph);
        let extraction = Extraction {
            token_in: request.token_in,
            token_out: request.token_out,
            bound: remaining,
            side: request.side,
        };
        let Some(path) = path_finder::find_best_path(
            &graph,
            &extraction,
            parameters.fees.fee,
            parameters.max_hops,
        )?
        else {
            let iteration = paths.len();
            let Some(last) = paths.last_mut() else {
                return Err(Error::PathNotFound {
                    token_in: request.token_in,
                    token_out: request.token_out,
                });
            };
            observe::dust_absorbed(iteration, remaining);
            last.absorb(remaining)?;
            break;
        };

        let consumed = match request.side {
            SwapType::ExactIn => path.amount_in,
            SwapType::ExactOut => path.amount_out,
        };
        remaining = remaining.saturating_sub(consumed);
        observe::path_extracted(paths.len(), &path, remaining);

        if !remaining.is_zero() {
            working = Cow::Owned(simulator::apply(&working, &path, parameters.fees.receiver)?);
        }
        paths.push(path.strip());
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::domain::testing::{Snapshot, amount, pool_id, token},
        proptest::prelude::*,
    };

    fn request(value: u64, side: SwapType) -> Request {
        Request {
            token_in: token(1),
            token_out: token(2),
            amount: amount(value),
            side,
        }
    }

    #[test]
    fn splits_across_pools_of_equal_rate() {
        let snapshot = Snapshot::default()
            .edge(1, 2, 1, (1, 1), 60)
            .edge(2, 2, 1, (1, 1), 40)
            .build();

        let paths = aggregate(
            &request(100, SwapType::ExactIn),
            &snapshot,
            &Parameters::default(),
        )
        .unwrap();

        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].hops[0].pool, pool_id(1));
        assert_eq!(paths[0].amount_in, amount(60));
        assert_eq!(paths[1].hops[0].pool, pool_id(2));
        assert_eq!(paths[1].amount_in, amount(40));
        let total = paths.iter().fold(U256::zero(), |sum, path| sum + path.amount_out);
        assert_eq!(total, amount(100));
    }

    #[test]
    fn exact_out_fills_the_output() {
        // Pool 1 is better but small; pool 2 covers the rest.
        let snapshot = Snapshot::default()
            .edge(1, 2, 1, (2, 1), 50)
            .edge(2, 2, 1, (1, 1), 1_000)
            .build();

        let paths = aggregate(
            &request(120, SwapType::ExactOut),
            &snapshot,
            &Parameters::default(),
        )
        .unwrap();

        let outs = paths.iter().map(|path| path.amount_out).collect::<Vec<_>>();
        let ins = paths.iter().map(|path| path.amount_in).collect::<Vec<_>>();
        assert_eq!(outs, vec![amount(50), amount(70)]);
        assert_eq!(ins, vec![amount(25), amount(70)]);
    }

    #[test]
    fn insufficient_liquidity_is_path_not_found() {
        let snapshot = Snapshot::default()
            .edge(1, 2, 1, (1, 1), 60)
            .edge(2, 2, 1, (1, 1), 40)
            .build();

        assert_eq!(
            aggregate(
                &request(101, SwapType::ExactIn),
                &snapshot,
                &Parameters::default()
            ),
            Err(Error::PathNotFound {
                token_in: token(1),
                token_out: token(2),
            })
        );
    }

    #[test]
    fn exact_in_dust_is_paid_into_the_last_path() {
        // Three token 1 per token 2: pool 1 takes 99 of the 100 for 33, and
        // the last unit buys nothing from pool 2.
        let snapshot = Snapshot::default()
            .edge(1, 2, 1, (1, 3), 33)
            .edge(2, 2, 1, (1, 3), 1_000)
            .build();

        let paths = aggregate(
            &request(100, SwapType::ExactIn),
            &snapshot,
            &Parameters::default(),
        )
        .unwrap();

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].hops[0].pool, pool_id(1));
        assert_eq!(paths[0].amount_in, amount(100));
        assert_eq!(paths[0].amount_out, amount(33));
        assert_eq!(paths[0].hops[0].amount_b_mm, amount(100));
        assert_eq!(paths[0].hops[0].amount_b_mt, amount(100));
        assert_eq!(paths[0].hops[0].amount_a_mt, amount(33));
    }

    #[test]
    fn too_small_to_buy_anything_is_path_not_found() {
        let snapshot = Snapshot::default().edge(1, 2, 1, (1, 3), 1_000).build();

        assert_eq!(
            aggregate(
                &request(2, SwapType::ExactIn),
                &snapshot,
                &Parameters::default()
            ),
            Err(Error::PathNotFound {
                token_in: token(1),
                token_out: token(2),
            })
        );
    }

    #[test]
    fn stops_at_the_iteration_limit() {
        let mut snapshot = Snapshot::default();
        for pool in 1..=5 {
            snapshot = snapshot.edge(pool, 2, 1, (1, 1), 1);
        }

        let parameters = Parameters {
            max_iterations: 3,
            ..Default::default()
        };
        assert_eq!(
            aggregate(
                &request(5, SwapType::ExactIn),
                &snapshot.build(),
                &parameters
            ),
            Err(Error::IterationLimit {
                limit: 3,
                remaining: amount(2),
            })
        );
    }

    #[test]
    fn rejects_degenerate_requests() {
        let snapshot = Snapshot::default().edge(1, 2, 1, (1, 1), 60).build();
        let parameters = Parameters::default();

        let mut same = request(10, SwapType::ExactIn);
        same.token_out = same.token_in;
        assert!(matches!(
            aggregate(&same, &snapshot, &parameters),
            Err(Error::InvalidRequest(_))
        ));
        assert!(matches!(
            aggregate(&request(0, SwapType::ExactOut), &snapshot, &parameters),
            Err(Error::InvalidRequest(_))
        ));
    }

    proptest! {
        #[test]
        fn aggregation_is_deterministic_and_exact(
            pools in prop::collection::vec((1..1_000_u64, 1..10_u128, 1..10_u128), 1..6),
            value in 1..3_000_u64,
            exact_in in any::<bool>(),
        ) {
            let mut snapshot = Snapshot::default();
            for (pool, (balance, x1, x2)) in (1..).zip(pools) {
                snapshot = snapshot.edge(pool, 2, 1, (x1, x2), balance);
            }
            let snapshot = snapshot.build();
            let side = if exact_in { SwapType::ExactIn } else { SwapType::ExactOut };
            let request = request(value, side);

            let first = aggregate(&request, &snapshot, &Parameters::default());
            let second = aggregate(&request, &snapshot, &Parameters::default());
            prop_assert_eq!(&first, &second);

            if let Ok(paths) = first {
                let consumed = paths.iter().fold(U256::zero(), |sum, path| {
                    sum + match side {
                        SwapType::ExactIn => path.amount_in,
                        SwapType::ExactOut => path.amount_out,
                    }
                });
                prop_assert_eq!(consumed, amount(value));
            }
        }
    }
}
