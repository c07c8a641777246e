//! Bounded-depth search for token chains and per-chain amount resolution.
//!
//! Chains are searched backwards from `tokenOut`: a graph entry
//! `tokenA -> tokenB` means a taker paying `tokenB` receives `tokenA`, so the
//! counter tokens of the current token are exactly the tokens one hop closer
//! to `tokenIn`.
//!
//! Resolution walks a chain twice. The first pass runs from `tokenOut`
//! towards `tokenIn`, asking every hop for what its successor needs and
//! clamping hops that cannot supply it. The second pass replays every hop
//! after the clamp nearest `tokenIn` from the amount that clamp actually
//! delivers. Downstream amounts can only shrink in the second pass, so no
//! hop is ever pushed past its capacity and one pass suffices.
//!
//! A hop whose first-pass input does not fit in 256 bits is left unbounded:
//! its successor's demand can only be met by clamping some hop upstream, and
//! the second pass recomputes it from there.

use {
    super::{
        Error,
        eth,
        exchange::{self, FeePpm, TakerAmounts},
        graph::Graph,
        path::{Hop, RoutedHop, RoutedPath, SwapType},
    },
    primitive_types::U256,
    std::cmp::Ordering,
};

/// Most hops a chain may have: four tokens.
pub const MAX_HOPS: usize = 3;

/// One extraction of the aggregation loop.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Extraction {
    pub token_in: eth::TokenAddress,
    pub token_out: eth::TokenAddress,
    /// What is still left to route, in `tokenIn` for exact-input requests
    /// and in `tokenOut` for exact-output requests.
    pub bound: U256,
    pub side: SwapType,
}

/// What resolving one chain against an extraction yields.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    Path(RoutedPath),
    /// The chain has liquidity, but the exact-input bound buys less than one
    /// unit of `tokenOut` through it.
    Dust,
    /// The chain cannot move anything.
    Unusable,
}

/// Returns the best fully resolved path for `extraction`, or `None` when
/// the only liquidity left is out of reach of an exact-input remainder too
/// small to buy a single unit of `tokenOut`.
pub fn find_best_path(
    graph: &Graph,
    extraction: &Extraction,
    fee: FeePpm,
    max_hops: usize,
) -> Result<Option<RoutedPath>, Error> {
    let not_found = || Error::PathNotFound {
        token_in: extraction.token_in,
        token_out: extraction.token_out,
    };

    let candidates = search(graph, extraction.token_in, extraction.token_out, max_hops);
    if candidates.is_empty() {
        return Err(not_found());
    }

    let mut best: Option<RoutedPath> = None;
    let mut dust = false;
    for tokens in &candidates {
        let path = match resolve(graph, tokens, extraction, fee)? {
            Resolution::Path(path) => path,
            Resolution::Dust => {
                dust = true;
                continue;
            }
            Resolution::Unusable => continue,
        };
        best = match best {
            Some(current) if compare(&current, &path) != Ordering::Less => Some(current),
            _ => Some(path),
        };
    }
    match best {
        Some(path) => Ok(Some(path)),
        None if dust => Ok(None),
        None => Err(not_found()),
    }
}

/// Every cycle-free token chain of at most `max_hops` hops connecting the
/// two tokens, each ordered from `token_in` to `token_out`.
pub fn search(
    graph: &Graph,
    token_in: eth::TokenAddress,
    token_out: eth::TokenAddress,
    max_hops: usize,
) -> Vec<Vec<eth::TokenAddress>> {
    let mut chains = Vec::new();
    if token_in != token_out && max_hops > 0 {
        let mut chain = vec![token_out];
        extend(graph, token_in, max_hops, &mut chain, &mut chains);
    }
    chains
}

fn extend(
    graph: &Graph,
    token_in: eth::TokenAddress,
    max_hops: usize,
    chain: &mut Vec<eth::TokenAddress>,
    chains: &mut Vec<Vec<eth::TokenAddress>>,
) {
    let Some(&current) = chain.last() else {
        return;
    };
    for next in graph.counter_tokens(&current) {
        if chain.contains(&next) {
            continue;
        }
        if next == token_in {
            let mut found = chain.clone();
            found.push(next);
            found.reverse();
            chains.push(found);
        } else if chain.len() < max_hops {
            chain.push(next);
            extend(graph, token_in, max_hops, chain, chains);
            chain.pop();
        }
    }
}

/// Resolves the amounts of one chain against the best edge of every hop.
pub fn resolve(
    graph: &Graph,
    tokens: &[eth::TokenAddress],
    extraction: &Extraction,
    fee: FeePpm,
) -> Result<Resolution, Error> {
    let mut edges = Vec::with_capacity(tokens.len().saturating_sub(1));
    for pair in tokens.windows(2) {
        let Some(edge) = graph.best_edge(&pair[1], &pair[0]) else {
            return Ok(Resolution::Unusable);
        };
        edges.push(edge);
    }
    let Some(last) = edges.last() else {
        return Ok(Resolution::Unusable);
    };

    // Pass 1: from tokenOut towards tokenIn.
    let mut amounts = vec![TakerAmounts::default(); edges.len()];
    let mut anchor = None;
    let mut unbounded = false;
    let mut wanted = match extraction.side {
        SwapType::ExactIn => last.capacity,
        SwapType::ExactOut => extraction.bound,
    };
    for (i, edge) in edges.iter().enumerate().rev() {
        if wanted > edge.capacity || unbounded {
            anchor = Some(i);
        }
        let amount_a = wanted.min(edge.capacity);
        (amounts[i], unbounded) =
            match exchange::taker_exact_in(amount_a, edge.exchange_rate, fee) {
                Ok(hop) => (hop, false),
                Err(Error::Overflow) => (unbounded_amounts(amount_a), true),
                Err(err) => return Err(err),
            };
        wanted = amounts[i].amount_b_mt;
    }
    let reachable = amounts[edges.len() - 1].amount_a_mt;

    // An exact-input bound is denominated in tokenIn, so it can only pin
    // the first hop.
    let pinned = extraction.side == SwapType::ExactIn
        && (unbounded || amounts[0].amount_b_mt > extraction.bound);
    if pinned {
        amounts[0] = exchange::taker_exact_out(extraction.bound, edges[0].exchange_rate, fee)?
            .cap_amount_a(amounts[0].amount_a_mm);
        anchor = Some(0);
    } else if unbounded {
        // The output would cost more tokenIn than a word can hold.
        return Ok(Resolution::Unusable);
    }

    // Pass 2: replay everything past the anchor from what it delivers.
    if let Some(anchor) = anchor {
        for i in anchor + 1..edges.len() {
            amounts[i] = exchange::taker_exact_out(
                amounts[i - 1].amount_a_mt,
                edges[i].exchange_rate,
                fee,
            )?
            .cap_amount_a(amounts[i].amount_a_mm);
        }
    }

    let amount_in = amounts[0].amount_b_mt;
    let amount_out = amounts[edges.len() - 1].amount_a_mt;
    if amount_in.is_zero() || amount_out.is_zero() {
        return Ok(if pinned && !reachable.is_zero() {
            Resolution::Dust
        } else {
            Resolution::Unusable
        });
    }

    let hops = tokens
        .windows(2)
        .zip(&edges)
        .zip(amounts)
        .map(|((pair, edge), amounts)| RoutedHop {
            hop: Hop::new(edge, pair[1], pair[0], amounts),
            capacity: edge.capacity,
            location_b: edge.location_b,
        })
        .collect();

    Ok(Resolution::Path(RoutedPath {
        token_list: tokens.to_vec(),
        hops,
        amount_in,
        amount_out,
    }))
}

/// Stands in for a hop whose `tokenB` requirement overflows. Whatever asks
/// for more than it can supply is clamped, so these figures never settle.
fn unbounded_amounts(amount_a: U256) -> TakerAmounts {
    TakerAmounts {
        amount_a_mm: amount_a,
        amount_a_mt: amount_a,
        amount_b_mm: U256::MAX,
        amount_b_mt: U256::MAX,
        amount_b_fr: U256::zero(),
    }
}

/// Orders resolved paths so that the preferred one is `Greater`: the higher
/// `amountOut / amountIn`, then fewer hops, then the smaller token list and
/// pool ids.
fn compare(a: &RoutedPath, b: &RoutedPath) -> Ordering {
    a.amount_out
        .full_mul(b.amount_in)
        .cmp(&b.amount_out.full_mul(a.amount_in))
        .then_with(|| b.hops.len().cmp(&a.hops.len()))
        .then_with(|| b.token_list.cmp(&a.token_list))
        .then_with(|| b.pool_ids().cmp(&a.pool_ids()))
}
