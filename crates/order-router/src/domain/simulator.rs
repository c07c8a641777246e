use super::{Error, location::Location, path::RoutedPath, snapshot::MarketSnapshot};

/// Returns the snapshot as it would look after `path` settled. The input is
/// left untouched.
///
/// Per hop the pool pays out `amountAMM` of `tokenA`, the hop's `locationB`
/// receives `amountBMM` and the fee receiver receives `amountBFR`.
pub fn apply(
    snapshot: &MarketSnapshot,
    path: &RoutedPath,
    fee_receiver: Location,
) -> Result<MarketSnapshot, Error> {
    let mut next = snapshot.clone();
    for routed in &path.hops {
        let hop = &routed.hop;
        next.debit_pool(hop.pool, hop.token_a, hop.amount_a_mm);
        next.credit(Location::decode(routed.location_b)?, hop.token_b, hop.amount_b_mm)?;
        if !hop.amount_b_fr.is_zero() {
            next.credit(fee_receiver, hop.token_b, hop.amount_b_fr)?;
        }
    }
    Ok(next)
}
