//! Pro-rata allocation of an incoming order against one price level.
//!
//! The first pass hands each resting order `floor(resting_size * ratio)`
//! where `ratio = incoming_size / level_total`, clamped by the resting
//! order's size and by what the incoming order still wants. Floor rounding
//! can strand up to one unit per resting order, so a single follow-up fill
//! against the largest post-pass remainder absorbs whatever is left (strict
//! `>` tracking, so the earliest arrival wins ties among equal remainders).
//!
//! Fully consumed resting orders are removed during the pass itself; the
//! level's shift-remove keeps the iteration cursor valid and the arrival
//! order intact.

use crate::book::locator::OrderLocator;
use crate::book::price_level::PriceLevel;
use crate::types::{Side, Trade};

/// Match `incoming_size` against the resting orders at `level`, pro rata.
///
/// Mutates the incoming size, the level, and the locator (removals of
/// consumed resting orders), and appends one [`Trade`] per executed fill.
/// Returns with `*incoming_size > 0` only when the level ran out of
/// liquidity; the caller decides whether to move to the next level or rest
/// the residual.
pub(crate) fn execute_pro_rata(
    symbol: &str,
    side: Side,
    incoming_size: &mut i32,
    level: &mut PriceLevel,
    locator: &mut OrderLocator,
    trades: &mut Vec<Trade>,
) {
    let available = level.total_size();
    if available == 0 {
        return;
    }
    // Snapshot the ratio before any fill mutates the level.
    let ratio = *incoming_size as f64 / available as f64;

    let mut largest_id: Option<u64> = None;
    let mut largest_capacity = 0;

    let mut index = 0;
    while index < level.len() && *incoming_size > 0 {
        let Some((id, order)) = level.get_index(index) else {
            break;
        };
        let resting_size = order.size;
        let resting_trader = order.trader.clone();

        let fill = ((resting_size as f64 * ratio).floor() as i32)
            .min(resting_size)
            .min(*incoming_size);

        if fill > 0 {
            level.fill_index(index, fill);
            *incoming_size -= fill;
            trades.push(Trade::new(
                symbol,
                side,
                fill,
                level.price(),
                resting_trader,
                false,
            ));
        }

        let remaining = resting_size - fill;
        if remaining > largest_capacity {
            largest_capacity = remaining;
            largest_id = Some(id);
        }

        if remaining == 0 {
            level.remove_index(index);
            locator.remove(id);
        } else {
            index += 1;
        }
    }

    // Absorb the floor-rounding remainder with a single fill against the
    // largest surviving resting order.
    if *incoming_size == 0 {
        return;
    }
    let Some(id) = largest_id else { return };
    let Some(order) = level.get(id) else { return };
    if order.size == 0 {
        return;
    }

    let final_fill = (*incoming_size).min(order.size);
    let resting_trader = order.trader.clone();
    let remaining = level.fill(id, final_fill).unwrap_or(0);
    *incoming_size -= final_fill;
    trades.push(Trade::new(
        symbol,
        side,
        final_fill,
        level.price(),
        resting_trader,
        true,
    ));

    if remaining == 0 {
        level.remove(id);
        locator.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Order;

    fn level_with(entries: &[(u64, &str, i32)], price: i32) -> (PriceLevel, OrderLocator) {
        let mut level = PriceLevel::new(price);
        let mut locator = OrderLocator::new();
        for &(id, trader, size) in entries {
            level
                .insert(
                    id,
                    Order {
                        trader: trader.to_string(),
                        size,
                    },
                )
                .unwrap();
            locator.insert(id, Side::Ask, price).unwrap();
        }
        (level, locator)
    }

    fn run(
        incoming: i32,
        level: &mut PriceLevel,
        locator: &mut OrderLocator,
    ) -> (i32, Vec<Trade>) {
        let mut remaining = incoming;
        let mut trades = Vec::new();
        execute_pro_rata("NVDA", Side::Bid, &mut remaining, level, locator, &mut trades);
        (remaining, trades)
    }

    #[test]
    fn test_proportional_split_exact() {
        // 50/30/20 resting, incoming 40: ratio 0.4 gives 20/12/8 with no
        // remainder, so no tie-breaker fires.
        let (mut level, mut locator) =
            level_with(&[(1, "A", 50), (2, "B", 30), (3, "C", 20)], 100);

        let (remaining, trades) = run(40, &mut level, &mut locator);

        assert_eq!(remaining, 0);
        let fills: Vec<(i32, &str, bool)> = trades
            .iter()
            .map(|t| (t.size, t.resting_trader.as_str(), t.tie_breaker))
            .collect();
        assert_eq!(
            fills,
            vec![(20, "A", false), (12, "B", false), (8, "C", false)]
        );

        assert_eq!(level.get(1).unwrap().size, 30);
        assert_eq!(level.get(2).unwrap().size, 18);
        assert_eq!(level.get(3).unwrap().size, 12);
        assert_eq!(level.total_size(), 60);
        assert_eq!(locator.len(), 3);
    }

    #[test]
    fn test_tie_breaker_absorbs_rounding_loss() {
        // Three resting orders of 10, incoming 10: each floored fill is 3,
        // leaving one unit for the tie-breaker. All remainders tie at 7, so
        // the earliest arrival takes the extra unit.
        let (mut level, mut locator) =
            level_with(&[(1, "A", 10), (2, "B", 10), (3, "C", 10)], 100);

        let (remaining, trades) = run(10, &mut level, &mut locator);

        assert_eq!(remaining, 0);
        assert_eq!(trades.len(), 4);
        let fills: Vec<(i32, &str, bool)> = trades
            .iter()
            .map(|t| (t.size, t.resting_trader.as_str(), t.tie_breaker))
            .collect();
        assert_eq!(
            fills,
            vec![(3, "A", false), (3, "B", false), (3, "C", false), (1, "A", true)]
        );

        assert_eq!(level.get(1).unwrap().size, 6);
        assert_eq!(level.get(2).unwrap().size, 7);
        assert_eq!(level.get(3).unwrap().size, 7);
    }

    #[test]
    fn test_incoming_larger_than_level() {
        // Incoming 8 against a single resting 5: ratio 1.6 floors to 8 but
        // clamps to the resting size. The level drains and the residual
        // comes back to the caller.
        let (mut level, mut locator) = level_with(&[(1, "A", 5)], 100);

        let (remaining, trades) = run(8, &mut level, &mut locator);

        assert_eq!(remaining, 3);
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].size, 5);
        assert!(!trades[0].tie_breaker);
        assert!(level.is_empty());
        assert!(!locator.contains(1));
    }

    #[test]
    fn test_consumed_orders_removed_mid_pass() {
        // Incoming equals the level total: every resting order drains and
        // is removed without disturbing the ones after it.
        let (mut level, mut locator) =
            level_with(&[(1, "A", 10), (2, "B", 20), (3, "C", 30)], 100);

        let (remaining, trades) = run(60, &mut level, &mut locator);

        assert_eq!(remaining, 0);
        assert!(level.is_empty());
        assert!(locator.is_empty());
        let against: Vec<&str> = trades.iter().map(|t| t.resting_trader.as_str()).collect();
        assert_eq!(against, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_no_zero_fills_emitted() {
        // Incoming 1 against 100 resting across two orders: both floored
        // fills are 0, so the whole unit goes through the tie-breaker.
        let (mut level, mut locator) = level_with(&[(1, "A", 60), (2, "B", 40)], 100);

        let (remaining, trades) = run(1, &mut level, &mut locator);

        assert_eq!(remaining, 0);
        assert_eq!(trades.len(), 1);
        assert!(trades[0].tie_breaker);
        assert_eq!(trades[0].resting_trader, "A");
        assert_eq!(trades[0].size, 1);
        assert!(trades.iter().all(|t| t.size > 0));
        assert_eq!(level.get(1).unwrap().size, 59);
    }

    #[test]
    fn test_tie_breaker_picks_largest_remainder() {
        // 9/5 resting, incoming 7: ratio 0.5 fills 4/2, remainders 5/3.
        // The larger remainder (A) absorbs the last unit.
        let (mut level, mut locator) = level_with(&[(1, "A", 9), (2, "B", 5)], 100);

        let (remaining, trades) = run(7, &mut level, &mut locator);

        assert_eq!(remaining, 0);
        let last = trades.last().unwrap();
        assert!(last.tie_breaker);
        assert_eq!(last.resting_trader, "A");
        assert_eq!(last.size, 1);
        assert_eq!(level.get(1).unwrap().size, 4);
        assert_eq!(level.get(2).unwrap().size, 3);
    }

    #[test]
    fn test_mass_conserved_within_call() {
        let (mut level, mut locator) =
            level_with(&[(1, "A", 17), (2, "B", 23), (3, "C", 11)], 100);
        let before = level.total_size();

        let (remaining, trades) = run(29, &mut level, &mut locator);

        let filled: i32 = trades.iter().map(|t| t.size).sum();
        assert_eq!(filled, 29 - remaining);
        assert_eq!(level.total_size(), before - filled);
    }

    #[test]
    fn test_empty_level_is_a_no_op() {
        let (mut level, mut locator) = level_with(&[], 100);

        let (remaining, trades) = run(10, &mut level, &mut locator);

        assert_eq!(remaining, 10);
        assert!(trades.is_empty());
    }
}
