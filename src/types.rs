//! Core order, trade, and snapshot types.
//!
//! Prices and sizes are plain integers: one price unit is one tick, one size
//! unit is one share/contract. Sizes are strictly positive at submission and
//! shrink as fills execute; an order that reaches zero size ceases to exist.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side (bid or ask)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy order (bid)
    Bid,
    /// Sell order (ask)
    Ask,
}

impl Side {
    /// Side from a buy flag.
    #[inline]
    pub fn from_is_buy(is_buy: bool) -> Self {
        if is_buy {
            Side::Bid
        } else {
            Side::Ask
        }
    }

    /// Check if this is the buy side.
    #[inline(always)]
    pub fn is_buy(self) -> bool {
        matches!(self, Side::Bid)
    }

    /// Returns the opposite side.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }

    /// Direction tag used in the trade line format.
    #[inline]
    pub fn direction_tag(self) -> &'static str {
        match self {
            Side::Bid => "BUY",
            Side::Ask => "SELL",
        }
    }
}

/// A new order submission.
///
/// This is the ingress message: it carries everything the book needs to
/// validate and route one order. After acceptance only the trader label and
/// the remaining size are retained on the book (see [`Order`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Unique order identifier (assigned by the caller)
    pub id: u64,

    /// Opaque trader label, echoed back in trade events
    pub trader: String,

    /// Instrument symbol; must match the receiving book's symbol
    pub symbol: String,

    /// Order side (bid or ask)
    pub side: Side,

    /// Order size in shares/contracts (strictly positive)
    pub size: i32,

    /// Limit price in ticks (non-negative)
    pub price: i32,
}

impl OrderRequest {
    /// Create a new order submission.
    pub fn new(
        id: u64,
        trader: impl Into<String>,
        symbol: impl Into<String>,
        side: Side,
        size: i32,
        price: i32,
    ) -> Self {
        Self {
            id,
            trader: trader.into(),
            symbol: symbol.into(),
            side,
            size,
            price,
        }
    }

    /// Create a buy submission.
    pub fn buy(
        id: u64,
        trader: impl Into<String>,
        symbol: impl Into<String>,
        size: i32,
        price: i32,
    ) -> Self {
        Self::new(id, trader, symbol, Side::Bid, size, price)
    }

    /// Create a sell submission.
    pub fn sell(
        id: u64,
        trader: impl Into<String>,
        symbol: impl Into<String>,
        size: i32,
        price: i32,
    ) -> Self {
        Self::new(id, trader, symbol, Side::Ask, size, price)
    }
}

/// A resting order stored inside a price level.
///
/// Minimal representation: the order id is the level's map key, and the side
/// and price are implied by the owning level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Opaque trader label
    pub trader: String,
    /// Remaining size
    pub size: i32,
}

/// One executed fill.
///
/// The side is the aggressor's direction; the resting counterparty is
/// identified by its trader label. `Display` renders the line format:
///
/// ```text
/// TRADE: <symbol> <BUY|SELL> <size> @ <price> against <resting_trader>
/// ```
///
/// with a ` (tie-breaker)` suffix on the rounding-remainder fill of a
/// pro-rata pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Instrument symbol
    pub symbol: String,

    /// Aggressor (incoming order) direction
    pub side: Side,

    /// Fill size (strictly positive)
    pub size: i32,

    /// Execution price (the resting level's price)
    pub price: i32,

    /// Trader label of the resting counterparty
    pub resting_trader: String,

    /// True for the single remainder fill after the floored pro-rata pass
    pub tie_breaker: bool,
}

impl Trade {
    /// Create a new fill event.
    pub fn new(
        symbol: impl Into<String>,
        side: Side,
        size: i32,
        price: i32,
        resting_trader: impl Into<String>,
        tie_breaker: bool,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            size,
            price,
            resting_trader: resting_trader.into(),
            tie_breaker,
        }
    }

    /// Check if the aggressor was a buyer.
    #[inline]
    pub fn is_buy(&self) -> bool {
        self.side == Side::Bid
    }

    /// Check if the aggressor was a seller.
    #[inline]
    pub fn is_sell(&self) -> bool {
        self.side == Side::Ask
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TRADE: {} {} {} @ {} against {}",
            self.symbol,
            self.side.direction_tag(),
            self.size,
            self.price,
            self.resting_trader
        )?;
        if self.tie_breaker {
            write!(f, " (tie-breaker)")?;
        }
        Ok(())
    }
}

/// One non-empty price level in a snapshot: price and aggregate resting size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    /// Level price in ticks
    pub price: i32,
    /// Sum of resting sizes at this price
    pub size: i32,
}

/// Aggregated view of resting liquidity.
///
/// Asks are ascending by price, bids descending, so index 0 on each side is
/// the best price. Only non-empty levels appear. `Display` renders the
/// line-oriented dump used by tests and operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    /// Instrument symbol
    pub symbol: String,

    /// Ask levels, ascending by price
    pub asks: Vec<LevelSnapshot>,

    /// Bid levels, descending by price
    pub bids: Vec<LevelSnapshot>,
}

impl BookSnapshot {
    /// Best (highest) bid price, if any bids rest.
    #[inline]
    pub fn best_bid(&self) -> Option<i32> {
        self.bids.first().map(|level| level.price)
    }

    /// Best (lowest) ask price, if any asks rest.
    #[inline]
    pub fn best_ask(&self) -> Option<i32> {
        self.asks.first().map(|level| level.price)
    }

    /// Spread (best ask − best bid), when both sides are present.
    pub fn spread(&self) -> Option<i32> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }
}

impl fmt::Display for BookSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Order Book for {} ===", self.symbol)?;
        writeln!(f, "Asks:")?;
        for level in &self.asks {
            writeln!(f, "Price {} | Size {}", level.price, level.size)?;
        }
        writeln!(f, "Bids:")?;
        for level in &self.bids {
            writeln!(f, "Price {} | Size {}", level.price, level.size)?;
        }
        Ok(())
    }
}
