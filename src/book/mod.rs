//! Single-symbol order book: ingress validation, pro-rata crossing,
//! cancellation, and snapshots.
//!
//! The book is single-writer: all mutating calls execute serially, and no
//! operation suspends internally. Reads concurrent with writes require an
//! external reader-writer discipline.

mod locator;
mod matcher;
mod price_level;
mod side_index;

pub use locator::OrderLocator;
pub use price_level::PriceLevel;
pub use side_index::SideIndex;

use serde::{Deserialize, Serialize};

use crate::error::{BookError, Result};
use crate::trade_log::TradeLog;
use crate::types::{BookSnapshot, Order, OrderRequest, Side, Trade};

/// Configuration for book behavior.
///
/// Submission validation is not configurable: every order is checked before
/// any state changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookConfig {
    /// Number of executed trades retained on the internal tape.
    pub max_recent_trades: usize,

    /// Whether to emit each fill through the `log` facade as it executes.
    pub log_trades: bool,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            max_recent_trades: 1000,
            log_trades: false,
        }
    }
}

impl BookConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of trades retained on the tape.
    pub fn with_max_recent_trades(mut self, max: usize) -> Self {
        self.max_recent_trades = max;
        self
    }

    /// Enable/disable per-fill logging.
    pub fn with_trade_logging(mut self, log: bool) -> Self {
        self.log_trades = log;
        self
    }
}

/// Counters for monitoring book activity.
#[derive(Debug, Clone, Default)]
pub struct BookStats {
    /// Submissions accepted (validation passed)
    pub orders_submitted: u64,

    /// Submissions rejected at validation
    pub orders_rejected: u64,

    /// Orders that rested on the book (fully or residually)
    pub orders_rested: u64,

    /// Successful cancellations
    pub orders_cancelled: u64,

    /// Fills executed across all submissions
    pub trades_executed: u64,
}

/// A single-symbol limit order book with pro-rata matching.
///
/// # Example
///
/// ```
/// use prorata_lob::{Book, OrderRequest};
///
/// let mut book = Book::new("NVDA");
///
/// book.submit(OrderRequest::sell(1, "alice", "NVDA", 10, 100)).unwrap();
/// let trades = book.submit(OrderRequest::buy(2, "bob", "NVDA", 4, 100)).unwrap();
///
/// assert_eq!(trades.len(), 1);
/// assert_eq!(trades[0].to_string(), "TRADE: NVDA BUY 4 @ 100 against alice");
/// assert_eq!(book.total_size_at(100), 6);
/// ```
#[derive(Debug, Clone)]
pub struct Book {
    /// Instrument symbol; submissions must match
    symbol: String,

    /// Resting buy orders
    bids: SideIndex,

    /// Resting sell orders
    asks: SideIndex,

    /// order id → (side, price) for O(1) cancel routing
    locator: OrderLocator,

    /// Tape of executed fills
    tape: TradeLog,

    /// Configuration
    config: BookConfig,

    /// Activity counters
    stats: BookStats,
}

impl Book {
    /// Create a new empty book for `symbol`.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self::with_config(symbol, BookConfig::default())
    }

    /// Create a new empty book with custom configuration.
    pub fn with_config(symbol: impl Into<String>, config: BookConfig) -> Self {
        Self {
            symbol: symbol.into(),
            bids: SideIndex::new(Side::Bid),
            asks: SideIndex::new(Side::Ask),
            locator: OrderLocator::new(),
            tape: TradeLog::new(config.max_recent_trades),
            config,
            stats: BookStats::default(),
        }
    }

    /// The book's symbol.
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Submit a new limit order.
    ///
    /// The order first crosses against the opposite side, level by level from
    /// the best price, as long as its limit admits the level; any residual
    /// size rests at the order's own limit price. Returns the fills executed
    /// by this submission, in emission order.
    ///
    /// # Errors
    ///
    /// Rejects non-positive sizes, negative prices, symbol mismatches, and
    /// ids that are already live. A rejected submission leaves the book
    /// unchanged.
    pub fn submit(&mut self, request: OrderRequest) -> Result<Vec<Trade>> {
        if let Err(err) = self.validate(&request) {
            self.stats.orders_rejected += 1;
            log::warn!("rejected order {}: {err}", request.id);
            return Err(err);
        }
        self.stats.orders_submitted += 1;

        let OrderRequest {
            id,
            trader,
            side,
            size,
            price,
            ..
        } = request;

        let mut remaining = size;
        let mut trades = Vec::new();

        match side {
            Side::Bid => {
                while remaining > 0 {
                    let Some(best) = self.asks.best_price() else { break };
                    if best > price {
                        break;
                    }
                    let Some(level) = self.asks.level_mut(best) else { break };
                    matcher::execute_pro_rata(
                        &self.symbol,
                        side,
                        &mut remaining,
                        level,
                        &mut self.locator,
                        &mut trades,
                    );
                    if level.is_empty() {
                        self.asks.remove_level(best);
                    }
                }
            }
            Side::Ask => {
                while remaining > 0 {
                    let Some(best) = self.bids.best_price() else { break };
                    if best < price {
                        break;
                    }
                    let Some(level) = self.bids.level_mut(best) else { break };
                    matcher::execute_pro_rata(
                        &self.symbol,
                        side,
                        &mut remaining,
                        level,
                        &mut self.locator,
                        &mut trades,
                    );
                    if level.is_empty() {
                        self.bids.remove_level(best);
                    }
                }
            }
        }

        if remaining > 0 {
            let book_side = match side {
                Side::Bid => &mut self.bids,
                Side::Ask => &mut self.asks,
            };
            book_side.get_or_create(price).insert(
                id,
                Order {
                    trader,
                    size: remaining,
                },
            )?;
            self.locator.insert(id, side, price)?;
            self.stats.orders_rested += 1;
        }

        self.stats.trades_executed += trades.len() as u64;
        for trade in &trades {
            if self.config.log_trades {
                log::info!("{trade}");
            }
            self.tape.record(trade.clone());
        }

        Ok(trades)
    }

    fn validate(&self, request: &OrderRequest) -> Result<()> {
        if request.symbol != self.symbol {
            return Err(BookError::SymbolMismatch {
                expected: self.symbol.clone(),
                actual: request.symbol.clone(),
            });
        }
        if request.size <= 0 {
            return Err(BookError::InvalidSize(request.size));
        }
        if request.price < 0 {
            return Err(BookError::InvalidPrice(request.price));
        }
        if self.locator.contains(request.id) {
            return Err(BookError::DuplicateOrderId(request.id));
        }
        Ok(())
    }

    // ========================================================================
    // Cancellation
    // ========================================================================

    /// Cancel a resting order by id.
    ///
    /// Returns `false` if the id is unknown (never submitted, already filled,
    /// or already cancelled). On a `true` return the order is gone and no
    /// further fills against it will be emitted.
    pub fn cancel(&mut self, order_id: u64) -> bool {
        let Some((side, price)) = self.locator.remove(order_id) else {
            log::debug!("cancel for unknown order {order_id}");
            return false;
        };

        let index = match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        };
        if let Some(level) = index.level_mut(price) {
            level.remove(order_id);
            if level.is_empty() {
                index.remove_level(price);
            }
        }

        self.stats.orders_cancelled += 1;
        true
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Best (highest) bid price.
    #[inline]
    pub fn best_bid(&self) -> Option<i32> {
        self.bids.best_price()
    }

    /// Best (lowest) ask price.
    #[inline]
    pub fn best_ask(&self) -> Option<i32> {
        self.asks.best_price()
    }

    /// Spread (best ask − best bid), when both sides are present.
    pub fn spread(&self) -> Option<i32> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Aggregate resting size at `price`, probing the bid side first.
    ///
    /// Returns 0 when neither side holds a level at that price.
    pub fn total_size_at(&self, price: i32) -> i32 {
        if let Some(level) = self.bids.level(price) {
            return level.total_size();
        }
        if let Some(level) = self.asks.level(price) {
            return level.total_size();
        }
        0
    }

    /// Check if an order id is live on the book.
    #[inline]
    pub fn contains_order(&self, order_id: u64) -> bool {
        self.locator.contains(order_id)
    }

    /// Number of live resting orders.
    #[inline]
    pub fn order_count(&self) -> usize {
        self.locator.len()
    }

    /// Number of non-empty bid price levels.
    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    /// Number of non-empty ask price levels.
    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    /// Check if no orders rest on either side.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Aggregated view of resting liquidity: asks ascending, bids descending,
    /// non-empty levels only.
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            symbol: self.symbol.clone(),
            asks: self.asks.snapshot_levels(),
            bids: self.bids.snapshot_levels(),
        }
    }

    /// Activity counters.
    pub fn stats(&self) -> &BookStats {
        &self.stats
    }

    /// Tape of executed fills.
    pub fn trade_log(&self) -> &TradeLog {
        &self.tape
    }

    /// Direct access to the bid index (read-only).
    pub fn bids(&self) -> &SideIndex {
        &self.bids
    }

    /// Direct access to the ask index (read-only).
    pub fn asks(&self) -> &SideIndex {
        &self.asks
    }

    /// Direct access to the order locator (read-only).
    pub fn locator(&self) -> &OrderLocator {
        &self.locator
    }

    /// Reset the book to its empty state, clearing the tape and counters.
    pub fn reset(&mut self) {
        self.bids.clear();
        self.asks.clear();
        self.locator.clear();
        self.tape.reset();
        self.stats = BookStats::default();
    }
}
