//! Executed-trade tape with rolling aggregates.
//!
//! Every fill the matcher emits lands here. The tape keeps a bounded window
//! of recent trades for inspection plus running totals that survive the
//! window: buy/sell volume, trade count, and the last execution price. The
//! signed imbalance is a cheap read on buying vs selling pressure.

use std::collections::VecDeque;
use std::io::{self, Write};

use crate::types::{Side, Trade};

/// Bounded tape of executed fills with running totals.
#[derive(Debug, Clone)]
pub struct TradeLog {
    /// Retention cap for the recent-trade window
    max_recent: usize,

    /// Most recent trades, oldest first
    recent: VecDeque<Trade>,

    /// Fills recorded over the tape's lifetime
    total_trades: u64,

    /// Volume filled by aggressive buyers
    total_buy_volume: u64,

    /// Volume filled by aggressive sellers
    total_sell_volume: u64,

    /// Price of the most recent fill
    last_trade_price: Option<i32>,
}

impl TradeLog {
    /// Create an empty tape retaining up to `max_recent` trades.
    pub fn new(max_recent: usize) -> Self {
        Self {
            max_recent,
            recent: VecDeque::new(),
            total_trades: 0,
            total_buy_volume: 0,
            total_sell_volume: 0,
            last_trade_price: None,
        }
    }

    /// Record one executed fill.
    pub fn record(&mut self, trade: Trade) {
        self.total_trades += 1;
        match trade.side {
            Side::Bid => self.total_buy_volume += trade.size as u64,
            Side::Ask => self.total_sell_volume += trade.size as u64,
        }
        self.last_trade_price = Some(trade.price);

        self.recent.push_back(trade);
        while self.recent.len() > self.max_recent {
            self.recent.pop_front();
        }
    }

    /// The retained window of recent trades, oldest first.
    pub fn recent_trades(&self) -> &VecDeque<Trade> {
        &self.recent
    }

    /// The `n` most recent trades, newest first.
    pub fn last_n(&self, n: usize) -> Vec<&Trade> {
        self.recent.iter().rev().take(n).collect()
    }

    /// Fills recorded over the tape's lifetime.
    #[inline]
    pub fn total_trades(&self) -> u64 {
        self.total_trades
    }

    /// Lifetime volume filled by aggressive buyers.
    #[inline]
    pub fn total_buy_volume(&self) -> u64 {
        self.total_buy_volume
    }

    /// Lifetime volume filled by aggressive sellers.
    #[inline]
    pub fn total_sell_volume(&self) -> u64 {
        self.total_sell_volume
    }

    /// Price of the most recent fill.
    #[inline]
    pub fn last_trade_price(&self) -> Option<i32> {
        self.last_trade_price
    }

    /// Signed trade imbalance: (buy − sell) / (buy + sell), in [-1, 1].
    ///
    /// `1.0` is all buying pressure, `-1.0` all selling, `0.0` balanced (or
    /// no volume at all).
    pub fn trade_imbalance(&self) -> f64 {
        let total = self.total_buy_volume + self.total_sell_volume;
        if total == 0 {
            return 0.0;
        }
        (self.total_buy_volume as f64 - self.total_sell_volume as f64) / total as f64
    }

    /// Trade imbalance over the last `n` retained trades only.
    pub fn recent_trade_imbalance(&self, n: usize) -> f64 {
        let mut buy_vol = 0u64;
        let mut sell_vol = 0u64;

        for trade in self.recent.iter().rev().take(n) {
            if trade.is_buy() {
                buy_vol += trade.size as u64;
            } else {
                sell_vol += trade.size as u64;
            }
        }

        let total = buy_vol + sell_vol;
        if total == 0 {
            return 0.0;
        }
        (buy_vol as f64 - sell_vol as f64) / total as f64
    }

    /// Write the retained trades to a line-oriented sink, one fill per line.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        for trade in &self.recent {
            writeln!(sink, "{trade}")?;
        }
        Ok(())
    }

    /// Clear the tape and all running totals.
    pub fn reset(&mut self) {
        self.recent.clear();
        self.total_trades = 0;
        self.total_buy_volume = 0;
        self.total_sell_volume = 0;
        self.last_trade_price = None;
    }
}
