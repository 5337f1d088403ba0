//! # prorata-lob
//!
//! Single-symbol limit order book with pro-rata matching.
//!
//! Incoming limit orders cross against resting liquidity on the opposite
//! side, level by level from the best price. Within a level the incoming
//! size is allocated across resting orders in proportion to their sizes
//! (floored), and a single tie-breaker fill against the largest remaining
//! order absorbs the rounding loss. Unfilled size rests on the book at the
//! order's own limit price; cancellation by id is O(1) via the order
//! locator.
//!
//! ## Quick Start
//!
//! ```rust
//! use prorata_lob::{Book, OrderRequest};
//!
//! let mut book = Book::new("NVDA");
//!
//! // Rest three asks at one price, then cross them with a buy.
//! book.submit(OrderRequest::sell(1, "alice", "NVDA", 50, 100)).unwrap();
//! book.submit(OrderRequest::sell(2, "bob", "NVDA", 30, 100)).unwrap();
//! book.submit(OrderRequest::sell(3, "carol", "NVDA", 20, 100)).unwrap();
//!
//! let trades = book.submit(OrderRequest::buy(9, "dave", "NVDA", 40, 100)).unwrap();
//!
//! // 40% of the level, split 20/12/8 across the resting orders.
//! let fills: Vec<i32> = trades.iter().map(|t| t.size).collect();
//! assert_eq!(fills, vec![20, 12, 8]);
//! assert_eq!(book.total_size_at(100), 60);
//!
//! // Aggregated depth, best prices first.
//! println!("{}", book.snapshot());
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`book`] | The book itself: `Book`, `PriceLevel`, `SideIndex`, `OrderLocator` |
//! | [`types`] | Value types: `OrderRequest`, `Trade`, `Side`, `BookSnapshot` |
//! | [`trade_log`] | Executed-trade tape with rolling aggregates |
//! | [`error`] | `BookError` and the crate-wide `Result` alias |
//!
//! ## Concurrency
//!
//! The book is single-writer: `submit` and `cancel` must execute serially on
//! one logical thread. Reads concurrent with writes need an external
//! reader-writer discipline; the core assumes exclusive access during
//! writes.

pub mod book;
pub mod error;
pub mod trade_log;
pub mod types;

// Re-exports - book core
pub use book::{Book, BookConfig, BookStats, OrderLocator, PriceLevel, SideIndex};

// Re-exports - value types
pub use types::{BookSnapshot, LevelSnapshot, Order, OrderRequest, Side, Trade};

// Re-exports - trade tape
pub use trade_log::TradeLog;

// Re-exports - errors
pub use error::{BookError, Result};
