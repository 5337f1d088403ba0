//! Per-side price index over the book's levels.
//!
//! A `BTreeMap` keyed by price keeps the levels sorted, so the best price is
//! the last key on the bid side and the first key on the ask side. Callers
//! drop a level as soon as it empties, which keeps `best_price()` from ever
//! naming a level with no resting orders.

use std::collections::BTreeMap;

use crate::book::price_level::PriceLevel;
use crate::types::{LevelSnapshot, Side};

/// Price → level map for one side of the book.
#[derive(Debug, Clone)]
pub struct SideIndex {
    /// Which side this index holds
    side: Side,
    /// Levels sorted by price
    levels: BTreeMap<i32, PriceLevel>,
}

impl SideIndex {
    /// Create an empty index for one side.
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    /// Which side this index holds.
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Best price: highest bid or lowest ask; `None` when the side is empty.
    #[inline]
    pub fn best_price(&self) -> Option<i32> {
        match self.side {
            Side::Bid => self.levels.keys().next_back().copied(),
            Side::Ask => self.levels.keys().next().copied(),
        }
    }

    /// Level at `price`, created empty on first use.
    pub fn get_or_create(&mut self, price: i32) -> &mut PriceLevel {
        self.levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
    }

    /// Level at `price`, if present.
    #[inline]
    pub fn level(&self, price: i32) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    /// Mutable level at `price`, if present.
    #[inline]
    pub fn level_mut(&mut self, price: i32) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&price)
    }

    /// Drop the level at `price`. Callers only do this once the level has
    /// emptied.
    pub fn remove_level(&mut self, price: i32) -> Option<PriceLevel> {
        self.levels.remove(&price)
    }

    /// Number of live levels on this side.
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Check if this side holds no levels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of resting orders across all levels on this side.
    pub fn order_count(&self) -> usize {
        self.levels.values().map(|level| level.len()).sum()
    }

    /// Iterate over levels from best price to worst.
    pub fn iter_best_first(&self) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        match self.side {
            Side::Bid => Box::new(self.levels.values().rev()),
            Side::Ask => Box::new(self.levels.values()),
        }
    }

    /// Aggregate (price, size) rows from best price to worst.
    pub fn snapshot_levels(&self) -> Vec<LevelSnapshot> {
        self.iter_best_first()
            .map(|level| LevelSnapshot {
                price: level.price(),
                size: level.total_size(),
            })
            .collect()
    }

    /// Drop every level on this side.
    pub fn clear(&mut self) {
        self.levels.clear();
    }
}
