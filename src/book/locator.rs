//! Order id → location map for O(1) cancel routing.
//!
//! The locator stores only the side and price of each resting order, never a
//! handle to the order itself; all reverse traversal goes back through the
//! side index. Carrying the side avoids probing both books on cancel.

use ahash::AHashMap;

use crate::error::{BookError, Result};
use crate::types::Side;

/// Tracks where every live order rests.
#[derive(Debug, Clone, Default)]
pub struct OrderLocator {
    /// order id → (side, price)
    locations: AHashMap<u64, (Side, i32)>,
}

impl OrderLocator {
    /// Create an empty locator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resting order's location.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::DuplicateOrderId`] if `id` is already tracked.
    pub fn insert(&mut self, id: u64, side: Side, price: i32) -> Result<()> {
        if self.locations.contains_key(&id) {
            return Err(BookError::DuplicateOrderId(id));
        }
        self.locations.insert(id, (side, price));
        Ok(())
    }

    /// Look up where an order rests.
    #[inline]
    pub fn lookup(&self, id: u64) -> Option<(Side, i32)> {
        self.locations.get(&id).copied()
    }

    /// Remove an order's location, returning it if tracked.
    pub fn remove(&mut self, id: u64) -> Option<(Side, i32)> {
        self.locations.remove(&id)
    }

    /// Check if an order id is live.
    #[inline]
    pub fn contains(&self, id: u64) -> bool {
        self.locations.contains_key(&id)
    }

    /// Number of live orders.
    #[inline]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Check if no orders are tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Iterate over all tracked locations.
    pub fn iter(&self) -> impl Iterator<Item = (u64, Side, i32)> + '_ {
        self.locations
            .iter()
            .map(|(&id, &(side, price))| (id, side, price))
    }

    /// Drop all tracked locations.
    pub fn clear(&mut self) {
        self.locations.clear();
    }
}
