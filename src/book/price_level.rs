//! Price level with insertion-ordered membership and a cached aggregate size.
//!
//! A `PriceLevel` holds every resting order at one price on one side. Orders
//! are kept in arrival order (an `IndexMap` keyed by order id), which is what
//! both the pro-rata pass and its tie-break selection iterate over. Removal
//! uses shift semantics, so dropping the order at the current cursor position
//! leaves the rest of the queue contiguous and in order.
//!
//! # Invariant
//!
//! The `total_size` field MUST always equal the sum of member sizes. It is
//! maintained through the encapsulated mutation methods and verified in debug
//! builds via `verify_invariant()`.

use indexmap::IndexMap;

use crate::error::{BookError, Result};
use crate::types::Order;

/// All resting orders at a single price, in arrival order.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Level price in ticks
    price: i32,
    /// Resting orders in arrival order: order id → order
    orders: IndexMap<u64, Order>,
    /// Cached total size (invariant: == sum of member sizes)
    total_size: i32,
}

impl PriceLevel {
    /// Create a new empty price level.
    pub fn new(price: i32) -> Self {
        Self {
            price,
            orders: IndexMap::new(),
            total_size: 0,
        }
    }

    /// The level's price.
    #[inline]
    pub fn price(&self) -> i32 {
        self.price
    }

    /// Cached aggregate resting size (O(1)).
    #[inline]
    pub fn total_size(&self) -> i32 {
        self.total_size
    }

    /// Check if the level has no orders.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of resting orders at this level.
    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Add an order at the back of the queue.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::DuplicateOrderId`] if `id` is already a member.
    pub fn insert(&mut self, id: u64, order: Order) -> Result<()> {
        if self.orders.contains_key(&id) {
            return Err(BookError::DuplicateOrderId(id));
        }
        self.total_size += order.size;
        self.orders.insert(id, order);

        #[cfg(debug_assertions)]
        self.verify_invariant();

        Ok(())
    }

    /// Remove an order by id, returning it if present.
    pub fn remove(&mut self, id: u64) -> Option<Order> {
        let order = self.orders.shift_remove(&id)?;
        self.total_size -= order.size;

        #[cfg(debug_assertions)]
        self.verify_invariant();

        Some(order)
    }

    /// Get an order by id.
    #[inline]
    pub fn get(&self, id: u64) -> Option<&Order> {
        self.orders.get(&id)
    }

    /// Check if an order rests at this level.
    #[inline]
    pub fn contains(&self, id: u64) -> bool {
        self.orders.contains_key(&id)
    }

    /// Order at a queue position (0 = earliest arrival).
    #[inline]
    pub fn get_index(&self, index: usize) -> Option<(u64, &Order)> {
        self.orders.get_index(index).map(|(&id, order)| (id, order))
    }

    /// Fill `qty` against the order at `index`, returning its remaining size.
    ///
    /// `qty` must be positive and no larger than the order's remaining size.
    pub fn fill_index(&mut self, index: usize, qty: i32) -> Option<i32> {
        let (_, order) = self.orders.get_index_mut(index)?;
        debug_assert!(qty > 0 && qty <= order.size);
        order.size -= qty;
        let remaining = order.size;
        self.total_size -= qty;

        #[cfg(debug_assertions)]
        self.verify_invariant();

        Some(remaining)
    }

    /// Fill `qty` against the order `id`, returning its remaining size.
    pub fn fill(&mut self, id: u64, qty: i32) -> Option<i32> {
        let order = self.orders.get_mut(&id)?;
        debug_assert!(qty > 0 && qty <= order.size);
        order.size -= qty;
        let remaining = order.size;
        self.total_size -= qty;

        #[cfg(debug_assertions)]
        self.verify_invariant();

        Some(remaining)
    }

    /// Remove the order at queue position `index`, shifting later arrivals
    /// forward. An iteration cursor that stays at `index` remains valid.
    pub fn remove_index(&mut self, index: usize) -> Option<(u64, Order)> {
        let (id, order) = self.orders.shift_remove_index(index)?;
        self.total_size -= order.size;

        #[cfg(debug_assertions)]
        self.verify_invariant();

        Some((id, order))
    }

    /// Iterate over resting orders in arrival order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u64, &Order)> {
        self.orders.iter().map(|(&id, order)| (id, order))
    }

    /// Compute the actual total by summing all member sizes (O(n)).
    #[inline]
    pub fn compute_actual_total(&self) -> i32 {
        self.orders.values().map(|order| order.size).sum()
    }

    /// Verify the size invariant holds.
    #[cfg(debug_assertions)]
    #[inline]
    pub fn verify_invariant(&self) {
        let actual = self.compute_actual_total();
        debug_assert_eq!(
            actual, self.total_size,
            "PriceLevel invariant violated at price {}: actual={}, cached={}",
            self.price, actual, self.total_size
        );
    }

    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn verify_invariant(&self) {}
}
