/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Bounded record of order ids an action has already been applied to.

use super::order::OrderId;
use std::collections::{HashSet, VecDeque};

/// Capacity-limited set of applied order ids.
///
/// Ids are evicted oldest first once `capacity` is exceeded. An evicted id is
/// forgotten: a replay of it after eviction is applied again. `None` keeps
/// every id for the life of the index.
#[derive(Debug, Clone, Default)]
pub struct IdempotencyIndex {
    seen: HashSet<OrderId>,
    arrival: VecDeque<OrderId>,
    capacity: Option<usize>,
}

impl IdempotencyIndex {
    /// Creates an index retaining at most `capacity` ids.
    #[must_use]
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            seen: HashSet::new(),
            arrival: VecDeque::new(),
            capacity,
        }
    }

    /// Marks `order_id` as applied.
    ///
    /// Returns `true` if the id was not already marked, i.e. the caller should
    /// apply the action now.
    pub fn mark(&mut self, order_id: OrderId) -> bool {
        if !self.seen.insert(order_id) {
            return false;
        }
        self.arrival.push_back(order_id);
        if let Some(capacity) = self.capacity {
            while self.arrival.len() > capacity {
                if let Some(oldest) = self.arrival.pop_front() {
                    self.seen.remove(&oldest);
                }
            }
        }
        true
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, order_id: OrderId) -> bool {
        self.seen.contains(&order_id)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}
