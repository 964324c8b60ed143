/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Price level: the FIFO queue of resting orders at one price.

use super::order::{Order, OrderId};
use std::collections::VecDeque;

/// All resting orders at a single price, oldest first.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    price: u128,
    orders: VecDeque<Order>,
}

impl PriceLevel {
    /// Creates an empty level at `price`.
    #[must_use]
    pub fn new(price: u128) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn price(&self) -> u128 {
        self.price
    }

    /// Appends an order behind every order already queued at this price.
    pub(crate) fn push_back(&mut self, order: Order) {
        self.orders.push_back(order);
    }

    /// Removes the order with `order_id`, wherever it sits in the queue.
    pub(crate) fn remove(&mut self, order_id: OrderId) -> Option<Order> {
        let position = self.orders.iter().position(|o| o.id() == order_id)?;
        self.orders.remove(position)
    }

    /// Removes the order at queue position `slot`.
    pub(crate) fn remove_at(&mut self, slot: usize) -> Option<Order> {
        self.orders.remove(slot)
    }

    pub(crate) fn get(&self, slot: usize) -> Option<&Order> {
        self.orders.get(slot)
    }

    pub(crate) fn get_mut(&mut self, slot: usize) -> Option<&mut Order> {
        self.orders.get_mut(slot)
    }

    pub(crate) fn find(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id() == order_id)
    }

    /// Iterates the queue oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Order> + '_ {
        self.orders.iter()
    }

    /// Sum of remaining amounts at this level.
    #[must_use]
    pub fn total_amount(&self) -> u64 {
        self.orders
            .iter()
            .fold(0u64, |acc, o| acc.saturating_add(o.remaining_amount()))
    }

    #[inline]
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
