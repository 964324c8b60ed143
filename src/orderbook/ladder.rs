/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! One side of the book.
//!
//! A [`Ladder`] keeps price levels in priority order: ascending prices on the
//! ask side, descending on the bid side. Both orderings come from
//! [`Side::priority_cmp`], so the two ladders are the same code parameterized
//! by side. Empty levels are pruned as soon as their last order leaves.

use super::error::BookError;
use super::level::PriceLevel;
use super::order::{Order, OrderId, Side};
use super::snapshot::LevelSnapshot;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

/// Ladder key: a price ordered by the priority of its side.
///
/// Every key in one ladder carries the same side, so the ordering is total
/// within a ladder.
#[derive(Debug, Clone, Copy)]
struct LevelKey {
    price: u128,
    side: Side,
}

impl PartialEq for LevelKey {
    fn eq(&self, other: &Self) -> bool {
        self.price == other.price
    }
}

impl Eq for LevelKey {}

impl PartialOrd for LevelKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LevelKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.side.priority_cmp(self.price, other.price)
    }
}

/// Price-ordered resting orders for one side.
///
/// # Examples
///
/// ```
/// use orderbook_core::{Ladder, Order, OrderId, Side};
///
/// let mut bids = Ladder::new(Side::Bid);
/// let low = Order::limit(OrderId::new(), Side::Bid, 100, 1);
/// let high = Order::limit(OrderId::new(), Side::Bid, 101, 1);
/// bids.insert(low).unwrap();
/// bids.insert(high).unwrap();
///
/// let prices: Vec<u128> = bids.best_first().map(|o| o.price()).collect();
/// assert_eq!(prices, vec![101, 100]);
/// ```
#[derive(Debug, Clone)]
pub struct Ladder {
    side: Side,
    levels: BTreeMap<LevelKey, PriceLevel>,
    /// Resting order id to its price.
    index: HashMap<OrderId, u128>,
}

impl Ladder {
    /// Creates an empty ladder for `side`.
    #[must_use]
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
            index: HashMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    fn key(&self, price: u128) -> LevelKey {
        LevelKey {
            price,
            side: self.side,
        }
    }

    /// Appends `order` at the tail of the queue at its price.
    ///
    /// # Errors
    ///
    /// - [`BookError::NotRestable`] if the order is a market order, has
    ///   nothing remaining, or belongs to the other side
    /// - [`BookError::DuplicateResting`] if an order with the same id is
    ///   already resting here
    pub fn insert(&mut self, order: Order) -> Result<(), BookError> {
        if order.is_market() {
            return Err(not_restable(&order, "market orders never rest"));
        }
        if order.is_filled() {
            return Err(not_restable(&order, "nothing remaining"));
        }
        if order.side() != self.side {
            return Err(not_restable(
                &order,
                format!("{} order in {} ladder", order.side(), self.side),
            ));
        }
        if self.index.contains_key(&order.id()) {
            return Err(BookError::DuplicateResting(order.id()));
        }

        let key = self.key(order.price());
        self.levels
            .entry(key)
            .or_insert_with(|| PriceLevel::new(order.price()))
            .push_back(order);
        self.index.insert(order.id(), order.price());
        Ok(())
    }

    /// Removes a resting order by id, pruning its level if it empties.
    ///
    /// Returns `None` if the order is not resting here.
    pub fn remove(&mut self, order_id: OrderId) -> Option<Order> {
        let price = self.index.remove(&order_id)?;
        let key = self.key(price);
        let level = self.levels.get_mut(&key)?;
        let removed = level.remove(order_id);
        if level.is_empty() {
            self.levels.remove(&key);
        }
        removed
    }

    /// Returns the resting order with `order_id`, if any.
    #[must_use]
    pub fn get(&self, order_id: OrderId) -> Option<&Order> {
        let price = self.index.get(&order_id)?;
        self.levels.get(&self.key(*price))?.find(order_id)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, order_id: OrderId) -> bool {
        self.index.contains_key(&order_id)
    }

    /// Resting orders in priority order: best level first, oldest first
    /// within a level.
    ///
    /// The iterator is lazy and borrows the ladder; dropping it early leaves
    /// the ladder untouched.
    pub fn best_first(&self) -> impl Iterator<Item = &Order> + '_ {
        self.levels.values().flat_map(|level| level.iter())
    }

    /// Price levels in priority order.
    pub fn levels(&self) -> impl Iterator<Item = &PriceLevel> + '_ {
        self.levels.values()
    }

    /// Best price on this side, if any order rests.
    #[must_use]
    pub fn best_price(&self) -> Option<u128> {
        self.levels.keys().next().map(|k| k.price)
    }

    /// Aggregated view of the best `depth` levels.
    #[must_use]
    pub fn depth(&self, depth: usize) -> Vec<LevelSnapshot> {
        self.levels
            .values()
            .take(depth)
            .map(|level| LevelSnapshot {
                price: level.price(),
                total_amount: level.total_amount(),
                order_count: level.order_count(),
            })
            .collect()
    }

    /// Number of resting orders.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Starts a priority walk that may mutate and remove the orders it
    /// visits.
    pub(crate) fn cursor(&mut self) -> LadderCursor<'_> {
        let key = self.levels.keys().next().copied();
        LadderCursor {
            ladder: self,
            key,
            slot: 0,
        }
    }

    fn key_after(&self, key: LevelKey) -> Option<LevelKey> {
        self.levels
            .range((Bound::Excluded(key), Bound::Unbounded))
            .next()
            .map(|(k, _)| *k)
    }
}

fn not_restable(order: &Order, reason: impl Into<String>) -> BookError {
    BookError::NotRestable {
        order_id: order.id(),
        reason: reason.into(),
    }
}

/// Forward-only walk over a ladder in priority order.
///
/// The cursor points at one resting order at a time. The matcher mutates the
/// current order in place and either [`advance`](Self::advance)s past it or
/// [`remove_current`](Self::remove_current)s it; a removal takes effect in
/// the ladder immediately. The walk cannot be restarted.
pub(crate) struct LadderCursor<'a> {
    ladder: &'a mut Ladder,
    key: Option<LevelKey>,
    slot: usize,
}

impl LadderCursor<'_> {
    /// The order under the cursor, or `None` once the ladder is exhausted.
    pub(crate) fn current_mut(&mut self) -> Option<&mut Order> {
        let key = self.key?;
        self.ladder.levels.get_mut(&key)?.get_mut(self.slot)
    }

    #[cfg(test)]
    pub(crate) fn current(&self) -> Option<&Order> {
        let key = self.key?;
        self.ladder.levels.get(&key)?.get(self.slot)
    }

    /// Moves to the next order in priority order, leaving the current one
    /// resting.
    pub(crate) fn advance(&mut self) {
        let Some(key) = self.key else {
            return;
        };
        let level_len = self
            .ladder
            .levels
            .get(&key)
            .map_or(0, PriceLevel::order_count);
        if self.slot + 1 < level_len {
            self.slot += 1;
        } else {
            self.key = self.ladder.key_after(key);
            self.slot = 0;
        }
    }

    /// Removes the order under the cursor from the ladder and moves to the
    /// next one. Prunes the level if it empties.
    pub(crate) fn remove_current(&mut self) -> Option<Order> {
        let key = self.key?;
        let level = self.ladder.levels.get_mut(&key)?;
        let removed = level.remove_at(self.slot)?;
        self.ladder.index.remove(&removed.id());

        let level_len = level.order_count();
        if level_len == 0 {
            self.ladder.levels.remove(&key);
        }
        if self.slot >= level_len {
            self.key = self.ladder.key_after(key);
            self.slot = 0;
        }
        Some(removed)
    }
}
