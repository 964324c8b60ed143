/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Order value types.
//!
//! An [`Order`] is a small `Copy` value. Its economic state (remaining and
//! filled amounts) only changes through the matching routine, which keeps
//! `filled_amount + remaining_amount == amount` at every observable point.

use super::error::BookError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier of an order.
///
/// Identifiers are produced outside the book; [`OrderId::new`] is offered for
/// producers that have no id scheme of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Creates a new random (v4) order id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for OrderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Side of the book an order belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Sell side. Best price is the lowest.
    Ask,
    /// Buy side. Best price is the highest.
    Bid,
}

impl Side {
    /// Returns the side an order of this side trades against.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Ask => Self::Bid,
            Self::Bid => Self::Ask,
        }
    }

    /// Compares two prices by priority on this side.
    ///
    /// `Ordering::Less` means `a` has better priority than `b`: lower prices
    /// come first on the ask side, higher prices first on the bid side. Both
    /// ladders are ordered by this single comparator.
    #[inline]
    #[must_use]
    pub fn priority_cmp(self, a: u128, b: u128) -> Ordering {
        match self {
            Self::Ask => a.cmp(&b),
            Self::Bid => b.cmp(&a),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ask => write!(f, "ASK"),
            Self::Bid => write!(f, "BID"),
        }
    }
}

impl FromStr for Side {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASK" | "SELL" => Ok(Self::Ask),
            "BID" | "BUY" => Ok(Self::Bid),
            _ => Err(BookError::UnknownSide(s.to_string())),
        }
    }
}

/// Execution style of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Trades only at its price or better; any remainder rests.
    Limit,
    /// Trades at any price; any remainder is discarded.
    Market,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limit => write!(f, "LIMIT"),
            Self::Market => write!(f, "MARKET"),
        }
    }
}

impl FromStr for OrderType {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LIMIT" => Ok(Self::Limit),
            "MARKET" => Ok(Self::Market),
            _ => Err(BookError::UnknownOrderType(s.to_string())),
        }
    }
}

/// Economic state of one order.
///
/// Prices are integer ticks and amounts integer lots; the scale of both is
/// carried by [`BookConfig`](super::BookConfig).
///
/// # Examples
///
/// ```
/// use orderbook_core::{Order, OrderId, OrderType, Side};
///
/// let order = Order::limit(OrderId::new(), Side::Bid, 10, 5);
/// assert_eq!(order.order_type(), OrderType::Limit);
/// assert_eq!(order.remaining_amount(), 5);
/// assert_eq!(order.filled_amount(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    side: Side,
    order_type: OrderType,
    price: u128,
    amount: u64,
    remaining_amount: u64,
    filled_amount: u64,
}

impl Order {
    /// Creates an unfilled limit order.
    #[must_use]
    pub const fn limit(id: OrderId, side: Side, price: u128, amount: u64) -> Self {
        Self {
            id,
            side,
            order_type: OrderType::Limit,
            price,
            amount,
            remaining_amount: amount,
            filled_amount: 0,
        }
    }

    /// Creates an unfilled market order. Its price is zero and never read.
    #[must_use]
    pub const fn market(id: OrderId, side: Side, amount: u64) -> Self {
        Self {
            id,
            side,
            order_type: OrderType::Market,
            price: 0,
            amount,
            remaining_amount: amount,
            filled_amount: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.id
    }

    #[inline]
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    #[inline]
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Limit price in ticks. Meaningless for market orders.
    #[inline]
    #[must_use]
    pub const fn price(&self) -> u128 {
        self.price
    }

    /// Original amount.
    #[inline]
    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.amount
    }

    #[inline]
    #[must_use]
    pub const fn remaining_amount(&self) -> u64 {
        self.remaining_amount
    }

    #[inline]
    #[must_use]
    pub const fn filled_amount(&self) -> u64 {
        self.filled_amount
    }

    #[inline]
    #[must_use]
    pub const fn is_filled(&self) -> bool {
        self.remaining_amount == 0
    }

    #[inline]
    #[must_use]
    pub const fn is_market(&self) -> bool {
        matches!(self.order_type, OrderType::Market)
    }

    /// Returns `true` if this order may trade against a resting order priced
    /// at `resting_price`.
    ///
    /// A market order crosses every price. A limit ask crosses bids at or
    /// above its price; a limit bid crosses asks at or below its price.
    #[inline]
    #[must_use]
    pub fn crosses(&self, resting_price: u128) -> bool {
        match (self.order_type, self.side) {
            (OrderType::Market, _) => true,
            (OrderType::Limit, Side::Ask) => resting_price >= self.price,
            (OrderType::Limit, Side::Bid) => resting_price <= self.price,
        }
    }

    /// Moves `amount` from remaining to filled.
    ///
    /// Callers pass at most `remaining_amount`; the subtraction saturates so
    /// the conservation invariant holds even if they do not.
    pub(crate) fn fill(&mut self, amount: u64) {
        let amount = amount.min(self.remaining_amount);
        self.remaining_amount -= amount;
        self.filled_amount += amount;
    }

    /// Checks the structural invariants an order must satisfy before it may
    /// enter the book.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::InvalidOrder`] if the amount is zero, if
    /// `filled_amount + remaining_amount != amount`, or if a limit order has
    /// a zero price.
    pub fn validate(&self) -> Result<(), BookError> {
        if self.amount == 0 {
            return Err(self.invalid("amount must be positive"));
        }
        match self.filled_amount.checked_add(self.remaining_amount) {
            Some(total) if total == self.amount => {}
            _ => {
                return Err(self.invalid(format!(
                    "filled {} + remaining {} does not equal amount {}",
                    self.filled_amount, self.remaining_amount, self.amount
                )));
            }
        }
        if self.order_type == OrderType::Limit && self.price == 0 {
            return Err(self.invalid("limit price must be positive"));
        }
        Ok(())
    }

    pub(crate) fn invalid(&self, reason: impl Into<String>) -> BookError {
        BookError::InvalidOrder {
            order_id: self.id,
            reason: reason.into(),
        }
    }
}
