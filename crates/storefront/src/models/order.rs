//! Order records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tabcart_core::OrderId;

use super::CartLine;

/// A checked-out cart. Immutable once written to the order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique, increasing within one account's history.
    pub id: OrderId,
    /// Snapshot of the cart at checkout.
    pub items: Vec<CartLine>,
    /// Sum of the items' integer price amounts.
    pub total: u64,
    /// Checkout time.
    pub date: DateTime<Utc>,
}
