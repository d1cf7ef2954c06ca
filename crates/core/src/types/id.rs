//! Newtype IDs for orders and cart lines.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order identifier.
///
/// Derived from the checkout time in milliseconds since the Unix epoch and
/// bumped past the newest existing id when the clock has not moved, so ids
/// within one order history are unique and strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    /// Create a new ID from an i64 value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Next id for a history whose newest id is `newest`, given the current
    /// time in milliseconds.
    ///
    /// ```
    /// use tabcart_core::OrderId;
    ///
    /// assert_eq!(OrderId::next_after(None, 1_000).as_i64(), 1_000);
    /// assert_eq!(OrderId::next_after(Some(OrderId::new(900)), 1_000).as_i64(), 1_000);
    /// assert_eq!(OrderId::next_after(Some(OrderId::new(1_000)), 1_000).as_i64(), 1_001);
    /// ```
    #[must_use]
    pub const fn next_after(newest: Option<Self>, now_millis: i64) -> Self {
        match newest {
            Some(Self(last)) if last >= now_millis => Self(last.saturating_add(1)),
            _ => Self(now_millis),
        }
    }
}

impl ::core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<OrderId> for i64 {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

/// Stable identifier for a cart line, assigned when the line is created.
///
/// Lets the UI remove "this line" instead of "whatever is at position N
/// now", which another tab may have shifted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(Uuid);

impl LineId {
    /// Generate a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The all-zero id. Marks a stored line that predates line ids.
    #[must_use]
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub const fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Name-based id: the same `name` always yields the same id.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()))
    }
}

impl ::core::fmt::Display for LineId {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ::core::str::FromStr for LineId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
