//! Display prices and integer totals.
//!
//! Cart lines carry the price exactly as it was shown on the product card
//! (for example `₦5,000`). Totals are computed by keeping only the ASCII
//! digits of each price and reading them as a base-10 integer, so `₦5,000`
//! counts as `5000` and `$19.99` counts as `1999`. Every total in the system
//! goes through [`PriceText::amount`] so the cart page and checkout agree.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A price string as displayed to the user.
///
/// ```
/// use tabcart_core::PriceText;
///
/// assert_eq!(PriceText::new("₦5,000").amount(), 5000);
/// assert_eq!(PriceText::new("free").amount(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceText(String);

impl PriceText {
    /// Price shown when a product card has none.
    pub const FALLBACK: &'static str = "₦0";

    /// Wrap a display price. No validation: any string is a price.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the display string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer amount: the digits of the display string, or 0 if there are
    /// none or they overflow.
    #[must_use]
    pub fn amount(&self) -> u64 {
        let digits: String = self.0.chars().filter(char::is_ascii_digit).collect();
        digits.parse().unwrap_or(0)
    }
}

impl Default for PriceText {
    fn default() -> Self {
        Self::new(Self::FALLBACK)
    }
}

impl fmt::Display for PriceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PriceText {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Sum the amounts of a sequence of prices, saturating at `u64::MAX`.
#[must_use]
pub fn total_amount<'a>(prices: impl IntoIterator<Item = &'a PriceText>) -> u64 {
    prices
        .into_iter()
        .fold(0_u64, |acc, price| acc.saturating_add(price.amount()))
}

/// Format an integer amount with a currency symbol and comma thousands
/// separators, e.g. `format_amount("₦", 1_250_000)` is `₦1,250,000`.
#[must_use]
pub fn format_amount(symbol: &str, amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{symbol}{grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_strips_symbols_and_separators() {
        assert_eq!(PriceText::new("₦5,000").amount(), 5000);
        assert_eq!(PriceText::new("$19.99").amount(), 1999);
        assert_eq!(PriceText::new(" 1 2 3 ").amount(), 123);
    }

    #[test]
    fn test_amount_without_digits_is_zero() {
        assert_eq!(PriceText::new("").amount(), 0);
        assert_eq!(PriceText::new("Free").amount(), 0);
    }

    #[test]
    fn test_amount_ignores_non_ascii_digits() {
        // Arabic-Indic digits are not part of the price.
        assert_eq!(PriceText::new("٣4").amount(), 4);
    }

    #[test]
    fn test_amount_overflow_is_zero() {
        let huge = PriceText::new("9".repeat(40));
        assert_eq!(huge.amount(), 0);
    }

    #[test]
    fn test_total_amount() {
        let prices = [
            PriceText::new("₦5,000"),
            PriceText::new("₦2,500"),
            PriceText::new("n/a"),
        ];
        assert_eq!(total_amount(&prices), 7500);
    }

    #[test]
    fn test_total_amount_saturates() {
        let prices = [
            PriceText::new(u64::MAX.to_string()),
            PriceText::new("1"),
        ];
        assert_eq!(total_amount(&prices), u64::MAX);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount("₦", 0), "₦0");
        assert_eq!(format_amount("₦", 999), "₦999");
        assert_eq!(format_amount("₦", 5000), "₦5,000");
        assert_eq!(format_amount("$", 1_250_000), "$1,250,000");
    }

    #[test]
    fn test_default_is_fallback() {
        assert_eq!(PriceText::default().as_str(), "₦0");
        assert_eq!(PriceText::default().amount(), 0);
    }
}
