//! Cart line items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tabcart_core::{LineId, PriceText};

/// One item in a cart.
///
/// Lines written before ids existed decode with a nil id until
/// [`CartLine::assign_legacy_ids`] replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Stable handle for removal.
    #[serde(default = "LineId::nil")]
    pub id: LineId,
    /// Product title as shown on the card.
    pub title: String,
    /// Price as shown on the card, e.g. `₦5,000`.
    pub price: PriceText,
    /// Image URL or path.
    #[serde(default)]
    pub image: String,
    /// When the line was added.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub added: DateTime<Utc>,
}

impl CartLine {
    /// Give every nil-id line an id derived from its position and content.
    ///
    /// Repeated reads of the same stored list yield the same ids, so an id
    /// shown to the user still matches on the next read. The ids are stored
    /// with the list's next write.
    pub fn assign_legacy_ids(lines: &mut [Self]) {
        for (index, line) in lines.iter_mut().enumerate() {
            if line.id.is_nil() {
                line.id = LineId::from_name(&format!(
                    "{index}:{}:{}:{}",
                    line.title,
                    line.price,
                    line.added.timestamp_millis()
                ));
            }
        }
    }
}

/// Product card data submitted by an add-to-cart click.
///
/// Blank fields fall back the way the product page always did: title
/// `Product`, price `₦0`, image the configured placeholder.
#[derive(Debug, Clone, Default)]
pub struct NewCartLine {
    /// Product title.
    pub title: String,
    /// Display price.
    pub price: String,
    /// Image reference, if the card has one.
    pub image: Option<String>,
}

impl NewCartLine {
    /// Fallback title for a card without one.
    pub const DEFAULT_TITLE: &'static str = "Product";

    /// Build a line item stamped with `added`.
    #[must_use]
    pub fn into_line(self, placeholder_image: &str, added: DateTime<Utc>) -> CartLine {
        let title = self.title.trim();
        let price = self.price.trim();
        let image = self
            .image
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(placeholder_image);

        CartLine {
            id: LineId::generate(),
            title: if title.is_empty() {
                Self::DEFAULT_TITLE.to_owned()
            } else {
                title.to_owned()
            },
            price: if price.is_empty() {
                PriceText::default()
            } else {
                PriceText::new(price)
            },
            image: image.to_owned(),
            added,
        }
    }
}
