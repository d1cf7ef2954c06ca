//! Cart and order commands.
//!
//! # Usage
//!
//! ```bash
//! tabcart add "Shirt" "₦5,000" --image images/shirt.jpg
//! tabcart cart
//! tabcart remove 0
//! tabcart remove-line 67e55044-10b1-426f-9247-bb680e5fe0c8
//! tabcart merge
//! tabcart checkout
//! tabcart orders
//! ```

use tabcart_core::LineId;
use tabcart_storefront::NewCartLine;

use super::{CliError, Shop};
use crate::output;

pub fn add(shop: &Shop, item: NewCartLine) -> Result<(), CliError> {
    let view = shop.add_to_cart(item)?;
    output::header(&view);
    Ok(())
}

/// Remove by position as listed by `tabcart cart`.
pub fn remove(shop: &Shop, index: usize) -> Result<(), CliError> {
    let view = shop.remove_from_cart(index)?;
    output::header(&view);
    Ok(())
}

pub fn remove_line(shop: &Shop, line_id: LineId) -> Result<(), CliError> {
    let view = shop.remove_line(line_id)?;
    output::header(&view);
    Ok(())
}

pub fn clear(shop: &Shop) -> Result<(), CliError> {
    let view = shop.clear_cart()?;
    output::header(&view);
    Ok(())
}

pub fn show(shop: &Shop) -> Result<(), CliError> {
    let page = shop.cart_page()?;
    output::cart_page(&page);
    Ok(())
}

pub fn checkout(shop: &Shop) -> Result<(), CliError> {
    let view = shop.checkout()?;
    output::header(&view);
    Ok(())
}

pub fn merge(shop: &Shop) -> Result<(), CliError> {
    let view = shop.merge_guest_now()?;
    output::header(&view);
    Ok(())
}

pub fn orders(shop: &Shop) -> Result<(), CliError> {
    let orders = shop.orders()?;
    tracing::debug!(count = orders.len(), "Loaded order history");
    output::orders(&orders, &shop.config().currency_symbol);
    Ok(())
}
