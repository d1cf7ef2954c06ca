//! Store key names.

use tabcart_core::AccountId;

/// Account directory.
pub const ACCOUNTS: &str = "fw_users";

/// Signed-in account id.
pub const CURRENT_USER: &str = "fw_currentUser";

/// The shared guest cart.
pub const GUEST_CART: &str = "cart:guest";

/// Prefix of every cart key, guest included.
pub const CART_PREFIX: &str = "cart:";

/// Prefix of every order history key.
pub const ORDERS_PREFIX: &str = "orders:";

/// Cart key for an account.
#[must_use]
pub fn account_cart(id: &AccountId) -> String {
    format!("{CART_PREFIX}{id}")
}

/// Order history key for an account.
#[must_use]
pub fn orders(id: &AccountId) -> String {
    format!("{ORDERS_PREFIX}{id}")
}

/// Whether a change to `key` in another tab can alter what this tab shows
/// in its header. `None` means the whole store was cleared.
#[must_use]
pub fn affects_view(key: Option<&str>) -> bool {
    key.is_none_or(|key| {
        key == CURRENT_USER || key == ACCOUNTS || key.starts_with(CART_PREFIX)
    })
}
