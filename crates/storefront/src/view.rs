//! Presentation state.
//!
//! Nothing here writes to carts or accounts. The only side effect of a
//! refresh is the session self-heal in
//! [`SessionRegistry::current_identity`].

use tabcart_core::{AccountId, format_amount, total_amount};

use crate::db::{AccountDirectory, CartOwner, CartStore, RepositoryError, SessionRegistry};
use crate::models::{Account, CartLine};
use crate::store::KeyValueStore;

/// Header link text for guests.
pub const GUEST_LABEL: &str = "Login / Register";

/// Header avatar for a signed-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    /// One or two uppercase letters.
    pub initials: String,
    /// Hover text: full name, or the email.
    pub title: String,
}

/// What the header shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Signed-in account, `None` for a guest.
    pub identity: Option<AccountId>,
    /// `Login / Register` or `Welcome, <name>`.
    pub label: String,
    /// Present only when signed in.
    pub avatar: Option<Avatar>,
    /// Lines in the active cart.
    pub cart_count: usize,
}

impl ViewState {
    /// Header state for a guest.
    #[must_use]
    pub fn guest(cart_count: usize) -> Self {
        Self {
            identity: None,
            label: GUEST_LABEL.to_owned(),
            avatar: None,
            cart_count,
        }
    }

    /// Header state for `id`, using its profile when there is one.
    #[must_use]
    pub fn signed_in(id: &AccountId, account: Option<&Account>, cart_count: usize) -> Self {
        let first = account.map_or("", |a| a.first_name.as_str());
        let last = account.map_or("", |a| a.last_name.as_str());
        let local = id.local_part();

        let name = if first.is_empty() { local } else { first };

        let mut initials: String = first.chars().take(1).chain(last.chars().take(1)).collect();
        if initials.is_empty() {
            initials = local.chars().take(2).collect();
        }

        let title = account
            .and_then(Account::full_name)
            .unwrap_or_else(|| id.to_string());

        Self {
            identity: Some(id.clone()),
            label: format!("Welcome, {name}"),
            avatar: Some(Avatar {
                initials: initials.to_uppercase(),
                title,
            }),
            cart_count,
        }
    }

    /// Derive header state from already-loaded data.
    #[must_use]
    pub fn derive(identity: Option<&AccountId>, account: Option<&Account>, cart_count: usize) -> Self {
        match identity {
            Some(id) => Self::signed_in(id, account, cart_count),
            None => Self::guest(cart_count),
        }
    }

    /// Re-read the store and derive header state.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails.
    pub fn refresh<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self, RepositoryError> {
        let identity = SessionRegistry::new(store).current_identity()?;
        let account = match &identity {
            Some(id) => AccountDirectory::new(store).lookup(id)?,
            None => None,
        };
        let cart_count = CartStore::new(store).len(&CartOwner::from(identity.clone()))?;

        Ok(Self::derive(identity.as_ref(), account.as_ref(), cart_count))
    }
}

/// Which cart the cart page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartPageMode {
    /// Nothing to show.
    Empty,
    /// The guest cart.
    Guest,
    /// The signed-in account's cart.
    Account,
    /// Signed in with an empty cart while the guest cart still has lines:
    /// a read-only preview with a merge prompt.
    MergePending {
        /// Lines waiting in the guest cart.
        guest_count: usize,
    },
}

/// What the cart page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPageView {
    pub mode: CartPageMode,
    pub lines: Vec<CartLine>,
    pub total: u64,
    /// Total with currency symbol and separators, e.g. `₦5,000`.
    pub total_display: String,
    /// `""`, `1 item` or `N items`.
    pub item_count_label: String,
    /// Whether lines have remove buttons.
    pub removable: bool,
    pub checkout_enabled: bool,
}

impl CartPageView {
    /// Derive the cart page from already-loaded carts.
    ///
    /// `own_lines` is the active cart (the guest cart for a guest).
    /// `guest_lines` is only consulted when signed in with an empty cart.
    #[must_use]
    pub fn derive(
        signed_in: bool,
        own_lines: Vec<CartLine>,
        guest_lines: Vec<CartLine>,
        currency_symbol: &str,
    ) -> Self {
        let (mode, lines) = if !own_lines.is_empty() {
            let mode = if signed_in {
                CartPageMode::Account
            } else {
                CartPageMode::Guest
            };
            (mode, own_lines)
        } else if signed_in && !guest_lines.is_empty() {
            let mode = CartPageMode::MergePending {
                guest_count: guest_lines.len(),
            };
            (mode, guest_lines)
        } else {
            (CartPageMode::Empty, Vec::new())
        };

        let total = total_amount(lines.iter().map(|line| &line.price));

        Self {
            removable: matches!(mode, CartPageMode::Guest | CartPageMode::Account),
            checkout_enabled: mode == CartPageMode::Account,
            total_display: format_amount(currency_symbol, total),
            item_count_label: item_count_label(lines.len()),
            total,
            lines,
            mode,
        }
    }

    /// Re-read the store and derive the cart page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails.
    pub fn load<S: KeyValueStore + ?Sized>(
        store: &S,
        currency_symbol: &str,
    ) -> Result<Self, RepositoryError> {
        let identity = SessionRegistry::new(store).current_identity()?;
        let carts = CartStore::new(store);
        let signed_in = identity.is_some();

        let own_lines = carts.read(&CartOwner::from(identity))?;
        let guest_lines = if signed_in && own_lines.is_empty() {
            carts.read(&CartOwner::Guest)?
        } else {
            Vec::new()
        };

        Ok(Self::derive(signed_in, own_lines, guest_lines, currency_symbol))
    }
}

/// Cart page item count: empty for 0, `1 item`, `N items`.
#[must_use]
pub fn item_count_label(count: usize) -> String {
    match count {
        0 => String::new(),
        1 => "1 item".to_owned(),
        n => format!("{n} items"),
    }
}
