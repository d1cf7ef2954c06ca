//! Engine state shared across entry points.

use chrono::{DateTime, Utc};
use tracing::{debug, error};

use tabcart_core::{AccountId, NoticeKind};

use crate::config::StorefrontConfig;
use crate::db::{CartOwner, SessionRegistry};
use crate::error::{AppError, Result};
use crate::services::notify::{NotificationSink, TracingNotifier};
use crate::store::KeyValueStore;
use crate::view::ViewState;

/// One tab's view of the shop.
///
/// Holds no cart or session state of its own: every entry point re-reads
/// the store, so writes from other tabs are always picked up. Entry points
/// live in [`crate::handlers`].
pub struct Storefront<S, N = TracingNotifier> {
    store: S,
    notifier: N,
    config: StorefrontConfig,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Create an engine that reports notices through `tracing`.
    #[must_use]
    pub fn with_store(store: S, config: StorefrontConfig) -> Self {
        Self::new(store, TracingNotifier, config)
    }
}

impl<S: KeyValueStore, N: NotificationSink> Storefront<S, N> {
    /// Create a new engine over `store`.
    #[must_use]
    pub const fn new(store: S, notifier: N, config: StorefrontConfig) -> Self {
        Self {
            store,
            notifier,
            config,
        }
    }

    /// Get a reference to the backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Get a reference to the notification sink.
    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Get a reference to the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Signed-in account after the self-heal check.
    pub(crate) fn identity(&self) -> Result<Option<AccountId>> {
        Ok(SessionRegistry::new(&self.store).current_identity()?)
    }

    /// Cart owner for the current identity.
    pub(crate) fn owner(&self) -> Result<CartOwner> {
        Ok(CartOwner::from(self.identity()?))
    }

    pub(crate) fn now() -> DateTime<Utc> {
        Utc::now()
    }

    /// Header state, recomputed from the store.
    pub(crate) fn refresh(&self) -> Result<ViewState> {
        Ok(ViewState::refresh(&self.store)?)
    }

    pub(crate) fn success(&self, message: &str) {
        self.notifier.notify(message, NoticeKind::Success);
    }

    /// Run `op`; on failure, log it and show the user its message.
    pub(crate) fn run<T>(&self, action: &str, op: impl FnOnce() -> Result<T>) -> Result<T> {
        op().inspect_err(|err| {
            if err.is_fatal() {
                error!(action, error = %err, "Operation failed");
            } else {
                debug!(action, error = %err, "Operation rejected");
            }
            self.notifier.notify(&err.user_message(), NoticeKind::Error);
        })
    }
}
