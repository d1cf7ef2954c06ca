//! Header refresh and cross-tab sync.

use tracing::{debug, trace};

use crate::db::{RepositoryError, keys};
use crate::error::Result;
use crate::services::notify::NotificationSink;
use crate::state::Storefront;
use crate::store::{KeyValueStore, MemoryStore, StorageEvent};
use crate::view::ViewState;

impl<S: KeyValueStore, N: NotificationSink> Storefront<S, N> {
    /// Current header state. Clears a dangling session as a side effect.
    ///
    /// # Errors
    ///
    /// Returns a fatal `AppError` if the store fails.
    pub fn view(&self) -> Result<ViewState> {
        self.run("view", || self.refresh())
    }

    /// React to a write made by another tab.
    ///
    /// Returns the refreshed header state, or `None` if the changed key
    /// does not affect it.
    ///
    /// # Errors
    ///
    /// Returns a fatal `AppError` if the store fails.
    pub fn on_storage_event(&self, event: &StorageEvent) -> Result<Option<ViewState>> {
        if !keys::affects_view(event.key.as_deref()) {
            trace!(key = ?event.key, "Ignoring storage event");
            return Ok(None);
        }
        debug!(key = ?event.key, "Refreshing after storage event");
        self.view().map(Some)
    }

    /// React to a batch of writes with at most one refresh.
    ///
    /// # Errors
    ///
    /// Returns a fatal `AppError` if the store fails.
    pub fn sync<I>(&self, events: I) -> Result<Option<ViewState>>
    where
        I: IntoIterator<Item = StorageEvent>,
    {
        let relevant = events
            .into_iter()
            .filter(|event| keys::affects_view(event.key.as_deref()))
            .count();
        if relevant == 0 {
            return Ok(None);
        }
        debug!(relevant, "Refreshing after storage events");
        self.view().map(Some)
    }
}

impl<N: NotificationSink> Storefront<MemoryStore, N> {
    /// Drain this tab's pending events and sync on them.
    ///
    /// # Errors
    ///
    /// Returns a fatal `AppError` if the store fails.
    pub fn poll_events(&self) -> Result<Option<ViewState>> {
        let events = self.run("poll_events", || {
            Ok(self.store().take_events().map_err(RepositoryError::from)?)
        })?;
        self.sync(events)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::config::StorefrontConfig;
    use crate::models::NewCartLine;
    use crate::services::notify::RecordingNotifier;
    use crate::state::Storefront;
    use crate::store::{MemoryBackend, MemoryStore, StorageEvent};

    fn tab(backend: &MemoryBackend) -> Storefront<MemoryStore, RecordingNotifier> {
        Storefront::new(
            backend.open_tab().unwrap(),
            RecordingNotifier::new(),
            StorefrontConfig::default(),
        )
    }

    #[test]
    fn test_irrelevant_events_are_ignored() {
        let backend = MemoryBackend::new();
        let shop = tab(&backend);

        let event = StorageEvent::changed("orders:a@b.com", Some("[]".to_owned()));
        assert_eq!(shop.on_storage_event(&event).unwrap(), None);
        let event = StorageEvent::changed("theme", Some("dark".to_owned()));
        assert_eq!(shop.sync([event]).unwrap(), None);
    }

    #[test]
    fn test_other_tab_write_refreshes() {
        let backend = MemoryBackend::new();
        let a = tab(&backend);
        let b = tab(&backend);

        a.add_to_cart(NewCartLine {
            title: "Shirt".to_owned(),
            price: "₦5,000".to_owned(),
            image: None,
        })
        .unwrap();

        assert_eq!(a.poll_events().unwrap(), None);
        let view = b.poll_events().unwrap().unwrap();
        assert_eq!(view.cart_count, 1);
        // Drained.
        assert_eq!(b.poll_events().unwrap(), None);
    }

    #[test]
    fn test_cleared_store_refreshes() {
        let backend = MemoryBackend::new();
        let shop = tab(&backend);
        let view = shop.on_storage_event(&StorageEvent::cleared()).unwrap();
        assert_eq!(view.unwrap().cart_count, 0);
    }
}
