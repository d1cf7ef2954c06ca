//! In-process store with cross-tab change events.
//!
//! A [`MemoryBackend`] is the shared "browser profile". Each
//! [`MemoryStore`] opened on it is one tab: writes made through a tab are
//! queued as [`StorageEvent`]s for every *other* open tab, never for the
//! writer itself.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use super::{KeyValueStore, StorageEvent, StoreError};

#[derive(Default)]
struct Inner {
    data: BTreeMap<String, String>,
    queues: HashMap<u64, VecDeque<StorageEvent>>,
    next_tab: u64,
    offline: bool,
    /// Key → writes still allowed before every write to it fails.
    failing_keys: BTreeMap<String, usize>,
}

impl Inner {
    fn check_available(&self) -> Result<(), StoreError> {
        if self.offline {
            return Err(StoreError::Unavailable("memory store is offline".to_owned()));
        }
        Ok(())
    }

    fn check_writable(&mut self, key: &str) -> Result<(), StoreError> {
        self.check_available()?;
        if let Some(allowed) = self.failing_keys.get_mut(key) {
            if *allowed == 0 {
                return Err(StoreError::Unavailable(format!("write to {key} rejected")));
            }
            *allowed -= 1;
        }
        Ok(())
    }

    fn broadcast(&mut self, from: u64, event: &StorageEvent) {
        for (tab, queue) in &mut self.queues {
            if *tab != from {
                queue.push_back(event.clone());
            }
        }
    }
}

/// Shared state behind every tab of one in-memory "browser profile".
#[derive(Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new tab on this backend.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the backend lock is poisoned.
    pub fn open_tab(&self) -> Result<MemoryStore, StoreError> {
        let mut inner = self.lock()?;
        let tab = inner.next_tab;
        inner.next_tab += 1;
        inner.queues.insert(tab, VecDeque::new());
        drop(inner);

        Ok(MemoryStore {
            backend: self.clone(),
            tab,
        })
    }

    /// Make every read and write fail until switched back.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the backend lock is poisoned.
    pub fn set_offline(&self, offline: bool) -> Result<(), StoreError> {
        self.lock()?.offline = offline;
        Ok(())
    }

    /// Reject writes and removals of `key`; reads keep working.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the backend lock is poisoned.
    pub fn fail_writes_to(&self, key: &str) -> Result<(), StoreError> {
        self.fail_writes_to_after(key, 0)
    }

    /// Let `allowed` more writes or removals of `key` through, then reject
    /// the rest like [`Self::fail_writes_to`].
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the backend lock is poisoned.
    pub fn fail_writes_to_after(&self, key: &str, allowed: usize) -> Result<(), StoreError> {
        self.lock()?.failing_keys.insert(key.to_owned(), allowed);
        Ok(())
    }

    /// Undo every [`Self::fail_writes_to`].
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the backend lock is poisoned.
    pub fn clear_write_failures(&self) -> Result<(), StoreError> {
        self.lock()?.failing_keys.clear();
        Ok(())
    }

    /// Copy of every stored key and value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the backend lock is poisoned.
    pub fn snapshot(&self) -> Result<BTreeMap<String, String>, StoreError> {
        Ok(self.lock()?.data.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_owned()))
    }
}

/// One tab's handle on a [`MemoryBackend`].
pub struct MemoryStore {
    backend: MemoryBackend,
    tab: u64,
}

impl MemoryStore {
    /// Open a single tab on a fresh, private backend.
    #[must_use]
    pub fn new() -> Self {
        let mut inner = Inner {
            next_tab: 1,
            ..Inner::default()
        };
        inner.queues.insert(0, VecDeque::new());

        Self {
            backend: MemoryBackend {
                inner: Arc::new(Mutex::new(inner)),
            },
            tab: 0,
        }
    }

    /// The backend this tab belongs to.
    #[must_use]
    pub const fn backend(&self) -> &MemoryBackend {
        &self.backend
    }

    /// Drain the change events other tabs have produced since the last call.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the backend lock is poisoned.
    pub fn take_events(&self) -> Result<Vec<StorageEvent>, StoreError> {
        let mut inner = self.backend.lock()?;
        Ok(inner
            .queues
            .get_mut(&self.tab)
            .map(|queue| queue.drain(..).collect())
            .unwrap_or_default())
    }

    /// Remove every key, notifying other tabs with a keyless event.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store is offline.
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut inner = self.backend.lock()?;
        inner.check_available()?;
        inner.data.clear();
        inner.broadcast(self.tab, &StorageEvent::cleared());
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MemoryStore {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.backend.inner.lock() {
            inner.queues.remove(&self.tab);
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let inner = self.backend.lock()?;
        inner.check_available()?;
        Ok(inner.data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.backend.lock()?;
        inner.check_writable(key)?;
        inner.data.insert(key.to_owned(), value.to_owned());
        inner.broadcast(self.tab, &StorageEvent::changed(key, Some(value.to_owned())));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut inner = self.backend.lock()?;
        inner.check_writable(key)?;
        if inner.data.remove(key).is_some() {
            inner.broadcast(self.tab, &StorageEvent::changed(key, None));
        }
        Ok(())
    }
}
