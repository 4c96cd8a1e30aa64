//! Cart persistence seam.
//!
//! The engine only knows `load`/`save` on a [`CartRepository`]; where the
//! bytes end up is up to the implementation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::cart::{CartSnapshot, PersistedCart, STORAGE_KEY};
use crate::CommerceError;

/// Durable storage for a single cart.
pub trait CartRepository {
    /// Key the cart is stored under; storage-change notifications for this
    /// key mean another writer replaced the cart.
    fn storage_key(&self) -> &str;

    /// Read the stored cart.
    ///
    /// `Ok(None)` means nothing is stored. An `Err` means something is
    /// stored but unreadable.
    fn load(&self) -> Result<Option<CartSnapshot>, CommerceError>;

    /// Replace the stored cart with `snapshot`.
    fn save(&self, snapshot: &CartSnapshot) -> Result<(), CommerceError>;
}

impl<R: CartRepository + ?Sized> CartRepository for &R {
    fn storage_key(&self) -> &str {
        (**self).storage_key()
    }

    fn load(&self) -> Result<Option<CartSnapshot>, CommerceError> {
        (**self).load()
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), CommerceError> {
        (**self).save(snapshot)
    }
}

/// In-process repository holding the encoded document.
///
/// Clones share one slot, so two engines over clones of the same repository
/// behave like two tabs over one browser profile.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartRepository {
    slot: Arc<Mutex<Option<Vec<u8>>>>,
    fail_saves: Arc<AtomicBool>,
}

impl MemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with arbitrary stored bytes, e.g. a corrupt document.
    pub fn with_raw(raw: impl Into<Vec<u8>>) -> Self {
        let repo = Self::new();
        repo.set_raw(raw);
        repo
    }

    /// Overwrite the stored bytes directly.
    pub fn set_raw(&self, raw: impl Into<Vec<u8>>) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(raw.into());
        }
    }

    /// The stored bytes, if any.
    pub fn raw(&self) -> Option<Vec<u8>> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    /// Make subsequent saves fail, simulating a full or blocked storage.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl CartRepository for MemoryCartRepository {
    fn storage_key(&self) -> &str {
        STORAGE_KEY
    }

    fn load(&self) -> Result<Option<CartSnapshot>, CommerceError> {
        match self.raw() {
            Some(bytes) => Ok(Some(PersistedCart::decode(&bytes)?.state)),
            None => Ok(None),
        }
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), CommerceError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(CommerceError::StorageError("storage quota exceeded".to_string()));
        }
        let bytes = PersistedCart::new(snapshot.clone()).encode()?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| CommerceError::StorageError("memory slot poisoned".to_string()))?;
        *slot = Some(bytes);
        Ok(())
    }
}

/// Repository over a [`devmobile_cache::Cache`].
#[cfg(feature = "storage")]
#[derive(Debug, Clone)]
pub struct CacheCartRepository {
    cache: devmobile_cache::Cache,
    key: String,
}

#[cfg(feature = "storage")]
impl CacheCartRepository {
    /// Store the cart under the default key.
    pub fn new(cache: devmobile_cache::Cache) -> Self {
        Self::with_key(cache, STORAGE_KEY)
    }

    /// Store the cart under a custom key.
    pub fn with_key(cache: devmobile_cache::Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
        }
    }

    pub fn cache(&self) -> &devmobile_cache::Cache {
        &self.cache
    }
}

#[cfg(feature = "storage")]
impl CartRepository for CacheCartRepository {
    fn storage_key(&self) -> &str {
        &self.key
    }

    fn load(&self) -> Result<Option<CartSnapshot>, CommerceError> {
        Ok(self
            .cache
            .get::<PersistedCart>(&self.key)?
            .map(|persisted| persisted.state))
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), CommerceError> {
        self.cache
            .set(&self.key, &PersistedCart::new(snapshot.clone()))?;
        Ok(())
    }
}
