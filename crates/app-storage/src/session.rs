//! Session token store.

use crate::{SecureStorage, StorageKeys, StorageResult};
use std::sync::Arc;
use tracing::debug;

/// Holder of the signed-in bearer token.
pub trait SessionStore: Send + Sync {
    fn read(&self) -> StorageResult<Option<String>>;

    fn write(&self, token: &str) -> StorageResult<()>;

    fn clear(&self) -> StorageResult<()>;
}

/// [`SessionStore`] over any [`SecureStorage`] backend.
pub struct SecureSessionStore {
    storage: Arc<dyn SecureStorage>,
}

impl SecureSessionStore {
    pub fn new(storage: Arc<dyn SecureStorage>) -> Self {
        Self { storage }
    }
}

impl SessionStore for SecureSessionStore {
    fn read(&self) -> StorageResult<Option<String>> {
        Ok(self
            .storage
            .get(StorageKeys::ACCESS_TOKEN)?
            .filter(|token| !token.trim().is_empty()))
    }

    fn write(&self, token: &str) -> StorageResult<()> {
        debug!("Persisting session token");
        self.storage.set(StorageKeys::ACCESS_TOKEN, token)
    }

    fn clear(&self) -> StorageResult<()> {
        let existed = self.storage.delete(StorageKeys::ACCESS_TOKEN)?;
        debug!(existed, "Cleared session token");
        Ok(())
    }
}
