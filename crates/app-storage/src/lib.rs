//! Secure storage abstraction for the template flows.
//!
//! Backends implement [`SecureStorage`]; the auth flows only see the narrow
//! [`SessionStore`] view (read / write / clear of one bearer token).
//! - [`MemoryStorage`]: process-local, used by tests and demo runs
//! - [`FileStorage`]: JSON map file with owner-only permissions, used by the CLI

mod file;
mod keys;
mod memory;
mod session;
mod traits;

pub use file::FileStorage;
pub use keys::StorageKeys;
pub use memory::MemoryStorage;
pub use session::{SecureSessionStore, SessionStore};
pub use traits::SecureStorage;

use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend-specific storage error
    #[error("Platform storage error: {0}")]
    Platform(String),

    /// Key not found
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
