//! Storage key constants.

/// Storage keys used by the template flows
pub struct StorageKeys;

impl StorageKeys {
    /// Bearer token of the signed-in session
    pub const ACCESS_TOKEN: &'static str = "access_token";
}
