//! Store configuration.

/// Key under which the serialized document is persisted.
pub const STORAGE_KEY: &str = "ma_store_v1";

/// Version stamped into `meta.version` of newly created documents.
pub const APP_VERSION: &str = "v1.0.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_key: String,
    pub app_version: String,
}

impl StoreConfig {
    /// Default configuration persisting under a different key.
    ///
    /// Useful for keeping several independent stores in one backend.
    pub fn with_storage_key(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
            ..Self::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            app_version: APP_VERSION.to_string(),
        }
    }
}
