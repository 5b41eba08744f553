use std::sync::{Arc, Mutex};

use super::{KeyNamespace, SessionStore};
use crate::{
    error::SessionError,
    logging::{init_log, set_log_level, LogLevel},
    persistence::SecurePersistentStore,
};

#[derive(Default, Clone)]
pub struct SessionStoreConfiguration {
    /// Where the token and user are persisted. Required.
    pub persistence_provider: Option<Arc<dyn SecurePersistentStore>>,
    /// Optional prefix applied to both storage keys.
    pub key_namespace: Option<String>,
    /// Initial log level - defaults to [LogLevel::Info]
    pub log_level: LogLevel,
}

impl std::fmt::Debug for SessionStoreConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStoreConfiguration")
            .field(
                "persistence_provider",
                &self.persistence_provider.is_some().then_some("..."),
            )
            .field("key_namespace", &self.key_namespace)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// A configuration interface for building a [SessionStore].
///
/// At minimum a persistence provider must be set, see
/// [SessionStoreBuilder::set_persistence_provider].
#[derive(uniffi::Object, Default)]
pub struct SessionStoreBuilder {
    config: Mutex<SessionStoreConfiguration>,
}

impl SessionStoreBuilder {
    fn with_config<T>(&self, f: impl FnOnce(&mut SessionStoreConfiguration) -> T) -> T {
        let mut config = self
            .config
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut config)
    }
}

#[uniffi::export]
impl SessionStoreBuilder {
    #[uniffi::constructor]
    pub fn new() -> Self {
        Self {
            config: Default::default(),
        }
    }

    /// Provides the platform storage the token and user are written to.
    pub fn set_persistence_provider(&self, provider: Arc<dyn SecurePersistentStore>) {
        self.with_config(|config| config.persistence_provider = Some(provider));
    }

    /// Prefixes both storage keys, e.g. `com.example.app` stores the token under
    /// `com.example.app.auth_token`. Validated when [SessionStoreBuilder::build] is called.
    pub fn set_key_namespace(&self, namespace: String) {
        self.with_config(|config| config.key_namespace = Some(namespace));
    }

    /// Set the log filter level.
    ///
    /// By Default the log filter is set to [LogLevel::Info]
    pub fn set_log_level(&self, level: LogLevel) {
        self.with_config(|config| config.log_level = level);
    }

    /// Returns the current log level setting.
    pub fn log_level(&self) -> LogLevel {
        self.with_config(|config| config.log_level)
    }

    pub fn build(&self) -> Result<Arc<SessionStore>, SessionError> {
        let config = self.with_config(|config| config.clone());

        init_log(config.log_level);
        set_log_level(config.log_level);

        let provider = config
            .persistence_provider
            .ok_or(SessionError::NoPersistenceProvider)?;

        let keys = match config.key_namespace.as_deref() {
            Some(namespace) => KeyNamespace::prefixed(namespace)?,
            None => KeyNamespace::default(),
        };

        log::debug!("Building session store with {keys:?}");
        Ok(Arc::new(SessionStore::with_keys(provider, keys)))
    }
}
