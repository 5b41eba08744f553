pub mod error;
pub mod logging;
pub mod persistence;
pub mod session;

pub use self::{
    error::{PersistenceError, SessionError},
    logging::LogLevel,
    persistence::SecurePersistentStore,
    session::{
        KeyNamespace, Session, SessionKey, SessionStore, SessionStoreBuilder,
        SessionStoreConfiguration, UserProfile,
    },
};

uniffi::setup_scaffolding!();
