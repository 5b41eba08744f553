mod config;
mod keys;
mod profile;
mod store;


pub use config::{SessionStoreBuilder, SessionStoreConfiguration};
pub use keys::{KeyNamespace, SessionKey};
pub use profile::{Session, UserProfile};
pub use store::SessionStore;
