use std::sync::Arc;

use log::{debug, error, warn};

use super::{KeyNamespace, Session, SessionKey, UserProfile};
use crate::{
    error::{PersistenceError, SessionError},
    persistence::SecurePersistentStore,
};

/// Persists the auth token and the signed-in user on top of a
/// [SecurePersistentStore].
///
/// The store holds no state of its own besides the resolved keys, every call goes
/// straight to the provider. Token and user are independent: saving or removing
/// one never touches the other, and nothing requires both to exist together.
///
/// Read results distinguish three cases: `Ok(None)` when the key was never written
/// or has been removed, [SessionError::Read] when the provider failed, and
/// [SessionError::Deserialization] when stored bytes could not be decoded.
#[derive(uniffi::Object)]
pub struct SessionStore {
    provider: Arc<dyn SecurePersistentStore>,
    keys: KeyNamespace,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("provider", &"...")
            .field("keys", &self.keys)
            .finish()
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl SessionStore {
    /// Creates a store using the default key names.
    #[uniffi::constructor]
    pub fn new(provider: Arc<dyn SecurePersistentStore>) -> Self {
        Self::with_keys(provider, KeyNamespace::default())
    }

    /// Overwrites the stored token. The token is stored verbatim, no validation is
    /// applied.
    pub async fn save_token(&self, token: String) -> Result<(), SessionError> {
        self.write(SessionKey::Token, token.into_bytes()).await
    }

    pub async fn get_token(&self) -> Result<Option<String>, SessionError> {
        let Some(bytes) = self.read(SessionKey::Token).await? else {
            return Ok(None);
        };

        String::from_utf8(bytes).map(Some).map_err(|e| {
            warn!("Stored token is not valid utf-8");
            SessionError::Deserialization {
                key: self.key(SessionKey::Token).to_owned(),
                error: e.to_string(),
            }
        })
    }

    pub async fn remove_token(&self) -> Result<(), SessionError> {
        self.remove(SessionKey::Token)
            .await
            .map_err(|error| self.write_error(SessionKey::Token, error))
    }

    /// Overwrites the stored user. Encoding failures are reported before the
    /// provider is called.
    pub async fn save_user(&self, profile: UserProfile) -> Result<(), SessionError> {
        let bytes = profile.encode()?;
        self.write(SessionKey::User, bytes).await
    }

    pub async fn get_user(&self) -> Result<Option<UserProfile>, SessionError> {
        let Some(bytes) = self.read(SessionKey::User).await? else {
            return Ok(None);
        };

        UserProfile::decode(self.key(SessionKey::User), &bytes)
            .map(Some)
            .inspect_err(|e| warn!("Stored user profile could not be decoded - {e}"))
    }

    pub async fn remove_user(&self) -> Result<(), SessionError> {
        self.remove(SessionKey::User)
            .await
            .map_err(|error| self.write_error(SessionKey::User, error))
    }

    /// Removes both the token and the user.
    ///
    /// Both removals are always attempted, concurrently. A removal that succeeded is
    /// not undone when the other one fails, the returned
    /// [SessionError::ClearIncomplete] tells which side is still present. Retrying
    /// is always safe.
    pub async fn clear_auth(&self) -> Result<(), SessionError> {
        let (token, user) = futures::join!(
            self.remove(SessionKey::Token),
            self.remove(SessionKey::User)
        );

        match (token, user) {
            (Ok(()), Ok(())) => {
                debug!("Session cleared");
                Ok(())
            }
            (token, user) => {
                let err = SessionError::ClearIncomplete {
                    token: token.err(),
                    user: user.err(),
                };
                error!("{err}");
                Err(err)
            }
        }
    }

    /// Reads the token and the user concurrently. If both reads fail, the token's
    /// failure is the one reported.
    pub async fn load_session(&self) -> Result<Session, SessionError> {
        let (token, user) = futures::join!(self.get_token(), self.get_user());

        Ok(Session {
            token: token?,
            user: user?,
        })
    }

    /// True when a token is stored. A failed read is reported, never treated as
    /// signed out.
    pub async fn is_authenticated(&self) -> Result<bool, SessionError> {
        Ok(self.get_token().await?.is_some())
    }
}

impl SessionStore {
    pub fn with_keys(provider: Arc<dyn SecurePersistentStore>, keys: KeyNamespace) -> Self {
        Self { provider, keys }
    }

    pub fn keys(&self) -> &KeyNamespace {
        &self.keys
    }

    fn key(&self, entity: SessionKey) -> &str {
        self.keys.key(entity)
    }

    fn write_error(&self, entity: SessionKey, error: PersistenceError) -> SessionError {
        error!("Failed to write {entity} - {error}");
        SessionError::Write {
            key: self.key(entity).to_owned(),
            error,
        }
    }

    async fn read(&self, entity: SessionKey) -> Result<Option<Vec<u8>>, SessionError> {
        let key = self.key(entity);
        match self.provider.get(key.to_owned()).await {
            Ok(value) => {
                if value.is_none() {
                    debug!("No {entity} stored");
                }
                Ok(value)
            }
            Err(error) => {
                error!("Failed to read {entity} - {error}");
                Err(SessionError::Read {
                    key: key.to_owned(),
                    error,
                })
            }
        }
    }

    async fn write(&self, entity: SessionKey, value: Vec<u8>) -> Result<(), SessionError> {
        self.provider
            .set(self.key(entity).to_owned(), value)
            .await
            .map_err(|error| self.write_error(entity, error))?;

        debug!("Stored {entity}");
        Ok(())
    }

    async fn remove(&self, entity: SessionKey) -> Result<(), PersistenceError> {
        self.provider
            .remove_entry(self.key(entity).to_owned())
            .await
            .inspect(|_| debug!("Removed {entity}"))
    }
}
