use crate::error::SessionError;

const TOKEN_KEY: &str = "auth_token";
const USER_KEY: &str = "auth_user";

/// The two entities that make up a session. Each one lives under its own key and
/// has its own lifecycle.
#[derive(uniffi::Enum, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    Token,
    User,
}

impl SessionKey {
    pub fn default_key(&self) -> &'static str {
        match self {
            SessionKey::Token => TOKEN_KEY,
            SessionKey::User => USER_KEY,
        }
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionKey::Token => f.write_str("token"),
            SessionKey::User => f.write_str("user"),
        }
    }
}

/// Storage keys resolved once when a store is built. They never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyNamespace {
    token: String,
    user: String,
}

impl Default for KeyNamespace {
    fn default() -> Self {
        Self {
            token: TOKEN_KEY.to_owned(),
            user: USER_KEY.to_owned(),
        }
    }
}

impl KeyNamespace {
    /// Prefixes both keys with `prefix.`, so several apps or flavors sharing one
    /// backing store do not collide.
    pub fn prefixed(prefix: &str) -> Result<Self, SessionError> {
        let valid = !prefix.is_empty()
            && prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

        if !valid {
            return Err(SessionError::InvalidNamespace {
                namespace: prefix.to_owned(),
            });
        }

        Ok(Self {
            token: format!("{prefix}.{TOKEN_KEY}"),
            user: format!("{prefix}.{USER_KEY}"),
        })
    }

    pub fn key(&self, entity: SessionKey) -> &str {
        match entity {
            SessionKey::Token => &self.token,
            SessionKey::User => &self.user,
        }
    }
}
