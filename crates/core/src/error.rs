/// Failures reported by a [SecurePersistentStore](crate::SecurePersistentStore) implementation.
///
/// Hosts raise these from their platform storage code, the store never
/// constructs them for its own failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error, uniffi::Error)]
pub enum PersistenceError {
    #[error("Backend read failed - {error}")]
    Read { error: String },
    #[error("Backend write failed - {error}")]
    Write { error: String },
    #[error("Unexpected persistence failure - {error}")]
    Unexpected { error: String },
}

// Foreign implementations may throw something outside of the declared error type,
// uniffi routes those through here.
impl From<uniffi::UnexpectedUniFFICallbackError> for PersistenceError {
    fn from(value: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::Unexpected {
            error: value.reason,
        }
    }
}

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum SessionError {
    #[error("Failed to read `{key}` - {error}")]
    Read { key: String, error: PersistenceError },

    #[error("Failed to write `{key}` - {error}")]
    Write { key: String, error: PersistenceError },

    #[error("Failed to serialize the user profile - {error}")]
    Serialization { error: String },

    #[error("Stored value under `{key}` could not be decoded - {error}")]
    Deserialization { key: String, error: String },

    #[error("Session was only partially cleared (token: {}, user: {})", describe(.token), describe(.user))]
    ClearIncomplete {
        token: Option<PersistenceError>,
        user: Option<PersistenceError>,
    },

    #[error("No persistence provider was configured")]
    NoPersistenceProvider,

    #[error("Invalid key namespace `{namespace}`")]
    InvalidNamespace { namespace: String },
}

fn describe(outcome: &Option<PersistenceError>) -> String {
    match outcome {
        Some(error) => error.to_string(),
        None => "cleared".to_owned(),
    }
}

impl SessionError {
    /// True when the failure came from the backend rather than from the stored data,
    /// in which case retrying may succeed.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            Self::Read { .. } | Self::Write { .. } | Self::ClearIncomplete { .. }
        )
    }
}
