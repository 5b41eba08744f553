use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// The signed-in user as persisted on device. Stored as JSON with named fields,
/// all of which must be present for a stored profile to load.
#[derive(uniffi::Record, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub profile_photo_url: String,
    pub profile_completed: bool,
}

impl UserProfile {
    pub(crate) fn encode(&self) -> Result<Vec<u8>, SessionError> {
        serde_json::to_vec(self).map_err(|e| SessionError::Serialization {
            error: e.to_string(),
        })
    }

    pub(crate) fn decode(key: &str, bytes: &[u8]) -> Result<Self, SessionError> {
        serde_json::from_slice(bytes).map_err(|e| SessionError::Deserialization {
            key: key.to_owned(),
            error: e.to_string(),
        })
    }
}

/// Snapshot of whatever is currently persisted. The token and the user are read
/// independently, so either one may be missing.
#[derive(uniffi::Record, Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.user.is_none()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: "u-42".to_owned(),
            username: "ada".to_owned(),
            email: "ada@example.com".to_owned(),
            display_name: "Ada Lovelace".to_owned(),
            profile_photo_url: "https://example.com/ada.png".to_owned(),
            profile_completed: true,
        }
    }

    #[test]
    fn encodes_named_fields() {
        let bytes = profile().encode().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["id"], "u-42");
        assert_eq!(json["display_name"], "Ada Lovelace");
        assert_eq!(json["profile_completed"], true);
    }

    #[test]
    fn missing_field_is_a_decode_failure() {
        let bytes = br#"{"id":"u-42","username":"ada","email":"ada@example.com"}"#;
        let err = UserProfile::decode("auth_user", bytes).unwrap_err();

        match err {
            SessionError::Deserialization { key, error } => {
                assert_eq!(key, "auth_user");
                assert!(error.contains("missing field"), "{error}");
            }
            other => panic!("expected a decode failure, got {other:?}"),
        }
    }

    #[test]
    fn wrong_type_is_a_decode_failure() {
        let mut json = serde_json::to_value(profile()).unwrap();
        json["profile_completed"] = serde_json::json!("yes");
        let bytes = serde_json::to_vec(&json).unwrap();

        assert!(matches!(
            UserProfile::decode("auth_user", &bytes),
            Err(SessionError::Deserialization { .. })
        ));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut json = serde_json::to_value(profile()).unwrap();
        json["last_seen"] = serde_json::json!(1700000000);
        let bytes = serde_json::to_vec(&json).unwrap();

        assert_eq!(UserProfile::decode("auth_user", &bytes).unwrap(), profile());
    }

    #[test]
    fn empty_session() {
        assert!(Session::default().is_empty());
        let session = Session {
            token: Some("abc".to_owned()),
            user: None,
        };
        assert!(!session.is_empty());
    }
}
