//! Authentication session management with key-value persistence.

use serde::{Deserialize, Serialize};
use url::Url;
use webcom_shared::{AuthResponse, StorageError, WS_USERNAME_PARAM};

use crate::api_client::ApiClient;
use crate::storage::{self, KeyValueStore};

pub const STORAGE_KEY: &str = "webcom";

/// Stored session data
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub token: Option<String>,
}

impl From<AuthResponse> for AuthSession {
    fn from(resp: AuthResponse) -> Self {
        Self {
            username: resp.username,
            email: resp.email,
            token: Some(resp.token),
        }
    }
}

impl AuthSession {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            token: None,
        }
    }

    /// Restore the persisted session, if any
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<Self>, StorageError> {
        storage::load(store, STORAGE_KEY)
    }

    /// Persist this session
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<(), StorageError> {
        storage::save(store, STORAGE_KEY, self)
    }

    /// Logout and clear the persisted session
    pub fn clear<S: KeyValueStore + ?Sized>(store: &S) -> Result<(), StorageError> {
        store.remove(STORAGE_KEY)
    }

    /// Create an API client configured for this session
    pub fn client(&self, base_url: &str) -> ApiClient {
        ApiClient::new()
            .with_base_url(base_url)
            .with_token(self.token.clone())
    }

    /// Construct the WebSocket URL for this user, e.g. `ws://host/?username=alice`
    pub fn ws_url(&self, host: &str) -> Result<Url, url::ParseError> {
        ws_url(host, &self.username)
    }
}

/// Convert a host or HTTP(S) URL into the socket URL for `username`.
pub fn ws_url(host: &str, username: &str) -> Result<Url, url::ParseError> {
    let base = if host.starts_with("https://") {
        host.replacen("https://", "wss://", 1)
    } else if host.starts_with("http://") {
        host.replacen("http://", "ws://", 1)
    } else if host.starts_with("ws://") || host.starts_with("wss://") {
        host.to_string()
    } else {
        format!("ws://{host}")
    };

    let mut url = Url::parse(&base)?;
    url.set_path("/");
    url.query_pairs_mut()
        .clear()
        .append_pair(WS_USERNAME_PARAM, username);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn session_round_trips_under_webcom_key() {
        let store = MemoryStore::new();
        assert_eq!(AuthSession::load(&store).unwrap(), None);

        let session = AuthSession::from(AuthResponse {
            token: "tok".into(),
            username: "alice".into(),
            email: "alice@x.io".into(),
        });
        session.save(&store).unwrap();

        assert!(store.get("webcom").unwrap().is_some());
        assert_eq!(AuthSession::load(&store).unwrap(), Some(session));

        AuthSession::clear(&store).unwrap();
        assert_eq!(AuthSession::load(&store).unwrap(), None);
    }

    #[test]
    fn ws_url_adds_username_query() {
        assert_eq!(
            ws_url("localhost:3000", "alice").unwrap().as_str(),
            "ws://localhost:3000/?username=alice"
        );
        assert_eq!(
            ws_url("https://chat.example.com/", "a b").unwrap().as_str(),
            "wss://chat.example.com/?username=a+b"
        );
        assert_eq!(
            AuthSession::new("bob", "b@x.io").ws_url("http://10.0.0.2:8080").unwrap().as_str(),
            "ws://10.0.0.2:8080/?username=bob"
        );
    }
}
