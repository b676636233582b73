//! HTTP API client for hangout search and authentication.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use webcom_shared::{
    ApiError, AuthResponse, Hangout, HangoutsResponse, LoginRequest, SignupRequest, User,
    UsersResponse, HANGOUTS_FIND_PATH, LOGIN_PATH, SIGNUP_PATH, USERS_FIND_PATH,
};

/// Search endpoints the hangouts facade depends on.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait HangoutsApi {
    /// Hangouts of `username` whose peer matches `search`.
    async fn find_hangouts(&self, search: &str, username: &str) -> Result<Vec<Hangout>, ApiError>;

    /// Registered users matching `search`.
    async fn find_users(&self, search: &str) -> Result<Vec<User>, ApiError>;
}

/// HTTP client for the webcom server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: String::new(),
            token: None,
        }
    }

    /// Set the base URL for API requests
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Attach a bearer token to every request
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if self.base_url.is_empty() {
            if path.starts_with('/') {
                path.to_string()
            } else {
                format!("/{path}")
            }
        } else {
            let base = self.base_url.trim_end_matches('/');
            let path = path.trim_start_matches('/');
            format!("{base}/{path}")
        }
    }

    fn authorize(&self, rb: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => rb.bearer_auth(token),
            None => rb,
        }
    }

    async fn read_json<TRes: DeserializeOwned>(resp: reqwest::Response) -> Result<TRes, ApiError> {
        let status = resp.status().as_u16();
        let is_success = resp.status().is_success();

        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read body: {e}")))?;

        if !is_success {
            return Err(ApiError::Http { status, body: text });
        }

        if text.is_empty() {
            serde_json::from_str("null").map_err(|e| ApiError::Deserialize(e.to_string()))
        } else {
            serde_json::from_str(&text).map_err(|e| ApiError::Deserialize(e.to_string()))
        }
    }

    /// Make a GET request
    pub async fn get_json<TRes: DeserializeOwned>(&self, path: &str) -> Result<TRes, ApiError> {
        let url = self.url(path);
        crate::log_debug!("GET {}", url);

        let resp = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::read_json(resp).await
    }

    /// Make a POST request with JSON body
    pub async fn post_json<TReq: Serialize, TRes: DeserializeOwned>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TRes, ApiError> {
        let url = self.url(path);
        crate::log_debug!("POST {}", url);

        let body_bytes =
            serde_json::to_vec(body).map_err(|e| ApiError::Deserialize(e.to_string()))?;

        let resp = self
            .authorize(self.client.post(&url))
            .body(body_bytes)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::read_json(resp).await
    }

    // --- Auth API methods ---

    /// Log in with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post_json(LOGIN_PATH, &request).await
    }

    /// Register a new account
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        let request = SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post_json(SIGNUP_PATH, &request).await
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl HangoutsApi for ApiClient {
    async fn find_hangouts(&self, search: &str, username: &str) -> Result<Vec<Hangout>, ApiError> {
        let path = format!(
            "{}?search={}&username={}",
            HANGOUTS_FIND_PATH,
            urlencoding::encode(search),
            urlencoding::encode(username)
        );
        let response: HangoutsResponse = self.get_json(&path).await?;
        Ok(response.hangouts)
    }

    async fn find_users(&self, search: &str) -> Result<Vec<User>, ApiError> {
        let path = format!("{}?search={}", USERS_FIND_PATH, urlencoding::encode(search));
        let response: UsersResponse = self.get_json(&path).await?;
        Ok(response.users)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webcom_shared::HangoutState;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn url_joins_base_and_path() {
        let client = ApiClient::new().with_base_url("http://localhost:3000/");
        assert_eq!(client.url("/hangouts/find"), "http://localhost:3000/hangouts/find");
        assert_eq!(client.url("users/find"), "http://localhost:3000/users/find");
        assert_eq!(client.url("https://other.io/x"), "https://other.io/x");
        assert_eq!(ApiClient::new().url("users/find"), "/users/find");
    }

    #[tokio::test]
    async fn find_hangouts_sends_query_and_decodes() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/hangouts/find"))
            .and(query_param("search", "al ice"))
            .and(query_param("username", "bob"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "hangouts": [{"username": "alice", "email": "a@x.io", "state": "ACCEPTED"}]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new().with_base_url(server.uri());
        let hangouts = client.find_hangouts("al ice", "bob").await.unwrap();

        assert_eq!(hangouts.len(), 1);
        assert_eq!(hangouts[0].username, "alice");
        assert_eq!(hangouts[0].state, HangoutState::Accepted);
    }

    #[tokio::test]
    async fn find_users_decodes_results() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/find"))
            .and(query_param("search", "car"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "users": [{"username": "carol", "email": "c@x.io"}]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new().with_base_url(server.uri());
        let users = client.find_users("car").await.unwrap();
        assert_eq!(
            users,
            vec![User {
                username: "carol".into(),
                email: "c@x.io".into()
            }]
        );
    }

    #[tokio::test]
    async fn http_failure_carries_status_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/hangouts/find"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = ApiClient::new().with_base_url(server.uri());
        let err = client.find_hangouts("x", "bob").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 500,
                body: "boom".into()
            }
        );
    }

    #[tokio::test]
    async fn malformed_body_is_a_deserialize_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/find"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = ApiClient::new().with_base_url(server.uri());
        let err = client.find_users("x").await.unwrap_err();
        assert!(matches!(err, ApiError::Deserialize(_)));
    }

    #[tokio::test]
    async fn login_posts_credentials_with_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(header("authorization", "Bearer old"))
            .and(body_json(serde_json::json!({"email": "a@x.io", "password": "pw"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "t1", "username": "alice", "email": "a@x.io"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new()
            .with_base_url(server.uri())
            .with_token(Some("old".into()));
        let auth = client.login("a@x.io", "pw").await.unwrap();
        assert_eq!(auth.token, "t1");
        assert_eq!(auth.username, "alice");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let client = ApiClient::new().with_base_url("http://127.0.0.1:1");
        let err = client.find_users("x").await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
