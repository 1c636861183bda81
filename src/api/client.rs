//! API client for communicating with the Voyaga REST backend.
//!
//! `ApiClient` issues JSON requests with a bearer credential attached from
//! the session, transparently recovers from credential expiry with a single
//! refresh-and-retry sequence, and reports failures through the injected
//! [`Notifier`] according to the request's silent flag.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::auth::Session;
use crate::models::{
    AuthPayload, ChatReply, ChatTurn, Notification, RegisterRequest, User, Wallet,
};
use crate::notify::{Notifier, ToastKind};

use super::error::{self, ApiError};

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// The original client relied on transport defaults; 30s fails fast enough
/// for an interactive tool while tolerating a slow backend.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Credential refresh endpoint. Called without bearer auth: the refresh
/// credential in the body is the authorization.
const REFRESH_PATH: &str = "/api/auth/token/refresh/";

/// API client for the Voyaga backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    /// Create a client reporting user-visible failures to `notifier`.
    pub fn with_notifier(base_url: impl Into<String>, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            http,
            base_url,
            notifier,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ========================================================================
    // Request core
    // ========================================================================

    /// Issue a JSON request and resolve it to a parsed payload.
    ///
    /// Attaches the session's access credential when present. On a 401,
    /// exactly one refresh is attempted: if it succeeds the request is
    /// retried once (a 401 on the retry is handled as an ordinary error,
    /// never a second refresh); if it fails while an access credential was
    /// held, the whole session is cleared.
    ///
    /// An empty body on an ok status is an empty-object success. Non-ok
    /// responses surface an extracted message through the notifier unless
    /// `silent`; network-level failures are surfaced only for non-GET,
    /// non-silent requests (background reads fail quietly).
    pub async fn request_value(
        &self,
        session: &mut Session,
        method: Method,
        path: &str,
        body: Option<&Value>,
        silent: bool,
    ) -> Result<Value, ApiError> {
        let response = match self
            .send_once(session.access_token(), &method, path, body)
            .await
        {
            Ok(r) => r,
            Err(e) => return Err(self.network_failure(e, &method, path, silent)),
        };

        let response = if response.status() == StatusCode::UNAUTHORIZED {
            match self.refresh_access(session).await {
                Ok(()) => {
                    debug!(path, "Access credential refreshed, retrying request");
                    match self
                        .send_once(session.access_token(), &method, path, body)
                        .await
                    {
                        Ok(r) => r,
                        Err(e) => return Err(self.network_failure(e, &method, path, silent)),
                    }
                }
                Err(e) => {
                    debug!(path, error = %e, "Credential refresh failed");
                    if session.access_token().is_some() {
                        // Irrecoverable expiry: tear the session down entirely
                        if let Err(clear_err) = session.clear() {
                            warn!(error = %clear_err, "Failed to clear session");
                        }
                        if !silent {
                            self.notifier
                                .notify(ToastKind::Error, "Session expired. Please sign in again.");
                        }
                        return Err(ApiError::SessionExpired);
                    }
                    return Err(ApiError::Unauthorized);
                }
            }
        } else {
            response
        };

        self.finish(response, &method, silent).await
    }

    /// Single send attempt, no recovery.
    async fn send_once(
        &self,
        token: Option<&str>,
        method: &Method,
        path: &str,
        body: Option<&Value>,
    ) -> reqwest::Result<reqwest::Response> {
        let mut request = self.http.request(method.clone(), self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send().await
    }

    /// Read and interpret a response body per the outcome rules.
    async fn finish(
        &self,
        response: reqwest::Response,
        method: &Method,
        silent: bool,
    ) -> Result<Value, ApiError> {
        let status = response.status();
        let text = match response.text().await {
            Ok(t) => t,
            Err(e) => return Err(self.network_failure(e, method, "<body>", silent)),
        };

        if text.is_empty() {
            return if status.is_success() {
                Ok(Value::Object(Map::new()))
            } else {
                // Empty error body carries nothing to show the user
                Err(ApiError::InvalidResponse(status))
            };
        }

        let data: Value = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(e) => {
                debug!(
                    status = %status,
                    body = %error::truncate_body(&text),
                    error = %e,
                    "Response body is not JSON"
                );
                if !status.is_success() && !silent {
                    self.notifier.notify(ToastKind::Error, error::SERVER_ERROR);
                }
                return Err(ApiError::InvalidResponse(status));
            }
        };

        if !status.is_success() {
            let message = error::extract_error(&data);
            if !silent {
                self.notifier.notify(ToastKind::Error, &message);
            }
            return Err(ApiError::Api { status, message });
        }

        Ok(data)
    }

    /// Normalize a network-level failure, surfacing it only for
    /// user-triggered (non-GET) requests.
    fn network_failure(
        &self,
        err: reqwest::Error,
        method: &Method,
        path: &str,
        silent: bool,
    ) -> ApiError {
        warn!(path, error = %err, "Request failed at the network level");
        if !silent && *method != Method::GET {
            self.notifier.notify(ToastKind::Error, error::CONNECT_ERROR);
        }
        ApiError::Network(err)
    }

    /// Exchange the stored refresh credential for a new access credential.
    /// On success the session's access credential is replaced and persisted.
    async fn refresh_access(&self, session: &mut Session) -> Result<()> {
        let refresh = session
            .refresh_token()
            .context("No refresh credential stored")?
            .to_string();

        let response = self
            .http
            .post(self.url(REFRESH_PATH))
            .json(&serde_json::json!({ "refresh": refresh }))
            .send()
            .await
            .context("Failed to send refresh request")?;

        if !response.status().is_success() {
            anyhow::bail!("Refresh rejected with status {}", response.status());
        }

        #[derive(serde::Deserialize)]
        struct Refreshed {
            access: String,
        }

        let refreshed: Refreshed = response
            .json()
            .await
            .context("Failed to parse refresh response")?;
        session.replace_access(refreshed.access)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        session: &mut Session,
        path: &str,
        silent: bool,
    ) -> Result<T, ApiError> {
        let value = self
            .request_value(session, Method::GET, path, None, silent)
            .await?;
        serde_json::from_value(value).map_err(ApiError::Decode)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        session: &mut Session,
        path: &str,
        body: &Value,
        silent: bool,
    ) -> Result<T, ApiError> {
        let value = self
            .request_value(session, Method::POST, path, Some(body), silent)
            .await?;
        serde_json::from_value(value).map_err(ApiError::Decode)
    }

    // ===== Auth =====

    /// Sign in and establish a persisted session.
    pub async fn login(&self, session: &mut Session, email: &str, password: &str) -> Result<User> {
        let body = serde_json::json!({ "email": email, "password": password });
        let payload: AuthPayload = self
            .post_json(session, "/api/auth/login/", &body, false)
            .await?;
        session.establish(
            payload.tokens.access,
            payload.tokens.refresh,
            payload.user.clone(),
        )?;
        Ok(payload.user)
    }

    /// Create an account and establish a persisted session.
    /// The returned payload's `message` carries the dev-mode OTP hint.
    pub async fn register(
        &self,
        session: &mut Session,
        request: &RegisterRequest,
    ) -> Result<AuthPayload> {
        let body = serde_json::to_value(request)?;
        let payload: AuthPayload = self
            .post_json(session, "/api/auth/register/", &body, false)
            .await?;
        session.establish(
            payload.tokens.access.clone(),
            payload.tokens.refresh.clone(),
            payload.user.clone(),
        )?;
        Ok(payload)
    }

    /// Verify the emailed OTP code. Unauthenticated.
    pub async fn verify_otp(&self, session: &mut Session, email: &str, code: &str) -> Result<String> {
        let body = serde_json::json!({ "email": email, "code": code });
        let value = self
            .request_value(session, Method::POST, "/api/auth/verify-otp/", Some(&body), false)
            .await?;
        Ok(value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Email verified")
            .to_string())
    }

    /// Fetch the signed-in user's profile and refresh the session snapshot.
    pub async fn profile(&self, session: &mut Session) -> Result<User> {
        let user: User = self.get_json(session, "/api/auth/profile/", false).await?;
        session.update_user(user.clone())?;
        Ok(user)
    }

    // ===== Notifications =====

    /// Fetch the user's notifications. A background read: failures are
    /// never surfaced through the notifier.
    pub async fn notifications(&self, session: &mut Session) -> Result<Vec<Notification>> {
        let value = self
            .request_value(session, Method::GET, "/api/auth/notifications/", None, true)
            .await?;

        // Accept a bare array or a paginated {results: [...]} wrapper
        if let Ok(list) = serde_json::from_value::<Vec<Notification>>(value.clone()) {
            return Ok(list);
        }

        #[derive(serde::Deserialize)]
        struct Wrapper {
            #[serde(default)]
            results: Vec<Notification>,
        }

        let wrapper: Wrapper = serde_json::from_value(value).map_err(ApiError::Decode)?;
        Ok(wrapper.results)
    }

    /// Mark a single notification as read.
    pub async fn mark_notification_read(&self, session: &mut Session, id: i64) -> Result<()> {
        let path = format!("/api/auth/notifications/{}/read/", id);
        self.request_value(session, Method::POST, &path, None, false)
            .await?;
        Ok(())
    }

    // ===== Chat =====

    /// Send a message to the Voya assistant, replaying prior turns so it
    /// keeps conversational context.
    pub async fn chat(
        &self,
        session: &mut Session,
        message: &str,
        history: &[ChatTurn],
    ) -> Result<String> {
        let body = serde_json::json!({ "message": message, "history": history });
        let reply: ChatReply = self.post_json(session, "/api/auth/chat/", &body, false).await?;
        Ok(reply.reply)
    }

    // ===== Payments =====

    /// Fetch the wallet balance and mirror it into the session's profile
    /// snapshot, as the web UI keeps its stored user in sync.
    pub async fn wallet_balance(&self, session: &mut Session) -> Result<f64> {
        let wallet: Wallet = self.get_json(session, "/api/payments/wallet/", false).await?;
        session.update_wallet_balance(wallet.balance)?;
        Ok(wallet.balance)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use mockito::Matcher;
    use serde_json::json;

    fn test_user_value() -> Value {
        json!({
            "id": 1,
            "email": "ada@example.com",
            "username": "ada",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "wallet_balance": "10.00"
        })
    }

    fn client_for(url: &str) -> (ApiClient, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let client = ApiClient::with_notifier(url, notifier.clone()).unwrap();
        (client, notifier)
    }

    fn session_with_tokens(dir: &std::path::Path, access: &str, refresh: &str) -> Session {
        let mut session = Session::new(dir.to_path_buf());
        let user: User = serde_json::from_value(test_user_value()).unwrap();
        session
            .establish(access.to_string(), refresh.to_string(), user)
            .unwrap();
        session
    }

    #[tokio::test]
    async fn test_stale_credential_refreshed_and_retried_once() {
        let mut server = mockito::Server::new_async().await;
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_tokens(dir.path(), "stale", "ref");

        let stale = server
            .mock("GET", "/api/payments/wallet/")
            .match_header("authorization", "Bearer stale")
            .with_status(401)
            .with_body(r#"{"detail": "Token expired"}"#)
            .expect(1)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/api/auth/token/refresh/")
            .match_body(Matcher::Json(json!({"refresh": "ref"})))
            .with_status(200)
            .with_body(r#"{"access": "fresh"}"#)
            .expect(1)
            .create_async()
            .await;
        let retried = server
            .mock("GET", "/api/payments/wallet/")
            .match_header("authorization", "Bearer fresh")
            .with_status(200)
            .with_body(r#"{"balance": 25.0}"#)
            .expect(1)
            .create_async()
            .await;

        let (client, notifier) = client_for(&server.url());
        let balance = client.wallet_balance(&mut session).await.unwrap();

        stale.assert_async().await;
        refresh.assert_async().await;
        retried.assert_async().await;
        assert_eq!(balance, 25.0);
        assert_eq!(session.access_token(), Some("fresh"));
        assert_eq!(session.refresh_token(), Some("ref"));
        assert_eq!(session.user().unwrap().wallet_balance, 25.0);
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_failure_clears_entire_session() {
        let mut server = mockito::Server::new_async().await;
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_tokens(dir.path(), "stale", "dead");

        let first = server
            .mock("GET", "/api/payments/wallet/")
            .with_status(401)
            .expect(1)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/api/auth/token/refresh/")
            .with_status(401)
            .with_body(r#"{"detail": "Token is invalid"}"#)
            .expect(1)
            .create_async()
            .await;

        let (client, notifier) = client_for(&server.url());
        let err = client.wallet_balance(&mut session).await.unwrap_err();

        first.assert_async().await;
        refresh.assert_async().await;
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::SessionExpired)
        ));
        assert!(!session.is_authenticated());
        assert!(!dir.path().join("session.json").exists());
        assert_eq!(notifier.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_retried_request_401_does_not_refresh_again() {
        let mut server = mockito::Server::new_async().await;
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_tokens(dir.path(), "stale", "ref");

        // Resource rejects both credentials; only one refresh may happen
        let resource = server
            .mock("GET", "/api/payments/wallet/")
            .with_status(401)
            .with_body(r#"{"detail": "Still unauthorized"}"#)
            .expect(2)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/api/auth/token/refresh/")
            .with_status(200)
            .with_body(r#"{"access": "fresh"}"#)
            .expect(1)
            .create_async()
            .await;

        let (client, _notifier) = client_for(&server.url());
        let err = client.wallet_balance(&mut session).await.unwrap_err();

        resource.assert_async().await;
        refresh.assert_async().await;
        match err.downcast_ref::<ApiError>() {
            Some(ApiError::Api { message, .. }) => assert_eq!(message, "Still unauthorized"),
            other => panic!("Expected Api error, got {:?}", other),
        }
        // Session survives: only irrecoverable refresh failures tear it down
        assert!(session.is_authenticated());
        assert_eq!(session.access_token(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_401_without_credentials_fails_without_refresh() {
        let mut server = mockito::Server::new_async().await;
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(dir.path().to_path_buf());

        let resource = server
            .mock("GET", "/api/payments/wallet/")
            .with_status(401)
            .expect(1)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/api/auth/token/refresh/")
            .expect(0)
            .create_async()
            .await;

        let (client, notifier) = client_for(&server.url());
        let err = client
            .request_value(&mut session, Method::GET, "/api/payments/wallet/", None, false)
            .await
            .unwrap_err();

        resource.assert_async().await;
        refresh.assert_async().await;
        assert!(matches!(err, ApiError::Unauthorized));
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_quiet_for_get_loud_for_post() {
        // Nothing listens on the discard port, so sends fail immediately
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(dir.path().to_path_buf());
        let (client, notifier) = client_for("http://127.0.0.1:9");

        let err = client
            .request_value(&mut session, Method::GET, "/api/properties/", None, false)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert!(notifier.messages().is_empty());

        let err = client
            .request_value(
                &mut session,
                Method::POST,
                "/api/auth/login/",
                Some(&json!({})),
                false,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(
            notifier.messages(),
            vec![(ToastKind::Error, error::CONNECT_ERROR.to_string())]
        );
    }

    #[tokio::test]
    async fn test_empty_body_ok_is_empty_success() {
        let mut server = mockito::Server::new_async().await;
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(dir.path().to_path_buf());

        let mock = server
            .mock("POST", "/api/auth/notifications/5/read/")
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        let (client, notifier) = client_for(&server.url());
        let value = client
            .request_value(
                &mut session,
                Method::POST,
                "/api/auth/notifications/5/read/",
                None,
                false,
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(value, Value::Object(Map::new()));
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_empty_body_error_fails_without_notification() {
        let mut server = mockito::Server::new_async().await;
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(dir.path().to_path_buf());

        let mock = server
            .mock("GET", "/api/payments/wallet/")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let (client, notifier) = client_for(&server.url());
        let err = client
            .request_value(&mut session, Method::GET, "/api/payments/wallet/", None, false)
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, ApiError::InvalidResponse(_)));
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_non_json_error_body_reports_generic_message() {
        let mut server = mockito::Server::new_async().await;
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(dir.path().to_path_buf());

        let mock = server
            .mock("POST", "/api/auth/login/")
            .with_status(500)
            .with_body("<html>Internal Server Error</html>")
            .expect(2)
            .create_async()
            .await;

        let (client, notifier) = client_for(&server.url());
        let err = client
            .request_value(
                &mut session,
                Method::POST,
                "/api/auth/login/",
                Some(&json!({})),
                false,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
        assert_eq!(
            notifier.messages(),
            vec![(ToastKind::Error, error::SERVER_ERROR.to_string())]
        );

        // Silent requests swallow the same failure
        let err = client
            .request_value(
                &mut session,
                Method::POST,
                "/api/auth/login/",
                Some(&json!({})),
                true,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
        assert_eq!(notifier.messages().len(), 1);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_validation_error_surfaced_from_field_map() {
        let mut server = mockito::Server::new_async().await;
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(dir.path().to_path_buf());

        let mock = server
            .mock("POST", "/api/auth/register/")
            .with_status(400)
            .with_body(r#"{"email": ["already exists"]}"#)
            .expect(1)
            .create_async()
            .await;

        let (client, notifier) = client_for(&server.url());
        let err = client
            .request_value(
                &mut session,
                Method::POST,
                "/api/auth/register/",
                Some(&json!({})),
                false,
            )
            .await
            .unwrap_err();

        mock.assert_async().await;
        match err {
            ApiError::Api { message, .. } => assert_eq!(message, "email: already exists"),
            other => panic!("Expected Api error, got {:?}", other),
        }
        assert_eq!(
            notifier.messages(),
            vec![(ToastKind::Error, "email: already exists".to_string())]
        );
    }

    #[tokio::test]
    async fn test_login_establishes_persisted_session() {
        let mut server = mockito::Server::new_async().await;
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(dir.path().to_path_buf());

        let mock = server
            .mock("POST", "/api/auth/login/")
            .match_body(Matcher::Json(
                json!({"email": "ada@example.com", "password": "pw"}),
            ))
            .with_status(200)
            .with_body(
                json!({
                    "user": test_user_value(),
                    "tokens": {"access": "acc", "refresh": "ref"}
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let (client, _notifier) = client_for(&server.url());
        let user = client
            .login(&mut session, "ada@example.com", "pw")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(user.display_name(), "Ada");
        assert_eq!(session.access_token(), Some("acc"));
        assert_eq!(session.refresh_token(), Some("ref"));

        // Session survives a reload from disk
        let mut reloaded = Session::new(dir.path().to_path_buf());
        assert!(reloaded.load().unwrap());
        assert_eq!(reloaded.access_token(), Some("acc"));
    }

    #[tokio::test]
    async fn test_notifications_accepts_bare_array() {
        let mut server = mockito::Server::new_async().await;
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_tokens(dir.path(), "acc", "ref");
        let (client, _notifier) = client_for(&server.url());

        let mock = server
            .mock("GET", "/api/auth/notifications/")
            .with_status(200)
            .with_body(r#"[{"id": 1, "title": "Booking confirmed"}]"#)
            .expect(1)
            .create_async()
            .await;

        let list = client.notifications(&mut session).await.unwrap();
        mock.assert_async().await;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].title, "Booking confirmed");
    }

    #[tokio::test]
    async fn test_notifications_accepts_paginated_wrapper() {
        let mut server = mockito::Server::new_async().await;
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_tokens(dir.path(), "acc", "ref");
        let (client, _notifier) = client_for(&server.url());

        let mock = server
            .mock("GET", "/api/auth/notifications/")
            .with_status(200)
            .with_body(r#"{"count": 1, "results": [{"id": 2, "title": "New review"}]}"#)
            .expect(1)
            .create_async()
            .await;

        let list = client.notifications(&mut session).await.unwrap();
        mock.assert_async().await;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, 2);
    }

    #[tokio::test]
    async fn test_chat_round_trip_with_history() {
        let mut server = mockito::Server::new_async().await;
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_tokens(dir.path(), "acc", "ref");

        let mock = server
            .mock("POST", "/api/auth/chat/")
            .match_body(Matcher::Json(json!({
                "message": "Any beach houses?",
                "history": [{"role": "user", "content": "hi"}, {"role": "assistant", "content": "Hello!"}]
            })))
            .with_status(200)
            .with_body(r#"{"reply": "Yes, three in Lisbon."}"#)
            .expect(1)
            .create_async()
            .await;

        let (client, _notifier) = client_for(&server.url());
        let history = vec![ChatTurn::user("hi"), ChatTurn::assistant("Hello!")];
        let reply = client
            .chat(&mut session, "Any beach houses?", &history)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(reply, "Yes, three in Lisbon.");
    }
}
