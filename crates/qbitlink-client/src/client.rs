//! Daemon client core: login, header policy, and the retry-once executor.

use std::sync::Arc;

use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::session::{CookieState, Credentials, SessionStore};
use crate::transport::{ApiRequest, ApiResponse, RequestBody, Transport};

const LOGIN_PATH: &str = "/api/v2/auth/login";

/// Whether a 403 response may trigger the single transparent
/// re-authentication retry.
///
/// Threaded explicitly through [`QbitClient::execute`] rather than inferred
/// from call depth; the login request itself always runs with `Deny`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOnForbidden {
    /// A 403 refreshes the cookie and retries the request exactly once.
    Allow,
    /// Any failure is terminal.
    Deny,
}

/// Client for one daemon instance, holding the shared session cookie.
///
/// Cheap to share behind an [`Arc`]; every endpoint method takes `&self`.
/// Concurrent calls that both observe a stale cookie may both re-login;
/// the duplicate login is benign and the last writer wins.
pub struct QbitClient {
    transport: Arc<dyn Transport>,
    base_url: Url,
    credentials: Option<Credentials>,
    session: SessionStore,
}

impl std::fmt::Debug for QbitClient {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("QbitClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.credentials.is_some())
            .finish_non_exhaustive()
    }
}

impl QbitClient {
    /// Construct a client. Absent credentials mean anonymous operation: no
    /// login is ever issued, regardless of response status.
    #[must_use]
    pub const fn new(
        base_url: Url,
        credentials: Option<Credentials>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            transport,
            base_url,
            credentials,
            session: SessionStore::new(),
        }
    }

    /// The daemon base URL this client talks to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Snapshot of the cached session cookie.
    #[must_use]
    pub fn cookie_state(&self) -> CookieState {
        self.session.snapshot()
    }

    /// Issue the login request and normalize the issued cookie.
    ///
    /// All `Set-Cookie` values are joined with `"; "` in received order; a
    /// response without any yields [`CookieState::Active`]. Failures are
    /// never retried here and carry the transport error unchanged.
    async fn fetch_cookie(&self, credentials: &Credentials) -> ClientResult<CookieState> {
        let mut request = ApiRequest::post(self.base_url.clone(), LOGIN_PATH);
        request.set_header("Referer", self.base_url.as_str().to_string());
        request.body = Some(RequestBody::Form(vec![
            ("username".to_string(), credentials.username.clone()),
            ("password".to_string(), credentials.password.clone()),
        ]));

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|source| ClientError::Auth { source })?;

        let values = response.header_values("set-cookie");
        let state = if values.is_empty() {
            tracing::debug!("login succeeded without a cookie; session active");
            CookieState::Active
        } else {
            tracing::debug!("login succeeded; cookie cached");
            CookieState::Cookie(values.join("; "))
        };
        Ok(state)
    }

    /// Augment caller headers with session credentials.
    ///
    /// A cached cookie is attached as-is; the active-session sentinel
    /// attaches nothing. With credentials configured and no login attempted
    /// yet, logs in now and caches the result. Without credentials the
    /// request goes out anonymous.
    pub(crate) async fn authenticated_headers(
        &self,
        extra: Vec<(String, String)>,
    ) -> ClientResult<Vec<(String, String)>> {
        let mut headers = extra;
        match self.session.snapshot() {
            CookieState::Cookie(value) => headers.push(("Cookie".to_string(), value)),
            CookieState::Active => {}
            CookieState::Unset => {
                if let Some(credentials) = &self.credentials {
                    let state = self.fetch_cookie(credentials).await?;
                    self.session.store(state.clone());
                    if let Some(value) = state.header_value() {
                        headers.push(("Cookie".to_string(), value.to_string()));
                    }
                }
            }
        }
        Ok(headers)
    }

    /// Perform one logical API call with at most one transparent
    /// re-authentication retry.
    ///
    /// A 403 with retry allowed and credentials configured is treated as
    /// session expiry: the cookie is force-refreshed, the shared cache
    /// overwritten, and the request retried once with the fresh cookie.
    /// Any other failure, and any failure of the retried attempt,
    /// propagates unchanged.
    ///
    /// # Errors
    ///
    /// [`ClientError::Request`] on terminal failures, [`ClientError::Auth`]
    /// if the re-login itself fails.
    pub async fn execute(
        &self,
        request: ApiRequest,
        retry: RetryOnForbidden,
    ) -> ClientResult<ApiResponse> {
        let err = match self.transport.send(request.clone()).await {
            Ok(response) => return Ok(response),
            Err(err) => err,
        };

        let refresh = matches!(retry, RetryOnForbidden::Allow) && err.status() == Some(403);
        let Some(credentials) = self.credentials.as_ref().filter(|_| refresh) else {
            return Err(ClientError::Request { source: err });
        };

        tracing::debug!(path = request.path, "request forbidden; refreshing session cookie");
        let state = self.fetch_cookie(credentials).await?;
        self.session.store(state.clone());

        let mut retried = request;
        retried
            .headers
            .retain(|(name, _)| !name.eq_ignore_ascii_case("cookie"));
        if let Some(value) = state.header_value() {
            retried.set_header("Cookie", value.to_string());
        }
        self.transport
            .send(retried)
            .await
            .map_err(|source| ClientError::Request { source })
    }

    pub(crate) async fn get_json(
        &self,
        path: &'static str,
        query: Vec<(String, String)>,
    ) -> ClientResult<serde_json::Value> {
        let response = self.get(path, query).await?;
        decode(&response)
    }

    pub(crate) async fn get_text(
        &self,
        path: &'static str,
        query: Vec<(String, String)>,
    ) -> ClientResult<String> {
        let response = self.get(path, query).await?;
        Ok(response.text())
    }

    async fn get(
        &self,
        path: &'static str,
        query: Vec<(String, String)>,
    ) -> ClientResult<ApiResponse> {
        let mut request = ApiRequest::get(self.base_url.clone(), path);
        request.query = query;
        request.headers = self.authenticated_headers(Vec::new()).await?;
        self.execute(request, RetryOnForbidden::Allow).await
    }

    pub(crate) async fn post_form(
        &self,
        path: &'static str,
        pairs: Vec<(String, String)>,
    ) -> ClientResult<ApiResponse> {
        let mut request = ApiRequest::post(self.base_url.clone(), path);
        request.headers = self.authenticated_headers(Vec::new()).await?;
        if !pairs.is_empty() {
            request.body = Some(RequestBody::Form(pairs));
        }
        self.execute(request, RetryOnForbidden::Allow).await
    }

    pub(crate) async fn post_multipart(
        &self,
        path: &'static str,
        parts: Vec<(String, String)>,
    ) -> ClientResult<ApiResponse> {
        let mut request = ApiRequest::post(self.base_url.clone(), path);
        request.headers = self.authenticated_headers(Vec::new()).await?;
        request.body = Some(RequestBody::Multipart(parts));
        self.execute(request, RetryOnForbidden::Allow).await
    }
}

pub(crate) fn decode(response: &ApiResponse) -> ClientResult<serde_json::Value> {
    response
        .json()
        .map_err(|source| ClientError::Decode { source })
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::transport::TransportError;

    /// Transport that replays a scripted sequence of outcomes and records
    /// every request it saw.
    struct ScriptedTransport {
        script: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
        seen: Mutex<Vec<ApiRequest>>,
    }

    impl ScriptedTransport {
        fn new(script: Vec<Result<ApiResponse, TransportError>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<ApiRequest> {
            self.seen.lock().expect("request log").clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
            self.seen.lock().expect("request log").push(request);
            self.script
                .lock()
                .expect("script")
                .pop_front()
                .expect("scripted outcome for every request")
        }
    }

    fn ok_text(body: &str) -> Result<ApiResponse, TransportError> {
        Ok(ApiResponse {
            status: 200,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        })
    }

    fn login_ok(cookie: &str) -> Result<ApiResponse, TransportError> {
        Ok(ApiResponse {
            status: 200,
            headers: vec![("set-cookie".to_string(), cookie.to_string())],
            body: b"Ok.".to_vec(),
        })
    }

    fn rejected(status: u16) -> Result<ApiResponse, TransportError> {
        Err(TransportError::Status {
            status,
            body: String::new(),
        })
    }

    fn cookie_of(request: &ApiRequest) -> Option<&str> {
        request
            .headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("cookie"))
            .map(|(_, value)| value.as_str())
    }

    fn client(transport: Arc<ScriptedTransport>, credentials: Option<Credentials>) -> QbitClient {
        QbitClient::new(
            "http://daemon.local:8080".parse().expect("valid URL"),
            credentials,
            transport,
        )
    }

    #[tokio::test]
    async fn first_call_logs_in_once_and_caches_the_cookie() {
        let transport = ScriptedTransport::new(vec![
            login_ok("SID=one"),
            ok_text("v5.0.0"),
            ok_text("v5.0.0"),
        ]);
        let client = client(
            Arc::clone(&transport),
            Some(Credentials::new("admin", "adminadmin")),
        );

        client.app_version().await.expect("first call");
        client.app_version().await.expect("second call");

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].path, LOGIN_PATH);
        assert_eq!(cookie_of(&requests[1]), Some("SID=one"));
        assert_eq!(cookie_of(&requests[2]), Some("SID=one"));
        assert_eq!(client.cookie_state(), CookieState::Cookie("SID=one".to_string()));
    }

    #[tokio::test]
    async fn forbidden_triggers_one_relogin_and_one_retry() {
        let transport = ScriptedTransport::new(vec![
            login_ok("SID=stale"),
            rejected(403),
            login_ok("SID=fresh"),
            ok_text("[]"),
        ]);
        let client = client(
            Arc::clone(&transport),
            Some(Credentials::new("admin", "adminadmin")),
        );

        client.torrents().await.expect("retried call succeeds");

        let requests = transport.requests();
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[2].path, LOGIN_PATH);
        assert_eq!(cookie_of(&requests[3]), Some("SID=fresh"));
        assert_eq!(
            client.cookie_state(),
            CookieState::Cookie("SID=fresh".to_string())
        );
    }

    #[tokio::test]
    async fn retried_attempt_failure_surfaces_the_second_error() {
        let transport = ScriptedTransport::new(vec![
            login_ok("SID=stale"),
            rejected(403),
            login_ok("SID=fresh"),
            rejected(500),
        ]);
        let client = client(
            Arc::clone(&transport),
            Some(Credentials::new("admin", "adminadmin")),
        );

        let err = client.torrents().await.expect_err("second attempt fails");
        assert_eq!(err.status(), Some(500));
        assert_eq!(transport.requests().len(), 4);
    }

    #[tokio::test]
    async fn repeat_forbidden_is_terminal() {
        let transport = ScriptedTransport::new(vec![
            login_ok("SID=stale"),
            rejected(403),
            login_ok("SID=fresh"),
            rejected(403),
        ]);
        let client = client(
            Arc::clone(&transport),
            Some(Credentials::new("admin", "adminadmin")),
        );

        let err = client.torrents().await.expect_err("retry does not loop");
        assert_eq!(err.status(), Some(403));
        assert_eq!(transport.requests().len(), 4);
    }

    #[tokio::test]
    async fn anonymous_clients_never_log_in() {
        let transport = ScriptedTransport::new(vec![rejected(403)]);
        let client = client(Arc::clone(&transport), None);

        let err = client.torrents().await.expect_err("forbidden is terminal");
        assert_eq!(err.status(), Some(403));
        assert_eq!(transport.requests().len(), 1);
        assert!(client.cookie_state().is_unset());
    }

    #[tokio::test]
    async fn multiple_set_cookie_values_join_in_order() {
        let transport = ScriptedTransport::new(vec![
            Ok(ApiResponse {
                status: 200,
                headers: vec![
                    ("set-cookie".to_string(), "SID=abc".to_string()),
                    ("set-cookie".to_string(), "lang=en".to_string()),
                ],
                body: b"Ok.".to_vec(),
            }),
            ok_text("v5.0.0"),
        ]);
        let client = client(
            Arc::clone(&transport),
            Some(Credentials::new("admin", "adminadmin")),
        );

        client.app_version().await.expect("call succeeds");
        assert_eq!(
            cookie_of(&transport.requests()[1]),
            Some("SID=abc; lang=en")
        );
    }

    #[tokio::test]
    async fn cookieless_login_marks_the_session_active() {
        let transport = ScriptedTransport::new(vec![
            ok_text("Ok."),
            ok_text("v5.0.0"),
            ok_text("v5.0.0"),
        ]);
        let client = client(
            Arc::clone(&transport),
            Some(Credentials::new("admin", "adminadmin")),
        );

        client.app_version().await.expect("first call");
        client.app_version().await.expect("second call");

        let requests = transport.requests();
        // One login for two calls, and no cookie header on either request.
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].path, LOGIN_PATH);
        assert_eq!(cookie_of(&requests[1]), None);
        assert_eq!(cookie_of(&requests[2]), None);
        assert_eq!(client.cookie_state(), CookieState::Active);
    }

    #[tokio::test]
    async fn failed_login_surfaces_as_auth_error() {
        let transport = ScriptedTransport::new(vec![rejected(401)]);
        let client = client(
            Arc::clone(&transport),
            Some(Credentials::new("admin", "wrong")),
        );

        let err = client.app_version().await.expect_err("login fails");
        assert!(matches!(err, ClientError::Auth { .. }));
        assert_eq!(transport.requests().len(), 1);
        assert!(client.cookie_state().is_unset());
    }
}
