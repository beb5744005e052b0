//! Request/response descriptors and the transport seam.
//!
//! The client core is written against the [`Transport`] trait so tests can
//! substitute an in-process implementation; [`HttpTransport`] is the
//! reqwest-backed default. Timeouts and cancellation belong to the
//! transport, not to the client core.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use thiserror::Error;
use url::Url;

/// HTTP methods used by the daemon API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read endpoint with query-string parameters.
    Get,
    /// Write endpoint with a form-encoded or multipart body.
    Post,
}

/// Body payload attached to a [`ApiRequest`].
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded` key/value pairs.
    Form(Vec<(String, String)>),
    /// Structured JSON payload.
    Json(serde_json::Value),
    /// `multipart/form-data` text parts; the transport supplies the
    /// content-type header with its boundary.
    Multipart(Vec<(String, String)>),
}

/// Fully-specified request descriptor, constructed fresh per call.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Daemon base URL.
    pub base_url: Url,
    /// Path relative to the base URL, e.g. `/api/v2/app/version`.
    pub path: &'static str,
    /// Query-string pairs appended to the path.
    pub query: Vec<(String, String)>,
    /// Request headers.
    pub headers: Vec<(String, String)>,
    /// Optional body for write endpoints.
    pub body: Option<RequestBody>,
}

impl ApiRequest {
    /// Descriptor for a read endpoint.
    #[must_use]
    pub const fn get(base_url: Url, path: &'static str) -> Self {
        Self {
            method: Method::Get,
            base_url,
            path,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Descriptor for a write endpoint.
    #[must_use]
    pub const fn post(base_url: Url, path: &'static str) -> Self {
        Self {
            method: Method::Post,
            base_url,
            path,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Full endpoint URL with query parameters applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not join onto the base URL.
    pub fn endpoint_url(&self) -> Result<Url, TransportError> {
        let mut url = self
            .base_url
            .join(self.path)
            .map_err(|source| TransportError::Url { source })?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }

    /// Set a header, replacing any existing value for the same name.
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value));
    }
}

/// Response surfaced by a transport: status, headers, and raw body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers in received order; names lowercased.
    pub headers: Vec<(String, String)>,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// All values carried by headers with the given name, in received order.
    #[must_use]
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Body decoded as UTF-8 text, lossily.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body decoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns the decoding failure if the body is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Failure surfaced by a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The daemon rejected the request at the HTTP level.
    #[error("daemon rejected the request with status {status}")]
    Status {
        /// HTTP status code of the rejection.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },
    /// The request failed below the HTTP level.
    #[error("network request failed")]
    Network {
        /// Underlying network failure.
        #[source]
        source: reqwest::Error,
    },
    /// The request path did not form a valid URL.
    #[error("invalid request URL")]
    Url {
        /// URL parsing failure.
        #[source]
        source: url::ParseError,
    },
}

impl TransportError {
    /// HTTP status code when the failure was an HTTP-level rejection.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network { .. } | Self::Url { .. } => None,
        }
    }
}

/// Capability to perform one HTTP request against the daemon.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request, surfacing non-2xx statuses as
    /// [`TransportError::Status`].
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Default transport backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Construct a transport with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|source| TransportError::Network { source })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = request.endpoint_url()?;
        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        match request.body {
            Some(RequestBody::Form(pairs)) => builder = builder.form(&pairs),
            Some(RequestBody::Json(value)) => builder = builder.json(&value),
            Some(RequestBody::Multipart(parts)) => {
                let mut form = multipart::Form::new();
                for (name, value) in parts {
                    form = form.text(name, value);
                }
                builder = builder.multipart(form);
            }
            None => {}
        }

        let response = builder
            .send()
            .await
            .map_err(|source| TransportError::Network { source })?;
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|source| TransportError::Network { source })?
            .to_vec();

        if status.is_success() {
            Ok(ApiResponse {
                status: status.as_u16(),
                headers,
                body,
            })
        } else {
            Err(TransportError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        "http://daemon.local:8080".parse().expect("valid URL")
    }

    #[test]
    fn endpoint_url_joins_path_and_query() {
        let mut request = ApiRequest::get(base_url(), "/api/v2/log/main");
        request.query = vec![
            ("normal".to_string(), "true".to_string()),
            ("info".to_string(), "false".to_string()),
        ];
        let url = request.endpoint_url().expect("joined URL");
        assert_eq!(
            url.as_str(),
            "http://daemon.local:8080/api/v2/log/main?normal=true&info=false"
        );
    }

    #[test]
    fn set_header_replaces_case_insensitively() {
        let mut request = ApiRequest::post(base_url(), "/api/v2/torrents/pause");
        request.set_header("Cookie", "SID=old".to_string());
        request.set_header("cookie", "SID=new".to_string());
        let cookies: Vec<_> = request
            .headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("cookie"))
            .collect();
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].1, "SID=new");
    }

    #[test]
    fn header_values_preserve_received_order() {
        let response = ApiResponse {
            status: 200,
            headers: vec![
                ("set-cookie".to_string(), "SID=abc".to_string()),
                ("content-type".to_string(), "text/plain".to_string()),
                ("Set-Cookie".to_string(), "lang=en".to_string()),
            ],
            body: Vec::new(),
        };
        assert_eq!(response.header_values("set-cookie"), vec!["SID=abc", "lang=en"]);
    }
}
