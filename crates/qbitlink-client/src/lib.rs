#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Client for the qBittorrent Web API (v2).
//!
//! The daemon authenticates with a session cookie issued on login. Cookies
//! expire silently server-side, so the client detects staleness reactively:
//! a request rejected with 403 triggers one re-login and one retry, nothing
//! more.
//!
//! Layout:
//! - `transport.rs`: request/response descriptors and the injectable
//!   transport seam (reqwest-backed by default)
//! - `session.rs`: credentials and the cached cookie state machine
//! - `request.rs`: form-pair encoding helpers and wire invariants
//! - `client.rs`: login, header policy, and the retry-once executor
//! - `api/`: endpoint methods grouped by daemon resource
//! - `options.rs`: request option types

pub mod api;
pub mod client;
pub mod error;
pub mod options;
pub mod request;
pub mod session;
pub mod transport;

pub use client::{QbitClient, RetryOnForbidden};
pub use error::{ClientError, ClientResult};
pub use options::AddTorrentOptions;
pub use session::{CookieState, Credentials};
pub use transport::{
    ApiRequest, ApiResponse, HttpTransport, Method, RequestBody, Transport, TransportError,
};
