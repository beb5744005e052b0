//! Credentials and the cached session-cookie state machine.
//!
//! The daemon issues a cookie on login and expires it silently server-side.
//! The cache is purely reactive: `Unset` until the first login, then either
//! a concrete cookie value or the active-session sentinel, and back to a
//! fresh value only when a request is rejected with 403.

use std::sync::{Mutex, PoisonError};

/// Username/password pair for daemon authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Daemon account name.
    pub username: String,
    /// Daemon account password.
    pub password: String,
}

impl Credentials {
    /// Construct a credentials pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Cached session cookie.
///
/// `Active` records a successful login whose response carried no
/// `Set-Cookie` header (e.g. the daemon bypasses authentication for the
/// client's address); nothing is sent on the wire in that state, but no
/// further login is attempted either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieState {
    /// No login has happened yet.
    Unset,
    /// Session established without a cookie to present.
    Active,
    /// Cookie value to send in the `Cookie` request header.
    Cookie(String),
}

impl CookieState {
    /// Value for the `Cookie` request header, when one must be sent.
    #[must_use]
    pub fn header_value(&self) -> Option<&str> {
        match self {
            Self::Cookie(value) => Some(value.as_str()),
            Self::Unset | Self::Active => None,
        }
    }

    /// Whether a login has ever succeeded for this state.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

/// Shared cookie cache. The lock is only held to copy state in or out,
/// never across an await; concurrent refreshes race benignly and the last
/// writer wins.
#[derive(Debug)]
pub(crate) struct SessionStore {
    state: Mutex<CookieState>,
}

impl SessionStore {
    pub(crate) const fn new() -> Self {
        Self {
            state: Mutex::new(CookieState::Unset),
        }
    }

    pub(crate) fn snapshot(&self) -> CookieState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn store(&self, state: CookieState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_starts_unset() {
        let store = SessionStore::new();
        assert!(store.snapshot().is_unset());
    }

    #[test]
    fn last_writer_wins() {
        let store = SessionStore::new();
        store.store(CookieState::Cookie("SID=first".to_string()));
        store.store(CookieState::Cookie("SID=second".to_string()));
        assert_eq!(
            store.snapshot().header_value(),
            Some("SID=second")
        );
    }

    #[test]
    fn active_sentinel_sends_nothing() {
        let store = SessionStore::new();
        store.store(CookieState::Active);
        let state = store.snapshot();
        assert!(!state.is_unset());
        assert_eq!(state.header_value(), None);
    }
}
