//! Identity-keyed single-slot client cache.
//!
//! Hosts re-invoke actions with the same connection parameters over and
//! over; reusing one client keeps a single login lifecycle per identity.
//! The cache is a single slot, not an LRU: a differing identity key evicts
//! and replaces the previous client.

use std::fmt::Write as _;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use sha2::{Digest, Sha256};
use url::Url;

use qbitlink_client::{Credentials, HttpTransport, QbitClient, Transport};

use crate::error::{ActionError, ActionResult};

/// Connection parameters identifying one logical daemon session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionProfile {
    /// Daemon base URL.
    pub base_url: String,
    /// Optional login credentials; absent means anonymous.
    pub credentials: Option<Credentials>,
}

impl ConnectionProfile {
    /// Construct a profile.
    #[must_use]
    pub fn new(base_url: impl Into<String>, credentials: Option<Credentials>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
        }
    }

    /// Digest over base URL and credentials; two profiles with the same key
    /// refer to the same logical session.
    #[must_use]
    pub fn identity_key(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.base_url.as_bytes());
        hasher.update([0u8]);
        if let Some(credentials) = &self.credentials {
            hasher.update(credentials.username.as_bytes());
            hasher.update([0u8]);
            hasher.update(credentials.password.as_bytes());
        }
        let digest = hasher.finalize();
        let mut key = String::with_capacity(digest.len() * 2);
        for byte in digest {
            let _ = write!(key, "{byte:02x}");
        }
        key
    }

    fn parse_base_url(&self) -> ActionResult<Url> {
        Url::parse(&self.base_url).map_err(|source| ActionError::InvalidBaseUrl {
            value: self.base_url.clone(),
            source,
        })
    }
}

struct Entry {
    key: String,
    client: Arc<QbitClient>,
}

/// Single-slot client cache keyed by connection identity.
#[derive(Default)]
pub struct ClientRegistry {
    slot: Mutex<Option<Entry>>,
}

impl ClientRegistry {
    /// Empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Cached client for the profile, or a fresh one over the default HTTP
    /// transport. The fresh client starts with an unset cookie.
    ///
    /// # Errors
    ///
    /// Fails when the base URL does not parse or the transport cannot be
    /// built.
    pub fn obtain(
        &self,
        profile: &ConnectionProfile,
        timeout: Option<Duration>,
    ) -> ActionResult<Arc<QbitClient>> {
        if let Some(client) = self.cached(&profile.identity_key()) {
            return Ok(client);
        }
        let transport =
            HttpTransport::new(timeout).map_err(|source| ActionError::Transport { source })?;
        self.obtain_with(profile, Arc::new(transport))
    }

    /// Cached client for the profile, or a fresh one over the given
    /// transport. Lets tests and embedders substitute the wire layer.
    ///
    /// # Errors
    ///
    /// Fails when the base URL does not parse.
    pub fn obtain_with(
        &self,
        profile: &ConnectionProfile,
        transport: Arc<dyn Transport>,
    ) -> ActionResult<Arc<QbitClient>> {
        let key = profile.identity_key();
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = slot.as_ref() {
            if entry.key == key {
                return Ok(Arc::clone(&entry.client));
            }
            tracing::debug!("connection identity changed; replacing cached client");
        }
        let base_url = profile.parse_base_url()?;
        let client = Arc::new(QbitClient::new(
            base_url,
            profile.credentials.clone(),
            transport,
        ));
        *slot = Some(Entry {
            key,
            client: Arc::clone(&client),
        });
        Ok(client)
    }

    fn cached(&self, key: &str) -> Option<Arc<QbitClient>> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|entry| entry.key == key)
            .map(|entry| Arc::clone(&entry.client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(password: &str) -> ConnectionProfile {
        ConnectionProfile::new(
            "http://daemon.local:8080",
            Some(Credentials::new("admin", password)),
        )
    }

    #[test]
    fn identical_profiles_share_one_client() {
        let registry = ClientRegistry::new();
        let first = registry.obtain(&profile("secret"), None).expect("client");
        let second = registry.obtain(&profile("secret"), None).expect("client");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn changed_credentials_replace_the_slot() {
        let registry = ClientRegistry::new();
        let first = registry.obtain(&profile("old"), None).expect("client");
        let second = registry.obtain(&profile("new"), None).expect("client");
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(second.cookie_state().is_unset());

        // The first identity was evicted, not retained alongside.
        let third = registry.obtain(&profile("old"), None).expect("client");
        assert!(!Arc::ptr_eq(&first, &third));
    }

    #[test]
    fn anonymous_and_authenticated_profiles_differ() {
        let anonymous = ConnectionProfile::new("http://daemon.local:8080", None);
        assert_ne!(anonymous.identity_key(), profile("secret").identity_key());
    }

    #[test]
    fn identity_key_is_stable() {
        assert_eq!(
            profile("secret").identity_key(),
            profile("secret").identity_key()
        );
    }

    #[test]
    fn invalid_base_urls_are_rejected() {
        let registry = ClientRegistry::new();
        let bad = ConnectionProfile::new("not a url", None);
        let err = registry.obtain(&bad, None).expect_err("rejected");
        assert!(matches!(err, ActionError::InvalidBaseUrl { .. }));
    }
}
