//! Application endpoints: versions, build info, preferences.

use serde_json::Value;

use crate::client::QbitClient;
use crate::error::ClientResult;

impl QbitClient {
    /// Daemon application version, e.g. `v5.0.0`.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn app_version(&self) -> ClientResult<String> {
        self.get_text("/api/v2/app/version", Vec::new()).await
    }

    /// Web API version.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn webapi_version(&self) -> ClientResult<String> {
        self.get_text("/api/v2/app/webapiVersion", Vec::new()).await
    }

    /// Build information: libraries, bitness, toolchain.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed or the payload is not JSON.
    pub async fn build_info(&self) -> ClientResult<Value> {
        self.get_json("/api/v2/app/buildInfo", Vec::new()).await
    }

    /// Full daemon preferences object.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed or the payload is not JSON.
    pub async fn preferences(&self) -> ClientResult<Value> {
        self.get_json("/api/v2/app/preferences", Vec::new()).await
    }

    /// Apply a partial preferences object. The daemon expects the JSON
    /// document embedded in a `json` form field.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn set_preferences(&self, preferences: &Value) -> ClientResult<()> {
        let payload = preferences.to_string();
        self.post_form(
            "/api/v2/app/setPreferences",
            vec![("json".to_string(), payload)],
        )
        .await?;
        Ok(())
    }
}
