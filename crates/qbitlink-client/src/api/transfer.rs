//! Global transfer endpoints.

use serde_json::Value;

use crate::client::QbitClient;
use crate::error::ClientResult;

impl QbitClient {
    /// Global transfer statistics.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed or the payload is not JSON.
    pub async fn transfer_info(&self) -> ClientResult<Value> {
        self.get_json("/api/v2/transfer/info", Vec::new()).await
    }

    /// Set the global download speed limit in bytes per second.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn set_global_download_limit(&self, limit: i64) -> ClientResult<()> {
        self.post_form(
            "/api/v2/transfer/setDownloadLimit",
            vec![("limit".to_string(), limit.to_string())],
        )
        .await?;
        Ok(())
    }

    /// Set the global upload speed limit in bytes per second.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn set_global_upload_limit(&self, limit: i64) -> ClientResult<()> {
        self.post_form(
            "/api/v2/transfer/setUploadLimit",
            vec![("limit".to_string(), limit.to_string())],
        )
        .await?;
        Ok(())
    }

    /// Toggle alternative speed limits.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn toggle_speed_limits_mode(&self) -> ClientResult<()> {
        self.post_form("/api/v2/transfer/toggleSpeedLimitMode", Vec::new())
            .await?;
        Ok(())
    }
}
