//! Tag endpoints.

use serde_json::Value;

use crate::client::QbitClient;
use crate::error::ClientResult;

impl QbitClient {
    /// All known tags.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed or the payload is not JSON.
    pub async fn tags(&self) -> ClientResult<Value> {
        self.get_json("/api/v2/torrents/tags", Vec::new()).await
    }

    /// Create tags. `tags` is comma separated.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn create_tags(&self, tags: &str) -> ClientResult<()> {
        self.post_form(
            "/api/v2/torrents/createTags",
            vec![("tags".to_string(), tags.to_string())],
        )
        .await?;
        Ok(())
    }

    /// Delete tags. `tags` is comma separated.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn delete_tags(&self, tags: &str) -> ClientResult<()> {
        self.post_form(
            "/api/v2/torrents/deleteTags",
            vec![("tags".to_string(), tags.to_string())],
        )
        .await?;
        Ok(())
    }
}
