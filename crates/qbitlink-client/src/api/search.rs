//! Search job and search plugin endpoints.

use serde_json::Value;

use crate::client::{QbitClient, decode};
use crate::error::ClientResult;
use crate::request::{bool_str, join_lines};

impl QbitClient {
    /// Start a search job; returns the daemon's job handle, e.g. `{"id": 7}`.
    ///
    /// `plugins` is `all`, `enabled`, or a `|`-separated plugin list;
    /// `category` is `all` or one plugin-defined category.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed or the payload is not JSON.
    pub async fn start_search(
        &self,
        pattern: &str,
        plugins: &str,
        category: &str,
    ) -> ClientResult<Value> {
        let response = self
            .post_form(
                "/api/v2/search/start",
                vec![
                    ("pattern".to_string(), pattern.to_string()),
                    ("plugins".to_string(), plugins.to_string()),
                    ("category".to_string(), category.to_string()),
                ],
            )
            .await?;
        decode(&response)
    }

    /// Stop a running search job.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn stop_search(&self, id: i64) -> ClientResult<()> {
        self.post_form(
            "/api/v2/search/stop",
            vec![("id".to_string(), id.to_string())],
        )
        .await?;
        Ok(())
    }

    /// Status of one search job, or of all jobs when `id` is unset.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed or the payload is not JSON.
    pub async fn search_status(&self, id: Option<i64>) -> ClientResult<Value> {
        let mut query = Vec::new();
        if let Some(id) = id {
            query.push(("id".to_string(), id.to_string()));
        }
        self.get_json("/api/v2/search/status", query).await
    }

    /// Page of results from one search job.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed or the payload is not JSON.
    pub async fn search_results(&self, id: i64, limit: i64, offset: i64) -> ClientResult<Value> {
        self.get_json(
            "/api/v2/search/results",
            vec![
                ("id".to_string(), id.to_string()),
                ("limit".to_string(), limit.to_string()),
                ("offset".to_string(), offset.to_string()),
            ],
        )
        .await
    }

    /// Delete a search job and its results.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn delete_search(&self, id: i64) -> ClientResult<()> {
        self.post_form(
            "/api/v2/search/delete",
            vec![("id".to_string(), id.to_string())],
        )
        .await?;
        Ok(())
    }

    /// Installed search plugins.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed or the payload is not JSON.
    pub async fn search_plugins(&self) -> ClientResult<Value> {
        self.get_json("/api/v2/search/plugins", Vec::new()).await
    }

    /// Install search plugins from the given sources (URLs or file paths).
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn install_search_plugin(&self, sources: &[String]) -> ClientResult<()> {
        self.post_form(
            "/api/v2/search/installPlugin",
            vec![("sources".to_string(), join_lines(sources))],
        )
        .await?;
        Ok(())
    }

    /// Uninstall the named search plugins.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn uninstall_search_plugin(&self, names: &[String]) -> ClientResult<()> {
        self.post_form(
            "/api/v2/search/uninstallPlugin",
            vec![("names".to_string(), join_lines(names))],
        )
        .await?;
        Ok(())
    }

    /// Enable or disable the named search plugins.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn enable_search_plugin(&self, names: &[String], enable: bool) -> ClientResult<()> {
        self.post_form(
            "/api/v2/search/enablePlugin",
            vec![
                ("names".to_string(), join_lines(names)),
                ("enable".to_string(), bool_str(enable).to_string()),
            ],
        )
        .await?;
        Ok(())
    }

    /// Update all search plugins.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn update_search_plugins(&self) -> ClientResult<()> {
        self.post_form("/api/v2/search/updatePlugins", Vec::new())
            .await?;
        Ok(())
    }
}
