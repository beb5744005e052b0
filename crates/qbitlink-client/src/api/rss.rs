//! RSS feed, folder, and auto-download rule endpoints.

use serde_json::Value;

use crate::client::QbitClient;
use crate::error::ClientResult;
use crate::request::FormPairs;

impl QbitClient {
    /// All RSS items, optionally filtered.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed or the payload is not JSON.
    pub async fn rss_items(&self, filter: Option<&str>) -> ClientResult<Value> {
        let mut query = Vec::new();
        if let Some(filter) = filter {
            query.push(("filter".to_string(), filter.to_string()));
        }
        self.get_json("/api/v2/rss/items", query).await
    }

    /// Create a folder in the RSS tree.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn add_rss_folder(&self, path: &str, parent_path: Option<&str>) -> ClientResult<()> {
        let mut pairs = FormPairs::new();
        pairs.field("path", path);
        pairs.opt_field("parentPath", parent_path);
        self.post_form("/api/v2/rss/addFolder", pairs.into_pairs())
            .await?;
        Ok(())
    }

    /// Subscribe to a feed under the given item name.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn add_rss_feed(
        &self,
        url: &str,
        name: &str,
        parent_path: Option<&str>,
    ) -> ClientResult<()> {
        let mut pairs = FormPairs::new();
        pairs.field("url", url);
        pairs.field("itemPath", name);
        pairs.opt_field("parentPath", parent_path);
        self.post_form("/api/v2/rss/addFeed", pairs.into_pairs())
            .await?;
        Ok(())
    }

    /// Remove a feed or folder from the RSS tree.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn remove_rss_item(&self, path: &str) -> ClientResult<()> {
        self.post_form(
            "/api/v2/rss/removeItem",
            vec![("path".to_string(), path.to_string())],
        )
        .await?;
        Ok(())
    }

    /// Move or rename a feed or folder.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn move_rss_item(&self, item_path: &str, dest_path: &str) -> ClientResult<()> {
        self.post_form(
            "/api/v2/rss/moveItem",
            vec![
                ("itemPath".to_string(), item_path.to_string()),
                ("destPath".to_string(), dest_path.to_string()),
            ],
        )
        .await?;
        Ok(())
    }

    /// Mark a feed, or one article within it, as read.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn mark_rss_read(&self, item_path: &str, item_id: Option<&str>) -> ClientResult<()> {
        let mut pairs = FormPairs::new();
        pairs.field("itemPath", item_path);
        pairs.opt_field("itemId", item_id);
        self.post_form("/api/v2/rss/markAsRead", pairs.into_pairs())
            .await?;
        Ok(())
    }

    /// All auto-download rules.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed or the payload is not JSON.
    pub async fn rss_rules(&self) -> ClientResult<Value> {
        self.get_json("/api/v2/rss/rules", Vec::new()).await
    }

    /// Create or update an auto-download rule. The rule definition is
    /// JSON-stringified into its form field.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn set_rss_rule(&self, rule_name: &str, definition: &Value) -> ClientResult<()> {
        self.post_form(
            "/api/v2/rss/setRule",
            vec![
                ("ruleName".to_string(), rule_name.to_string()),
                ("def".to_string(), definition.to_string()),
            ],
        )
        .await?;
        Ok(())
    }

    /// Rename an auto-download rule.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn rename_rss_rule(&self, old_name: &str, new_name: &str) -> ClientResult<()> {
        self.post_form(
            "/api/v2/rss/renameRule",
            vec![
                ("oldRuleName".to_string(), old_name.to_string()),
                ("newRuleName".to_string(), new_name.to_string()),
            ],
        )
        .await?;
        Ok(())
    }

    /// Remove an auto-download rule.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn remove_rss_rule(&self, rule_name: &str) -> ClientResult<()> {
        self.post_form(
            "/api/v2/rss/removeRule",
            vec![("ruleName".to_string(), rule_name.to_string())],
        )
        .await?;
        Ok(())
    }
}
