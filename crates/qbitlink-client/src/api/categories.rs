//! Category endpoints.

use serde_json::Value;

use crate::client::QbitClient;
use crate::error::ClientResult;
use crate::request::{FormPairs, join_lines};

impl QbitClient {
    /// All categories with their save paths.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed or the payload is not JSON.
    pub async fn categories(&self) -> ClientResult<Value> {
        self.get_json("/api/v2/torrents/categories", Vec::new())
            .await
    }

    /// Create a category. Limits are bytes per second; `0` means unlimited.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn create_category(
        &self,
        name: &str,
        save_path: &str,
        download_limit: i64,
        upload_limit: i64,
    ) -> ClientResult<()> {
        self.post_form(
            "/api/v2/torrents/createCategory",
            vec![
                ("category".to_string(), name.to_string()),
                ("savePath".to_string(), save_path.to_string()),
                ("downloadLimit".to_string(), download_limit.to_string()),
                ("uploadLimit".to_string(), upload_limit.to_string()),
            ],
        )
        .await?;
        Ok(())
    }

    /// Edit a category; unset fields are left untouched and omitted from
    /// the wire.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn edit_category(
        &self,
        name: &str,
        save_path: Option<&str>,
        download_limit: Option<i64>,
        upload_limit: Option<i64>,
    ) -> ClientResult<()> {
        let mut pairs = FormPairs::new();
        pairs.field("category", name);
        pairs.opt_field("savePath", save_path);
        pairs.opt_number("downloadLimit", download_limit);
        pairs.opt_number("uploadLimit", upload_limit);
        self.post_form("/api/v2/torrents/editCategory", pairs.into_pairs())
            .await?;
        Ok(())
    }

    /// Remove the given categories.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn remove_categories(&self, names: &[String]) -> ClientResult<()> {
        self.post_form(
            "/api/v2/torrents/removeCategories",
            vec![("categories".to_string(), join_lines(names))],
        )
        .await?;
        Ok(())
    }
}
