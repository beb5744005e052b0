//! Log endpoints.

use serde_json::Value;

use crate::client::QbitClient;
use crate::error::ClientResult;
use crate::request::bool_str;

impl QbitClient {
    /// Main log entries, filtered by severity class.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed or the payload is not JSON.
    pub async fn main_log(&self, normal: bool, info: bool) -> ClientResult<Value> {
        self.get_json(
            "/api/v2/log/main",
            vec![
                ("normal".to_string(), bool_str(normal).to_string()),
                ("info".to_string(), bool_str(info).to_string()),
            ],
        )
        .await
    }

    /// Tail of the log, at most `last_lines` entries.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed or the payload is not JSON.
    pub async fn peek_log(&self, last_lines: u32) -> ClientResult<Value> {
        self.get_json(
            "/api/v2/log/peek",
            vec![("lastLines".to_string(), last_lines.to_string())],
        )
        .await
    }
}
