//! Incremental sync endpoints.

use serde_json::Value;

use crate::client::QbitClient;
use crate::error::ClientResult;

impl QbitClient {
    /// Incremental main-data payload. `rid` is the response identifier from
    /// the previous call, `0` for a full snapshot.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed or the payload is not JSON.
    pub async fn sync_main_data(&self, rid: i64) -> ClientResult<Value> {
        self.get_json(
            "/api/v2/sync/maindata",
            vec![("rid".to_string(), rid.to_string())],
        )
        .await
    }
}
