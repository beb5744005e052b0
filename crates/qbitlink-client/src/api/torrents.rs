//! Torrent lifecycle and per-torrent management endpoints.

use serde_json::Value;

use crate::client::QbitClient;
use crate::error::ClientResult;
use crate::options::AddTorrentOptions;
use crate::request::{FormPairs, bool_str, join_hashes};

impl QbitClient {
    /// Add one or more torrents by URL or magnet link.
    ///
    /// The daemon expects a multipart body for this endpoint; optional
    /// fields that are unset never reach the wire.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn add_torrent(&self, options: AddTorrentOptions) -> ClientResult<()> {
        self.post_multipart("/api/v2/torrents/add", options.into_parts())
            .await?;
        Ok(())
    }

    /// List all torrents.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed or the payload is not JSON.
    pub async fn torrents(&self) -> ClientResult<Value> {
        self.get_json("/api/v2/torrents/info", Vec::new()).await
    }

    /// Generic properties of one torrent.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed or the payload is not JSON.
    pub async fn torrent_properties(&self, hash: &str) -> ClientResult<Value> {
        self.get_json(
            "/api/v2/torrents/properties",
            vec![("hash".to_string(), hash.to_string())],
        )
        .await
    }

    /// Trackers of one torrent.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed or the payload is not JSON.
    pub async fn torrent_trackers(&self, hash: &str) -> ClientResult<Value> {
        self.get_json(
            "/api/v2/torrents/trackers",
            vec![("hash".to_string(), hash.to_string())],
        )
        .await
    }

    /// Web seeds of one torrent.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed or the payload is not JSON.
    pub async fn torrent_web_seeds(&self, hash: &str) -> ClientResult<Value> {
        self.get_json(
            "/api/v2/torrents/webseeds",
            vec![("hash".to_string(), hash.to_string())],
        )
        .await
    }

    /// File list of one torrent.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed or the payload is not JSON.
    pub async fn torrent_files(&self, hash: &str) -> ClientResult<Value> {
        self.get_json(
            "/api/v2/torrents/files",
            vec![("hash".to_string(), hash.to_string())],
        )
        .await
    }

    /// Pause the given torrents.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn pause_torrents(&self, hashes: &[String]) -> ClientResult<()> {
        self.post_hashes("/api/v2/torrents/pause", hashes, FormPairs::new())
            .await
    }

    /// Resume the given torrents.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn resume_torrents(&self, hashes: &[String]) -> ClientResult<()> {
        self.post_hashes("/api/v2/torrents/resume", hashes, FormPairs::new())
            .await
    }

    /// Delete the given torrents, optionally removing downloaded data.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn delete_torrents(&self, hashes: &[String], delete_files: bool) -> ClientResult<()> {
        let mut extra = FormPairs::new();
        extra.field("deleteFiles", bool_str(delete_files));
        self.post_hashes("/api/v2/torrents/delete", hashes, extra)
            .await
    }

    /// Recheck the given torrents.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn recheck_torrents(&self, hashes: &[String]) -> ClientResult<()> {
        self.post_hashes("/api/v2/torrents/recheck", hashes, FormPairs::new())
            .await
    }

    /// Reannounce the given torrents to their trackers.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn reannounce_torrents(&self, hashes: &[String]) -> ClientResult<()> {
        self.post_hashes("/api/v2/torrents/reannounce", hashes, FormPairs::new())
            .await
    }

    /// Move the given torrents into a category.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn set_torrent_category(&self, hashes: &[String], category: &str) -> ClientResult<()> {
        let mut extra = FormPairs::new();
        extra.field("category", category);
        self.post_hashes("/api/v2/torrents/setCategory", hashes, extra)
            .await
    }

    /// Change the save location of the given torrents.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn set_torrent_location(&self, hashes: &[String], location: &str) -> ClientResult<()> {
        let mut extra = FormPairs::new();
        extra.field("location", location);
        self.post_hashes("/api/v2/torrents/setLocation", hashes, extra)
            .await
    }

    /// Set the queue priority of the given torrents.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn set_torrent_priority(&self, hashes: &[String], priority: i32) -> ClientResult<()> {
        let mut extra = FormPairs::new();
        extra.field("priority", priority.to_string());
        self.post_hashes("/api/v2/torrents/setPriority", hashes, extra)
            .await
    }

    /// Set the per-torrent download limit in bytes per second.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn set_torrent_download_limit(
        &self,
        hashes: &[String],
        limit: i64,
    ) -> ClientResult<()> {
        let mut extra = FormPairs::new();
        extra.field("limit", limit.to_string());
        self.post_hashes("/api/v2/torrents/setDownloadLimit", hashes, extra)
            .await
    }

    /// Set the per-torrent upload limit in bytes per second.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn set_torrent_upload_limit(
        &self,
        hashes: &[String],
        limit: i64,
    ) -> ClientResult<()> {
        let mut extra = FormPairs::new();
        extra.field("limit", limit.to_string());
        self.post_hashes("/api/v2/torrents/setUploadLimit", hashes, extra)
            .await
    }

    /// Set the priority of one file within a torrent.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn set_file_priority(&self, hash: &str, id: u32, priority: i32) -> ClientResult<()> {
        self.post_form(
            "/api/v2/torrents/filePrio",
            vec![
                ("hash".to_string(), hash.to_string()),
                ("id".to_string(), id.to_string()),
                ("priority".to_string(), priority.to_string()),
            ],
        )
        .await?;
        Ok(())
    }

    /// Add trackers to one torrent. `urls` is newline separated.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn add_trackers(&self, hash: &str, urls: &str) -> ClientResult<()> {
        self.post_form(
            "/api/v2/torrents/addTrackers",
            vec![
                ("hash".to_string(), hash.to_string()),
                ("urls".to_string(), urls.to_string()),
            ],
        )
        .await?;
        Ok(())
    }

    /// Replace one tracker URL on one torrent.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn edit_tracker(
        &self,
        hash: &str,
        original_url: &str,
        new_url: &str,
    ) -> ClientResult<()> {
        self.post_form(
            "/api/v2/torrents/editTracker",
            vec![
                ("hash".to_string(), hash.to_string()),
                ("originalUrl".to_string(), original_url.to_string()),
                ("newUrl".to_string(), new_url.to_string()),
            ],
        )
        .await?;
        Ok(())
    }

    /// Remove trackers from one torrent. `urls` is newline separated.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn remove_trackers(&self, hash: &str, urls: &str) -> ClientResult<()> {
        self.post_form(
            "/api/v2/torrents/removeTrackers",
            vec![
                ("hash".to_string(), hash.to_string()),
                ("urls".to_string(), urls.to_string()),
            ],
        )
        .await?;
        Ok(())
    }

    /// Add tags to the given torrents. `tags` is comma separated.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn add_torrent_tags(&self, hashes: &[String], tags: &str) -> ClientResult<()> {
        let mut extra = FormPairs::new();
        extra.field("tags", tags);
        self.post_hashes("/api/v2/torrents/addTags", hashes, extra)
            .await
    }

    /// Remove tags from the given torrents. `tags` is comma separated.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be completed.
    pub async fn remove_torrent_tags(&self, hashes: &[String], tags: &str) -> ClientResult<()> {
        let mut extra = FormPairs::new();
        extra.field("tags", tags);
        self.post_hashes("/api/v2/torrents/removeTags", hashes, extra)
            .await
    }

    async fn post_hashes(
        &self,
        path: &'static str,
        hashes: &[String],
        extra: FormPairs,
    ) -> ClientResult<()> {
        let mut pairs = FormPairs::new();
        pairs.field("hashes", join_hashes(hashes));
        let mut body = pairs.into_pairs();
        body.extend(extra.into_pairs());
        self.post_form(path, body).await?;
        Ok(())
    }
}
