//! Request option types.

use serde::{Deserialize, Serialize};

use crate::request::FormPairs;

/// Options accepted by the torrent-add endpoint.
///
/// Field names mirror the daemon's form fields. Every optional field is
/// omitted from the wire when unset; `urls` accepts one or more magnet
/// links or torrent URLs separated by newlines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddTorrentOptions {
    /// Torrent URLs or magnet links, newline separated.
    pub urls: String,
    /// Download folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savepath: Option<String>,
    /// Cookie sent when fetching the torrent URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,
    /// Category for the torrent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Comma-separated tags for the torrent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// Skip hash checking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_checking: Option<bool>,
    /// Add in the paused state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    /// Create the root folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_folder: Option<String>,
    /// Rename the torrent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rename: Option<String>,
    /// Upload speed limit in bytes per second.
    #[serde(rename = "upLimit", skip_serializing_if = "Option::is_none")]
    pub up_limit: Option<i64>,
    /// Download speed limit in bytes per second.
    #[serde(rename = "dlLimit", skip_serializing_if = "Option::is_none")]
    pub dl_limit: Option<i64>,
    /// Share ratio limit.
    #[serde(rename = "ratioLimit", skip_serializing_if = "Option::is_none")]
    pub ratio_limit: Option<f64>,
    /// Seeding time limit in minutes.
    #[serde(rename = "seedingTimeLimit", skip_serializing_if = "Option::is_none")]
    pub seeding_time_limit: Option<i64>,
    /// Use automatic torrent management.
    #[serde(rename = "autoTMM", skip_serializing_if = "Option::is_none")]
    pub auto_tmm: Option<bool>,
    /// Enable sequential download.
    #[serde(rename = "sequentialDownload", skip_serializing_if = "Option::is_none")]
    pub sequential_download: Option<bool>,
    /// Prioritize first and last pieces.
    #[serde(rename = "firstLastPiecePrio", skip_serializing_if = "Option::is_none")]
    pub first_last_piece_prio: Option<bool>,
}

impl AddTorrentOptions {
    /// Options carrying only the torrent sources.
    #[must_use]
    pub fn new(urls: impl Into<String>) -> Self {
        Self {
            urls: urls.into(),
            ..Self::default()
        }
    }

    /// Encode into multipart text parts, applying the omission invariants.
    #[must_use]
    pub fn into_parts(self) -> Vec<(String, String)> {
        let mut pairs = FormPairs::new();
        pairs.field("urls", self.urls);
        pairs.opt_field("savepath", self.savepath);
        pairs.opt_field("cookie", self.cookie);
        pairs.opt_field("category", self.category);
        pairs.opt_field("tags", self.tags);
        pairs.flag("skip_checking", self.skip_checking);
        pairs.flag("paused", self.paused);
        pairs.opt_field("root_folder", self.root_folder);
        pairs.opt_field("rename", self.rename);
        pairs.opt_number("upLimit", self.up_limit);
        pairs.opt_number("dlLimit", self.dl_limit);
        pairs.opt_number("ratioLimit", self.ratio_limit);
        pairs.opt_number("seedingTimeLimit", self.seeding_time_limit);
        pairs.flag("autoTMM", self.auto_tmm);
        pairs.flag("sequentialDownload", self.sequential_download);
        pairs.flag("firstLastPiecePrio", self.first_last_piece_prio);
        pairs.into_pairs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_never_reach_the_wire() {
        let options = AddTorrentOptions {
            paused: Some(true),
            ..AddTorrentOptions::new("magnet:?xt=urn:btih:abc")
        };
        let parts = options.into_parts();
        assert!(parts.contains(&("urls".to_string(), "magnet:?xt=urn:btih:abc".to_string())));
        assert!(parts.contains(&("paused".to_string(), "true".to_string())));
        assert!(parts.iter().all(|(name, _)| name != "category"));
    }

    #[test]
    fn numeric_limits_encode_as_strings() {
        let options = AddTorrentOptions {
            dl_limit: Some(1_048_576),
            ratio_limit: Some(1.5),
            ..AddTorrentOptions::new("http://example.com/a.torrent")
        };
        let parts = options.into_parts();
        assert!(parts.contains(&("dlLimit".to_string(), "1048576".to_string())));
        assert!(parts.contains(&("ratioLimit".to_string(), "1.5".to_string())));
    }

    #[test]
    fn wire_names_decode_from_json() {
        let options: AddTorrentOptions = serde_json::from_value(serde_json::json!({
            "urls": "magnet:?xt=urn:btih:abc",
            "autoTMM": true,
            "seedingTimeLimit": 120,
        }))
        .expect("valid options");
        assert_eq!(options.auto_tmm, Some(true));
        assert_eq!(options.seeding_time_limit, Some(120));
        assert_eq!(options.paused, None);
    }
}
