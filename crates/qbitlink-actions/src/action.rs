//! Operation enum, parameter decoding, and dispatch.
//!
//! Operation identifiers are the camelCase names the workflow host uses on
//! the wire. Decoding and dispatch are separate steps so a host can reject
//! a bad request before any client is constructed.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use qbitlink_client::{AddTorrentOptions, QbitClient};

use crate::error::{ActionError, ActionResult};

/// One or many strings. Hosts may pass either a single pre-joined value or
/// an array; arrays are joined with the operation's wire separator.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListParam {
    /// A single value, passed through unchanged.
    One(String),
    /// Multiple values to be joined.
    Many(Vec<String>),
}

impl ListParam {
    /// Flatten into a vector of values.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

/// Torrent selection shared by the multi-hash operations.
#[derive(Debug, Clone, Deserialize)]
pub struct HashesParams {
    /// Target torrent hashes.
    pub hashes: ListParam,
}

/// Single-torrent selection.
#[derive(Debug, Clone, Deserialize)]
pub struct HashParams {
    /// Target torrent hash.
    pub hash: String,
}

/// Parameters for torrent deletion.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTorrentParams {
    /// Target torrent hashes.
    pub hashes: ListParam,
    /// Also remove downloaded data.
    #[serde(default)]
    pub delete_files: bool,
}

/// Parameters for assigning a category to torrents.
#[derive(Debug, Clone, Deserialize)]
pub struct SetCategoryParams {
    /// Target torrent hashes.
    pub hashes: ListParam,
    /// Category name; empty clears the category.
    pub category: String,
}

/// Parameters for moving torrents to a new save location.
#[derive(Debug, Clone, Deserialize)]
pub struct SetLocationParams {
    /// Target torrent hashes.
    pub hashes: ListParam,
    /// New save location.
    pub location: String,
}

/// Parameters for changing torrent queue priority.
#[derive(Debug, Clone, Deserialize)]
pub struct SetPriorityParams {
    /// Target torrent hashes.
    pub hashes: ListParam,
    /// New priority value.
    pub priority: i32,
}

/// Parameters for per-torrent speed limits.
#[derive(Debug, Clone, Deserialize)]
pub struct TorrentLimitParams {
    /// Target torrent hashes.
    pub hashes: ListParam,
    /// Limit in bytes per second.
    pub limit: i64,
}

/// Parameters for tagging operations on torrents.
#[derive(Debug, Clone, Deserialize)]
pub struct TorrentTagsParams {
    /// Target torrent hashes.
    pub hashes: ListParam,
    /// Comma-separated tags.
    pub tags: String,
}

/// Parameters for adding or removing trackers on one torrent.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerUrlsParams {
    /// Target torrent hash.
    pub hash: String,
    /// Newline-separated tracker URLs.
    pub urls: String,
}

/// Parameters for replacing one tracker URL.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTrackerParams {
    /// Target torrent hash.
    pub hash: String,
    /// Tracker URL to replace.
    pub original_url: String,
    /// Replacement tracker URL.
    pub new_url: String,
}

/// Parameters for changing one file's priority within a torrent.
#[derive(Debug, Clone, Deserialize)]
pub struct FilePriorityParams {
    /// Target torrent hash.
    pub hash: String,
    /// File index within the torrent.
    pub id: u32,
    /// New priority value.
    pub priority: i32,
}

/// Parameters for applying daemon preferences.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferencesParams {
    /// Partial preferences document.
    pub json: Value,
}

/// Parameters for reading the main log.
#[derive(Debug, Clone, Deserialize)]
pub struct LogsParams {
    /// Include normal-severity entries.
    #[serde(default = "default_true")]
    pub normal: bool,
    /// Include info-severity entries.
    #[serde(default = "default_true")]
    pub info: bool,
}

/// Parameters for peeking at the log tail.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeekLogParams {
    /// Maximum number of entries returned.
    #[serde(default = "default_last_lines")]
    pub last_lines: u32,
}

/// Parameters for the global transfer limits.
#[derive(Debug, Clone, Deserialize)]
pub struct GlobalLimitParams {
    /// Limit in bytes per second.
    pub limit: i64,
}

/// Parameters for creating a category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCategoryParams {
    /// Category name.
    pub name: String,
    /// Save path for torrents in this category.
    pub save_path: String,
    /// Download limit in bytes per second; `0` is unlimited.
    #[serde(default)]
    pub download_limit: i64,
    /// Upload limit in bytes per second; `0` is unlimited.
    #[serde(default)]
    pub upload_limit: i64,
}

/// Parameters for editing a category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCategoryParams {
    /// Category name.
    pub name: String,
    /// New save path, when changing it.
    pub save_path: Option<String>,
    /// New download limit, when changing it.
    pub download_limit: Option<i64>,
    /// New upload limit, when changing it.
    pub upload_limit: Option<i64>,
}

/// Parameters for removing categories.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoveCategoryParams {
    /// Category names to remove.
    pub categories: ListParam,
}

/// Parameters for tag creation and deletion.
#[derive(Debug, Clone, Deserialize)]
pub struct TagsParams {
    /// Comma-separated tags.
    pub tags: String,
}

/// Parameters for subscribing to an RSS feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFeedParams {
    /// Feed URL.
    pub url: String,
    /// Item name for the feed in the RSS tree.
    pub name: String,
    /// Parent folder path; empty means the tree root.
    pub parent_path: Option<String>,
}

/// Parameters for creating an RSS folder.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFolderParams {
    /// Folder path to create.
    pub path: String,
    /// Parent folder path; empty means the tree root.
    pub parent_path: Option<String>,
}

/// Parameters for removing an RSS item.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoveFeedParams {
    /// Path of the feed or folder to remove.
    pub path: String,
}

/// Parameters for moving an RSS item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveFeedParams {
    /// Current item path.
    pub item_path: String,
    /// Destination item path.
    pub dest_path: String,
}

/// Parameters for listing RSS items.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedItemsParams {
    /// Optional item filter.
    pub filter: Option<String>,
}

/// Parameters for marking RSS items as read.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadParams {
    /// Feed item path.
    pub item_path: String,
    /// Specific article identifier; unset marks the whole feed.
    pub item_ids: Option<String>,
}

/// Parameters for creating or updating an auto-download rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRuleParams {
    /// Rule name.
    pub rule_name: String,
    /// Rule definition document.
    pub rule_def: Value,
}

/// Parameters for renaming an auto-download rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRuleParams {
    /// Current rule name.
    pub old_name: String,
    /// New rule name.
    pub new_name: String,
}

/// Parameters for removing an auto-download rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRuleParams {
    /// Rule name.
    pub rule_name: String,
}

/// Parameters for starting a search job.
#[derive(Debug, Clone, Deserialize)]
pub struct StartSearchParams {
    /// Search pattern.
    pub pattern: String,
    /// `all`, `enabled`, or a `|`-separated plugin list.
    pub plugins: String,
    /// `all` or one plugin-defined category.
    #[serde(default = "default_category")]
    pub category: String,
}

/// Parameters selecting one search job.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchIdParams {
    /// Search job identifier.
    pub id: i64,
}

/// Parameters for querying search status.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchStatusParams {
    /// Search job identifier; unset queries all jobs.
    pub id: Option<i64>,
}

/// Parameters for paging through search results.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResultsParams {
    /// Search job identifier.
    pub id: i64,
    /// Maximum number of results.
    #[serde(default = "default_results_limit")]
    pub limit: i64,
    /// Result offset.
    #[serde(default)]
    pub offset: i64,
}

/// Parameters for installing search plugins.
#[derive(Debug, Clone, Deserialize)]
pub struct InstallPluginParams {
    /// Plugin sources (URLs or file paths).
    pub sources: ListParam,
}

/// Parameters for uninstalling search plugins.
#[derive(Debug, Clone, Deserialize)]
pub struct UninstallPluginParams {
    /// Plugin names.
    pub names: ListParam,
}

/// Parameters for enabling or disabling search plugins.
#[derive(Debug, Clone, Deserialize)]
pub struct EnablePluginParams {
    /// Plugin names.
    pub names: ListParam,
    /// Whether the plugins end up enabled.
    #[serde(default = "default_true")]
    pub enable: bool,
}

/// Parameters for the incremental sync payload.
#[derive(Debug, Clone, Deserialize)]
pub struct MainDataParams {
    /// Response identifier from the previous call; `0` for a full snapshot.
    #[serde(default)]
    pub rid: i64,
}

const fn default_true() -> bool {
    true
}

const fn default_last_lines() -> u32 {
    1000
}

const fn default_results_limit() -> i64 {
    100
}

fn default_category() -> String {
    "all".to_string()
}

/// A decoded operation, ready to dispatch against a client.
#[derive(Debug, Clone)]
pub enum Action {
    /// Add one or more torrents.
    AddTorrent(AddTorrentOptions),
    /// List all torrents.
    GetTorrentsList,
    /// Generic properties of one torrent.
    GetTorrentProperties(HashParams),
    /// Trackers of one torrent.
    GetTorrentTrackers(HashParams),
    /// Web seeds of one torrent.
    GetTorrentWebSeeds(HashParams),
    /// File list of one torrent.
    GetTorrentFiles(HashParams),
    /// Pause torrents.
    PauseTorrent(HashesParams),
    /// Resume torrents.
    ResumeTorrent(HashesParams),
    /// Delete torrents.
    DeleteTorrent(DeleteTorrentParams),
    /// Recheck torrents.
    RecheckTorrent(HashesParams),
    /// Reannounce torrents.
    ReannounceTorrent(HashesParams),
    /// Assign a category to torrents.
    SetCategory(SetCategoryParams),
    /// Move torrents to a new save location.
    SetLocation(SetLocationParams),
    /// Change torrent queue priority.
    SetPriority(SetPriorityParams),
    /// Set the per-torrent download limit.
    SetDownloadLimit(TorrentLimitParams),
    /// Set the per-torrent upload limit.
    SetUploadLimit(TorrentLimitParams),
    /// Change one file's priority within a torrent.
    SetFilePriority(FilePriorityParams),
    /// Add trackers to one torrent.
    AddTrackers(TrackerUrlsParams),
    /// Replace one tracker URL.
    EditTracker(EditTrackerParams),
    /// Remove trackers from one torrent.
    RemoveTrackers(TrackerUrlsParams),
    /// Add tags to torrents.
    AddTorrentTags(TorrentTagsParams),
    /// Remove tags from torrents.
    RemoveTorrentTags(TorrentTagsParams),
    /// Daemon application version.
    GetAppVersion,
    /// Legacy alias for the application version.
    GetVersion,
    /// Web API version.
    GetWebApiVersion,
    /// Full daemon preferences.
    GetPreferences,
    /// Apply a partial preferences document.
    SetPreferences(PreferencesParams),
    /// Build information.
    GetBuildInfo,
    /// Main log entries.
    GetLogs(LogsParams),
    /// Log tail.
    PeekLog(PeekLogParams),
    /// Global transfer statistics.
    GetTransferInfo,
    /// Set the global download limit.
    SetTransferDownloadLimit(GlobalLimitParams),
    /// Set the global upload limit.
    SetTransferUploadLimit(GlobalLimitParams),
    /// Toggle alternative speed limits.
    ToggleSpeedLimitMode,
    /// List categories.
    ListCategories,
    /// Create a category.
    AddCategory(AddCategoryParams),
    /// Edit a category.
    EditCategory(EditCategoryParams),
    /// Remove categories.
    RemoveCategory(RemoveCategoryParams),
    /// List tags.
    ListTags,
    /// Create tags.
    AddTags(TagsParams),
    /// Remove tags.
    RemoveTags(TagsParams),
    /// Subscribe to an RSS feed.
    AddFeed(AddFeedParams),
    /// Create an RSS folder.
    AddFolder(AddFolderParams),
    /// Remove an RSS feed or folder.
    RemoveFeed(RemoveFeedParams),
    /// Move an RSS feed or folder.
    MoveFeed(MoveFeedParams),
    /// List all RSS feeds.
    GetFeeds,
    /// List RSS items, optionally filtered.
    GetFeedItems(FeedItemsParams),
    /// Mark RSS items as read.
    MarkAsRead(MarkReadParams),
    /// Create or update an auto-download rule.
    SetRule(SetRuleParams),
    /// Rename an auto-download rule.
    RenameRule(RenameRuleParams),
    /// List auto-download rules.
    GetRules,
    /// Remove an auto-download rule.
    RemoveRule(RemoveRuleParams),
    /// Start a search job.
    StartSearch(StartSearchParams),
    /// Stop a search job.
    StopSearch(SearchIdParams),
    /// Query search status.
    GetSearchStatus(SearchStatusParams),
    /// Page through search results.
    GetSearchResults(SearchResultsParams),
    /// Delete a search job.
    DeleteSearch(SearchIdParams),
    /// List installed search plugins.
    GetSearchPlugins,
    /// Install search plugins.
    InstallPlugin(InstallPluginParams),
    /// Uninstall search plugins.
    UninstallPlugin(UninstallPluginParams),
    /// Enable or disable search plugins.
    EnablePlugin(EnablePluginParams),
    /// Update all search plugins.
    UpdatePlugins,
    /// Incremental main-data payload.
    GetMainData(MainDataParams),
}

fn decode<T: DeserializeOwned>(operation: &str, params: Value) -> ActionResult<T> {
    serde_json::from_value(params).map_err(|source| ActionError::InvalidParams {
        operation: operation.to_string(),
        source,
    })
}

impl Action {
    /// Decode an operation identifier and its parameter object.
    ///
    /// # Errors
    ///
    /// [`ActionError::UnknownOperation`] for unmapped identifiers,
    /// [`ActionError::InvalidParams`] when the parameter object does not
    /// decode for the operation.
    pub fn from_request(name: &str, params: Value) -> ActionResult<Self> {
        match name {
            "addTorrent" => Ok(Self::AddTorrent(decode(name, params)?)),
            "getTorrentsList" => Ok(Self::GetTorrentsList),
            "getTorrentProperties" => Ok(Self::GetTorrentProperties(decode(name, params)?)),
            "getTorrentTrackers" => Ok(Self::GetTorrentTrackers(decode(name, params)?)),
            "getTorrentWebSeeds" => Ok(Self::GetTorrentWebSeeds(decode(name, params)?)),
            "getTorrentFiles" => Ok(Self::GetTorrentFiles(decode(name, params)?)),
            "pauseTorrent" => Ok(Self::PauseTorrent(decode(name, params)?)),
            "resumeTorrent" => Ok(Self::ResumeTorrent(decode(name, params)?)),
            "deleteTorrent" => Ok(Self::DeleteTorrent(decode(name, params)?)),
            "recheckTorrent" => Ok(Self::RecheckTorrent(decode(name, params)?)),
            "reannounceTorrent" => Ok(Self::ReannounceTorrent(decode(name, params)?)),
            "setCategory" => Ok(Self::SetCategory(decode(name, params)?)),
            "setLocation" => Ok(Self::SetLocation(decode(name, params)?)),
            "setPriority" => Ok(Self::SetPriority(decode(name, params)?)),
            "setDownloadLimit" => Ok(Self::SetDownloadLimit(decode(name, params)?)),
            "setUploadLimit" => Ok(Self::SetUploadLimit(decode(name, params)?)),
            "setFilePriority" => Ok(Self::SetFilePriority(decode(name, params)?)),
            "addTrackers" => Ok(Self::AddTrackers(decode(name, params)?)),
            "editTracker" => Ok(Self::EditTracker(decode(name, params)?)),
            "removeTrackers" => Ok(Self::RemoveTrackers(decode(name, params)?)),
            "addTorrentTags" => Ok(Self::AddTorrentTags(decode(name, params)?)),
            "removeTorrentTags" => Ok(Self::RemoveTorrentTags(decode(name, params)?)),
            "getAppVersion" => Ok(Self::GetAppVersion),
            "getVersion" => Ok(Self::GetVersion),
            "getWebApiVersion" => Ok(Self::GetWebApiVersion),
            "getPreferences" => Ok(Self::GetPreferences),
            "setPreferences" => Ok(Self::SetPreferences(decode(name, params)?)),
            "getBuildInfo" => Ok(Self::GetBuildInfo),
            "getLogs" => Ok(Self::GetLogs(decode(name, params)?)),
            "peekLog" => Ok(Self::PeekLog(decode(name, params)?)),
            "getTransferInfo" => Ok(Self::GetTransferInfo),
            "setTransferDownloadLimit" => Ok(Self::SetTransferDownloadLimit(decode(name, params)?)),
            "setTransferUploadLimit" => Ok(Self::SetTransferUploadLimit(decode(name, params)?)),
            "toggleSpeedLimitMode" => Ok(Self::ToggleSpeedLimitMode),
            "listCategories" => Ok(Self::ListCategories),
            "addCategory" => Ok(Self::AddCategory(decode(name, params)?)),
            "editCategory" => Ok(Self::EditCategory(decode(name, params)?)),
            "removeCategory" => Ok(Self::RemoveCategory(decode(name, params)?)),
            "listTags" => Ok(Self::ListTags),
            "addTags" => Ok(Self::AddTags(decode(name, params)?)),
            "removeTags" => Ok(Self::RemoveTags(decode(name, params)?)),
            "addFeed" => Ok(Self::AddFeed(decode(name, params)?)),
            "addFolder" => Ok(Self::AddFolder(decode(name, params)?)),
            "removeFeed" => Ok(Self::RemoveFeed(decode(name, params)?)),
            "moveFeed" => Ok(Self::MoveFeed(decode(name, params)?)),
            "getFeeds" => Ok(Self::GetFeeds),
            "getFeedItems" => Ok(Self::GetFeedItems(decode(name, params)?)),
            "markAsRead" => Ok(Self::MarkAsRead(decode(name, params)?)),
            "setRule" => Ok(Self::SetRule(decode(name, params)?)),
            "renameRule" => Ok(Self::RenameRule(decode(name, params)?)),
            "getRules" => Ok(Self::GetRules),
            "removeRule" => Ok(Self::RemoveRule(decode(name, params)?)),
            "startSearch" => Ok(Self::StartSearch(decode(name, params)?)),
            "stopSearch" => Ok(Self::StopSearch(decode(name, params)?)),
            "getSearchStatus" => Ok(Self::GetSearchStatus(decode(name, params)?)),
            "getSearchResults" => Ok(Self::GetSearchResults(decode(name, params)?)),
            "deleteSearch" => Ok(Self::DeleteSearch(decode(name, params)?)),
            "getSearchPlugins" => Ok(Self::GetSearchPlugins),
            "installPlugin" => Ok(Self::InstallPlugin(decode(name, params)?)),
            "uninstallPlugin" => Ok(Self::UninstallPlugin(decode(name, params)?)),
            "enablePlugin" => Ok(Self::EnablePlugin(decode(name, params)?)),
            "updatePlugins" => Ok(Self::UpdatePlugins),
            "getMainData" => Ok(Self::GetMainData(decode(name, params)?)),
            other => Err(ActionError::UnknownOperation {
                name: other.to_string(),
            }),
        }
    }

    /// The wire identifier of this operation.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::AddTorrent(_) => "addTorrent",
            Self::GetTorrentsList => "getTorrentsList",
            Self::GetTorrentProperties(_) => "getTorrentProperties",
            Self::GetTorrentTrackers(_) => "getTorrentTrackers",
            Self::GetTorrentWebSeeds(_) => "getTorrentWebSeeds",
            Self::GetTorrentFiles(_) => "getTorrentFiles",
            Self::PauseTorrent(_) => "pauseTorrent",
            Self::ResumeTorrent(_) => "resumeTorrent",
            Self::DeleteTorrent(_) => "deleteTorrent",
            Self::RecheckTorrent(_) => "recheckTorrent",
            Self::ReannounceTorrent(_) => "reannounceTorrent",
            Self::SetCategory(_) => "setCategory",
            Self::SetLocation(_) => "setLocation",
            Self::SetPriority(_) => "setPriority",
            Self::SetDownloadLimit(_) => "setDownloadLimit",
            Self::SetUploadLimit(_) => "setUploadLimit",
            Self::SetFilePriority(_) => "setFilePriority",
            Self::AddTrackers(_) => "addTrackers",
            Self::EditTracker(_) => "editTracker",
            Self::RemoveTrackers(_) => "removeTrackers",
            Self::AddTorrentTags(_) => "addTorrentTags",
            Self::RemoveTorrentTags(_) => "removeTorrentTags",
            Self::GetAppVersion => "getAppVersion",
            Self::GetVersion => "getVersion",
            Self::GetWebApiVersion => "getWebApiVersion",
            Self::GetPreferences => "getPreferences",
            Self::SetPreferences(_) => "setPreferences",
            Self::GetBuildInfo => "getBuildInfo",
            Self::GetLogs(_) => "getLogs",
            Self::PeekLog(_) => "peekLog",
            Self::GetTransferInfo => "getTransferInfo",
            Self::SetTransferDownloadLimit(_) => "setTransferDownloadLimit",
            Self::SetTransferUploadLimit(_) => "setTransferUploadLimit",
            Self::ToggleSpeedLimitMode => "toggleSpeedLimitMode",
            Self::ListCategories => "listCategories",
            Self::AddCategory(_) => "addCategory",
            Self::EditCategory(_) => "editCategory",
            Self::RemoveCategory(_) => "removeCategory",
            Self::ListTags => "listTags",
            Self::AddTags(_) => "addTags",
            Self::RemoveTags(_) => "removeTags",
            Self::AddFeed(_) => "addFeed",
            Self::AddFolder(_) => "addFolder",
            Self::RemoveFeed(_) => "removeFeed",
            Self::MoveFeed(_) => "moveFeed",
            Self::GetFeeds => "getFeeds",
            Self::GetFeedItems(_) => "getFeedItems",
            Self::MarkAsRead(_) => "markAsRead",
            Self::SetRule(_) => "setRule",
            Self::RenameRule(_) => "renameRule",
            Self::GetRules => "getRules",
            Self::RemoveRule(_) => "removeRule",
            Self::StartSearch(_) => "startSearch",
            Self::StopSearch(_) => "stopSearch",
            Self::GetSearchStatus(_) => "getSearchStatus",
            Self::GetSearchResults(_) => "getSearchResults",
            Self::DeleteSearch(_) => "deleteSearch",
            Self::GetSearchPlugins => "getSearchPlugins",
            Self::InstallPlugin(_) => "installPlugin",
            Self::UninstallPlugin(_) => "uninstallPlugin",
            Self::EnablePlugin(_) => "enablePlugin",
            Self::UpdatePlugins => "updatePlugins",
            Self::GetMainData(_) => "getMainData",
        }
    }

    /// Dispatch against a client, returning the daemon payload as JSON.
    /// Plain-text payloads are wrapped as JSON strings; operations without
    /// a payload yield `null`.
    ///
    /// # Errors
    ///
    /// [`ActionError::Client`] when the dispatched call fails.
    #[allow(clippy::too_many_lines)]
    pub async fn run(self, client: &QbitClient) -> ActionResult<Value> {
        match self {
            Self::AddTorrent(options) => {
                client.add_torrent(options).await?;
                Ok(Value::Null)
            }
            Self::GetTorrentsList => Ok(client.torrents().await?),
            Self::GetTorrentProperties(params) => {
                Ok(client.torrent_properties(&params.hash).await?)
            }
            Self::GetTorrentTrackers(params) => Ok(client.torrent_trackers(&params.hash).await?),
            Self::GetTorrentWebSeeds(params) => Ok(client.torrent_web_seeds(&params.hash).await?),
            Self::GetTorrentFiles(params) => Ok(client.torrent_files(&params.hash).await?),
            Self::PauseTorrent(params) => {
                client.pause_torrents(&params.hashes.into_vec()).await?;
                Ok(Value::Null)
            }
            Self::ResumeTorrent(params) => {
                client.resume_torrents(&params.hashes.into_vec()).await?;
                Ok(Value::Null)
            }
            Self::DeleteTorrent(params) => {
                client
                    .delete_torrents(&params.hashes.into_vec(), params.delete_files)
                    .await?;
                Ok(Value::Null)
            }
            Self::RecheckTorrent(params) => {
                client.recheck_torrents(&params.hashes.into_vec()).await?;
                Ok(Value::Null)
            }
            Self::ReannounceTorrent(params) => {
                client
                    .reannounce_torrents(&params.hashes.into_vec())
                    .await?;
                Ok(Value::Null)
            }
            Self::SetCategory(params) => {
                client
                    .set_torrent_category(&params.hashes.into_vec(), &params.category)
                    .await?;
                Ok(Value::Null)
            }
            Self::SetLocation(params) => {
                client
                    .set_torrent_location(&params.hashes.into_vec(), &params.location)
                    .await?;
                Ok(Value::Null)
            }
            Self::SetPriority(params) => {
                client
                    .set_torrent_priority(&params.hashes.into_vec(), params.priority)
                    .await?;
                Ok(Value::Null)
            }
            Self::SetDownloadLimit(params) => {
                client
                    .set_torrent_download_limit(&params.hashes.into_vec(), params.limit)
                    .await?;
                Ok(Value::Null)
            }
            Self::SetUploadLimit(params) => {
                client
                    .set_torrent_upload_limit(&params.hashes.into_vec(), params.limit)
                    .await?;
                Ok(Value::Null)
            }
            Self::SetFilePriority(params) => {
                client
                    .set_file_priority(&params.hash, params.id, params.priority)
                    .await?;
                Ok(Value::Null)
            }
            Self::AddTrackers(params) => {
                client.add_trackers(&params.hash, &params.urls).await?;
                Ok(Value::Null)
            }
            Self::EditTracker(params) => {
                client
                    .edit_tracker(&params.hash, &params.original_url, &params.new_url)
                    .await?;
                Ok(Value::Null)
            }
            Self::RemoveTrackers(params) => {
                client.remove_trackers(&params.hash, &params.urls).await?;
                Ok(Value::Null)
            }
            Self::AddTorrentTags(params) => {
                client
                    .add_torrent_tags(&params.hashes.into_vec(), &params.tags)
                    .await?;
                Ok(Value::Null)
            }
            Self::RemoveTorrentTags(params) => {
                client
                    .remove_torrent_tags(&params.hashes.into_vec(), &params.tags)
                    .await?;
                Ok(Value::Null)
            }
            Self::GetAppVersion | Self::GetVersion => {
                Ok(Value::String(client.app_version().await?))
            }
            Self::GetWebApiVersion => Ok(Value::String(client.webapi_version().await?)),
            Self::GetPreferences => Ok(client.preferences().await?),
            Self::SetPreferences(params) => {
                client.set_preferences(&params.json).await?;
                Ok(Value::Null)
            }
            Self::GetBuildInfo => Ok(client.build_info().await?),
            Self::GetLogs(params) => Ok(client.main_log(params.normal, params.info).await?),
            Self::PeekLog(params) => Ok(client.peek_log(params.last_lines).await?),
            Self::GetTransferInfo => Ok(client.transfer_info().await?),
            Self::SetTransferDownloadLimit(params) => {
                client.set_global_download_limit(params.limit).await?;
                Ok(Value::Null)
            }
            Self::SetTransferUploadLimit(params) => {
                client.set_global_upload_limit(params.limit).await?;
                Ok(Value::Null)
            }
            Self::ToggleSpeedLimitMode => {
                client.toggle_speed_limits_mode().await?;
                Ok(Value::Null)
            }
            Self::ListCategories => Ok(client.categories().await?),
            Self::AddCategory(params) => {
                client
                    .create_category(
                        &params.name,
                        &params.save_path,
                        params.download_limit,
                        params.upload_limit,
                    )
                    .await?;
                Ok(Value::Null)
            }
            Self::EditCategory(params) => {
                client
                    .edit_category(
                        &params.name,
                        params.save_path.as_deref(),
                        params.download_limit,
                        params.upload_limit,
                    )
                    .await?;
                Ok(Value::Null)
            }
            Self::RemoveCategory(params) => {
                client
                    .remove_categories(&params.categories.into_vec())
                    .await?;
                Ok(Value::Null)
            }
            Self::ListTags => Ok(client.tags().await?),
            Self::AddTags(params) => {
                client.create_tags(&params.tags).await?;
                Ok(Value::Null)
            }
            Self::RemoveTags(params) => {
                client.delete_tags(&params.tags).await?;
                Ok(Value::Null)
            }
            Self::AddFeed(params) => {
                client
                    .add_rss_feed(&params.url, &params.name, non_empty(&params.parent_path))
                    .await?;
                Ok(Value::Null)
            }
            Self::AddFolder(params) => {
                client
                    .add_rss_folder(&params.path, non_empty(&params.parent_path))
                    .await?;
                Ok(Value::Null)
            }
            Self::RemoveFeed(params) => {
                client.remove_rss_item(&params.path).await?;
                Ok(Value::Null)
            }
            Self::MoveFeed(params) => {
                client
                    .move_rss_item(&params.item_path, &params.dest_path)
                    .await?;
                Ok(Value::Null)
            }
            Self::GetFeeds => Ok(client.rss_items(None).await?),
            Self::GetFeedItems(params) => {
                Ok(client.rss_items(non_empty(&params.filter)).await?)
            }
            Self::MarkAsRead(params) => {
                client
                    .mark_rss_read(&params.item_path, non_empty(&params.item_ids))
                    .await?;
                Ok(Value::Null)
            }
            Self::SetRule(params) => {
                client
                    .set_rss_rule(&params.rule_name, &params.rule_def)
                    .await?;
                Ok(Value::Null)
            }
            Self::RenameRule(params) => {
                client
                    .rename_rss_rule(&params.old_name, &params.new_name)
                    .await?;
                Ok(Value::Null)
            }
            Self::GetRules => Ok(client.rss_rules().await?),
            Self::RemoveRule(params) => {
                client.remove_rss_rule(&params.rule_name).await?;
                Ok(Value::Null)
            }
            Self::StartSearch(params) => Ok(client
                .start_search(&params.pattern, &params.plugins, &params.category)
                .await?),
            Self::StopSearch(params) => {
                client.stop_search(params.id).await?;
                Ok(Value::Null)
            }
            Self::GetSearchStatus(params) => Ok(client.search_status(params.id).await?),
            Self::GetSearchResults(params) => Ok(client
                .search_results(params.id, params.limit, params.offset)
                .await?),
            Self::DeleteSearch(params) => {
                client.delete_search(params.id).await?;
                Ok(Value::Null)
            }
            Self::GetSearchPlugins => Ok(client.search_plugins().await?),
            Self::InstallPlugin(params) => {
                client
                    .install_search_plugin(&params.sources.into_vec())
                    .await?;
                Ok(Value::Null)
            }
            Self::UninstallPlugin(params) => {
                client
                    .uninstall_search_plugin(&params.names.into_vec())
                    .await?;
                Ok(Value::Null)
            }
            Self::EnablePlugin(params) => {
                client
                    .enable_search_plugin(&params.names.into_vec(), params.enable)
                    .await?;
                Ok(Value::Null)
            }
            Self::UpdatePlugins => {
                client.update_search_plugins().await?;
                Ok(Value::Null)
            }
            Self::GetMainData(params) => Ok(client.sync_main_data(params.rid).await?),
        }
    }
}

/// Treat empty optional strings from hosts as unset.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
