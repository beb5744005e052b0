//! Argument parsing and command dispatch.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::commands;
use crate::context::{self, AppContext, CliResult};

const DEFAULT_DAEMON_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Rendering mode for command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Pretty-printed JSON, exactly as the daemon returned it.
    Json,
    /// Compact tables where a renderer exists, JSON otherwise.
    Table,
}

#[derive(Debug, Parser)]
#[command(
    name = "qbitlink",
    version,
    about = "Administrative CLI for a qBittorrent daemon"
)]
pub(crate) struct Cli {
    /// Daemon base URL.
    #[arg(long, env = "QBITLINK_URL", default_value = DEFAULT_DAEMON_URL, global = true)]
    pub(crate) url: String,

    /// Daemon account name; omit for anonymous access.
    #[arg(long, env = "QBITLINK_USERNAME", global = true)]
    pub(crate) username: Option<String>,

    /// Daemon account password.
    #[arg(long, env = "QBITLINK_PASSWORD", hide_env_values = true, global = true)]
    pub(crate) password: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub(crate) timeout: u64,

    /// Output rendering mode.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    pub(crate) format: OutputFormat,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Torrent lifecycle and per-torrent management.
    Torrents {
        #[command(subcommand)]
        command: TorrentsCommand,
    },
    /// Application version, build info, and preferences.
    App {
        #[command(subcommand)]
        command: AppCommand,
    },
    /// Daemon log access.
    Log {
        #[command(subcommand)]
        command: LogCommand,
    },
    /// Global transfer statistics and limits.
    Transfer {
        #[command(subcommand)]
        command: TransferCommand,
    },
    /// Category management.
    Categories {
        #[command(subcommand)]
        command: CategoriesCommand,
    },
    /// Tag management.
    Tags {
        #[command(subcommand)]
        command: TagsCommand,
    },
    /// RSS feeds, folders, and auto-download rules.
    Rss {
        #[command(subcommand)]
        command: RssCommand,
    },
    /// Search jobs and search plugins.
    Search {
        #[command(subcommand)]
        command: SearchCommand,
    },
    /// Incremental main-data sync payload.
    Sync {
        /// Response identifier from the previous call; 0 for a full snapshot.
        #[arg(long, default_value_t = 0)]
        rid: i64,
    },
    /// Dispatch a raw host operation with a JSON parameter object.
    Run(RunArgs),
}

#[derive(Debug, Subcommand)]
pub(crate) enum TorrentsCommand {
    /// List all torrents.
    List,
    /// Add torrents by URL or magnet link.
    Add(TorrentAddArgs),
    /// Show generic properties of one torrent.
    Properties {
        /// Torrent hash.
        hash: String,
    },
    /// Show trackers of one torrent.
    Trackers {
        /// Torrent hash.
        hash: String,
    },
    /// Show web seeds of one torrent.
    WebSeeds {
        /// Torrent hash.
        hash: String,
    },
    /// Show the file list of one torrent.
    Files {
        /// Torrent hash.
        hash: String,
    },
    /// Pause torrents.
    Pause {
        /// Torrent hashes.
        hashes: Vec<String>,
    },
    /// Resume torrents.
    Resume {
        /// Torrent hashes.
        hashes: Vec<String>,
    },
    /// Delete torrents.
    Delete {
        /// Torrent hashes.
        hashes: Vec<String>,
        /// Also remove downloaded data.
        #[arg(long)]
        delete_files: bool,
    },
    /// Recheck torrents.
    Recheck {
        /// Torrent hashes.
        hashes: Vec<String>,
    },
    /// Reannounce torrents to their trackers.
    Reannounce {
        /// Torrent hashes.
        hashes: Vec<String>,
    },
    /// Assign a category to torrents.
    SetCategory {
        /// Category name; empty clears the category.
        #[arg(long)]
        category: String,
        /// Torrent hashes.
        hashes: Vec<String>,
    },
    /// Move torrents to a new save location.
    SetLocation {
        /// New save location.
        #[arg(long)]
        location: String,
        /// Torrent hashes.
        hashes: Vec<String>,
    },
    /// Change torrent queue priority.
    SetPriority {
        /// New priority value.
        #[arg(long)]
        priority: i32,
        /// Torrent hashes.
        hashes: Vec<String>,
    },
    /// Set the per-torrent download limit.
    SetDownloadLimit {
        /// Limit in bytes per second.
        #[arg(long)]
        limit: i64,
        /// Torrent hashes.
        hashes: Vec<String>,
    },
    /// Set the per-torrent upload limit.
    SetUploadLimit {
        /// Limit in bytes per second.
        #[arg(long)]
        limit: i64,
        /// Torrent hashes.
        hashes: Vec<String>,
    },
    /// Change one file's priority within a torrent.
    FilePriority {
        /// Torrent hash.
        hash: String,
        /// File index within the torrent.
        #[arg(long)]
        id: u32,
        /// New priority value.
        #[arg(long)]
        priority: i32,
    },
    /// Add trackers to one torrent.
    AddTrackers {
        /// Torrent hash.
        hash: String,
        /// Tracker URLs.
        urls: Vec<String>,
    },
    /// Replace one tracker URL on one torrent.
    EditTracker {
        /// Torrent hash.
        hash: String,
        /// Tracker URL to replace.
        original_url: String,
        /// Replacement tracker URL.
        new_url: String,
    },
    /// Remove trackers from one torrent.
    RemoveTrackers {
        /// Torrent hash.
        hash: String,
        /// Tracker URLs.
        urls: Vec<String>,
    },
    /// Add tags to torrents.
    AddTags {
        /// Comma-separated tags.
        #[arg(long)]
        tags: String,
        /// Torrent hashes.
        hashes: Vec<String>,
    },
    /// Remove tags from torrents.
    RemoveTags {
        /// Comma-separated tags.
        #[arg(long)]
        tags: String,
        /// Torrent hashes.
        hashes: Vec<String>,
    },
}

#[derive(Debug, Args)]
pub(crate) struct TorrentAddArgs {
    /// Torrent URLs or magnet links.
    pub(crate) urls: Vec<String>,
    /// Download folder.
    #[arg(long)]
    pub(crate) savepath: Option<String>,
    /// Cookie sent when fetching the torrent URL.
    #[arg(long)]
    pub(crate) cookie: Option<String>,
    /// Category for the torrents.
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Comma-separated tags.
    #[arg(long)]
    pub(crate) tags: Option<String>,
    /// Skip hash checking.
    #[arg(long)]
    pub(crate) skip_checking: Option<bool>,
    /// Add in the paused state.
    #[arg(long)]
    pub(crate) paused: Option<bool>,
    /// Create the root folder.
    #[arg(long)]
    pub(crate) root_folder: Option<String>,
    /// Rename the torrent.
    #[arg(long)]
    pub(crate) rename: Option<String>,
    /// Upload speed limit in bytes per second.
    #[arg(long)]
    pub(crate) up_limit: Option<i64>,
    /// Download speed limit in bytes per second.
    #[arg(long)]
    pub(crate) dl_limit: Option<i64>,
    /// Share ratio limit.
    #[arg(long)]
    pub(crate) ratio_limit: Option<f64>,
    /// Seeding time limit in minutes.
    #[arg(long)]
    pub(crate) seeding_time_limit: Option<i64>,
    /// Use automatic torrent management.
    #[arg(long)]
    pub(crate) auto_tmm: Option<bool>,
    /// Enable sequential download.
    #[arg(long)]
    pub(crate) sequential: Option<bool>,
    /// Prioritize first and last pieces.
    #[arg(long)]
    pub(crate) first_last_piece_prio: Option<bool>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum AppCommand {
    /// Daemon application version.
    Version,
    /// Web API version.
    WebapiVersion,
    /// Build information.
    BuildInfo,
    /// Full daemon preferences.
    Preferences,
    /// Apply a partial preferences document.
    SetPreferences {
        /// Preferences as a JSON object.
        json: String,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum LogCommand {
    /// Main log entries.
    Main {
        /// Exclude normal-severity entries.
        #[arg(long)]
        no_normal: bool,
        /// Exclude info-severity entries.
        #[arg(long)]
        no_info: bool,
    },
    /// Tail of the log.
    Peek {
        /// Maximum number of entries.
        #[arg(long, default_value_t = 1000)]
        last_lines: u32,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum TransferCommand {
    /// Global transfer statistics.
    Info,
    /// Set the global download limit.
    SetDownloadLimit {
        /// Limit in bytes per second.
        limit: i64,
    },
    /// Set the global upload limit.
    SetUploadLimit {
        /// Limit in bytes per second.
        limit: i64,
    },
    /// Toggle alternative speed limits.
    ToggleSpeedLimits,
}

#[derive(Debug, Subcommand)]
pub(crate) enum CategoriesCommand {
    /// List all categories.
    List,
    /// Create a category.
    Add {
        /// Category name.
        name: String,
        /// Save path for torrents in this category.
        #[arg(long)]
        save_path: String,
        /// Download limit in bytes per second; 0 is unlimited.
        #[arg(long, default_value_t = 0)]
        download_limit: i64,
        /// Upload limit in bytes per second; 0 is unlimited.
        #[arg(long, default_value_t = 0)]
        upload_limit: i64,
    },
    /// Edit a category; omitted options stay untouched.
    Edit {
        /// Category name.
        name: String,
        /// New save path.
        #[arg(long)]
        save_path: Option<String>,
        /// New download limit.
        #[arg(long)]
        download_limit: Option<i64>,
        /// New upload limit.
        #[arg(long)]
        upload_limit: Option<i64>,
    },
    /// Remove categories.
    Remove {
        /// Category names.
        names: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum TagsCommand {
    /// List all tags.
    List,
    /// Create tags.
    Add {
        /// Comma-separated tags.
        tags: String,
    },
    /// Remove tags.
    Remove {
        /// Comma-separated tags.
        tags: String,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum RssCommand {
    /// List RSS items, optionally filtered.
    Items {
        /// Item filter.
        #[arg(long)]
        filter: Option<String>,
    },
    /// Create a folder in the RSS tree.
    AddFolder {
        /// Folder path.
        path: String,
        /// Parent folder path.
        #[arg(long)]
        parent: Option<String>,
    },
    /// Subscribe to a feed.
    AddFeed {
        /// Feed URL.
        url: String,
        /// Item name for the feed.
        #[arg(long)]
        name: String,
        /// Parent folder path.
        #[arg(long)]
        parent: Option<String>,
    },
    /// Remove a feed or folder.
    RemoveItem {
        /// Item path.
        path: String,
    },
    /// Move or rename a feed or folder.
    MoveItem {
        /// Current item path.
        from: String,
        /// Destination item path.
        to: String,
    },
    /// Mark a feed, or one article, as read.
    MarkRead {
        /// Feed item path.
        path: String,
        /// Specific article identifier.
        #[arg(long)]
        article: Option<String>,
    },
    /// List auto-download rules.
    Rules,
    /// Create or update an auto-download rule.
    SetRule {
        /// Rule name.
        name: String,
        /// Rule definition as a JSON object.
        #[arg(long)]
        definition: String,
    },
    /// Rename an auto-download rule.
    RenameRule {
        /// Current rule name.
        old: String,
        /// New rule name.
        new: String,
    },
    /// Remove an auto-download rule.
    RemoveRule {
        /// Rule name.
        name: String,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum SearchCommand {
    /// Start a search job.
    Start {
        /// Search pattern.
        pattern: String,
        /// all, enabled, or a |-separated plugin list.
        #[arg(long, default_value = "enabled")]
        plugins: String,
        /// all or one plugin-defined category.
        #[arg(long, default_value = "all")]
        category: String,
    },
    /// Stop a running search job.
    Stop {
        /// Search job identifier.
        id: i64,
    },
    /// Query search status.
    Status {
        /// Search job identifier; omit for all jobs.
        #[arg(long)]
        id: Option<i64>,
    },
    /// Page through search results.
    Results {
        /// Search job identifier.
        id: i64,
        /// Maximum number of results.
        #[arg(long, default_value_t = 100)]
        limit: i64,
        /// Result offset.
        #[arg(long, default_value_t = 0)]
        offset: i64,
    },
    /// Delete a search job and its results.
    Delete {
        /// Search job identifier.
        id: i64,
    },
    /// List installed search plugins.
    Plugins,
    /// Install search plugins from sources.
    InstallPlugin {
        /// Plugin sources (URLs or file paths).
        sources: Vec<String>,
    },
    /// Uninstall search plugins.
    UninstallPlugin {
        /// Plugin names.
        names: Vec<String>,
    },
    /// Enable or disable search plugins.
    EnablePlugin {
        /// Plugin names.
        names: Vec<String>,
        /// Disable instead of enable.
        #[arg(long)]
        disable: bool,
    },
    /// Update all search plugins.
    UpdatePlugins,
}

#[derive(Debug, Args)]
pub(crate) struct RunArgs {
    /// Operation identifier, e.g. `getTorrentsList`.
    pub(crate) operation: String,
    /// Parameter object as JSON.
    #[arg(long, default_value = "{}")]
    pub(crate) params: String,
}

/// Parses CLI arguments, executes the requested command, and returns the
/// process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    context::init_logging();
    let command_name = command_label(&cli.command);

    match dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            let exit_code = err.exit_code();
            tracing::debug!(command = command_name, exit_code, "command failed");
            eprintln!("error: {}", err.display_message());
            exit_code
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    let ctx = AppContext::from_cli(&cli)?;
    match cli.command {
        Command::Torrents { command } => commands::torrents::handle(&ctx, command).await,
        Command::App { command } => commands::app::handle(&ctx, command).await,
        Command::Log { command } => commands::app::handle_log(&ctx, command).await,
        Command::Transfer { command } => commands::transfer::handle(&ctx, command).await,
        Command::Categories { command } => commands::labels::handle_categories(&ctx, command).await,
        Command::Tags { command } => commands::labels::handle_tags(&ctx, command).await,
        Command::Rss { command } => commands::rss::handle(&ctx, command).await,
        Command::Search { command } => commands::search::handle(&ctx, command).await,
        Command::Sync { rid } => commands::transfer::handle_sync(&ctx, rid).await,
        Command::Run(args) => commands::run::handle(&ctx, args).await,
    }
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Torrents { .. } => "torrents",
        Command::App { .. } => "app",
        Command::Log { .. } => "log",
        Command::Transfer { .. } => "transfer",
        Command::Categories { .. } => "categories",
        Command::Tags { .. } => "tags",
        Command::Rss { .. } => "rss",
        Command::Search { .. } => "search",
        Command::Sync { .. } => "sync",
        Command::Run(_) => "run",
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_and_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "qbitlink",
            "--url",
            "http://10.0.0.2:9090",
            "torrents",
            "list",
        ])
        .expect("parses");
        assert_eq!(cli.url, "http://10.0.0.2:9090");

        let cli = Cli::try_parse_from([
            "qbitlink",
            "torrents",
            "list",
            "--format",
            "table",
        ])
        .expect("parses");
        assert_eq!(cli.format, OutputFormat::Table);
    }

    #[test]
    fn add_flags_stay_optional() {
        let cli = Cli::try_parse_from([
            "qbitlink",
            "torrents",
            "add",
            "magnet:?xt=urn:btih:abc",
            "--paused",
            "true",
        ])
        .expect("parses");
        let Command::Torrents {
            command: TorrentsCommand::Add(args),
        } = cli.command
        else {
            panic!("wrong command");
        };
        assert_eq!(args.paused, Some(true));
        assert_eq!(args.category, None);
        assert_eq!(args.urls, vec!["magnet:?xt=urn:btih:abc".to_string()]);
    }

    #[test]
    fn run_defaults_to_an_empty_parameter_object() {
        let cli = Cli::try_parse_from(["qbitlink", "run", "getAppVersion"]).expect("parses");
        let Command::Run(args) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.operation, "getAppVersion");
        assert_eq!(args.params, "{}");
    }
}
