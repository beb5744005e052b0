//! Torrent command handlers.

use qbitlink_client::AddTorrentOptions;

use crate::cli::{TorrentAddArgs, TorrentsCommand};
use crate::context::{AppContext, CliError, CliResult, classify_client, require_values};
use crate::output::{render_payload, render_torrent_list};

pub(crate) async fn handle(ctx: &AppContext, command: TorrentsCommand) -> CliResult<()> {
    match command {
        TorrentsCommand::List => {
            let payload = ctx.client.torrents().await.map_err(classify_client)?;
            render_torrent_list(&payload, ctx.format)
        }
        TorrentsCommand::Add(args) => handle_add(ctx, args).await,
        TorrentsCommand::Properties { hash } => {
            let payload = ctx
                .client
                .torrent_properties(&hash)
                .await
                .map_err(classify_client)?;
            render_payload(&payload, ctx.format)
        }
        TorrentsCommand::Trackers { hash } => {
            let payload = ctx
                .client
                .torrent_trackers(&hash)
                .await
                .map_err(classify_client)?;
            render_payload(&payload, ctx.format)
        }
        TorrentsCommand::WebSeeds { hash } => {
            let payload = ctx
                .client
                .torrent_web_seeds(&hash)
                .await
                .map_err(classify_client)?;
            render_payload(&payload, ctx.format)
        }
        TorrentsCommand::Files { hash } => {
            let payload = ctx
                .client
                .torrent_files(&hash)
                .await
                .map_err(classify_client)?;
            render_payload(&payload, ctx.format)
        }
        TorrentsCommand::Pause { hashes } => {
            require_values(&hashes, "hash")?;
            ctx.client
                .pause_torrents(&hashes)
                .await
                .map_err(classify_client)?;
            println!("paused {} torrent(s)", hashes.len());
            Ok(())
        }
        TorrentsCommand::Resume { hashes } => {
            require_values(&hashes, "hash")?;
            ctx.client
                .resume_torrents(&hashes)
                .await
                .map_err(classify_client)?;
            println!("resumed {} torrent(s)", hashes.len());
            Ok(())
        }
        TorrentsCommand::Delete {
            hashes,
            delete_files,
        } => {
            require_values(&hashes, "hash")?;
            ctx.client
                .delete_torrents(&hashes, delete_files)
                .await
                .map_err(classify_client)?;
            println!("deleted {} torrent(s)", hashes.len());
            Ok(())
        }
        TorrentsCommand::Recheck { hashes } => {
            require_values(&hashes, "hash")?;
            ctx.client
                .recheck_torrents(&hashes)
                .await
                .map_err(classify_client)?;
            println!("recheck requested for {} torrent(s)", hashes.len());
            Ok(())
        }
        TorrentsCommand::Reannounce { hashes } => {
            require_values(&hashes, "hash")?;
            ctx.client
                .reannounce_torrents(&hashes)
                .await
                .map_err(classify_client)?;
            println!("reannounce requested for {} torrent(s)", hashes.len());
            Ok(())
        }
        TorrentsCommand::SetCategory { category, hashes } => {
            require_values(&hashes, "hash")?;
            ctx.client
                .set_torrent_category(&hashes, &category)
                .await
                .map_err(classify_client)?;
            println!("category set");
            Ok(())
        }
        TorrentsCommand::SetLocation { location, hashes } => {
            require_values(&hashes, "hash")?;
            ctx.client
                .set_torrent_location(&hashes, &location)
                .await
                .map_err(classify_client)?;
            println!("location set");
            Ok(())
        }
        TorrentsCommand::SetPriority { priority, hashes } => {
            require_values(&hashes, "hash")?;
            ctx.client
                .set_torrent_priority(&hashes, priority)
                .await
                .map_err(classify_client)?;
            println!("priority set");
            Ok(())
        }
        TorrentsCommand::SetDownloadLimit { limit, hashes } => {
            require_values(&hashes, "hash")?;
            ctx.client
                .set_torrent_download_limit(&hashes, limit)
                .await
                .map_err(classify_client)?;
            println!("download limit set");
            Ok(())
        }
        TorrentsCommand::SetUploadLimit { limit, hashes } => {
            require_values(&hashes, "hash")?;
            ctx.client
                .set_torrent_upload_limit(&hashes, limit)
                .await
                .map_err(classify_client)?;
            println!("upload limit set");
            Ok(())
        }
        TorrentsCommand::FilePriority { hash, id, priority } => {
            ctx.client
                .set_file_priority(&hash, id, priority)
                .await
                .map_err(classify_client)?;
            println!("file priority set");
            Ok(())
        }
        TorrentsCommand::AddTrackers { hash, urls } => {
            require_values(&urls, "tracker URL")?;
            ctx.client
                .add_trackers(&hash, &urls.join("\n"))
                .await
                .map_err(classify_client)?;
            println!("added {} tracker(s)", urls.len());
            Ok(())
        }
        TorrentsCommand::EditTracker {
            hash,
            original_url,
            new_url,
        } => {
            ctx.client
                .edit_tracker(&hash, &original_url, &new_url)
                .await
                .map_err(classify_client)?;
            println!("tracker updated");
            Ok(())
        }
        TorrentsCommand::RemoveTrackers { hash, urls } => {
            require_values(&urls, "tracker URL")?;
            ctx.client
                .remove_trackers(&hash, &urls.join("\n"))
                .await
                .map_err(classify_client)?;
            println!("removed {} tracker(s)", urls.len());
            Ok(())
        }
        TorrentsCommand::AddTags { tags, hashes } => {
            require_values(&hashes, "hash")?;
            ctx.client
                .add_torrent_tags(&hashes, &tags)
                .await
                .map_err(classify_client)?;
            println!("tags added");
            Ok(())
        }
        TorrentsCommand::RemoveTags { tags, hashes } => {
            require_values(&hashes, "hash")?;
            ctx.client
                .remove_torrent_tags(&hashes, &tags)
                .await
                .map_err(classify_client)?;
            println!("tags removed");
            Ok(())
        }
    }
}

async fn handle_add(ctx: &AppContext, args: TorrentAddArgs) -> CliResult<()> {
    require_values(&args.urls, "torrent URL")?;
    if args.urls.iter().any(|url| url.trim().is_empty()) {
        return Err(CliError::validation("torrent URLs must not be blank"));
    }

    let count = args.urls.len();
    let options = AddTorrentOptions {
        urls: args.urls.join("\n"),
        savepath: args.savepath,
        cookie: args.cookie,
        category: args.category,
        tags: args.tags,
        skip_checking: args.skip_checking,
        paused: args.paused,
        root_folder: args.root_folder,
        rename: args.rename,
        up_limit: args.up_limit,
        dl_limit: args.dl_limit,
        ratio_limit: args.ratio_limit,
        seeding_time_limit: args.seeding_time_limit,
        auto_tmm: args.auto_tmm,
        sequential_download: args.sequential,
        first_last_piece_prio: args.first_last_piece_prio,
    };

    ctx.client
        .add_torrent(options)
        .await
        .map_err(classify_client)?;
    println!("submitted {count} torrent(s)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use httpmock::MockServer;
    use httpmock::prelude::*;
    use qbitlink_client::{HttpTransport, QbitClient};

    use super::*;
    use crate::cli::OutputFormat;

    fn context_for(server: &MockServer) -> AppContext {
        let transport =
            HttpTransport::new(Some(Duration::from_secs(2))).expect("transport builds");
        let client = QbitClient::new(
            server.base_url().parse().expect("valid URL"),
            None,
            Arc::new(transport),
        );
        AppContext {
            client: Arc::new(client),
            format: OutputFormat::Json,
        }
    }

    #[tokio::test]
    async fn pause_requires_at_least_one_hash() {
        let server = MockServer::start_async().await;
        let ctx = context_for(&server);

        let err = handle(&ctx, TorrentsCommand::Pause { hashes: Vec::new() })
            .await
            .expect_err("no hashes");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn add_joins_urls_with_newlines() {
        let server = MockServer::start_async().await;
        let add = server.mock(|when, then| {
            when.method(POST)
                .path("/api/v2/torrents/add")
                .body_includes("magnet:?xt=urn:btih:one\nmagnet:?xt=urn:btih:two");
            then.status(200).body("Ok.");
        });
        let ctx = context_for(&server);

        let args = TorrentAddArgs {
            urls: vec![
                "magnet:?xt=urn:btih:one".to_string(),
                "magnet:?xt=urn:btih:two".to_string(),
            ],
            savepath: None,
            cookie: None,
            category: None,
            tags: None,
            skip_checking: None,
            paused: None,
            root_folder: None,
            rename: None,
            up_limit: None,
            dl_limit: None,
            ratio_limit: None,
            seeding_time_limit: None,
            auto_tmm: None,
            sequential: None,
            first_last_piece_prio: None,
        };

        handle(&ctx, TorrentsCommand::Add(args))
            .await
            .expect("add succeeds");
        add.assert();
    }

    #[tokio::test]
    async fn delete_forwards_the_flag() {
        let server = MockServer::start_async().await;
        let delete = server.mock(|when, then| {
            when.method(POST)
                .path("/api/v2/torrents/delete")
                .body_includes("deleteFiles=true");
            then.status(200);
        });
        let ctx = context_for(&server);

        handle(
            &ctx,
            TorrentsCommand::Delete {
                hashes: vec!["cafebabe".to_string()],
                delete_files: true,
            },
        )
        .await
        .expect("delete succeeds");
        delete.assert();
    }
}
