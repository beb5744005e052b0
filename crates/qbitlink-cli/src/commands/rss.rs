//! RSS command handlers.

use serde_json::Value;

use crate::cli::RssCommand;
use crate::context::{AppContext, CliResult, classify_client, parse_json};
use crate::output::render_payload;

pub(crate) async fn handle(ctx: &AppContext, command: RssCommand) -> CliResult<()> {
    match command {
        RssCommand::Items { filter } => {
            let payload = ctx
                .client
                .rss_items(filter.as_deref())
                .await
                .map_err(classify_client)?;
            render_payload(&payload, ctx.format)
        }
        RssCommand::AddFolder { path, parent } => {
            ctx.client
                .add_rss_folder(&path, parent.as_deref())
                .await
                .map_err(classify_client)?;
            println!("folder '{path}' created");
            Ok(())
        }
        RssCommand::AddFeed { url, name, parent } => {
            ctx.client
                .add_rss_feed(&url, &name, parent.as_deref())
                .await
                .map_err(classify_client)?;
            println!("feed '{name}' added");
            Ok(())
        }
        RssCommand::RemoveItem { path } => {
            ctx.client
                .remove_rss_item(&path)
                .await
                .map_err(classify_client)?;
            println!("item '{path}' removed");
            Ok(())
        }
        RssCommand::MoveItem { from, to } => {
            ctx.client
                .move_rss_item(&from, &to)
                .await
                .map_err(classify_client)?;
            println!("item moved to '{to}'");
            Ok(())
        }
        RssCommand::MarkRead { path, article } => {
            ctx.client
                .mark_rss_read(&path, article.as_deref())
                .await
                .map_err(classify_client)?;
            println!("marked as read");
            Ok(())
        }
        RssCommand::Rules => {
            let payload = ctx.client.rss_rules().await.map_err(classify_client)?;
            render_payload(&payload, ctx.format)
        }
        RssCommand::SetRule { name, definition } => {
            let definition: Value = parse_json(&definition, "rule definition")?;
            ctx.client
                .set_rss_rule(&name, &definition)
                .await
                .map_err(classify_client)?;
            println!("rule '{name}' stored");
            Ok(())
        }
        RssCommand::RenameRule { old, new } => {
            ctx.client
                .rename_rss_rule(&old, &new)
                .await
                .map_err(classify_client)?;
            println!("rule renamed to '{new}'");
            Ok(())
        }
        RssCommand::RemoveRule { name } => {
            ctx.client
                .remove_rss_rule(&name)
                .await
                .map_err(classify_client)?;
            println!("rule '{name}' removed");
            Ok(())
        }
    }
}
