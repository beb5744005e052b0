//! Search command handlers.

use crate::cli::SearchCommand;
use crate::context::{AppContext, CliResult, classify_client, require_values};
use crate::output::render_payload;

pub(crate) async fn handle(ctx: &AppContext, command: SearchCommand) -> CliResult<()> {
    match command {
        SearchCommand::Start {
            pattern,
            plugins,
            category,
        } => {
            let payload = ctx
                .client
                .start_search(&pattern, &plugins, &category)
                .await
                .map_err(classify_client)?;
            render_payload(&payload, ctx.format)
        }
        SearchCommand::Stop { id } => {
            ctx.client.stop_search(id).await.map_err(classify_client)?;
            println!("search {id} stopped");
            Ok(())
        }
        SearchCommand::Status { id } => {
            let payload = ctx
                .client
                .search_status(id)
                .await
                .map_err(classify_client)?;
            render_payload(&payload, ctx.format)
        }
        SearchCommand::Results { id, limit, offset } => {
            let payload = ctx
                .client
                .search_results(id, limit, offset)
                .await
                .map_err(classify_client)?;
            render_payload(&payload, ctx.format)
        }
        SearchCommand::Delete { id } => {
            ctx.client
                .delete_search(id)
                .await
                .map_err(classify_client)?;
            println!("search {id} deleted");
            Ok(())
        }
        SearchCommand::Plugins => {
            let payload = ctx
                .client
                .search_plugins()
                .await
                .map_err(classify_client)?;
            render_payload(&payload, ctx.format)
        }
        SearchCommand::InstallPlugin { sources } => {
            require_values(&sources, "plugin source")?;
            ctx.client
                .install_search_plugin(&sources)
                .await
                .map_err(classify_client)?;
            println!("plugin install requested");
            Ok(())
        }
        SearchCommand::UninstallPlugin { names } => {
            require_values(&names, "plugin name")?;
            ctx.client
                .uninstall_search_plugin(&names)
                .await
                .map_err(classify_client)?;
            println!("plugin(s) uninstalled");
            Ok(())
        }
        SearchCommand::EnablePlugin { names, disable } => {
            require_values(&names, "plugin name")?;
            ctx.client
                .enable_search_plugin(&names, !disable)
                .await
                .map_err(classify_client)?;
            println!(
                "plugin(s) {}",
                if disable { "disabled" } else { "enabled" }
            );
            Ok(())
        }
        SearchCommand::UpdatePlugins => {
            ctx.client
                .update_search_plugins()
                .await
                .map_err(classify_client)?;
            println!("plugin update requested");
            Ok(())
        }
    }
}
