//! Category and tag command handlers.

use crate::cli::{CategoriesCommand, TagsCommand};
use crate::context::{AppContext, CliResult, classify_client, require_values};
use crate::output::render_payload;

pub(crate) async fn handle_categories(
    ctx: &AppContext,
    command: CategoriesCommand,
) -> CliResult<()> {
    match command {
        CategoriesCommand::List => {
            let payload = ctx.client.categories().await.map_err(classify_client)?;
            render_payload(&payload, ctx.format)
        }
        CategoriesCommand::Add {
            name,
            save_path,
            download_limit,
            upload_limit,
        } => {
            ctx.client
                .create_category(&name, &save_path, download_limit, upload_limit)
                .await
                .map_err(classify_client)?;
            println!("category '{name}' created");
            Ok(())
        }
        CategoriesCommand::Edit {
            name,
            save_path,
            download_limit,
            upload_limit,
        } => {
            ctx.client
                .edit_category(&name, save_path.as_deref(), download_limit, upload_limit)
                .await
                .map_err(classify_client)?;
            println!("category '{name}' updated");
            Ok(())
        }
        CategoriesCommand::Remove { names } => {
            require_values(&names, "category name")?;
            ctx.client
                .remove_categories(&names)
                .await
                .map_err(classify_client)?;
            println!("removed {} categor(ies)", names.len());
            Ok(())
        }
    }
}

pub(crate) async fn handle_tags(ctx: &AppContext, command: TagsCommand) -> CliResult<()> {
    match command {
        TagsCommand::List => {
            let payload = ctx.client.tags().await.map_err(classify_client)?;
            render_payload(&payload, ctx.format)
        }
        TagsCommand::Add { tags } => {
            ctx.client
                .create_tags(&tags)
                .await
                .map_err(classify_client)?;
            println!("tags created");
            Ok(())
        }
        TagsCommand::Remove { tags } => {
            ctx.client
                .delete_tags(&tags)
                .await
                .map_err(classify_client)?;
            println!("tags deleted");
            Ok(())
        }
    }
}
