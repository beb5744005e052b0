//! Application and log command handlers.

use serde_json::Value;

use crate::cli::{AppCommand, LogCommand};
use crate::context::{AppContext, CliResult, classify_client, parse_json};
use crate::output::render_payload;

pub(crate) async fn handle(ctx: &AppContext, command: AppCommand) -> CliResult<()> {
    match command {
        AppCommand::Version => {
            let version = ctx.client.app_version().await.map_err(classify_client)?;
            println!("{version}");
            Ok(())
        }
        AppCommand::WebapiVersion => {
            let version = ctx.client.webapi_version().await.map_err(classify_client)?;
            println!("{version}");
            Ok(())
        }
        AppCommand::BuildInfo => {
            let payload = ctx.client.build_info().await.map_err(classify_client)?;
            render_payload(&payload, ctx.format)
        }
        AppCommand::Preferences => {
            let payload = ctx.client.preferences().await.map_err(classify_client)?;
            render_payload(&payload, ctx.format)
        }
        AppCommand::SetPreferences { json } => {
            let preferences: Value = parse_json(&json, "preferences")?;
            ctx.client
                .set_preferences(&preferences)
                .await
                .map_err(classify_client)?;
            println!("preferences updated");
            Ok(())
        }
    }
}

pub(crate) async fn handle_log(ctx: &AppContext, command: LogCommand) -> CliResult<()> {
    match command {
        LogCommand::Main { no_normal, no_info } => {
            let payload = ctx
                .client
                .main_log(!no_normal, !no_info)
                .await
                .map_err(classify_client)?;
            render_payload(&payload, ctx.format)
        }
        LogCommand::Peek { last_lines } => {
            let payload = ctx
                .client
                .peek_log(last_lines)
                .await
                .map_err(classify_client)?;
            render_payload(&payload, ctx.format)
        }
    }
}
