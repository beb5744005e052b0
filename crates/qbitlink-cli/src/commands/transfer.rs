//! Transfer and sync command handlers.

use crate::cli::TransferCommand;
use crate::context::{AppContext, CliResult, classify_client};
use crate::output::render_payload;

pub(crate) async fn handle(ctx: &AppContext, command: TransferCommand) -> CliResult<()> {
    match command {
        TransferCommand::Info => {
            let payload = ctx.client.transfer_info().await.map_err(classify_client)?;
            render_payload(&payload, ctx.format)
        }
        TransferCommand::SetDownloadLimit { limit } => {
            ctx.client
                .set_global_download_limit(limit)
                .await
                .map_err(classify_client)?;
            println!("global download limit set");
            Ok(())
        }
        TransferCommand::SetUploadLimit { limit } => {
            ctx.client
                .set_global_upload_limit(limit)
                .await
                .map_err(classify_client)?;
            println!("global upload limit set");
            Ok(())
        }
        TransferCommand::ToggleSpeedLimits => {
            ctx.client
                .toggle_speed_limits_mode()
                .await
                .map_err(classify_client)?;
            println!("alternative speed limits toggled");
            Ok(())
        }
    }
}

pub(crate) async fn handle_sync(ctx: &AppContext, rid: i64) -> CliResult<()> {
    let payload = ctx
        .client
        .sync_main_data(rid)
        .await
        .map_err(classify_client)?;
    render_payload(&payload, ctx.format)
}
