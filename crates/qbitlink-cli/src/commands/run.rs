//! Raw host-action dispatch.
//!
//! Exposes the same operation surface a workflow host sees: an operation
//! identifier plus a JSON parameter object, decoded and dispatched through
//! the actions crate.

use qbitlink_actions::Action;

use crate::cli::RunArgs;
use crate::context::{AppContext, CliResult, classify_action, parse_json};
use crate::output::render_payload;

pub(crate) async fn handle(ctx: &AppContext, args: RunArgs) -> CliResult<()> {
    let params = parse_json(&args.params, "action parameters")?;
    let action = Action::from_request(&args.operation, params).map_err(classify_action)?;
    tracing::debug!(operation = action.operation(), "dispatching action");
    let payload = action.run(&ctx.client).await.map_err(classify_action)?;
    render_payload(&payload, ctx.format)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use httpmock::MockServer;
    use httpmock::prelude::*;
    use qbitlink_client::{HttpTransport, QbitClient};
    use serde_json::json;

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
    async fn unknown_operations_fail_as_validation() {
        let server = MockServer::start_async().await;
        let ctx = context_for(&server);

        let err = handle(
            &ctx,
            RunArgs {
                operation: "selfDestruct".to_string(),
                params: "{}".to_string(),
            },
        )
        .await
        .expect_err("unmapped operation");
        assert_eq!(err.exit_code(), 2);
        assert!(err.display_message().contains("selfDestruct"));
    }

    #[tokio::test]
    async fn operations_dispatch_through_the_action_surface() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/v2/app/version");
            then.status(200).body("v5.0.0");
        });
        let ctx = context_for(&server);

        handle(
            &ctx,
            RunArgs {
                operation: "getAppVersion".to_string(),
                params: "{}".to_string(),
            },
        )
        .await
        .expect("dispatches");
        mock.assert();
    }

    #[tokio::test]
    async fn malformed_parameters_fail_as_validation() {
        let server = MockServer::start_async().await;
        let ctx = context_for(&server);

        let err = handle(
            &ctx,
            RunArgs {
                operation: "pauseTorrent".to_string(),
                params: json!({"hashes": 42}).to_string(),
            },
        )
        .await
        .expect_err("bad params");
        assert_eq!(err.exit_code(), 2);
    }
}
