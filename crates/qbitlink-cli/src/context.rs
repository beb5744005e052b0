//! Shared client context, error types, and logging setup for the CLI.

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use qbitlink_actions::{ActionError, ClientRegistry, ConnectionProfile};
use qbitlink_client::{ClientError, Credentials, QbitClient};

use crate::cli::{Cli, OutputFormat};

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Classify a client failure: daemon-side rejections of the request shape
/// are validation, everything else is operational.
pub(crate) fn classify_client(err: ClientError) -> CliError {
    match err.status() {
        Some(status @ (400 | 409 | 422)) => {
            CliError::validation(format!("daemon rejected the request (status {status}): {err}"))
        }
        _ => CliError::failure(err),
    }
}

pub(crate) fn classify_action(err: ActionError) -> CliError {
    match err {
        ActionError::UnknownOperation { .. }
        | ActionError::InvalidParams { .. }
        | ActionError::InvalidBaseUrl { .. } => CliError::validation(err.to_string()),
        ActionError::Client(client) => classify_client(client),
        ActionError::Transport { .. } => CliError::failure(err),
    }
}

/// Application context passed to command handlers.
#[derive(Clone)]
pub(crate) struct AppContext {
    pub(crate) client: Arc<QbitClient>,
    pub(crate) format: OutputFormat,
}

impl AppContext {
    /// Build the shared client from CLI options via the adapter registry.
    pub(crate) fn from_cli(cli: &Cli) -> CliResult<Self> {
        let credentials = match (&cli.username, &cli.password) {
            (Some(username), Some(password)) => Some(Credentials::new(username, password)),
            (None, None) => None,
            _ => {
                return Err(CliError::validation(
                    "username and password must be provided together",
                ));
            }
        };

        let profile = ConnectionProfile::new(cli.url.clone(), credentials);
        let registry = ClientRegistry::new();
        let client = registry
            .obtain(&profile, Some(Duration::from_secs(cli.timeout)))
            .map_err(classify_action)?;

        Ok(Self {
            client,
            format: cli.format,
        })
    }
}

/// Install the tracing subscriber. `RUST_LOG` overrides the `info` default;
/// repeat installs (tests) are ignored.
pub(crate) fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parse a JSON document supplied on the command line.
pub(crate) fn parse_json(input: &str, what: &str) -> CliResult<serde_json::Value> {
    serde_json::from_str(input)
        .map_err(|err| CliError::validation(format!("invalid JSON for {what}: {err}")))
}

/// Require a non-empty value list for a multi-target operation.
pub(crate) fn require_values(values: &[String], what: &str) -> CliResult<()> {
    if values.is_empty() {
        return Err(CliError::validation(format!("at least one {what} is required")));
    }
    if values.iter().any(String::is_empty) {
        return Err(CliError::validation(format!("{what} values must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn validation_and_failure_use_distinct_exit_codes() {
        assert_eq!(CliError::validation("bad flag").exit_code(), 2);
        assert_eq!(
            CliError::failure(anyhow!("daemon unreachable")).exit_code(),
            3
        );
    }

    #[test]
    fn bad_json_reports_what_failed_to_parse() {
        let err = parse_json("{not json", "preferences").expect_err("rejected");
        assert!(err.display_message().contains("preferences"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn empty_hash_lists_are_rejected() {
        assert!(require_values(&[], "hash").is_err());
        assert!(require_values(&[String::new()], "hash").is_err());
        assert!(require_values(&["abc".to_string()], "hash").is_ok());
    }
}
