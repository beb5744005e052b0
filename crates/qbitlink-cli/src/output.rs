//! Output renderers and formatting helpers for CLI commands.

use serde_json::Value;

use crate::cli::OutputFormat;
use crate::context::{CliError, CliResult};

/// Render any daemon payload. Table mode only differs for payloads with a
/// dedicated renderer; everything else stays pretty-printed JSON.
pub(crate) fn render_payload(payload: &Value, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json | OutputFormat::Table => print_json(payload),
    }
}

/// Render the torrent list, compacting to a table when requested.
pub(crate) fn render_torrent_list(payload: &Value, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(payload),
        OutputFormat::Table => {
            let Some(torrents) = payload.as_array() else {
                return print_json(payload);
            };
            println!("{:<40} {:<20} {:>7} {:>10} NAME", "HASH", "STATE", "PROG", "SIZE");
            for torrent in torrents {
                let hash = torrent["hash"].as_str().unwrap_or("-");
                let state = torrent["state"].as_str().unwrap_or("unknown");
                let progress = torrent["progress"].as_f64().unwrap_or(0.0) * 100.0;
                let size = torrent["size"].as_u64().map_or_else(
                    || "-".to_string(),
                    format_bytes,
                );
                let name = torrent["name"].as_str().unwrap_or("<unnamed>");
                println!(
                    "{hash:<40} {state:<20} {progress:>6.1}% {size:>10} {name}"
                );
            }
            Ok(())
        }
    }
}

fn print_json(payload: &Value) -> CliResult<()> {
    let text = serde_json::to_string_pretty(payload)
        .map_err(|err| CliError::failure(anyhow::anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

#[must_use]
pub(crate) fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    const GIB: f64 = MIB * 1024.0;
    let value = bytes_to_f64(bytes);
    if value >= GIB {
        format!("{:.2} GiB", value / GIB)
    } else if value >= MIB {
        format!("{:.2} MiB", value / MIB)
    } else if value >= KIB {
        format!("{:.2} KiB", value / KIB)
    } else {
        format!("{bytes} B")
    }
}

fn bytes_to_f64(value: u64) -> f64 {
    let high = u32::try_from(value >> 32).unwrap_or(u32::MAX);
    let low = u32::try_from(value & 0xFFFF_FFFF).unwrap_or(u32::MAX);
    f64::from(high) * 4_294_967_296.0 + f64::from(low)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn format_bytes_scales_units() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.00 KiB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.00 MiB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.00 GiB");
    }

    #[test]
    fn torrent_table_tolerates_missing_fields() {
        let payload = json!([{"name": "debian.iso"}, {}]);
        render_torrent_list(&payload, OutputFormat::Table).expect("renders");
    }

    #[test]
    fn non_array_payloads_fall_back_to_json() {
        let payload = json!({"unexpected": true});
        render_torrent_list(&payload, OutputFormat::Table).expect("renders");
    }
}
