//! Resolution CLI entry point

use clap::Parser;
use log::{info, warn};
use svc_meetpoint::clients::get_clients;
use svc_meetpoint::engine::discovery::DiscoveryPlan;
use svc_meetpoint::engine::geo::GeoPoint;
use svc_meetpoint::engine::{resolve_meeting, MeetingQuery, MeetingRequest};
use svc_meetpoint::*;

/// Resolve a fair meeting point between two travel origins
#[derive(Debug, Parser)]
#[command(name = "svc-meetpoint", version)]
struct Cli {
    /// First origin as a "lat,lng" pair of decimal degrees
    #[arg(long)]
    origin_a: GeoPoint,

    /// Second origin as a "lat,lng" pair of decimal degrees
    #[arg(long)]
    origin_b: GeoPoint,

    /// Session to publish the resolution to, no publish when omitted
    #[arg(long)]
    session_id: Option<String>,
}

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> anyhow::Result<()> {
    // Will use default config settings if no environment vars are found.
    let config = Config::try_from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration from environment: {}", e))?;

    info!("(main) Loading config.");

    // Try to load log configuration from the provided log file.
    // Will default to stdout debug logging if the file can not be loaded.
    if let Err(e) = load_logger_config_from_file(config.log_config.as_str()).await {
        log::error!("(main) {}", e);
    }

    let cli = Cli::parse();
    info!(
        "(main) Resolving meeting point between [{}] and [{}].",
        cli.origin_a, cli.origin_b
    );

    let request = MeetingRequest {
        origin_a: cli.origin_a,
        origin_b: cli.origin_b,
    };
    let query = MeetingQuery::try_from(request)
        .map_err(|e| anyhow::anyhow!("Invalid meeting request: {}", e))?;

    let plan = DiscoveryPlan::from_config(&config);
    let clients = get_clients().await;

    let resolution = resolve_meeting(&query, &plan, &clients)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{}", serde_json::to_string_pretty(&resolution)?);

    // Fire and forget: a failed publish never fails the resolution itself.
    if let Some(session_id) = cli.session_id {
        if let Err(e) = clients.sessions.publish(&session_id, &resolution).await {
            warn!("(main) could not publish to session [{}]: {}", session_id, e);
        }
    }

    // Make sure all log message are written/ displayed before shutdown
    log::logger().flush();

    Ok(())
}
