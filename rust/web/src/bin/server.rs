//! Standalone table server
//!
//! Usage: cargo run -p holdem_web --bin holdem-server -- --port 8080

use clap::Parser;
use holdem_web::{config, init_logging, ServerArgs, WebServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = ServerArgs::parse();
    let json_logs = std::env::var("HOLDEM_LOG_JSON").is_ok_and(|v| v == "1");
    init_logging(json_logs)?;

    let config = config::load(&args)?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        small_blind = config.table.small_blind,
        big_blind = config.table.big_blind,
        seed = ?config.table.seed,
        hand_log = ?config.hand_log,
        "starting holdem server"
    );

    let handle = WebServer::new(config)?.start().await?;
    println!("Table open at http://{}", handle.address());
    println!("Press Ctrl+C to stop");

    tokio::signal::ctrl_c().await?;

    tracing::info!("shutting down");
    handle.shutdown().await?;
    tracing::info!("server stopped cleanly");
    Ok(())
}
