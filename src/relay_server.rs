// src/relay_server.rs
//
// Game-over notification relay server.
//
// Receives round outcomes on POST /api/line-notify, resolves the player's
// LINE user id from the user store and pushes the result message through
// the LINE Messaging API.
//
// Environment:
// - CHANNEL_ACCESS_TOKEN, CHANNEL_SECRET: required, the server refuses to start without them
// - LINE_API_BASE: optional override of the Messaging API base URL
//
// CLI Options:
// - --host / --port: override conf/server.conf
// - --users: path to the JSON user store

use std::sync::Arc;

use clap::Parser;

use gameover_relay::config::{LineCredentials, ServerConfig};
use gameover_relay::line::LineClient;
use gameover_relay::logging::{log_error, log_info};
use gameover_relay::relay::Relay;
use gameover_relay::server;
use gameover_relay::user::JsonFileUserStore;

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(about = "Game-over relay - forwards game outcomes to LINE")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Address to bind (default from config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (default from config)
    #[arg(short, long)]
    port: Option<u16>,

    /// JSON user store file (default from config)
    #[arg(long)]
    users: Option<String>,
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log_error(&format!("Failed to listen for Ctrl-C: {e}"));
        // Without a signal handler, keep serving until the process is killed
        std::future::pending::<()>().await;
    }
    log_info("Shutdown requested");
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let mut config = ServerConfig::load_or_default();
    config.apply_env_overrides();
    config.apply_cli_overrides(args.host, args.port, args.users);

    let credentials = match LineCredentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            log_error(&format!("Invalid configuration: {e}"));
            std::process::exit(1);
        }
    };

    let store = match JsonFileUserStore::open(&config.users_file).await {
        Ok(store) => store,
        Err(e) => {
            log_error(&format!("Cannot open user store '{}': {e}", config.users_file));
            std::process::exit(1);
        }
    };
    log_info(&format!("Using user store {}", store.path().display()));

    let line_client = match LineClient::new(&config.line_api_base, credentials) {
        Ok(client) => client,
        Err(e) => {
            log_error(&format!("Cannot create LINE client: {e}"));
            std::process::exit(1);
        }
    };
    log_info(&format!("Pushing messages via {}", line_client.push_url()));

    let relay = Relay::new(Arc::new(store), Arc::new(line_client));

    let (server_handle, _addr) = match server::start_server(config, relay, shutdown_signal()).await {
        Ok(started) => started,
        Err(e) => {
            log_error(&format!("Failed to start API server: {e}"));
            std::process::exit(1);
        }
    };

    if let Err(e) = server_handle.await {
        log_error(&format!("Error waiting for server shutdown: {e:?}"));
    }
}
