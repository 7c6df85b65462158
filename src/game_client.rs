// src/game_client.rs
//
// Terminal game client. Plays out the end of one round against the relay:
// the points given on the command line are accumulated, then the round ends
// in a game over (default) or a clear, the outcome is reported to the server
// and the matching end screen is drawn.
//
// CLI Options:
// - --userid: player id (default from conf/client.conf)
// - --score: points collected during the round
// - --clear: finish the round successfully instead of missing the stop

use std::sync::Arc;

use clap::Parser;

use gameover_relay::clients::notifier::HttpNotifier;
use gameover_relay::clients::screen::TerminalScreen;
use gameover_relay::config::ClientConfig;
use gameover_relay::game::GameSession;
use gameover_relay::logging::{log_error, log_info};

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(about = "Game client - finish a round and report it to the relay")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Player id (default from config)
    #[arg(short, long)]
    userid: Option<String>,

    /// Points collected during the round
    #[arg(short, long, default_value_t = 0)]
    score: u32,

    /// Get off at the right stop (report a clear instead of a game over)
    #[arg(long)]
    clear: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = ClientConfig::load_or_default();
    let user_id = args.userid.unwrap_or_else(|| config.user_id.clone());
    if user_id.trim().is_empty() {
        log_error("No player id: pass --userid or set user_id in conf/client.conf");
        std::process::exit(1);
    }

    let notifier = match HttpNotifier::new(&config.server_url(), config.timeout) {
        Ok(notifier) => notifier,
        Err(e) => {
            log_error(&format!("Cannot create HTTP client: {e}"));
            std::process::exit(1);
        }
    };
    log_info(&format!("Reporting outcomes to {}", notifier.notify_url()));

    let mut session = GameSession::new(&user_id, Arc::new(notifier));
    session.add_score(args.score);

    let mut screen = TerminalScreen::stdout();
    let report = if args.clear {
        session.game_clear(&mut screen)
    } else {
        session.game_over(&mut screen)
    };

    // The screen is already up; only keep the process alive until the report finishes
    if let Some(report) = report {
        if let Err(e) = report.await {
            log_error(&format!("Notification task failed: {e}"));
        }
    }
}
