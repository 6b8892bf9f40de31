//! Fan chat server binary.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --host 0.0.0.0 --port 3000 --blocklist blocked.txt
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::Mutex;

use fanroom::{
    common::{logger::setup_logger, time::SystemClock},
    domain::HistoryBuffer,
    infrastructure::{BlocklistClassifier, InMemoryConnectionRegistry},
    ui::Server,
    usecase::{JoinChatUseCase, LeaveChatUseCase, PostMessageUseCase, PresenceBroadcaster},
};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Real-time fan chat server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Number of messages retained for history replay
    #[arg(long, default_value = "50")]
    history_capacity: usize,

    /// File of blocked terms, one per line (`#` lines are comments)
    #[arg(long)]
    blocklist: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Moderation policy is injected from configuration; an absent blocklist
    // means every message is accepted
    let classifier = match &args.blocklist {
        Some(path) => match BlocklistClassifier::from_file(path) {
            Ok(classifier) => {
                tracing::info!(
                    "Loaded {} blocked term(s) from {}",
                    classifier.term_count(),
                    path.display()
                );
                classifier
            }
            Err(e) => {
                tracing::error!("Failed to read blocklist '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            tracing::warn!("No blocklist configured; moderation will accept every message");
            BlocklistClassifier::new(vec![])
        }
    };

    // Wire dependencies in order: registry, history, presence, usecases, server
    let registry = Arc::new(InMemoryConnectionRegistry::new());
    let history = Arc::new(Mutex::new(HistoryBuffer::new(args.history_capacity)));
    let presence = Arc::new(PresenceBroadcaster::new(registry.clone()));
    let clock = Arc::new(SystemClock);

    let join_chat = Arc::new(JoinChatUseCase::new(
        registry.clone(),
        history.clone(),
        presence.clone(),
        args.history_capacity,
    ));
    let leave_chat = Arc::new(LeaveChatUseCase::new(registry.clone(), presence.clone()));
    let post_message = Arc::new(PostMessageUseCase::new(
        registry.clone(),
        history.clone(),
        Arc::new(classifier),
        clock.clone(),
    ));

    let server = Server::new(join_chat, leave_chat, post_message, registry);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
