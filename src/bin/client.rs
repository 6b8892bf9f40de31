//! Fan chat CLI client binary.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin client
//! cargo run --bin client -- --url ws://127.0.0.1:8080/ws --username Fan_1
//! ```

use clap::Parser;
use uuid::Uuid;

use fanroom::client::run_client;
use fanroom::common::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "CLI client for the fan chat", long_about = None)]
struct Args {
    /// WebSocket URL of the chat server
    #[arg(short, long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Display name; a Fan_ name is generated when omitted
    #[arg(short = 'n', long)]
    username: Option<String>,
}

#[tokio::main]
async fn main() {
    // Keep the terminal quiet by default; RUST_LOG overrides
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let args = Args::parse();
    let username = args
        .username
        .unwrap_or_else(|| format!("Fan_{}", &Uuid::new_v4().simple().to_string()[..6]));

    if let Err(e) = run_client(args.url, username).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
