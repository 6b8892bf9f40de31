//! Client execution loop with automatic reconnection.

use std::time::Duration;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

use super::error::ClientError;
use super::session::{SessionEnd, run_session};

/// Delay before re-dialing after an unexpected drop
const RECONNECT_DELAY: Duration = Duration::from_secs(3);

/// Run the chat client until the user quits
///
/// The line editor lives for the whole process; sessions come and go
/// underneath it as the connection drops and is re-established.
pub async fn run_client(url: String, username: String) -> Result<(), ClientError> {
    println!(
        "You are '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.",
        username
    );

    // Fail before connecting when no usable terminal is attached
    let mut editor =
        DefaultEditor::new().map_err(|e| ClientError::InputUnavailable(e.to_string()))?;

    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();
    std::thread::spawn(move || {
        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    eprintln!("input error: {e}");
                    break;
                }
            }
        }
        // dropping line_tx signals the session to close cleanly
    });

    let mut connected_once = false;
    loop {
        match run_session(&url, &username, &mut line_rx).await {
            Ok(SessionEnd::Quit) => return Ok(()),
            Ok(SessionEnd::Dropped) => {
                connected_once = true;
                tracing::warn!(
                    "Connection lost; reconnecting in {}s",
                    RECONNECT_DELAY.as_secs()
                );
            }
            Err(e) if connected_once => {
                tracing::warn!("Reconnect failed: {}; retrying in {}s", e, RECONNECT_DELAY.as_secs());
            }
            // never connected: surface the error instead of retrying forever
            Err(e) => return Err(e),
        }
        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}
