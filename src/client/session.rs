//! WebSocket client session management.
//!
//! One session spans one connection. Reconnection lives in the runner: the
//! server has no notion of resuming, so after an unexpected drop the runner
//! simply establishes a brand-new session with the same display name.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::infrastructure::dto::websocket::{ClientEnvelope, OutgoingMessage, ServerEnvelope};

use super::error::ClientError;
use super::formatter::MessageFormatter;

/// Why a session ended
#[derive(Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user quit; do not reconnect
    Quit,
    /// The transport dropped; the runner may reconnect
    Dropped,
}

/// Run one connection until the user quits or the transport drops
pub async fn run_session(
    url: &str,
    username: &str,
    lines: &mut mpsc::UnboundedReceiver<String>,
) -> Result<SessionEnd, ClientError> {
    let (ws_stream, _response) =
        connect_async(url)
            .await
            .map_err(|e| ClientError::ConnectionFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
    tracing::info!("Connected to the fan chat at {}", url);

    let (mut write, mut read) = ws_stream.split();

    // Join handshake: first frame identifies us to the room
    let join = ClientEnvelope::Join {
        username: username.to_string(),
        moderator: false,
    };
    let join_json =
        serde_json::to_string(&join).map_err(|e| ClientError::SendFailed(e.to_string()))?;
    write
        .send(Message::Text(join_json.into()))
        .await
        .map_err(|e| ClientError::SendFailed(e.to_string()))?;

    loop {
        tokio::select! {
            incoming = read.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => print_frame(&text),
                    Some(Ok(Message::Close(_))) | None => return Ok(SessionEnd::Dropped),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket error: {}", e);
                        return Ok(SessionEnd::Dropped);
                    }
                }
            }
            line = lines.recv() => {
                match line {
                    Some(line) if line.trim().is_empty() => {}
                    Some(line) => {
                        let envelope = ClientEnvelope::Message {
                            message: OutgoingMessage { content: line },
                        };
                        let json = serde_json::to_string(&envelope)
                            .map_err(|e| ClientError::SendFailed(e.to_string()))?;
                        if write.send(Message::Text(json.into())).await.is_err() {
                            return Ok(SessionEnd::Dropped);
                        }
                    }
                    // stdin closed (Ctrl+C / Ctrl+D): clean close, no reconnect
                    None => {
                        let _ = write.send(Message::Close(None)).await;
                        return Ok(SessionEnd::Quit);
                    }
                }
            }
        }
    }
}

fn print_frame(text: &str) {
    match serde_json::from_str::<ServerEnvelope>(text) {
        Ok(ServerEnvelope::Message { message }) => {
            println!("{}", MessageFormatter::format_message(&message));
        }
        Ok(ServerEnvelope::PrivateMessage { message }) => {
            println!("{}", MessageFormatter::format_private(&message));
        }
        Ok(ServerEnvelope::Users { users }) => {
            println!("{}", MessageFormatter::format_roster(&users));
        }
        Ok(ServerEnvelope::History { messages }) => {
            println!("{}", MessageFormatter::format_history(&messages));
        }
        Err(e) => {
            tracing::warn!("Unrecognized frame from server: {}", e);
        }
    }
}
