//! WebSocket connection handlers.
//!
//! Each connection is driven through the [`ChatSession`] state machine:
//! upgrade → join handshake → register (roster broadcast) → history replay
//! to the new connection only → read loop → teardown (unregister, roster
//! broadcast). A failure in one connection's handler never propagates to
//! other connections.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use crate::domain::{ChatSession, ChatUser, FrameVerdict, MessageContent, Username};
use crate::infrastructure::dto::websocket::ClientEnvelope;

use super::super::state::AppState;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let mut session = ChatSession::new();

    // Join handshake: the first content frame must be `join`
    let Some((username, is_moderator)) = await_join(&mut ws_receiver, &mut session).await else {
        tracing::info!("Connection closed before completing the join handshake");
        return;
    };

    // Channel this connection's outbound messages are queued on
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    // Register: adds to the registry and broadcasts the roster (including us)
    let user: ChatUser = match state.join_chat.execute(username, is_moderator, tx).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Join failed: {}", e);
            return;
        }
    };
    if let Err(e) = session.activate() {
        tracing::error!("Session activation failed for '{}': {}", user.id, e);
        state.leave_chat.execute(&user.id).await;
        return;
    }

    // History replay goes to the new connection only, after the roster
    state.join_chat.replay_history(&user.id).await;

    // Forward queued outbound messages to the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if ws_sender.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    // Process inbound frames until the transport closes, either side
    tokio::select! {
        _ = &mut send_task => {},
        _ = read_loop(&mut ws_receiver, &mut session, &state, &user) => {
            send_task.abort();
        },
    }

    // Teardown: idempotent, safe against racing close paths
    session.begin_close();
    state.leave_chat.execute(&user.id).await;
    session.finish_close();
    tracing::debug!("Session for '{}' is {:?}", user.id, session.state());
}

/// Wait for the join handshake frame
///
/// Content frames before the handshake are discarded; repeated malformed
/// frames drop the connection.
async fn await_join(
    receiver: &mut SplitStream<WebSocket>,
    session: &mut ChatSession,
) -> Option<(Username, bool)> {
    while let Some(frame) = receiver.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!("WebSocket error during handshake: {}", e);
                return None;
            }
        };
        match frame {
            Message::Text(text) => match serde_json::from_str::<ClientEnvelope>(&text) {
                Ok(ClientEnvelope::Join {
                    username,
                    moderator,
                }) => match Username::new(username) {
                    Ok(name) => return Some((name, moderator)),
                    Err(e) => {
                        tracing::warn!("Rejecting join with invalid username: {}", e);
                        return None;
                    }
                },
                Ok(ClientEnvelope::Message { .. }) => {
                    tracing::warn!("Content frame before join handshake, discarding");
                }
                Err(e) => {
                    tracing::warn!("Malformed frame during handshake: {}", e);
                    if session.record_malformed_frame() == FrameVerdict::Disconnect {
                        return None;
                    }
                }
            },
            Message::Close(_) => return None,
            _ => {}
        }
    }
    None
}

/// Process inbound frames for an active session
async fn read_loop(
    receiver: &mut SplitStream<WebSocket>,
    session: &mut ChatSession,
    state: &Arc<AppState>,
    user: &ChatUser,
) {
    while let Some(frame) = receiver.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!("WebSocket error for '{}': {}", user.id, e);
                break;
            }
        };
        match frame {
            Message::Text(text) => {
                if !session.accepts_inbound() {
                    // a send racing with close is a best-effort drop
                    break;
                }
                match serde_json::from_str::<ClientEnvelope>(&text) {
                    Ok(ClientEnvelope::Message { message }) => {
                        match MessageContent::new(message.content) {
                            Ok(content) => {
                                state.post_message.execute(user, content).await;
                            }
                            Err(e) => {
                                tracing::warn!(
                                    "Dropping invalid message from '{}': {}",
                                    user.username,
                                    e
                                );
                            }
                        }
                    }
                    Ok(ClientEnvelope::Join { .. }) => {
                        tracing::warn!("Duplicate join from '{}', ignoring", user.username);
                    }
                    Err(e) => {
                        // one bad frame does not kill the session
                        tracing::warn!("Malformed frame from '{}': {}", user.username, e);
                        if session.record_malformed_frame() == FrameVerdict::Disconnect {
                            tracing::warn!(
                                "Too many malformed frames from '{}', disconnecting",
                                user.username
                            );
                            break;
                        }
                    }
                }
            }
            Message::Close(_) => {
                tracing::info!("'{}' requested close", user.username);
                break;
            }
            Message::Ping(_) | Message::Pong(_) => {
                // handled by the protocol layer
            }
            _ => {}
        }
    }
}
