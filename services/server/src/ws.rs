//! WebSocket handler for the live code stream.
//!
//! Clients connect to `GET /qr/live` (bearer-gated at upgrade time) and
//! immediately receive the current code, then one frame per rotation
//! until they disconnect. The initial frame and every update share the
//! same shape, so a display can render whatever arrives.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::gate::AuthedUser;
use crate::state::AppState;

/// JSON frame pushed over the socket.
#[derive(Debug, Clone, Serialize)]
pub struct CodeFrame {
    pub uuid: Uuid,
}

/// Upgrade an HTTP request to a WebSocket connection and begin streaming
/// the rotating code.
///
/// # Route
///
/// `GET /qr/live`
pub async fn qr_live(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    caller: AuthedUser,
) -> impl IntoResponse {
    info!(user = %caller.user_id, "live code subscriber connected");
    ws.on_upgrade(move |socket| handle_socket(socket, state, caller))
}

/// Handle the WebSocket lifecycle: subscribe, forward each code as a text
/// frame, release the subscription on every exit path.
async fn handle_socket(mut socket: WebSocket, state: AppState, caller: AuthedUser) {
    let (subscriber, mut rx) = state.broadcaster.subscribe(state.generator.current());

    loop {
        tokio::select! {
            // Next code for this subscriber (the initial value first, then
            // one per rotation).
            code = rx.recv() => {
                match code {
                    Some(code) => {
                        let frame = match serde_json::to_string(&CodeFrame { uuid: code }) {
                            Ok(json) => json,
                            Err(e) => {
                                warn!("failed to serialize code frame: {e}");
                                continue;
                            }
                        };
                        if socket.send(Message::Text(frame.into())).await.is_err() {
                            debug!(user = %caller.user_id, "subscriber send failed");
                            break;
                        }
                    }
                    // the broadcaster dropped this subscriber
                    None => break,
                }
            }
            // Client close / transport teardown.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        debug!(user = %caller.user_id, "websocket error: {e}");
                        break;
                    }
                    _ => {
                        // ignore client text/binary frames
                    }
                }
            }
        }
    }

    state.broadcaster.unsubscribe(subscriber);
    info!(user = %caller.user_id, "live code subscriber disconnected");
}
