// WebSocket adapter for the arcade session. Each connection owns exactly one
// session task; closing the socket notifies shutdown so no timer or frame
// callback outlives the connection.

use crate::frameworks::config;
use crate::interface_adapters::protocol::{ClientMessage, ServerMessage, SessionUpdateDto};
use crate::interface_adapters::state::AppState;
use crate::use_cases::types::{SessionEvent, SessionUpdate};
use crate::use_cases::session_task;

use axum::{
    extract::{
        State,
        ws::{Message, Utf8Bytes, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::{Notify, broadcast, mpsc, watch};
use tracing::{debug, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Serializes each snapshot once and fans the shared bytes out; the watch
/// channel always holds the latest frame for lag recovery.
pub async fn snapshot_serializer(
    mut snapshot_rx: broadcast::Receiver<SessionUpdate>,
    bytes_tx: broadcast::Sender<Utf8Bytes>,
    latest_tx: watch::Sender<Utf8Bytes>,
) {
    loop {
        match snapshot_rx.recv().await {
            Ok(update) => {
                let msg = ServerMessage::Snapshot(SessionUpdateDto::from(update));
                let txt = match serde_json::to_string(&msg) {
                    Ok(txt) => txt,
                    Err(e) => {
                        warn!(error = ?e, "failed to serialize snapshot");
                        continue;
                    }
                };

                let bytes = Utf8Bytes::from(txt);
                let _ = latest_tx.send(bytes.clone());
                let _ = bytes_tx.send(bytes);
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(missed = n, "snapshot serializer lagged; skipping to latest");
            }
            Err(broadcast::error::RecvError::Closed) => {
                debug!("snapshot channel closed; serializer exiting");
                break;
            }
        }
    }
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    info!("client connected");

    // Channel wiring for this connection's private session.
    let (events_tx, events_rx) = mpsc::channel::<SessionEvent>(config::EVENT_CHANNEL_CAPACITY);
    let (snapshot_tx, snapshot_rx) =
        broadcast::channel::<SessionUpdate>(config::SNAPSHOT_BROADCAST_CAPACITY);
    let (bytes_tx, mut bytes_rx) =
        broadcast::channel::<Utf8Bytes>(config::SNAPSHOT_BROADCAST_CAPACITY);
    let (latest_tx, latest_rx) = watch::channel::<Utf8Bytes>(Utf8Bytes::from(""));
    let shutdown = Arc::new(Notify::new());

    tokio::spawn(session_task(
        events_rx,
        snapshot_tx,
        shutdown.clone(),
        state.session_settings.clone(),
    ));
    tokio::spawn(snapshot_serializer(snapshot_rx, bytes_tx, latest_tx));

    let (mut sink, mut stream) = socket.split();
    let mut invalid_json: u32 = 0;

    loop {
        tokio::select! {
            incoming = stream.next() => {
                match incoming {
                    Some(Ok(Message::Text(txt))) => {
                        match serde_json::from_str::<ClientMessage>(txt.as_str()) {
                            Ok(msg) => {
                                let event = match msg {
                                    ClientMessage::Start => SessionEvent::Start,
                                    ClientMessage::Restart => SessionEvent::Restart,
                                    ClientMessage::Shake => SessionEvent::Shake,
                                    ClientMessage::Move { direction } => SessionEvent::Move {
                                        direction: direction.into(),
                                    },
                                };
                                if events_tx.send(event).await.is_err() {
                                    warn!("session task gone; closing connection");
                                    break;
                                }
                            }
                            Err(e) => {
                                invalid_json += 1;
                                debug!(error = ?e, invalid_json, "ignoring invalid client message");
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("client disconnected");
                        break;
                    }
                    Some(Ok(_)) => {
                        // Binary/ping/pong frames carry no game input.
                    }
                    Some(Err(e)) => {
                        warn!(error = ?e, "websocket receive error");
                        break;
                    }
                }
            }
            outgoing = bytes_rx.recv() => {
                match outgoing {
                    Ok(bytes) => {
                        if sink.send(Message::Text(bytes)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        // Drop the backlog and resume from the freshest frame.
                        debug!(missed = n, "client lagged; resyncing to latest snapshot");
                        let latest = latest_rx.borrow().clone();
                        if !latest.is_empty() && sink.send(Message::Text(latest)).await.is_err() {
                            break;
                        }
                        bytes_rx = bytes_rx.resubscribe();
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        break;
                    }
                }
            }
        }
    }

    // Stop-on-teardown: the session loop and its timers must not outlive us.
    shutdown.notify_one();
    info!("connection closed");
}
