//! WebSocket viewer connection: control events in, curve frames out

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use coil_field::ControlEvent;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::session::{AppState, Frame};

fn to_message(frame: Frame) -> Message {
    match frame {
        Frame::Text(text) => Message::Text(text),
        Frame::Binary(data) => Message::Binary(data),
    }
}

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.subscribe();

    // Static panel first, then the current parameters and curve
    if sender.send(Message::Text(state.panel_message())).await.is_err() {
        return;
    }
    for frame in state.snapshot().await {
        if sender.send(to_message(frame)).await.is_err() {
            return;
        }
    }

    loop {
        tokio::select! {
            Ok(frame) = rx.recv() => {
                if sender.send(to_message(frame)).await.is_err() {
                    break;
                }
            }
            Some(msg) = receiver.next() => {
                match msg {
                    Ok(Message::Text(text)) => handle_control(&state, &text).await,
                    Ok(Message::Close(_)) | Err(_) => break,
                    _ => {}
                }
            }
            else => break,
        }
    }

    debug!("Viewer disconnected");
}

async fn handle_control(state: &AppState, text: &str) {
    let event: ControlEvent = match serde_json::from_str(text) {
        Ok(event) => event,
        Err(e) => {
            warn!("Ignoring malformed control event: {}", e);
            return;
        }
    };

    debug!("Control event: {:?}", event);
    if let Err(e) = state.apply(event).await {
        warn!("Rejected control event: {}", e);
    }
}
