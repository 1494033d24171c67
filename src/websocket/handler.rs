//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and manages the connection lifecycle.
//! Every `select` message is answered with a fresh pair of charts.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::messages::{ClientMessage, ServerMessage};
use crate::api::AppState;
use crate::dashboard::Dashboard;

/// WebSocket upgrade handler
///
/// This is the entry point for WebSocket connections.
/// It upgrades the HTTP connection to WebSocket and starts message handling.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let dashboard = Arc::clone(&state.dashboard);
    ws.on_upgrade(move |socket| handle_socket(socket, dashboard))
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, dashboard: Arc<Dashboard>) {
    let (mut sender, mut receiver) = socket.split();
    let connection_id = uuid::Uuid::new_v4().to_string();

    // Channel for replies to this connection
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let connected = ServerMessage::Connected {
        connection_id: connection_id.clone(),
        options: dashboard.options(),
    };
    if tx.send(connected).is_err() {
        return;
    }

    tracing::debug!(connection_id = %connection_id, "WebSocket connected");

    let conn_id_for_send = connection_id.clone();

    // Task to forward messages from channel to WebSocket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(text) => {
                    if sender.send(Message::Text(text)).await.is_err() {
                        tracing::debug!(
                            connection_id = %conn_id_for_send,
                            "WebSocket send failed, closing connection"
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize message");
                }
            }
        }
    });

    let conn_id_for_recv = connection_id.clone();

    // Task to receive messages from WebSocket and handle them
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(msg) => {
                    if !handle_ws_message(&dashboard, &tx, &conn_id_for_recv, msg) {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        connection_id = %conn_id_for_recv,
                        error = %e,
                        "WebSocket receive error"
                    );
                    break;
                }
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    tracing::debug!(connection_id = %connection_id, "WebSocket disconnected");
}

/// Handle a received WebSocket message
///
/// Returns false if the connection should be closed.
fn handle_ws_message(
    dashboard: &Dashboard,
    tx: &mpsc::UnboundedSender<ServerMessage>,
    connection_id: &str,
    message: Message,
) -> bool {
    let reply = match message {
        Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
            Ok(client_msg) => handle_client_message(dashboard, client_msg),
            Err(e) => {
                tracing::debug!(
                    connection_id = %connection_id,
                    error = %e,
                    text = %text,
                    "Invalid client message"
                );
                // Send error but keep connection open
                ServerMessage::error(format!("Invalid message format: {}", e))
            }
        },
        Message::Binary(_) => ServerMessage::error("Binary messages not supported"),
        // Axum answers pings itself
        Message::Ping(_) | Message::Pong(_) => return true,
        Message::Close(_) => {
            tracing::debug!(connection_id = %connection_id, "Client requested close");
            return false;
        }
    };

    tx.send(reply).is_ok()
}

/// Handle a parsed client message
pub fn handle_client_message(dashboard: &Dashboard, message: ClientMessage) -> ServerMessage {
    match message {
        ClientMessage::Select { region, year } => match dashboard.selection(&region, year) {
            Ok(selection) => dashboard.on_selection_change(selection).into(),
            Err(e) => ServerMessage::error(e.to_string()),
        },
        ClientMessage::Ping => ServerMessage::Pong,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{parse_csv, Region};

    fn dashboard() -> Dashboard {
        let csv = "Region,Date,Estimated_fire_area,Count
SA,2008-02-10,4.0,6
SA,2008-02-11,6.0,8";
        let dataset = Arc::new(parse_csv(csv.as_bytes()).unwrap());
        Dashboard::new(dataset, Region::SouthAustralia, 2008)
    }

    #[test]
    fn test_select_returns_charts() {
        let reply = handle_client_message(
            &dashboard(),
            ClientMessage::Select {
                region: "SA".to_string(),
                year: 2008,
            },
        );

        match reply {
            ServerMessage::Charts {
                region,
                year,
                fire_area,
                pixel_count,
            } => {
                assert_eq!(region, Region::SouthAustralia);
                assert_eq!(year, 2008);
                assert_eq!(fire_area.point_count(), 1);
                assert_eq!(pixel_count.point_count(), 1);
            }
            other => panic!("Expected Charts, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_selection_returns_error() {
        let reply = handle_client_message(
            &dashboard(),
            ClientMessage::Select {
                region: "SA".to_string(),
                year: 1970,
            },
        );
        assert!(matches!(reply, ServerMessage::Error { .. }));
    }

    #[test]
    fn test_ping() {
        let reply = handle_client_message(&dashboard(), ClientMessage::Ping);
        assert!(matches!(reply, ServerMessage::Pong));
    }

    #[test]
    fn test_invalid_text_keeps_connection_open() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let keep_open = handle_ws_message(
            &dashboard(),
            &tx,
            "test",
            Message::Text("not json".to_string()),
        );

        assert!(keep_open);
        assert!(matches!(rx.try_recv(), Ok(ServerMessage::Error { .. })));
    }

    #[test]
    fn test_close_ends_connection() {
        let (tx, _rx) = mpsc::unbounded_channel();
        assert!(!handle_ws_message(&dashboard(), &tx, "test", Message::Close(None)));
    }
}
