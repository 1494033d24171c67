//! WebSocket Message Types
//!
//! Defines all message types for WebSocket communication between
//! the dashboard page and the server.

use serde::{Deserialize, Serialize};

use crate::chart::ChartSpec;
use crate::dashboard::{DashboardCharts, DashboardOptions};
use crate::dataset::Region;

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// The user changed a selector
    Select {
        /// Region code (e.g., "NSW")
        region: String,
        year: i32,
    },
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
        /// Selector contents and defaults
        options: DashboardOptions,
    },
    /// Freshly computed charts for a selection
    Charts {
        region: Region,
        year: i32,
        fire_area: Box<ChartSpec>,
        pixel_count: Box<ChartSpec>,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}

impl From<DashboardCharts> for ServerMessage {
    fn from(charts: DashboardCharts) -> Self {
        ServerMessage::Charts {
            region: charts.selection.region,
            year: charts.selection.year,
            fire_area: Box::new(charts.fire_area),
            pixel_count: Box::new(charts.pixel_count),
        }
    }
}

impl ServerMessage {
    /// Create an error message
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Selection;
    use crate::dashboard::Dashboard;
    use crate::dataset::Dataset;
    use std::sync::Arc;

    #[test]
    fn test_client_message_deserialize_select() {
        let json = r#"{"type": "select", "region": "NSW", "year": 2005}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        match msg {
            ClientMessage::Select { region, year } => {
                assert_eq!(region, "NSW");
                assert_eq!(year, 2005);
            }
            _ => panic!("Expected Select"),
        }
    }

    #[test]
    fn test_client_message_deserialize_ping() {
        let json = r#"{"type": "ping"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }

    #[test]
    fn test_client_message_rejects_missing_year() {
        let json = r#"{"type": "select", "region": "NSW"}"#;
        assert!(serde_json::from_str::<ClientMessage>(json).is_err());
    }

    #[test]
    fn test_server_message_serialize_charts() {
        let dashboard = Dashboard::new(Arc::new(Dataset::default()), Region::Victoria, 2005);
        let charts = dashboard.on_selection_change(Selection::new(Region::Victoria, 2005));

        let json = serde_json::to_value(ServerMessage::from(charts)).unwrap();
        assert_eq!(json["type"], "charts");
        assert_eq!(json["region"], "VI");
        assert_eq!(json["year"], 2005);
        assert_eq!(json["fire_area"]["data"][0]["type"], "pie");
        assert_eq!(json["pixel_count"]["data"][0]["type"], "bar");
    }

    #[test]
    fn test_server_message_serialize_error() {
        let json = serde_json::to_string(&ServerMessage::error("bad")).unwrap();
        assert_eq!(json, r#"{"type":"error","message":"bad"}"#);
    }
}
