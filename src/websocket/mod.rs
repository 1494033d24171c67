//! WebSocket Interaction Channel
//!
//! Lets the dashboard page push selector changes and receive recomputed
//! charts over one long-lived connection.
//!
//! ## Architecture
//!
//! - **Handler**: Handles WebSocket upgrade and message processing
//! - **Messages**: Defines client and server message formats
//!
//! ## Example
//!
//! ```javascript
//! // Browser
//! const ws = new WebSocket('ws://localhost:8050/ws');
//!
//! ws.onopen = () => {
//!   ws.send(JSON.stringify({type: 'select', region: 'NSW', year: 2005}));
//! };
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'charts') {
//!     Plotly.react('plot1', msg.fire_area.data, msg.fire_area.layout);
//!   }
//! };
//! ```

mod handler;
mod messages;

pub use handler::{handle_client_message, websocket_handler};
pub use messages::{ClientMessage, ServerMessage};
