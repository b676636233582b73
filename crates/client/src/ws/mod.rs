//! WebSocket plumbing for real-time hangout events.
//!
//! ```text
//!   WsConnection (owns the socket, reconnects)
//!        │  WsEvent::{Opened, Frame, Closed, Error}
//!        ▼
//!   Hangouts::on_socket_event ──► WsBridge ──► HangoutStore + reducer
//!        │
//!        └── WsHandle::send_hangout ──► outbound frames
//! ```

mod connection;

pub use connection::{ConnectionState, ReconnectConfig, WsEvent, WsHandle};

#[cfg(not(target_arch = "wasm32"))]
pub use connection::WsConnection;
