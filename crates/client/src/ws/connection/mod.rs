//! WebSocket connection types shared by every platform.
//!
//! The native socket implementation lives in `connection_native`.

use futures_channel::mpsc::UnboundedSender;
use webcom_shared::OutboundHangout;

/// Connection state for a WebSocket
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting { attempt: u32 },
    Failed { reason: String },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }
}

/// What the socket reports to its owner.
#[derive(Debug, Clone, PartialEq)]
pub enum WsEvent {
    Opened,
    /// One inbound text frame, undecoded.
    Frame(String),
    Closed,
    Error(String),
}

/// Configuration for auto-reconnect behavior
#[derive(Debug, Clone)]
pub struct ReconnectConfig {
    /// Maximum number of reconnect attempts (0 = infinite)
    pub max_attempts: u32,
    /// Initial delay in milliseconds
    pub initial_delay_ms: u32,
    /// Maximum delay in milliseconds
    pub max_delay_ms: u32,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f32,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_delay_ms: 1000,
            max_delay_ms: 30000,
            backoff_multiplier: 1.5,
        }
    }
}

impl ReconnectConfig {
    /// Calculate delay for a given attempt number
    pub fn delay_for_attempt(&self, attempt: u32) -> u32 {
        let delay = self.initial_delay_ms as f32 * self.backoff_multiplier.powi(attempt as i32);
        (delay as u32).min(self.max_delay_ms)
    }

    /// Whether `attempt` failures exhaust the retry budget
    pub fn exhausted(&self, attempt: u32) -> bool {
        self.max_attempts > 0 && attempt >= self.max_attempts
    }
}

/// Handle for queueing outbound frames on a connection
#[derive(Clone, Debug)]
pub struct WsHandle {
    sender: UnboundedSender<OutboundHangout>,
    pub host: String,
}

impl WsHandle {
    pub(crate) fn new(sender: UnboundedSender<OutboundHangout>, host: String) -> Self {
        Self { sender, host }
    }

    /// Queue a hangout command for the server
    pub fn send_hangout(&self, frame: OutboundHangout) -> Result<(), String> {
        crate::log_info!(
            "WsHandle::send to host '{}': {} {}",
            self.host,
            frame.command,
            frame.username
        );
        self.sender
            .unbounded_send(frame)
            .map_err(|e| format!("Failed to send: {}", e))
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod connection_native;
#[cfg(not(target_arch = "wasm32"))]
pub use connection_native::WsConnection;

#[cfg(test)]
mod tests {
    use super::*;
    use futures_channel::mpsc::unbounded;
    use webcom_shared::HangoutCommand;

    #[test]
    fn backoff_grows_and_caps() {
        let config = ReconnectConfig::default();
        assert_eq!(config.delay_for_attempt(0), 1000);
        assert_eq!(config.delay_for_attempt(1), 1500);
        assert_eq!(config.delay_for_attempt(20), 30000);
        assert!(!config.exhausted(9));
        assert!(config.exhausted(10));

        let forever = ReconnectConfig {
            max_attempts: 0,
            ..config
        };
        assert!(!forever.exhausted(1000));
    }

    #[test]
    fn handle_queues_frames_until_receiver_drops() {
        let (tx, mut rx) = unbounded();
        let handle = WsHandle::new(tx, "localhost:3000".into());
        let frame = OutboundHangout {
            username: "bob".into(),
            email: String::new(),
            message: None,
            command: HangoutCommand::Invite,
        };

        handle.send_hangout(frame.clone()).unwrap();
        assert_eq!(rx.try_recv().unwrap(), frame.clone());

        drop(rx);
        assert!(handle.is_closed());
        assert!(handle.send_hangout(frame).is_err());
    }
}
