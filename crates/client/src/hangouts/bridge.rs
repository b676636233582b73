//! Glue between socket events and the hangouts reducer.
//!
//! Inbound frames are decoded, merged into the durable store, and turned
//! into actions for the caller to dispatch. The bridge never reconnects;
//! that belongs to the connection that owns the socket.

use webcom_shared::{decode_hangout_frame, DecodeError};

use super::action::{connection_changed, hangout_received, HangoutAction};
use super::store::HangoutStore;
use crate::storage::KeyValueStore;

/// Socket handlers bound to one username.
#[derive(Debug, Clone)]
pub struct WsBridge<S> {
    username: String,
    store: HangoutStore<S>,
}

impl<S: KeyValueStore> WsBridge<S> {
    pub fn new(username: impl Into<String>, store: HangoutStore<S>) -> Self {
        Self {
            username: username.into(),
            store,
        }
    }

    /// Handle one inbound text frame.
    ///
    /// A frame that fails to decode leaves the store untouched. A storage
    /// failure is logged and the action is still returned, so the
    /// in-memory state reflects the event even if persistence lags.
    pub fn on_message(&self, frame: &str) -> Result<HangoutAction, DecodeError> {
        let hangout = decode_hangout_frame(frame)?;
        crate::log_debug!(
            "hangout event for {}: {} is {}",
            self.username,
            hangout.username,
            hangout.state
        );

        if let Err(e) = self.store.save_hangouts_upsert(&self.username, hangout.clone()) {
            crate::log_error!("Failed to persist hangout {}: {}", hangout.username, e);
        }

        Ok(hangout_received(hangout))
    }

    pub fn on_open(&self) -> HangoutAction {
        crate::log_info!("Socket open for {}", self.username);
        connection_changed(true)
    }

    pub fn on_close(&self) -> HangoutAction {
        crate::log_info!("Socket closed for {}", self.username);
        connection_changed(false)
    }

    pub fn on_error(&self, reason: &str) {
        crate::log_error!("Socket error for {}: {}", self.username, reason);
    }
}
