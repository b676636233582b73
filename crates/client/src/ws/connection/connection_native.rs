//! Native/Desktop WebSocket implementation using tokio-tungstenite.

use std::sync::Arc;

use futures_channel::mpsc::{unbounded, UnboundedReceiver};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use url::Url;
use webcom_shared::{encode_outbound, OutboundHangout};

use super::{ConnectionState, ReconnectConfig, WsEvent, WsHandle};

type EventCallback = Arc<dyn Fn(WsEvent) + Send + Sync>;

/// The socket shared by the hangouts subsystem (native implementation).
///
/// Dropping the connection stops its background task.
pub struct WsConnection {
    /// The host this connection is for (e.g. "example.com:8080")
    pub host: String,
    /// Current connection state
    state: watch::Receiver<ConnectionState>,
    sender: futures_channel::mpsc::UnboundedSender<OutboundHangout>,
    task: JoinHandle<()>,
}

impl WsConnection {
    /// Start connecting to `url`. Must be called inside a tokio runtime.
    pub fn connect(
        url: Url,
        reconnect_config: ReconnectConfig,
        on_event: impl Fn(WsEvent) + Send + Sync + 'static,
    ) -> Self {
        let host = match (url.host_str(), url.port()) {
            (Some(h), Some(p)) => format!("{h}:{p}"),
            (Some(h), None) => h.to_string(),
            _ => url.to_string(),
        };
        let (sender, receiver) = unbounded();
        let (state_tx, state) = watch::channel(ConnectionState::Disconnected);

        // Start connection loop in a background task
        let task = tokio::spawn(connection_loop(
            host.clone(),
            url,
            state_tx,
            receiver,
            Arc::new(on_event),
            reconnect_config,
        ));

        Self {
            host,
            state,
            sender,
            task,
        }
    }

    /// Get a handle for sending frames
    pub fn handle(&self) -> WsHandle {
        WsHandle::new(self.sender.clone(), self.host.clone())
    }

    /// Watch state transitions
    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.state.clone()
    }
}

impl Drop for WsConnection {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Why a connected session ended.
enum SessionEnd {
    /// Socket closed or failed; reconnect.
    Closed { carried_frames: bool },
    /// Every handle was dropped; stop for good.
    SendersGone,
}

async fn connection_loop(
    host: String,
    url: Url,
    state: watch::Sender<ConnectionState>,
    mut receiver: UnboundedReceiver<OutboundHangout>,
    on_event: EventCallback,
    reconnect_config: ReconnectConfig,
) {
    let mut attempt = 0u32;

    loop {
        if attempt == 0 {
            state.send_replace(ConnectionState::Connecting);
        } else {
            state.send_replace(ConnectionState::Reconnecting { attempt });
        }

        match connect_async(url.as_str()).await {
            Ok((ws_stream, _response)) => {
                state.send_replace(ConnectionState::Connected);
                crate::log_info!("WebSocket connected to {}", host);
                on_event(WsEvent::Opened);

                let end = run_session(&host, ws_stream, &mut receiver, &on_event).await;

                crate::log_info!("WebSocket to {} closed", host);
                state.send_replace(ConnectionState::Disconnected);
                on_event(WsEvent::Closed);

                match end {
                    SessionEnd::SendersGone => return,
                    // Only a session that carried traffic resets the budget.
                    SessionEnd::Closed { carried_frames: true } => attempt = 0,
                    SessionEnd::Closed { carried_frames: false } => {}
                }
            }
            Err(e) => {
                crate::log_error!("WebSocket error for {}: {}", host, e);
                on_event(WsEvent::Error(e.to_string()));
            }
        }

        if reconnect_config.exhausted(attempt) {
            state.send_replace(ConnectionState::Failed {
                reason: format!(
                    "Max reconnect attempts ({}) exceeded",
                    reconnect_config.max_attempts
                ),
            });
            return;
        }

        // Wait before reconnecting
        let delay = reconnect_config.delay_for_attempt(attempt);
        crate::log_info!(
            "Reconnecting to {} in {}ms (attempt {})",
            host,
            delay,
            attempt + 1
        );
        tokio::time::sleep(tokio::time::Duration::from_millis(delay as u64)).await;
        attempt += 1;
    }
}

/// Pump frames both ways until the socket or the senders go away.
async fn run_session<S>(
    host: &str,
    ws_stream: S,
    receiver: &mut UnboundedReceiver<OutboundHangout>,
    on_event: &EventCallback,
) -> SessionEnd
where
    S: futures_util::Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>>
        + futures_util::Sink<Message, Error = tokio_tungstenite::tungstenite::Error>
        + Unpin,
{
    let (mut write, mut read) = ws_stream.split();
    let mut carried_frames = false;

    loop {
        tokio::select! {
            incoming = read.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    crate::log_debug!("WebSocket received: {}", text.as_str());
                    carried_frames = true;
                    on_event(WsEvent::Frame(text.as_str().to_string()));
                }
                Some(Ok(Message::Close(_))) => {
                    crate::log_info!("WebSocket to {} received close frame", host);
                    return SessionEnd::Closed { carried_frames };
                }
                Some(Ok(Message::Ping(data))) => {
                    // Pong is handled automatically by tungstenite
                    crate::log_debug!("Received ping: {:?}", data);
                }
                Some(Ok(_)) => {
                    // Ignore binary, pong, etc.
                }
                Some(Err(e)) => {
                    crate::log_error!("WebSocket read error: {}", e);
                    on_event(WsEvent::Error(e.to_string()));
                    return SessionEnd::Closed { carried_frames };
                }
                None => return SessionEnd::Closed { carried_frames },
            },
            outgoing = receiver.next() => match outgoing {
                Some(frame) => match encode_outbound(&frame) {
                    Ok(json) => {
                        crate::log_info!("Sending to {}: {}", host, json);
                        if let Err(e) = write.send(Message::Text(json.into())).await {
                            crate::log_error!("Send failed: {}", e);
                            on_event(WsEvent::Error(e.to_string()));
                            return SessionEnd::Closed { carried_frames };
                        }
                        carried_frames = true;
                    }
                    Err(e) => {
                        crate::log_error!("Serialize failed: {}", e);
                    }
                },
                None => {
                    crate::log_info!("Sender dropped, closing socket to {}", host);
                    let _ = write.send(Message::Close(None)).await;
                    return SessionEnd::SendersGone;
                }
            },
        }
    }
}
