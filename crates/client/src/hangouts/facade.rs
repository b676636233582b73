//! The command surface a view layer drives.
//!
//! Each `on_*` method dispatches into the reducer and then performs the
//! storage, HTTP or socket side effect that follows from it. Side-effect
//! failures are logged; the in-memory state is never rolled back.

use chrono::Utc;
use webcom_shared::{
    ApiError, Hangout, HangoutCommand, HangoutMessage, Message, OutboundHangout, User,
};

use super::action::{self, HangoutAction};
use super::bridge::WsBridge;
use super::reducer::reduce;
use super::route::Route;
use super::state::HangoutsState;
use super::store::HangoutStore;
use crate::api_client::HangoutsApi;
use crate::auth_session::AuthSession;
use crate::storage::KeyValueStore;
use crate::ws::{WsEvent, WsHandle};

pub const PENDING_DELIVERY: &str = "pending";

/// What a single server search produced.
///
/// The state keeps the last error and user list until replaced, so callers
/// report from this instead.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Hangouts(usize),
    Users(Vec<User>),
    Failed(ApiError),
}

/// Hangouts client for one signed-in user.
pub struct Hangouts<S, A> {
    state: HangoutsState,
    username: String,
    email: String,
    store: HangoutStore<S>,
    bridge: WsBridge<S>,
    api: A,
    socket: Option<WsHandle>,
}

impl<S, A> Hangouts<S, A>
where
    S: KeyValueStore + Clone,
    A: HangoutsApi,
{
    pub fn new(session: &AuthSession, store: S, api: A) -> Self {
        Self {
            state: HangoutsState::new(),
            username: session.username.clone(),
            email: session.email.clone(),
            store: HangoutStore::new(store.clone()),
            bridge: WsBridge::new(session.username.clone(), HangoutStore::new(store)),
            api,
            socket: None,
        }
    }

    pub fn with_socket(mut self, socket: WsHandle) -> Self {
        self.socket = Some(socket);
        self
    }

    /// Replace the outbound socket, e.g. after reconnecting as another user.
    pub fn set_socket(&mut self, socket: Option<WsHandle>) {
        self.socket = socket;
    }

    pub fn state(&self) -> &HangoutsState {
        &self.state
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn store(&self) -> &HangoutStore<S> {
        &self.store
    }

    pub fn route(&self) -> Route {
        Route::for_hangout(self.state.hangout.as_ref())
    }

    pub fn dispatch(&mut self, action: HangoutAction) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    /// Rehydrate the hangouts list from storage.
    pub fn mount(&mut self) {
        match self.store.load_hangouts(&self.username) {
            Ok(Some(hangouts)) => self.dispatch(action::load_hangouts(hangouts)),
            Ok(None) => crate::log_debug!("No stored hangouts for {}", self.username),
            Err(e) => crate::log_error!("Failed to load hangouts for {}: {}", self.username, e),
        }
    }

    pub fn on_select_hangout(&mut self, username: &str) {
        self.dispatch(action::select_hangout(username));
        if self.state.hangout.is_some() {
            self.load_messages(username);
        }
    }

    /// Start a hangout with a searched user, or open the existing one.
    pub fn on_select_user(&mut self, username: &str) {
        if self.state.hangouts().iter().any(|h| h.username == username) {
            self.on_select_hangout(username);
            return;
        }
        match self.state.find_user(username).cloned() {
            Some(user) => self.dispatch(action::select_user(user)),
            None => crate::log_warn!("User {} is not among the search results", username),
        }
    }

    pub fn on_search(&mut self, text: &str) {
        self.dispatch(action::search_hangouts(text));
    }

    /// Filter locally, then ask the server; the server answer wins.
    pub async fn on_start_search(&mut self) -> SearchOutcome {
        if !self.state.hangouts().is_empty() {
            self.dispatch(action::filter_hangouts());
        }

        let search = self.state.search.clone();
        self.dispatch(HangoutAction::FetchHangoutStarted);
        let result = self.api.find_hangouts(&search, &self.username).await;
        match result {
            Ok(hangouts) if hangouts.is_empty() => {
                self.dispatch(HangoutAction::FetchHangoutNotFound);
                self.fetch_users(&search).await
            }
            Ok(hangouts) => {
                let found = hangouts.len();
                self.dispatch(HangoutAction::FetchHangoutSuccess { hangouts });
                SearchOutcome::Hangouts(found)
            }
            Err(error) => {
                crate::log_error!("Hangout search for '{}' failed: {}", search, error);
                self.dispatch(HangoutAction::FetchHangoutFailed {
                    error: error.clone(),
                });
                SearchOutcome::Failed(error)
            }
        }
    }

    async fn fetch_users(&mut self, search: &str) -> SearchOutcome {
        self.dispatch(HangoutAction::FetchUserStarted);
        let result = self.api.find_users(search).await;
        match result {
            Ok(users) => {
                self.dispatch(HangoutAction::FetchUserSuccess {
                    users: users.clone(),
                });
                SearchOutcome::Users(users)
            }
            Err(error) => {
                crate::log_error!("User search for '{}' failed: {}", search, error);
                self.dispatch(HangoutAction::FetchUserFailed {
                    error: error.clone(),
                });
                SearchOutcome::Failed(error)
            }
        }
    }

    pub fn on_message_text(&mut self, text: &str) {
        self.dispatch(action::change_message_text(text));
    }

    /// Act on the selected hangout, sending any composed text along.
    pub fn on_hangout(&mut self, command: HangoutCommand) {
        let Some(hangout) = self.state.hangout.clone() else {
            crate::log_warn!("{} ignored: no hangout selected", command);
            return;
        };

        let message = if self.state.message_text.is_empty() {
            None
        } else {
            let text = self.state.message_text.clone();
            let timestamp = Utc::now().timestamp_millis();
            let local = Message::new(text.clone(), timestamp, self.username.clone());
            self.dispatch(action::save_message_locally(local.clone()));
            if let Err(e) = self
                .store
                .append_message(&hangout.username, local, &self.username)
            {
                crate::log_error!("Failed to store message to {}: {}", hangout.username, e);
            }
            Some(HangoutMessage { text, timestamp })
        };

        let outbound = OutboundHangout {
            username: hangout.username.clone(),
            email: hangout.email.clone(),
            message: message.clone(),
            command,
        };
        match &self.socket {
            Some(socket) => {
                if let Err(e) = socket.send_hangout(outbound) {
                    crate::log_error!("{}", e);
                }
            }
            None => crate::log_warn!("{} to {} not sent: no socket", command, hangout.username),
        }

        let pending = Hangout {
            message: message.or(hangout.message),
            delivery: Some(PENDING_DELIVERY.to_string()),
            ..hangout
        };
        if let Err(e) = self.store.save_hangouts_upsert(&self.username, pending) {
            crate::log_error!("Failed to store pending hangout: {}", e);
        }

        if !self.state.message_text.is_empty() {
            self.dispatch(action::change_message_text(""));
        }
    }

    /// Feed one socket event through the bridge.
    pub fn on_socket_event(&mut self, event: WsEvent) {
        match event {
            WsEvent::Opened => {
                let action = self.bridge.on_open();
                self.dispatch(action);
            }
            WsEvent::Frame(frame) => match self.bridge.on_message(&frame) {
                Ok(action) => self.dispatch(action),
                Err(e) => crate::log_warn!("Dropped inbound frame: {}", e),
            },
            WsEvent::Closed => {
                let action = self.bridge.on_close();
                self.dispatch(action);
            }
            WsEvent::Error(reason) => self.bridge.on_error(&reason),
        }
    }

    fn load_messages(&mut self, hangout_username: &str) {
        match self.store.load_messages(hangout_username) {
            Ok(messages) => {
                self.dispatch(action::loaded_messages(messages.unwrap_or_default()))
            }
            Err(e) => crate::log_error!("Failed to load messages for {}: {}", hangout_username, e),
        }
    }
}
