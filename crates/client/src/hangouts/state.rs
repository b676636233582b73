//! In-memory client state for the hangouts view.

use webcom_shared::{ApiError, Hangout, Message, User};

/// Cache of the persisted hangouts plus transient UI state.
///
/// Lost on restart unless rehydrated from storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HangoutsState {
    /// `None` until loaded from storage or the server.
    pub hangouts: Option<Vec<Hangout>>,
    /// Currently selected hangout.
    pub hangout: Option<Hangout>,
    /// Messages of the selected hangout.
    pub messages: Option<Vec<Message>>,
    pub search: String,
    /// Results of the last user search.
    pub users: Option<Vec<User>>,
    pub loading: bool,
    pub error: Option<ApiError>,
    /// Pending compose buffer.
    pub message_text: String,
    pub online: bool,
}

impl HangoutsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hangouts(&self) -> &[Hangout] {
        self.hangouts.as_deref().unwrap_or_default()
    }

    pub fn messages(&self) -> &[Message] {
        self.messages.as_deref().unwrap_or_default()
    }

    pub fn find_user(&self, username: &str) -> Option<&User> {
        self.users
            .as_deref()
            .and_then(|users| users.iter().find(|u| u.username == username))
    }
}
