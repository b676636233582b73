//! Actions the hangouts reducer understands, and their creators.

use webcom_shared::{ApiError, Hangout, Message, User};

/// Every state transition of the hangouts client.
#[derive(Debug, Clone, PartialEq)]
pub enum HangoutAction {
    LoadHangouts { hangouts: Vec<Hangout> },
    SelectedHangout { username: String },
    SelectedUser { user: User },
    SearchedHangout { search: String },
    FilterHangouts,
    FetchHangoutStarted,
    FetchHangoutSuccess { hangouts: Vec<Hangout> },
    FetchHangoutFailed { error: ApiError },
    /// Search succeeded with no match; a user search follows.
    FetchHangoutNotFound,
    FetchUserStarted,
    FetchUserSuccess { users: Vec<User> },
    FetchUserFailed { error: ApiError },
    MessageTextChanged { text: String },
    SavedMessageLocally { message: Message },
    LoadedMessages { messages: Vec<Message> },
    HangoutRecieved { hangout: Hangout },
    ConnectionChanged { online: bool },
}

pub fn load_hangouts(hangouts: Vec<Hangout>) -> HangoutAction {
    HangoutAction::LoadHangouts { hangouts }
}

pub fn select_hangout(username: impl Into<String>) -> HangoutAction {
    HangoutAction::SelectedHangout {
        username: username.into(),
    }
}

pub fn select_user(user: User) -> HangoutAction {
    HangoutAction::SelectedUser { user }
}

pub fn search_hangouts(search: impl Into<String>) -> HangoutAction {
    HangoutAction::SearchedHangout {
        search: search.into(),
    }
}

pub fn filter_hangouts() -> HangoutAction {
    HangoutAction::FilterHangouts
}

pub fn change_message_text(text: impl Into<String>) -> HangoutAction {
    HangoutAction::MessageTextChanged { text: text.into() }
}

pub fn save_message_locally(message: Message) -> HangoutAction {
    HangoutAction::SavedMessageLocally { message }
}

pub fn loaded_messages(messages: Vec<Message>) -> HangoutAction {
    HangoutAction::LoadedMessages { messages }
}

pub fn hangout_received(hangout: Hangout) -> HangoutAction {
    HangoutAction::HangoutRecieved { hangout }
}

pub fn connection_changed(online: bool) -> HangoutAction {
    HangoutAction::ConnectionChanged { online }
}
