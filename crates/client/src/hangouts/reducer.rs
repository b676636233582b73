//! Pure state transitions for the hangouts client.

use webcom_shared::{upsert_by_username, Hangout};

use super::action::HangoutAction;
use super::state::HangoutsState;

/// Apply `action` to `state`.
pub fn reduce(mut state: HangoutsState, action: HangoutAction) -> HangoutsState {
    match action {
        HangoutAction::LoadHangouts { hangouts } => {
            state.hangouts = Some(hangouts);
        }
        HangoutAction::SelectedHangout { username } => {
            state.hangout = state
                .hangouts()
                .iter()
                .find(|h| h.username == username)
                .cloned();
        }
        HangoutAction::SelectedUser { user } => {
            let hangout = Hangout::invite(&user);
            let mut hangouts = state.hangouts.take().unwrap_or_default();
            hangouts.push(hangout.clone());
            state.hangouts = Some(hangouts);
            state.hangout = Some(hangout);
        }
        HangoutAction::SearchedHangout { search } => {
            state.search = search;
        }
        HangoutAction::FilterHangouts => {
            if let Some(hangouts) = state.hangouts.take() {
                let search = state.search.as_str();
                state.hangouts = Some(
                    hangouts
                        .into_iter()
                        .filter(|h| h.username.contains(search))
                        .collect(),
                );
            }
        }
        HangoutAction::FetchHangoutStarted | HangoutAction::FetchUserStarted => {
            state.loading = true;
        }
        HangoutAction::FetchHangoutSuccess { hangouts } => {
            state.loading = false;
            state.hangouts = Some(hangouts);
        }
        HangoutAction::FetchHangoutFailed { error } | HangoutAction::FetchUserFailed { error } => {
            state.loading = false;
            state.error = Some(error);
        }
        HangoutAction::FetchHangoutNotFound => {
            state.loading = false;
        }
        HangoutAction::FetchUserSuccess { users } => {
            state.loading = false;
            state.users = Some(users);
        }
        HangoutAction::MessageTextChanged { text } => {
            state.message_text = text;
        }
        HangoutAction::SavedMessageLocally { message } => {
            state.messages.get_or_insert_with(Vec::new).push(message);
        }
        HangoutAction::LoadedMessages { messages } => {
            state.messages = Some(messages);
        }
        HangoutAction::HangoutRecieved { hangout } => {
            state.hangouts = Some(upsert_by_username(state.hangouts.take(), hangout.clone()));
            state.hangout = Some(hangout);
        }
        HangoutAction::ConnectionChanged { online } => {
            state.online = online;
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hangouts::action::*;
    use webcom_shared::{ApiError, HangoutState, Message, User};

    fn user(name: &str) -> User {
        User {
            username: name.into(),
            email: format!("{name}@x.io"),
        }
    }

    fn hangout(name: &str, state: HangoutState) -> Hangout {
        Hangout::new(name, format!("{name}@x.io"), state)
    }

    fn with_hangouts(hangouts: Vec<Hangout>) -> HangoutsState {
        reduce(HangoutsState::new(), load_hangouts(hangouts))
    }

    #[test]
    fn select_user_then_receive_update() {
        let state = reduce(HangoutsState::new(), select_user(user("bob")));
        let selected = state.hangout.clone().unwrap();
        assert_eq!(selected.username, "bob");
        assert_eq!(selected.state, HangoutState::Invite);
        assert_eq!(state.hangouts, Some(vec![selected]));

        let state = reduce(state, hangout_received(hangout("bob", HangoutState::Accepted)));
        assert_eq!(state.hangout.as_ref().unwrap().state, HangoutState::Accepted);
        assert_eq!(state.hangouts().len(), 1);
        assert_eq!(state.hangouts()[0].state, HangoutState::Accepted);
    }

    #[test]
    fn search_then_filter() {
        let state = with_hangouts(vec![
            hangout("alice", HangoutState::Accepted),
            hangout("bob", HangoutState::Accepted),
        ]);
        let state = reduce(state, search_hangouts("al"));
        let state = reduce(state, filter_hangouts());
        assert_eq!(state.hangouts, Some(vec![hangout("alice", HangoutState::Accepted)]));
    }

    #[test]
    fn filter_is_case_sensitive() {
        let state = with_hangouts(vec![hangout("Alice", HangoutState::Accepted)]);
        let state = reduce(reduce(state, search_hangouts("al")), filter_hangouts());
        assert_eq!(state.hangouts, Some(vec![]));
    }

    #[test]
    fn filter_without_hangouts_is_a_no_op() {
        let state = reduce(reduce(HangoutsState::new(), search_hangouts("x")), filter_hangouts());
        assert_eq!(state.hangouts, None);
    }

    #[test]
    fn selecting_unknown_hangout_clears_selection() {
        let state = with_hangouts(vec![hangout("alice", HangoutState::Accepted)]);
        let state = reduce(state, select_hangout("alice"));
        assert!(state.hangout.is_some());
        let state = reduce(state, select_hangout("zed"));
        assert_eq!(state.hangout, None);
    }

    #[test]
    fn fetch_bookkeeping() {
        let state = reduce(HangoutsState::new(), HangoutAction::FetchHangoutStarted);
        assert!(state.loading);

        let state = reduce(
            state,
            HangoutAction::FetchHangoutSuccess {
                hangouts: vec![hangout("carol", HangoutState::Invited)],
            },
        );
        assert!(!state.loading);
        assert_eq!(state.hangouts().len(), 1);

        let state = reduce(state, HangoutAction::FetchHangoutStarted);
        let state = reduce(state, HangoutAction::FetchHangoutNotFound);
        assert!(!state.loading);
        assert_eq!(state.hangouts().len(), 1);

        let error = ApiError::Network("offline".into());
        let state = reduce(state, HangoutAction::FetchUserFailed { error: error.clone() });
        assert_eq!(state.error, Some(error));
    }

    #[test]
    fn user_search_results_are_stored() {
        let state = reduce(HangoutsState::new(), HangoutAction::FetchUserStarted);
        let state = reduce(state, HangoutAction::FetchUserSuccess { users: vec![user("dan")] });
        assert!(!state.loading);
        assert_eq!(state.find_user("dan"), Some(&user("dan")));
        assert_eq!(state.find_user("Dan"), None);
    }

    #[test]
    fn messages_append_and_replace() {
        let first = Message::new("hi", 1, "alice");
        let state = reduce(HangoutsState::new(), save_message_locally(first.clone()));
        assert_eq!(state.messages(), [first.clone()]);

        let second = Message::new("there", 2, "alice");
        let state = reduce(state, save_message_locally(second.clone()));
        assert_eq!(state.messages(), [first, second]);

        let state = reduce(state, loaded_messages(vec![]));
        assert_eq!(state.messages, Some(vec![]));
    }

    #[test]
    fn compose_and_connection_flags() {
        let state = reduce(HangoutsState::new(), change_message_text("draft"));
        assert_eq!(state.message_text, "draft");
        let state = reduce(state, connection_changed(true));
        assert!(state.online);
    }
}
