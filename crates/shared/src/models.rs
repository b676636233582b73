//! Shared data models for the webcom hangouts protocol.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

// --- Hangouts ---

/// Relationship status of a hangout.
///
/// Doubles as the routing key for the view that renders the hangout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HangoutState {
    Invite,
    Invited,
    Inviter,
    Accepted,
    Accepter,
    Messanger,
    Messaged,
    Block,
    Blocked,
}

impl HangoutState {
    pub const ALL: [HangoutState; 9] = [
        HangoutState::Invite,
        HangoutState::Invited,
        HangoutState::Inviter,
        HangoutState::Accepted,
        HangoutState::Accepter,
        HangoutState::Messanger,
        HangoutState::Messaged,
        HangoutState::Block,
        HangoutState::Blocked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HangoutState::Invite => "INVITE",
            HangoutState::Invited => "INVITED",
            HangoutState::Inviter => "INVITER",
            HangoutState::Accepted => "ACCEPTED",
            HangoutState::Accepter => "ACCEPTER",
            HangoutState::Messanger => "MESSANGER",
            HangoutState::Messaged => "MESSAGED",
            HangoutState::Block => "BLOCK",
            HangoutState::Blocked => "BLOCKED",
        }
    }
}

impl fmt::Display for HangoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for HangoutState {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HangoutState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| DecodeError::UnknownState(s.to_string()))
    }
}

/// The last message carried on a hangout event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HangoutMessage {
    pub text: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
}

/// A conversation record keyed by the other party's username.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hangout {
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub state: HangoutState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<HangoutMessage>,
    /// Written as `"pending"` when a command is sent; nothing reads it back.
    #[serde(
        default,
        rename = "devivered",
        skip_serializing_if = "Option::is_none"
    )]
    pub delivery: Option<String>,
    /// Server fields this client does not model, kept for round trips.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Hangout {
    pub fn new(username: impl Into<String>, email: impl Into<String>, state: HangoutState) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            state,
            message: None,
            delivery: None,
            extra: serde_json::Map::new(),
        }
    }

    /// A fresh hangout for a user picked from search results.
    pub fn invite(user: &User) -> Self {
        Self::new(user.username.clone(), user.email.clone(), HangoutState::Invite)
    }
}

/// Insert `hangout` into `list`, replacing any entry with the same username.
///
/// A replaced entry keeps its position; a new username is appended.
pub fn upsert_by_username(list: Option<Vec<Hangout>>, hangout: Hangout) -> Vec<Hangout> {
    let mut list = list.unwrap_or_default();
    match list.iter().position(|h| h.username == hangout.username) {
        Some(idx) => list[idx] = hangout,
        None => list.push(hangout),
    }
    list
}

// --- Messages ---

/// A locally stored chat message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub text: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
    /// Partition tag: the sender the message was stored for.
    #[serde(default)]
    pub username: String,
}

impl Message {
    pub fn new(text: impl Into<String>, timestamp: i64, username: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp,
            username: username.into(),
        }
    }
}

// --- Users ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub email: String,
}

// --- Commands ---

/// Intent sent to the server alongside a hangout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HangoutCommand {
    Invite,
    Accept,
    Decline,
    Block,
    Unblock,
    Message,
}

impl HangoutCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            HangoutCommand::Invite => "INVITE",
            HangoutCommand::Accept => "ACCEPT",
            HangoutCommand::Decline => "DECLINE",
            HangoutCommand::Block => "BLOCK",
            HangoutCommand::Unblock => "UNBLOCK",
            HangoutCommand::Message => "MESSAGE",
        }
    }
}

impl fmt::Display for HangoutCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for HangoutCommand {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INVITE" => Ok(HangoutCommand::Invite),
            "ACCEPT" => Ok(HangoutCommand::Accept),
            "DECLINE" => Ok(HangoutCommand::Decline),
            "BLOCK" => Ok(HangoutCommand::Block),
            "UNBLOCK" => Ok(HangoutCommand::Unblock),
            "MESSAGE" => Ok(HangoutCommand::Message),
            _ => Err(DecodeError::UnknownCommand(s.to_string())),
        }
    }
}

/// Outbound WebSocket frame for acting on a hangout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutboundHangout {
    pub username: String,
    pub email: String,
    pub message: Option<HangoutMessage>,
    pub command: HangoutCommand,
}

// --- Request/Response Types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HangoutsResponse {
    #[serde(default)]
    pub hangouts: Vec<Hangout>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Session returned by login and signup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hangout(username: &str, state: HangoutState) -> Hangout {
        Hangout::new(username, format!("{username}@example.com"), state)
    }

    #[test]
    fn upsert_into_empty_list_creates_it() {
        let result = upsert_by_username(None, hangout("bob", HangoutState::Invite));
        assert_eq!(result, vec![hangout("bob", HangoutState::Invite)]);

        let result = upsert_by_username(Some(vec![]), hangout("bob", HangoutState::Invite));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let list = vec![
            hangout("alice", HangoutState::Accepted),
            hangout("bob", HangoutState::Invite),
            hangout("carol", HangoutState::Blocked),
        ];
        let result = upsert_by_username(Some(list), hangout("bob", HangoutState::Accepted));

        let names: Vec<_> = result.iter().map(|h| h.username.as_str()).collect();
        assert_eq!(names, ["alice", "bob", "carol"]);
        assert_eq!(result[1].state, HangoutState::Accepted);
    }

    #[test]
    fn upsert_appends_new_username() {
        let list = vec![hangout("alice", HangoutState::Accepted)];
        let result = upsert_by_username(Some(list), hangout("Alice", HangoutState::Invited));
        assert_eq!(result.len(), 2);
        assert_eq!(result[1].username, "Alice");
    }

    #[test]
    fn hangout_state_uses_wire_names() {
        let json = serde_json::to_string(&HangoutState::Messanger).unwrap();
        assert_eq!(json, "\"MESSANGER\"");
        for state in HangoutState::ALL {
            assert_eq!(state.as_str().parse::<HangoutState>().unwrap(), state);
        }
        assert!("accepted".parse::<HangoutState>().is_err());
    }

    #[test]
    fn delivery_marker_uses_legacy_field_name() {
        let mut h = hangout("bob", HangoutState::Invite);
        h.delivery = Some("pending".into());
        let value = serde_json::to_value(&h).unwrap();
        assert_eq!(value["devivered"], "pending");
        assert!(value.get("message").is_none());
    }

    #[test]
    fn unknown_fields_survive_round_trip() {
        let raw = r#"{"username":"bob","email":"b@x","state":"INVITED","avatar":"b.png"}"#;
        let h: Hangout = serde_json::from_str(raw).unwrap();
        assert_eq!(h.extra["avatar"], "b.png");
        let back = serde_json::to_value(&h).unwrap();
        assert_eq!(back["avatar"], "b.png");
    }

    #[test]
    fn command_parses_case_insensitively() {
        assert_eq!("accept".parse::<HangoutCommand>().unwrap(), HangoutCommand::Accept);
        assert_eq!(" BLOCK ".parse::<HangoutCommand>().unwrap(), HangoutCommand::Block);
        assert!("wave".parse::<HangoutCommand>().is_err());
    }
}
