//! Wire protocol: HTTP paths and WebSocket frame codec.

use crate::error::DecodeError;
use crate::models::{Hangout, OutboundHangout};

/// HTTP endpoint paths
pub const HANGOUTS_FIND_PATH: &str = "/hangouts/find";
pub const USERS_FIND_PATH: &str = "/users/find";
pub const LOGIN_PATH: &str = "/auth/login";
pub const SIGNUP_PATH: &str = "/auth/signup";

/// Query parameter carrying the username on the socket URL.
pub const WS_USERNAME_PARAM: &str = "username";

/// Decode an inbound WebSocket text frame into a hangout.
///
/// Frames must be a JSON object with a non-empty `username` and a known
/// `state`. Anything else is rejected instead of reaching the store.
pub fn decode_hangout_frame(frame: &str) -> Result<Hangout, DecodeError> {
    let hangout: Hangout = serde_json::from_str(frame)?;
    if hangout.username.trim().is_empty() {
        return Err(DecodeError::MissingUsername);
    }
    Ok(hangout)
}

/// Encode an outbound command frame.
pub fn encode_outbound(frame: &OutboundHangout) -> Result<String, serde_json::Error> {
    serde_json::to_string(frame)
}
