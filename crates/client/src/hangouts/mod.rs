//! Hangouts client state: reducer, persistence, socket bridge and facade.

pub mod action;
pub mod bridge;
pub mod facade;
pub mod reducer;
pub mod route;
pub mod state;
pub mod store;

pub use action::HangoutAction;
pub use bridge::WsBridge;
pub use facade::{Hangouts, SearchOutcome};
pub use reducer::reduce;
pub use route::Route;
pub use state::HangoutsState;
pub use store::{hangouts_key, messages_key, HangoutStore};
