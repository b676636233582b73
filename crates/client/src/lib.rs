//! Webcom Client - hangouts messaging client
//!
//! Headless client state for webcom hangouts: a reducer over typed
//! actions, durable per-user collections behind a key-value store, a
//! WebSocket bridge and the facade a view layer drives.

pub mod logging;

pub mod api_client;
pub mod auth_session;
pub mod commands;
pub mod config;
pub mod hangouts;
pub mod storage;
pub mod ws;

pub use api_client::{ApiClient, HangoutsApi};
pub use auth_session::AuthSession;
pub use config::ClientConfig;
pub use hangouts::{HangoutAction, Hangouts, HangoutsState, Route};
pub use storage::{KeyValueStore, MemoryStore};
