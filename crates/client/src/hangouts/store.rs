//! Durable hangouts and message lists, partitioned by username.
//!
//! Keys follow the `{username}-hangouts` / `{username}-messages` convention.
//! Every mutation rewrites the whole collection.

use webcom_shared::{upsert_by_username, Hangout, Message, StorageError};

use crate::storage::{self, KeyValueStore};

pub fn hangouts_key(username: &str) -> String {
    format!("{username}-hangouts")
}

pub fn messages_key(username: &str) -> String {
    format!("{username}-messages")
}

/// Typed access to the hangout collections of a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct HangoutStore<S> {
    store: S,
}

impl<S: KeyValueStore> HangoutStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Hangouts of `username`; `None` if nothing was stored yet.
    pub fn load_hangouts(&self, username: &str) -> Result<Option<Vec<Hangout>>, StorageError> {
        storage::load(&self.store, &hangouts_key(username))
    }

    /// Upsert `hangout` into the stored list of `username`.
    pub fn save_hangouts_upsert(&self, username: &str, hangout: Hangout) -> Result<(), StorageError> {
        let key = hangouts_key(username);
        let current = storage::load(&self.store, &key)?;
        storage::save(&self.store, &key, &upsert_by_username(current, hangout))
    }

    /// Messages stored for the hangout with `hangout_username`.
    pub fn load_messages(&self, hangout_username: &str) -> Result<Option<Vec<Message>>, StorageError> {
        storage::load(&self.store, &messages_key(hangout_username))
    }

    /// Append `message` to the list of `target_username`, tagged with the sender.
    pub fn append_message(
        &self,
        target_username: &str,
        message: Message,
        sender_username: &str,
    ) -> Result<(), StorageError> {
        let key = messages_key(target_username);
        let mut messages: Vec<Message> = storage::load(&self.store, &key)?.unwrap_or_default();
        messages.push(Message {
            username: sender_username.to_string(),
            ..message
        });
        storage::save(&self.store, &key, &messages)
    }
}
