//! Session values and the contract of the storage behind them.
//!
//! A [`Session`] only holds data, the persistence is left to a [`SessionIo`] implementation
//! handed to [`Session::read`] and [`Session::write`]. Requests share a session through a
//! [`SessionHandle`].

use std::sync::{Arc, Mutex};

use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

use crate::protocol::SessionError;

pub type SessionData = IndexMap<String, Value>;

/// A session shared between a request and whatever persists it.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Storage of session data.
///
/// Concurrent access to the same id is the implementation's concern; the usual discipline is
/// read, mutate, write, with the last writer winning.
#[cfg_attr(test, mockall::automock)]
pub trait SessionIo {
    /// Seconds of inactivity after which a session expires.
    fn timeout(&self) -> u64;

    /// Removes expired sessions, or every session when `force` is set.
    fn clean(&self, force: bool) -> Result<(), SessionError>;

    /// Reads the data of a session, empty for an unknown id.
    fn read(&self, id: &str) -> Result<SessionData, SessionError>;

    fn write(&self, id: &str, data: &SessionData) -> Result<(), SessionError>;
}

/// Key-value data of a session with change tracking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    id: Option<String>,
    data: SessionData,
    is_changed: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_handle(self) -> SessionHandle {
        Arc::new(Mutex::new(self))
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Loads the data of a session, replacing the current data.
    ///
    /// # Errors
    ///
    /// Fails with the error of the storage.
    pub fn read(&mut self, io: &dyn SessionIo, id: &str) -> Result<(), SessionError> {
        self.data = io.read(id)?;
        self.id = Some(id.to_string());
        self.is_changed = false;
        trace!(id, len = self.data.len(), "read session");
        Ok(())
    }

    /// Persists the data under the session id.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingId`] when no id is set, or the error of the storage.
    pub fn write(&mut self, io: &dyn SessionIo) -> Result<(), SessionError> {
        let Some(id) = self.id.as_deref() else {
            return Err(SessionError::MissingId);
        };

        io.write(id, &self.data)?;
        self.is_changed = false;
        trace!(id, len = self.data.len(), "wrote session");
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Reads a value into a typed structure.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Serialization`] when the stored value does not fit `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SessionError> {
        self.data.get(key).map(|value| T::deserialize(value)).transpose().map_err(SessionError::from)
    }

    pub fn get_all(&self) -> &SessionData {
        &self.data
    }

    /// Sets a value, `None` removes the key.
    pub fn set(&mut self, key: impl Into<String>, value: Option<Value>) {
        let key = key.into();
        match value {
            Some(value) => {
                self.data.insert(key, value);
            }
            None => {
                self.data.shift_remove(&key);
            }
        }
        self.is_changed = true;
    }

    /// Stores a typed structure as value.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Serialization`] when the value cannot be serialized.
    pub fn set_as<T: Serialize>(&mut self, key: impl Into<String>, value: &T) -> Result<(), SessionError> {
        let value = serde_json::to_value(value)?;
        self.set(key, Some(value));
        Ok(())
    }

    /// Clears the data; the session only counts as changed when there was data to clear.
    pub fn reset(&mut self) {
        if !self.data.is_empty() {
            self.data.clear();
            self.is_changed = true;
        }
    }

    pub fn is_changed(&self) -> bool {
        self.is_changed
    }
}
