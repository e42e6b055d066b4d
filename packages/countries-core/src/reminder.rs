//! Reminder records behind a repository port.
//!
//! The HTTP layer only sees [`ReminderRepository`]; [`MemoryReminderRepository`]
//! is the adapter used by the server binary and the tests.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A timestamped free-text reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Reminder {
    /// Repository-assigned identifier
    pub id: u64,
    /// Reminder text
    pub message: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Time of the last update
    pub updated_at: DateTime<Utc>,
}

/// Persistence port for reminders.
///
/// Implementations must be shareable across request tasks.
pub trait ReminderRepository: Send + Sync {
    /// Stores a new reminder and returns it with its assigned id.
    fn create(&self, message: String) -> Result<Reminder, StoreError>;

    /// Fetches a reminder by id.
    fn get(&self, id: u64) -> Result<Reminder, StoreError>;

    /// Returns all reminders ordered by id.
    fn list(&self) -> Result<Vec<Reminder>, StoreError>;

    /// Replaces the message of an existing reminder.
    fn update(&self, id: u64, message: String) -> Result<Reminder, StoreError>;

    /// Removes an existing reminder.
    fn delete(&self, id: u64) -> Result<(), StoreError>;
}

#[derive(Debug)]
struct Reminders {
    next_id: u64,
    by_id: BTreeMap<u64, Reminder>,
}

impl Default for Reminders {
    fn default() -> Self {
        Self {
            next_id: 1,
            by_id: BTreeMap::new(),
        }
    }
}

/// Reminder repository kept in process memory.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug, Default)]
pub struct MemoryReminderRepository {
    inner: RwLock<Reminders>,
}

impl MemoryReminderRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReminderRepository for MemoryReminderRepository {
    fn create(&self, message: String) -> Result<Reminder, StoreError> {
        let now = Utc::now();
        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;
        let reminder = Reminder {
            id,
            message,
            created_at: now,
            updated_at: now,
        };
        inner.by_id.insert(id, reminder.clone());
        Ok(reminder)
    }

    fn get(&self, id: u64) -> Result<Reminder, StoreError> {
        self.inner
            .read()
            .by_id
            .get(&id)
            .cloned()
            .ok_or(StoreError::ReminderNotFound { id })
    }

    fn list(&self) -> Result<Vec<Reminder>, StoreError> {
        Ok(self.inner.read().by_id.values().cloned().collect())
    }

    fn update(&self, id: u64, message: String) -> Result<Reminder, StoreError> {
        let mut inner = self.inner.write();
        let reminder = inner
            .by_id
            .get_mut(&id)
            .ok_or(StoreError::ReminderNotFound { id })?;
        reminder.message = message;
        reminder.updated_at = Utc::now();
        Ok(reminder.clone())
    }

    fn delete(&self, id: u64) -> Result<(), StoreError> {
        self.inner
            .write()
            .by_id
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::ReminderNotFound { id })
    }
}
