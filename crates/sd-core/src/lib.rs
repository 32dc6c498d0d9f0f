//! Core domain records, validation rules, and storage traits for ServiceDesk.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use thiserror::Error;

mod collections;
mod records;

pub use collections::{Collections, DashboardSummary, EntityKind};
pub use records::{
    CalendarEvent, Choice, Client, ClientDraft, ClientStatus, EventDraft, EventTime, Job, JobDraft,
    JobStatus, LocationDraft, MapLocation, Quote, QuoteDraft, QuoteStatus, Record, RecordId,
    Service, ServiceDraft, SettingsDraft, Theme, UserSettings, DEFAULT_PROFILE_PICTURE,
};

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors returned by core validation and storage.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Returned when a required field is missing or malformed.
    #[error("validation error: {0}")]
    Validation(String),
    /// Returned when the record store cannot be read or written.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Storage keys, one per persisted collection plus the settings record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StoreKey {
    Clients,
    Jobs,
    Quotes,
    Services,
    CalendarEvents,
    MapLocations,
    UserSettings,
}

impl StoreKey {
    /// Every key, in persistence order.
    pub const ALL: [StoreKey; 7] = [
        StoreKey::Clients,
        StoreKey::Jobs,
        StoreKey::Quotes,
        StoreKey::Services,
        StoreKey::CalendarEvents,
        StoreKey::MapLocations,
        StoreKey::UserSettings,
    ];

    /// The key name used in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::Clients => "clients",
            StoreKey::Jobs => "jobs",
            StoreKey::Quotes => "quotes",
            StoreKey::Services => "services",
            StoreKey::CalendarEvents => "calendarEvents",
            StoreKey::MapLocations => "mapLocations",
            StoreKey::UserSettings => "userSettings",
        }
    }
}

/// Key-value storage holding one serialized document per key.
pub trait RecordStore {
    /// Fetch the raw document for a key, `None` when the key was never written.
    fn read(&self, key: StoreKey) -> CoreResult<Option<String>>;
    /// Replace the raw document for a key.
    fn write(&self, key: StoreKey, contents: &str) -> CoreResult<()>;
}

/// Load the value stored under `key`, falling back to `default` when the key is
/// absent, unreadable, or does not parse. Failures are logged, never returned.
pub fn load<S, T>(store: &S, key: StoreKey, default: T) -> T
where
    S: RecordStore + ?Sized,
    T: DeserializeOwned,
{
    let contents = match store.read(key) {
        Ok(Some(contents)) => contents,
        Ok(None) => return default,
        Err(err) => {
            tracing::warn!(key = key.as_str(), error = %err, "failed to read stored data, using defaults");
            return default;
        }
    };
    match serde_json::from_str(&contents) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key = key.as_str(), error = %err, "failed to parse stored data, using defaults");
            default
        }
    }
}

/// In-memory record store. Counts writes so callers can check persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RefCell<BTreeMap<StoreKey, String>>,
    writes: Cell<usize>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful writes since creation.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Raw document currently stored under a key.
    pub fn contents(&self, key: StoreKey) -> Option<String> {
        self.documents.borrow().get(&key).cloned()
    }

    /// Store a raw document without counting it as a write.
    pub fn insert_raw(&self, key: StoreKey, contents: impl Into<String>) {
        self.documents.borrow_mut().insert(key, contents.into());
    }

    /// Make every subsequent write fail with a storage error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl RecordStore for MemoryStore {
    fn read(&self, key: StoreKey) -> CoreResult<Option<String>> {
        Ok(self.documents.borrow().get(&key).cloned())
    }

    fn write(&self, key: StoreKey, contents: &str) -> CoreResult<()> {
        if self.fail_writes.get() {
            return Err(CoreError::Storage(format!(
                "quota exceeded writing {}",
                key.as_str()
            )));
        }
        self.documents.borrow_mut().insert(key, contents.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
