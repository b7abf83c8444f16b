use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::convert::Infallible;
use core::fmt::Debug;
use serde::{Serialize, de::DeserializeOwned};

/// String key-value slot storage supplied by the host (browser localStorage, files, memory).
pub trait KeyValueStore {
    type Error: Debug;

    fn read(&self, key: &str) -> Option<String>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// Fixed storage key of a persisted value.
pub trait StorageKey {
    const KEY: &'static str;
}

/// JSON persistence for anything with a storage key. Failures never propagate:
/// unreadable values fall back to the default and failed writes are only logged.
pub trait Persist: StorageKey + Serialize + DeserializeOwned + Default {
    fn load_or_default<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let Some(raw) = store.read(Self::KEY) else {
            log::debug!("nothing stored under {}", Self::KEY);
            return Self::default();
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("ignoring corrupt value under {}: {}", Self::KEY, err);
                Self::default()
            }
        }
    }

    fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        let raw = match serde_json::to_string(self) {
            Ok(raw) => raw,
            Err(err) => {
                log::error!("failed to encode {}: {}", Self::KEY, err);
                return;
            }
        };
        if let Err(err) = store.write(Self::KEY, &raw) {
            log::warn!("failed to save {}: {:?}", Self::KEY, err);
        }
    }
}

impl<T: StorageKey + Serialize + DeserializeOwned + Default> Persist for T {}

/// In-memory store, for tests and hosts without durable storage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
