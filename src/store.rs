//! Persistent key/value store.
//!
//! All preferences and the game record live in the browser's `localStorage`
//! as plain strings. Components talk to the [`KeyValueStore`] trait so the
//! same logic runs against an in-memory map under host tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{AppError, Result};

pub const KEY_SELECTED_SONG: &str = "selectedSong";
pub const KEY_MUSIC_MUTED: &str = "musicMuted";
pub const KEY_MUSIC_TIME: &str = "musicCurrentTime";
pub const KEY_MUSIC_URL: &str = "musicUrl";
pub const KEY_MUSIC_MINIMIZED: &str = "musicMinimized";
pub const KEY_GAME_STATE: &str = "birthdayGameState";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str);

    fn get_flag(&self, key: &str) -> bool {
        self.get(key).as_deref() == Some("true")
    }

    fn set_flag(&self, key: &str, value: bool) -> Result<()> {
        self.set(key, if value { "true" } else { "false" })
    }
}

pub type SharedStore = Rc<dyn KeyValueStore>;

/// `window.localStorage`. When storage is blocked every read is `None` and
/// writes are dropped with a warning.
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok()).flatten();
        if storage.is_none() {
            log::warn!("localStorage unavailable, preferences will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let storage = self
            .storage
            .as_ref()
            .ok_or(AppError::Unavailable("localStorage"))?;
        storage.set_item(key, value).map_err(|_| AppError::StorageWrite {
            key: key.to_string(),
        })
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.remove_item(key);
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    map: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    pub fn len(&self) -> usize {
        self.map.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.map
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.map.borrow_mut().remove(key);
    }
}

/// Writes a value and logs instead of failing; preference writes are best effort.
pub fn persist(store: &dyn KeyValueStore, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        log::warn!("{e}");
    }
}
