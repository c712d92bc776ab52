//! Persistence of UI state across restarts.
//!
//! Everything is stored as JSON strings under fixed keys.  A value that no
//! longer parses (older schema, manual edits) is treated as absent and
//! logged, never surfaced as an error.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::constants::{KEY_CURRENT_PROJECT, KEY_RECENT_PROJECTS};
use crate::layout::{PersistedSidebar, SidebarId};
use crate::models::Project;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("storage rejected {key}: {message}")]
    Rejected { key: String, message: String },
    #[error("cannot encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Minimal string key/value store.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// The browser's `window.localStorage`.
pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    pub fn open() -> Result<Self, StoreError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StoreError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Rejected {
                key: key.to_string(),
                message: format!("{:?}", e),
            })
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StoreError::Rejected {
                key: key.to_string(),
                message: format!("{:?}", e),
            })
    }
}

/// Process-lifetime store, used when local storage is blocked.
#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

thread_local! {
    static ACTIVE_STORE: RefCell<Option<Rc<dyn KeyValueStore>>> = RefCell::new(None);
}

/// The store used by the running app: local storage when reachable,
/// otherwise an in-memory fallback.
pub fn active_store() -> Rc<dyn KeyValueStore> {
    ACTIVE_STORE.with(|slot| {
        let mut slot = mut_borrow!(slot);
        if let Some(store) = slot.as_ref() {
            return Rc::clone(store);
        }
        let store: Rc<dyn KeyValueStore> = match LocalStore::open() {
            Ok(local) => Rc::new(local),
            Err(e) => {
                log_warn!("[storage] {}, falling back to memory", e);
                Rc::new(MemoryStore::default())
            }
        };
        *slot = Some(Rc::clone(&store));
        store
    })
}

pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get_item(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log_warn!("[storage] ignoring unreadable {}: {}", key, e);
            None
        }
    }
}

pub fn save_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)?;
    store.set_item(key, &raw)
}

// ---------------- Projects ----------------

pub fn load_current_project(store: &dyn KeyValueStore) -> Option<Project> {
    load_json(store, KEY_CURRENT_PROJECT)
}

pub fn load_recent_projects(store: &dyn KeyValueStore) -> Vec<Project> {
    load_json(store, KEY_RECENT_PROJECTS).unwrap_or_default()
}

/// Write the current project (or remove it) and the recent list.
pub fn save_projects(
    store: &dyn KeyValueStore,
    current: Option<&Project>,
    recent: &[Project],
) -> Result<(), StoreError> {
    match current {
        Some(project) => save_json(store, KEY_CURRENT_PROJECT, project)?,
        None => store.remove_item(KEY_CURRENT_PROJECT)?,
    }
    save_json(store, KEY_RECENT_PROJECTS, recent)
}

// ---------------- Layout ----------------

pub fn load_sidebar(store: &dyn KeyValueStore, sidebar: SidebarId) -> Option<PersistedSidebar> {
    load_json(store, sidebar.config().name)
}

pub fn save_sidebar(
    store: &dyn KeyValueStore,
    sidebar: SidebarId,
    saved: &PersistedSidebar,
) -> Result<(), StoreError> {
    save_json(store, sidebar.config().name, saved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projects_round_trip_through_the_store() {
        let store = MemoryStore::default();
        let north = Project::new("North", "/data/north", Some("/data/north/cfg.toml".into()));

        save_projects(&store, Some(&north), &[north.clone()]).unwrap();

        assert_eq!(load_current_project(&store), Some(north.clone()));
        assert_eq!(load_recent_projects(&store), vec![north]);
    }

    #[test]
    fn closing_removes_the_current_entry() {
        let store = MemoryStore::default();
        let north = Project::new("North", "/data/north", None);
        save_projects(&store, Some(&north), &[]).unwrap();

        save_projects(&store, None, &[north]).unwrap();

        assert!(load_current_project(&store).is_none());
        assert_eq!(load_recent_projects(&store).len(), 1);
    }

    #[test]
    fn corrupt_entries_read_as_absent() {
        let store = MemoryStore::default();
        store.set_item(KEY_CURRENT_PROJECT, "{not json").unwrap();
        store.set_item(KEY_RECENT_PROJECTS, "[{\"name\": 3}]").unwrap();

        assert!(load_current_project(&store).is_none());
        assert!(load_recent_projects(&store).is_empty());
    }

    #[test]
    fn stored_projects_use_camel_case_keys() {
        let store = MemoryStore::default();
        let p = Project::new("A", "/a", Some("/a/c.toml".into()));
        save_projects(&store, Some(&p), &[]).unwrap();

        let raw = store.get_item(KEY_CURRENT_PROJECT).unwrap();
        assert!(raw.contains("\"configPath\""));
        assert!(raw.contains("\"lastAccessed\""));
    }

    #[test]
    fn sidebars_are_keyed_by_area_name() {
        let store = MemoryStore::default();
        let saved = PersistedSidebar {
            is_open: true,
            active_item_id: "metadata".into(),
            size: 18.0,
        };

        save_sidebar(&store, SidebarId::RightSidebar, &saved).unwrap();

        assert!(store.get_item("right-sidebar-store").is_some());
        assert_eq!(load_sidebar(&store, SidebarId::RightSidebar), Some(saved));
        assert_eq!(load_sidebar(&store, SidebarId::LeftSidebar), None);
    }
}
