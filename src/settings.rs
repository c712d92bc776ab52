//! Runtime settings.
//!
//! A flat table of entries, each with a JSON default and an optional
//! handler.  At start-up every entry is resolved (persisted value first,
//! default otherwise) and its handler turned into commands.

use lazy_static::lazy_static;
use serde_json::{json, Value};

use crate::constants::SETTINGS_KEY_PREFIX;
use crate::messages::Command;
use crate::storage::{load_json, save_json, KeyValueStore};

/// Maps a resolved value to the side effects it needs.
pub type SettingHandler = fn(&Value) -> Vec<Command>;

pub struct SettingEntry {
    pub key: &'static str,
    pub default_value: Value,
    pub handler: Option<SettingHandler>,
}

lazy_static! {
    pub static ref DEFAULT_SETTINGS: Vec<SettingEntry> = vec![
        SettingEntry {
            key: "zmq_url",
            default_value: json!({
                "url": "tcp://127.0.0.1:5556",
                "subscription": "",
                "status": "configured",
            }),
            handler: Some(apply_zmq_settings),
        },
        SettingEntry {
            key: "preferences",
            default_value: json!({ "theme": "light" }),
            handler: None,
        },
    ];
}

fn storage_key(key: &str) -> String {
    format!("{}{}", SETTINGS_KEY_PREFIX, key)
}

/// Push the live-feed endpoint to the host.  Empty strings mean "not set".
fn apply_zmq_settings(value: &Value) -> Vec<Command> {
    let mut commands = Vec::new();
    if let Some(url) = value.get("url").and_then(Value::as_str).filter(|s| !s.is_empty()) {
        commands.push(Command::SetZmqUrl(url.to_string()));
    }
    if let Some(sub) = value
        .get("subscription")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
    {
        commands.push(Command::SetZmqSubscription(sub.to_string()));
    }
    commands
}

/// Persisted value of `entry`, or its default.
pub fn resolve(store: &dyn KeyValueStore, entry: &SettingEntry) -> Value {
    load_json(store, &storage_key(entry.key)).unwrap_or_else(|| entry.default_value.clone())
}

pub fn read_setting(store: &dyn KeyValueStore, key: &str) -> Option<Value> {
    DEFAULT_SETTINGS
        .iter()
        .find(|entry| entry.key == key)
        .map(|entry| resolve(store, entry))
}

/// Store a new value and return the handler's commands for it.  Unknown
/// keys are rejected.
pub fn write_setting(store: &dyn KeyValueStore, key: &str, value: &Value) -> Result<Vec<Command>, String> {
    let entry = DEFAULT_SETTINGS
        .iter()
        .find(|entry| entry.key == key)
        .ok_or_else(|| format!("unknown setting '{}'", key))?;
    save_json(store, &storage_key(key), value).map_err(|e| e.to_string())?;
    Ok(entry.handler.map(|h| h(value)).unwrap_or_default())
}

/// Resolve every entry once and collect the commands of their handlers.
pub fn initialize(store: &dyn KeyValueStore) -> Vec<Command> {
    let mut commands = Vec::new();
    for entry in DEFAULT_SETTINGS.iter() {
        let value = resolve(store, entry);
        if let Some(handler) = entry.handler {
            commands.extend(handler(&value));
        }
    }
    log_info!("[settings] {} entries initialized", DEFAULT_SETTINGS.len());
    commands
}
