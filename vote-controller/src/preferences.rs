//! Persisted vote slider preferences.
//!
//! The storage mechanism is external; the controller depends only on the
//! [`PreferenceStore`] port and reads it through the typed
//! [`VotePreferences`] accessor.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Key-value port for UI preferences.
pub trait PreferenceStore: Send + Sync {
    /// Stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<serde_json::Value>;

    /// Store `value` under `key`.
    fn set(&self, key: &str, value: serde_json::Value);
}

/// In-process preference store.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: DashMap<String, serde_json::Value>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.values.get(key).map(|v| v.value().clone())
    }

    fn set(&self, key: &str, value: serde_json::Value) {
        self.values.insert(key.to_string(), value);
    }
}

/// Vote direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    #[default]
    Up,
    Down,
}

impl VoteDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDirection::Up => "up",
            VoteDirection::Down => "down",
        }
    }

    /// Direction of a signed percent; zero counts as up.
    pub fn of_percent(percent: f64) -> Self {
        if percent < 0.0 {
            VoteDirection::Down
        } else {
            VoteDirection::Up
        }
    }
}

impl std::fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed accessor for the last slider value per direction and user.
#[derive(Clone)]
pub struct VotePreferences {
    store: Arc<dyn PreferenceStore>,
}

impl VotePreferences {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Storage key for a direction and user.
    pub fn key(direction: VoteDirection, username: &str) -> String {
        format!("vote-value-{}-{}", direction, username)
    }

    /// Last stored slider value, or `default` if none (or not a number).
    pub fn get_vote_value(&self, direction: VoteDirection, username: &str, default: f64) -> f64 {
        self.store
            .get(&Self::key(direction, username))
            .and_then(|v| v.as_f64())
            .unwrap_or(default)
    }

    /// Remember a slider value.
    pub fn set_vote_value(&self, direction: VoteDirection, username: &str, value: f64) {
        // Non-finite values have no JSON form; keep the previous value.
        if let Some(number) = serde_json::Number::from_f64(value) {
            self.store
                .set(&Self::key(direction, username), serde_json::Value::Number(number));
        }
    }
}
