// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! In-memory settings store for testing.

use super::{SettingsId, SettingsStore, StoreError, StoreResult};
use crate::settings::Settings;
use std::collections::BTreeMap;
use std::sync::RwLock;

struct StoredSettings {
    id: SettingsId,
    settings: Settings,
}

/// In-memory settings store.
///
/// Data is lost when the process exits.
pub struct MemorySettingsStore {
    data: RwLock<BTreeMap<String, StoredSettings>>,
}

impl MemorySettingsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of users with stored settings.
    pub fn len(&self) -> usize {
        self.data.read().map(|data| data.len()).unwrap_or(0)
    }

    /// Returns true if nothing has been saved yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, user_id: &str) -> StoreResult<Settings> {
        let data = self.data.read().map_err(|e| StoreError::Storage(e.to_string()))?;

        Ok(data
            .get(user_id)
            .map(|stored| stored.settings.clone())
            .unwrap_or_else(|| Settings::new(user_id)))
    }

    fn save(&self, settings: &Settings) -> StoreResult<SettingsId> {
        let mut data = self.data.write().map_err(|e| StoreError::Storage(e.to_string()))?;
        let next_id = format!("settings-{}", data.len() + 1);

        let stored = data
            .entry(settings.user_id.clone())
            .or_insert_with(|| StoredSettings {
                id: next_id,
                settings: settings.clone(),
            });
        stored.settings = settings.clone();
        Ok(stored.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_unknown_user_returns_defaults() {
        let store = MemorySettingsStore::new();
        let settings = store.get("nobody").unwrap();
        assert_eq!(settings, Settings::new("nobody"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_then_get() {
        let store = MemorySettingsStore::new();
        let mut settings = Settings::new("alice");
        settings.language = "de".to_string();

        let id = store.save(&settings).unwrap();
        assert_eq!(store.get("alice").unwrap().language, "de");

        settings.language = "en".to_string();
        let second = store.save(&settings).unwrap();
        assert_eq!(id, second);
        assert_eq!(store.get("alice").unwrap().language, "en");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_ids_are_per_user() {
        let store = MemorySettingsStore::new();
        let a = store.save(&Settings::new("a")).unwrap();
        let b = store.save(&Settings::new("b")).unwrap();
        assert_ne!(a, b);
    }
}
