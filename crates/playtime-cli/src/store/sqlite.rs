// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! SQLite-backed settings store implementation.

use playtime::store::StoreResult;
use playtime::{Settings, SettingsId, SettingsStore, StoreError};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

/// SQLite-backed settings store.
///
/// One row per user; the settings document is stored as JSON.
pub struct SqliteSettingsStore {
    conn: Mutex<Connection>,
}

impl SqliteSettingsStore {
    /// Creates a new SQLite-backed settings store.
    ///
    /// The database file is stored at `data_dir/settings.db`.
    pub fn new(data_dir: &Path) -> StoreResult<Self> {
        let conn = Connection::open(data_dir.join("settings.db"))
            .map_err(|e| StoreError::Storage(format!("Failed to open database: {}", e)))?;
        Self::with_connection(conn)
    }

    /// Creates a store backed by a private in-memory database.
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Storage(format!("Failed to open database: {}", e)))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL UNIQUE,
                data TEXT NOT NULL
            )
            "#,
            [],
        )
        .map_err(|e| StoreError::Storage(format!("Failed to create table: {}", e)))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl SettingsStore for SqliteSettingsStore {
    fn get(&self, user_id: &str) -> StoreResult<Settings> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Storage(format!("Lock error: {}", e)))?;

        let data: Option<String> = conn
            .query_row(
                "SELECT data FROM settings WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StoreError::Storage(format!("Query failed: {}", e)))?;

        match data {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Settings::new(user_id)),
        }
    }

    fn save(&self, settings: &Settings) -> StoreResult<SettingsId> {
        let json = serde_json::to_string(settings)?;
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Storage(format!("Lock error: {}", e)))?;

        let id: i64 = conn
            .query_row(
                r#"
                INSERT INTO settings (user_id, data) VALUES (?1, ?2)
                ON CONFLICT(user_id) DO UPDATE SET data = excluded.data
                RETURNING id
                "#,
                params![settings.user_id, json],
                |row| row.get(0),
            )
            .map_err(|e| StoreError::Storage(format!("Failed to save settings: {}", e)))?;

        tracing::debug!(user = %settings.user_id, id, "Saved settings");
        Ok(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playtime::Catalog;
    use tempfile::TempDir;

    fn create_test_store() -> (SqliteSettingsStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = SqliteSettingsStore::new(temp_dir.path()).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_unknown_user_gets_defaults() {
        let (store, _temp) = create_test_store();
        let settings = store.get("alice").unwrap();
        assert_eq!(settings, Settings::new("alice"));
    }

    #[test]
    fn test_save_and_get() {
        let (store, _temp) = create_test_store();
        let catalog = Catalog::builtin().unwrap();

        let mut settings = Settings::new("alice");
        settings.language = "de".to_string();
        settings.default_game_settings.auto_save_interval = 600;
        settings
            .emulator_settings
            .insert("snes".to_string(), catalog.default_emulator_settings("snes").unwrap());

        store.save(&settings).unwrap();
        assert_eq!(store.get("alice").unwrap(), settings);
        assert_eq!(store.get("bob").unwrap(), Settings::new("bob"));
    }

    #[test]
    fn test_save_replaces_and_keeps_id() {
        let (store, _temp) = create_test_store();

        let mut settings = Settings::new("alice");
        let first = store.save(&settings).unwrap();
        settings.language = "de".to_string();
        let second = store.save(&settings).unwrap();

        assert_eq!(first, second);
        assert_eq!(store.get("alice").unwrap().language, "de");

        let other = store.save(&Settings::new("bob")).unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn test_data_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let store = SqliteSettingsStore::new(temp_dir.path()).unwrap();
            let mut settings = Settings::new("alice");
            settings.language = "de".to_string();
            store.save(&settings).unwrap();
        }

        let store = SqliteSettingsStore::new(temp_dir.path()).unwrap();
        assert_eq!(store.get("alice").unwrap().language, "de");
    }

    #[test]
    fn test_corrupt_row_is_a_serialization_error() {
        let store = SqliteSettingsStore::in_memory().unwrap();
        store
            .conn
            .lock()
            .unwrap()
            .execute(
                "INSERT INTO settings (user_id, data) VALUES ('alice', 'not json')",
                [],
            )
            .unwrap();

        assert!(matches!(store.get("alice"), Err(StoreError::Serialization(_))));
    }
}
