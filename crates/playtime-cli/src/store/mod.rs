// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! CLI settings store implementation using SQLite.

mod sqlite;

pub use sqlite::SqliteSettingsStore;

use std::path::Path;

/// Opens the settings database under `data_dir`.
///
/// The data directory will be created if it doesn't exist.
pub fn open(data_dir: impl AsRef<Path>) -> anyhow::Result<SqliteSettingsStore> {
    let data_dir = data_dir.as_ref();
    std::fs::create_dir_all(data_dir)?;
    Ok(SqliteSettingsStore::new(data_dir)?)
}
