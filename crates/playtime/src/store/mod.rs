// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Settings persistence seam.
//!
//! The core never persists anything on its own. Handlers load a user's
//! [`Settings`] through a [`SettingsStore`], hand it to the reconciliation
//! engine, and save the result back.
//!
//! # Implementations
//!
//! - **Library**: [`MemorySettingsStore`], for tests and embedding
//! - **CLI**: SQLite-backed persistent storage

mod memory;

pub use memory::MemorySettingsStore;

use crate::settings::Settings;
use thiserror::Error;

/// Identifier returned by [`SettingsStore::save`].
pub type SettingsId = String;

/// Errors raised by settings stores.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Settings could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Per-user settings persistence.
///
/// Concurrent saves for the same user are not coordinated; the last write wins.
pub trait SettingsStore: Send + Sync {
    /// Loads the settings of a user.
    ///
    /// Users without stored settings receive [`Settings::new`] defaults.
    fn get(&self, user_id: &str) -> StoreResult<Settings>;

    /// Stores the settings, replacing any previous record of the same user.
    fn save(&self, settings: &Settings) -> StoreResult<SettingsId>;
}
