// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Error types for the Playtime settings core.
//!
//! This module defines [`PlaytimeError`], the main error enum shared by the
//! reconciliation engine, the template renderer and the asset loaders.
//!
//! # Error Categories
//!
//! - **Parse errors**: a submitted numeric field could not be read
//! - **Not found**: unknown platform or template path
//! - **Template errors**: compile or execution failures inside a template
//! - **Invalid input**: the renderer was handed a non-mapping payload
//! - **Store errors**: persistence failures, passed through unchanged
//! - **Asset errors**: the embedded catalog or localization tables are broken

use crate::store::StoreError;
use thiserror::Error;

/// The main error type for Playtime operations.
#[derive(Error, Debug)]
pub enum PlaytimeError {
    /// A submitted field holds a value that cannot be used.
    #[error("Invalid value {value:?} for field '{field}': {reason}")]
    Parse {
        /// Form key of the offending field.
        field: String,
        /// The raw submitted value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The platform identifier is not part of the catalog.
    #[error("Platform not found: {0}")]
    PlatformNotFound(String),

    /// No resource exists at the given path in the virtual file tree.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Template compilation or execution failed.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// The caller handed the renderer something other than a mapping.
    #[error("Invalid render input: {0}")]
    InvalidInput(String),

    /// The settings store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bundled asset (catalog, localization table) could not be loaded.
    #[error("Asset error: {0}")]
    Asset(String),

    /// Cache operation failed.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PlaytimeError {
    /// Builds a [`PlaytimeError::Parse`] for a field.
    pub fn parse(field: &str, value: &str, reason: impl ToString) -> Self {
        Self::Parse {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Returns true for errors caused by a missing platform or template.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::PlatformNotFound(_) | Self::TemplateNotFound(_) => true,
            Self::Template(e) => e.kind() == minijinja::ErrorKind::TemplateNotFound,
            _ => false,
        }
    }
}

/// Convenience type alias for Results with [`PlaytimeError`].
pub type Result<T> = std::result::Result<T, PlaytimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = PlaytimeError::parse("auto-save-interval", "five", "invalid digit found in string");
        assert_eq!(
            err.to_string(),
            "Invalid value \"five\" for field 'auto-save-interval': invalid digit found in string"
        );
    }

    #[test]
    fn test_not_found_classification() {
        assert!(PlaytimeError::PlatformNotFound("n64".into()).is_not_found());
        assert!(PlaytimeError::TemplateNotFound("templates/x.html".into()).is_not_found());
        assert!(!PlaytimeError::InvalidInput("list".into()).is_not_found());

        let missing = minijinja::Error::new(minijinja::ErrorKind::TemplateNotFound, "gone");
        assert!(PlaytimeError::from(missing).is_not_found());
    }
}
