// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Asset bundle compiled into the binary.
//!
//! Layout:
//!
//! ```text
//! catalog.json
//! localization/{code}.json
//! templates/{name}.html
//! ```

use crate::error::{PlaytimeError, Result};
use include_dir::{include_dir, Dir};

/// The embedded asset tree.
pub static ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// Reads a UTF-8 asset from the bundle.
pub fn asset_text(path: &str) -> Result<&'static str> {
    let file = ASSETS
        .get_file(path)
        .ok_or_else(|| PlaytimeError::Asset(format!("missing bundled asset: {}", path)))?;

    file.contents_utf8()
        .ok_or_else(|| PlaytimeError::Asset(format!("bundled asset is not UTF-8: {}", path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_contains_catalog_and_templates() {
        assert!(asset_text("catalog.json").unwrap().contains("\"shaders\""));
        assert!(ASSETS.get_file("templates/error.html").is_some());
        assert!(asset_text("localization/en.json").is_ok());
    }

    #[test]
    fn test_missing_asset() {
        let err = asset_text("nope.txt").unwrap_err();
        assert!(matches!(err, PlaytimeError::Asset(_)));
    }
}
