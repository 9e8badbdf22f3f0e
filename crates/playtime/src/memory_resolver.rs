// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use crate::error::{PlaytimeError, Result};
use crate::resolver::{normalize_path, ResolvedResource, ResourceResolver};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Memory-based resource resolver that stores templates in memory.
///
/// Clones share the same storage, so a test can keep a handle and edit
/// templates after handing the resolver to an engine.
#[derive(Clone, Default)]
pub struct MemoryResourceResolver {
    templates: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryResourceResolver {
    /// Create a new memory resource resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a template
    pub fn add_template(&self, path: &str, content: impl Into<String>) {
        if let Ok(mut templates) = self.templates.write() {
            templates.insert(normalize_path(path), content.into());
        }
    }

    /// Remove a template
    pub fn remove_template(&self, path: &str) {
        if let Ok(mut templates) = self.templates.write() {
            templates.remove(&normalize_path(path));
        }
    }

    /// Clear all templates
    pub fn clear(&self) {
        if let Ok(mut templates) = self.templates.write() {
            templates.clear();
        }
    }
}

impl ResourceResolver for MemoryResourceResolver {
    fn read(&self, path: &str) -> Result<ResolvedResource> {
        let path = normalize_path(path);
        let templates = self
            .templates
            .read()
            .map_err(|e| PlaytimeError::CacheError(e.to_string()))?;

        match templates.get(&path) {
            Some(source) => Ok(ResolvedResource {
                source: source.clone(),
                path,
            }),
            None => Err(PlaytimeError::TemplateNotFound(path)),
        }
    }

    fn clone_box(&self) -> Box<dyn ResourceResolver> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_read_remove() {
        let resolver = MemoryResourceResolver::new();
        resolver.add_template("templates/a.html", "A");

        let resource = resolver.read("templates/sub/../a.html").unwrap();
        assert_eq!(resource.path, "templates/a.html");
        assert_eq!(resource.source, "A");

        resolver.remove_template("templates/a.html");
        assert!(resolver.read("templates/a.html").unwrap_err().is_not_found());
    }

    #[test]
    fn test_clones_share_storage() {
        let resolver = MemoryResourceResolver::new();
        let boxed = resolver.clone_box();
        resolver.add_template("x.html", "one");
        assert_eq!(boxed.read("x.html").unwrap().source, "one");

        resolver.add_template("x.html", "two");
        assert_eq!(boxed.read("x.html").unwrap().source, "two");

        resolver.clear();
        assert!(boxed.read("x.html").is_err());
    }

    #[test]
    fn test_join_uses_importer_directory() {
        let resolver = MemoryResourceResolver::new();
        assert_eq!(resolver.join("templates/page.html", "base.html"), "templates/base.html");
    }
}
