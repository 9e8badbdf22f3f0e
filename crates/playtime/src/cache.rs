// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Compiled template caching.
//!
//! The cache implementation is what separates the two renderer modes:
//!
//! - [`MemoryCache`]: compile once per resolved path and keep it for the
//!   lifetime of the process (cached mode). Later edits to the source are not
//!   picked up.
//! - [`NoOpCache`]: never store anything, so every render resolves and
//!   compiles again (debug mode).
//!
//! # Custom Caches
//!
//! Implement the [`Cache`] trait to create custom caching strategies.

use crate::error::{PlaytimeError, Result};
use minijinja::Environment;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A compiled template.
///
/// Owns a template environment whose loader reaches back into the virtual
/// file tree for `extends`/`include` targets. Templates loaded that way are
/// kept by the environment, so a cached entry freezes its whole layout chain.
#[derive(Debug)]
pub struct CompiledTemplate {
    /// The resolved path of the entry template.
    pub path: String,
    env: Environment<'static>,
}

impl CompiledTemplate {
    /// Wraps an environment in which `path` has already been added.
    pub fn new(path: String, env: Environment<'static>) -> Self {
        Self { path, env }
    }

    /// Executes the template against a context.
    pub fn render(&self, context: minijinja::Value) -> Result<String> {
        let template = self.env.get_template(&self.path)?;
        Ok(template.render(context)?)
    }
}

/// Trait for compiled template caches.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait Cache: Send + Sync + std::fmt::Debug {
    /// Retrieves a template from the cache.
    fn get(&self, key: &str) -> Result<Option<Arc<CompiledTemplate>>>;
    /// Stores a template in the cache.
    fn set(&self, key: &str, template: Arc<CompiledTemplate>) -> Result<()>;
    /// Removes a template from the cache.
    fn remove(&self, key: &str) -> Result<()>;
    /// Clears all cached templates.
    fn clear(&self) -> Result<()>;
    /// Checks if a key exists in the cache.
    fn contains_key(&self, key: &str) -> bool;
    /// Creates a boxed clone (for use in closures).
    fn clone_box(&self) -> Box<dyn Cache>;
}

impl Clone for Box<dyn Cache> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Unbounded in-memory cache keyed by resolved template path.
///
/// Entries are never evicted. Two requests racing on the first compilation
/// of the same path may both compile; the later insert wins.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    cache: Arc<RwLock<HashMap<String, Arc<CompiledTemplate>>>>,
}

impl MemoryCache {
    /// Creates an empty memory cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_error() -> PlaytimeError {
        PlaytimeError::CacheError("Failed to acquire cache lock".to_string())
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Arc<CompiledTemplate>>> {
        let cache = self.cache.read().map_err(|_| Self::lock_error())?;
        Ok(cache.get(key).cloned())
    }

    fn set(&self, key: &str, template: Arc<CompiledTemplate>) -> Result<()> {
        let mut cache = self.cache.write().map_err(|_| Self::lock_error())?;
        cache.insert(key.to_string(), template);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut cache = self.cache.write().map_err(|_| Self::lock_error())?;
        cache.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut cache = self.cache.write().map_err(|_| Self::lock_error())?;
        cache.clear();
        Ok(())
    }

    fn contains_key(&self, key: &str) -> bool {
        self.cache
            .read()
            .map(|cache| cache.contains_key(key))
            .unwrap_or(false)
    }

    fn clone_box(&self) -> Box<dyn Cache> {
        Box::new(self.clone())
    }
}

/// No-op cache that never stores or retrieves anything.
///
/// Used in debug mode where templates are always compiled fresh.
#[derive(Debug, Clone, Default)]
pub struct NoOpCache;

impl NoOpCache {
    /// Creates a new no-op cache.
    pub fn new() -> Self {
        Self
    }
}

impl Cache for NoOpCache {
    fn get(&self, _key: &str) -> Result<Option<Arc<CompiledTemplate>>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _template: Arc<CompiledTemplate>) -> Result<()> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        Ok(())
    }

    fn contains_key(&self, _key: &str) -> bool {
        false
    }

    fn clone_box(&self) -> Box<dyn Cache> {
        Box::new(NoOpCache)
    }
}
