// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Template compilation on top of a resolver and a cache.
//!
//! The [`TemplateEngine`] turns a virtual path into a [`CompiledTemplate`]:
//!
//! 1. Ask the [`Cache`] for the path
//! 2. On a miss, read the source through the [`ResourceResolver`]
//! 3. Build a template environment whose loader and path joining go back to
//!    the same resolver, so `{% extends "base.html" %}` works relative to the
//!    importing template
//! 4. Store the result in the cache
//!
//! # Examples
//!
//! ```rust,ignore
//! use playtime::{EmbeddedResolver, TemplateEngine};
//!
//! let engine = TemplateEngine::with_memory_cache(EmbeddedResolver::default());
//! let template = engine.compile_entry("templates/settings.html")?;
//! let html = template.render(minijinja::context! { platforms => vec!["nes"] })?;
//! ```

use crate::cache::{Cache, CompiledTemplate, MemoryCache, NoOpCache};
use crate::error::{PlaytimeError, Result};
use crate::resolver::{normalize_path, ResourceResolver};
use minijinja::{Environment, ErrorKind};
use std::borrow::Cow;
use std::sync::Arc;

/// Resolves, compiles and caches templates.
pub struct TemplateEngine {
    resolver: Box<dyn ResourceResolver>,
    cache: Box<dyn Cache>,
}

impl TemplateEngine {
    /// Creates an engine with an explicit cache strategy.
    pub fn new<R: ResourceResolver>(resolver: R, cache: Box<dyn Cache>) -> Self {
        Self {
            resolver: Box::new(resolver),
            cache,
        }
    }

    /// Cached mode: every path is compiled once and kept.
    pub fn with_memory_cache<R: ResourceResolver>(resolver: R) -> Self {
        Self::new(resolver, Box::new(MemoryCache::new()))
    }

    /// Debug mode: every call resolves and compiles again.
    pub fn without_cache<R: ResourceResolver>(resolver: R) -> Self {
        Self::new(resolver, Box::new(NoOpCache::new()))
    }

    /// Picks debug or cached mode.
    pub fn for_mode<R: ResourceResolver>(resolver: R, debug: bool) -> Self {
        if debug {
            Self::without_cache(resolver)
        } else {
            Self::with_memory_cache(resolver)
        }
    }

    /// The resolver templates are read from.
    pub fn resolver(&self) -> &dyn ResourceResolver {
        self.resolver.as_ref()
    }

    /// Compiles the template at `entry`, consulting the cache first.
    ///
    /// # Errors
    ///
    /// - [`PlaytimeError::TemplateNotFound`] when the path does not exist
    /// - [`PlaytimeError::Template`] on syntax errors in the entry template
    pub fn compile_entry(&self, entry: &str) -> Result<Arc<CompiledTemplate>> {
        let path = normalize_path(entry);

        if let Some(template) = self.cache.get(&path)? {
            tracing::debug!("Template cache hit: {}", path);
            return Ok(template);
        }

        let resolved = self.resolver.read(&path)?;
        tracing::debug!("Compiling template: {}", resolved.path);

        let mut env = Environment::new();

        let join_resolver = self.resolver.clone_box();
        env.set_path_join_callback(move |name, parent| {
            Cow::Owned(join_resolver.join(parent, name))
        });

        let loader_resolver = self.resolver.clone_box();
        env.set_loader(move |name| match loader_resolver.read(name) {
            Ok(resource) => Ok(Some(resource.source)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(minijinja::Error::new(
                ErrorKind::InvalidOperation,
                format!("failed to load template {}", name),
            )
            .with_source(e)),
        });

        env.add_template_owned(resolved.path.clone(), resolved.source.clone())?;

        let template = Arc::new(CompiledTemplate::new(resolved.path.clone(), env));
        self.cache.set(&path, Arc::clone(&template))?;

        Ok(template)
    }

    /// Compiles (or fetches) and executes a template.
    pub fn render(&self, entry: &str, context: minijinja::Value) -> Result<String> {
        self.compile_entry(entry)?.render(context)
    }

    /// Returns true if a compiled template for `path` is cached.
    pub fn cache_contains(&self, path: &str) -> bool {
        self.cache.contains_key(&normalize_path(path))
    }

    /// Drops all compiled templates.
    pub fn clear_cache(&self) -> Result<()> {
        self.cache.clear()
    }
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
