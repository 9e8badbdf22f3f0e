// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Template resource resolution over a virtual file tree.
//!
//! This module provides the [`ResourceResolver`] trait and implementations
//! for locating and loading template files.
//!
//! # Resolver Implementations
//!
//! - [`EmbeddedResolver`]: Reads from the asset bundle compiled into the binary
//! - [`FileSystemResolver`]: Reads from a directory on disk (live editing)
//! - [`MemoryResourceResolver`]: Reads from in-memory storage (testing)
//!
//! # Paths
//!
//! Virtual paths always use `/` separators and never start with `/`.
//! `\` separators coming from platform path joins are rewritten, and `.` /
//! `..` segments are folded, so a path can never climb above the tree root.
//!
//! [`MemoryResourceResolver`]: crate::memory_resolver::MemoryResourceResolver

use crate::assets::ASSETS;
use crate::error::{PlaytimeError, Result};
use include_dir::Dir;

#[cfg(feature = "filesystem")]
use std::path::{Path, PathBuf};

/// A resolved template resource with its path and source code.
#[derive(Debug, Clone)]
pub struct ResolvedResource {
    /// The normalized virtual path of the template.
    pub path: String,
    /// The template source code.
    pub source: String,
}

/// Trait for resolving and loading template resources.
///
/// Implement this trait to create custom template loading strategies.
/// Implementations must be thread-safe (`Send + Sync`).
pub trait ResourceResolver: Send + Sync + 'static {
    /// Resolves `relative` against the directory containing `base`.
    ///
    /// Used for `extends`, `include` and `import` inside templates. A
    /// `relative` starting with `/` is taken from the tree root.
    fn join(&self, base: &str, relative: &str) -> String {
        join_paths(base, relative)
    }

    /// Reads the resource at `path`.
    ///
    /// Fails with [`PlaytimeError::TemplateNotFound`] when nothing exists there.
    fn read(&self, path: &str) -> Result<ResolvedResource>;

    /// Creates a boxed clone (for use in closures).
    fn clone_box(&self) -> Box<dyn ResourceResolver>;
}

impl Clone for Box<dyn ResourceResolver> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Folds `.` and `..` segments and rewrites `\` separators.
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let mut components = Vec::new();
    for comp in path.split('/') {
        match comp {
            "" | "." => {}
            ".." => {
                components.pop();
            }
            _ => components.push(comp),
        }
    }
    components.join("/")
}

/// Joins `relative` onto the directory of `base` and normalizes the result.
pub fn join_paths(base: &str, relative: &str) -> String {
    let relative = relative.replace('\\', "/");
    if relative.starts_with('/') {
        return normalize_path(&relative);
    }

    let base = normalize_path(base);
    match base.rfind('/') {
        Some(idx) => normalize_path(&format!("{}/{}", &base[..idx], relative)),
        None => normalize_path(&relative),
    }
}

/// Resolver over an `include_dir` bundle.
///
/// This is the production default: templates ship inside the binary.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedResolver {
    dir: &'static Dir<'static>,
}

impl EmbeddedResolver {
    /// Creates a resolver over the given bundle.
    pub fn new(dir: &'static Dir<'static>) -> Self {
        Self { dir }
    }
}

impl Default for EmbeddedResolver {
    fn default() -> Self {
        Self::new(&ASSETS)
    }
}

impl ResourceResolver for EmbeddedResolver {
    fn read(&self, path: &str) -> Result<ResolvedResource> {
        let path = normalize_path(path);
        let file = self
            .dir
            .get_file(&path)
            .ok_or_else(|| PlaytimeError::TemplateNotFound(path.clone()))?;

        let source = file.contents_utf8().ok_or_else(|| {
            PlaytimeError::Asset(format!("template is not valid UTF-8: {}", path))
        })?;

        tracing::debug!("Resolved embedded template: {}", path);
        Ok(ResolvedResource {
            path,
            source: source.to_string(),
        })
    }

    fn clone_box(&self) -> Box<dyn ResourceResolver> {
        Box::new(*self)
    }
}

/// Filesystem-based resource resolver.
///
/// Virtual paths are taken relative to `root_dir` and cannot escape it.
/// Only available with the `filesystem` feature.
#[cfg(feature = "filesystem")]
#[derive(Debug, Clone)]
pub struct FileSystemResolver {
    /// The root directory of the virtual tree.
    pub root_dir: PathBuf,
}

#[cfg(feature = "filesystem")]
impl FileSystemResolver {
    /// Creates a new filesystem resolver with the given root directory.
    pub fn new<P: AsRef<Path>>(root_dir: P) -> Self {
        Self {
            root_dir: root_dir.as_ref().to_path_buf(),
        }
    }
}

#[cfg(feature = "filesystem")]
impl ResourceResolver for FileSystemResolver {
    fn read(&self, path: &str) -> Result<ResolvedResource> {
        let path = normalize_path(path);
        if path.is_empty() {
            return Err(PlaytimeError::TemplateNotFound(path));
        }

        let full_path = self.root_dir.join(&path);
        if !full_path.is_file() {
            return Err(PlaytimeError::TemplateNotFound(path));
        }

        let source = std::fs::read_to_string(&full_path)?;
        tracing::debug!("Resolved template {} from {}", path, full_path.display());

        Ok(ResolvedResource { path, source })
    }

    fn clone_box(&self) -> Box<dyn ResourceResolver> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("templates/./settings.html"), "templates/settings.html");
        assert_eq!(normalize_path("templates/partials/../base.html"), "templates/base.html");
        assert_eq!(normalize_path("templates\\error.html"), "templates/error.html");
        assert_eq!(normalize_path("../../etc/passwd"), "etc/passwd");
    }

    #[test]
    fn test_join_paths() {
        assert_eq!(join_paths("templates/settings.html", "base.html"), "templates/base.html");
        assert_eq!(
            join_paths("templates/settings.html", "partials/nav.html"),
            "templates/partials/nav.html"
        );
        assert_eq!(
            join_paths("templates/partials/nav.html", "../base.html"),
            "templates/base.html"
        );
        assert_eq!(join_paths("templates/settings.html", "/shared/x.html"), "shared/x.html");
        assert_eq!(join_paths("settings.html", "base.html"), "base.html");
    }

    #[test]
    fn test_embedded_resolver_reads_bundle() {
        let resolver = EmbeddedResolver::default();
        let resource = resolver.read("templates/./base.html").unwrap();
        assert_eq!(resource.path, "templates/base.html");
        assert!(resource.source.contains("<html"));
    }

    #[test]
    fn test_embedded_resolver_not_found() {
        let resolver = EmbeddedResolver::default();
        let err = resolver.read("templates/missing.html").unwrap_err();
        assert!(matches!(err, PlaytimeError::TemplateNotFound(p) if p == "templates/missing.html"));
    }

    #[cfg(feature = "filesystem")]
    #[test]
    fn test_filesystem_resolver() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(temp.path().join("templates")).unwrap();
        std::fs::write(temp.path().join("templates/page.html"), "hello").unwrap();

        let resolver = FileSystemResolver::new(temp.path());
        let resource = resolver.read("templates/page.html").unwrap();
        assert_eq!(resource.source, "hello");
        assert_eq!(resource.path, "templates/page.html");

        assert!(resolver.read("templates/other.html").unwrap_err().is_not_found());
        assert!(resolver.read("templates").unwrap_err().is_not_found());
    }

    #[cfg(feature = "filesystem")]
    #[test]
    fn test_filesystem_resolver_stays_in_root() {
        let outer = tempfile::tempdir().unwrap();
        std::fs::write(outer.path().join("secret.html"), "secret").unwrap();
        let root = outer.path().join("root");
        std::fs::create_dir_all(&root).unwrap();

        let resolver = FileSystemResolver::new(&root);
        assert!(resolver.read("../secret.html").unwrap_err().is_not_found());
    }
}
