// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

#![warn(missing_docs)]
// Allow large error types - PlaytimeError wraps template errors with full context.
#![allow(clippy::result_large_err)]

//! # Playtime settings core
//!
//! Settings management for the Playtime emulation platform: turning web form
//! submissions into validated settings, and rendering the settings pages.
//!
//! ## Features
//!
//! - Reconciliation of untrusted form fields with defaults and warnings
//! - Template rendering with debug (always fresh) and cached modes
//! - Virtual file tree over the embedded asset bundle, a directory or memory
//! - Localization with positional arguments and language negotiation
//! - Static catalogs of platforms, shaders, ratios and core options
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use playtime::{
//!     Catalog, EmbeddedResolver, LanguageHints, Localization, Reconciler, Renderer,
//!     RendererConfig,
//! };
//!
//! let catalog = Catalog::builtin()?;
//! let fields = [("shader", "bogus"), ("volume", "0.8")];
//! let reconciled = Reconciler::new(&catalog).reconcile_platform("snes", &fields[..])?;
//!
//! let renderer = Renderer::new(
//!     EmbeddedResolver::default(),
//!     RendererConfig::default(),
//!     Arc::new(Localization::builtin()?),
//! );
//! let html = renderer.render(
//!     "settings_platform_restore",
//!     minijinja::context! { platform => catalog.platform("snes") },
//!     &LanguageHints::default(),
//! )?;
//! ```

/// Embedded asset bundle.
pub mod assets;
/// Form body parsing.
pub mod body;
/// Compiled template caching.
pub mod cache;
/// Platform, shader, ratio and core option tables.
pub mod catalog;
/// Template compilation.
pub mod engine;
/// Error types.
pub mod error;
/// Localization tables and language negotiation.
pub mod localization;
/// In-memory resource resolver for tests and tooling.
pub mod memory_resolver;
/// Form fields to settings.
pub mod reconcile;
/// Named template rendering with the standard context.
pub mod render;
/// HTTP request abstraction.
pub mod request;
/// Resource resolution (embedded, filesystem).
pub mod resolver;
/// Settings data model.
pub mod settings;
/// Settings persistence seam.
pub mod store;

pub use cache::{Cache, CompiledTemplate, MemoryCache, NoOpCache};
pub use catalog::{Catalog, Choice, CoreOption, Language, Platform};
pub use engine::TemplateEngine;
pub use error::{PlaytimeError, Result};
pub use localization::{LanguageHints, Localization};
pub use memory_resolver::MemoryResourceResolver;
pub use reconcile::{FieldSource, Reconciled, ReconcileWarning, Reconciler};
pub use render::{Renderer, RendererConfig};
pub use request::PlaytimeRequest;
pub use resolver::{EmbeddedResolver, ResolvedResource, ResourceResolver};
#[cfg(feature = "filesystem")]
pub use resolver::FileSystemResolver;
pub use settings::*;
pub use store::{MemorySettingsStore, SettingsId, SettingsStore, StoreError};

// Re-export the template value type used by render calls
pub use minijinja::{context, Value};
