// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! Playtime settings server.
//!
//! This crate serves the Playtime settings pages over HTTP: an overview,
//! general game defaults, per-platform emulator settings and restoring a
//! platform to its defaults.
//!
//! # Usage
//!
//! This crate is primarily used through the `playtime` binary:
//!
//! ```bash
//! playtime serve                       # Serve on 127.0.0.1:8080
//! playtime serve --debug-templates     # Recompile templates per request
//! playtime --config prod.toml serve    # Use another configuration file
//! ```
//!
//! # Configuration
//!
//! The server is configured via `playtime.toml` in the working directory.

/// CLI commands.
pub mod commands;
/// Server configuration from `playtime.toml`.
pub mod config;
/// HTTP routes, sessions and error pages.
pub mod server;
/// Settings store with SQLite backend.
pub mod store;
