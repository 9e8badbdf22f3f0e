// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Server configuration.
//!
//! Configuration is loaded from `playtime.toml` in the working directory
//! (or the path given with `--config`). Every section is optional.
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! default_user = "local"
//! csrf_secret = "change-me"
//!
//! [templates]
//! root = "templates"
//! extension = "html"
//! debug = false
//! dir = "crates/playtime/assets"
//!
//! [netplay]
//! enabled = true
//!
//! [localization]
//! fallback = "en"
//!
//! [storage]
//! data_dir = ".playtime/data"
//! ```

use playtime::RendererConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const CONFIG_FILE: &str = "playtime.toml";

/// Main configuration structure loaded from `playtime.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP server and session settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Template loading settings.
    #[serde(default)]
    pub templates: TemplatesConfig,
    /// Netplay switch.
    #[serde(default)]
    pub netplay: NetplayConfig,
    /// Localization settings.
    #[serde(default)]
    pub localization: LocalizationConfig,
    /// Persistent storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server host (default: "127.0.0.1").
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port (default: 8080).
    #[serde(default = "default_port")]
    pub port: u16,
    /// User id used when no upstream auth header is present (default: "local").
    #[serde(default = "default_user")]
    pub default_user: String,
    /// Secret mixed into CSRF tokens.
    #[serde(default = "default_csrf_secret")]
    pub csrf_secret: String,
}

/// Template configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesConfig {
    /// Template directory inside the virtual tree (default: "templates").
    #[serde(default = "default_templates_root")]
    pub root: String,
    /// Template file extension (default: "html").
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Recompile templates on every request.
    #[serde(default)]
    pub debug: bool,
    /// Read the tree from this directory instead of the embedded bundle.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Netplay configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetplayConfig {
    /// Whether netplay is offered at all.
    #[serde(default)]
    pub enabled: bool,
}

/// Localization configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalizationConfig {
    /// Language used when a key or a request language is unknown (default: "en").
    #[serde(default = "default_fallback_language")]
    pub fallback: String,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `settings.db` (default: ".playtime/data").
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_user() -> String {
    "local".to_string()
}

fn default_csrf_secret() -> String {
    "change-me".to_string()
}

fn default_templates_root() -> String {
    "templates".to_string()
}

fn default_extension() -> String {
    "html".to_string()
}

fn default_fallback_language() -> String {
    playtime::localization::DEFAULT_FALLBACK_LANGUAGE.to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".playtime/data")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            default_user: default_user(),
            csrf_secret: default_csrf_secret(),
        }
    }
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            root: default_templates_root(),
            extension: default_extension(),
            debug: false,
            dir: None,
        }
    }
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            fallback: default_fallback_language(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Config {
    /// Loads configuration from a specific file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses a configuration document.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Renderer options derived from this configuration.
    pub fn renderer_config(&self) -> RendererConfig {
        RendererConfig {
            root: self.templates.root.clone(),
            extension: self.templates.extension.clone(),
            netplay_enabled: self.netplay.enabled,
            debug: self.templates.debug,
        }
    }

    /// Path of the SQLite settings database.
    pub fn database_path(&self) -> PathBuf {
        self.storage.data_dir.join("settings.db")
    }
}
