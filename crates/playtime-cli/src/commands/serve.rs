// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Settings server command.
//!
//! Templates come from the embedded bundle unless `[templates] dir` points at
//! a directory on disk. Debug mode recompiles them on every request.

use std::sync::Arc;

use console::style;
use playtime::{
    Catalog, EmbeddedResolver, FileSystemResolver, Localization, Renderer, SettingsStore,
};

use crate::config::Config;
use crate::server::{create_server, AppState};
use crate::store;

/// Command-line overrides for `serve`.
#[derive(Debug, Clone, Default)]
pub struct ServeOptions {
    /// Host to bind to.
    pub host: Option<String>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// Force template debug mode.
    pub debug_templates: bool,
}

impl ServeOptions {
    /// Applies the overrides to a loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.debug_templates {
            config.templates.debug = true;
        }
    }
}

/// Builds the shared state from a configuration and a settings store.
pub fn build_state(config: Config, store: Arc<dyn SettingsStore>) -> anyhow::Result<AppState> {
    let catalog = Arc::new(Catalog::builtin()?);
    let localization = Arc::new(
        Localization::builtin()?.with_fallback(config.localization.fallback.clone()),
    );

    let renderer = match &config.templates.dir {
        Some(dir) => Renderer::new(
            FileSystemResolver::new(dir),
            config.renderer_config(),
            localization,
        ),
        None => Renderer::new(EmbeddedResolver::default(), config.renderer_config(), localization),
    };

    Ok(AppState {
        renderer,
        catalog,
        store,
        config,
    })
}

/// Runs the settings server.
pub async fn run(mut config: Config, options: ServeOptions) -> anyhow::Result<()> {
    options.apply(&mut config);

    println!("{}", style("Starting settings server...").cyan().bold());

    match &config.templates.dir {
        Some(dir) => println!("{} {}", style("Templates from:").dim(), dir.display()),
        None => println!("{} {}", style("Templates from:").dim(), "embedded bundle"),
    }
    if config.templates.debug {
        println!("{}", style("Template debug mode: recompiling on every request").yellow());
    }

    let store = store::open(&config.storage.data_dir)?;
    println!(
        "{} {}",
        style("Settings database:").dim(),
        config.database_path().display()
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(build_state(config, Arc::new(store))?);

    println!();
    println!(
        "{} {}",
        style("Settings server running at").green().bold(),
        style(format!("http://{}/settings", addr)).cyan().underlined()
    );
    println!("{}", style("Press Ctrl+C to stop").dim());

    create_server(&addr, state).await
}
