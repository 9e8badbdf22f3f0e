// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use playtime_cli::commands::{self, serve::ServeOptions};
use playtime_cli::config::{Config, CONFIG_FILE};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "playtime")]
#[command(author = "Maravilla Labs")]
#[command(version)]
#[command(about = "Settings server for the Playtime emulation platform", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the settings pages
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to run the server on
        #[arg(short, long)]
        port: Option<u16>,
        /// Recompile templates on every request
        #[arg(long)]
        debug_templates: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with the specified log level
    let filter = EnvFilter::try_new(&cli.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    let config = Config::load_from(&cli.config)?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            debug_templates,
        } => {
            let options = ServeOptions {
                host,
                port,
                debug_templates,
            };
            commands::serve::run(config, options).await
        }
    }
}
