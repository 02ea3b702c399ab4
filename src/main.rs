// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::{debug, info};
use zonesync::cli::{Cli, RunMode};
use zonesync::constants::TOKIO_WORKER_THREADS;
use zonesync::service::HttpZoneService;
use zonesync::sync;

fn main() -> Result<()> {
    // Build Tokio runtime with custom thread names
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(TOKIO_WORKER_THREADS)
        .thread_name("zonesync")
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    // Initialize logging.
    //
    // Respects RUST_LOG environment variable if set, otherwise defaults to INFO level
    // Example: RUST_LOG=debug zonesync -c zone.yaml
    //
    // Respects RUST_LOG_FORMAT environment variable for output format
    // Example: RUST_LOG_FORMAT=json zonesync -c zone.yaml
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }

    let cli = Cli::parse();

    let Some(mode) = RunMode::resolve(&cli) else {
        // An incomplete flag combination is a no-op, not a failure: print
        // usage and stop without touching any zone.
        Cli::command().print_help()?;
        return Ok(());
    };

    debug!(?mode, "Resolved run mode");

    let service = HttpZoneService::new(&cli.endpoint, cli.api_token.clone())?;

    match mode {
        RunMode::Synchronize { document } => {
            info!(document = %document.display(), "Synchronizing zone from document");
            sync::synchronize_zone(&service, &document).await?;
        }
        RunMode::ExtractZone {
            document,
            out_dir,
            overwrite,
        } => {
            info!(
                document = %document.display(),
                out_dir = %out_dir.display(),
                "Extracting one zone to document"
            );
            sync::extract_zone(&service, &document, &out_dir, overwrite).await?;
        }
        RunMode::ExtractAll { out_dir, overwrite } => {
            info!(out_dir = %out_dir.display(), "Extracting all hosted zones");
            sync::extract_all_zones(&service, &out_dir, overwrite).await?;
        }
    }

    Ok(())
}
