// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Command-line interface and run-mode resolution.
//!
//! The flag surface is deliberately small:
//!
//! - `-c <file>` zone document to synchronize (or to name the zone to extract)
//! - `-b` extraction mode (live zone -> document) instead of synchronization
//! - `-p <dir>` output directory for extracted documents
//! - `-a` extract every hosted zone of the account
//! - `-o` overwrite existing output files
//!
//! The combinations resolve into the closed [`RunMode`] set. An incomplete
//! combination resolves to no mode at all; the caller prints usage and exits
//! cleanly, because no flag may trigger a destructive default.

use clap::Parser;
use std::path::PathBuf;
use url::Url;

/// Synchronize declarative zone documents with a managed DNS service.
#[derive(Parser, Debug)]
#[command(name = "zonesync", version, about)]
pub struct Cli {
    /// Zone document to synchronize, or the zone to extract with -b
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Build zone documents from live zones instead of synchronizing
    #[arg(short = 'b', long = "build")]
    pub build: bool,

    /// Output directory for extracted zone documents
    #[arg(short = 'p', long = "path", value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Extract every hosted zone of the account
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Overwrite existing output files
    #[arg(short = 'o', long = "overwrite")]
    pub overwrite: bool,

    /// Base URL of the zone service API
    #[arg(long, env = "ZONESYNC_ENDPOINT", value_name = "URL")]
    pub endpoint: Url,

    /// Bearer token for the zone service API
    #[arg(
        long,
        env = "ZONESYNC_API_TOKEN",
        value_name = "TOKEN",
        hide_env_values = true
    )]
    pub api_token: Option<String>,
}

/// The closed set of operations one invocation can perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// Reconcile one zone to its document and apply the changeset
    Synchronize {
        /// Path of the zone document
        document: PathBuf,
    },

    /// Extract the single zone named by a document into an output directory
    ExtractZone {
        /// Document naming the zone to extract
        document: PathBuf,
        /// Directory receiving the extracted file
        out_dir: PathBuf,
        /// Replace an existing output file
        overwrite: bool,
    },

    /// Extract every hosted zone of the account into an output directory
    ExtractAll {
        /// Directory receiving the extracted files
        out_dir: PathBuf,
        /// Replace existing output files
        overwrite: bool,
    },
}

impl RunMode {
    /// Resolve the flag combination into a run mode.
    ///
    /// Returns `None` when required flags are missing; the caller treats that
    /// as "print usage and stop", not as an error.
    #[must_use]
    pub fn resolve(cli: &Cli) -> Option<Self> {
        if cli.build {
            let out_dir = cli.path.clone()?;
            if cli.all {
                Some(Self::ExtractAll {
                    out_dir,
                    overwrite: cli.overwrite,
                })
            } else {
                let document = cli.config.clone()?;
                Some(Self::ExtractZone {
                    document,
                    out_dir,
                    overwrite: cli.overwrite,
                })
            }
        } else {
            let document = cli.config.clone()?;
            Some(Self::Synchronize { document })
        }
    }
}
