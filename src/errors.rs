// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for zone synchronization and extraction.
//!
//! This module provides specialized error types for:
//! - Zone document defects (malformed or empty record sets, unreadable files)
//! - Zone lookup failures (no zone for a declared name, near-miss name matches)
//! - Zone service transport failures (HTTP errors, non-2xx API responses)
//!
//! Propagation policy: no retries and no partial application. Any error
//! raised while a changeset is being built aborts the run before anything is
//! submitted; any error during submission is surfaced as-is.

use std::path::PathBuf;
use thiserror::Error;

/// Errors caused by the declarative zone document or its on-disk form.
///
/// These are operator-fixable defects: the document itself (or the way it
/// names its zone) is wrong, so retrying without editing it cannot succeed.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A record set declares neither literal values nor an alias target.
    ///
    /// Such an entry is not actionable: there is nothing to create or upsert.
    /// The whole run aborts rather than skipping the entry.
    #[error("record set '{name}' has neither resource records nor an alias target")]
    EmptyRecordSet {
        /// Name of the offending record set
        name: String,
    },

    /// The zone returned by a name lookup does not exactly match the requested name.
    ///
    /// Name-prefix lookups return the nearest zone when the requested one does
    /// not exist. Accepting it silently would reconcile against the wrong zone,
    /// so a near-miss is a hard error.
    #[error("hosted zone name mismatch: requested '{requested}', service returned '{found}'")]
    ZoneNameMismatch {
        /// The zone name the document declared
        requested: String,
        /// The zone name the service actually returned
        found: String,
    },

    /// The zone document could not be read from disk.
    #[error("failed to read zone document {path}: {source}")]
    DocumentRead {
        /// Path of the document
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The zone document is not valid YAML for the expected shape.
    #[error("failed to parse zone document {path}: {source}")]
    DocumentParse {
        /// Path of the document
        path: PathBuf,
        /// Underlying deserialization error
        source: serde_yaml::Error,
    },

    /// An extracted zone document could not be rendered as YAML.
    #[error("failed to serialize zone document {path}: {source}")]
    DocumentSerialize {
        /// Path of the document
        path: PathBuf,
        /// Underlying serialization error
        source: serde_yaml::Error,
    },

    /// An extracted zone document could not be written to disk.
    #[error("failed to write zone document {path}: {source}")]
    DocumentWrite {
        /// Path of the document
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Errors raised when a declared zone cannot be located at the service.
#[derive(Error, Debug)]
pub enum LookupError {
    /// No hosted zone exists for the declared zone name.
    #[error("no hosted zone found for name '{name}'")]
    ZoneNotFound {
        /// The zone name that was looked up
        name: String,
    },
}

/// Failures from the zone service's transport layer.
///
/// These are propagated, not interpreted: the run reports them and stops.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The HTTP request itself failed (connect, timeout, body read).
    #[error("request to zone service failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The zone service answered with a non-success status.
    #[error("zone service returned HTTP {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or error message
        message: String,
    },
}

/// Composite error type covering one synchronization or extraction run.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Zone document or lookup-safety defect
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Declared zone missing at the service
    #[error(transparent)]
    NotFound(#[from] LookupError),

    /// Zone service transport failure
    #[error(transparent)]
    Transport(#[from] TransportError),
}
