// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Declarative zone document model and YAML file I/O.
//!
//! A zone document is one YAML file describing the desired record sets of a
//! single hosted zone. The document is the authoritative side of a
//! synchronization run: its values are what the zone ends up with.
//!
//! # Document shape
//!
//! ```yaml
//! Name: example.com.
//! ZoneID: Z0123456789
//! ResourceRecordSets:
//!   - Name: www.example.com.
//!     Type: A
//!     TTL: 300
//!     ResourceRecords:
//!       - Value: 192.0.2.1
//!   - Name: apex.example.com.
//!     Type: A
//!     AliasTarget:
//!       HostedZoneID: Z2FDTNDATAQYW2
//!       DNSName: d111111abcdef8.cloudfront.example.
//!       EvaluateTargetHealth: false
//! ```
//!
//! `ZoneID` may be omitted; synchronization resolves it from `Name` at the
//! service. A record set must carry either `ResourceRecords` or an
//! `AliasTarget` to be actionable.

use crate::constants::DOCUMENT_FILE_SUFFIX;
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Desired state of one hosted zone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDocument {
    /// Fully qualified zone name, with trailing dot (e.g. `example.com.`)
    #[serde(rename = "Name")]
    pub name: String,

    /// Opaque hosted zone id. Empty means "resolve by name at the service".
    #[serde(rename = "ZoneID", default, skip_serializing_if = "String::is_empty")]
    pub zone_id: String,

    /// Desired record sets, in document order.
    #[serde(rename = "ResourceRecordSets", default)]
    pub record_sets: Vec<RecordSetSpec>,
}

/// One declared record set.
///
/// Exactly one of `resource_records` (non-empty) or `alias_target` must be
/// present for the entry to be actionable; the change builder rejects entries
/// with neither. When both are present the literal values win.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSetSpec {
    /// Record set name (e.g. `www.example.com.`)
    #[serde(rename = "Name")]
    pub name: String,

    /// Record type (A, AAAA, CNAME, MX, TXT, ...)
    #[serde(rename = "Type")]
    pub record_type: String,

    /// TTL in seconds. Omitted for alias record sets.
    #[serde(rename = "TTL", default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,

    /// Alias pointing at another service-hosted resource.
    #[serde(rename = "AliasTarget", default, skip_serializing_if = "Option::is_none")]
    pub alias_target: Option<AliasSpec>,

    /// Literal record values, in document order.
    #[serde(rename = "ResourceRecords", default, skip_serializing_if = "Vec::is_empty")]
    pub resource_records: Vec<ResourceRecord>,
}

/// Alias target of a declared record set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasSpec {
    /// Hosted zone id of the alias target
    #[serde(rename = "HostedZoneID")]
    pub hosted_zone_id: String,

    /// DNS name of the alias target
    #[serde(rename = "DNSName")]
    pub dns_name: String,

    /// Whether the service should evaluate the target's health
    #[serde(rename = "EvaluateTargetHealth")]
    pub evaluate_target_health: bool,
}

/// One literal record value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// The value, passed through verbatim (no syntax validation)
    #[serde(rename = "Value")]
    pub value: String,
}

/// Load a zone document from a YAML file.
///
/// # Errors
///
/// Returns [`ConfigError::DocumentRead`] if the file cannot be read and
/// [`ConfigError::DocumentParse`] if it is not a valid zone document.
pub fn load_document(path: &Path) -> Result<ZoneDocument, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::DocumentRead {
        path: path.to_path_buf(),
        source,
    })?;

    let document =
        serde_yaml::from_str(&content).map_err(|source| ConfigError::DocumentParse {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), "Loaded zone document");
    Ok(document)
}

/// File name for a zone's written document: trailing dot stripped, `.yaml` suffix.
#[must_use]
pub fn document_file_name(zone_name: &str) -> String {
    format!(
        "{}{}",
        zone_name.trim_end_matches('.'),
        DOCUMENT_FILE_SUFFIX
    )
}

/// Outcome of writing one extracted zone document.
#[derive(Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The document was written to this path
    Written(PathBuf),
    /// The path already existed and overwrite was not set
    SkippedExisting(PathBuf),
}

/// Write a zone document into `out_dir`, named after the zone.
///
/// Existing files are skipped with a warning unless `overwrite` is set, so a
/// bulk extraction cannot silently clobber hand-edited documents.
///
/// # Errors
///
/// Returns [`ConfigError::DocumentWrite`] if serialization or the write fails.
pub fn write_document(
    document: &ZoneDocument,
    out_dir: &Path,
    overwrite: bool,
) -> Result<WriteOutcome, ConfigError> {
    let path = out_dir.join(document_file_name(&document.name));

    if path.exists() && !overwrite {
        warn!(
            path = %path.display(),
            zone = %document.name,
            "Output file exists and overwrite is not set, skipping"
        );
        return Ok(WriteOutcome::SkippedExisting(path));
    }

    let yaml = serde_yaml::to_string(document).map_err(|source| {
        ConfigError::DocumentSerialize {
            path: path.clone(),
            source,
        }
    })?;

    fs::write(&path, yaml).map_err(|source| ConfigError::DocumentWrite {
        path: path.clone(),
        source,
    })?;

    debug!(path = %path.display(), zone = %document.name, "Wrote zone document");
    Ok(WriteOutcome::Written(path))
}
