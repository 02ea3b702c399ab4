// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Run orchestration: synchronize one zone, or extract one or all zones.
//!
//! Each run is strictly sequential. A synchronization fully fetches the live
//! zone before diffing, reports before submitting, and submits at most one
//! batch. Bulk extraction completes one zone's fetch -> extract -> write
//! cycle before starting the next; no state crosses zone boundaries.

use crate::diff;
use crate::document::{self, WriteOutcome, ZoneDocument};
use crate::errors::SyncError;
use crate::extract;
use crate::report;
use crate::service::ZoneService;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Reconcile one zone to its document and apply the resulting changeset.
///
/// The document's `ZoneID` is resolved from its `Name` when blank. An empty
/// changeset short-circuits before submission: the zone is already a fixed
/// point and there is nothing to apply.
///
/// # Errors
///
/// Any document, lookup, diff, or transport failure aborts the run before
/// submission; a submission failure is surfaced as-is.
pub async fn synchronize_zone<S>(service: &S, document_path: &Path) -> Result<(), SyncError>
where
    S: ZoneService + ?Sized,
{
    let mut zone_document = document::load_document(document_path)?;

    if zone_document.zone_id.is_empty() {
        zone_document.zone_id = service.find_zone_by_name(&zone_document.name).await?;
        info!(
            zone = %zone_document.name,
            zone_id = %zone_document.zone_id,
            "Resolved hosted zone id by name"
        );
    }

    let live = service.list_record_sets(&zone_document.zone_id).await?;
    let changes = diff::diff(&zone_document, &live)?;

    report::print_changes(&zone_document.name, &changes);

    if changes.is_empty() {
        info!(zone = %zone_document.name, "Zone already in sync, nothing to submit");
        return Ok(());
    }

    let receipt = service
        .submit_changes(&zone_document.zone_id, changes)
        .await?;
    report::print_receipt(&receipt);

    Ok(())
}

/// Extract the single zone named by `document_path` into `out_dir`.
///
/// The document only contributes the zone name (and optionally the zone id);
/// the extracted file is rebuilt entirely from the live listing.
///
/// # Errors
///
/// Fails on document, lookup, transport, or file-write errors.
pub async fn extract_zone<S>(
    service: &S,
    document_path: &Path,
    out_dir: &Path,
    overwrite: bool,
) -> Result<(), SyncError>
where
    S: ZoneService + ?Sized,
{
    let declared = document::load_document(document_path)?;

    let zone_id = if declared.zone_id.is_empty() {
        service.find_zone_by_name(&declared.name).await?
    } else {
        declared.zone_id.clone()
    };

    ensure_out_dir(out_dir)?;
    write_extracted_zone(service, &declared.name, &zone_id, out_dir, overwrite).await
}

/// Extract every hosted zone of the account into `out_dir`, one at a time.
///
/// Zones are processed in deterministic (zone-id) order, each one fully
/// fetched, extracted, and written before the next begins.
///
/// # Errors
///
/// Fails on the first lookup, transport, or file-write error; zones already
/// written stay on disk.
pub async fn extract_all_zones<S>(
    service: &S,
    out_dir: &Path,
    overwrite: bool,
) -> Result<(), SyncError>
where
    S: ZoneService + ?Sized,
{
    ensure_out_dir(out_dir)?;

    let zones = service.list_hosted_zones().await?;
    info!(zones = zones.len(), "Extracting all hosted zones");

    for (zone_id, zone) in &zones {
        write_extracted_zone(service, &zone.name, zone_id, out_dir, overwrite).await?;
    }

    Ok(())
}

/// Fetch one zone's records, extract them, and write the document file.
async fn write_extracted_zone<S>(
    service: &S,
    zone_name: &str,
    zone_id: &str,
    out_dir: &Path,
    overwrite: bool,
) -> Result<(), SyncError>
where
    S: ZoneService + ?Sized,
{
    println!("*****************************************");
    println!("Name: {zone_name}");
    println!("*****************************************");

    let live = service.list_record_sets(zone_id).await?;
    let extracted: ZoneDocument = extract::extract(zone_name, &live);

    println!("Records: {}", extracted.record_sets.len());
    match document::write_document(&extracted, out_dir, overwrite)? {
        WriteOutcome::Written(path) => println!("Status: Created file {}", path.display()),
        WriteOutcome::SkippedExisting(path) => {
            println!("Status: Skipped existing file {}", path.display());
        }
    }

    Ok(())
}

/// Create the output directory when it does not exist yet.
fn ensure_out_dir(out_dir: &Path) -> Result<(), SyncError> {
    if !out_dir.exists() {
        warn!(path = %out_dir.display(), "Output directory missing, creating it");
        fs::create_dir_all(out_dir).map_err(|source| {
            crate::errors::ConfigError::DocumentWrite {
                path: out_dir.to_path_buf(),
                source,
            }
        })?;
    }
    Ok(())
}
