// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Reconciliation diff between a declared zone document and live records.
//!
//! The declared document is authoritative. Classification is by the
//! (name, type) identity key:
//!
//! - declared and live, payloads identical -> unchanged, nothing emitted
//! - declared and live, payloads differ -> UPSERT with the declared values
//!   (the live record's current values never enter the payload)
//! - declared only -> CREATE with the declared values
//! - live only -> DELETE carrying the live record, except NS and SOA, which
//!   are zone infrastructure and survive reconciliation
//!
//! Suppressing identical payloads makes reconciliation a fixed point:
//! applying the changeset and diffing again yields an empty changeset.
//!
//! Both collections are indexed up front, so classification is linear and
//! at most one change is emitted per key even when the document repeats one
//! (first occurrence wins, later duplicates are silently absorbed).
//!
//! Result order is deterministic for reporting: UPSERTs in declared order,
//! then DELETEs in live-listing order, then CREATEs in declared order.

use crate::change::{build_change, Change, ChangeAction, RecordSet};
use crate::constants::is_protected_type;
use crate::document::ZoneDocument;
use crate::errors::ConfigError;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Identity of a record set within one zone.
///
/// (Name, Type) is unique per zone; routing policies that let several record
/// sets share a key are not supported.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordKey {
    /// Record set name
    pub name: String,
    /// Record type
    pub record_type: String,
}

impl RecordKey {
    #[must_use]
    pub fn new(name: &str, record_type: &str) -> Self {
        Self {
            name: name.to_string(),
            record_type: record_type.to_string(),
        }
    }
}

/// Compute the changeset that reconciles `live` to `declared`.
///
/// An empty document against a populated zone legitimately yields an
/// all-DELETE changeset (minus NS/SOA); an empty zone against a populated
/// document yields an all-CREATE changeset.
///
/// # Errors
///
/// Returns [`ConfigError::EmptyRecordSet`] if any declared record set is not
/// actionable. The whole diff fails; partial changesets are never returned.
pub fn diff(declared: &ZoneDocument, live: &[RecordSet]) -> Result<Vec<Change>, ConfigError> {
    let live_index: HashMap<RecordKey, &RecordSet> = live
        .iter()
        .map(|record| (RecordKey::new(&record.name, &record.record_type), record))
        .collect();

    let mut declared_keys: HashSet<RecordKey> = HashSet::with_capacity(declared.record_sets.len());
    let mut upserts = Vec::new();
    let mut creates = Vec::new();

    for spec in &declared.record_sets {
        let key = RecordKey::new(&spec.name, &spec.record_type);
        if !declared_keys.insert(key.clone()) {
            debug!(
                name = %spec.name,
                record_type = %spec.record_type,
                "Duplicate declared record set, keeping first occurrence"
            );
            continue;
        }

        match live_index.get(&key) {
            Some(live_record) => {
                // Building the change also validates the spec, so a malformed
                // entry aborts the diff even when it would be unchanged.
                let change = build_change(ChangeAction::Upsert, spec)?;
                if change.record_set == **live_record {
                    debug!(
                        name = %spec.name,
                        record_type = %spec.record_type,
                        "Record set unchanged"
                    );
                } else {
                    upserts.push(change);
                }
            }
            None => creates.push(build_change(ChangeAction::Create, spec)?),
        }
    }

    let mut deletes = Vec::new();
    for record in live {
        if is_protected_type(&record.record_type) {
            continue;
        }
        let key = RecordKey::new(&record.name, &record.record_type);
        if declared_keys.contains(&key) {
            continue;
        }
        deletes.push(Change {
            action: ChangeAction::Delete,
            record_set: record.clone(),
        });
    }

    debug!(
        upserts = upserts.len(),
        deletes = deletes.len(),
        creates = creates.len(),
        zone = %declared.name,
        "Computed changeset"
    );

    let mut changes = upserts;
    changes.append(&mut deletes);
    changes.append(&mut creates);
    Ok(changes)
}
