// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Inverse of the change builder: live records back into declarative form.
//!
//! Extraction folds a zone's live record sets into a [`ZoneDocument`] that,
//! synchronized back against the same zone, asserts exactly the values the
//! zone already holds. NS and SOA records are zone infrastructure, not
//! user-declared state, and are omitted.
//!
//! Extraction is non-destructive and repeatable: the same live listing
//! always produces the same document, in the live-listing's order.

use crate::change::RecordSet;
use crate::constants::is_protected_type;
use crate::document::{AliasSpec, RecordSetSpec, ResourceRecord, ZoneDocument};
use tracing::debug;

/// Build a declarative document from a zone's live record sets.
///
/// TTL, alias target, and literal values are carried only when present on
/// the live record. `ZoneID` is left blank; synchronization resolves it from
/// the zone name.
#[must_use]
pub fn extract(zone_name: &str, live: &[RecordSet]) -> ZoneDocument {
    let mut document = ZoneDocument {
        name: zone_name.to_string(),
        zone_id: String::new(),
        record_sets: Vec::new(),
    };

    for record in live {
        if is_protected_type(&record.record_type) {
            continue;
        }

        document.record_sets.push(RecordSetSpec {
            name: record.name.clone(),
            record_type: record.record_type.clone(),
            ttl: record.ttl,
            alias_target: record.alias_target.as_ref().map(|alias| AliasSpec {
                hosted_zone_id: alias.hosted_zone_id.clone(),
                dns_name: alias.dns_name.clone(),
                evaluate_target_health: alias.evaluate_target_health,
            }),
            resource_records: record
                .resource_records
                .iter()
                .map(|value| ResourceRecord {
                    value: value.value.clone(),
                })
                .collect(),
        });
    }

    debug!(
        zone = %zone_name,
        live = live.len(),
        extracted = document.record_sets.len(),
        "Extracted zone document"
    );

    document
}
