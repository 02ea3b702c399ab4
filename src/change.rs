// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Wire-level record sets and change construction.
//!
//! The types here mirror the zone service's own representation: a
//! [`RecordSet`] is both what the list operation returns (a live record) and
//! what a change carries as its payload. [`build_change`] converts one
//! declared [`RecordSetSpec`] plus a [`ChangeAction`] into a [`Change`],
//! choosing between the literal-value and alias-target representations.

use crate::constants::DEFAULT_RECORD_TTL_SECS;
use crate::document::RecordSetSpec;
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of change applied to one record set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    /// Create a record set that does not exist yet
    Create,
    /// Create or replace a record set with the declared values
    Upsert,
    /// Remove a live record set
    Delete,
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "CREATE"),
            Self::Upsert => write!(f, "UPSERT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A record set in the zone service's wire shape.
///
/// Live records arrive in this shape from the list operation, and change
/// payloads leave in it. An alias record set carries no TTL; a literal one
/// always does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    /// Record set name
    #[serde(rename = "Name")]
    pub name: String,

    /// Record type (A, AAAA, CNAME, MX, TXT, NS, SOA, ...)
    #[serde(rename = "Type")]
    pub record_type: String,

    /// TTL in seconds, present only on literal-value record sets
    #[serde(rename = "TTL", default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,

    /// Alias target, present only on alias record sets
    #[serde(rename = "AliasTarget", default, skip_serializing_if = "Option::is_none")]
    pub alias_target: Option<AliasTarget>,

    /// Literal values, in service order
    #[serde(rename = "ResourceRecords", default, skip_serializing_if = "Vec::is_empty")]
    pub resource_records: Vec<RecordValue>,
}

/// Alias target in the zone service's wire shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasTarget {
    /// Hosted zone id of the target resource
    #[serde(rename = "HostedZoneId")]
    pub hosted_zone_id: String,

    /// DNS name of the target resource
    #[serde(rename = "DNSName")]
    pub dns_name: String,

    /// Whether the service evaluates the target's health
    #[serde(rename = "EvaluateTargetHealth")]
    pub evaluate_target_health: bool,
}

/// One literal record value on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordValue {
    /// The value, verbatim
    #[serde(rename = "Value")]
    pub value: String,
}

/// One change: an action plus the record set it applies to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// What to do
    #[serde(rename = "Action")]
    pub action: ChangeAction,

    /// The record set payload
    #[serde(rename = "ResourceRecordSet")]
    pub record_set: RecordSet,
}

/// Build the wire-level change for one declared record set.
///
/// Literal values take precedence: if the spec declares any
/// `ResourceRecords`, the change carries all of them verbatim plus a TTL
/// (the declared TTL, or [`DEFAULT_RECORD_TTL_SECS`] when absent), and any
/// alias target on the spec is ignored. Only when no literal values are
/// declared does the builder fall through to the alias target, which must
/// have a non-empty DNS name; alias changes carry no TTL.
///
/// Values pass through unmodified. IP syntax, MX priority prefixes, and TXT
/// escaping are not validated here; the service rejects malformed values at
/// submission.
///
/// # Errors
///
/// Returns [`ConfigError::EmptyRecordSet`] when the spec declares neither
/// literal values nor a usable alias target.
pub fn build_change(action: ChangeAction, spec: &RecordSetSpec) -> Result<Change, ConfigError> {
    if !spec.resource_records.is_empty() {
        return Ok(Change {
            action,
            record_set: RecordSet {
                name: spec.name.clone(),
                record_type: spec.record_type.clone(),
                ttl: Some(spec.ttl.unwrap_or(DEFAULT_RECORD_TTL_SECS)),
                alias_target: None,
                resource_records: spec
                    .resource_records
                    .iter()
                    .map(|record| RecordValue {
                        value: record.value.clone(),
                    })
                    .collect(),
            },
        });
    }

    if let Some(alias) = &spec.alias_target {
        if !alias.dns_name.is_empty() {
            return Ok(Change {
                action,
                record_set: RecordSet {
                    name: spec.name.clone(),
                    record_type: spec.record_type.clone(),
                    ttl: None,
                    alias_target: Some(AliasTarget {
                        hosted_zone_id: alias.hosted_zone_id.clone(),
                        dns_name: alias.dns_name.clone(),
                        evaluate_target_health: alias.evaluate_target_health,
                    }),
                    resource_records: Vec::new(),
                },
            });
        }
    }

    Err(ConfigError::EmptyRecordSet {
        name: spec.name.clone(),
    })
}
