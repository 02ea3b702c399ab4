// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # Zonesync - Declarative DNS Zone Synchronizer
//!
//! Zonesync reconciles a declared zone document (one YAML file per hosted
//! zone) against the live state of a managed DNS zone, producing and applying
//! a minimal changeset. It also supports the inverse: dumping live zones back
//! into the declarative format.
//!
//! ## Overview
//!
//! A synchronization run loads the document, resolves the hosted zone id by
//! name when the document leaves it blank, fetches every live record set,
//! classifies each record set as unchanged-key (UPSERT), new (CREATE), or
//! undeclared (DELETE), prints the proposed changes, and submits one atomic
//! change batch. NS and SOA records are zone infrastructure and are never
//! deleted. An extraction run walks live zones and writes one document per
//! zone, omitting NS and SOA.
//!
//! ## Modules
//!
//! - [`document`] - Declarative zone document model and YAML file I/O
//! - [`change`] - Wire-level record sets and change construction
//! - [`diff`] - Reconciliation diff between declared and live record sets
//! - [`extract`] - Live records folded back into declarative documents
//! - [`service`] - Zone service trait and JSON-over-HTTP client
//! - [`sync`] - Run orchestration for synchronization and extraction
//! - [`report`] - Human-readable change and receipt summaries
//! - [`cli`] - Command-line flags and run-mode resolution
//! - [`errors`] - Error taxonomy for one run
//!
//! ## Example
//!
//! ```rust
//! use zonesync::change::{ChangeAction, build_change};
//! use zonesync::document::{RecordSetSpec, ResourceRecord};
//!
//! let spec = RecordSetSpec {
//!     name: "www.example.com.".to_string(),
//!     record_type: "A".to_string(),
//!     ttl: Some(300),
//!     alias_target: None,
//!     resource_records: vec![ResourceRecord { value: "192.0.2.1".to_string() }],
//! };
//!
//! let change = build_change(ChangeAction::Create, &spec).unwrap();
//! assert_eq!(change.record_set.ttl, Some(300));
//! ```

pub mod change;
pub mod cli;
pub mod constants;
pub mod diff;
pub mod document;
pub mod errors;
pub mod extract;
pub mod report;
pub mod service;
pub mod sync;

#[cfg(test)]
mod extract_tests;
