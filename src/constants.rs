// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the zonesync CLI.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// DNS Protocol Constants
// ============================================================================

/// Default TTL applied to literal-value changes when the document declares none (5 minutes)
pub const DEFAULT_RECORD_TTL_SECS: i64 = 300;

/// Record types that are zone infrastructure rather than user-managed data.
///
/// These survive reconciliation (never emitted as DELETE targets) and are
/// omitted from extracted documents.
pub const PROTECTED_RECORD_TYPES: [&str; 2] = ["NS", "SOA"];

/// Returns true if `record_type` is zone infrastructure (NS or SOA).
#[must_use]
pub fn is_protected_type(record_type: &str) -> bool {
    PROTECTED_RECORD_TYPES.contains(&record_type)
}

// ============================================================================
// Zone Service Constants
// ============================================================================

/// Maximum record sets requested per list page
pub const RECORD_SET_PAGE_SIZE: u32 = 100;

/// Maximum hosted zones requested per list page
pub const HOSTED_ZONE_PAGE_SIZE: u32 = 100;

/// Path prefix some service responses carry on hosted zone ids
pub const HOSTED_ZONE_ID_PREFIX: &str = "/hostedzone/";

/// Comment attached to every submitted change batch
pub const CHANGE_BATCH_COMMENT: &str = "Zone Changes";

// ============================================================================
// Document Constants
// ============================================================================

/// File extension for written zone documents
pub const DOCUMENT_FILE_SUFFIX: &str = ".yaml";

// ============================================================================
// Runtime Constants
// ============================================================================

/// Number of worker threads for Tokio runtime
pub const TOKIO_WORKER_THREADS: usize = 4;
