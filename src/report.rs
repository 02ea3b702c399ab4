// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Human-readable summaries of proposed changes and submission receipts.
//!
//! The report is product output, printed to stdout before submission so the
//! operator sees exactly what is about to change. Logs go through `tracing`;
//! these tables do not.

use crate::change::Change;
use crate::service::ChangeReceipt;
use std::fmt::Write as _;

const BANNER: &str = "*********************************************";

/// Render the pending-changes table for one zone.
///
/// One row per change, `ACTION / NAME / TYPE`, with column widths computed
/// from the content.
#[must_use]
pub fn render_changes(zone_name: &str, changes: &[Change]) -> String {
    let action_width = changes
        .iter()
        .map(|change| change.action.to_string().len())
        .chain(["ACTION".len()])
        .max()
        .unwrap_or(0);
    let name_width = changes
        .iter()
        .map(|change| change.record_set.name.len())
        .chain(["NAME".len()])
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "{BANNER}");
    let _ = writeln!(out, "Proposed Changes for Zone {zone_name}:");
    let _ = writeln!(out, "{BANNER}");
    let _ = writeln!(
        out,
        "{:<action_width$}  {:<name_width$}  TYPE",
        "ACTION", "NAME"
    );

    for change in changes {
        let _ = writeln!(
            out,
            "{:<action_width$}  {:<name_width$}  {}",
            change.action.to_string(),
            change.record_set.name,
            change.record_set.record_type
        );
    }

    out
}

/// Print the pending-changes table to stdout.
pub fn print_changes(zone_name: &str, changes: &[Change]) {
    println!("{}", render_changes(zone_name, changes));
}

/// Render the submission receipt summary.
#[must_use]
pub fn render_receipt(receipt: &ChangeReceipt) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Changes Submitted:");
    if let Some(comment) = &receipt.comment {
        let _ = writeln!(out, "Comment:      {comment}");
    }
    let _ = writeln!(out, "ID:           {}", receipt.id);
    let _ = writeln!(out, "Status:       {}", receipt.status);
    let _ = writeln!(out, "Submitted At: {}", receipt.submitted_at);
    out
}

/// Print the submission receipt summary to stdout.
pub fn print_receipt(receipt: &ChangeReceipt) {
    println!("{}", render_receipt(receipt));
}
