// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for live-record extraction.

#[cfg(test)]
mod tests {
    use crate::change::{AliasTarget, ChangeAction, RecordSet, RecordValue};
    use crate::diff::diff;
    use crate::extract::extract;

    fn literal(name: &str, record_type: &str, ttl: Option<i64>, values: &[&str]) -> RecordSet {
        RecordSet {
            name: name.to_string(),
            record_type: record_type.to_string(),
            ttl,
            alias_target: None,
            resource_records: values
                .iter()
                .map(|value| RecordValue {
                    value: (*value).to_string(),
                })
                .collect(),
        }
    }

    fn alias(name: &str, record_type: &str, dns_name: &str) -> RecordSet {
        RecordSet {
            name: name.to_string(),
            record_type: record_type.to_string(),
            ttl: None,
            alias_target: Some(AliasTarget {
                hosted_zone_id: "Z2FDTNDATAQYW2".to_string(),
                dns_name: dns_name.to_string(),
                evaluate_target_health: false,
            }),
            resource_records: vec![],
        }
    }

    #[test]
    fn test_infrastructure_records_are_omitted() {
        let live = vec![
            literal("example.com.", "SOA", Some(900), &["ns1. admin. 1 2 3 4 5"]),
            literal("example.com.", "NS", Some(172_800), &["ns1.example.net."]),
            literal("www.example.com.", "A", Some(300), &["192.0.2.1"]),
        ];

        let document = extract("example.com.", &live);

        assert_eq!(document.name, "example.com.");
        assert_eq!(
            document.record_sets.len(),
            1,
            "SOA and NS are zone infrastructure, not user-declared state"
        );
        assert_eq!(document.record_sets[0].record_type, "A");
    }

    #[test]
    fn test_zone_id_is_left_blank() {
        let document = extract("example.com.", &[]);
        assert!(
            document.zone_id.is_empty(),
            "Synchronize resolves the id by name; extraction does not persist it"
        );
    }

    #[test]
    fn test_fields_carried_only_when_present() {
        let live = vec![
            literal("www.example.com.", "A", Some(300), &["192.0.2.1"]),
            alias("apex.example.com.", "A", "lb.example.net."),
        ];

        let document = extract("example.com.", &live);

        let www = &document.record_sets[0];
        assert_eq!(www.ttl, Some(300));
        assert!(www.alias_target.is_none());
        assert_eq!(www.resource_records[0].value, "192.0.2.1");

        let apex = &document.record_sets[1];
        assert_eq!(apex.ttl, None, "Alias records carry no TTL");
        assert!(apex.resource_records.is_empty());
        let target = apex.alias_target.as_ref().expect("alias carried");
        assert_eq!(target.dns_name, "lb.example.net.");
        assert_eq!(target.hosted_zone_id, "Z2FDTNDATAQYW2");
    }

    #[test]
    fn test_live_listing_order_is_preserved() {
        let live = vec![
            literal("b.example.com.", "A", Some(300), &["192.0.2.2"]),
            literal("a.example.com.", "A", Some(300), &["192.0.2.1"]),
            literal("c.example.com.", "TXT", Some(60), &["\"x\""]),
        ];

        let document = extract("example.com.", &live);

        let names: Vec<&str> = document
            .record_sets
            .iter()
            .map(|record| record.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["b.example.com.", "a.example.com.", "c.example.com."],
            "Output order is the live-listing order, not sorted"
        );
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let live = vec![
            literal("www.example.com.", "A", Some(300), &["192.0.2.1"]),
            alias("apex.example.com.", "A", "lb.example.net."),
            literal("mail.example.com.", "MX", Some(3600), &["10 mx.example.net."]),
        ];

        let first = serde_yaml::to_string(&extract("example.com.", &live)).unwrap();
        let second = serde_yaml::to_string(&extract("example.com.", &live)).unwrap();

        assert_eq!(
            first, second,
            "Extracting an unchanged zone twice must produce byte-identical output"
        );
    }

    #[test]
    fn test_round_trip_asserts_only_identical_values() {
        let live = vec![
            literal("example.com.", "NS", Some(172_800), &["ns1.example.net."]),
            literal("www.example.com.", "A", Some(300), &["192.0.2.1"]),
            alias("apex.example.com.", "A", "lb.example.net."),
            literal("mail.example.com.", "MX", Some(3600), &["10 mx.example.net."]),
        ];

        let document = extract("example.com.", &live);
        let changes = diff(&document, &live).unwrap();

        for change in &changes {
            assert_eq!(
                change.action,
                ChangeAction::Upsert,
                "Round trip may only re-assert values, never create or delete: {change:?}"
            );
            let original = live
                .iter()
                .find(|record| {
                    record.name == change.record_set.name
                        && record.record_type == change.record_set.record_type
                })
                .expect("upsert target exists in live set");
            assert_eq!(
                &change.record_set, original,
                "Re-asserted payload must equal the live record"
            );
        }

        // Supported shapes survive losslessly, so the changeset is empty.
        assert!(changes.is_empty(), "got {changes:?}");
    }
}
