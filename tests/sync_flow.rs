// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! End-to-end flows: synchronize a document against a mock zone service,
//! and extract live zones into document files.

use serde_json::json;
use std::fs;
use url::Url;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zonesync::service::HttpZoneService;
use zonesync::sync::{extract_all_zones, extract_zone, synchronize_zone};

fn client(server: &MockServer) -> HttpZoneService {
    let endpoint = Url::parse(&server.uri()).expect("mock server uri parses");
    HttpZoneService::new(&endpoint, None).expect("client builds")
}

fn write_zone_document(dir: &std::path::Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("zone.yaml");
    fs::write(&path, content).expect("document written");
    path
}

const RECEIPT: &str = r#"{"ChangeInfo": {"Id": "C1", "Status": "PENDING",
    "Comment": "Zone Changes", "SubmittedAt": "2025-06-01T12:00:00Z"}}"#;

#[tokio::test]
async fn test_synchronize_resolves_zone_id_and_submits_one_batch() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let document = write_zone_document(
        dir.path(),
        "Name: example.com.\nResourceRecordSets:\n  - Name: a.example.com.\n    Type: A\n    ResourceRecords:\n      - Value: 1.2.3.4\n",
    );

    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(query_param("name", "example.com."))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "HostedZones": [{"Id": "/hostedzone/Z123", "Name": "example.com."}],
            "IsTruncated": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/zones/Z123/rrsets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResourceRecordSets": [],
            "IsTruncated": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    // The new record goes out as a CREATE with the default TTL.
    Mock::given(method("POST"))
        .and(path("/zones/Z123/rrsets/changes"))
        .and(body_partial_json(json!({
            "ChangeBatch": {
                "Changes": [
                    {"Action": "CREATE",
                     "ResourceRecordSet": {"Name": "a.example.com.", "Type": "A", "TTL": 300,
                                            "ResourceRecords": [{"Value": "1.2.3.4"}]}}
                ]
            }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(RECEIPT.as_bytes().to_vec(), "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = client(&server);
    synchronize_zone(&service, &document).await.unwrap();
}

#[tokio::test]
async fn test_in_sync_zone_submits_nothing() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let document = write_zone_document(
        dir.path(),
        "Name: example.com.\nZoneID: Z123\nResourceRecordSets:\n  - Name: a.example.com.\n    Type: A\n    TTL: 300\n    ResourceRecords:\n      - Value: 1.2.3.4\n",
    );

    Mock::given(method("GET"))
        .and(path("/zones/Z123/rrsets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResourceRecordSets": [
                {"Name": "a.example.com.", "Type": "A", "TTL": 300,
                 "ResourceRecords": [{"Value": "1.2.3.4"}]},
                {"Name": "example.com.", "Type": "NS", "TTL": 172800,
                 "ResourceRecords": [{"Value": "ns1.example.net."}]}
            ],
            "IsTruncated": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    // No POST mock mounted: any submission attempt would 404 and fail the run.
    let service = client(&server);
    synchronize_zone(&service, &document).await.unwrap();
}

#[tokio::test]
async fn test_synchronize_aborts_before_submission_on_malformed_document() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    // Neither ResourceRecords nor AliasTarget: a fatal configuration defect.
    let document = write_zone_document(
        dir.path(),
        "Name: example.com.\nZoneID: Z123\nResourceRecordSets:\n  - Name: broken.example.com.\n    Type: A\n",
    );

    Mock::given(method("GET"))
        .and(path("/zones/Z123/rrsets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResourceRecordSets": [],
            "IsTruncated": false
        })))
        .mount(&server)
        .await;

    let service = client(&server);
    let error = synchronize_zone(&service, &document).await.unwrap_err();
    assert!(
        error.to_string().contains("broken.example.com."),
        "Run must abort naming the record, got: {error}"
    );
}

#[tokio::test]
async fn test_extract_zone_writes_one_document_file() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("zones");
    let document = write_zone_document(dir.path(), "Name: example.com.\nZoneID: Z123\n");

    Mock::given(method("GET"))
        .and(path("/zones/Z123/rrsets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResourceRecordSets": [
                {"Name": "example.com.", "Type": "SOA", "TTL": 900,
                 "ResourceRecords": [{"Value": "ns1. admin. 1 2 3 4 5"}]},
                {"Name": "www.example.com.", "Type": "A", "TTL": 300,
                 "ResourceRecords": [{"Value": "192.0.2.1"}]}
            ],
            "IsTruncated": false
        })))
        .mount(&server)
        .await;

    let service = client(&server);
    extract_zone(&service, &document, &out_dir, false)
        .await
        .unwrap();

    let written = fs::read_to_string(out_dir.join("example.com.yaml")).unwrap();
    assert!(written.contains("www.example.com."));
    assert!(
        !written.contains("SOA"),
        "Infrastructure records must not be extracted:\n{written}"
    );
}

#[tokio::test]
async fn test_extract_all_writes_one_file_per_zone() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("zones");

    Mock::given(method("GET"))
        .and(path("/zones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "HostedZones": [
                {"Id": "/hostedzone/Z1", "Name": "one.example."},
                {"Id": "/hostedzone/Z2", "Name": "two.example."}
            ],
            "IsTruncated": false
        })))
        .mount(&server)
        .await;

    for (zone_id, record_name) in [("Z1", "www.one.example."), ("Z2", "www.two.example.")] {
        Mock::given(method("GET"))
            .and(path(format!("/zones/{zone_id}/rrsets")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ResourceRecordSets": [
                    {"Name": record_name, "Type": "A", "TTL": 300,
                     "ResourceRecords": [{"Value": "192.0.2.1"}]}
                ],
                "IsTruncated": false
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let service = client(&server);
    extract_all_zones(&service, &out_dir, false).await.unwrap();

    assert!(out_dir.join("one.example.yaml").exists());
    assert!(out_dir.join("two.example.yaml").exists());
}

#[tokio::test]
async fn test_extract_all_respects_existing_files_without_overwrite() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().to_path_buf();
    fs::write(out_dir.join("one.example.yaml"), "hand-edited\n").unwrap();

    Mock::given(method("GET"))
        .and(path("/zones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "HostedZones": [{"Id": "Z1", "Name": "one.example."}],
            "IsTruncated": false
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/zones/Z1/rrsets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResourceRecordSets": [],
            "IsTruncated": false
        })))
        .mount(&server)
        .await;

    let service = client(&server);
    extract_all_zones(&service, &out_dir, false).await.unwrap();

    assert_eq!(
        fs::read_to_string(out_dir.join("one.example.yaml")).unwrap(),
        "hand-edited\n",
        "Existing files survive extraction without the overwrite flag"
    );
}
