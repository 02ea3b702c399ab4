// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone service operations: listing, lookup, and change submission.
//!
//! [`ZoneService`] is the boundary the core works against. The production
//! implementation, [`HttpZoneService`], talks JSON over HTTP to the managed
//! zone service with bearer-token auth. All calls are synchronous from the
//! caller's point of view (one request completes before the next starts) and
//! nothing here retries: transport failures propagate to the run as-is.
//!
//! Listings are paginated. Record sets continue via the service's three-part
//! cursor (next name, next type, next identifier); hosted zones continue via
//! a single marker.

use crate::change::{Change, RecordSet};
use crate::constants::{
    CHANGE_BATCH_COMMENT, HOSTED_ZONE_ID_PREFIX, HOSTED_ZONE_PAGE_SIZE, RECORD_SET_PAGE_SIZE,
};
use crate::errors::{ConfigError, LookupError, SyncError, TransportError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use url::Url;

/// Metadata of one hosted zone at the service.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct HostedZone {
    /// Opaque zone id, possibly prefixed with `/hostedzone/`
    #[serde(rename = "Id")]
    pub id: String,

    /// Fully qualified zone name, with trailing dot
    #[serde(rename = "Name")]
    pub name: String,
}

/// Receipt returned by the service for one submitted change batch.
#[derive(Clone, Debug, Deserialize)]
pub struct ChangeReceipt {
    /// Submission id
    #[serde(rename = "Id")]
    pub id: String,

    /// Submission status (e.g. PENDING, INSYNC)
    #[serde(rename = "Status")]
    pub status: String,

    /// Comment echoed back from the batch
    #[serde(rename = "Comment", default)]
    pub comment: Option<String>,

    /// When the service accepted the batch
    #[serde(rename = "SubmittedAt")]
    pub submitted_at: DateTime<Utc>,
}

/// Operations the core needs from the managed zone service.
#[async_trait]
pub trait ZoneService {
    /// List every record set of a zone, following pagination to the end.
    async fn list_record_sets(&self, zone_id: &str) -> Result<Vec<RecordSet>, SyncError>;

    /// List every hosted zone of the account, keyed by normalized zone id.
    ///
    /// The map is ordered so bulk extraction processes zones deterministically.
    async fn list_hosted_zones(&self) -> Result<BTreeMap<String, HostedZone>, SyncError>;

    /// Resolve a zone id from its exact name.
    ///
    /// The lookup is a name-prefix search, so the first result can be a
    /// near-miss when the requested zone does not exist. A non-identical name
    /// is a [`ConfigError::ZoneNameMismatch`], never a silent fallback.
    async fn find_zone_by_name(&self, name: &str) -> Result<String, SyncError>;

    /// Submit one atomic change batch for a zone.
    async fn submit_changes(
        &self,
        zone_id: &str,
        changes: Vec<Change>,
    ) -> Result<ChangeReceipt, SyncError>;
}

// ============================================================
// Wire Types
// ============================================================

#[derive(Debug, Deserialize)]
struct ListRecordSetsPage {
    #[serde(rename = "ResourceRecordSets", default)]
    resource_record_sets: Vec<RecordSet>,

    #[serde(rename = "IsTruncated", default)]
    is_truncated: bool,

    #[serde(rename = "NextRecordName")]
    next_record_name: Option<String>,

    #[serde(rename = "NextRecordType")]
    next_record_type: Option<String>,

    #[serde(rename = "NextRecordIdentifier")]
    next_record_identifier: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListHostedZonesPage {
    #[serde(rename = "HostedZones", default)]
    hosted_zones: Vec<HostedZone>,

    #[serde(rename = "IsTruncated", default)]
    is_truncated: bool,

    #[serde(rename = "NextMarker")]
    next_marker: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChangeBatchRequest {
    #[serde(rename = "ChangeBatch")]
    change_batch: ChangeBatch,
}

#[derive(Debug, Serialize)]
struct ChangeBatch {
    #[serde(rename = "Comment")]
    comment: String,

    #[serde(rename = "Changes")]
    changes: Vec<Change>,
}

#[derive(Debug, Deserialize)]
struct SubmitChangesResponse {
    #[serde(rename = "ChangeInfo")]
    change_info: ChangeReceipt,
}

/// Continuation cursor for record-set listings.
struct RecordSetCursor {
    name: String,
    record_type: String,
    identifier: Option<String>,
}

/// Strip the `/hostedzone/` path prefix when the service includes it.
fn normalize_zone_id(id: &str) -> String {
    id.strip_prefix(HOSTED_ZONE_ID_PREFIX).unwrap_or(id).to_string()
}

// ============================================================
// HTTP Client
// ============================================================

/// JSON-over-HTTP implementation of [`ZoneService`].
pub struct HttpZoneService {
    http: reqwest::Client,
    base: String,
    api_token: Option<String>,
}

impl HttpZoneService {
    /// Create a client for the service at `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the underlying HTTP client cannot be built.
    pub fn new(endpoint: &Url, api_token: Option<String>) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("zonesync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base: endpoint.as_str().trim_end_matches('/').to_string(),
            api_token,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, TransportError> {
        let mut request = self.http.get(url).query(query);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, TransportError> {
        let mut request = self.http.post(url).json(body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ZoneService for HttpZoneService {
    async fn list_record_sets(&self, zone_id: &str) -> Result<Vec<RecordSet>, SyncError> {
        let url = format!("{}/zones/{}/rrsets", self.base, zone_id);
        let mut record_sets = Vec::new();
        let mut cursor: Option<RecordSetCursor> = None;
        let mut page_count = 0;

        loop {
            page_count += 1;
            let mut query = vec![("maxitems", RECORD_SET_PAGE_SIZE.to_string())];
            if let Some(c) = &cursor {
                query.push(("startname", c.name.clone()));
                query.push(("starttype", c.record_type.clone()));
                if let Some(identifier) = &c.identifier {
                    query.push(("startidentifier", identifier.clone()));
                }
            }

            let page: ListRecordSetsPage = self.get_json(&url, &query).await?;
            let items_in_page = page.resource_record_sets.len();
            record_sets.extend(page.resource_record_sets);

            debug!(
                zone_id = %zone_id,
                page = page_count,
                items_in_page = items_in_page,
                total_items = record_sets.len(),
                "Fetched record-set page"
            );

            if page.is_truncated {
                cursor = match (page.next_record_name, page.next_record_type) {
                    (Some(name), Some(record_type)) => Some(RecordSetCursor {
                        name,
                        record_type,
                        identifier: page.next_record_identifier,
                    }),
                    // Truncated page without a cursor cannot continue
                    _ => {
                        return Err(TransportError::Api {
                            status: 200,
                            message: "truncated record-set listing without continuation cursor"
                                .to_string(),
                        }
                        .into())
                    }
                };
            } else {
                break;
            }
        }

        Ok(record_sets)
    }

    async fn list_hosted_zones(&self) -> Result<BTreeMap<String, HostedZone>, SyncError> {
        let url = format!("{}/zones", self.base);
        let mut zones = BTreeMap::new();
        let mut marker: Option<String> = None;

        loop {
            let mut query = vec![("maxitems", HOSTED_ZONE_PAGE_SIZE.to_string())];
            if let Some(m) = &marker {
                query.push(("marker", m.clone()));
            }

            let page: ListHostedZonesPage = self.get_json(&url, &query).await?;
            for zone in page.hosted_zones {
                zones.insert(normalize_zone_id(&zone.id), zone);
            }

            debug!(total_zones = zones.len(), "Fetched hosted-zone page");

            if page.is_truncated {
                marker = page.next_marker;
                if marker.is_none() {
                    return Err(TransportError::Api {
                        status: 200,
                        message: "truncated hosted-zone listing without continuation marker"
                            .to_string(),
                    }
                    .into());
                }
            } else {
                break;
            }
        }

        Ok(zones)
    }

    async fn find_zone_by_name(&self, name: &str) -> Result<String, SyncError> {
        debug!(zone = %name, "Looking up hosted zone id by name");

        let url = format!("{}/zones", self.base);
        let query = vec![("name", name.to_string()), ("maxitems", "1".to_string())];
        let page: ListHostedZonesPage = self.get_json(&url, &query).await?;

        let zone = page
            .hosted_zones
            .first()
            .ok_or_else(|| LookupError::ZoneNotFound {
                name: name.to_string(),
            })?;

        // A name-prefix lookup returns the nearest zone when the requested one
        // does not exist, which is never the zone the caller asked for.
        if zone.name != name {
            return Err(ConfigError::ZoneNameMismatch {
                requested: name.to_string(),
                found: zone.name.clone(),
            }
            .into());
        }

        Ok(normalize_zone_id(&zone.id))
    }

    async fn submit_changes(
        &self,
        zone_id: &str,
        changes: Vec<Change>,
    ) -> Result<ChangeReceipt, SyncError> {
        let url = format!("{}/zones/{}/rrsets/changes", self.base, zone_id);
        let body = ChangeBatchRequest {
            change_batch: ChangeBatch {
                comment: CHANGE_BATCH_COMMENT.to_string(),
                changes,
            },
        };

        let response: SubmitChangesResponse = self.post_json(&url, &body).await?;

        debug!(
            zone_id = %zone_id,
            change_id = %response.change_info.id,
            status = %response.change_info.status,
            "Change batch submitted"
        );

        Ok(response.change_info)
    }
}
