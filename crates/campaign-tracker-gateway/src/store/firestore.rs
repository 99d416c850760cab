//! Firestore REST backend.
//!
//! Reads `users/{user}/campaigns/{campaign}` through the v1 documents API and
//! decodes Firestore's typed values into a [`CampaignRecord`].

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode, Url};
use serde::de::IgnoredAny;
use serde::Deserialize;

use campaign_tracker_core::error::{Result, TrackerError};
use campaign_tracker_core::Campaign;

use crate::config::FirestoreSection;
use crate::store::credentials;
use crate::store::record::{CampaignRecord, CreatedAt};
use crate::store::CampaignStore;

/// A Firestore document as returned by `GET .../documents/{path}`.
#[derive(Debug, Deserialize)]
pub struct Document {
    /// Full resource name; the last segment is the document id.
    pub name: String,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

/// Firestore typed value. Exactly one key is present on the wire.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(IgnoredAny),
    BooleanValue(bool),
    /// int64 values are transmitted as decimal strings.
    IntegerValue(String),
    DoubleValue(f64),
    TimestampValue(DateTime<Utc>),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(IgnoredAny),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Default, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MapValue {
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

impl Value {
    fn kind(&self) -> &'static str {
        match self {
            Value::NullValue(_) => "nullValue",
            Value::BooleanValue(_) => "booleanValue",
            Value::IntegerValue(_) => "integerValue",
            Value::DoubleValue(_) => "doubleValue",
            Value::TimestampValue(_) => "timestampValue",
            Value::StringValue(_) => "stringValue",
            Value::BytesValue(_) => "bytesValue",
            Value::ReferenceValue(_) => "referenceValue",
            Value::GeoPointValue(_) => "geoPointValue",
            Value::ArrayValue(_) => "arrayValue",
            Value::MapValue(_) => "mapValue",
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Value::IntegerValue(s) => s.parse().ok(),
            Value::DoubleValue(d) if d.is_finite() => Some(d.trunc() as i64),
            _ => None,
        }
    }

    fn as_string(&self) -> Option<String> {
        match self {
            Value::StringValue(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// `None` for null or falsy values (`false`, zero, empty string, list or
    /// map), which mean "not started". `true` counts as epoch millisecond 1.
    fn as_created_at(&self) -> Option<CreatedAt> {
        match self {
            Value::NullValue(_) => None,
            Value::BooleanValue(false) => None,
            Value::BooleanValue(true) => Some(CreatedAt::EpochMillis(1.0)),
            Value::ArrayValue(list) if list.values.is_empty() => None,
            Value::MapValue(map) if map.fields.is_empty() => None,
            Value::TimestampValue(ts) => Some(CreatedAt::Timestamp(*ts)),
            Value::IntegerValue(s) => Some(match s.parse::<i64>() {
                Ok(0) => return None,
                Ok(ms) => CreatedAt::EpochMillis(ms as f64),
                Err(_) => CreatedAt::Unrecognized("integerValue"),
            }),
            Value::DoubleValue(d) if *d == 0.0 => None,
            Value::DoubleValue(d) => Some(CreatedAt::EpochMillis(*d)),
            Value::StringValue(s) if s.is_empty() => None,
            Value::StringValue(s) => Some(CreatedAt::Text(s.clone())),
            other => Some(CreatedAt::Unrecognized(other.kind())),
        }
    }
}

impl Document {
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Decode the document fields into a backend-neutral record.
    pub fn into_record(self) -> CampaignRecord {
        let id = self.id().to_string();
        let fields = self.fields;
        let int = |key: &str| fields.get(key).and_then(Value::as_i64);
        let text = |key: &str| fields.get(key).and_then(Value::as_string);

        let target_users = match fields.get("targetUsers") {
            Some(Value::ArrayValue(list)) => list.values.len(),
            _ => 0,
        };

        CampaignRecord {
            id,
            name: text("name"),
            campaign_type: text("campaignType"),
            status: text("status"),
            target_count: int("targetCount"),
            target_users,
            filtered_users: int("filteredUsers"),
            processing_rate_per_hour: int("processingRatePerHour"),
            created_at: fields.get("createdAt").and_then(Value::as_created_at),
            progress: int("progress"),
            total_processed: int("totalProcessed"),
        }
    }
}

/// Campaign store backed by the Firestore REST API.
pub struct FirestoreStore {
    client: Client,
    base_url: Url,
    project_id: String,
    database: String,
    token: Option<String>,
}

impl FirestoreStore {
    /// Build the client, resolving credentials once at startup.
    pub fn new(cfg: &FirestoreSection) -> Result<Self> {
        let token = credentials::resolve_token(cfg)?;
        Self::with_token(cfg, token)
    }

    pub fn with_token(cfg: &FirestoreSection, token: Option<String>) -> Result<Self> {
        let base_url = Url::parse(&cfg.base_url)
            .map_err(|e| TrackerError::BadRequest(format!("invalid firestore base_url: {e}")))?;
        let client = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(|e| TrackerError::Internal(format!("http client init failed: {e}")))?;

        tracing::info!(project = %cfg.project_id, database = %cfg.database, base_url = %base_url, "firestore store ready");
        Ok(Self {
            client,
            base_url,
            project_id: cfg.project_id.clone(),
            database: cfg.database.clone(),
            token,
        })
    }

    /// URL of one campaign document. Segments are percent-encoded.
    pub fn document_url(&self, user_id: &str, campaign_id: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TrackerError::Internal("firestore base_url cannot be a base".into()))?
            .pop_if_empty()
            .extend([
                "projects",
                self.project_id.as_str(),
                "databases",
                self.database.as_str(),
                "documents",
                "users",
                user_id,
                "campaigns",
                campaign_id,
            ]);
        Ok(url)
    }
}

#[async_trait]
impl CampaignStore for FirestoreStore {
    fn backend(&self) -> &'static str {
        "firestore"
    }

    async fn get_campaign(&self, user_id: &str, campaign_id: &str) -> Result<Option<Campaign>> {
        let url = self.document_url(user_id, campaign_id)?;
        let mut req = self.client.get(url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| TrackerError::Store(format!("firestore request failed: {e}")))?;

        match resp.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            status if !status.is_success() => {
                return Err(TrackerError::Store(format!("firestore returned {status}")));
            }
            _ => {}
        }

        let doc: Document = resp
            .json()
            .await
            .map_err(|e| TrackerError::Store(format!("firestore document decode failed: {e}")))?;

        tracing::debug!(%user_id, %campaign_id, fields = doc.fields.len(), "firestore document fetched");
        Ok(Some(doc.into_record().into_campaign(Utc::now())))
    }
}
