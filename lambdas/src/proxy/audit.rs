use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::types::AttributeValue;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::common::config::{AuditStoreConfig, StoreBackend};
use crate::common::errors::LoggingError;

pub const TRIGGERED_BY_ADMIN_TEST: &str = "admin_test";

/// One row per proxied call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRecord {
    pub connection_id: Option<String>,
    pub endpoint: String,
    pub method: String,
    pub request_body: Option<Value>,
    pub response_status: u16,
    pub response_body: Value,
    pub response_time_ms: u64,
    pub success: bool,
    pub error_message: Option<String>,
    pub triggered_by: String,
}

fn json_attribute(value: &Value) -> AttributeValue {
    AttributeValue::S(value.to_string())
}

fn optional_attribute(value: Option<String>) -> AttributeValue {
    match value {
        Some(value) => AttributeValue::S(value),
        None => AttributeValue::Null(true),
    }
}

impl From<AuditRecord> for HashMap<String, AttributeValue> {
    fn from(record: AuditRecord) -> Self {
        HashMap::from([
            ("ID".into(), AttributeValue::S(Uuid::new_v4().to_string())),
            (
                "connection_id".into(),
                optional_attribute(record.connection_id),
            ),
            ("endpoint".into(), AttributeValue::S(record.endpoint)),
            ("method".into(), AttributeValue::S(record.method)),
            (
                "request_body".into(),
                optional_attribute(record.request_body.as_ref().map(Value::to_string)),
            ),
            (
                "response_status".into(),
                AttributeValue::N(record.response_status.to_string()),
            ),
            ("response_body".into(), json_attribute(&record.response_body)),
            (
                "response_time_ms".into(),
                AttributeValue::N(record.response_time_ms.to_string()),
            ),
            ("success".into(), AttributeValue::Bool(record.success)),
            (
                "error_message".into(),
                optional_attribute(record.error_message),
            ),
            ("triggered_by".into(), AttributeValue::S(record.triggered_by)),
        ])
    }
}

/// Persistent store for audit records. Callers treat every error as
/// non-fatal.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, record: &AuditRecord) -> Result<(), LoggingError>;
}

/// Inserts through a PostgREST endpoint using a service credential.
#[derive(Debug, Clone)]
pub struct RestAuditStore {
    client: reqwest::Client,
    insert_url: String,
    service_key: String,
}

impl RestAuditStore {
    pub fn new(client: reqwest::Client, endpoint: &str, service_key: &str, table: &str) -> Self {
        Self {
            client,
            insert_url: format!("{}/rest/v1/{}", endpoint.trim_end_matches('/'), table),
            service_key: service_key.into(),
        }
    }

    pub fn insert_url(&self) -> &str {
        &self.insert_url
    }
}

#[async_trait]
impl AuditSink for RestAuditStore {
    async fn record(&self, record: &AuditRecord) -> Result<(), LoggingError> {
        let response = self
            .client
            .post(&self.insert_url)
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LoggingError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct DynamoAuditStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoAuditStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl AuditSink for DynamoAuditStore {
    async fn record(&self, record: &AuditRecord) -> Result<(), LoggingError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record.clone().into()))
            .send()
            .await
            .map_err(Box::new)?;

        Ok(())
    }
}

/// Stands in when the store has no endpoint or credential.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAuditStore;

#[async_trait]
impl AuditSink for DisabledAuditStore {
    async fn record(&self, _record: &AuditRecord) -> Result<(), LoggingError> {
        Err(LoggingError::NotConfigured)
    }
}

pub async fn audit_sink_from_config(
    config: &AuditStoreConfig,
    client: reqwest::Client,
) -> Arc<dyn AuditSink> {
    match config.backend {
        StoreBackend::Rest => match config.rest_credentials() {
            Some((endpoint, key)) => {
                info!("Audit records go to {}", endpoint);
                Arc::new(RestAuditStore::new(client, endpoint, key, &config.table_name))
            }
            None => {
                warn!("Audit store endpoint or credential missing, audit logging disabled");
                Arc::new(DisabledAuditStore)
            }
        },
        StoreBackend::DynamoDb => {
            let mut loader = aws_config::defaults(BehaviorVersion::latest());
            if let Some(endpoint) = &config.endpoint {
                loader = loader.endpoint_url(endpoint);
            }
            let aws_config = loader.load().await;
            info!("Audit records go to DynamoDB table {}", config.table_name);
            Arc::new(DynamoAuditStore::new(
                aws_sdk_dynamodb::Client::new(&aws_config),
                config.table_name.clone(),
            ))
        }
    }
}
