pub const AUDIT_STORE_BACKEND_ENV: &str = "AUDIT_STORE_BACKEND";
pub const AUDIT_STORE_URL_ENV: &str = "AUDIT_STORE_URL";
pub const AUDIT_STORE_SERVICE_KEY_ENV: &str = "AUDIT_STORE_SERVICE_KEY";
pub const AUDIT_TABLE_NAME_ENV: &str = "AUDIT_TABLE_NAME";

pub const AUDIT_TABLE_NAME_DEFAULT: &str = "api_request_logs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Rest,
    DynamoDb,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rest" => Some(StoreBackend::Rest),
            "dynamodb" | "dynamo" => Some(StoreBackend::DynamoDb),
            _ => None,
        }
    }
}

/// Where audit records go. Built once at cold start and handed to the
/// handler, which never reads the environment itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditStoreConfig {
    pub backend: StoreBackend,
    pub endpoint: Option<String>,
    pub service_key: Option<String>,
    pub table_name: String,
}

impl AuditStoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let backend = match non_empty(AUDIT_STORE_BACKEND_ENV) {
            Some(value) => StoreBackend::parse(&value).unwrap_or_else(|| {
                tracing::warn!("Unknown audit store backend {:?}, using rest", value);
                StoreBackend::Rest
            }),
            None => StoreBackend::default(),
        };

        Self {
            backend,
            endpoint: non_empty(AUDIT_STORE_URL_ENV),
            service_key: non_empty(AUDIT_STORE_SERVICE_KEY_ENV),
            table_name: non_empty(AUDIT_TABLE_NAME_ENV)
                .unwrap_or(AUDIT_TABLE_NAME_DEFAULT.into()),
        }
    }

    /// The REST backend needs both the endpoint and the credential.
    pub fn rest_credentials(&self) -> Option<(&str, &str)> {
        match (&self.endpoint, &self.service_key) {
            (Some(endpoint), Some(key)) => Some((endpoint.as_str(), key.as_str())),
            _ => None,
        }
    }
}
