use aws_sdk_dynamodb::config::http::HttpResponse;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;

pub const URL_REQUIRED_ERROR: &str = "URL is required";

/// Failures of a single proxy invocation.
///
/// Only `Validation` is distinguished on the wire (400). Every other variant
/// is answered with a 200 `{success: false}` envelope; the variant survives in
/// the operational log through [`ProxyError::kind`].
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("{0}")]
    MalformedRequest(serde_json::Error),

    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error(transparent)]
    Upstream(#[from] reqwest::Error),

    #[error(transparent)]
    Serialization(serde_json::Error),

    #[error(transparent)]
    Http(#[from] lambda_http::http::Error),
}

impl ProxyError {
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::Validation(_) => "validation",
            ProxyError::MalformedRequest(_) => "malformed_request",
            ProxyError::InvalidMethod(_) => "invalid_method",
            ProxyError::Upstream(_) => "upstream",
            ProxyError::Serialization(_) => "serialization",
            ProxyError::Http(_) => "http",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("audit store is not configured")]
    NotConfigured,

    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("audit store rejected insert with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error(transparent)]
    DynamoDb(#[from] Box<SdkError<PutItemError, HttpResponse>>),
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("notification source failed: {0}")]
    Source(String),

    #[error(transparent)]
    Http(#[from] lambda_http::http::Error),
}
