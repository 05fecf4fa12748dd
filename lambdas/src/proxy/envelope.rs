use std::collections::BTreeMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::common::errors::{ProxyError, URL_REQUIRED_ERROR};

const DEFAULT_METHOD: &str = "GET";

/// Description of one outbound call, as posted by the admin console.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyEnvelope {
    pub url: Option<String>,
    pub method: Option<String>,
    pub headers: Option<BTreeMap<String, String>>,
    pub body: Option<Value>,
    pub connection_id: Option<String>,
}

/// A validated envelope, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub url: String,
    pub method: Method,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl ProxyEnvelope {
    pub fn method_name(&self) -> String {
        self.method
            .as_deref()
            .unwrap_or(DEFAULT_METHOD)
            .to_ascii_uppercase()
    }

    /// Checks the only required field and serializes the body for anything
    /// but `GET`.
    pub fn to_outbound(&self) -> Result<OutboundRequest, ProxyError> {
        let url = match self.url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => return Err(ProxyError::Validation(URL_REQUIRED_ERROR)),
        };

        let method_name = self.method_name();
        let method = Method::from_bytes(method_name.as_bytes())
            .map_err(|_| ProxyError::InvalidMethod(method_name.clone()))?;

        let body = match &self.body {
            Some(body) if method != Method::GET => {
                Some(serde_json::to_string(body).map_err(ProxyError::Serialization)?)
            }
            _ => None,
        };

        Ok(OutboundRequest {
            url,
            method,
            headers: self.headers.clone().unwrap_or_default(),
            body,
        })
    }
}

/// What the caller gets back when the target answered, whatever its status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub success: bool,
    pub status: u16,
    pub body: Value,
    pub response_time: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
}

impl FailureResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Parses the target's response text, falling back to `{"raw": text}`.
pub fn parse_response_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| json!({ "raw": text }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(value: Value) -> ProxyEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn missing_or_empty_url_fails_validation() {
        for value in [json!({}), json!({"url": null}), json!({"url": ""})] {
            let err = envelope(value).to_outbound().unwrap_err();
            assert!(matches!(err, ProxyError::Validation(URL_REQUIRED_ERROR)));
        }
    }

    #[test]
    fn defaults_to_get_without_headers() {
        let outbound = envelope(json!({"url": "https://example.com/ok"}))
            .to_outbound()
            .unwrap();

        assert_eq!(outbound.method, Method::GET);
        assert!(outbound.headers.is_empty());
        assert_eq!(outbound.body, None);
    }

    #[test]
    fn get_never_carries_a_body() {
        let outbound = envelope(json!({
            "url": "https://example.com",
            "method": "get",
            "body": {"ignored": true}
        }))
        .to_outbound()
        .unwrap();

        assert_eq!(outbound.method, Method::GET);
        assert_eq!(outbound.body, None);
    }

    #[test]
    fn other_methods_serialize_the_body() {
        let outbound = envelope(json!({
            "url": "https://example.com",
            "method": "POST",
            "headers": {"x-api-key": "k"},
            "body": {"draw": 42}
        }))
        .to_outbound()
        .unwrap();

        assert_eq!(outbound.method, Method::POST);
        assert_eq!(outbound.body.as_deref(), Some(r#"{"draw":42}"#));
        assert_eq!(outbound.headers["x-api-key"], "k");
    }

    #[test]
    fn null_body_is_omitted() {
        let outbound = envelope(json!({
            "url": "https://example.com",
            "method": "DELETE",
            "body": null
        }))
        .to_outbound()
        .unwrap();

        assert_eq!(outbound.body, None);
    }

    #[test]
    fn rejects_methods_that_are_not_tokens() {
        let err = envelope(json!({"url": "https://example.com", "method": "NOT A METHOD"}))
            .to_outbound()
            .unwrap_err();

        assert_eq!(err.kind(), "invalid_method");
    }

    #[test]
    fn non_json_text_is_wrapped() {
        assert_eq!(parse_response_body("<html>"), json!({"raw": "<html>"}));
        assert_eq!(parse_response_body(""), json!({"raw": ""}));
        assert_eq!(parse_response_body(r#"{"ok":true}"#), json!({"ok": true}));
    }
}
