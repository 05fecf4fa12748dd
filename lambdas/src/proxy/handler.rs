use std::sync::Arc;

use lambda_http::http::{Method, StatusCode};
use lambda_http::{Error as LambdaError, Request, Response};
use tracing::{error, info, warn};

use crate::common::errors::ProxyError;
use crate::common::utils::{extract_json, json_response, preflight_response};
use crate::proxy::audit::{AuditRecord, AuditSink, TRIGGERED_BY_ADMIN_TEST};
use crate::proxy::envelope::{parse_response_body, FailureResponse, ProxyEnvelope, ProxyResponse};
use crate::proxy::forward::{Forwarder, UpstreamResponse};

/// Forwards one enveloped request and records its outcome.
///
/// The audit write is awaited after the target has answered and before the
/// response is returned. Its failure is logged and otherwise ignored, so the
/// caller sees the same `success`, `status` and `body` with or without a
/// working store.
pub struct ProxyHandler<F> {
    forwarder: F,
    audit: Arc<dyn AuditSink>,
}

impl<F: Forwarder> ProxyHandler<F> {
    pub fn new(forwarder: F, audit: Arc<dyn AuditSink>) -> Self {
        Self { forwarder, audit }
    }

    pub async fn handle(&self, request: Request) -> Result<Response<String>, LambdaError> {
        if request.method() == Method::OPTIONS {
            return Ok(preflight_response()?);
        }

        let response = match self.process_request(&request).await {
            Ok(val) => val,
            Err(err @ ProxyError::Validation(_)) => {
                warn!(kind = err.kind(), "Rejected proxy request: {}", err);
                json_response(StatusCode::BAD_REQUEST, &FailureResponse::new(err.to_string()))?
            }
            Err(err) => {
                error!(kind = err.kind(), "Proxy request failed: {}", err);
                json_response(StatusCode::OK, &FailureResponse::new(err.to_string()))?
            }
        };

        Ok(response)
    }

    #[tracing::instrument(skip_all, fields(method = %request.method()))]
    async fn process_request(&self, request: &Request) -> Result<Response<String>, ProxyError> {
        let envelope: ProxyEnvelope =
            extract_json(request).map_err(ProxyError::MalformedRequest)?;
        let outbound = envelope.to_outbound()?;

        info!("Forwarding {} {}", outbound.method, outbound.url);
        let upstream = self.forwarder.forward(outbound).await?;

        let response = ProxyResponse {
            success: upstream.is_success(),
            status: upstream.status,
            body: parse_response_body(&upstream.text),
            response_time: elapsed_millis(&upstream),
        };

        self.write_audit(&audit_record(&envelope, &response)).await;

        json_response(StatusCode::OK, &response)
    }

    async fn write_audit(&self, record: &AuditRecord) {
        match self.audit.record(record).await {
            Ok(()) => info!("Stored audit record for {}", record.endpoint),
            Err(err) => error!("Failed to store audit record: {}", err),
        }
    }
}

fn elapsed_millis(upstream: &UpstreamResponse) -> u64 {
    u64::try_from(upstream.elapsed.as_millis()).unwrap_or(u64::MAX)
}

fn status_line(status: u16) -> String {
    match StatusCode::from_u16(status)
        .ok()
        .and_then(|status| status.canonical_reason())
    {
        Some(reason) => format!("HTTP {} {}", status, reason),
        None => format!("HTTP {}", status),
    }
}

fn audit_record(envelope: &ProxyEnvelope, response: &ProxyResponse) -> AuditRecord {
    AuditRecord {
        connection_id: envelope.connection_id.clone(),
        endpoint: envelope.url.clone().unwrap_or_default(),
        method: envelope.method_name(),
        request_body: envelope.body.clone(),
        response_status: response.status,
        response_body: response.body.clone(),
        response_time_ms: response.response_time,
        success: response.success,
        error_message: (!response.success).then(|| status_line(response.status)),
        triggered_by: TRIGGERED_BY_ADMIN_TEST.into(),
    }
}
