use lambda_http::http::response::Builder;
use lambda_http::http::{header, StatusCode};
use lambda_http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::common::errors::ProxyError;
use crate::common::{CORS_ALLOW_HEADERS, CORS_ALLOW_ORIGIN};

const PREFLIGHT_BODY: &str = "ok";

/// Parses the raw request body as JSON regardless of the declared
/// content type. An empty body is a parse error.
pub fn extract_json<T: DeserializeOwned>(request: &Request) -> Result<T, serde_json::Error> {
    serde_json::from_slice(request.body().as_ref())
}

pub fn with_cors(builder: Builder) -> Builder {
    builder
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, CORS_ALLOW_ORIGIN)
        .header(header::ACCESS_CONTROL_ALLOW_HEADERS, CORS_ALLOW_HEADERS)
}

pub fn preflight_response() -> Result<Response<String>, lambda_http::http::Error> {
    with_cors(Response::builder().status(StatusCode::OK)).body(PREFLIGHT_BODY.into())
}

pub fn json_response<T: Serialize>(
    status: StatusCode,
    payload: &T,
) -> Result<Response<String>, ProxyError> {
    let body = serde_json::to_string(payload).map_err(ProxyError::Serialization)?;
    let response = with_cors(Response::builder().status(status))
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)?;

    Ok(response)
}

pub fn html_response(
    status: StatusCode,
    body: String,
) -> Result<Response<String>, lambda_http::http::Error> {
    with_cors(Response::builder().status(status))
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .body(body)
}
