//! Proxy-and-log function: forwards the request described by a JSON
//! envelope and records the outcome in the audit store.

pub mod audit;
pub mod envelope;
pub mod forward;
pub mod handler;

pub use audit::{audit_sink_from_config, AuditRecord, AuditSink};
pub use envelope::{OutboundRequest, ProxyEnvelope, ProxyResponse};
pub use forward::{Forwarder, HttpForwarder, UpstreamResponse};
pub use handler::ProxyHandler;
