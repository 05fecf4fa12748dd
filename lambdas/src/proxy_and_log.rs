use lambda_http::{run, service_fn, Error as LambdaError, Request};
use tracing::info;

use syndicate_lambdas::common::config::AuditStoreConfig;
use syndicate_lambdas::common::init_tracing;
use syndicate_lambdas::proxy::{audit_sink_from_config, HttpForwarder, ProxyHandler};

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    init_tracing();

    let store_config = AuditStoreConfig::from_env();
    let client = reqwest::Client::new();
    let audit = audit_sink_from_config(&store_config, client.clone()).await;
    let handler = ProxyHandler::new(HttpForwarder::new(client), audit);

    info!("Proxy-and-log function initialized");

    run(service_fn(|request: Request| handler.handle(request))).await
}
