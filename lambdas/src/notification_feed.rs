use lambda_http::{run, service_fn, Error as LambdaError, Request};
use tracing::info;

use syndicate_lambdas::common::init_tracing;
use syndicate_lambdas::feed::{FeedHandler, StaticNotifications};

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    init_tracing();

    let handler = FeedHandler::new(StaticNotifications::default());

    info!("Notification feed function initialized");

    run(service_fn(|request: Request| handler.handle(request))).await
}
