use async_trait::async_trait;
use lambda_http::http::StatusCode;
use lambda_http::{Body, Request};

use syndicate_lambdas::common::errors::FeedError;
use syndicate_lambdas::feed::render::NO_MORE_UPDATES;
use syndicate_lambdas::feed::{
    FeedHandler, Notification, NotificationKind, NotificationSource, StaticNotifications,
};

struct BrokenSource;

#[async_trait]
impl NotificationSource for BrokenSource {
    async fn notifications(&self) -> Result<Vec<Notification>, FeedError> {
        Err(FeedError::Source("connection reset".into()))
    }
}

fn request(method: &str) -> Request {
    lambda_http::http::Request::builder()
        .method(method)
        .uri("https://functions.example.com/notifications")
        .body(Body::Empty)
        .unwrap()
}

#[tokio::test]
async fn renders_the_built_in_notifications() {
    let handler = FeedHandler::new(StaticNotifications::default());

    let response = handler.handle(request("GET")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/html; charset=utf-8"
    );
    let html = response.body();
    assert_eq!(html.matches("<li").count(), 4);
    assert!(html.contains("icon-trophy"));
    assert!(html.contains("icon-user-plus"));
    assert!(html.contains("icon-credit-card"));
    assert!(html.ends_with(&format!(
        r#"<p class="placeholder">{}</p></section>"#,
        NO_MORE_UPDATES
    )));
}

#[tokio::test]
async fn empty_source_renders_placeholder_only() {
    let handler = FeedHandler::new(StaticNotifications::new(Vec::new()));

    let response = handler.handle(request("GET")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.body().contains("<li"));
    assert!(response.body().contains(NO_MORE_UPDATES));
}

#[tokio::test]
async fn custom_source_order_is_preserved() {
    let handler = FeedHandler::new(StaticNotifications::new(vec![
        Notification::new(9, NotificationKind::Payment, "Paid", "Paid £2", "now"),
        Notification::new(1, NotificationKind::Win, "Won", "Won £10", "yesterday"),
    ]));

    let response = handler.handle(request("GET")).await.unwrap();

    let html = response.body();
    assert!(html.find(r#"data-id="9""#).unwrap() < html.find(r#"data-id="1""#).unwrap());
}

#[tokio::test]
async fn source_failure_is_a_server_error() {
    let handler = FeedHandler::new(BrokenSource);

    let response = handler.handle(request("GET")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn answers_preflight() {
    let handler = FeedHandler::new(BrokenSource);

    let response = handler.handle(request("OPTIONS")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body(), "ok");
}

#[test]
fn notifications_serialize_with_type_field() {
    let value = serde_json::to_value(Notification::new(
        1,
        NotificationKind::Invite,
        "t",
        "d",
        "1 day ago",
    ))
    .unwrap();

    assert_eq!(value["type"], "invite");
    assert_eq!(value["relativeTime"], "1 day ago");
}
