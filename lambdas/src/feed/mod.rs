//! Notification feed: renders the syndicate notifications as an HTML list.

pub mod render;
pub mod source;

use lambda_http::http::{Method, StatusCode};
use lambda_http::{Error as LambdaError, Request, Response};
use tracing::{error, info};

use crate::common::errors::FeedError;
use crate::common::utils::{html_response, preflight_response};

pub use render::render_feed;
pub use source::{Notification, NotificationKind, NotificationSource, StaticNotifications};

const FEED_UNAVAILABLE_ERROR: &str = "Notifications are unavailable";

pub struct FeedHandler<S> {
    source: S,
}

impl<S: NotificationSource> FeedHandler<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn handle(&self, request: Request) -> Result<Response<String>, LambdaError> {
        if request.method() == Method::OPTIONS {
            return Ok(preflight_response()?);
        }

        match self.process_request().await {
            Ok(val) => Ok(val),
            Err(err) => {
                error!("Failed to render notifications: {}", err);
                Ok(html_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    FEED_UNAVAILABLE_ERROR.into(),
                )?)
            }
        }
    }

    async fn process_request(&self) -> Result<Response<String>, FeedError> {
        let notifications = self.source.notifications().await?;
        info!("Rendering {} notifications", notifications.len());

        Ok(html_response(StatusCode::OK, render_feed(&notifications))?)
    }
}
