use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::common::errors::FeedError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Win,
    Invite,
    Payment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    /// Already formatted for display, e.g. "2 hours ago".
    pub relative_time: String,
}

impl Notification {
    pub fn new(
        id: u32,
        kind: NotificationKind,
        title: impl Into<String>,
        description: impl Into<String>,
        relative_time: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            description: description.into(),
            relative_time: relative_time.into(),
        }
    }
}

/// Produces notifications in display order. An empty list is valid.
#[async_trait]
pub trait NotificationSource: Send + Sync {
    async fn notifications(&self) -> Result<Vec<Notification>, FeedError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticNotifications(Vec<Notification>);

impl StaticNotifications {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self(notifications)
    }
}

impl Default for StaticNotifications {
    fn default() -> Self {
        Self(vec![
            Notification::new(
                1,
                NotificationKind::Win,
                "Your syndicate won!",
                "Lucky Sevens matched 4 numbers in Saturday's draw. Your share of the \
                 prize has been credited to your wallet.",
                "2 hours ago",
            ),
            Notification::new(
                2,
                NotificationKind::Invite,
                "New syndicate invite",
                "Sarah invited you to join Office Millionaires for the EuroMillions draw.",
                "5 hours ago",
            ),
            Notification::new(
                3,
                NotificationKind::Payment,
                "Payment received",
                "Your contribution of £5.00 to Friday Night Dreamers was confirmed.",
                "1 day ago",
            ),
            Notification::new(
                4,
                NotificationKind::Win,
                "Small prize won",
                "Weekend Warriors matched 3 numbers and won £12.50 to share between members.",
                "3 days ago",
            ),
        ])
    }
}

#[async_trait]
impl NotificationSource for StaticNotifications {
    async fn notifications(&self) -> Result<Vec<Notification>, FeedError> {
        Ok(self.0.clone())
    }
}
