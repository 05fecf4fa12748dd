use std::fmt::Write;

use crate::feed::source::{Notification, NotificationKind};

pub const DESCRIPTION_LIMIT: usize = 60;
pub const NO_MORE_UPDATES: &str = "No more updates";

impl NotificationKind {
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Win => "trophy",
            NotificationKind::Invite => "user-plus",
            NotificationKind::Payment => "credit-card",
        }
    }

    pub fn badge_color(&self) -> &'static str {
        match self {
            NotificationKind::Win => "green",
            NotificationKind::Invite => "blue",
            NotificationKind::Payment => "amber",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NotificationKind::Win => "Win",
            NotificationKind::Invite => "Invite",
            NotificationKind::Payment => "Payment",
        }
    }
}

/// Cuts `text` to at most `limit` characters, marking the cut with an
/// ellipsis.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let mut cut: String = text.chars().take(limit.saturating_sub(1)).collect();
    cut.truncate(cut.trim_end().len());
    cut.push('…');
    cut
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_entry(out: &mut String, notification: &Notification) {
    let kind = notification.kind;
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        concat!(
            r#"<li class="notification notification-{kind}" data-id="{id}">"#,
            r#"<span class="icon icon-{icon} text-{color}" aria-hidden="true"></span>"#,
            r#"<div class="content">"#,
            r#"<span class="badge badge-{color}">{label}</span>"#,
            r#"<p class="title">{title}</p>"#,
            r#"<p class="description" title="{full}">{description}</p>"#,
            r#"<span class="time">{time}</span>"#,
            "</div></li>"
        ),
        kind = kind.label().to_ascii_lowercase(),
        id = notification.id,
        icon = kind.icon(),
        color = kind.badge_color(),
        label = kind.label(),
        title = escape(&notification.title),
        full = escape(&notification.description),
        description = escape(&truncate(&notification.description, DESCRIPTION_LIMIT)),
        time = escape(&notification.relative_time),
    );
}

/// Renders the notifications in the order given, followed by the
/// end-of-feed placeholder.
pub fn render_feed(notifications: &[Notification]) -> String {
    let mut out = String::from(r#"<section class="notifications"><ul>"#);
    for notification in notifications {
        render_entry(&mut out, notification);
    }
    out.push_str("</ul>");
    let _ = write!(out, r#"<p class="placeholder">{}</p>"#, NO_MORE_UPDATES);
    out.push_str("</section>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(id: u32, kind: NotificationKind, title: &str) -> Notification {
        Notification::new(id, kind, title, "description", "just now")
    }

    #[test]
    fn truncates_long_descriptions() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("a long description here", 8), "a long…");
        assert_eq!(truncate("ééééé", 3), "éé…");
    }

    #[test]
    fn keeps_insertion_order() {
        let html = render_feed(&[
            notification(3, NotificationKind::Payment, "third"),
            notification(1, NotificationKind::Win, "first"),
            notification(2, NotificationKind::Invite, "second"),
        ]);

        let third = html.find("third").unwrap();
        let first = html.find("first").unwrap();
        let second = html.find("second").unwrap();
        assert!(third < first && first < second);
    }

    #[test]
    fn entries_carry_icon_and_badge_for_kind() {
        let html = render_feed(&[notification(1, NotificationKind::Invite, "join us")]);

        assert!(html.contains("icon-user-plus"));
        assert!(html.contains(r#"<span class="badge badge-blue">Invite</span>"#));
        assert!(html.contains(r#"<span class="time">just now</span>"#));
    }

    #[test]
    fn placeholder_follows_the_list() {
        let html = render_feed(&[notification(1, NotificationKind::Win, "won")]);

        assert!(html.find("won").unwrap() < html.find(NO_MORE_UPDATES).unwrap());
        assert_eq!(html.matches(NO_MORE_UPDATES).count(), 1);
    }

    #[test]
    fn empty_feed_shows_only_placeholder() {
        let html = render_feed(&[]);

        assert!(!html.contains("<li"));
        assert!(html.contains(NO_MORE_UPDATES));
    }

    #[test]
    fn escapes_display_text() {
        let html = render_feed(&[notification(1, NotificationKind::Win, "<b>big</b> & bold")]);

        assert!(html.contains("&lt;b&gt;big&lt;/b&gt; &amp; bold"));
        assert!(!html.contains("<b>"));
    }
}
