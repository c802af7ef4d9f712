use colored::Colorize;

use crate::client::ApiClient;
use crate::demo::{self, or_demo};
use crate::error::Result;
use crate::feed::{NotificationFeed, POLL_INTERVAL};
use crate::output;
use crate::responses::MessageResponse;
use crate::types::Notification;

async fn fetch_feed(client: &ApiClient, demo_enabled: bool) -> Result<(NotificationFeed, bool)> {
    let fetched = or_demo(
        client.get::<Vec<Notification>>("notifications").await,
        demo_enabled,
        demo::notifications,
    )?;
    let is_demo = fetched.is_demo();
    if is_demo {
        demo::notice();
    }
    Ok((NotificationFeed::new(fetched.into_inner()), is_demo))
}

fn print_feed(feed: &NotificationFeed) {
    match feed.badge_text() {
        Some(badge) => output::print_message(&format!("Unread: {badge}")),
        None => output::print_message("No unread notifications."),
    }

    output::print_item(&feed.items().to_vec(), |items| {
        for notification in items {
            let marker = if notification.read { " " } else { "●" };
            println!(
                "{} {} {} {} ({})",
                marker.cyan(),
                notification.kind.symbol(),
                notification.id.dimmed(),
                notification.message,
                output::format_relative(notification.created_at)
            );
        }
    });
}

pub async fn list(client: &ApiClient, demo_enabled: bool) -> Result<()> {
    let (feed, _) = fetch_feed(client, demo_enabled).await?;
    if feed.items().is_empty() {
        output::print_message("No notifications.");
        return Ok(());
    }
    print_feed(&feed);
    Ok(())
}

/// Long-running poll loop: fetch once, then ask for news every 30 seconds
/// until interrupted.
pub async fn watch(client: &ApiClient, demo_enabled: bool) -> Result<()> {
    let (mut feed, is_demo) = fetch_feed(client, demo_enabled).await?;
    print_feed(&feed);
    if is_demo {
        // Nothing new will ever arrive from the built-in dataset.
        return Ok(());
    }

    output::print_message("Watching for new notifications (Ctrl-C to stop)...");
    let mut ticker = tokio::time::interval(POLL_INTERVAL);
    ticker.tick().await; // the first tick fires immediately
    loop {
        ticker.tick().await;
        let since = feed.latest_timestamp().to_rfc3339();
        let batch: Vec<Notification> = client
            .get(&format!("notifications?since={since}"))
            .await?;
        for notification in feed.merge_new(batch) {
            println!(
                "{} {} {}",
                notification.kind.symbol(),
                notification.message,
                output::format_relative(notification.created_at).dimmed()
            );
        }
    }
}

/// Read acknowledgements are optimistic: the local state is reported read
/// even when the backend call fails.
pub async fn read(client: &ApiClient, id: &str, demo_enabled: bool) -> Result<()> {
    let (mut feed, is_demo) = fetch_feed(client, demo_enabled).await?;
    if !feed.mark_read(id) {
        output::print_message(&format!("No notification with id '{id}'."));
        return Ok(());
    }

    if !is_demo {
        let ack: Result<MessageResponse> = client
            .put_empty(&format!("notifications/{id}/read"))
            .await;
        if let Err(err) = ack {
            output::warning(&format!("failed to acknowledge read: {err}"));
        }
    }

    output::success(&format!(
        "Marked as read, {} unread left",
        feed.unread_count()
    ));
    Ok(())
}

pub async fn read_all(client: &ApiClient, demo_enabled: bool) -> Result<()> {
    let (mut feed, is_demo) = fetch_feed(client, demo_enabled).await?;
    feed.mark_all_read();

    if !is_demo {
        let ack: Result<MessageResponse> = client.put_empty("notifications/read-all").await;
        if let Err(err) = ack {
            output::warning(&format!("failed to acknowledge read: {err}"));
        }
    }

    output::success("All notifications marked as read");
    Ok(())
}
