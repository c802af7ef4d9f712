//! Notification feed: an append-ordered, de-duplicated-by-id list with an
//! unread badge and optimistic read acknowledgements.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::types::Notification;

/// How often watch mode asks the backend for news.
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Unread counts above this render as "9+".
const BADGE_CAP: usize = 9;

pub struct NotificationFeed {
    items: Vec<Notification>,
}

impl NotificationFeed {
    /// Newest first, regardless of the order the backend returned.
    pub fn new(mut items: Vec<Notification>) -> Self {
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self { items }
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Prepends notifications not seen before and returns them, oldest of
    /// the batch last, for toast display.
    pub fn merge_new(&mut self, batch: Vec<Notification>) -> Vec<Notification> {
        let known: HashSet<&str> = self.items.iter().map(|n| n.id.as_str()).collect();
        let fresh: Vec<Notification> = batch
            .into_iter()
            .filter(|n| !known.contains(n.id.as_str()))
            .collect();
        drop(known);

        let mut prepended = fresh.clone();
        prepended.append(&mut self.items);
        self.items = prepended;
        fresh
    }

    /// Timestamp of the newest known notification; Unix epoch when empty.
    /// Drives the `?since=` poll parameter.
    pub fn latest_timestamp(&self) -> DateTime<Utc> {
        self.items
            .iter()
            .map(|n| n.created_at)
            .max()
            .unwrap_or(DateTime::UNIX_EPOCH)
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    /// Badge text, `None` when nothing is unread.
    pub fn badge_text(&self) -> Option<String> {
        match self.unread_count() {
            0 => None,
            n if n > BADGE_CAP => Some("9+".to_string()),
            n => Some(n.to_string()),
        }
    }

    /// Flips local state immediately; the backend acknowledgement is sent
    /// separately and a failure there does not roll this back.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for n in &mut self.items {
            n.read = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration as ChronoDuration;

    use super::*;
    use crate::types::{NotificationMeta, NotificationType};

    fn notification(id: &str, read: bool, age_minutes: i64) -> Notification {
        Notification {
            id: id.to_string(),
            message: format!("notification {id}"),
            kind: NotificationType::TaskAssigned,
            read,
            created_at: Utc::now() - ChronoDuration::minutes(age_minutes),
            metadata: NotificationMeta::default(),
        }
    }

    #[test]
    fn orders_newest_first() {
        let feed = NotificationFeed::new(vec![
            notification("old", false, 60),
            notification("new", false, 1),
        ]);
        assert_eq!(feed.items()[0].id, "new");
    }

    #[test]
    fn badge_counts_and_caps() {
        let feed = NotificationFeed::new((0..6).map(|i| notification(&i.to_string(), false, i)).collect());
        assert_eq!(feed.badge_text().as_deref(), Some("6"));

        let feed = NotificationFeed::new((0..11).map(|i| notification(&i.to_string(), false, i)).collect());
        assert_eq!(feed.unread_count(), 11);
        assert_eq!(feed.badge_text().as_deref(), Some("9+"));

        let feed = NotificationFeed::new(vec![notification("1", true, 1)]);
        assert_eq!(feed.badge_text(), None);
    }

    #[test]
    fn merge_dedupes_by_id() {
        let mut feed = NotificationFeed::new(vec![notification("1", true, 60)]);
        let fresh = feed.merge_new(vec![notification("1", false, 60), notification("2", false, 1)]);
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].id, "2");
        assert_eq!(feed.items().len(), 2);
        assert_eq!(feed.items()[0].id, "2");
        // The already-known copy did not clobber local read state.
        assert!(feed.items().iter().find(|n| n.id == "1").unwrap().read);
    }

    #[test]
    fn latest_timestamp_is_epoch_when_empty() {
        let feed = NotificationFeed::new(Vec::new());
        assert_eq!(feed.latest_timestamp(), DateTime::UNIX_EPOCH);

        let newest = notification("2", false, 1);
        let expected = newest.created_at;
        let feed = NotificationFeed::new(vec![notification("1", false, 60), newest]);
        assert_eq!(feed.latest_timestamp(), expected);
    }

    #[test]
    fn mark_read_is_local_and_idempotent() {
        let mut feed = NotificationFeed::new(vec![notification("1", false, 1)]);
        assert!(feed.mark_read("1"));
        assert_eq!(feed.unread_count(), 0);
        assert!(feed.mark_read("1"));
        assert!(!feed.mark_read("ghost"));
    }

    #[test]
    fn mark_all_read_clears_badge() {
        let mut feed =
            NotificationFeed::new((0..3).map(|i| notification(&i.to_string(), false, i)).collect());
        feed.mark_all_read();
        assert_eq!(feed.badge_text(), None);
    }
}
