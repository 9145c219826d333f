//! User-facing alerts, clipboard access and the notification feed.

use tracing::info;

/// Payload of a blocking alert dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Platform alert primitive.
pub trait Notifier {
    fn alert(&mut self, notice: Notice);
}

/// Platform clipboard primitive. Copies always succeed.
pub trait Clipboard {
    fn copy(&mut self, text: &str);
}

/// Writes alerts and copies to the log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&mut self, notice: Notice) {
        info!(title = %notice.title, "{}", notice.message);
    }
}

impl Clipboard for LogNotifier {
    fn copy(&mut self, text: &str) {
        info!(text, "copied to clipboard");
    }
}

/// Keeps every alert and copy in memory.
#[derive(Debug, Default)]
pub struct Recorder {
    pub notices: Vec<Notice>,
    pub copied: Vec<String>,
}

impl Recorder {
    pub fn last(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

impl Notifier for Recorder {
    fn alert(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

impl Clipboard for Recorder {
    fn copy(&mut self, text: &str) {
        self.copied.push(text.to_string());
    }
}

impl<T: Notifier + ?Sized> Notifier for &mut T {
    fn alert(&mut self, notice: Notice) {
        (**self).alert(notice);
    }
}

impl<T: Clipboard + ?Sized> Clipboard for &mut T {
    fn copy(&mut self, text: &str) {
        (**self).copy(text);
    }
}

/// Entry in the notifications screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub id: u32,
    pub title: &'static str,
    pub message: &'static str,
    pub time: &'static str,
    pub read: bool,
}

/// Notifications screen state.
#[derive(Debug, Clone)]
pub struct NotificationFeed {
    items: Vec<FeedItem>,
}

impl NotificationFeed {
    pub fn new(items: Vec<FeedItem>) -> Self {
        Self { items }
    }

    /// The fixed mock feed.
    pub fn seeded() -> Self {
        let item = |id, title, message, time, read| FeedItem {
            id,
            title,
            message,
            time,
            read,
        };
        Self::new(vec![
            item(
                1,
                "Payment Successful",
                "Your payment of ₦2,750 was processed successfully",
                "2 hours ago",
                false,
            ),
            item(
                2,
                "Wallet Top-up",
                "Your wallet has been credited with ₦10,000",
                "6 hours ago",
                true,
            ),
            item(
                3,
                "Scheduled Payment",
                "Your scheduled payment for Lamp 003842109 is due tomorrow",
                "1 day ago",
                true,
            ),
            item(
                4,
                "Security Alert",
                "New login detected from your device",
                "2 days ago",
                true,
            ),
            item(
                5,
                "App Update",
                "New version of SunPay is available. Update now for new features",
                "3 days ago",
                true,
            ),
        ])
    }

    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|item| !item.read).count()
    }

    pub fn mark_all_read(&mut self) {
        for item in &mut self.items {
            item.read = true;
        }
    }

    /// Alert shown when the header bell is pressed.
    pub fn summary(&self) -> Notice {
        Notice::new(
            "Notifications",
            format!("You have {} unread notifications", self.unread_count()),
        )
    }
}

impl Default for NotificationFeed {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_keeps_alerts_in_order() {
        let mut recorder = Recorder::default();
        recorder.alert(Notice::new("Error", "first"));
        recorder.alert(Notice::new("Success", "second"));
        assert_eq!(recorder.notices.len(), 2);
        assert_eq!(recorder.last().unwrap().message, "second");
    }

    fn copy_and_alert<P: Notifier + Clipboard>(mut platform: P) {
        platform.copy("123");
        platform.alert(Notice::new("Copied!", "123"));
    }

    #[test]
    fn mutable_reference_forwards() {
        let mut recorder = Recorder::default();
        copy_and_alert(&mut recorder);
        assert_eq!(recorder.copied, vec!["123".to_string()]);
        assert_eq!(recorder.notices.len(), 1);
    }

    #[test]
    fn seeded_feed_has_one_unread() {
        let feed = NotificationFeed::seeded();
        assert_eq!(feed.items().len(), 5);
        assert_eq!(feed.unread_count(), 1);
        assert_eq!(feed.summary().message, "You have 1 unread notifications");
    }

    #[test]
    fn mark_all_read_clears_unread() {
        let mut feed = NotificationFeed::default();
        feed.mark_all_read();
        assert_eq!(feed.unread_count(), 0);
        assert!(feed.items().iter().all(|item| item.read));
    }
}
