//! Support chat with a delayed canned reply.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::debug;

use crate::model::ChatMessage;

pub const AUTO_REPLY: &str = "Thank you for your message. Our support team will get back to you shortly. Our operating hours are Monday to Saturday, 9 AM - 5 PM.";

/// Chat transcript plus the pending auto-replies.
///
/// Replies are produced by tasks owned by the chat; dropping the chat aborts
/// any reply that has not arrived yet.
#[derive(Debug)]
pub struct SupportChat {
    messages: Vec<ChatMessage>,
    next_id: u64,
    reply_delay: Duration,
    pending: JoinSet<()>,
    reply_tx: mpsc::UnboundedSender<ChatMessage>,
    reply_rx: mpsc::UnboundedReceiver<ChatMessage>,
}

impl SupportChat {
    pub fn new(reply_delay: Duration) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        Self {
            messages: Vec::new(),
            next_id: 1,
            reply_delay,
            pending: JoinSet::new(),
            reply_tx,
            reply_rx,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of replies still on their way.
    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    /// Append a user message and schedule one auto-reply. Blank text is ignored.
    ///
    /// Must be called from within a tokio runtime.
    pub fn send(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        let message = ChatMessage {
            id: self.take_id(),
            text: text.to_string(),
            from_user: true,
            timestamp: Utc::now(),
        };
        self.messages.push(message);

        let reply_id = self.take_id();
        let delay = self.reply_delay;
        let tx = self.reply_tx.clone();
        self.pending.spawn(async move {
            tokio::time::sleep(delay).await;
            let reply = ChatMessage {
                id: reply_id,
                text: AUTO_REPLY.to_string(),
                from_user: false,
                timestamp: Utc::now(),
            };
            // receiver lives as long as the chat
            let _ = tx.send(reply);
        });
        true
    }

    /// Move every reply that has arrived into the transcript.
    pub fn drain_replies(&mut self) -> usize {
        let mut arrived = 0;
        while let Ok(reply) = self.reply_rx.try_recv() {
            debug!(id = reply.id, "support reply arrived");
            self.messages.push(reply);
            arrived += 1;
        }
        while self.pending.try_join_next().is_some() {}
        arrived
    }

    /// Wait for the next reply and append it. Returns `false` when none is pending.
    pub async fn next_reply(&mut self) -> bool {
        if self.pending.is_empty() && self.reply_rx.is_empty() {
            return false;
        }
        match self.reply_rx.recv().await {
            Some(reply) => {
                self.messages.push(reply);
                while self.pending.try_join_next().is_some() {}
                true
            }
            None => false,
        }
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn blank_messages_are_ignored() {
        let mut chat = SupportChat::new(Duration::from_secs(2));
        assert!(!chat.send("   "));
        assert!(chat.messages().is_empty());
        assert_eq!(chat.pending_replies(), 0);
        assert!(!chat.next_reply().await);
    }

    #[tokio::test(start_paused = true)]
    async fn reply_arrives_after_delay() {
        let mut chat = SupportChat::new(Duration::from_secs(2));
        assert!(chat.send("my meter is not loading"));
        assert_eq!(chat.messages().len(), 1);
        assert!(chat.messages()[0].from_user);

        sleep(Duration::from_millis(1_900)).await;
        assert_eq!(chat.drain_replies(), 0);

        sleep(Duration::from_millis(200)).await;
        assert_eq!(chat.drain_replies(), 1);
        let reply = &chat.messages()[1];
        assert!(!reply.from_user);
        assert_eq!(reply.text, AUTO_REPLY);
        assert_eq!(chat.pending_replies(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn each_message_gets_one_reply() {
        let mut chat = SupportChat::new(Duration::from_secs(2));
        chat.send("one");
        chat.send("two");
        assert!(chat.next_reply().await);
        assert!(chat.next_reply().await);
        assert!(!chat.next_reply().await);

        let from_user: Vec<bool> = chat.messages().iter().map(|m| m.from_user).collect();
        assert_eq!(from_user, vec![true, true, false, false]);
        let mut reply_ids: Vec<u64> = chat.messages()[2..].iter().map(|m| m.id).collect();
        reply_ids.sort_unstable();
        assert_eq!(reply_ids, vec![2, 4]);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_chat_aborts_pending_replies() {
        let mut chat = SupportChat::new(Duration::from_secs(2));
        chat.send("hello");
        let tx = chat.reply_tx.clone();
        drop(chat);
        sleep(Duration::from_secs(1)).await;
        // still inside the reply delay, so only an aborted task has let go of its sender
        assert_eq!(tx.strong_count(), 1);
    }
}
