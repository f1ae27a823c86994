use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use crate::core::repository::NotificationSink;
use crate::models::{Casting, MatchResult};

/// Message handed to the notification worker
#[derive(Debug, Clone)]
pub struct TopMatchNotification {
    pub casting: Casting,
    pub matches: Vec<MatchResult>,
}

/// Fire-and-forget front end of the notification worker
///
/// `notify` never blocks and never fails: a full or closed queue drops the
/// message with a warning.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: Option<mpsc::Sender<TopMatchNotification>>,
    top_n: usize,
}

impl Notifier {
    /// Start the worker task on the current tokio runtime
    pub fn spawn(
        sink: Arc<dyn NotificationSink>,
        queue_capacity: usize,
        top_n: usize,
    ) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<TopMatchNotification>(queue_capacity.max(1));

        let worker = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                match sink.notify_top_matches(&message.casting, &message.matches).await {
                    Ok(()) => tracing::debug!(
                        "Notified {} top matches for casting {}",
                        message.matches.len(),
                        message.casting.id
                    ),
                    Err(e) => tracing::warn!(
                        "Top match notification for casting {} failed: {}",
                        message.casting.id,
                        e
                    ),
                }
            }
            tracing::debug!("Notification worker stopped");
        });

        (Self { tx: Some(tx), top_n }, worker)
    }

    /// Notifier that discards everything
    pub fn disabled() -> Self {
        Self { tx: None, top_n: 0 }
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    /// Queue the best `top_n` matches of a casting for notification
    pub fn notify(&self, casting: &Casting, matches: &[MatchResult]) {
        let Some(tx) = &self.tx else {
            return;
        };
        if matches.is_empty() {
            return;
        }

        let message = TopMatchNotification {
            casting: casting.clone(),
            matches: matches.iter().take(self.top_n).cloned().collect(),
        };

        if let Err(e) = tx.try_send(message) {
            tracing::warn!(
                "Dropping top match notification for casting {}: {}",
                casting.id,
                e
            );
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::disabled()
    }
}
