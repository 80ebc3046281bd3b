//! Chunked direct-message delivery
//!
//! Long answers are sent to the user as a series of DMs. The whole send
//! shares one retry budget: a failed chunk is retried until the budget runs
//! out, then the delivery is abandoned.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, error};
use serenity::http::Http;
use serenity::model::id::UserId;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::core::response::{chunk_chars, MAX_RESPONSE_CHUNK_LENGTH};

/// Failed chunk sends tolerated across one whole message
pub const DM_RETRY_BUDGET: u32 = 3;

/// Something that can deliver one direct message
#[async_trait]
pub trait DirectMessenger: Send + Sync {
    async fn send_direct(&self, content: &str) -> Result<()>;
}

/// DMs a Discord user through the bot's HTTP client
pub struct UserDirectMessenger {
    http: Arc<Http>,
    user_id: UserId,
}

impl UserDirectMessenger {
    pub fn new(http: Arc<Http>, user_id: UserId) -> Self {
        Self { http, user_id }
    }
}

#[async_trait]
impl DirectMessenger for UserDirectMessenger {
    async fn send_direct(&self, content: &str) -> Result<()> {
        let http: &Http = &self.http;
        let dm = self.user_id.create_dm_channel(http).await?;
        dm.send_message(http, |m| m.content(content)).await?;
        Ok(())
    }
}

/// Send `text` as consecutive DMs of at most 1500 characters.
///
/// Empty text is logged and skipped. Fails once the shared retry budget is spent.
pub async fn split_and_send(messenger: &dyn DirectMessenger, text: &str) -> Result<()> {
    if text.is_empty() {
        error!("Invalid response received, aborting message sending");
        return Ok(());
    }

    let mut pending: VecDeque<&str> = chunk_chars(text, MAX_RESPONSE_CHUNK_LENGTH).into();
    let mut budget = DM_RETRY_BUDGET;

    while let Some(&chunk) = pending.front() {
        if budget == 0 {
            return Err(anyhow!(
                "Failed to send DM: {} of {} chunks undelivered",
                pending.len(),
                chunk_chars(text, MAX_RESPONSE_CHUNK_LENGTH).len()
            ));
        }
        match messenger.send_direct(chunk).await {
            Ok(()) => {
                pending.pop_front();
            }
            Err(e) => {
                budget -= 1;
                error!("split_and_send error: {e} | Retries left: {budget}");
            }
        }
    }

    debug!("Direct message delivered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records delivered chunks; fails the sends whose attempt index is listed
    struct ScriptedMessenger {
        fail_attempts: Vec<usize>,
        attempts: Mutex<usize>,
        delivered: Mutex<Vec<String>>,
    }

    impl ScriptedMessenger {
        fn new(fail_attempts: Vec<usize>) -> Self {
            Self {
                fail_attempts,
                attempts: Mutex::new(0),
                delivered: Mutex::new(Vec::new()),
            }
        }

        fn delivered(&self) -> Vec<String> {
            self.delivered.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DirectMessenger for ScriptedMessenger {
        async fn send_direct(&self, content: &str) -> Result<()> {
            let attempt = {
                let mut attempts = self.attempts.lock().unwrap();
                *attempts += 1;
                *attempts - 1
            };
            if self.fail_attempts.contains(&attempt) {
                return Err(anyhow!("discord unavailable"));
            }
            self.delivered.lock().unwrap().push(content.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_sends_three_chunks() {
        let messenger = ScriptedMessenger::new(vec![]);
        let text = "a".repeat(4000);
        split_and_send(&messenger, &text).await.unwrap();

        let sizes: Vec<usize> = messenger.delivered().iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![1500, 1500, 1000]);
    }

    #[tokio::test]
    async fn test_retries_failed_chunk_from_where_it_left_off() {
        let messenger = ScriptedMessenger::new(vec![1, 2]);
        let text = format!("{}{}", "a".repeat(1500), "b".repeat(10));
        split_and_send(&messenger, &text).await.unwrap();

        let delivered = messenger.delivered();
        assert_eq!(delivered.len(), 2);
        assert_eq!(delivered[1], "b".repeat(10));
    }

    #[tokio::test]
    async fn test_budget_is_shared_across_chunks() {
        // one failure on each of the three chunks exhausts the budget
        let messenger = ScriptedMessenger::new(vec![0, 2, 4]);
        let text = "a".repeat(4000);
        let result = split_and_send(&messenger, &text).await;

        assert!(result.is_err());
        assert_eq!(messenger.delivered().len(), 2);
    }

    #[tokio::test]
    async fn test_persistent_failure_gives_up() {
        let messenger = ScriptedMessenger::new((0..10).collect());
        let result = split_and_send(&messenger, "hello").await;
        assert!(result.is_err());
        assert_eq!(*messenger.attempts.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_last_chunk_succeeds_on_final_retry() {
        let messenger = ScriptedMessenger::new(vec![0, 1]);
        split_and_send(&messenger, "hello").await.unwrap();
        assert_eq!(messenger.delivered(), vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_text_is_ignored() {
        let messenger = ScriptedMessenger::new(vec![]);
        split_and_send(&messenger, "").await.unwrap();
        assert_eq!(*messenger.attempts.lock().unwrap(), 0);
    }
}
