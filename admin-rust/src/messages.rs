use crate::{opentelemetry::Operation, AdminResult, MessagesManager};
use portfolio_client::ResourceId;

const MARK_READ_FAILED: &str = "Error updating message";

impl MessagesManager {
    pub async fn unread_count(&self) -> usize {
        self.state
            .lock()
            .await
            .items
            .iter()
            .filter(|message| !message.read_status)
            .count()
    }

    /// Mark a message read once the server confirms it.
    ///
    /// Returns whether a request was made. A message that is already read
    /// is left alone: no request and no notice.
    pub async fn mark_read(&self, id: ResourceId) -> AdminResult<bool> {
        self.guarded(Operation::MarkRead, async {
            self.ensure_loaded(id, MARK_READ_FAILED).await?;
            let already_read = self
                .state
                .lock()
                .await
                .items
                .iter()
                .any(|message| message.id == id && message.read_status);
            if already_read {
                return Ok(false);
            }

            match self.client.mark_message_read(id).await {
                Ok(()) => {
                    let mut state = self.state.lock().await;
                    if let Some(message) = state.items.iter_mut().find(|message| message.id == id) {
                        message.read_status = true;
                    }
                    drop(state);
                    self.notices.success("Message marked as read");
                    Ok(true)
                }
                Err(error) => Err(self.report(error.into(), MARK_READ_FAILED)),
            }
        })
        .await
    }
}
