use crate::{
    opentelemetry::{trace_operation, Operation},
    AdminError, AdminResult, Lifecycle, NoticeBoard,
};
use futures::{future::join_all, lock::Mutex};
use portfolio_client::{ContentFields, ContentKey, ImageUpload, PortfolioClient};
use std::future::Future;

const SUBJECT: &str = "content";

#[derive(Default)]
struct ContentState {
    /// Last values the server confirmed.
    saved: ContentFields,
    /// What the form currently shows, including unsaved edits.
    form: ContentFields,
}

/// The dashboard's content form.
pub struct ContentManager {
    client: PortfolioClient,
    notices: NoticeBoard,
    lifecycle: Lifecycle,
    state: Mutex<ContentState>,
}

impl ContentManager {
    pub fn new(client: PortfolioClient, notices: NoticeBoard) -> Self {
        Self {
            client,
            notices,
            lifecycle: Lifecycle::new(),
            state: Mutex::new(ContentState::default()),
        }
    }

    #[must_use]
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.lifecycle.is_busy()
    }

    pub fn unmount(&self) {
        self.lifecycle.unmount();
    }

    /// Form values, edits included.
    pub async fn fields(&self) -> ContentFields {
        self.state.lock().await.form.clone()
    }

    /// Values as last confirmed by the server.
    pub async fn saved(&self) -> ContentFields {
        self.state.lock().await.saved.clone()
    }

    pub async fn is_dirty(&self, key: ContentKey) -> bool {
        let state = self.state.lock().await;
        state.form.get(key) != state.saved.get(key)
    }

    pub async fn fetch_all(&self) -> AdminResult<usize> {
        self.guarded(Operation::FetchAll, async {
            match self.client.fetch_content().await {
                Ok(fields) => {
                    let count = fields.len();
                    let mut state = self.state.lock().await;
                    state.form = fields.clone();
                    state.saved = fields;
                    Ok(count)
                }
                Err(error) => Err(self.report(error.into(), "Error loading content")),
            }
        })
        .await
    }

    /// Change a form value locally. Nothing is sent until a save.
    pub async fn edit(&self, key: ContentKey, value: impl Into<String>) {
        self.state.lock().await.form.set(key, value);
    }

    /// Put an uploaded picture into the form as a data URL.
    pub async fn set_profile_image(&self, upload: &ImageUpload) {
        self.edit(ContentKey::ProfileImage, upload.to_data_url()).await;
    }

    /// Save a single field.
    pub async fn save_field(&self, key: ContentKey) -> AdminResult<()> {
        const FAILURE: &str = "Error updating content";
        self.guarded(Operation::SaveContent, async {
            let value = self.state.lock().await.form.get(key).to_string();
            match self.client.update_content(key, &value).await {
                Ok(()) => {
                    self.state.lock().await.saved.set(key, value);
                    self.notices.success("Content updated successfully!");
                    Ok(())
                }
                Err(error) => Err(self.report(error.into(), FAILURE)),
            }
        })
        .await
    }

    /// Save every field the dashboard edits, concurrently. Fields the
    /// server accepted count as saved even when others failed.
    pub async fn save_all(&self) -> AdminResult<usize> {
        const FAILURE: &str = "Error saving content";
        self.guarded(Operation::SaveContent, async {
            let entries: Vec<(ContentKey, String)> = {
                let state = self.state.lock().await;
                ContentKey::ALL
                    .into_iter()
                    .filter(|key| key.is_dashboard_editable())
                    .map(|key| (key, state.form.get(key).to_string()))
                    .collect()
            };

            let results = join_all(entries.iter().map(|(key, value)| async move {
                (*key, value, self.client.update_content(*key, value).await)
            }))
            .await;

            let mut first_error = None;
            let mut saved = 0;
            {
                let mut state = self.state.lock().await;
                for (key, value, result) in results {
                    match result {
                        Ok(()) => {
                            state.saved.set(key, value.clone());
                            saved += 1;
                        }
                        Err(error) => {
                            tracing::warn!(key = %key, %error, "content field not saved");
                            first_error.get_or_insert(error);
                        }
                    }
                }
            }

            match first_error {
                None => {
                    self.notices.success("All content saved successfully!");
                    Ok(saved)
                }
                Some(error) => Err(self.report(error.into(), FAILURE)),
            }
        })
        .await
    }

    async fn guarded<T, Fut>(&self, operation: Operation, future: Fut) -> AdminResult<T>
    where
        Fut: Future<Output = AdminResult<T>>,
    {
        trace_operation(operation, SUBJECT, async {
            self.lifecycle.run(future).await.and_then(|result| result)
        })
        .await
    }

    fn report(&self, error: AdminError, fallback: &str) -> AdminError {
        self.notices.error(error.user_message(fallback));
        error
    }
}
