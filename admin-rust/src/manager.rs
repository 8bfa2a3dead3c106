use crate::{
    opentelemetry::{trace_operation, Operation},
    AdminError, AdminResult, Lifecycle, NoticeBoard,
};
use futures::lock::Mutex;
use portfolio_client::{
    Creatable, Editable, Message, PortfolioClient, Project, ProjectDraft, Resource, ResourceId,
    Skill, SkillDraft,
};
use std::future::Future;

/// Asked before an entity is deleted. Declining means no request is made.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// A fixed answer, for callers that already asked.
impl Confirm for bool {
    fn confirm(&self, _prompt: &str) -> bool {
        *self
    }
}

pub(crate) struct ManagerState<R, D> {
    pub(crate) items: Vec<R>,
    pub(crate) draft: D,
}

/// Local copy of one backend collection plus its create form.
///
/// Local state only changes once the server confirmed an operation; a failed
/// call leaves the collection and the draft as they were and posts an error
/// notice. Operations take `&self` and do not hold the state lock while
/// waiting on the network, so when calls race the last response to arrive
/// decides the final local value.
pub struct ResourceManager<R, D = ()> {
    pub(crate) client: PortfolioClient,
    pub(crate) notices: NoticeBoard,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) state: Mutex<ManagerState<R, D>>,
}

pub type SkillsManager = ResourceManager<Skill, SkillDraft>;
pub type ProjectsManager = ResourceManager<Project, ProjectDraft>;
pub type MessagesManager = ResourceManager<Message>;

impl<R, D> ResourceManager<R, D>
where
    R: Resource,
    D: Default + Clone + Send,
{
    pub fn new(client: PortfolioClient, notices: NoticeBoard) -> Self {
        Self {
            client,
            notices,
            lifecycle: Lifecycle::new(),
            state: Mutex::new(ManagerState {
                items: Vec::new(),
                draft: D::default(),
            }),
        }
    }

    #[must_use]
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Whether a request issued by this manager is outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.lifecycle.is_busy()
    }

    /// Cancel outstanding requests. Later operations fail with
    /// [`AdminError::Unmounted`].
    pub fn unmount(&self) {
        self.lifecycle.unmount();
    }

    /// The collection in server order.
    pub async fn items(&self) -> Vec<R> {
        self.state.lock().await.items.clone()
    }

    pub async fn get(&self, id: ResourceId) -> Option<R> {
        self.state
            .lock()
            .await
            .items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    pub async fn count(&self) -> usize {
        self.state.lock().await.items.len()
    }

    /// Replace the collection with the server's.
    pub async fn fetch_all(&self) -> AdminResult<usize> {
        self.guarded(Operation::FetchAll, async {
            match self.client.list::<R>().await {
                Ok(items) => {
                    let count = items.len();
                    self.state.lock().await.items = items;
                    tracing::debug!(collection = R::COLLECTION, count, "collection loaded");
                    Ok(count)
                }
                Err(error) => {
                    Err(self.report(error.into(), &format!("Error loading {}", R::COLLECTION)))
                }
            }
        })
        .await
    }

    pub async fn delete(&self, id: ResourceId, confirm: &impl Confirm) -> AdminResult<bool> {
        if !confirm.confirm(&format!("Are you sure you want to delete this {}?", R::LABEL)) {
            tracing::debug!(collection = R::COLLECTION, id, "delete declined");
            return Ok(false);
        }

        let failure = format!("Error deleting {}", R::LABEL);
        self.guarded(Operation::Delete, async {
            self.ensure_loaded(id, &failure).await?;
            match self.client.delete::<R>(id).await {
                Ok(()) => {
                    self.state.lock().await.items.retain(|item| item.id() != id);
                    self.notices
                        .success(format!("{} deleted successfully!", capitalized(R::LABEL)));
                    Ok(true)
                }
                Err(error) => Err(self.report(error.into(), &failure)),
            }
        })
        .await
    }

    pub(crate) async fn guarded<T, Fut>(&self, operation: Operation, future: Fut) -> AdminResult<T>
    where
        Fut: Future<Output = AdminResult<T>>,
    {
        trace_operation(operation, R::COLLECTION, async {
            self.lifecycle.run(future).await.and_then(|result| result)
        })
        .await
    }

    pub(crate) async fn ensure_loaded(&self, id: ResourceId, failure: &str) -> AdminResult<()> {
        let loaded = self
            .state
            .lock()
            .await
            .items
            .iter()
            .any(|item| item.id() == id);
        if loaded {
            Ok(())
        } else {
            Err(self.report(AdminError::NotFound(id), failure))
        }
    }

    /// Post the error notice for a failed operation and hand the error back.
    pub(crate) fn report(&self, error: AdminError, fallback: &str) -> AdminError {
        self.notices.error(error.user_message(fallback));
        error
    }
}

impl<R> ResourceManager<R, R::Draft>
where
    R: Creatable,
{
    /// The create form as currently filled in.
    pub async fn draft(&self) -> R::Draft {
        self.state.lock().await.draft.clone()
    }

    pub async fn set_draft(&self, draft: R::Draft) {
        self.state.lock().await.draft = draft;
    }

    pub async fn edit_draft(&self, edit: impl FnOnce(&mut R::Draft)) {
        edit(&mut self.state.lock().await.draft);
    }

    /// Validate and post the current draft. The form is cleared only once
    /// the server returned the stored entity.
    pub async fn create(&self) -> AdminResult<R> {
        let failure = format!("Error adding {}", R::LABEL);
        self.guarded(Operation::Create, async {
            let draft = self.state.lock().await.draft.clone();
            if let Err(message) = R::validate_draft(&draft) {
                return Err(self.report(AdminError::Validation(message), &failure));
            }

            match self.client.create::<R>(&draft).await {
                Ok(entity) => {
                    let mut state = self.state.lock().await;
                    state.items.push(entity.clone());
                    state.draft = R::Draft::default();
                    drop(state);
                    self.notices
                        .success(format!("{} added successfully!", capitalized(R::LABEL)));
                    Ok(entity)
                }
                Err(error) => Err(self.report(error.into(), &failure)),
            }
        })
        .await
    }
}

impl<R, D> ResourceManager<R, D>
where
    R: Editable,
    D: Default + Clone + Send,
{
    /// Send `patch` and merge it into the local entity once accepted.
    pub async fn update(&self, id: ResourceId, patch: R::Patch) -> AdminResult<()> {
        let failure = format!("Error updating {}", R::LABEL);
        self.guarded(Operation::Update, async {
            if let Err(message) = R::validate_patch(&patch) {
                return Err(self.report(AdminError::Validation(message), &failure));
            }
            self.ensure_loaded(id, &failure).await?;

            match self.client.update::<R>(id, &patch).await {
                Ok(()) => {
                    let mut state = self.state.lock().await;
                    // Deleted while the update was in flight.
                    if let Some(item) = state.items.iter_mut().find(|item| item.id() == id) {
                        item.apply_patch(&patch);
                    }
                    drop(state);
                    self.notices
                        .success(format!("{} updated successfully!", capitalized(R::LABEL)));
                    Ok(())
                }
                Err(error) => Err(self.report(error.into(), &failure)),
            }
        })
        .await
    }
}

pub(crate) fn capitalized(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_labels() {
        assert_eq!(capitalized("skill"), "Skill");
        assert_eq!(capitalized(""), "");
    }

    #[test]
    fn closures_and_flags_confirm() {
        assert!(true.confirm("Are you sure?"));
        assert!(!false.confirm("Are you sure?"));
        assert!((|prompt: &str| prompt.contains("skill")).confirm("delete this skill?"));
    }
}
