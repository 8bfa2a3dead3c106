use crate::{
    AdminResult, ContentManager, DashboardParams, MessagesManager, Notice, NoticeBoard,
    ProjectsManager, SkillsManager,
};
use portfolio_client::{PortfolioClient, SessionStore};

/// Counters shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    /// Content fields holding a non-blank value.
    pub content_fields: usize,
    pub skills: usize,
    pub projects: usize,
    pub messages: usize,
    pub unread_messages: usize,
}

/// The admin dashboard: one manager per collection, sharing a notice board.
pub struct Dashboard {
    client: PortfolioClient,
    notices: NoticeBoard,
    content: ContentManager,
    skills: SkillsManager,
    projects: ProjectsManager,
    messages: MessagesManager,
}

impl Dashboard {
    #[must_use]
    pub fn new(params: DashboardParams) -> Self {
        let DashboardParams {
            client,
            notice_duration,
        } = params;
        let notices = NoticeBoard::with_duration(notice_duration);

        Self {
            content: ContentManager::new(client.clone(), notices.clone()),
            skills: SkillsManager::new(client.clone(), notices.clone()),
            projects: ProjectsManager::new(client.clone(), notices.clone()),
            messages: MessagesManager::new(client.clone(), notices.clone()),
            client,
            notices,
        }
    }

    #[must_use]
    pub fn content(&self) -> &ContentManager {
        &self.content
    }

    #[must_use]
    pub fn skills(&self) -> &SkillsManager {
        &self.skills
    }

    #[must_use]
    pub fn projects(&self) -> &ProjectsManager {
        &self.projects
    }

    #[must_use]
    pub fn messages(&self) -> &MessagesManager {
        &self.messages
    }

    #[must_use]
    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        self.client.session()
    }

    /// The notice visible right now.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        self.notices.current()
    }

    /// Fetch every collection concurrently. Each manager keeps its previous
    /// state when its own fetch fails; the first failure is returned.
    pub async fn load(&self) -> AdminResult<()> {
        let (content, skills, projects, messages) = futures::join!(
            self.content.fetch_all(),
            self.skills.fetch_all(),
            self.projects.fetch_all(),
            self.messages.fetch_all(),
        );
        content?;
        skills?;
        projects?;
        messages?;
        Ok(())
    }

    pub async fn stats(&self) -> DashboardStats {
        let content = self.content.saved().await;
        DashboardStats {
            content_fields: content
                .iter()
                .filter(|(_, value)| !value.trim().is_empty())
                .count(),
            skills: self.skills.count().await,
            projects: self.projects.count().await,
            messages: self.messages.count().await,
            unread_messages: self.messages.unread_count().await,
        }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.content.is_busy()
            || self.skills.is_busy()
            || self.projects.is_busy()
            || self.messages.is_busy()
    }

    /// Cancel everything in flight. The dashboard is unusable afterwards.
    pub fn unmount(&self) {
        self.content.unmount();
        self.skills.unmount();
        self.projects.unmount();
        self.messages.unmount();
    }

    /// Sign out and tear the dashboard down.
    pub fn logout(&self) {
        self.client.logout();
        self.unmount();
    }
}
