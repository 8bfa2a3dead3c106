use crate::{AdminResult, Dashboard, NOTICE_DURATION};
use portfolio_client::{ClientOptions, FileSessionStorage, PortfolioClient, SessionStore};
use std::{path::Path, sync::Arc, time::Duration};

/// Parameters required to create a dashboard.
/// # Default Values
/// - `notice_duration`: 5 seconds
pub struct DashboardParams {
    /// Client every manager of the dashboard talks through. Its session
    /// store is the one the dashboard signs out of.
    pub client: PortfolioClient,
    /// How long a success or error notice stays visible.
    pub notice_duration: Duration,
}

impl DashboardParams {
    pub fn new(client: PortfolioClient) -> Self {
        Self {
            client,
            notice_duration: NOTICE_DURATION,
        }
    }

    /// Configure the client from `PORTFOLIO_API_URL` and
    /// `PORTFOLIO_API_TIMEOUT_SECS`, restoring the session persisted at
    /// `session_path`.
    pub fn from_env(session_path: impl AsRef<Path>) -> AdminResult<Self> {
        let session = SessionStore::restore(Arc::new(FileSessionStorage::new(
            session_path.as_ref(),
        )));
        let client = PortfolioClient::http(ClientOptions::from_env()?, session)?;
        Ok(Self::new(client))
    }

    /// Set how long notices stay visible
    #[must_use]
    pub fn notice_duration(mut self, notice_duration: Duration) -> Self {
        self.notice_duration = notice_duration;
        self
    }

    #[must_use]
    pub fn build(self) -> Dashboard {
        Dashboard::new(self)
    }
}
