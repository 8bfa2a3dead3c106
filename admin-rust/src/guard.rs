use portfolio_client::{Session, SessionStore};
use std::fmt;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Work,
    Contact,
    AdminLogin,
    AdminDashboard,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::About => "/about",
            Self::Work => "/work",
            Self::Contact => "/contact",
            Self::AdminLogin => "/admin/login",
            Self::AdminDashboard => "/admin/dashboard",
        }
    }

    /// Parse a location path. Trailing slashes and query strings are ignored;
    /// `/admin` opens the dashboard.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Self::Home),
            "/about" => Some(Self::About),
            "/work" => Some(Self::Work),
            "/contact" => Some(Self::Contact),
            "/admin/login" => Some(Self::AdminLogin),
            "/admin" | "/admin/dashboard" => Some(Self::AdminDashboard),
            _ => None,
        }
    }

    /// Routes that need an authenticated session.
    #[must_use]
    pub fn is_protected(self) -> bool {
        matches!(self, Self::AdminDashboard)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render(Route),
    Redirect(Route),
}

impl GuardDecision {
    /// The route that ends up on screen.
    #[must_use]
    pub fn route(self) -> Route {
        match self {
            Self::Render(route) | Self::Redirect(route) => route,
        }
    }
}

/// Client-side gate in front of the admin views.
///
/// This only decides what to render; the backend still checks the token on
/// every call.
pub struct RouteGuard {
    session: SessionStore,
    changes: watch::Receiver<Session>,
    mounted: Route,
}

impl RouteGuard {
    #[must_use]
    pub fn new(session: SessionStore) -> Self {
        let changes = session.subscribe();
        Self {
            session,
            changes,
            mounted: Route::Home,
        }
    }

    /// Decide what visiting `route` shows without navigating.
    #[must_use]
    pub fn resolve(&self, route: Route) -> GuardDecision {
        let authenticated = self.session.is_authenticated();
        match route {
            route if route.is_protected() && !authenticated => {
                GuardDecision::Redirect(Route::AdminLogin)
            }
            Route::AdminLogin if authenticated => GuardDecision::Redirect(Route::AdminDashboard),
            route => GuardDecision::Render(route),
        }
    }

    /// Visit `route` and mount whatever the decision shows.
    pub fn navigate(&mut self, route: Route) -> GuardDecision {
        let decision = self.resolve(route);
        if let GuardDecision::Redirect(target) = decision {
            tracing::debug!(from = %route, to = %target, "route guard redirect");
        }
        self.mounted = decision.route();
        self.changes.mark_unchanged();
        decision
    }

    /// The route currently on screen.
    #[must_use]
    pub fn mounted(&self) -> Route {
        self.mounted
    }

    /// Wait for the next login or logout and re-check the mounted route.
    /// Returns `None` once the session store is gone.
    pub async fn changed(&mut self) -> Option<GuardDecision> {
        self.changes.changed().await.ok()?;
        Some(self.navigate(self.mounted))
    }
}
