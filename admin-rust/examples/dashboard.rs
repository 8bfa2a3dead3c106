use dotenvy::dotenv;
use portfolio_admin::{DashboardParams, GuardDecision, HomePage, Route, RouteGuard, WorkPage};
use portfolio_client::LoginOutcome;
use std::{env, error::Error};
use tracing_subscriber::EnvFilter;

// Usage:
//   PORTFOLIO_API_URL=http://localhost:5000/api \
//   ADMIN_IDENTIFIER=admin@example.com ADMIN_SECRET=... \
//   cargo run --example dashboard
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let session_path = env::var("PORTFOLIO_SESSION_FILE")
        .unwrap_or_else(|_| ".portfolio/session.json".to_string());
    let params = DashboardParams::from_env(&session_path)?;
    let client = params.client.clone();
    let dashboard = params.build();

    let home = HomePage::load(&client).await;
    let work = WorkPage::load(&client).await;
    println!("{} - {}", home.name(), home.title());
    println!(
        "{} videos, {} shorts ({:?})",
        work.videos().count(),
        work.shorts().count(),
        work.source
    );

    let mut guard = RouteGuard::new(dashboard.session().clone());
    if let GuardDecision::Redirect(Route::AdminLogin) = guard.navigate(Route::AdminDashboard) {
        let identifier = env::var("ADMIN_IDENTIFIER")?;
        let secret = env::var("ADMIN_SECRET")?;
        if let LoginOutcome::Failure { message } = client.login(&identifier, &secret).await {
            println!("Login failed: {message}");
            return Ok(());
        }
    }

    dashboard.load().await?;
    let stats = dashboard.stats().await;
    println!(
        "{} content fields, {} skills, {} projects, {} messages ({} unread)",
        stats.content_fields, stats.skills, stats.projects, stats.messages, stats.unread_messages
    );
    if let Some(notice) = dashboard.notice() {
        println!("{:?}: {}", notice.kind, notice.message);
    }

    Ok(())
}
