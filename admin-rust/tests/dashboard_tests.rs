use portfolio_admin::{ContentManager, DashboardParams, DashboardStats, Notice, NoticeBoard};
use portfolio_client::{
    portfolio_client_test::{MockBackend, MockResult},
    ContentKey, HttpMethod, ImageUpload, PortfolioClient, SessionStore,
};
use serde_json::json;
use std::{sync::Arc, time::Duration};

fn client_with(backend: Arc<MockBackend>) -> PortfolioClient {
    let client = PortfolioClient::new(backend, SessionStore::in_memory());
    client.session().establish("admin-token");
    client
}

fn enqueue_dashboard_data(backend: &MockBackend) {
    backend
        .enqueue_for(
            HttpMethod::Get,
            "/content",
            MockResult::ok(json!({
                "name": "Ismail Sanouni",
                "title": "Video Editor",
                "slogan": "",
                "instagram": "https://instagram.com/editor"
            })),
        )
        .enqueue_for(
            HttpMethod::Get,
            "/skills",
            MockResult::ok(json!([{ "id": 1, "name": "Premiere Pro", "level": 90 }])),
        )
        .enqueue_for(
            HttpMethod::Get,
            "/projects",
            MockResult::ok(json!([
                { "id": 1, "title": "Vlog", "image": "img", "video_url": "https://youtu.be/abc" },
                { "id": 2, "title": "Short", "image": "img", "video_url": "https://www.youtube.com/shorts/xyz" }
            ])),
        )
        .enqueue_for(
            HttpMethod::Get,
            "/messages",
            MockResult::ok(json!([
                { "id": 1, "name": "Sam", "email": "sam@example.com", "message": "Hi", "read_status": false, "created_at": "2024-03-05T10:20:30Z" },
                { "id": 2, "name": "Kim", "email": "kim@example.com", "message": "Hello", "read_status": true, "created_at": "2024-03-06 08:00:00" }
            ])),
        );
}

#[tokio::test]
async fn load_fetches_every_collection_and_reports_stats() {
    let backend = Arc::new(MockBackend::new());
    enqueue_dashboard_data(&backend);
    let dashboard = DashboardParams::new(client_with(backend.clone())).build();

    dashboard.load().await.unwrap();

    assert_eq!(backend.request_count(), 4);
    assert_eq!(
        dashboard.stats().await,
        DashboardStats {
            content_fields: 3,
            skills: 1,
            projects: 2,
            messages: 2,
            unread_messages: 1,
        }
    );
    assert!(!dashboard.is_busy());
}

#[tokio::test]
async fn one_failed_collection_does_not_block_the_others() {
    let backend = Arc::new(MockBackend::new());
    backend
        .enqueue_for(HttpMethod::Get, "/content", MockResult::ok(json!({})))
        .enqueue_for(HttpMethod::Get, "/skills", MockResult::network_error())
        .enqueue_for(HttpMethod::Get, "/projects", MockResult::ok(json!([])))
        .enqueue_for(
            HttpMethod::Get,
            "/messages",
            MockResult::ok(json!([{ "id": 9, "read_status": 0, "created_at": "2024-01-01 00:00:00" }])),
        );
    let dashboard = DashboardParams::new(client_with(backend))
        .notice_duration(Duration::from_secs(60))
        .build();

    assert!(dashboard.load().await.is_err());
    assert_eq!(dashboard.messages().count().await, 1);
    assert_eq!(dashboard.notices().duration(), Duration::from_secs(60));
    assert_eq!(dashboard.notice(), Some(Notice::error("Error loading skills")));
}

#[tokio::test]
async fn logout_signs_out_and_unmounts() {
    let backend = Arc::new(MockBackend::new());
    let dashboard = DashboardParams::new(client_with(backend.clone())).build();
    assert!(dashboard.session().is_authenticated());

    dashboard.logout();

    assert!(!dashboard.session().is_authenticated());
    assert!(dashboard.skills().fetch_all().await.is_err());
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn content_edits_stay_local_until_saved() {
    let backend = Arc::new(MockBackend::new());
    backend
        .enqueue(MockResult::ok(json!({ "name": "Ismail", "slogan": "Old" })))
        .enqueue(MockResult::empty());
    let content = ContentManager::new(client_with(backend.clone()), NoticeBoard::new());
    content.fetch_all().await.unwrap();

    content.edit(ContentKey::Slogan, "Cut to the chase").await;
    assert!(content.is_dirty(ContentKey::Slogan).await);
    assert_eq!(content.saved().await.slogan(), "Old");
    assert_eq!(backend.request_count(), 1);

    content.save_field(ContentKey::Slogan).await.unwrap();
    assert!(!content.is_dirty(ContentKey::Slogan).await);
    assert_eq!(
        backend.tracked_requests()[1].body,
        Some(json!({ "key": "slogan", "value": "Cut to the chase" }))
    );
}

#[tokio::test]
async fn save_all_skips_hidden_keys_and_keeps_failed_edits() {
    let backend = Arc::new(MockBackend::new());
    let notices = NoticeBoard::new();
    backend.enqueue(MockResult::ok(json!({ "name": "Ismail", "email": "me@example.com" })));
    let content = ContentManager::new(client_with(backend.clone()), notices.clone());
    content.fetch_all().await.unwrap();
    backend.reset();

    for _ in 0..7 {
        backend.enqueue_for(HttpMethod::Post, "/content/update", MockResult::empty());
    }
    content.edit(ContentKey::Title, "Editor").await;
    content
        .set_profile_image(&ImageUpload::new("me.png", b"png".to_vec()))
        .await;

    assert_eq!(content.save_all().await.unwrap(), 7);
    let keys: Vec<String> = backend
        .tracked_requests()
        .iter()
        .filter_map(|request| request.body.as_ref()?.get("key")?.as_str().map(str::to_string))
        .collect();
    assert_eq!(
        keys,
        vec!["name", "title", "slogan", "about", "profile_image", "instagram", "linkedin"]
    );
    assert_eq!(content.saved().await.profile_image(), "data:image/png;base64,cG5n");
    assert_eq!(
        notices.current(),
        Some(Notice::success("All content saved successfully!"))
    );

    // Fields are sent in key order; only `about` fails.
    backend.restore();
    backend
        .enqueue(MockResult::empty())
        .enqueue(MockResult::empty())
        .enqueue(MockResult::empty())
        .enqueue(MockResult::network_error())
        .enqueue(MockResult::empty())
        .enqueue(MockResult::empty())
        .enqueue(MockResult::empty());
    content.edit(ContentKey::Slogan, "New slogan").await;
    content.edit(ContentKey::About, "New bio").await;

    assert!(content.save_all().await.is_err());
    assert_eq!(content.fields().await.about(), "New bio");
    assert_eq!(content.saved().await.about(), "");
    assert_eq!(content.saved().await.slogan(), "New slogan");
    assert!(content.is_dirty(ContentKey::About).await);
    assert_eq!(notices.current(), Some(Notice::error("Error saving content")));
}
