use axum::{routing::post, Json, Router};
use portfolio_admin::{
    fallback, ContactDelivery, ContactForm, ContactPage, EmailRelayChannel, Footer, HomePage,
    MessagingLinkChannel, Notice, NoticeBoard, RestContactChannel, Source, WorkPage,
};
use portfolio_client::{
    portfolio_client_test::{MockBackend, MockResult},
    HttpMethod, PortfolioClient, SessionStore,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

fn client_with(backend: Arc<MockBackend>) -> PortfolioClient {
    PortfolioClient::new(backend, SessionStore::in_memory())
}

fn filled_form() -> ContactForm {
    ContactForm {
        name: "Sam".to_string(),
        email: "sam@example.com".to_string(),
        message: "Can you cut my vlog?".to_string(),
    }
}

#[tokio::test]
async fn home_page_falls_back_when_backend_is_down() {
    let backend = Arc::new(MockBackend::new());
    backend
        .enqueue(MockResult::network_error())
        .enqueue(MockResult::network_error());

    let page = HomePage::load(&client_with(backend)).await;

    assert_eq!(page.name(), fallback::NAME);
    assert_eq!(page.about(), fallback::ABOUT);
    assert_eq!(page.skills_source, Source::Fallback);
    assert_eq!(page.skills.len(), 12);
    assert_eq!(page.profile_image(), None);
}

#[tokio::test]
async fn home_page_fills_only_missing_fields() {
    let backend = Arc::new(MockBackend::new());
    backend
        .enqueue_for(
            HttpMethod::Get,
            "/content",
            MockResult::ok(json!({ "name": "Jane Doe", "slogan": "  " })),
        )
        .enqueue_for(
            HttpMethod::Get,
            "/skills",
            MockResult::ok(json!([{ "id": 4, "name": "Sound Design", "level": 70 }])),
        );

    let page = HomePage::load(&client_with(backend)).await;

    assert_eq!(page.name(), "Jane Doe");
    assert_eq!(page.slogan(), fallback::SLOGAN);
    assert_eq!(page.title(), fallback::TITLE);
    assert_eq!(page.skills_source, Source::Backend);
    assert_eq!(page.skills[0].name, "Sound Design");
}

#[tokio::test]
async fn empty_project_list_shows_showcase() {
    let backend = Arc::new(MockBackend::new());
    backend.enqueue(MockResult::ok(json!([])));

    let page = WorkPage::load(&client_with(backend)).await;

    assert_eq!(page.source, Source::Fallback);
    assert_eq!(page.projects.len(), 15);
}

#[tokio::test]
async fn work_page_opens_and_closes_the_player() {
    let backend = Arc::new(MockBackend::new());
    backend.enqueue(MockResult::ok(json!([
        { "id": 1, "title": "Vlog", "image": "thumb", "video_url": "https://www.youtube.com/watch?v=SFpqILrea3g" },
        { "id": 2, "title": "Short", "image": "thumb", "video_url": "https://www.youtube.com/shorts/LBRSwmcOFV4" },
        { "id": 3, "title": "Poster", "image": "thumb", "video_url": "" },
        { "id": 4, "title": "Film", "image": "thumb", "video_url": "https://vimeo.com/76979871" }
    ])));
    let mut page = WorkPage::load(&client_with(backend)).await;

    assert_eq!(page.source, Source::Backend);
    assert_eq!(page.shorts().map(|project| project.id).collect::<Vec<_>>(), vec![2]);
    assert_eq!(page.videos().count(), 3);

    let modal = page.open(4).unwrap();
    assert_eq!(modal.embed_url, "https://player.vimeo.com/video/76979871");
    assert!(!modal.is_short);

    assert!(page.open(2).unwrap().is_short);
    assert_eq!(page.modal().unwrap().project_id, 2);
    assert!(page.open(3).is_none());

    page.close();
    assert_eq!(page.modal(), None);
}

#[tokio::test]
async fn footer_loads_links_with_fallbacks() {
    let backend = Arc::new(MockBackend::new());
    backend.enqueue(MockResult::ok(json!({ "linkedin": "https://linkedin.com/in/editor" })));

    let footer = Footer::load(&client_with(backend)).await;

    let urls: Vec<&str> = footer.links.iter().map(|link| link.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![fallback::INSTAGRAM, "https://linkedin.com/in/editor", fallback::X]
    );
}

#[tokio::test]
async fn rest_channel_posts_to_messages_and_clears_form() {
    let backend = Arc::new(MockBackend::new());
    backend.enqueue(MockResult::empty());
    let notices = NoticeBoard::new();
    let page = ContactPage::new(
        Arc::new(RestContactChannel::new(client_with(backend.clone()))),
        notices.clone(),
    );
    let mut form = filled_form();

    assert_eq!(page.submit(&mut form).await.unwrap(), ContactDelivery::Sent);

    assert_eq!(form, ContactForm::default());
    let request = &backend.tracked_requests()[0];
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.path, "/messages");
    assert_eq!(
        request.body,
        Some(json!({ "name": "Sam", "email": "sam@example.com", "message": "Can you cut my vlog?" }))
    );
    assert_eq!(
        notices.current(),
        Some(Notice::success("Your message has been sent successfully!"))
    );
}

#[tokio::test]
async fn failed_delivery_keeps_the_form() {
    let backend = Arc::new(MockBackend::new());
    backend.enqueue(MockResult::network_error());
    let page = ContactPage::new(
        Arc::new(RestContactChannel::new(client_with(backend))),
        NoticeBoard::new(),
    );
    let mut form = filled_form();

    assert!(page.submit(&mut form).await.is_err());
    assert_eq!(form, filled_form());
    assert_eq!(
        page.notices().current(),
        Some(Notice::error("Failed to send message."))
    );
}

#[tokio::test]
async fn invalid_form_is_not_delivered() {
    let backend = Arc::new(MockBackend::new());
    let page = ContactPage::new(
        Arc::new(RestContactChannel::new(client_with(backend.clone()))),
        NoticeBoard::new(),
    );
    let mut form = ContactForm {
        email: "not-an-email".to_string(),
        ..filled_form()
    };

    assert!(page.submit(&mut form).await.is_err());
    assert_eq!(backend.request_count(), 0);
    assert_eq!(
        page.notices().current(),
        Some(Notice::error("Please enter a valid email address"))
    );
}

#[tokio::test]
async fn email_relay_sends_template_params() {
    let received = Arc::new(Mutex::new(None::<Value>));
    let router = Router::new().route(
        "/send",
        post({
            let received = received.clone();
            move |Json(body): Json<Value>| async move {
                *received.lock().unwrap() = Some(body);
                "OK"
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let channel = EmailRelayChannel::new("service_portfolio", "template_contact", "public_key")
        .with_endpoint(format!("http://{addr}/send"));
    let page = ContactPage::new(Arc::new(channel), NoticeBoard::new());

    assert_eq!(
        page.submit(&mut filled_form()).await.unwrap(),
        ContactDelivery::Sent
    );

    let body = received.lock().unwrap().take().unwrap();
    assert_eq!(body["service_id"], "service_portfolio");
    assert_eq!(body["template_id"], "template_contact");
    assert_eq!(body["user_id"], "public_key");
    assert_eq!(body["template_params"]["email"], "sam@example.com");
    assert!(body["template_params"]["time"].as_str().is_some_and(|time| !time.is_empty()));
}

#[tokio::test]
async fn messaging_link_channel_sends_nothing() {
    let page = ContactPage::new(
        Arc::new(MessagingLinkChannel::new("+212600000000")),
        NoticeBoard::new(),
    );

    let delivery = page.submit(&mut filled_form()).await.unwrap();

    let ContactDelivery::OpenLink(link) = &delivery else {
        panic!("expected a link, got {delivery:?}");
    };
    assert!(link.starts_with("https://wa.me/212600000000?text=Name%3A%20Sam"));
}
