mod contact;
mod content;
mod dashboard;
mod errors;
pub mod fallback;
mod guard;
mod lifecycle;
mod manager;
mod messages;
mod notice;
mod opentelemetry;
mod params;
mod public;

pub use contact::{
    ContactChannel, ContactDelivery, ContactForm, ContactPage, EmailRelayChannel,
    MessagingLinkChannel, RestContactChannel, EMAIL_RELAY_ENDPOINT,
};
pub use content::ContentManager;
pub use dashboard::{Dashboard, DashboardStats};
pub use errors::{AdminError, AdminResult};
pub use guard::{GuardDecision, Route, RouteGuard};
pub use lifecycle::Lifecycle;
pub use manager::{Confirm, MessagesManager, ProjectsManager, ResourceManager, SkillsManager};
pub use notice::{Notice, NoticeBoard, NoticeKind, NOTICE_DURATION};
pub use params::DashboardParams;
pub use public::{Footer, HomePage, SocialLink, Source, VideoModal, WorkPage};
