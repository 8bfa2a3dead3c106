mod backend;
mod client;
mod client_utils;
mod content;
pub mod embed;
mod errors;
mod http;
mod media;
mod opentelemetry;
pub mod portfolio_client_test;
mod resource;
mod session;
mod types;

pub use backend::{Backend, BackendRequest, HttpMethod};
pub use client::{PortfolioClient, LOGIN_FAILED};
pub use content::{ContentFields, ContentKey};
pub use embed::embed_url;
pub use errors::*;
pub use http::{ClientOptions, HttpBackend, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use media::{data_url, ImageUpload};
pub use resource::{Creatable, Editable, Resource};
pub use session::{FileSessionStorage, MemorySessionStorage, Session, SessionStorage, SessionStore};
pub use types::*;
